//! # group-settle
//!
//! Balance aggregation and debt settlement for shared group expenses.
//!
//! Given a group's expenses, their per-member splits and the payments
//! members have made to each other, this crate computes each member's net
//! balance and reduces those balances to a short list of "who pays whom"
//! transfers.
//!
//! ## Architecture
//!
//! - **core**: Domain records: users, groups, expenses, splits, payments, balance sheet
//! - **engine**: Balance aggregation, greedy settlement, response report
//! - **simulation**: Random group generation for benchmarks
//!
//! ```
//! use group_settle::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let mut group = Group::new(GroupId::new("trip"), "Trip", UserId::new("A"));
//! group.add_member(UserId::new("B")).unwrap();
//! group.add_member(UserId::new("C")).unwrap();
//!
//! let mut records = GroupRecords::new(group.id().clone());
//! let (expense, splits) = group.record_expense(&UserId::new("A"), dec!(90), "Dinner").unwrap();
//! records.add_expense(expense, splits).unwrap();
//!
//! let report = SettlementReport::from_records(&records, &SettlementConfig::default());
//! assert_eq!(report.balances.balance(&UserId::new("A")), dec!(60));
//! assert_eq!(report.transactions.len(), 2);
//! ```

pub mod core;
pub mod engine;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::balance::BalanceSheet;
    pub use crate::core::error::RecordError;
    pub use crate::core::expense::{Expense, Split};
    pub use crate::core::group::Group;
    pub use crate::core::payment::{Payment, PaymentStatus};
    pub use crate::core::records::GroupRecords;
    pub use crate::core::user::{GroupId, UserId};
    pub use crate::engine::aggregator::BalanceAggregator;
    pub use crate::engine::config::SettlementConfig;
    pub use crate::engine::report::SettlementReport;
    pub use crate::engine::settlement::{SettlementEngine, SettlementPlan, SettlementTransaction};
}
