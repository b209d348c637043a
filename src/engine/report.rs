use crate::core::balance::BalanceSheet;
use crate::core::records::GroupRecords;
use crate::core::user::UserId;
use crate::engine::config::{SettlementConfig, LEGACY_TOLERANCE};
use crate::engine::settlement::{SettlementEngine, SettlementTransaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net balances and the transfers that would settle them.
///
/// This is the shape handed to whatever renders the response:
/// `{ "balances": { user: amount }, "transactions": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementReport {
    pub balances: BalanceSheet,
    pub transactions: Vec<SettlementTransaction>,
    /// Tolerance the transactions were computed with. Not part of the wire
    /// format; a report read back from JSON assumes the legacy tolerance.
    #[serde(skip, default = "legacy_tolerance")]
    tolerance: Decimal,
}

fn legacy_tolerance() -> Decimal {
    LEGACY_TOLERANCE
}

impl SettlementReport {
    /// Aggregate a group's records and settle the resulting balances.
    pub fn from_records(records: &GroupRecords, config: &SettlementConfig) -> Self {
        Self::from_balances(records.balances(), config)
    }

    /// Settle an externally supplied balance sheet.
    pub fn from_balances(balances: BalanceSheet, config: &SettlementConfig) -> Self {
        let transactions = SettlementEngine::settle_with(&balances, config).into_transactions();
        Self {
            balances,
            transactions,
            tolerance: config.tolerance,
        }
    }

    /// Balances as they would stand once every transaction is paid.
    pub fn after_settlement(&self) -> BalanceSheet {
        let mut sheet = self.balances.clone();
        for tx in &self.transactions {
            sheet.apply_transfer(&tx.from_user, &tx.to_user, tx.amount);
        }
        sheet
    }

    /// True if paying every transaction leaves each balance within tolerance.
    pub fn is_settled(&self) -> bool {
        self.after_settlement().is_settled_within(self.tolerance)
    }

    /// Transactions in which `user` pays or receives.
    pub fn transactions_for<'a>(
        &'a self,
        user: &'a UserId,
    ) -> impl Iterator<Item = &'a SettlementTransaction> + 'a {
        self.transactions
            .iter()
            .filter(move |tx| &tx.from_user == user || &tx.to_user == user)
    }

    /// Tolerance used by [`is_settled`](Self::is_settled).
    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Credit no transaction pays off: the sum of balances left above
    /// `+tolerance` once every transaction is applied.
    pub fn unmatched_credit(&self) -> Decimal {
        self.after_settlement()
            .iter()
            .map(|(_, amount)| amount)
            .filter(|amount| *amount > self.tolerance)
            .sum()
    }

    /// Debt no transaction pays off, as a positive amount.
    pub fn unmatched_debt(&self) -> Decimal {
        -self
            .after_settlement()
            .iter()
            .map(|(_, amount)| amount)
            .filter(|amount| *amount < -self.tolerance)
            .sum::<Decimal>()
    }

    /// Total still owed across the group.
    pub fn outstanding(&self) -> Decimal {
        self.balances.outstanding()
    }
}

impl std::fmt::Display for SettlementReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.balances)?;
        writeln!(f, "\n=== Settlements ===")?;
        if self.transactions.is_empty() {
            writeln!(f, "  All settled up.")?;
        }
        for tx in &self.transactions {
            writeln!(f, "  {:<20} pays {:<20} {:>12}", tx.from_user, tx.to_user, tx.amount)?;
        }
        writeln!(f, "\nOutstanding: {}", self.outstanding())?;
        Ok(())
    }
}
