use crate::core::balance::BalanceSheet;
use crate::core::error::RecordError;
use crate::core::expense::{Expense, Split};
use crate::core::payment::Payment;
use crate::core::user::{GroupId, UserId};
use crate::engine::aggregator::BalanceAggregator;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every expense, split and payment recorded for one group.
///
/// This is the unit the engine works on. Records are checked against the
/// group id on insertion, so balances computed from a `GroupRecords` never
/// mix groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecords {
    group_id: GroupId,
    expenses: Vec<Expense>,
    splits: Vec<Split>,
    payments: Vec<Payment>,
}

impl GroupRecords {
    pub fn new(group_id: GroupId) -> Self {
        Self {
            group_id,
            expenses: Vec::new(),
            splits: Vec::new(),
            payments: Vec::new(),
        }
    }

    /// Add an expense together with its splits.
    ///
    /// Every split must reference the expense.
    pub fn add_expense(&mut self, expense: Expense, splits: Vec<Split>) -> Result<(), RecordError> {
        self.check_group(expense.group_id())?;
        if let Some(stray) = splits.iter().find(|s| s.expense_id() != expense.id()) {
            return Err(RecordError::SplitMismatch {
                split: stray.id(),
                expected: expense.id(),
                found: stray.expense_id(),
            });
        }
        self.expenses.push(expense);
        self.splits.extend(splits);
        Ok(())
    }

    pub fn add_payment(&mut self, payment: Payment) -> Result<(), RecordError> {
        self.check_group(payment.group_id())?;
        self.payments.push(payment);
        Ok(())
    }

    /// Look up a payment for in-place updates such as verification.
    pub fn payment_mut(&mut self, id: Uuid) -> Result<&mut Payment, RecordError> {
        self.payments
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(RecordError::PaymentNotFound(id))
    }

    fn check_group(&self, found: &GroupId) -> Result<(), RecordError> {
        if found == &self.group_id {
            Ok(())
        } else {
            Err(RecordError::GroupMismatch {
                expected: self.group_id.clone(),
                found: found.clone(),
            })
        }
    }

    // --- Accessors ---

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn verified_payments(&self) -> impl Iterator<Item = &Payment> {
        self.payments.iter().filter(|p| p.is_verified())
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.splits.is_empty() && self.payments.is_empty()
    }

    /// Total spent by the group across all expenses.
    pub fn total_spent(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount()).sum()
    }

    /// All users referenced by any record, sorted and deduplicated.
    pub fn members(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self
            .expenses
            .iter()
            .map(|e| e.paid_by().clone())
            .chain(self.splits.iter().map(|s| s.user_id().clone()))
            .chain(
                self.payments
                    .iter()
                    .flat_map(|p| [p.payer_id().clone(), p.receiver_id().clone()]),
            )
            .collect();
        users.sort();
        users.dedup();
        users
    }

    /// Net balance per user from expenses, splits and verified payments.
    pub fn balances(&self) -> BalanceSheet {
        BalanceAggregator::aggregate(&self.expenses, &self.splits, &self.payments)
    }
}
