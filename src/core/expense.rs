use crate::core::error::{check_amount, RecordError};
use crate::core::user::{GroupId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest currency unit handed out when distributing split remainders.
const CENT: Decimal = dec!(0.01);

/// A shared expense fronted by one member of a group.
///
/// The payer is credited with the full `amount`; every [`Split`] of the
/// expense debits its user by their share. Expenses are immutable once
/// created.
///
/// # Examples
///
/// ```
/// use group_settle::core::expense::Expense;
/// use group_settle::core::user::{GroupId, UserId};
/// use rust_decimal_macros::dec;
///
/// let expense = Expense::new(
///     GroupId::new("trip"),
///     UserId::new("alice"),
///     dec!(90),
///     "Dinner",
/// ).unwrap();
///
/// assert_eq!(expense.amount(), dec!(90));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    id: Uuid,
    group_id: GroupId,
    /// The member who fronted the money.
    paid_by: UserId,
    /// Total amount paid. Positive.
    amount: Decimal,
    description: String,
    created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Fails if `amount` is not positive, exceeds
    /// [`MAX_AMOUNT`](crate::core::error::MAX_AMOUNT), or `description` is
    /// blank.
    pub fn new(
        group_id: GroupId,
        paid_by: UserId,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<Self, RecordError> {
        Self::with_id(Uuid::new_v4(), group_id, paid_by, amount, description)
    }

    /// Create an expense with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        group_id: GroupId,
        paid_by: UserId,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<Self, RecordError> {
        check_amount(amount)?;
        let description = description.into();
        if description.trim().is_empty() {
            return Err(RecordError::EmptyDescription);
        }
        Ok(Self {
            id,
            group_id,
            paid_by,
            amount,
            description,
            created_at: Utc::now(),
        })
    }

    /// Split this expense into equal shares, one per member.
    ///
    /// Shares are rounded down to whole cents and the leftover cents are
    /// handed out one at a time in member order, so the splits always sum
    /// to exactly `amount`. Any sub-cent remainder lands on the first member.
    pub fn split_equally(&self, members: &[UserId]) -> Result<Vec<Split>, RecordError> {
        if members.is_empty() {
            return Err(RecordError::NoMembers);
        }

        let count = Decimal::from(members.len());
        let base = (self.amount / count)
            .round_dp_with_strategy(2, RoundingStrategy::ToZero)
            .normalize();
        let mut remainder = self.amount - base * count;
        let extra_cents = (remainder / CENT).trunc();
        remainder -= extra_cents * CENT;

        let splits = members
            .iter()
            .enumerate()
            .map(|(i, member)| {
                let mut share = base;
                if Decimal::from(i) < extra_cents {
                    share += CENT;
                }
                if i == 0 && !remainder.is_zero() {
                    share += remainder;
                }
                Split::new(self.id, member.clone(), share)
            })
            .collect();
        Ok(splits)
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn paid_by(&self) -> &UserId {
        &self.paid_by
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// One member's share of a single expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    id: Uuid,
    expense_id: Uuid,
    user_id: UserId,
    amount: Decimal,
}

impl Split {
    pub fn new(expense_id: Uuid, user_id: UserId, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            expense_id,
            user_id,
            amount,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn expense_id(&self) -> Uuid {
        self.expense_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}
