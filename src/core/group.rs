use crate::core::error::RecordError;
use crate::core::expense::{Expense, Split};
use crate::core::payment::Payment;
use crate::core::user::{GroupId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A set of users sharing expenses.
///
/// The group owns the write-path rules: only members may log expenses or
/// payments, and every expense is split equally across the members present
/// at the time it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    id: GroupId,
    name: String,
    created_by: UserId,
    members: Vec<UserId>,
    created_at: DateTime<Utc>,
}

impl Group {
    /// Create a group. The creator becomes its first member.
    pub fn new(id: GroupId, name: impl Into<String>, created_by: UserId) -> Self {
        Self {
            id,
            name: name.into(),
            members: vec![created_by.clone()],
            created_by,
            created_at: Utc::now(),
        }
    }

    pub fn add_member(&mut self, user: UserId) -> Result<(), RecordError> {
        if self.is_member(&user) {
            return Err(RecordError::AlreadyGroupMember {
                user,
                group: self.id.clone(),
            });
        }
        self.members.push(user);
        Ok(())
    }

    pub fn is_member(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }

    /// Log an expense paid by `paid_by` and split it equally across the
    /// current members.
    pub fn record_expense(
        &self,
        paid_by: &UserId,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<(Expense, Vec<Split>), RecordError> {
        self.ensure_member(paid_by)?;
        let expense = Expense::new(self.id.clone(), paid_by.clone(), amount, description)?;
        let splits = expense.split_equally(&self.members)?;
        Ok((expense, splits))
    }

    /// Record a pending payment between two members.
    pub fn initiate_payment(
        &self,
        payer: &UserId,
        receiver: &UserId,
        amount: Decimal,
    ) -> Result<Payment, RecordError> {
        self.ensure_member(payer)?;
        self.ensure_member(receiver)?;
        Payment::new(self.id.clone(), payer.clone(), receiver.clone(), amount)
    }

    fn ensure_member(&self, user: &UserId) -> Result<(), RecordError> {
        if self.is_member(user) {
            Ok(())
        } else {
            Err(RecordError::NotGroupMember {
                user: user.clone(),
                group: self.id.clone(),
            })
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
