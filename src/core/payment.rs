use crate::core::error::{check_amount, RecordError};
use crate::core::user::{GroupId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a payment between two group members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Recorded by the payer, not yet confirmed.
    Pending,
    /// Confirmed by the receiver. Only these offset balances.
    Verified,
}

/// Money handed from one member to another to discharge debt.
///
/// Payments start out [`PaymentStatus::Pending`] and only count towards
/// balances once the receiver has verified them.
///
/// # Examples
///
/// ```
/// use group_settle::core::payment::{Payment, PaymentStatus};
/// use group_settle::core::user::{GroupId, UserId};
/// use rust_decimal_macros::dec;
///
/// let mut payment = Payment::new(
///     GroupId::new("trip"),
///     UserId::new("bob"),
///     UserId::new("alice"),
///     dec!(30),
/// ).unwrap();
/// assert_eq!(payment.status(), PaymentStatus::Pending);
///
/// payment.verify(&UserId::new("alice")).unwrap();
/// assert!(payment.is_verified());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    id: Uuid,
    group_id: GroupId,
    payer_id: UserId,
    /// The member who is owed money.
    receiver_id: UserId,
    amount: Decimal,
    #[serde(
        rename = "paymentMethod",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    status: PaymentStatus,
    created_at: DateTime<Utc>,
}

impl Payment {
    /// Record a new pending payment.
    pub fn new(
        group_id: GroupId,
        payer_id: UserId,
        receiver_id: UserId,
        amount: Decimal,
    ) -> Result<Self, RecordError> {
        check_amount(amount)?;
        if payer_id == receiver_id {
            return Err(RecordError::SelfPayment(payer_id));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            group_id,
            payer_id,
            receiver_id,
            amount,
            method: None,
            note: None,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Set how the money was handed over, e.g. "cash" or "upi".
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Mark the payment as received.
    ///
    /// Only the receiver may verify, and only once.
    pub fn verify(&mut self, by: &UserId) -> Result<(), RecordError> {
        if by != &self.receiver_id {
            return Err(RecordError::UnauthorizedVerification {
                payment: self.id,
                user: by.clone(),
            });
        }
        if self.is_verified() {
            return Err(RecordError::AlreadyVerified(self.id));
        }
        self.status = PaymentStatus::Verified;
        Ok(())
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn payer_id(&self) -> &UserId {
        &self.payer_id
    }

    pub fn receiver_id(&self) -> &UserId {
        &self.receiver_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn is_verified(&self) -> bool {
        self.status == PaymentStatus::Verified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
