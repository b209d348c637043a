use crate::core::user::{GroupId, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use uuid::Uuid;

/// Largest amount a single expense or payment may carry.
///
/// Keeps balance arithmetic far from `Decimal::MAX`, where addition panics.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Errors raised when creating or mutating group records.
///
/// Only the write path produces these. Aggregation and settlement are
/// total over whatever records they are handed.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("amount {amount} exceeds the maximum of {max}")]
    AmountTooLarge { amount: Decimal, max: Decimal },

    #[error("expense description must not be empty")]
    EmptyDescription,

    #[error("cannot split an expense among zero members")]
    NoMembers,

    #[error("user {user} is not a member of group {group}")]
    NotGroupMember { user: UserId, group: GroupId },

    #[error("user {user} is already a member of group {group}")]
    AlreadyGroupMember { user: UserId, group: GroupId },

    #[error("user {0} cannot pay themselves")]
    SelfPayment(UserId),

    #[error("record belongs to group {found}, expected {expected}")]
    GroupMismatch { expected: GroupId, found: GroupId },

    #[error("split {split} references expense {found}, expected {expected}")]
    SplitMismatch {
        split: Uuid,
        expected: Uuid,
        found: Uuid,
    },

    #[error("payment {0} not found")]
    PaymentNotFound(Uuid),

    #[error("user {user} is not the receiver of payment {payment}")]
    UnauthorizedVerification { payment: Uuid, user: UserId },

    #[error("payment {0} is already verified")]
    AlreadyVerified(Uuid),
}

/// Reject amounts that are not positive or exceed [`MAX_AMOUNT`].
pub fn check_amount(amount: Decimal) -> Result<(), RecordError> {
    if amount <= Decimal::ZERO {
        return Err(RecordError::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(RecordError::AmountTooLarge {
            amount,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}
