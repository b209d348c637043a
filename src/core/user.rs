use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a user taking part in group expenses.
///
/// The engine never looks inside the id; it only compares and orders it.
/// Ordering matters: ties in the settlement reducer are broken by
/// ascending user id.
///
/// # Examples
///
/// ```
/// use group_settle::core::user::UserId;
///
/// let alice = UserId::new("alice");
/// let bob = UserId::new("bob");
/// assert_ne!(alice, bob);
/// assert!(alice < bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this user ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a group, the aggregation boundary for balances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_equality() {
        let a = UserId::new("alice");
        let b = UserId::new("alice");
        let c = UserId::new("bob");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_user_display() {
        let u = UserId::new("64f1c0ffee");
        assert_eq!(format!("{}", u), "64f1c0ffee");
    }

    #[test]
    fn test_user_ordering() {
        assert!(UserId::new("A") < UserId::new("B"));
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&GroupId::new("trip")).unwrap();
        assert_eq!(json, "\"trip\"");
        let user: UserId = serde_json::from_str("\"carol\"").unwrap();
        assert_eq!(user.as_str(), "carol");
    }
}
