use crate::core::user::UserId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Net balance of every user in a group.
///
/// A positive balance means the user is owed money (net creditor).
/// A negative balance means the user owes money (net debtor).
///
/// Balances are keyed in ascending user-id order, so iteration and
/// serialization are deterministic. The sheet is the value handed from the
/// aggregator to the settlement reducer; it is never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceSheet {
    balances: BTreeMap<UserId, Decimal>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increase a user's balance (they are owed more, or owe less).
    pub fn credit(&mut self, user: &UserId, amount: Decimal) {
        *self.entry(user) += amount;
    }

    /// Decrease a user's balance (they owe more, or are owed less).
    pub fn debit(&mut self, user: &UserId, amount: Decimal) {
        *self.entry(user) -= amount;
    }

    /// Apply money moving from `from` to `to`: the payer's balance rises,
    /// the receiver's falls.
    pub fn apply_transfer(&mut self, from: &UserId, to: &UserId, amount: Decimal) {
        self.credit(from, amount);
        self.debit(to, amount);
    }

    fn entry(&mut self, user: &UserId) -> &mut Decimal {
        self.balances.entry(user.clone()).or_insert(Decimal::ZERO)
    }

    /// Net balance of a user; zero for users not on the sheet.
    pub fn balance(&self, user: &UserId) -> Decimal {
        self.balances.get(user).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.balances.contains_key(user)
    }

    /// Iterate balances in ascending user-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&UserId, Decimal)> {
        self.balances.iter().map(|(user, amount)| (user, *amount))
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Sum of every balance. Zero for internally consistent records.
    pub fn total(&self) -> Decimal {
        self.balances.values().sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.total() == Decimal::ZERO
    }

    /// Total owed to creditors (sum of positive balances).
    pub fn outstanding(&self) -> Decimal {
        self.balances
            .values()
            .filter(|v| **v > Decimal::ZERO)
            .sum()
    }

    /// True if no balance is further than `tolerance` from zero.
    pub fn is_settled_within(&self, tolerance: Decimal) -> bool {
        self.balances.values().all(|v| v.abs() <= tolerance)
    }
}

impl FromIterator<(UserId, Decimal)> for BalanceSheet {
    /// Repeated users accumulate.
    fn from_iter<T: IntoIterator<Item = (UserId, Decimal)>>(iter: T) -> Self {
        let mut sheet = Self::new();
        for (user, amount) in iter {
            sheet.credit(&user, amount);
        }
        sheet
    }
}

impl fmt::Display for BalanceSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Balances ===")?;
        for (user, amount) in self.iter() {
            let status = if amount > Decimal::ZERO {
                "OWED"
            } else if amount < Decimal::ZERO {
                "OWES"
            } else {
                "SETTLED"
            };
            writeln!(f, "  {:<20} {:>14}  [{}]", user, amount, status)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sheet_basic() {
        let mut sheet = BalanceSheet::new();
        sheet.credit(&UserId::new("A"), dec!(90));
        sheet.debit(&UserId::new("A"), dec!(30));
        sheet.debit(&UserId::new("B"), dec!(30));

        assert_eq!(sheet.balance(&UserId::new("A")), dec!(60));
        assert_eq!(sheet.balance(&UserId::new("B")), dec!(-30));
        assert_eq!(sheet.balance(&UserId::new("nobody")), Decimal::ZERO);
        assert!(!sheet.contains(&UserId::new("nobody")));
    }

    #[test]
    fn test_transfer_moves_both_sides() {
        let mut sheet: BalanceSheet = vec![
            (UserId::new("A"), dec!(30)),
            (UserId::new("B"), dec!(-30)),
        ]
        .into_iter()
        .collect();
        sheet.apply_transfer(&UserId::new("B"), &UserId::new("A"), dec!(30));

        assert!(sheet.is_settled_within(Decimal::ZERO));
        assert!(sheet.is_balanced());
        assert_eq!(sheet.outstanding(), Decimal::ZERO);
    }

    #[test]
    fn test_outstanding_counts_creditors_only() {
        let sheet: BalanceSheet = vec![
            (UserId::new("A"), dec!(50)),
            (UserId::new("B"), dec!(-20)),
            (UserId::new("C"), dec!(-30)),
        ]
        .into_iter()
        .collect();
        assert_eq!(sheet.outstanding(), dec!(50));
        assert_eq!(sheet.total(), Decimal::ZERO);
    }

    #[test]
    fn test_iteration_is_ordered_by_user() {
        let sheet: BalanceSheet = vec![
            (UserId::new("carol"), dec!(1)),
            (UserId::new("alice"), dec!(2)),
            (UserId::new("bob"), dec!(-3)),
        ]
        .into_iter()
        .collect();
        let users: Vec<&str> = sheet.iter().map(|(u, _)| u.as_str()).collect();
        assert_eq!(users, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_sheet_serializes_as_map() {
        let sheet: BalanceSheet = vec![(UserId::new("A"), dec!(60))].into_iter().collect();
        let json = serde_json::to_string(&sheet).unwrap();
        assert_eq!(json, r#"{"A":"60"}"#);
    }
}
