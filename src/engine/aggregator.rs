use crate::core::balance::BalanceSheet;
use crate::core::expense::{Expense, Split};
use crate::core::payment::Payment;
use log::{debug, warn};
use std::collections::HashMap;
use uuid::Uuid;

/// Folds a group's records into net balances.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Compute every user's net balance.
    ///
    /// # Algorithm
    ///
    /// 1. Each expense credits its payer with the full amount.
    /// 2. Each split of that expense debits its user by the share. The payer
    ///    owes their own share too, so a paying participant nets to
    ///    `amount - own share`.
    /// 3. Each verified payment credits the payer and debits the receiver.
    ///    Pending payments are skipped.
    ///
    /// Splits whose expense is not in `expenses` are ignored. Inconsistent
    /// records are otherwise reflected as-is; nothing here fails.
    pub fn aggregate(expenses: &[Expense], splits: &[Split], payments: &[Payment]) -> BalanceSheet {
        let mut sheet = BalanceSheet::new();

        let mut splits_by_expense: HashMap<Uuid, Vec<&Split>> = HashMap::new();
        for split in splits {
            splits_by_expense
                .entry(split.expense_id())
                .or_default()
                .push(split);
        }

        for expense in expenses {
            sheet.credit(expense.paid_by(), expense.amount());
            if let Some(shares) = splits_by_expense.remove(&expense.id()) {
                for split in shares {
                    sheet.debit(split.user_id(), split.amount());
                }
            }
        }

        let orphaned: usize = splits_by_expense.values().map(Vec::len).sum();
        if orphaned > 0 {
            warn!("ignoring {} split(s) with no matching expense", orphaned);
        }

        let mut applied = 0usize;
        for payment in payments.iter().filter(|p| p.is_verified()) {
            sheet.apply_transfer(payment.payer_id(), payment.receiver_id(), payment.amount());
            applied += 1;
        }

        debug!(
            "aggregated {} expense(s), {} split(s), {} verified payment(s) into {} balance(s)",
            expenses.len(),
            splits.len() - orphaned,
            applied,
            sheet.len()
        );
        sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::user::{GroupId, UserId};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn user(id: &str) -> UserId {
        UserId::new(id)
    }

    fn dinner(paid_by: &str, amount: Decimal, members: &[&str]) -> (Expense, Vec<Split>) {
        let expense = Expense::new(GroupId::new("g"), user(paid_by), amount, "Dinner").unwrap();
        let members: Vec<UserId> = members.iter().map(|m| user(m)).collect();
        let splits = expense.split_equally(&members).unwrap();
        (expense, splits)
    }

    fn payment(from: &str, to: &str, amount: Decimal, verified: bool) -> Payment {
        let mut p = Payment::new(GroupId::new("g"), user(from), user(to), amount).unwrap();
        if verified {
            p.verify(&user(to)).unwrap();
        }
        p
    }

    #[test]
    fn test_single_expense() {
        let (expense, splits) = dinner("A", dec!(90), &["A", "B", "C"]);
        let sheet = BalanceAggregator::aggregate(&[expense], &splits, &[]);

        assert_eq!(sheet.balance(&user("A")), dec!(60));
        assert_eq!(sheet.balance(&user("B")), dec!(-30));
        assert_eq!(sheet.balance(&user("C")), dec!(-30));
        assert!(sheet.is_balanced());
    }

    #[test]
    fn test_payer_outside_split() {
        let (expense, splits) = dinner("A", dec!(40), &["B", "C"]);
        let sheet = BalanceAggregator::aggregate(&[expense], &splits, &[]);

        assert_eq!(sheet.balance(&user("A")), dec!(40));
        assert_eq!(sheet.balance(&user("B")), dec!(-20));
        assert!(sheet.is_balanced());
    }

    #[test]
    fn test_verified_payment_offsets_debt() {
        let (expense, splits) = dinner("A", dec!(90), &["A", "B", "C"]);
        let payments = vec![payment("B", "A", dec!(30), true)];
        let sheet = BalanceAggregator::aggregate(&[expense], &splits, &payments);

        assert_eq!(sheet.balance(&user("A")), dec!(30));
        assert_eq!(sheet.balance(&user("B")), Decimal::ZERO);
        assert_eq!(sheet.balance(&user("C")), dec!(-30));
    }

    #[test]
    fn test_pending_payment_ignored() {
        let (expense, splits) = dinner("A", dec!(90), &["A", "B", "C"]);
        let payments = vec![payment("B", "A", dec!(30), false)];
        let sheet = BalanceAggregator::aggregate(&[expense], &splits, &payments);

        assert_eq!(sheet.balance(&user("B")), dec!(-30));
    }

    #[test]
    fn test_orphan_split_ignored() {
        let (expense, splits) = dinner("A", dec!(90), &["A", "B", "C"]);
        let mut all_splits = splits;
        all_splits.push(Split::new(Uuid::new_v4(), user("D"), dec!(500)));
        let sheet = BalanceAggregator::aggregate(&[expense], &all_splits, &[]);

        assert!(!sheet.contains(&user("D")));
        assert!(sheet.is_balanced());
    }

    #[test]
    fn test_inconsistent_splits_reflected() {
        // Splits cover only part of the expense; the gap shows up as a
        // non-zero total rather than an error.
        let expense = Expense::new(GroupId::new("g"), user("A"), dec!(100), "Hotel").unwrap();
        let splits = vec![Split::new(expense.id(), user("B"), dec!(40))];
        let sheet = BalanceAggregator::aggregate(&[expense], &splits, &[]);

        assert_eq!(sheet.total(), dec!(60));
    }

    #[test]
    fn test_empty_input() {
        let sheet = BalanceAggregator::aggregate(&[], &[], &[]);
        assert!(sheet.is_empty());
    }
}
