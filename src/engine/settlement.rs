use crate::core::balance::BalanceSheet;
use crate::core::user::UserId;
use crate::engine::config::SettlementConfig;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recommended payment: `from_user` should pay `amount` to `to_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementTransaction {
    pub from_user: UserId,
    pub to_user: UserId,
    pub amount: Decimal,
}

impl fmt::Display for SettlementTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}: {}", self.from_user, self.to_user, self.amount)
    }
}

/// Ordered transactions that close a group's debts, plus whatever the
/// greedy pass could not match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementPlan {
    transactions: Vec<SettlementTransaction>,
    /// Credit left unmatched once the debtors ran out.
    residual_credit: Decimal,
    /// Debt left unmatched once the creditors ran out.
    residual_debt: Decimal,
    creditor_count: usize,
    debtor_count: usize,
}

impl SettlementPlan {
    pub fn transactions(&self) -> &[SettlementTransaction] {
        &self.transactions
    }

    pub fn into_transactions(self) -> Vec<SettlementTransaction> {
        self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of every recommended transfer.
    pub fn total_transferred(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    pub fn residual_credit(&self) -> Decimal {
        self.residual_credit
    }

    pub fn residual_debt(&self) -> Decimal {
        self.residual_debt
    }

    /// Number of users who entered the plan as creditors.
    pub fn creditor_count(&self) -> usize {
        self.creditor_count
    }

    pub fn debtor_count(&self) -> usize {
        self.debtor_count
    }

    /// True when nothing was left unmatched.
    pub fn is_complete(&self) -> bool {
        self.residual_credit == Decimal::ZERO && self.residual_debt == Decimal::ZERO
    }
}

impl fmt::Display for SettlementPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Settlement Plan ===")?;
        writeln!(f, "Creditors:      {}", self.creditor_count)?;
        writeln!(f, "Debtors:        {}", self.debtor_count)?;
        writeln!(f, "Transactions:   {}", self.transactions.len())?;
        writeln!(f, "Transferred:    {}", self.total_transferred())?;
        if !self.is_complete() {
            writeln!(f, "Unmatched credit: {}", self.residual_credit)?;
            writeln!(f, "Unmatched debt:   {}", self.residual_debt)?;
        }
        for (i, tx) in self.transactions.iter().enumerate() {
            writeln!(f, "  {:>3}. {}", i + 1, tx)?;
        }
        Ok(())
    }
}

/// One side of the matching: a user and what they still owe or are owed,
/// always stored as a positive amount.
struct Position {
    user: UserId,
    remaining: Decimal,
}

/// Reduces net balances to a short list of pairwise transfers.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Settle with the default (legacy 0.01) tolerance.
    pub fn settle(balances: &BalanceSheet) -> SettlementPlan {
        Self::settle_with(balances, &SettlementConfig::default())
    }

    /// Greedy largest-debtor / largest-creditor matching.
    ///
    /// # Algorithm
    ///
    /// 1. Users above `+tolerance` are creditors, users below `-tolerance`
    ///    are debtors; everyone else is already settled.
    /// 2. Both lists are sorted by amount descending. Ties keep ascending
    ///    user-id order.
    /// 3. Walk a cursor through each list. Each step moves
    ///    `min(debt, credit)` from the current debtor to the current
    ///    creditor and advances whichever cursor has less than `tolerance`
    ///    left (possibly both). A leftover of exactly one cent under the
    ///    default config is still paid.
    /// 4. Stop when either list runs out. Leftovers are reported as
    ///    residuals, never as an error.
    ///
    /// Every step settles at least one side, so the plan has at most
    /// `creditors + debtors - 1` transactions. This is a heuristic, not
    /// the minimum possible transaction count.
    pub fn settle_with(balances: &BalanceSheet, config: &SettlementConfig) -> SettlementPlan {
        let (mut creditors, mut debtors) = Self::partition(balances, config);
        let creditor_count = creditors.len();
        let debtor_count = debtors.len();

        let mut transactions = Vec::new();
        let mut d = 0;
        let mut c = 0;

        while d < debtors.len() && c < creditors.len() {
            let debtor = &mut debtors[d];
            let creditor = &mut creditors[c];
            let amount = debtor.remaining.min(creditor.remaining);

            transactions.push(SettlementTransaction {
                from_user: debtor.user.clone(),
                to_user: creditor.user.clone(),
                amount,
            });

            debtor.remaining -= amount;
            creditor.remaining -= amount;

            if config.is_exhausted(debtor.remaining) {
                d += 1;
            }
            if config.is_exhausted(creditor.remaining) {
                c += 1;
            }
        }

        let residual_debt: Decimal = debtors[d..]
            .iter()
            .map(|p| p.remaining)
            .sum();
        let residual_credit: Decimal = creditors[c..]
            .iter()
            .map(|p| p.remaining)
            .sum();

        if residual_debt > config.tolerance || residual_credit > config.tolerance {
            warn!(
                "balances do not net to zero: {} credit and {} debt left unmatched",
                residual_credit, residual_debt
            );
        }
        debug!(
            "settled {} creditor(s) and {} debtor(s) with {} transaction(s)",
            creditor_count,
            debtor_count,
            transactions.len()
        );

        SettlementPlan {
            transactions,
            residual_credit,
            residual_debt,
            creditor_count,
            debtor_count,
        }
    }

    /// Split balances into creditors and debtors, each sorted largest first.
    fn partition(
        balances: &BalanceSheet,
        config: &SettlementConfig,
    ) -> (Vec<Position>, Vec<Position>) {
        let mut creditors = Vec::new();
        let mut debtors = Vec::new();

        // BalanceSheet iterates in user-id order; the stable sorts below
        // keep that order among equal amounts.
        for (user, amount) in balances.iter() {
            if amount > config.tolerance {
                creditors.push(Position {
                    user: user.clone(),
                    remaining: amount,
                });
            } else if amount < -config.tolerance {
                debtors.push(Position {
                    user: user.clone(),
                    remaining: -amount,
                });
            }
        }

        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        (creditors, debtors)
    }
}
