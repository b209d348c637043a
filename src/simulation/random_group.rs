//! Random group generation for benchmarks and manual testing.

use crate::core::error::RecordError;
use crate::core::group::Group;
use crate::core::records::GroupRecords;
use crate::core::user::{GroupId, UserId};
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Configuration for generating a random group history.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of members, including the creator.
    pub member_count: usize,
    pub expense_count: usize,
    pub payment_count: usize,
    /// Probability that a generated payment has been verified.
    pub verified_ratio: f64,
    /// Minimum expense amount.
    pub min_amount: Decimal,
    /// Maximum expense amount.
    pub max_amount: Decimal,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            member_count: 5,
            expense_count: 20,
            payment_count: 5,
            verified_ratio: 0.8,
            min_amount: Decimal::from(5),
            max_amount: Decimal::from(500),
        }
    }
}

/// Generate a random group with equally split expenses and a mix of
/// pending and verified payments.
///
/// Returns the group itself alongside its records, since members with no
/// activity never show up in the records.
pub fn generate_random_group(config: &GroupConfig) -> Result<(Group, GroupRecords), RecordError> {
    let mut rng = rand::thread_rng();

    let members: Vec<UserId> = (0..config.member_count.max(1))
        .map(|i| UserId::new(format!("MEMBER-{:03}", i)))
        .collect();

    let mut group = Group::new(GroupId::new("SIM-GROUP"), "Simulated group", members[0].clone());
    for member in &members[1..] {
        group.add_member(member.clone())?;
    }
    let mut records = GroupRecords::new(group.id().clone());

    let min_cents = to_cents(config.min_amount).max(1);
    let max_cents = to_cents(config.max_amount).max(min_cents);

    for i in 0..config.expense_count {
        let payer = &members[rng.gen_range(0..members.len())];
        let amount = Decimal::new(rng.gen_range(min_cents..=max_cents), 2);
        let (expense, splits) = group.record_expense(payer, amount, format!("Expense #{}", i + 1))?;
        records.add_expense(expense, splits)?;
    }

    if members.len() > 1 {
        for _ in 0..config.payment_count {
            let payer_idx = rng.gen_range(0..members.len());
            let mut receiver_idx = rng.gen_range(0..members.len());
            while receiver_idx == payer_idx {
                receiver_idx = rng.gen_range(0..members.len());
            }
            let amount = Decimal::new(rng.gen_range(min_cents..=max_cents), 2);
            let receiver = &members[receiver_idx];
            let mut payment = group.initiate_payment(&members[payer_idx], receiver, amount)?;
            if rng.gen_bool(config.verified_ratio.clamp(0.0, 1.0)) {
                payment.verify(receiver)?;
            }
            records.add_payment(payment)?;
        }
    }

    Ok((group, records))
}

fn to_cents(amount: Decimal) -> i64 {
    (amount * Decimal::from(100)).trunc().to_i64().unwrap_or(0)
}
