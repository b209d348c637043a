//! A four-person weekend trip, from expenses to settlement.
//!
//! Shows equal splitting, pending vs. verified payments, and how the
//! settlement plan shrinks once a payment is confirmed.

use group_settle::prelude::*;
use rust_decimal_macros::dec;

fn main() -> Result<(), RecordError> {
    println!("╔══════════════════════════════════════════╗");
    println!("║  group-settle: Weekend Trip Example      ║");
    println!("╚══════════════════════════════════════════╝\n");

    let alice = UserId::new("alice");
    let bob = UserId::new("bob");
    let carol = UserId::new("carol");
    let dave = UserId::new("dave");

    let mut group = Group::new(GroupId::new("weekend-trip"), "Weekend trip", alice.clone());
    group.add_member(bob.clone())?;
    group.add_member(carol.clone())?;
    group.add_member(dave.clone())?;

    let mut records = GroupRecords::new(group.id().clone());

    // --- Expenses ---
    println!("━━━ Expenses ━━━\n");
    for (payer, amount, what) in [
        (&alice, dec!(320.00), "Cabin"),
        (&bob, dec!(86.40), "Groceries"),
        (&carol, dec!(45.00), "Fuel"),
        (&alice, dec!(29.99), "Board games"),
    ] {
        let (expense, splits) = group.record_expense(payer, amount, what)?;
        println!("  {:<6} paid {:>8} for {}", payer, amount, what);
        records.add_expense(expense, splits)?;
    }
    println!("\n  Total spent: {}\n", records.total_spent());

    // --- Before any payment ---
    println!("━━━ Before payments ━━━\n");
    let report = SettlementReport::from_records(&records, &SettlementConfig::default());
    println!("{}", report);

    // --- Bob pays Alice; she confirms ---
    println!("━━━ Bob pays Alice 90 (cash) ━━━\n");
    let payment = group
        .initiate_payment(&bob, &alice, dec!(90))?
        .with_method("cash")
        .with_note("cabin share");
    let payment_id = payment.id();
    records.add_payment(payment)?;

    let pending = SettlementReport::from_records(&records, &SettlementConfig::default());
    println!(
        "  While pending: {} transaction(s) still suggested",
        pending.transactions.len()
    );

    records.payment_mut(payment_id)?.verify(&alice)?;
    let report = SettlementReport::from_records(&records, &SettlementConfig::default());
    println!("  After Alice verifies:\n");
    println!("{}", report);

    // --- Per-member view ---
    println!("━━━ What each member does ━━━\n");
    for member in group.members() {
        let actions: Vec<String> = report
            .transactions_for(member)
            .map(|tx| {
                if &tx.from_user == member {
                    format!("pay {} to {}", tx.amount, tx.to_user)
                } else {
                    format!("receive {} from {}", tx.amount, tx.from_user)
                }
            })
            .collect();
        let summary = if actions.is_empty() {
            "nothing to do".to_string()
        } else {
            actions.join(", ")
        };
        println!("  {:<6} {}", member, summary);
    }

    Ok(())
}
