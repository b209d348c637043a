use group_settle::core::balance::BalanceSheet;
use group_settle::core::expense::Expense;
use group_settle::core::group::Group;
use group_settle::core::records::GroupRecords;
use group_settle::core::user::{GroupId, UserId};
use group_settle::engine::aggregator::BalanceAggregator;
use group_settle::engine::config::SettlementConfig;
use group_settle::engine::report::SettlementReport;
use group_settle::engine::settlement::{SettlementEngine, SettlementTransaction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn user(id: &str) -> UserId {
    UserId::new(id)
}

fn tx(from: &str, to: &str, amount: Decimal) -> SettlementTransaction {
    SettlementTransaction {
        from_user: user(from),
        to_user: user(to),
        amount,
    }
}

fn abc_group() -> Group {
    let mut group = Group::new(GroupId::new("abc"), "A, B and C", user("A"));
    group.add_member(user("B")).unwrap();
    group.add_member(user("C")).unwrap();
    group
}

/// One expense of 90 paid by A, split equally three ways.
fn dinner_records(group: &Group) -> GroupRecords {
    let mut records = GroupRecords::new(group.id().clone());
    let (expense, splits) = group.record_expense(&user("A"), dec!(90), "Dinner").unwrap();
    records.add_expense(expense, splits).unwrap();
    records
}

#[test]
fn single_expense_three_way_split() {
    let group = abc_group();
    let records = dinner_records(&group);

    let report = SettlementReport::from_records(&records, &SettlementConfig::default());
    assert_eq!(report.balances.balance(&user("A")), dec!(60));
    assert_eq!(report.balances.balance(&user("B")), dec!(-30));
    assert_eq!(report.balances.balance(&user("C")), dec!(-30));
    assert_eq!(
        report.transactions,
        vec![tx("B", "A", dec!(30)), tx("C", "A", dec!(30))]
    );
}

#[test]
fn larger_debt_settles_first() {
    let balances: BalanceSheet = vec![
        (user("A"), dec!(50)),
        (user("B"), dec!(-20)),
        (user("C"), dec!(-30)),
    ]
    .into_iter()
    .collect();

    let plan = SettlementEngine::settle(&balances);
    assert_eq!(
        plan.transactions(),
        &[tx("C", "A", dec!(30)), tx("B", "A", dec!(20))]
    );
}

#[test]
fn verified_payment_reduces_remaining_transfers() {
    let group = abc_group();
    let mut records = dinner_records(&group);

    let payment = group.initiate_payment(&user("B"), &user("A"), dec!(30)).unwrap();
    let id = payment.id();
    records.add_payment(payment).unwrap();

    // Still pending: B's debt is untouched.
    let pending = SettlementReport::from_records(&records, &SettlementConfig::default());
    assert_eq!(pending.transactions.len(), 2);

    records.payment_mut(id).unwrap().verify(&user("A")).unwrap();
    let report = SettlementReport::from_records(&records, &SettlementConfig::default());

    assert_eq!(report.balances.balance(&user("A")), dec!(30));
    assert_eq!(report.balances.balance(&user("B")), Decimal::ZERO);
    assert_eq!(report.balances.balance(&user("C")), dec!(-30));
    assert_eq!(report.transactions, vec![tx("C", "A", dec!(30))]);
}

#[test]
fn empty_group_produces_nothing() {
    let records = GroupRecords::new(GroupId::new("empty"));
    let report = SettlementReport::from_records(&records, &SettlementConfig::default());
    assert!(report.balances.is_empty());
    assert!(report.transactions.is_empty());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["balances"], serde_json::json!({}));
    assert_eq!(json["transactions"], serde_json::json!([]));
}

#[test]
fn creditors_only_returns_no_transactions() {
    let balances: BalanceSheet = vec![(user("A"), dec!(10)), (user("B"), dec!(5))]
        .into_iter()
        .collect();
    let plan = SettlementEngine::settle(&balances);
    assert!(plan.is_empty());
}

/// Several expenses with different payers, a partial payment, and uneven
/// cent splits.
#[test]
fn weekend_trip_pipeline() {
    let mut group = Group::new(GroupId::new("trip"), "Weekend trip", user("alice"));
    for member in ["bob", "carol", "dave"] {
        group.add_member(user(member)).unwrap();
    }
    let mut records = GroupRecords::new(group.id().clone());

    for (payer, amount, what) in [
        ("alice", dec!(240.00), "Cabin"),
        ("bob", dec!(100.00), "Groceries"),
        ("carol", dec!(37.50), "Fuel"),
        ("alice", dec!(19.99), "Firewood"),
    ] {
        let (expense, splits) = group.record_expense(&user(payer), amount, what).unwrap();
        records.add_expense(expense, splits).unwrap();
    }

    let mut payment = group
        .initiate_payment(&user("dave"), &user("alice"), dec!(50))
        .unwrap()
        .with_method("cash");
    payment.verify(&user("alice")).unwrap();
    records.add_payment(payment).unwrap();

    let balances = records.balances();
    assert!(balances.is_balanced());
    assert_eq!(records.total_spent(), dec!(397.49));

    let report = SettlementReport::from_balances(balances, &SettlementConfig::exact());
    assert!(report.is_settled());
    assert!(report.transactions.len() <= 3);
    for tx in &report.transactions {
        assert!(tx.amount > Decimal::ZERO);
        assert_ne!(tx.from_user, tx.to_user);
    }
}

/// A split pointing at an expense outside the input is ignored, and a
/// custom split policy (payer not sharing) still nets correctly.
#[test]
fn aggregator_over_raw_records() {
    let expense = Expense::new(GroupId::new("g"), user("A"), dec!(40), "Taxi").unwrap();
    let mut splits = expense.split_equally(&[user("B"), user("C")]).unwrap();
    let unrelated = Expense::new(GroupId::new("g"), user("Z"), dec!(1000), "Elsewhere").unwrap();
    splits.extend(unrelated.split_equally(&[user("Z"), user("B")]).unwrap());

    let sheet = BalanceAggregator::aggregate(&[expense], &splits, &[]);
    assert_eq!(sheet.balance(&user("A")), dec!(40));
    assert_eq!(sheet.balance(&user("B")), dec!(-20));
    assert!(!sheet.contains(&user("Z")));
}

#[test]
fn report_round_trips_through_json() {
    let records = dinner_records(&abc_group());
    let report = SettlementReport::from_records(&records, &SettlementConfig::default());

    let json = serde_json::to_string(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["balances"]["A"], "60");
    assert_eq!(parsed["transactions"][1]["fromUser"], "C");

    let back: SettlementReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.balances, report.balances);
    assert_eq!(back.transactions, report.transactions);
}
