//! group-settle CLI
//!
//! Compute balances and settlements for a group from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Settle a group described in a JSON file
//! group-settle settle --input group.json
//!
//! # Output as JSON, using exact arithmetic
//! group-settle settle --input group.json --format json --exact
//!
//! # Show net balances only
//! group-settle balances --input group.json
//!
//! # Generate a random group for testing
//! group-settle generate --members 6 --expenses 40
//! ```

use group_settle::core::expense::Expense;
use group_settle::core::group::Group;
use group_settle::core::payment::PaymentStatus;
use group_settle::core::records::GroupRecords;
use group_settle::core::user::{GroupId, UserId};
use group_settle::engine::config::SettlementConfig;
use group_settle::engine::report::SettlementReport;
use group_settle::simulation::random_group::{generate_random_group, GroupConfig};
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"group-settle: balances and settlements for shared group expenses

USAGE:
    group-settle <COMMAND> [OPTIONS]

COMMANDS:
    settle      Compute balances and the transfers that settle them
    balances    Compute net balances only
    generate    Generate a random group (for testing)
    help        Show this message

OPTIONS (settle, balances):
    --input <FILE>        Path to JSON group file
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (settle):
    --exact               Treat only exact zero as settled
    --tolerance <AMOUNT>  Custom settled threshold (default: 0.01)

OPTIONS (generate):
    --members <N>         Number of members (default: 5)
    --expenses <N>        Number of expenses (default: 20)
    --payments <N>        Number of payments (default: 5)
    --output <FILE>       Write to file instead of stdout

Set RUST_LOG=debug for engine diagnostics.

EXAMPLES:
    group-settle settle --input trip.json
    group-settle settle --input trip.json --format json --exact
    group-settle balances --input trip.json
    group-settle generate --members 8 --expenses 50 --output sim.json"#
    );
}

/// JSON schema for an input expense.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseInput {
    paid_by: String,
    amount: Decimal,
    description: String,
    /// Members sharing the expense; everyone when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    split_among: Option<Vec<String>>,
}

/// JSON schema for an input payment.
#[derive(Serialize, Deserialize)]
struct PaymentInput {
    from: String,
    to: String,
    amount: Decimal,
    #[serde(default = "default_status")]
    status: PaymentStatus,
}

fn default_status() -> PaymentStatus {
    PaymentStatus::Verified
}

#[derive(Serialize, Deserialize)]
struct GroupFile {
    group: String,
    members: Vec<String>,
    #[serde(default)]
    expenses: Vec<ExpenseInput>,
    #[serde(default)]
    payments: Vec<PaymentInput>,
}

fn exit_on_err<T, E: Display>(result: Result<T, E>, context: &str) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("{}: {}", context, e);
        process::exit(1);
    })
}

fn load_records(path: &str) -> GroupRecords {
    let content = exit_on_err(fs::read_to_string(path), &format!("Error reading file '{}'", path));

    let file: GroupFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(r#"{{
  "group": "trip",
  "members": ["alice", "bob", "carol"],
  "expenses": [
    {{ "paidBy": "alice", "amount": "90", "description": "Dinner" }}
  ],
  "payments": [
    {{ "from": "bob", "to": "alice", "amount": "30", "status": "verified" }}
  ]
}}"#);
        process::exit(1);
    });

    let Some((creator, rest)) = file.members.split_first() else {
        eprintln!("Error: group '{}' has no members", file.group);
        process::exit(1);
    };

    let mut group = Group::new(GroupId::new(&file.group), &file.group, UserId::new(creator));
    for member in rest {
        exit_on_err(group.add_member(UserId::new(member)), "Invalid member");
    }

    let mut records = GroupRecords::new(group.id().clone());
    for input in file.expenses {
        let payer = UserId::new(&input.paid_by);
        let (expense, splits) = match input.split_among {
            Some(among) => {
                let among: Vec<UserId> = among.iter().map(UserId::new).collect();
                let outsider = std::iter::once(&payer)
                    .chain(&among)
                    .find(|u| !group.is_member(u));
                if let Some(outsider) = outsider {
                    eprintln!(
                        "Invalid expense: user '{}' is not a member of '{}'",
                        outsider, file.group
                    );
                    process::exit(1);
                }
                let expense = exit_on_err(
                    Expense::new(group.id().clone(), payer, input.amount, input.description),
                    "Invalid expense",
                );
                let splits = exit_on_err(expense.split_equally(&among), "Invalid expense");
                (expense, splits)
            }
            None => exit_on_err(
                group.record_expense(&payer, input.amount, input.description),
                "Invalid expense",
            ),
        };
        exit_on_err(records.add_expense(expense, splits), "Invalid expense");
    }

    for input in file.payments {
        let receiver = UserId::new(&input.to);
        let mut payment = exit_on_err(
            group.initiate_payment(&UserId::new(&input.from), &receiver, input.amount),
            "Invalid payment",
        );
        if input.status == PaymentStatus::Verified {
            exit_on_err(payment.verify(&receiver), "Invalid payment");
        }
        exit_on_err(records.add_payment(payment), "Invalid payment");
    }

    info!(
        "loaded group '{}': {} expense(s), {} payment(s)",
        file.group,
        records.expenses().len(),
        records.payments().len()
    );
    records
}

/// Options shared by `settle` and `balances`.
struct ReportArgs {
    input_path: String,
    format: String,
    config: SettlementConfig,
}

fn parse_report_args(args: &[String]) -> ReportArgs {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut config = SettlementConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--exact" => config = SettlementConfig::exact(),
            "--tolerance" => {
                i += 1;
                let tolerance: Decimal = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--tolerance requires a decimal amount");
                        process::exit(1);
                    });
                config = SettlementConfig::with_tolerance(tolerance);
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input_path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    ReportArgs {
        input_path,
        format,
        config,
    }
}

fn print_json<T: Serialize>(value: &T) {
    let json = exit_on_err(serde_json::to_string_pretty(value), "Error encoding JSON");
    println!("{}", json);
}

fn cmd_settle(args: &[String]) {
    let args = parse_report_args(args);
    let records = load_records(&args.input_path);
    let report = SettlementReport::from_records(&records, &args.config);

    if args.format == "json" {
        print_json(&report);
    } else {
        println!("{}", report);
        if !report.is_settled() {
            println!(
                "Warning: {} credit and {} debt could not be matched",
                report.unmatched_credit(),
                report.unmatched_debt()
            );
        }
    }
}

fn cmd_balances(args: &[String]) {
    let args = parse_report_args(args);
    let balances = load_records(&args.input_path).balances();

    if args.format == "json" {
        print_json(&balances);
    } else {
        println!("{}", balances);
        println!("Outstanding: {}", balances.outstanding());
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = GroupConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--members" | "--expenses" | "--payments" => {
                let flag = args[i].clone();
                i += 1;
                let n: usize = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("{} requires a number", flag);
                        process::exit(1);
                    });
                match flag.as_str() {
                    "--members" => config.member_count = n,
                    "--expenses" => config.expense_count = n,
                    _ => config.payment_count = n,
                }
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let (group, records) = exit_on_err(generate_random_group(&config), "Error generating group");

    // Members are written in creation order and every expense is split
    // across all of them, so the default (absent) splitAmong reproduces
    // the same splits on load.
    let output = GroupFile {
        group: group.id().to_string(),
        members: group.members().iter().map(|m| m.to_string()).collect(),
        expenses: records
            .expenses()
            .iter()
            .map(|e| ExpenseInput {
                paid_by: e.paid_by().to_string(),
                amount: e.amount(),
                description: e.description().to_string(),
                split_among: None,
            })
            .collect(),
        payments: records
            .payments()
            .iter()
            .map(|p| PaymentInput {
                from: p.payer_id().to_string(),
                to: p.receiver_id().to_string(),
                amount: p.amount(),
                status: p.status(),
            })
            .collect(),
    };

    let json = exit_on_err(serde_json::to_string_pretty(&output), "Error encoding JSON");

    if let Some(path) = output_path {
        exit_on_err(fs::write(&path, &json), &format!("Error writing to '{}'", path));
        eprintln!(
            "Generated {} expenses and {} payments across {} members → {}",
            output.expenses.len(),
            output.payments.len(),
            output.members.len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "balances" => cmd_balances(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
