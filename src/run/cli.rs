use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::Path;

use crate::db::Database;
use crate::engine::{self, View};
use crate::ledger::{self, TransactionDraft};
use crate::models::{Budget, TimeRange, TransactionKind};
use crate::ui::util::{format_amount, format_signed};

use super::shellexpand;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], db),
        "list" | "ls" => cli_list(&args[2..], db),
        "add" => cli_add(&args[2..], db),
        "delete" | "rm" => cli_delete(&args[2..], db),
        "budget" => cli_budget(&args[2..], db),
        "budgets" => cli_budgets(db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetview {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("budgetview - local personal budget tracker");
    println!();
    println!("Usage: budgetview [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                 Launch interactive TUI");
    println!("  summary [month|year|all]               Print totals and budget breakdown");
    println!("    --date <YYYY-MM-DD>                  Reference date (default: today)");
    println!("    --json                               Print the derived view as JSON");
    println!("  list [month|year|all] [--date D]       List transactions in range");
    println!("  add <income|expense> <date> <category> <amount> <description>");
    println!("                                         Add a transaction");
    println!("  delete <id>                            Delete a transaction");
    println!("  budget <category> <limit>              Set a monthly budget limit");
    println!("  budgets                                List budgets");
    println!("  export [path] [--range R] [--date D]   Export transactions in range to CSV");
    println!("  --help, -h                             Show this help");
    println!("  --version, -V                          Show version");
    println!();
    println!("Environment:");
    println!("  BUDGETVIEW_DB                          Database path override");
    println!("  RUST_LOG                               Log level (default: warn)");
}

/// Range and reference date picked out of CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Query {
    pub(crate) range: TimeRange,
    pub(crate) date: NaiveDate,
    pub(crate) json: bool,
    /// Arguments that are neither flags nor flag values.
    pub(crate) positional: Vec<String>,
}

/// Pick flags out of `args`. With `range_words`, a bare `month`/`year`/`all`
/// selects the range; otherwise every bare word stays positional and only
/// `--range` sets it.
pub(crate) fn parse_query(args: &[String], today: NaiveDate, range_words: bool) -> Result<Query> {
    let mut range = None;
    let mut date = today;
    let mut json = false;
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--date" => {
                let value = iter.next().context("--date needs a value (YYYY-MM-DD)")?;
                date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date: {value}"))?;
            }
            "--range" => {
                let value = iter.next().context("--range needs a value")?;
                range = Some(parse_range(value)?);
            }
            other if range_words && range.is_none() && TimeRange::parse(other).is_some() => {
                range = TimeRange::parse(other);
            }
            other => positional.push(other.to_string()),
        }
    }

    Ok(Query {
        range: range.unwrap_or_default(),
        date,
        json,
        positional,
    })
}

fn parse_range(value: &str) -> Result<TimeRange> {
    TimeRange::parse(value).with_context(|| {
        let names: Vec<&str> = TimeRange::all().iter().map(|r| r.as_str()).collect();
        format!("Unknown range '{value}'. Use one of: {}", names.join(", "))
    })
}

fn load_view(db: &Database, query: &Query) -> Result<View> {
    let transactions = db.load_transactions()?;
    let budgets = db.load_budgets()?;
    Ok(engine::derive_view(
        &transactions,
        &budgets,
        query.range,
        query.date,
    ))
}

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let query = parse_query(args, Local::now().date_naive(), true)?;
    let view = load_view(db, &query)?;

    if query.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("budgetview - {}", query.range.label(query.date));
    println!("{}", "─".repeat(48));
    println!("  Income:     {:>14}", format_amount(view.totals.income));
    println!("  Expenses:   {:>14}", format_amount(view.totals.expenses));
    println!("  Net:        {:>14}", format_signed(view.totals.net));
    println!("  Txns:       {:>14}", view.filtered.len());

    if !view.breakdown.is_empty() {
        println!();
        println!("{:<18} {:>12} {:>12} {:>12}", "Category", "Spent", "Limit", "Remaining");
        for row in &view.breakdown {
            let marker = if row.is_over() { " !" } else { "" };
            println!(
                "{:<18} {:>12} {:>12} {:>12}{marker}",
                row.category,
                format_amount(row.spent),
                format_amount(row.limit),
                format_amount(row.remaining),
            );
        }
    }

    Ok(())
}

fn cli_list(args: &[String], db: &mut Database) -> Result<()> {
    let query = parse_query(args, Local::now().date_naive(), true)?;
    let view = load_view(db, &query)?;

    if view.filtered.is_empty() {
        println!("No transactions in {}", query.range.label(query.date));
        return Ok(());
    }

    println!(
        "{:<5} {:<10}  {:<30} {:<16} {:>12}",
        "ID", "Date", "Description", "Category", "Amount"
    );
    println!("{}", "─".repeat(77));
    for txn in &view.filtered {
        println!(
            "{:<5} {:<10}  {:<30} {:<16} {:>12}",
            txn.id,
            txn.date,
            crate::ui::util::truncate(&txn.description, 30),
            crate::ui::util::truncate(&txn.category, 16),
            format_signed(txn.amount),
        );
    }
    Ok(())
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    const USAGE: &str =
        "Usage: budgetview add <income|expense> <YYYY-MM-DD> <category> <amount> <description>";
    if args.len() < 5 {
        anyhow::bail!(USAGE);
    }

    let kind = TransactionKind::parse(&args[0])
        .with_context(|| format!("Unknown type '{}'. {USAGE}", args[0]))?;
    let draft = TransactionDraft {
        date: args[1].clone(),
        category: args[2].clone(),
        amount: args[3].clone(),
        description: args[4..].join(" "),
        kind,
    };

    let current = db.load_transactions()?;
    let next = ledger::add_transaction(&current, &draft)?;
    db.save_transactions(&next)?;

    if let Some(txn) = next.last() {
        println!(
            "Added #{}: {} {} {} ({})",
            txn.id,
            txn.date,
            txn.description,
            format_signed(txn.amount),
            txn.category
        );
    }
    Ok(())
}

fn cli_delete(args: &[String], db: &mut Database) -> Result<()> {
    let raw = args.first().context("Usage: budgetview delete <id>")?;
    let id: i64 = raw
        .parse()
        .with_context(|| format!("Invalid transaction id: {raw}"))?;

    let current = db.load_transactions()?;
    let next = ledger::delete_transaction(&current, id);
    if next.len() == current.len() {
        println!("No transaction with id {id}");
        return Ok(());
    }
    db.save_transactions(&next)?;
    println!("Deleted transaction #{id}");
    Ok(())
}

fn cli_budget(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: budgetview budget <category> <limit>");
    }
    let (limit, category) = match args.split_last() {
        Some((limit, rest)) => (limit.as_str(), rest.join(" ")),
        None => anyhow::bail!("Usage: budgetview budget <category> <limit>"),
    };

    let current = db.load_budgets()?;
    if Budget::find_by_category(&current, &category).is_none() {
        let names: Vec<&str> = current.iter().map(|b| b.category.as_str()).collect();
        anyhow::bail!(
            "No budget named '{category}'. Available: {}",
            names.join(", ")
        );
    }

    let next = ledger::update_budget_limit(&current, &category, limit)?;
    db.save_budgets(&next)?;
    if let Some(updated) = Budget::find_by_category(&next, &category) {
        println!("Budget set: {category} = {}", format_amount(updated.limit));
    }
    Ok(())
}

fn cli_budgets(db: &mut Database) -> Result<()> {
    let budgets = db.load_budgets()?;
    if budgets.is_empty() {
        println!("No budgets");
        return Ok(());
    }

    println!("{:<20} {:>12}", "Category", "Limit");
    println!("{}", "─".repeat(33));
    for budget in &budgets {
        println!("{:<20} {:>12}", budget.category, format_amount(budget.limit));
    }
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let query = parse_query(args, Local::now().date_naive(), false)?;
    let label = query.range.label(query.date).replace(' ', "-");

    // Output path is the first non-flag argument
    let output_path = query
        .positional
        .first()
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/budgetview-export-{label}.csv")
        });

    let view = load_view(db, &query)?;
    let count = crate::export::export_to_csv(Path::new(&output_path), &view.filtered)?;
    if count == 0 {
        println!("No transactions in {label}; wrote header only to {output_path}");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

#[cfg(test)]
mod tests;
