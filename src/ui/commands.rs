use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{Local, NaiveDate};

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::ledger::{self, TransactionDraft};
use crate::models::{TimeRange, TransactionKind};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "range",
        "Set time range (e.g. :range month|year|all)",
        cmd_range,
        r
    );
    register_command!(
        "date",
        "Set reference date (e.g. :date 2024-06-15)",
        cmd_date,
        r
    );
    register_command!("today", "Reset reference date to today", cmd_today, r);
    register_command!("next-month", "Move reference date forward a month", cmd_next_month, r);
    register_command!("prev-month", "Move reference date back a month", cmd_prev_month, r);
    register_command!(
        "add-txn",
        "Add transaction (e.g. :add-txn expense 2024-06-01 Food 42.50 Groceries)",
        cmd_add_txn,
        r
    );
    register_command!(
        "a",
        "Add transaction (e.g. :a income Other 2000 Salary)",
        cmd_add_txn,
        r
    );
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!(
        "budget",
        "Set monthly limit (e.g. :budget Food 650)",
        cmd_budget,
        r
    );
    register_command!(
        "export",
        "Export shown transactions to CSV (e.g. :export ~/june.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        log::debug!("command :{cmd_name} {args}");
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split `:add-txn` arguments into a draft.
///
/// Layout: `<income|expense> [YYYY-MM-DD] <category> <amount> <description...>`.
/// The date is optional and defaults to `today`.
pub(crate) fn parse_add_args(args: &str, today: NaiveDate) -> Result<TransactionDraft, String> {
    const USAGE: &str =
        "Usage: :add-txn <income|expense> [YYYY-MM-DD] <category> <amount> <description>";

    let mut tokens = args.split_whitespace().peekable();
    let kind = tokens
        .next()
        .and_then(TransactionKind::parse)
        .ok_or_else(|| USAGE.to_string())?;

    let date = match tokens.peek() {
        Some(tok) if looks_like_date(tok) => tokens.next().unwrap_or_default().to_string(),
        _ => today.format("%Y-%m-%d").to_string(),
    };

    let category = tokens.next().ok_or_else(|| USAGE.to_string())?;
    let amount = tokens.next().ok_or_else(|| USAGE.to_string())?;
    let description = tokens.collect::<Vec<_>>().join(" ");

    Ok(TransactionDraft {
        date,
        description,
        amount: amount.to_string(),
        category: category.to_string(),
        kind,
    })
}

fn looks_like_date(token: &str) -> bool {
    token.len() >= 8 && token.chars().next().is_some_and(|c| c.is_ascii_digit()) && token.contains('-')
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_range(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        let next = app.range.next();
        app.set_range(next);
    } else if let Some(range) = TimeRange::parse(args) {
        app.set_range(range);
    } else {
        app.set_status(format!("Unknown range '{args}'. Use month, year or all"));
        return Ok(());
    }
    app.set_status(format!("Showing {}", app.period_label()));
    Ok(())
}

fn cmd_date(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    match NaiveDate::parse_from_str(args, "%Y-%m-%d") {
        Ok(date) => {
            app.set_reference_date(date);
            app.set_status(format!("Reference date: {date}"));
        }
        Err(_) => app.set_status("Invalid date. Use YYYY-MM-DD (e.g. 2024-06-15)"),
    }
    Ok(())
}

fn cmd_today(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    app.set_reference_date(today);
    app.set_status(format!("Reference date: {today}"));
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.shift_month(1);
    app.set_status(format!("Showing {}", app.period_label()));
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.shift_month(-1);
    app.set_status(format!("Showing {}", app.period_label()));
    Ok(())
}

fn cmd_add_txn(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let draft = match parse_add_args(args, Local::now().date_naive()) {
        Ok(d) => d,
        Err(usage) => {
            app.set_status(usage);
            return Ok(());
        }
    };

    match ledger::add_transaction(&app.transactions, &draft) {
        Ok(next) => {
            let added = next.last().cloned();
            app.replace_transactions(db, next)?;
            if let Some(txn) = added {
                app.set_status(format!(
                    "Added #{}: {} {} ({})",
                    txn.id,
                    txn.description,
                    super::util::format_signed(txn.amount),
                    txn.category
                ));
            }
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.view.filtered.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }

    if let Some(txn) = app.selected_transaction() {
        let id = txn.id;
        let description = txn.description.clone();
        app.confirm_message = format!("Delete '{description}'?");
        app.pending_action = Some(PendingAction::DeleteTransaction { id, description });
        app.input_mode = InputMode::Confirm;
    }

    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    // Last token is the limit, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :budget <category> <limit>. Example: :budget Food 650");
        return Ok(());
    }
    let (limit, category) = (parts[0], parts[1].trim());

    if crate::models::Budget::find_by_category(&app.budgets, category).is_none() {
        let names: Vec<&str> = app.budgets.iter().map(|b| b.category.as_str()).collect();
        app.set_status(format!(
            "No budget named '{category}'. Available: {}",
            names.join(", ")
        ));
        return Ok(());
    }

    match ledger::update_budget_limit(&app.budgets, category, limit) {
        Ok(next) => {
            app.replace_budgets(db, next)?;
            app.screen = Screen::Budgets;
            app.set_status(format!("Budget set: {category} = ${limit}"));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/budgetview-export-{}.csv", app.period_label().replace(' ', "-"))
    } else {
        crate::run::shellexpand(args)
    };

    match crate::export::export_to_csv(std::path::Path::new(&path), &app.view.filtered) {
        Ok(0) => app.set_status(format!(
            "No transactions in {}; wrote header only to {path}",
            app.period_label()
        )),
        Ok(count) => app.set_status(format!("Exported {count} transactions to {path}")),
        Err(e) => {
            log::warn!("export to {path} failed: {e:#}");
            app.set_status(format!("Export failed: {e:#}"));
        }
    }
    Ok(())
}
