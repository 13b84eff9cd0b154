use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{Datelike, Months, NaiveDate};

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::format_amount;
use crate::models::{
    parse_amount, parse_date, Category, TransactionDraft, TransactionId, TransactionInput,
};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
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

    register_command!("q", "Quit BudgetDash", cmd_quit, r);
    register_command!("quit", "Quit BudgetDash", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("i", "Go to Insights", cmd_insights, r);
    register_command!("insights", "Go to Insights", cmd_insights, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "add-txn",
        "Add transaction (e.g. :add-txn 2024-01-15 12.50 Food Lunch)",
        cmd_add_txn,
        r
    );
    register_command!(
        "a",
        "Add transaction (e.g. :a 2024-01-15 12.50 Food Lunch)",
        cmd_add_txn,
        r
    );
    register_command!(
        "budget",
        "Set budget, 0 clears (e.g. :budget Food 500)",
        cmd_budget,
        r
    );
    register_command!(
        "select",
        "Select transaction by id (e.g. :select 3)",
        cmd_select,
        r
    );
    register_command!("rename", "Change description of selected transaction", cmd_rename, r);
    register_command!("recat", "Change category of selected transaction", cmd_recat, r);
    register_command!("amount", "Change amount of selected transaction", cmd_amount, r);
    register_command!("redate", "Change date of selected transaction", cmd_redate, r);
    register_command!(
        "delete-txn",
        "Delete selected transaction, or by id (e.g. :delete-txn 3)",
        cmd_delete_txn,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.fail(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
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

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_insights(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Insights;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.reference_date = chrono::Local::now().date_naive();
        app.set_status(format!("Month: {}", app.reference_date.format("%Y-%m")));
        return Ok(());
    }

    // Accept "2024-01", "2024-1", "01", "1"
    let month = if args.len() <= 2 {
        format!("{}-{args:0>2}", app.reference_date.year())
    } else {
        args.to_string()
    };

    match NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d") {
        Ok(date) => {
            app.reference_date = date;
            app.set_status(format!("Switched to month: {}", date.format("%Y-%m")));
        }
        Err(_) => app.fail("Invalid month format. Use YYYY-MM (e.g. 2024-01)"),
    }

    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    advance_month(app, 1);
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    advance_month(app, -1);
    Ok(())
}

fn advance_month(app: &mut App, delta: i32) {
    let moved = if delta > 0 {
        app.reference_date.checked_add_months(Months::new(1))
    } else {
        app.reference_date.checked_sub_months(Months::new(1))
    };
    if let Some(date) = moved {
        app.reference_date = date;
        app.set_status(format!("Month: {}", date.format("%Y-%m")));
    }
}

fn cmd_add_txn(args: &str, app: &mut App) -> anyhow::Result<()> {
    const USAGE: &str = "Usage: :add-txn <date> <amount> <category> <description>";

    let mut tokens = args.split_whitespace();
    let (Some(date), Some(amount)) = (tokens.next(), tokens.next()) else {
        app.fail(USAGE);
        return Ok(());
    };
    let rest = tokens.collect::<Vec<_>>().join(" ");
    if rest.is_empty() {
        app.fail(USAGE);
        return Ok(());
    }

    let Some((category, description)) = Category::split_leading(app.ledger.categories(), &rest)
    else {
        app.fail(format!("Unknown category in '{rest}'. {USAGE}"));
        return Ok(());
    };

    let input = TransactionInput {
        amount: amount.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        category: category.name.clone(),
    };
    let draft = match input.parse() {
        Ok(draft) => draft,
        Err(e) => {
            app.report(&e);
            return Ok(());
        }
    };

    match app.ledger.add_transaction(draft) {
        Ok(txn) => {
            let msg = format!(
                "Added {}: {} {} ({})",
                txn.id,
                txn.description,
                format_amount(txn.amount),
                txn.category
            );
            let id = txn.id;
            app.set_status(msg);
            app.select_transaction(id);
        }
        Err(e) => app.report(&e),
    }
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App) -> anyhow::Result<()> {
    // Last token is the amount, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.fail("Usage: :budget <category_name> <amount>. Example: :budget Food 500");
        return Ok(());
    }

    let amount_str = parts[0];
    let category_name = parts[1];

    let amount = match amount_str.parse::<rust_decimal::Decimal>() {
        Ok(a) => a,
        Err(_) => {
            app.fail(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };

    match app.ledger.set_budget(category_name, amount) {
        Ok(budget) => {
            let msg = if budget.is_set() {
                format!("Budget set: {} = {}", budget.category, format_amount(budget.amount))
            } else {
                format!("Budget cleared: {}", budget.category)
            };
            app.set_status(msg);
        }
        Err(e) => app.report(&e),
    }
    Ok(())
}

fn cmd_select(args: &str, app: &mut App) -> anyhow::Result<()> {
    let id = match args.trim_start_matches('#').parse::<u64>() {
        Ok(n) => TransactionId(n),
        Err(_) => {
            app.fail("Usage: :select <id>");
            return Ok(());
        }
    };
    if app.select_transaction(id) {
        app.screen = Screen::Transactions;
        app.set_status(format!("Selected {id}"));
    } else {
        app.fail(format!("Transaction {id} not found"));
    }
    Ok(())
}

fn cmd_rename(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        // Enter editing mode for inline rename
        if let Some(txn) = app.selected_transaction() {
            app.command_input = txn.description.clone();
            app.input_mode = InputMode::Editing;
            app.set_status("Type new description, press Enter to confirm");
        } else {
            app.fail("No transaction selected");
        }
        return Ok(());
    }

    edit_selected(app, |draft| {
        draft.description = args.to_string();
        Ok(())
    });
    Ok(())
}

fn cmd_recat(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.fail("Usage: :recat <category_name>");
        return Ok(());
    }
    edit_selected(app, |draft| {
        draft.category = args.to_string();
        Ok(())
    });
    Ok(())
}

fn cmd_amount(args: &str, app: &mut App) -> anyhow::Result<()> {
    edit_selected(app, |draft| {
        draft.amount = parse_amount(args)?;
        Ok(())
    });
    Ok(())
}

fn cmd_redate(args: &str, app: &mut App) -> anyhow::Result<()> {
    edit_selected(app, |draft| {
        draft.date = parse_date(args)?;
        Ok(())
    });
    Ok(())
}

/// Apply `change` to the selected transaction's fields and save the result.
fn edit_selected(
    app: &mut App,
    change: impl FnOnce(&mut TransactionDraft) -> crate::ledger::Result<()>,
) {
    let Some(txn) = app.selected_transaction() else {
        app.fail("No transaction selected. Go to Transactions and pick one first");
        return;
    };
    let id = txn.id;
    let mut draft = txn.to_draft();

    if let Err(e) = change(&mut draft) {
        app.report(&e);
        return;
    }

    match app.ledger.edit_transaction(id, draft) {
        Ok(txn) => {
            let msg = format!(
                "Updated {}: {} {} ({}, {})",
                txn.id,
                txn.description,
                format_amount(txn.amount),
                txn.category,
                txn.date
            );
            app.set_status(msg);
            // The date may have moved it in the recent-first order.
            app.select_transaction(id);
        }
        Err(e) => app.report(&e),
    }
}

fn cmd_delete_txn(args: &str, app: &mut App) -> anyhow::Result<()> {
    if !args.is_empty() {
        let Ok(n) = args.trim_start_matches('#').parse::<u64>() else {
            app.fail("Usage: :delete-txn [id]");
            return Ok(());
        };
        let id = TransactionId(n);
        if app.ledger.get(id).is_none() {
            app.fail(format!("Transaction {id} not found"));
            return Ok(());
        }
        app.select_transaction(id);
    }

    let Some(txn) = app.selected_transaction() else {
        app.fail("No transaction selected. Go to Transactions and pick one first");
        return Ok(());
    };

    let id = txn.id;
    let description = txn.description.clone();
    app.confirm_message = format!("Delete '{description}'?");
    app.pending_action = Some(PendingAction::DeleteTransaction { id, description });
    app.input_mode = InputMode::Confirm;
    Ok(())
}
