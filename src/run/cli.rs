use anyhow::{Context, Result};
use std::io::{self, Read, Write};
use tracing::{debug, info};

use crate::ledger::Ledger;
use crate::ui::app::{App, InputMode};
use crate::ui::commands;
use crate::ui::util::{format_amount, format_percent};

pub(crate) fn as_cli(args: &[String], ledger: Ledger) -> Result<()> {
    match args[0].as_str() {
        "batch" | "summary" | "s" => cli_batch(&args[1..], ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetdash {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("BudgetDash - session-only personal finance dashboard");
    println!();
    println!("Usage: budgetdash [options] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  batch [FILE]                  Apply commands from FILE (or stdin) and print a report");
    println!("  summary [FILE]                Same as batch");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --config <path>               Category and starting budget config (JSON)");
    println!("  --log-file <path>             Write TUI logs to a file (RUST_LOG sets the level)");
}

fn cli_batch(args: &[String], ledger: Ledger) -> Result<()> {
    let input = match args.first().map(String::as_str) {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read commands from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read commands from {path}"))?,
    };

    let mut app = App::new(ledger, chrono::Local::now().date_naive());
    let failures = run_batch(&input, &mut app);

    let stderr = io::stderr();
    let mut err = stderr.lock();
    for failure in &failures {
        writeln!(err, "line {}: {}", failure.line, failure.message)?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&app, &mut out)?;
    Ok(())
}

/// A command that was rejected, with its 1-based input line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Failure {
    pub(crate) line: usize,
    pub(crate) message: String,
}

/// Apply every command in `input` to `app`. Rejected commands are collected
/// and processing continues; `quit` stops early.
pub(crate) fn run_batch(input: &str, app: &mut App) -> Vec<Failure> {
    let mut failures = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command = line.strip_prefix(':').unwrap_or(line);

        app.last_failure = None;
        app.alert = None;
        if let Err(e) = commands::handle_command(command, app) {
            app.last_failure = Some(format!("{e:#}"));
        }

        // No one is at the keyboard: deletions are confirmed and prompts
        // that wait for typed input are refused.
        match app.input_mode {
            InputMode::Confirm => app.confirm_pending(),
            InputMode::Editing => {
                app.input_mode = InputMode::Normal;
                app.command_input.clear();
                app.last_failure = Some("rename needs a description".into());
            }
            InputMode::Normal | InputMode::Command => {}
        }
        app.show_help = false;

        if let Some(message) = app.last_failure.take() {
            info!(line = index + 1, %message, "batch command rejected");
            failures.push(Failure {
                line: index + 1,
                message,
            });
        }

        if !app.running {
            debug!(line = index + 1, "batch stopped by quit");
            break;
        }
    }

    failures
}

/// Print the dashboard summary, breakdowns, budgets and insights.
pub(crate) fn write_report(app: &App, out: &mut impl Write) -> io::Result<()> {
    let snapshot = app.snapshot();
    let reference = app.reference_date;

    writeln!(out, "BudgetDash - {}", reference.format("%Y-%m"))?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(
        out,
        "  Total Expenses:      {}",
        format_amount(snapshot.total_expenses())
    )?;
    writeln!(
        out,
        "  This Month:          {}",
        format_amount(snapshot.current_month_expenses(reference))
    )?;
    writeln!(
        out,
        "  Average Transaction: {}",
        format_amount(snapshot.average_transaction())
    )?;
    writeln!(out, "  Transactions:        {}", app.ledger.len())?;

    let breakdown = snapshot.category_breakdown();
    if !breakdown.is_empty() {
        writeln!(out)?;
        writeln!(out, "Spending by Category:")?;
        for (name, amount) in &breakdown {
            writeln!(out, "  {name:<24} {}", format_amount(*amount))?;
        }
    }

    let series = snapshot.monthly_series();
    if !series.is_empty() {
        writeln!(out)?;
        writeln!(out, "Monthly Overview:")?;
        for bucket in &series {
            writeln!(
                out,
                "  {} {:<19} {}",
                bucket.label(),
                bucket.year,
                format_amount(bucket.total)
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Budgets:")?;
    for row in snapshot.budget_overview() {
        if row.has_budget() {
            let flag = if row.spent > row.budget { "  OVER" } else { "" };
            writeln!(
                out,
                "  {:<24} {} / {} ({}){flag}",
                row.category,
                format_amount(row.spent),
                format_amount(row.budget),
                format_percent(row.utilization)
            )?;
        } else {
            writeln!(out, "  {:<24} No budget set", row.category)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Insights:")?;
    let insights = snapshot.generate_insights(reference);
    if insights.is_empty() {
        writeln!(
            out,
            "  Not enough data to generate insights yet. Add more transactions!"
        )?;
    }
    for insight in &insights {
        writeln!(out, "  [{}] {}", insight.severity, insight.message)?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
