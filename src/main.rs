mod config;
mod insights;
mod ledger;
mod logging;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};
use std::path::PathBuf;

use config::AppConfig;
use logging::LogTarget;

/// Global options, split from the subcommand and its arguments.
struct Options {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    command: Vec<String>,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_options(args) {
        Ok(options) => options,
        Err(e) => {
            run::print_usage();
            return Err(e);
        }
    };

    let interactive = options.command.is_empty();
    let target = match (&options.log_file, interactive) {
        (_, false) => LogTarget::Stderr,
        (Some(path), true) => LogTarget::File(path),
        (None, true) => LogTarget::Off,
    };
    logging::init(target)?;

    let config = AppConfig::load(options.config.as_deref())?;
    let ledger = config.build_ledger().context("Invalid starting budgets")?;

    if interactive {
        run::as_tui(ledger)
    } else {
        run::as_cli(&options.command, ledger)
    }
}

fn parse_options(args: Vec<String>) -> Result<Options> {
    let mut options = Options {
        config: None,
        log_file: None,
        command: Vec::new(),
    };

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" if options.command.is_empty() => {
                let path = args.next().context("--config needs a path")?;
                options.config = Some(PathBuf::from(path));
            }
            "--log-file" if options.command.is_empty() => {
                let path = args.next().context("--log-file needs a path")?;
                options.log_file = Some(PathBuf::from(path));
            }
            _ => options.command.push(arg),
        }
    }
    Ok(options)
}
