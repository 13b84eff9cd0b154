use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Where log lines go for this session.
pub(crate) enum LogTarget<'a> {
    /// Batch mode: stderr is free.
    Stderr,
    /// Interactive mode: the terminal is owned by the UI, so only log to a file.
    File(&'a Path),
    Off,
}

/// Install the global subscriber. `RUST_LOG` overrides the default `warn` level.
pub(crate) fn init(target: LogTarget<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .compact()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("Failed to install log subscriber")?;
        }
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
                .context("Failed to install log subscriber")?;
        }
        LogTarget::Off => {}
    }
    Ok(())
}
