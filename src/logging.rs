//! Diagnostic logging setup.
//!
//! Diagnostics use `tracing`; the filter comes from `RUST_LOG` and defaults
//! to `warn`. The full-screen UI owns the terminal, so there diagnostics go
//! to a file or nowhere.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub enum DiagnosticsTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global
/// subscriber has already been set.
pub fn init_tracing(target: DiagnosticsTarget<'_>) -> Result<(), Box<dyn std::error::Error>> {
    match target {
        DiagnosticsTarget::Off => Ok(()),
        DiagnosticsTarget::Stderr => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt_layer)
                .try_init()?;
            Ok(())
        }
        DiagnosticsTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt_layer)
                .try_init()?;
            Ok(())
        }
    }
}
