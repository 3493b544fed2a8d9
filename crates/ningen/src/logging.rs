//! Tracing subscriber initialisation.
//!
//! Only build descriptions (the process edge) call [`init_logging`];
//! `ningen-core` only *emits* spans and events and never touches
//! subscribers.
//!
//! # Verbosity mapping
//!
//! | `verbose` | `quiet` | Filter level |
//! |-----------|---------|--------------|
//! | 0         | false   | WARN         |
//! | 1         | false   | INFO         |
//! | 2         | false   | DEBUG        |
//! | 3+        | false   | TRACE        |
//! | any       | true    | ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise the global tracing subscriber.
///
/// Returns an error if a subscriber is already registered in this process.
pub fn init_logging(verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let level = derive_level(verbose, quiet);

    // RUST_LOG wins; otherwise every ningen crate gets the same level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ningen={level},ningen_core={level},ningen_adapters={level}"
        ))
    });

    let use_ansi = std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Translate the verbosity counter and quiet flag to a level string.
fn derive_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
