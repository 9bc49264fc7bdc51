//! Logger setup.
//!
//! Logs go to stderr so that `--dry-run` output on stdout stays clean.

use anyhow::{anyhow, bail, Result};
use navsplice_core::config::LoggingConfig;

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Install twyg as the `log` backend.
pub fn init(logging: &LoggingConfig, verbose: u8) -> Result<()> {
    let opts = twyg::OptsBuilder::new()
        .coloured(logging.coloured)
        .level(resolve_level(&logging.level, verbose)?)
        .output(twyg::Output::Stderr)
        .build()
        .map_err(|e| anyhow!("Invalid logger options: {e:?}"))?;

    twyg::setup(opts).map_err(|e| anyhow!("Failed to set up logging: {e:?}"))?;
    Ok(())
}

/// The configured level raised by one step per `-v`, capped at trace.
fn resolve_level(name: &str, verbose: u8) -> Result<twyg::LogLevel> {
    let Some(base) = LEVELS.iter().position(|l| l.eq_ignore_ascii_case(name.trim())) else {
        bail!(
            "Unknown log level: {}\n\nValid levels: {}",
            name,
            LEVELS.join(", ")
        );
    };

    Ok(match (base + usize::from(verbose)).min(LEVELS.len() - 1) {
        0 => twyg::LogLevel::Error,
        1 => twyg::LogLevel::Warn,
        2 => twyg::LogLevel::Info,
        3 => twyg::LogLevel::Debug,
        _ => twyg::LogLevel::Trace,
    })
}
