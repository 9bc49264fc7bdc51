use anyhow::{Context, Result};
use navsplice_core::{run, Config, Mode, UpdateStatus};

/// Run the homepage update and report the outcome.
pub fn run_update(config: &Config, mode: Mode) -> Result<()> {
    log::info!(
        "Updating {} from {}",
        config.index_path.display(),
        config.projects_dir.display()
    );

    let outcome = run(&config.update_options(), mode)
        .with_context(|| format!("Navigation update failed for {}", config.index_path.display()))?;

    match outcome.status {
        UpdateStatus::Preview(text) if mode == Mode::MarkupOnly => println!("{text}"),
        UpdateStatus::Preview(text) => print!("{text}"),
        UpdateStatus::Written => {
            println!(
                "✓ Updated {} with {} project(s)",
                config.index_path.display(),
                outcome.listed
            );
        }
        UpdateStatus::Unchanged => {
            println!("✓ {} is already up to date", config.index_path.display());
        }
    }

    if !outcome.skipped.is_empty() && mode == Mode::Write {
        println!(
            "  {} director{} skipped (run `navsplice list` for details)",
            outcome.skipped.len(),
            if outcome.skipped.len() == 1 { "y" } else { "ies" }
        );
    }

    Ok(())
}
