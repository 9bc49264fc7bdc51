use std::path::{Path, PathBuf};

use anyhow::Result;
use navsplice_core::{config, Config};

fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(config::config_file_path)
}

/// Show the current effective configuration.
pub fn show_config(config: &Config, explicit: Option<&Path>) -> Result<()> {
    let config_path = resolve_path(explicit);

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_path.display());
    let exists = config_path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    print!("{}", config.to_toml()?);

    println!("\nPriority: CLI args > ENV vars (NAVSPLICE_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path(explicit: Option<&Path>) {
    println!("{}", resolve_path(explicit).display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure navsplice.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
