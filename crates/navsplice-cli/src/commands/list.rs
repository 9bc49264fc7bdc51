use anyhow::{Context, Result};
use navsplice_core::{discover, Config};

/// Show what discovery finds, without touching the homepage.
pub fn list_projects(config: &Config) -> Result<()> {
    let discovery = discover(&config.projects_dir, &config.discover_options())
        .with_context(|| format!("Failed to scan {}", config.projects_dir.display()))?;

    println!("\n📂 Projects in {}\n", config.projects_dir.display());

    if discovery.entries.is_empty() {
        println!("  (none)");
    }
    for entry in &discovery.entries {
        println!("  {:<20} {:<30} {}", entry.slug, entry.name, entry.url);
    }

    if !discovery.skipped.is_empty() {
        println!("\n  Skipped:");
        for skipped in &discovery.skipped {
            println!("  {:<20} {}", skipped.slug, skipped.reason);
        }
    }

    Ok(())
}
