use anyhow::{bail, Context, Result};
use clap::Parser;
use navsplice_core::{config, Config, Mode};
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Debug, Parser)]
#[command(name = "navsplice", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    update: UpdateArgs,

    /// Path to the homepage (default: index.html)
    #[arg(long, global = true)]
    index: Option<PathBuf>,

    /// Directory containing one subdirectory per project (default: projects)
    #[arg(long, global = true)]
    projects: Option<PathBuf>,

    /// Abort on invalid project metadata instead of skipping it
    #[arg(long, global = true)]
    strict: bool,

    /// Derive a missing project name or url from the directory name
    #[arg(long, global = true)]
    derive_missing: bool,

    /// Config file (default: ~/.config/navsplice/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, Default, clap::Args)]
struct UpdateArgs {
    /// Print the updated homepage instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// With --dry-run, print only the generated navigation markup
    #[arg(long, requires = "dry_run")]
    markup_only: bool,
}

impl UpdateArgs {
    fn mode(self) -> Mode {
        if self.markup_only {
            Mode::MarkupOnly
        } else if self.dry_run {
            Mode::DryRun
        } else {
            Mode::Write
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Rewrite the homepage navigation (the default when no command is given)
    ///
    /// Scans the projects directory for subdirectories holding a
    /// project.json file with at least "name" and "url", renders them as a
    /// list sorted by name, and replaces everything between the
    /// <!-- PROJECT_NAV_START --> and <!-- PROJECT_NAV_END --> markers of
    /// the homepage. The file is replaced atomically and only when its
    /// content changes.
    ///
    /// Projects without metadata are left out. Projects with malformed
    /// metadata are left out with a warning, or abort the run with --strict.
    Update(UpdateArgs),
    /// List discovered projects and the directories that were skipped
    List,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults if it does not exist
    Init,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let path = self.config.clone().unwrap_or_else(config::config_file_path);
        let mut config = Config::load_from(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        if let Some(index) = &self.index {
            config.index_path.clone_from(index);
        }
        if let Some(projects) = &self.projects {
            config.projects_dir.clone_from(projects);
        }
        config.strict |= self.strict;
        config.derive_missing |= self.derive_missing;
        Ok(config)
    }

    /// The update mode, or `None` for commands that do not update.
    fn mode(&self) -> Result<Option<Mode>> {
        match &self.command {
            None => Ok(Some(self.update.mode())),
            Some(Commands::Update(args)) => Ok(Some(
                UpdateArgs {
                    dry_run: args.dry_run || self.update.dry_run,
                    markup_only: args.markup_only || self.update.markup_only,
                }
                .mode(),
            )),
            Some(_) if self.update.dry_run => {
                bail!("--dry-run only applies to the update command")
            }
            Some(_) => Ok(None),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.mode()?;
    let config = cli.load_config()?;

    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        None | Some(Commands::Update(_)) => {
            commands::run_update(&config, mode.unwrap_or(Mode::Write))?;
        }
        Some(Commands::List) => commands::list_projects(&config)?,
        Some(Commands::Config { action }) => match action {
            None | Some(ConfigAction::Show) => {
                commands::config::show_config(&config, cli.config.as_deref())?;
            }
            Some(ConfigAction::Path) => commands::config::show_path(cli.config.as_deref()),
            Some(ConfigAction::Example) => commands::config::show_example(),
            Some(ConfigAction::Init) => commands::config::init_config()?,
        },
    }

    Ok(())
}
