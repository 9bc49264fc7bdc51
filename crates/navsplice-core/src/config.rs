use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use confyg::{env, Confygery};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::discover::{DiscoverOptions, METADATA_FILE};
use crate::splice::Markers;
use crate::update::UpdateOptions;

/// Configuration for navsplice.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (NAVSPLICE_* prefix)
/// 3. Config file (~/.config/navsplice/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Homepage document containing the navigation markers.
    ///
    /// Can be set via:
    /// - CLI: --index site/index.html
    /// - ENV: NAVSPLICE_INDEX_PATH
    /// - Config: index_path = "site/index.html"
    pub index_path: PathBuf,

    /// Directory whose subdirectories are the projects.
    pub projects_dir: PathBuf,

    /// Metadata file name looked up in each project directory.
    pub metadata_file: String,

    /// Fail on the first invalid metadata file instead of skipping it.
    #[serde(deserialize_with = "flag")]
    pub strict: bool,

    /// Derive a missing project name or url from the directory name.
    #[serde(deserialize_with = "flag")]
    pub derive_missing: bool,

    pub markers: Markers,

    pub logging: LoggingConfig,
}

/// Logger settings, applied by the CLI at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    #[serde(deserialize_with = "flag")]
    pub coloured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("warn"),
            coloured: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("index.html"),
            projects_dir: PathBuf::from("projects"),
            metadata_file: METADATA_FILE.to_string(),
            strict: false,
            derive_missing: false,
            markers: Markers::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file and environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `config_path` (if it exists) and environment
    /// variables with the NAVSPLICE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .with_context(|| format!("Failed to load config file {}", config_path.display()))?;
        }

        let env_opts = env::Options::with_top_level("navsplice");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let mut config: Self = builder.build().context("Failed to build configuration")?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `NAVSPLICE_*` overrides that the flat env layer cannot express:
    /// nested table keys and boolean flags.
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean variable holds something other than
    /// true/false, yes/no, on/off, or 1/0.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bool_var = |key: &str| -> Result<Option<bool>> {
            match lookup(key) {
                None => Ok(None),
                Some(value) => match parse_flag(&value) {
                    Some(flag) => Ok(Some(flag)),
                    None => bail!("Invalid boolean in {}: {:?}", key, value),
                },
            }
        };

        if let Some(strict) = bool_var("NAVSPLICE_STRICT")? {
            self.strict = strict;
        }
        if let Some(derive) = bool_var("NAVSPLICE_DERIVE_MISSING")? {
            self.derive_missing = derive;
        }
        if let Some(coloured) = bool_var("NAVSPLICE_LOGGING_COLOURED")? {
            self.logging.coloured = coloured;
        }
        if let Some(level) = lookup("NAVSPLICE_LOGGING_LEVEL") {
            self.logging.level = level;
        }
        if let Some(start) = lookup("NAVSPLICE_MARKERS_START") {
            self.markers.start = start;
        }
        if let Some(end) = lookup("NAVSPLICE_MARKERS_END") {
            self.markers.end = end;
        }
        Ok(())
    }

    /// Options for an update run driven by this configuration.
    pub fn update_options(&self) -> UpdateOptions {
        UpdateOptions {
            index_path: self.index_path.clone(),
            projects_dir: self.projects_dir.clone(),
            discover: self.discover_options(),
            markers: self.markers.clone(),
        }
    }

    pub fn discover_options(&self) -> DiscoverOptions {
        DiscoverOptions {
            metadata_file: self.metadata_file.clone(),
            strict: self.strict,
            derive_missing: self.derive_missing,
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Booleans as TOML bools or, from the environment layer, as strings.
fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => parse_flag(&text)
            .ok_or_else(|| de::Error::custom(format!("expected a boolean, found {text:?}"))),
    }
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/navsplice/config.toml
/// - macOS: ~/Library/Application Support/navsplice/config.toml
/// - Windows: %APPDATA%\navsplice\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("navsplice")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Navsplice Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (NAVSPLICE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Homepage document whose navigation region is rewritten
# CLI: --index, Environment: NAVSPLICE_INDEX_PATH
index_path = "index.html"

# Directory holding one subdirectory per project
# CLI: --projects, Environment: NAVSPLICE_PROJECTS_DIR
projects_dir = "projects"

# Metadata file read from each project directory
metadata_file = "project.json"

# Abort on invalid project metadata instead of skipping it with a warning
# Environment: NAVSPLICE_STRICT (true/false, yes/no, on/off, 1/0)
strict = false

# Fill a missing name or url from the project directory name
derive_missing = false

# Environment: NAVSPLICE_MARKERS_START / NAVSPLICE_MARKERS_END
[markers]
start = "<!-- PROJECT_NAV_START -->"
end = "<!-- PROJECT_NAV_END -->"

# Environment: NAVSPLICE_LOGGING_LEVEL / NAVSPLICE_LOGGING_COLOURED
[logging]
# error, warn, info, debug, trace
level = "warn"
coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
