//! Project discovery.
//!
//! Lists the immediate subdirectories of a projects root and turns each
//! `project.json` found there into a [`ProjectEntry`].

use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::model::{sort_entries, ProjectEntry, ProjectMetadata};

/// Default name of the per-project metadata file.
pub const METADATA_FILE: &str = "project.json";

/// Knobs for [`discover`].
#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    /// File name looked up inside each project directory.
    pub metadata_file: String,
    /// Abort on the first invalid metadata file instead of skipping it.
    pub strict: bool,
    /// Fill a missing `name`/`url` from the slug instead of rejecting the entry.
    pub derive_missing: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            metadata_file: METADATA_FILE.to_string(),
            strict: false,
            derive_missing: false,
        }
    }
}

/// Why a project directory was left out of the navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoMetadata,
    Invalid(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMetadata => write!(f, "no metadata file"),
            Self::Invalid(reason) => write!(f, "{reason}"),
        }
    }
}

/// A project directory that did not produce an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub slug: String,
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of a discovery pass.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Valid entries in navigation order.
    pub entries: Vec<ProjectEntry>,
    /// Directories that were passed over, in directory-name order.
    pub skipped: Vec<Skipped>,
}

/// Discover all projects under `root`.
///
/// Invalid metadata is logged and skipped unless `options.strict` is set.
/// Entries that cannot be resolved, such as dangling or looping symlinks,
/// are always logged and skipped.
///
/// # Errors
///
/// Returns [`Error::Io`] if `root` itself is missing, not a directory, or
/// cannot be listed, and [`Error::InvalidMetadata`] in strict mode.
pub fn discover(root: &Path, options: &DiscoverOptions) -> Result<Discovery> {
    let meta = std::fs::metadata(root).map_err(|e| Error::io(root, e))?;
    if !meta.is_dir() {
        return Err(Error::io(root, std::io::Error::other("not a directory")));
    }

    let mut discovery = Discovery::default();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let path = e.path().unwrap_or(root).to_path_buf();
                return Err(Error::io(path, e.into()));
            }
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                let slug = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                log::warn!("Skipping {}: {}", path.display(), e);
                discovery.skipped.push(Skipped {
                    slug,
                    path,
                    reason: SkipReason::Invalid(e.to_string()),
                });
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let slug = entry.file_name().to_string_lossy().into_owned();
        let metadata_path = entry.path().join(&options.metadata_file);

        if !metadata_path.is_file() {
            log::debug!("Skipping {}: no {}", slug, options.metadata_file);
            discovery.skipped.push(Skipped {
                slug,
                path: metadata_path,
                reason: SkipReason::NoMetadata,
            });
            continue;
        }

        match load_entry(&slug, &metadata_path, root, options) {
            Ok(project) => {
                log::debug!("Discovered {} ({})", project.name, project.slug);
                discovery.entries.push(project);
            }
            Err(reason) => {
                if options.strict {
                    return Err(Error::InvalidMetadata {
                        path: metadata_path,
                        reason,
                    });
                }
                log::warn!(
                    "Skipping project {}: invalid metadata in {}: {}",
                    slug,
                    metadata_path.display(),
                    reason
                );
                discovery.skipped.push(Skipped {
                    slug,
                    path: metadata_path,
                    reason: SkipReason::Invalid(reason),
                });
            }
        }
    }

    sort_entries(&mut discovery.entries);
    log::info!(
        "Discovered {} project(s) under {}, skipped {}",
        discovery.entries.len(),
        root.display(),
        discovery.skipped.len()
    );
    Ok(discovery)
}

fn load_entry(
    slug: &str,
    metadata_path: &Path,
    root: &Path,
    options: &DiscoverOptions,
) -> std::result::Result<ProjectEntry, String> {
    let text = std::fs::read_to_string(metadata_path).map_err(|e| format!("unreadable: {e}"))?;
    let mut metadata = ProjectMetadata::from_json(&text).map_err(|e| format!("malformed JSON: {e}"))?;
    if options.derive_missing {
        metadata.derive_missing(slug, root);
    }
    metadata.into_entry(slug)
}
