//! The update run: discover, render, splice, then write or preview.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::discover::{discover, DiscoverOptions, Skipped};
use crate::error::{Error, Result};
use crate::render::render;
use crate::splice::{splice, Markers};

/// What [`run`] does with the spliced document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Replace the homepage file atomically.
    Write,
    /// Return the full spliced document without touching the file.
    DryRun,
    /// Return only the rendered navigation block. The homepage is not read.
    MarkupOnly,
}

/// Inputs of an update run.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub index_path: PathBuf,
    pub projects_dir: PathBuf,
    pub discover: DiscoverOptions,
    pub markers: Markers,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("index.html"),
            projects_dir: PathBuf::from("projects"),
            discover: DiscoverOptions::default(),
            markers: Markers::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// The homepage was rewritten.
    Written,
    /// The homepage already had the current navigation; nothing was written.
    Unchanged,
    /// Dry-run output.
    Preview(String),
}

/// Summary of an update run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: UpdateStatus,
    /// Number of projects listed in the navigation.
    pub listed: usize,
    pub skipped: Vec<Skipped>,
}

/// Discover projects, render them, and splice the result into the homepage.
///
/// The homepage is left untouched on any error.
///
/// # Errors
///
/// Discovery errors are returned as is. Marker problems come back wrapped
/// in [`Error::Homepage`], and read or write failures as [`Error::Io`].
pub fn run(options: &UpdateOptions, mode: Mode) -> Result<Outcome> {
    let discovery = discover(&options.projects_dir, &options.discover)?;
    let block = render(&discovery.entries);
    let listed = discovery.entries.len();
    let skipped = discovery.skipped;

    if mode == Mode::MarkupOnly {
        return Ok(Outcome {
            status: UpdateStatus::Preview(block),
            listed,
            skipped,
        });
    }

    let path = &options.index_path;
    let current = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let updated = splice(&current, &block, &options.markers).map_err(|e| Error::Homepage {
        path: path.clone(),
        source: Box::new(e),
    })?;

    let status = match mode {
        Mode::Write if updated == current => {
            log::info!("{} is already up to date", path.display());
            UpdateStatus::Unchanged
        }
        Mode::Write => {
            write_atomic(path, &updated)?;
            log::info!("Updated {} with {} project(s)", path.display(), listed);
            UpdateStatus::Written
        }
        Mode::DryRun | Mode::MarkupOnly => UpdateStatus::Preview(updated),
    };

    Ok(Outcome {
        status,
        listed,
        skipped,
    })
}

/// Replace `path` with `contents` via a temp file in the same directory.
///
/// A symlinked `path` is resolved first, so the link's target is replaced
/// and the link survives. The existing file's permissions carry over to the
/// new file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the temp file cannot be created, written, or
/// renamed over `path`.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".navsplice-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::io(dir, e))?;

    tmp.write_all(contents.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;

    if let Ok(existing) = std::fs::metadata(&target) {
        std::fs::set_permissions(tmp.path(), existing.permissions())
            .map_err(|e| Error::io(tmp.path(), e))?;
    }

    tmp.persist(&target).map_err(|e| Error::io(&target, e.error))?;
    Ok(())
}
