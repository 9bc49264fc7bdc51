//! Core of navsplice.
//!
//! Discovers project metadata under a projects root, renders it as an HTML
//! navigation list, and splices that list into the marker region of a
//! homepage document.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod discover;
pub mod error;
pub mod model;
pub mod render;
pub mod splice;
pub mod update;

pub use config::Config;
pub use discover::{discover, DiscoverOptions, Discovery, SkipReason, Skipped};
pub use error::{Error, Result};
pub use model::{ProjectEntry, ProjectMetadata};
pub use render::render;
pub use splice::{splice, Markers, END_MARKER, START_MARKER};
pub use update::{run, Mode, Outcome, UpdateOptions, UpdateStatus};
