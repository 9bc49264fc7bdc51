pub mod project;

pub use project::{sort_entries, ProjectEntry, ProjectMetadata};
