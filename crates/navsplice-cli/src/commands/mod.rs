pub mod config;
pub mod list;
pub mod update;

pub use list::list_projects;
pub use update::run_update;
