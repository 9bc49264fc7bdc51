//! End-to-end tests for the discover → render → splice → write run.
//!
//! Each test builds a small site in a temp directory: an `index.html` with
//! navigation markers and a `projects/` tree of metadata files.

use std::fs;
use std::path::Path;

use navsplice_core::{run, Error, Mode, UpdateOptions, UpdateStatus, END_MARKER, START_MARKER};
use tempfile::TempDir;

fn homepage() -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n  <body>\n    <nav>\n      {START_MARKER}\n      <p>placeholder</p>\n      {END_MARKER}\n    </nav>\n  </body>\n</html>\n"
    )
}

fn write_project(root: &Path, slug: &str, json: &str) {
    let dir = root.join("projects").join(slug);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("project.json"), json).unwrap();
}

fn site(index: &str) -> (TempDir, UpdateOptions) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("projects")).unwrap();
    fs::write(root.join("index.html"), index).unwrap();
    write_project(
        root,
        "alpha",
        r#"{"name":"Alpha","url":"projects/alpha/index.html"}"#,
    );
    write_project(
        root,
        "beta",
        r#"{"name":"Beta","description":"B project","url":"projects/beta/index.html"}"#,
    );

    let options = UpdateOptions {
        index_path: root.join("index.html"),
        projects_dir: root.join("projects"),
        ..Default::default()
    };
    (temp_dir, options)
}

fn preview(status: UpdateStatus) -> String {
    match status {
        UpdateStatus::Preview(text) => text,
        other => panic!("expected a preview, got {other:?}"),
    }
}

#[test]
fn test_dry_run_lists_projects_in_order() {
    let (_temp_dir, options) = site(&homepage());

    let outcome = run(&options, Mode::DryRun).unwrap();
    assert_eq!(outcome.listed, 2);
    let text = preview(outcome.status);

    let alpha = text.find(">Alpha</a>").unwrap();
    let beta = text.find(">Beta</a>").unwrap();
    assert!(alpha < beta);
    assert_eq!(text.matches("<li>").count(), 2);
    assert_eq!(text.matches("<span class=\"description\">").count(), 1);
    assert!(text.contains("<span class=\"description\">B project</span>"));
    assert!(text.contains("<a href=\"projects/alpha/index.html\">Alpha</a>"));
    assert!(!text.contains("placeholder"));

    // Dry-run never touches the file.
    assert_eq!(fs::read_to_string(&options.index_path).unwrap(), homepage());
}

#[test]
fn test_write_is_idempotent() {
    let (_temp_dir, options) = site(&homepage());

    let first = run(&options, Mode::Write).unwrap();
    assert_eq!(first.status, UpdateStatus::Written);
    let after_first = fs::read(&options.index_path).unwrap();

    let second = run(&options, Mode::Write).unwrap();
    assert_eq!(second.status, UpdateStatus::Unchanged);
    let after_second = fs::read(&options.index_path).unwrap();

    assert_eq!(after_first, after_second);
}

#[test]
fn test_write_preserves_content_outside_markers() {
    let (_temp_dir, options) = site(&homepage());
    run(&options, Mode::Write).unwrap();

    let original = homepage();
    let written = fs::read_to_string(&options.index_path).unwrap();
    let head = &original[..original.find(START_MARKER).unwrap() + START_MARKER.len()];
    let tail = &original[original.find(END_MARKER).unwrap()..];
    assert!(written.starts_with(head));
    assert!(written.ends_with(tail));
    assert!(written.contains("\n      <ul class=\"classified-projects\">\n"));
}

#[test]
fn test_write_matches_dry_run() {
    let (_temp_dir, options) = site(&homepage());
    let expected = preview(run(&options, Mode::DryRun).unwrap().status);

    run(&options, Mode::Write).unwrap();
    assert_eq!(fs::read_to_string(&options.index_path).unwrap(), expected);
}

#[test]
fn test_missing_metadata_is_excluded() {
    let (temp_dir, options) = site(&homepage());
    fs::create_dir_all(temp_dir.path().join("projects").join("gamma")).unwrap();
    write_project(temp_dir.path(), "delta", "{ not json");

    let outcome = run(&options, Mode::Write).unwrap();
    assert_eq!(outcome.listed, 2);
    assert_eq!(outcome.skipped.len(), 2);

    let written = fs::read_to_string(&options.index_path).unwrap();
    assert!(!written.contains("gamma"));
    assert!(!written.contains("delta"));
}

#[test]
fn test_missing_start_marker_leaves_file_untouched() {
    let index = format!("<html>\n  <nav>{END_MARKER}</nav>\n</html>\n");
    let (_temp_dir, options) = site(&index);

    let err = run(&options, Mode::Write).unwrap_err();
    assert!(err.is_marker_error());
    match &err {
        Error::Homepage { path, source } => {
            assert_eq!(path, &options.index_path);
            assert!(matches!(**source, Error::MissingMarker { .. }));
        }
        other => panic!("expected Homepage error, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(&options.index_path).unwrap(), index);
}

#[test]
fn test_duplicate_markers_fail_dry_run_too() {
    let index = format!("{START_MARKER}\n{END_MARKER}\n{START_MARKER}\n{END_MARKER}\n");
    let (_temp_dir, options) = site(&index);

    let err = run(&options, Mode::DryRun).unwrap_err();
    match err {
        Error::Homepage { source, .. } => {
            assert!(matches!(*source, Error::DuplicateMarker { count: 2, .. }));
        }
        other => panic!("expected Homepage error, got {other:?}"),
    }
}

#[test]
fn test_markup_only_skips_homepage() {
    let (temp_dir, mut options) = site(&homepage());
    options.index_path = temp_dir.path().join("does-not-exist.html");

    let text = preview(run(&options, Mode::MarkupOnly).unwrap().status);
    assert!(text.starts_with("<ul class=\"classified-projects\">"));
    assert!(text.ends_with("</ul>"));
}

#[test]
fn test_empty_projects_render_placeholder() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("projects")).unwrap();
    fs::write(root.join("index.html"), homepage()).unwrap();

    let options = UpdateOptions {
        index_path: root.join("index.html"),
        projects_dir: root.join("projects"),
        ..Default::default()
    };
    run(&options, Mode::Write).unwrap();

    let written = fs::read_to_string(root.join("index.html")).unwrap();
    assert!(written.contains("<p>No classified projects are currently published."));
    assert!(!written.contains("<ul"));
}

#[test]
fn test_missing_projects_root_is_fatal() {
    let (temp_dir, mut options) = site(&homepage());
    options.projects_dir = temp_dir.path().join("nowhere");

    let err = run(&options, Mode::Write).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert_eq!(fs::read_to_string(&options.index_path).unwrap(), homepage());
}

#[test]
fn test_strict_mode_aborts_before_writing() {
    let (temp_dir, mut options) = site(&homepage());
    write_project(temp_dir.path(), "broken", r#"{"name":"Broken"}"#);
    options.discover.strict = true;

    let err = run(&options, Mode::Write).unwrap_err();
    assert!(matches!(err, Error::InvalidMetadata { .. }));
    assert_eq!(fs::read_to_string(&options.index_path).unwrap(), homepage());
}
