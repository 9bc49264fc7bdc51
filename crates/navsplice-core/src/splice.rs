//! Marker-bounded replacement inside the homepage document.
//!
//! The text strictly between the start and end markers belongs to the
//! generated navigation. Everything else, markers included, is carried over
//! byte for byte.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const START_MARKER: &str = "<!-- PROJECT_NAV_START -->";
pub const END_MARKER: &str = "<!-- PROJECT_NAV_END -->";

/// The pair of sentinel strings delimiting the navigation region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: START_MARKER.to_string(),
            end: END_MARKER.to_string(),
        }
    }
}

/// Replace the marker region of `document` with `block`.
///
/// The region is rewritten as a newline, the block's lines indented like
/// the start marker, a newline, and the end marker's existing indentation.
/// The newline style follows the start marker's line. Splicing the same
/// block twice yields identical text.
///
/// # Errors
///
/// [`Error::MissingMarker`] if a marker is absent or the end marker comes
/// before the start marker; [`Error::DuplicateMarker`] if either marker
/// occurs more than once.
pub fn splice(document: &str, block: &str, markers: &Markers) -> Result<String> {
    let start = locate(document, &markers.start)?;
    let end = locate(document, &markers.end)?;

    let region_start = start + markers.start.len();
    if end < region_start {
        return Err(Error::MissingMarker {
            marker: markers.end.clone(),
            reason: format!("end marker precedes start marker {}", markers.start),
        });
    }

    let indent = line_indent(document, start);
    let newline = newline_after(document, region_start);
    let end_indent = trailing_indent(&document[region_start..end]).unwrap_or(indent);

    let mut spliced = String::with_capacity(document.len() + block.len());
    spliced.push_str(&document[..region_start]);
    spliced.push_str(newline);
    for (i, line) in block.lines().enumerate() {
        if i > 0 {
            spliced.push_str(newline);
        }
        if !line.is_empty() {
            spliced.push_str(indent);
            spliced.push_str(line);
        }
    }
    spliced.push_str(newline);
    spliced.push_str(end_indent);
    spliced.push_str(&document[end..]);
    Ok(spliced)
}

/// Byte offset of the single occurrence of `marker`.
fn locate(document: &str, marker: &str) -> Result<usize> {
    if marker.is_empty() {
        return Err(Error::MissingMarker {
            marker: String::new(),
            reason: String::from("marker is empty"),
        });
    }

    let mut found = document.match_indices(marker).map(|(i, _)| i);
    match (found.next(), found.count()) {
        (None, _) => Err(Error::MissingMarker {
            marker: marker.to_string(),
            reason: String::from("not found"),
        }),
        (Some(index), 0) => Ok(index),
        (Some(_), rest) => Err(Error::DuplicateMarker {
            marker: marker.to_string(),
            count: rest + 1,
        }),
    }
}

/// Leading spaces and tabs of the line containing `offset`, even when other
/// markup sits between them and the marker.
fn line_indent(document: &str, offset: usize) -> &str {
    let line_start = document[..offset].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &document[line_start..offset];
    let rest = prefix.trim_start_matches([' ', '\t']);
    &prefix[..prefix.len() - rest.len()]
}

/// Whitespace between the last newline of `region` and its end, if the end
/// marker sits alone on its line.
fn trailing_indent(region: &str) -> Option<&str> {
    let tail = &region[region.rfind('\n')? + 1..];
    tail.chars()
        .all(|c| c == ' ' || c == '\t')
        .then_some(tail)
}

fn newline_after(document: &str, offset: usize) -> &'static str {
    match document[offset..].find('\n') {
        Some(i) if document[..offset + i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}
