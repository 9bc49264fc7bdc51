//! HTML rendering of the project navigation.

use crate::model::ProjectEntry;

/// Markup emitted when there are no projects to list.
pub const EMPTY_PLACEHOLDER: &str =
    "<p>No classified projects are currently published. Add a project and rerun the updater.</p>";

const LIST_CLASS: &str = "classified-projects";

/// Render entries, in the order given, as an unordered list.
///
/// Lines are joined with `\n` and there is no trailing newline. An empty
/// slice renders [`EMPTY_PLACEHOLDER`].
pub fn render(entries: &[ProjectEntry]) -> String {
    if entries.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    let mut lines = vec![format!("<ul class=\"{LIST_CLASS}\">")];
    for entry in entries {
        push_item(&mut lines, entry);
    }
    lines.push(String::from("</ul>"));
    lines.join("\n")
}

fn push_item(lines: &mut Vec<String>, entry: &ProjectEntry) {
    let href = escape(&entry.url);
    let name = escape(&entry.name);

    lines.push(String::from("  <li>"));
    if let Some(description) = entry.description.as_deref() {
        let description = escape(description);
        lines.push(format!(
            "    <a href=\"{href}\" title=\"{description}\">{name}</a>"
        ));
        lines.push(format!(
            "    <span class=\"description\">{description}</span>"
        ));
    } else {
        lines.push(format!("    <a href=\"{href}\">{name}</a>"));
    }
    lines.push(String::from("  </li>"));
}

/// Escape text for use in HTML content and double- or single-quoted
/// attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
