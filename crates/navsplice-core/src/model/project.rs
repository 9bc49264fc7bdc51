use std::cmp::Ordering;
use std::path::Path;

use serde::Deserialize;

/// Raw contents of a `project.json` file.
///
/// Every field is optional here; [`ProjectMetadata::into_entry`] decides
/// whether the record is usable. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProjectMetadata {
    /// Parse metadata from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or mistyped fields.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Fill a missing `name` or `url` from the project's slug.
    ///
    /// The name becomes the title-cased slug (`deep-space` -> `Deep Space`)
    /// and the url becomes `<projects_dir>/<slug>/`.
    pub fn derive_missing(&mut self, slug: &str, projects_dir: &Path) {
        if non_blank(self.name.as_deref()).is_none() {
            self.name = Some(title_case(slug));
        }
        if non_blank(self.url.as_deref()).is_none() {
            let root = projects_dir.to_string_lossy().replace('\\', "/");
            let root = root.trim_end_matches('/');
            self.url = Some(if root.is_empty() {
                format!("{slug}/")
            } else {
                format!("{root}/{slug}/")
            });
        }
    }

    /// Validate into a [`ProjectEntry`].
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when `name` or `url` is missing or
    /// blank.
    pub fn into_entry(self, slug: impl Into<String>) -> Result<ProjectEntry, String> {
        let name = non_blank(self.name.as_deref())
            .ok_or_else(|| String::from("missing required field `name`"))?
            .to_string();
        let url = non_blank(self.url.as_deref())
            .ok_or_else(|| String::from("missing required field `url`"))?
            .to_string();
        let description = non_blank(self.description.as_deref()).map(str::to_string);

        Ok(ProjectEntry {
            slug: slug.into(),
            name,
            description,
            url,
        })
    }
}

/// One navigable project, derived from a `projects/<slug>/project.json` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    /// Directory name of the project.
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
}

impl ProjectEntry {
    #[must_use]
    pub fn new(slug: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            description: None,
            url: url.into(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Navigation order: case-insensitive name, then slug.
    pub fn nav_order(&self, other: &Self) -> Ordering {
        self.name
            .to_lowercase()
            .cmp(&other.name.to_lowercase())
            .then_with(|| self.slug.cmp(&other.slug))
    }
}

/// Sort entries into navigation order.
pub fn sort_entries(entries: &mut [ProjectEntry]) {
    entries.sort_by(ProjectEntry::nav_order);
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn title_case(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_json_ignores_unknown_keys() {
        let meta = ProjectMetadata::from_json(
            r#"{"name":"Alpha","url":"projects/alpha/index.html","tags":["x"]}"#,
        )
        .unwrap();
        assert_eq!(meta.name.as_deref(), Some("Alpha"));
        assert!(meta.description.is_none());
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        assert!(ProjectMetadata::from_json(r#"{"name":5,"url":"x"}"#).is_err());
        assert!(ProjectMetadata::from_json("{not json").is_err());
    }

    #[test]
    fn test_into_entry_requires_name_and_url() {
        let missing_url = ProjectMetadata {
            name: Some("Alpha".to_string()),
            ..Default::default()
        };
        let err = missing_url.into_entry("alpha").unwrap_err();
        assert!(err.contains("url"));

        let blank_name = ProjectMetadata {
            name: Some("   ".to_string()),
            url: Some("a/".to_string()),
            description: None,
        };
        let err = blank_name.into_entry("alpha").unwrap_err();
        assert!(err.contains("name"));
    }

    #[test]
    fn test_into_entry_drops_blank_description() {
        let meta = ProjectMetadata {
            name: Some(" Alpha ".to_string()),
            url: Some("projects/alpha/".to_string()),
            description: Some("  ".to_string()),
        };
        let entry = meta.into_entry("alpha").unwrap();
        assert_eq!(entry.name, "Alpha");
        assert_eq!(entry.slug, "alpha");
        assert!(entry.description.is_none());
    }

    #[test]
    fn test_derive_missing_fields() {
        let mut meta = ProjectMetadata::default();
        meta.derive_missing("deep-space", &PathBuf::from("projects"));
        let entry = meta.into_entry("deep-space").unwrap();
        assert_eq!(entry.name, "Deep Space");
        assert_eq!(entry.url, "projects/deep-space/");
    }

    #[test]
    fn test_derive_missing_keeps_present_fields() {
        let mut meta = ProjectMetadata {
            name: Some("Custom".to_string()),
            url: None,
            description: None,
        };
        meta.derive_missing("alpha", &PathBuf::from("site/projects/"));
        assert_eq!(meta.name.as_deref(), Some("Custom"));
        assert_eq!(meta.url.as_deref(), Some("site/projects/alpha/"));
    }

    #[test]
    fn test_sort_is_case_insensitive_with_slug_tiebreak() {
        let mut entries = vec![
            ProjectEntry::new("z-beta", "beta", "b/"),
            ProjectEntry::new("b-alpha", "Alpha", "a2/"),
            ProjectEntry::new("a-alpha", "alpha", "a1/"),
            ProjectEntry::new("gamma", "Gamma", "g/"),
        ];
        sort_entries(&mut entries);
        let slugs: Vec<_> = entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a-alpha", "b-alpha", "z-beta", "gamma"]);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello-world"), "Hello World");
        assert_eq!(title_case("MIXED-case"), "Mixed Case");
        assert_eq!(title_case("solo"), "Solo");
    }
}
