//! Frontmatter extraction and parsing.

use serde::Deserialize;

/// Parsed frontmatter from a page.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// Page title (required)
    pub title: String,

    /// One-line summary shown under the title
    #[serde(default)]
    pub description: Option<String>,

    /// Panel section this page is listed under; none means the leading group
    #[serde(default)]
    pub section: Option<String>,

    /// Panel link label, defaults to the title
    #[serde(default)]
    pub label: Option<String>,

    /// Order within its section (lower = first)
    #[serde(default)]
    pub order: Option<i32>,

    /// Whether to list in the panel
    #[serde(default = "default_true")]
    pub nav: bool,

    /// Custom slug override
    #[serde(default)]
    pub slug: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for Frontmatter {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            section: None,
            label: None,
            order: None,
            nav: true,
            slug: None,
        }
    }
}

impl Frontmatter {
    /// Label used for the panel link.
    pub fn nav_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.title)
    }
}

/// Split a page into frontmatter and body.
///
/// Returns the parsed frontmatter and the content after the closing `---`.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    let Some(after_open) = trimmed.strip_prefix("---") else {
        return Ok((None, source));
    };

    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: Frontmatter =
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_component_page_frontmatter() {
        let source = r#"---
title: Icon Button
description: A square button holding a single icon.
section: Buttons
order: 5
---

# Icon Button
"#;

        let (fm, content) = extract_frontmatter(source).unwrap();
        let fm = fm.unwrap();

        assert_eq!(fm.title, "Icon Button");
        assert_eq!(fm.section.as_deref(), Some("Buttons"));
        assert_eq!(fm.order, Some(5));
        assert!(fm.nav);
        assert_eq!(fm.nav_label(), "Icon Button");
        assert!(content.starts_with("# Icon Button"));
    }

    #[test]
    fn label_overrides_title_in_nav() {
        let (fm, _) = extract_frontmatter("---\ntitle: Introduction to MoonUI\nlabel: Introduction\n---\n").unwrap();
        assert_eq!(fm.unwrap().nav_label(), "Introduction");
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "# Just Markdown\n\nNo frontmatter here.";

        let (fm, content) = extract_frontmatter(source).unwrap();

        assert!(fm.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let result = extract_frontmatter("---\ntitle: Test\n# No closing");
        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let result = extract_frontmatter("---\ntitle: [invalid yaml\n---\n");
        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }
}
