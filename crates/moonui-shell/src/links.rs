//! Link data supplied by the content provider.

use serde::{Deserialize, Serialize};

/// A single navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Display label
    pub label: String,
    /// Target URL path
    pub href: String,
}

impl LinkEntry {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }

    /// Whether this link points at `route`, ignoring trailing slashes.
    pub fn is_active(&self, route: &str) -> bool {
        normalize(&self.href) == normalize(route)
    }
}

/// A titled group of links. An empty title marks the untitled leading group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSection {
    pub title: String,
    pub entries: Vec<LinkEntry>,
}

impl LinkSection {
    pub fn new(title: impl Into<String>, entries: Vec<LinkEntry>) -> Self {
        Self {
            title: title.into(),
            entries,
        }
    }

    pub fn is_untitled(&self) -> bool {
        self.title.is_empty()
    }

    /// The entry matching `route`, if any.
    pub fn active_entry(&self, route: &str) -> Option<&LinkEntry> {
        self.entries.iter().find(|e| e.is_active(route))
    }
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_routes_ignoring_trailing_slash() {
        let link = LinkEntry::new("Primary Button", "/components/buttons/primary");

        assert!(link.is_active("/components/buttons/primary/"));
        assert!(link.is_active("/components/buttons/primary"));
        assert!(!link.is_active("/components/buttons"));
    }

    #[test]
    fn root_matches_root() {
        let home = LinkEntry::new("Home", "/");
        assert!(home.is_active("/"));
        assert!(!home.is_active("/docs"));
    }

    #[test]
    fn finds_active_entry() {
        let section = LinkSection::new(
            "Inputs",
            vec![
                LinkEntry::new("Text Input", "/components/inputs/text/"),
                LinkEntry::new("Date Input", "/components/inputs/date/"),
            ],
        );

        let active = section.active_entry("/components/inputs/date").unwrap();
        assert_eq!(active.label, "Date Input");
        assert!(!section.is_untitled());
    }
}
