//! Grouping pages into the panel's link sections.

use std::collections::BTreeMap;

use moonui_shell::{LinkEntry, LinkSection};

const DEFAULT_ORDER: i32 = 999;

/// The parts of a page the panel needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub label: String,
    pub href: String,
    pub section: Option<String>,
    pub order: Option<i32>,
}

/// Build the panel sections from a set of pages.
///
/// Pages without a section form the untitled leading group. Titled sections
/// follow, ordered by their lowest page order and then by title; entries
/// within a section are ordered by page order, then label.
pub fn build_sections(pages: &[CatalogPage]) -> Vec<LinkSection> {
    let mut leading: Vec<&CatalogPage> = Vec::new();
    let mut grouped: BTreeMap<&str, Vec<&CatalogPage>> = BTreeMap::new();

    for page in pages {
        match page.section.as_deref() {
            Some(title) if !title.trim().is_empty() => {
                grouped.entry(title).or_default().push(page)
            }
            _ => leading.push(page),
        }
    }

    let mut titled: Vec<(i32, &str, Vec<&CatalogPage>)> = grouped
        .into_iter()
        .map(|(title, pages)| {
            let first = pages
                .iter()
                .map(|p| p.order.unwrap_or(DEFAULT_ORDER))
                .min()
                .unwrap_or(DEFAULT_ORDER);
            (first, title, pages)
        })
        .collect();
    titled.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    let mut sections = Vec::with_capacity(titled.len() + 1);
    if !leading.is_empty() {
        sections.push(section("", leading));
    }
    for (_, title, pages) in titled {
        sections.push(section(title, pages));
    }
    sections
}

fn section(title: &str, mut pages: Vec<&CatalogPage>) -> LinkSection {
    pages.sort_by(|a, b| {
        a.order
            .unwrap_or(DEFAULT_ORDER)
            .cmp(&b.order.unwrap_or(DEFAULT_ORDER))
            .then_with(|| a.label.cmp(&b.label))
    });

    LinkSection::new(
        title,
        pages
            .into_iter()
            .map(|p| LinkEntry::new(p.label.clone(), p.href.clone()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(label: &str, href: &str, section: Option<&str>, order: Option<i32>) -> CatalogPage {
        CatalogPage {
            label: label.to_string(),
            href: href.to_string(),
            section: section.map(str::to_string),
            order,
        }
    }

    #[test]
    fn groups_and_orders_sections() {
        let pages = vec![
            page("Product Card", "/components/cards/product/", Some("Cards"), Some(4)),
            page("How to use", "/docs/howtouse/", None, Some(2)),
            page("Text Input", "/components/inputs/text/", Some("Inputs"), Some(1)),
            page("Primary Button", "/components/buttons/primary/", Some("Buttons"), Some(1)),
            page("Introduction", "/docs/introduction/", None, Some(1)),
            page("Action Card", "/components/cards/action/", Some("Cards"), Some(1)),
        ];

        let sections = build_sections(&pages);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();

        assert_eq!(titles, vec!["", "Buttons", "Cards", "Inputs"]);
        assert_eq!(sections[0].entries[0].label, "Introduction");
        assert_eq!(sections[0].entries[1].label, "How to use");
        assert_eq!(sections[2].entries[0].label, "Action Card");
        assert_eq!(sections[2].entries[1].label, "Product Card");
    }

    #[test]
    fn no_leading_group_without_unsectioned_pages() {
        let pages = vec![page("Ghost Button", "/b/", Some("Buttons"), None)];

        let sections = build_sections(&pages);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Buttons");
    }

    #[test]
    fn blank_section_counts_as_leading() {
        let pages = vec![page("Home", "/", Some("  "), None)];
        assert!(build_sections(&pages)[0].is_untitled());
    }
}
