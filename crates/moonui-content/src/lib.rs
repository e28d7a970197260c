//! Content provider for MoonUI sites.
//!
//! Parses Markdown pages with YAML frontmatter, picks out copyable markup
//! snippets, and groups pages into the link sections the navigation panel
//! renders.

pub mod catalog;
pub mod frontmatter;
pub mod parser;
pub mod snippet;

pub use catalog::{build_sections, CatalogPage};
pub use frontmatter::Frontmatter;
pub use parser::{parse_page, ParseError, ParsedPage};
pub use snippet::{BlockMode, CodeBlock, Language};
