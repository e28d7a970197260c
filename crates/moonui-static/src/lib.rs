//! Static site generator for MoonUI component showcases.
//!
//! Renders Markdown pages into the responsive navigation shell: top bar,
//! side panel, backdrop and toggle, plus the CSS and bootstrap script the
//! browser bindings need.

pub mod assets;
pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use templates::HeaderLink;
