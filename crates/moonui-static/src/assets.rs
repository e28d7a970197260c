//! Asset pipeline for CSS and JavaScript processing.

use moonui_shell::markup::{BACKDROP_ID, PANEL_ID, PANEL_TOGGLE_ID, SHOWN_ATTR};
use moonui_shell::ShellConfig;

/// Module name the browser bindings are published under in `assets/`.
pub const BINDINGS_MODULE: &str = "moonui_web.js";

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file with media queries for the configured
    /// breakpoints.
    pub fn generate_css(shell: &ShellConfig) -> String {
        let mut css = String::from(BASE_CSS);
        css.push_str(&responsive_css(shell));
        css
    }

    /// Generate the bootstrap script that loads the browser bindings.
    pub fn generate_js() -> String {
        format!(
            r#"// MoonUI shell bootstrap
import init, {{ mount }} from './{module}';

init()
  .then(() => {{
    window.moonuiShell = mount();
  }})
  .catch((err) => {{
    console.warn('moonui: navigation shell unavailable', err);
  }});
"#,
            module = BINDINGS_MODULE
        )
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

/// Narrow means strictly below the breakpoint.
fn below(px: f64) -> String {
    format!("{:.2}px", px - 0.02)
}

fn responsive_css(shell: &ShellConfig) -> String {
    format!(
        r#"
/* Narrow: the panel becomes an overlay driven by the shell */
@media (max-width: {panel_max}) {{
  .main {{
    margin-left: 0;
  }}

  #{panel} {{
    display: none;
  }}

  #{panel}[{shown}="true"] {{
    display: block;
  }}

  #{backdrop}[{shown}="true"] {{
    display: block;
  }}

  #{toggle} {{
    display: flex;
  }}
}}

/* Small header: links move into the full-screen menu */
@media (max-width: {menu_max}) {{
  .topbar-links {{
    display: none;
  }}

  .menu-trigger {{
    display: flex;
  }}
}}
"#,
        panel_max = below(shell.panel_breakpoint().px()),
        menu_max = below(shell.menu_breakpoint().px()),
        panel = PANEL_ID,
        backdrop = BACKDROP_ID,
        toggle = PANEL_TOGGLE_ID,
        shown = SHOWN_ATTR,
    )
}

const BASE_CSS: &str = r#"/* MoonUI shell theme */

:root {
  --topbar-height: 4rem;
  --panel-width: 16rem;
  --background: #0a0a0a;
  --surface: #171717;
  --border: #262626;
  --foreground: #ffffff;
  --muted: #a3a3a3;
  --success: #4ade80;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: var(--font-sans, system-ui, -apple-system, sans-serif);
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

a {
  color: inherit;
}

/* Top bar */
.topbar {
  position: fixed;
  top: 0;
  left: 0;
  right: 0;
  z-index: 50;
  height: var(--topbar-height);
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0 1rem;
  background: var(--background);
  border-bottom: 1px solid var(--surface);
}

.topbar-start {
  display: flex;
  align-items: center;
  gap: 1.5rem;
}

.logo {
  text-decoration: none;
  font-weight: 500;
}

.topbar-links {
  display: flex;
  gap: 0.25rem;
}

.topbar-links a {
  padding: 0.375rem 0.75rem;
  border-radius: 0.5rem;
  text-decoration: none;
}

.topbar-links a:hover {
  background: var(--surface);
}

.menu-trigger {
  display: none;
  padding: 0.5rem;
  background: none;
  border: none;
  color: var(--foreground);
  cursor: pointer;
}

.menu-overlay {
  position: fixed;
  inset: 0;
  z-index: 40;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  gap: 1.5rem;
  background: var(--background);
}

.menu-overlay[hidden] {
  display: none;
}

.menu-overlay a {
  font-size: 1.125rem;
  padding: 0.5rem 1rem;
  border-radius: 0.5rem;
  text-decoration: none;
}

.menu-close {
  position: absolute;
  top: 1.25rem;
  right: 1.25rem;
  background: none;
  border: none;
  color: var(--foreground);
  font-size: 1.5rem;
  cursor: pointer;
}

/* Layout */
.layout {
  position: relative;
  min-height: 100vh;
  padding-top: var(--topbar-height);
}

.main {
  margin-left: var(--panel-width);
  padding: 2.5rem 1.5rem;
}

/* Panel */
.panel {
  position: fixed;
  top: var(--topbar-height);
  left: 0;
  z-index: 50;
  width: var(--panel-width);
  height: calc(100vh - var(--topbar-height));
  overflow-y: auto;
  padding: 1.5rem;
  background: var(--background);
  border-right: 1px solid var(--surface);
}

.panel-nav {
  display: flex;
  flex-direction: column;
  gap: 1.5rem;
}

.panel-group,
.panel-section {
  display: flex;
  flex-direction: column;
  gap: 0.25rem;
}

.panel-section-title {
  padding: 0 0.75rem;
  font-size: 0.75rem;
  font-weight: 500;
  text-transform: uppercase;
  letter-spacing: 0.05em;
  color: var(--muted);
}

.panel-divider {
  height: 1px;
  background: var(--surface);
}

.panel-link {
  display: block;
  padding: 0.5rem 0.75rem;
  border-radius: 0.375rem;
  font-size: 0.875rem;
  text-decoration: none;
}

.panel-link:hover,
.panel-link.active {
  background: var(--surface);
}

.backdrop {
  display: none;
  position: fixed;
  inset: 0;
  z-index: 40;
  background: rgb(0 0 0 / 0.5);
}

.panel-toggle {
  display: none;
  position: fixed;
  right: 1rem;
  bottom: 1rem;
  z-index: 50;
  padding: 0.75rem;
  border: none;
  border-radius: 9999px;
  background: var(--border);
  color: var(--foreground);
  cursor: pointer;
}

.panel-toggle .icon-close,
.panel-toggle[data-shown="true"] .icon-open {
  display: none;
}

.panel-toggle[data-shown="true"] .icon-close {
  display: inline;
}

/* Page */
.page {
  max-width: 56rem;
}

.back-link {
  display: inline-block;
  margin-bottom: 1.5rem;
  font-size: 0.875rem;
  color: var(--muted);
  text-decoration: none;
}

.page h1 {
  font-size: 2.25rem;
  margin-bottom: 0.5rem;
}

.description {
  color: var(--muted);
  margin-bottom: 2rem;
}

.divider {
  width: 16rem;
  height: 1px;
  background: var(--surface);
  margin-bottom: 2rem;
}

.content p {
  margin-bottom: 1rem;
}

.content details {
  border-bottom: 1px solid var(--border);
  padding: 0.5rem 0.75rem;
}

.content summary {
  cursor: pointer;
  font-weight: 500;
}

.content details p {
  margin: 0.5rem 0 0;
  color: var(--muted);
}

/* Snippets */
.snippet {
  margin: 2rem 0;
}

.snippet-preview {
  display: flex;
  align-items: center;
  justify-content: center;
  gap: 1rem;
  flex-wrap: wrap;
  padding: 2rem;
  border: 1px solid var(--border);
  border-radius: 0.5rem 0.5rem 0 0;
}

.snippet-bar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0.5rem 1rem;
  background: var(--surface);
  border: 1px solid var(--border);
  border-top: none;
  font-size: 0.875rem;
  color: var(--muted);
}

.snippet-source {
  overflow-x: auto;
  padding: 1.5rem;
  border: 1px solid var(--border);
  border-top: none;
  border-radius: 0 0 0.5rem 0.5rem;
  font-family: var(--font-mono, ui-monospace, monospace);
  font-size: 0.875rem;
}

.copy-btn {
  padding: 0.25rem 0.75rem;
  font-size: 0.875rem;
  background: var(--border);
  color: var(--muted);
  border: none;
  border-radius: 0.375rem;
  cursor: pointer;
}

.copy-btn:hover {
  color: var(--foreground);
}

.copy-btn.copied {
  color: var(--success);
}
"#;
