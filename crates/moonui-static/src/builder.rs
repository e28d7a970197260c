//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use pulldown_cmark::{html, CodeBlockKind, Event, Parser, Tag, TagEnd};
use rayon::prelude::*;
use regex::Regex;
use walkdir::WalkDir;

use moonui_content::parser::markdown_options;
use moonui_content::{build_sections, parse_page, BlockMode, CatalogPage, Frontmatter, Language, ParsedPage};
use moonui_shell::markup::MarkupIds;
use moonui_shell::{ConfigError, LinkSection, ShellConfig};

use crate::assets::AssetPipeline;
use crate::templates::{Context, HeaderLink, NavSection, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source content directory
    pub content_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,

    /// Top-bar links, also listed in the small-screen menu
    pub header_links: Vec<HeaderLink>,

    /// Navigation shell settings embedded into every page
    pub shell: ShellConfig,

    /// Directory holding the prebuilt browser bindings (wasm-bindgen output)
    pub bindings_dir: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: "MoonUI".to_string(),
            styles: vec![],
            header_links: vec![],
            shell: ShellConfig::default(),
            bindings_dir: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of copyable snippets rendered
    pub snippets: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read content: {0}")]
    ReadError(String),

    #[error("Failed to parse page: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid shell configuration: {0}")]
    Shell(#[from] ConfigError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Source file path
    source_path: PathBuf,

    /// Relative path from the content dir
    relative_path: PathBuf,

    /// Output path
    output_path: PathBuf,

    /// Parsed page
    page: ParsedPage,
}

impl PageInfo {
    fn frontmatter(&self) -> Option<&Frontmatter> {
        self.page.frontmatter.as_ref()
    }

    fn title(&self) -> String {
        self.frontmatter()
            .map(|f| f.title.clone())
            .unwrap_or_else(|| {
                self.relative_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("Untitled")
                    .to_string()
            })
    }
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        self.config.shell.validate()?;

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let pages = self.discover_pages()?;
        let sections = self.link_sections(&pages);
        let shell_config = script_safe(&self.config.shell.to_json()?);
        let header_links = self.header_links();

        tracing::debug!(
            "Discovered {} pages in {} panel sections",
            pages.len(),
            sections.len()
        );

        // Render pages in parallel
        let results: Vec<Result<usize, BuildError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, &sections, &header_links, &shell_config))
            .collect();

        let mut total_snippets = 0;
        for result in results {
            total_snippets += result?;
        }

        self.generate_assets()?;
        self.generate_sitemap(&pages)?;

        Ok(BuildResult {
            pages: pages.len(),
            snippets: total_snippets,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Discover all pages in the content directory.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        let mut pages = Vec::new();

        if !self.config.content_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Content directory not found: {}",
                self.config.content_dir.display()
            )));
        }

        for entry in WalkDir::new(&self.config.content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "mdx" && ext != "md" {
                continue;
            }

            let source = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

            let page = parse_page(&source).map_err(|e| BuildError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let relative_path = path
                .strip_prefix(&self.config.content_dir)
                .unwrap_or(path)
                .to_path_buf();

            let output_path = self.calculate_output_path(&relative_path, page.frontmatter.as_ref());

            pages.push(PageInfo {
                source_path: path.to_path_buf(),
                relative_path,
                output_path,
                page,
            });
        }

        // Deterministic output regardless of directory walk order
        pages.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        Ok(pages)
    }

    /// Calculate output path for a page.
    fn calculate_output_path(&self, relative: &Path, frontmatter: Option<&Frontmatter>) -> PathBuf {
        if let Some(slug) = frontmatter.and_then(|f| f.slug.as_deref()) {
            return self
                .config
                .output_dir
                .join(slug.trim_matches('/'))
                .join("index.html");
        }

        let stem = relative
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index");
        let parent = relative.parent().unwrap_or(Path::new(""));

        if stem == "index" {
            // content/index.md -> dist/index.html
            self.config.output_dir.join(parent).join("index.html")
        } else {
            // content/buttons/icon.md -> dist/buttons/icon/index.html
            self.config
                .output_dir
                .join(parent)
                .join(stem)
                .join("index.html")
        }
    }

    /// Convert output path to URL.
    fn path_to_url(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.config.output_dir).unwrap_or(path);

        let url = relative
            .parent()
            .map(|p| {
                p.components()
                    .map(|c| c.as_os_str().to_string_lossy().to_string())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();

        if url.is_empty() {
            self.config.base_url.clone()
        } else {
            format!("{}{}/", self.config.base_url, url)
        }
    }

    /// Group listed pages into panel sections.
    fn link_sections(&self, pages: &[PageInfo]) -> Vec<LinkSection> {
        let catalog: Vec<CatalogPage> = pages
            .iter()
            .filter(|p| p.frontmatter().map_or(true, |f| f.nav))
            .map(|p| {
                let fm = p.frontmatter();
                CatalogPage {
                    label: fm
                        .map(|f| f.nav_label().to_string())
                        .unwrap_or_else(|| p.title()),
                    href: self.path_to_url(&p.output_path),
                    section: fm.and_then(|f| f.section.clone()),
                    order: fm.and_then(|f| f.order),
                }
            })
            .collect();

        build_sections(&catalog)
    }

    /// Top-bar links, with absolute URLs always opening in a new tab.
    fn header_links(&self) -> Vec<HeaderLink> {
        static ABSOLUTE_URL: OnceLock<Regex> = OnceLock::new();
        let absolute = ABSOLUTE_URL
            .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("valid regex"));

        self.config
            .header_links
            .iter()
            .map(|link| HeaderLink {
                external: link.external || absolute.is_match(&link.href),
                ..link.clone()
            })
            .collect()
    }

    /// Build a single page. Returns the number of snippets rendered.
    fn build_page(
        &self,
        info: &PageInfo,
        sections: &[LinkSection],
        header_links: &[HeaderLink],
        shell_config: &str,
    ) -> Result<usize, BuildError> {
        let (content, snippets) = self.render_markdown(&info.page)?;
        let route = self.path_to_url(&info.output_path);

        let context = Context {
            title: info.title(),
            site_title: self.config.title.clone(),
            description: info.frontmatter().and_then(|f| f.description.clone()),
            content,
            sections: NavSection::for_route(sections, &route),
            header_links: header_links.to_vec(),
            base_url: self.config.base_url.clone(),
            styles: self
                .config
                .styles
                .iter()
                .map(|s| {
                    let filename = Path::new(s)
                        .file_name()
                        .and_then(|f| f.to_str())
                        .unwrap_or("style.css");
                    format!("{}assets/{}", self.config.base_url, filename)
                })
                .collect(),
            shell_config: shell_config.to_string(),
            ids: MarkupIds::default(),
        };

        let html = self
            .templates
            .render_page("page.html", &context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        if let Some(parent) = info.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&info.output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!(
            "Rendered {} -> {}",
            info.source_path.display(),
            info.output_path.display()
        );

        Ok(snippets)
    }

    /// Render markdown to HTML, replacing snippet blocks with preview markup.
    fn render_markdown(&self, page: &ParsedPage) -> Result<(String, usize), BuildError> {
        let mut snippets = page.snippets();
        let mut events = Vec::new();
        let mut inside_snippet = false;
        let mut count = 0;

        for event in Parser::new_ext(&page.content, markdown_options()) {
            if inside_snippet {
                if matches!(event, Event::End(TagEnd::CodeBlock)) {
                    inside_snippet = false;
                }
                continue;
            }

            if let Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) = &event {
                let is_snippet = BlockMode::from_info(info) == BlockMode::Snippet
                    && Language::from_info(info).is_previewable();

                if is_snippet {
                    if let Some(block) = snippets.next() {
                        let markup = self
                            .templates
                            .render_snippet(block)
                            .map_err(|e| BuildError::TemplateError(e.to_string()))?;
                        events.push(Event::Html(markup.into()));
                        inside_snippet = true;
                        count += 1;
                        continue;
                    }
                }
            }

            events.push(event);
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok((html_output, count))
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css(&self.config.shell);
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Skipping CSS minification: {}", e);
                css
            })
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if source_path.exists() {
                let filename = source_path
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or("style.css");
                let content = fs::read_to_string(&source_path).map_err(|e| {
                    BuildError::ReadError(format!("Failed to read stylesheet: {}", e))
                })?;
                fs::write(assets_dir.join(filename), content)
                    .map_err(|e| BuildError::WriteError(e.to_string()))?;
                tracing::info!("Copied stylesheet from {}", style_path);
            } else {
                tracing::warn!("Stylesheet not found: {}", style_path);
            }
        }

        self.copy_bindings(&assets_dir)
    }

    /// Copy the browser bindings next to the bootstrap script.
    fn copy_bindings(&self, assets_dir: &Path) -> Result<(), BuildError> {
        let Some(dir) = &self.config.bindings_dir else {
            tracing::warn!(
                "No browser bindings configured; the panel will not toggle on narrow screens"
            );
            return Ok(());
        };

        let entries = fs::read_dir(dir).map_err(|e| {
            BuildError::ReadError(format!("Bindings directory {}: {}", dir.display(), e))
        })?;

        let mut copied = 0;
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !path.is_file() || !matches!(ext, "js" | "wasm") {
                continue;
            }
            if let Some(name) = path.file_name() {
                fs::copy(&path, assets_dir.join(name))
                    .map_err(|e| BuildError::WriteError(e.to_string()))?;
                copied += 1;
            }
        }

        tracing::info!("Copied {} browser binding files", copied);
        Ok(())
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, pages: &[PageInfo]) -> Result<(), BuildError> {
        let urls: Vec<String> = pages
            .iter()
            .map(|page| {
                format!(
                    "  <url>\n    <loc>{}</loc>\n  </url>",
                    self.path_to_url(&page.output_path)
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

/// Make JSON safe to inline in a `<script>` element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sample_site(root: &Path) -> BuildConfig {
        let content = root.join("content");

        write(
            &content.join("index.md"),
            "---\ntitle: Home\nnav: false\n---\n# Welcome\n",
        );
        write(
            &content.join("docs/introduction.md"),
            "---\ntitle: Introduction\norder: 1\n---\nFind a component in the sidebar and copy it.\n",
        );
        write(
            &content.join("components/buttons/icon.md"),
            r#"---
title: Icon Button
description: A square button holding a single icon.
section: Buttons
order: 5
---

```html snippet
<button class="icon-btn">*</button>
```
"#,
        );

        BuildConfig {
            content_dir: content,
            output_dir: root.join("dist"),
            header_links: vec![HeaderLink {
                label: "Github".to_string(),
                href: "https://github.com/example/moon-ui".to_string(),
                external: false,
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn builds_site_with_panel_and_snippets() {
        let temp = tempdir().unwrap();
        let config = sample_site(temp.path());
        let out = config.output_dir.clone();

        let result = StaticBuilder::new(config).build().await.unwrap();

        assert_eq!(result.pages, 3);
        assert_eq!(result.snippets, 1);
        assert!(out.join("index.html").exists());
        assert!(out.join("assets/main.css").exists());
        assert!(out.join("assets/main.js").exists());
        assert!(out.join("sitemap.xml").exists());

        let page = fs::read_to_string(out.join("components/buttons/icon/index.html")).unwrap();
        assert!(page.contains("<p class=\"panel-section-title\">Buttons</p>"));
        assert!(page.contains(r#"aria-current="page">Icon Button</a>"#));
        assert!(page.contains(">Introduction</a>"));
        assert!(!page.contains(">Home</a>"));
        assert!(page.contains(r#"<div class="snippet-preview"><button class="icon-btn">*</button></div>"#));
        assert!(page.contains("\"scroll_key\":\"sidebar-scroll-position\""));
        assert!(page.contains(r#"target="_blank""#));
    }

    #[tokio::test]
    async fn rejects_invalid_shell_config() {
        let temp = tempdir().unwrap();
        let mut config = sample_site(temp.path());
        config.shell.breakpoint = -1.0;

        let result = StaticBuilder::new(config).build().await;

        assert!(matches!(result, Err(BuildError::Shell(_))));
    }

    #[tokio::test]
    async fn copies_browser_bindings() {
        let temp = tempdir().unwrap();
        let mut config = sample_site(temp.path());
        let pkg = temp.path().join("pkg");
        write(&pkg.join("moonui_web.js"), "export default function init() {}");
        write(&pkg.join("moonui_web_bg.wasm"), "\0asm");
        write(&pkg.join("package.json"), "{}");
        config.bindings_dir = Some(pkg);
        let out = config.output_dir.clone();

        StaticBuilder::new(config).build().await.unwrap();

        assert!(out.join("assets/moonui_web.js").exists());
        assert!(out.join("assets/moonui_web_bg.wasm").exists());
        assert!(!out.join("assets/package.json").exists());
    }

    #[test]
    fn errors_on_missing_content_dir() {
        let temp = tempdir().unwrap();
        let config = BuildConfig {
            content_dir: temp.path().join("missing"),
            output_dir: temp.path().join("dist"),
            ..Default::default()
        };

        let result = tokio_test::block_on(StaticBuilder::new(config).build());

        assert!(matches!(result, Err(BuildError::ReadError(_))));
    }

    #[test]
    fn script_safe_escapes_closing_tags() {
        assert_eq!(script_safe(r#"{"k":"</script>"}"#), r#"{"k":"<\/script>"}"#);
    }
}
