//! moonui.toml loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use moonui_shell::ShellConfig;
use moonui_static::{BuildConfig, HeaderLink};
use serde::Deserialize;

/// Configuration file structure (moonui.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_content")]
    pub content: String,
    #[serde(default = "default_output")]
    pub output: String,
    /// Paths to CSS stylesheets to include
    #[serde(default)]
    pub styles: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            content: default_content(),
            output: default_output(),
            styles: vec![],
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct HeaderConfig {
    #[serde(default)]
    pub links: Vec<HeaderLink>,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
    /// Prebuilt browser bindings (wasm-pack output)
    pub wasm_dir: Option<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
            wasm_dir: None,
        }
    }
}

fn default_title() -> String {
    "MoonUI".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_content() -> String {
    "content".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_minify() -> bool {
    true
}

impl ConfigFile {
    /// Parse and validate a moonui.toml document.
    pub fn parse(content: &str) -> Result<Self> {
        let config: ConfigFile = toml::from_str(content)?;
        config
            .shell
            .validate()
            .context("Invalid [shell] section")?;
        Ok(config)
    }

    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Turn the file settings into a builder config.
    pub fn into_build_config(self, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
        BuildConfig {
            content_dir: PathBuf::from(&self.site.content),
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.site.output)),
            minify: minify.unwrap_or(self.build.minify),
            base_url: self.site.base_url,
            title: self.site.title,
            styles: self.site.styles,
            header_links: self.header.links,
            shell: self.shell,
            bindings_dir: self.build.wasm_dir.map(PathBuf::from),
        }
    }
}
