//! Local preview of a built site.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;

use crate::config::ConfigFile;

/// Serve the built site on localhost until interrupted.
pub async fn run(config_path: &Path, port: u16, dir: Option<PathBuf>, open: bool) -> Result<()> {
    let root = site_root(config_path, dir)?;
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Port {} is unavailable", port))?;
    let url = format!("http://{}/", addr);
    tracing::info!(root = %root.display(), "Previewing MoonUI site at {}", url);

    if open {
        if let Err(e) = open::that(&url) {
            tracing::warn!("Open {} manually, no browser could be launched: {}", url, e);
        }
    }

    let app = Router::new().fallback_service(ServeDir::new(&root));
    axum::serve(listener, app)
        .await
        .context("Preview server stopped unexpectedly")
}

/// Directory holding the built pages. `dir` wins over the configured output.
fn site_root(config_path: &Path, dir: Option<PathBuf>) -> Result<PathBuf> {
    let root = match dir {
        Some(dir) => dir,
        None => PathBuf::from(ConfigFile::load(config_path)?.site.output),
    };

    if !root.join("index.html").is_file() {
        anyhow::bail!(
            "No built site in {}; run `moonui build` to generate it",
            root.display()
        );
    }

    Ok(root)
}
