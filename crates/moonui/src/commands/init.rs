//! Scaffold a MoonUI site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Files written by `init`, relative to the content directory.
const PAGES: &[(&str, &str)] = &[
    ("index.md", DEFAULT_INDEX),
    ("docs/introduction.md", DEFAULT_INTRODUCTION),
    ("components/buttons/icon.md", DEFAULT_ICON_BUTTON),
    ("components/cards/action.md", DEFAULT_ACTION_CARD),
];

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing MoonUI site...");

    let content_dir = Path::new("content");

    if content_dir.exists() && !yes {
        tracing::warn!("content/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    write_pages(content_dir, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'moonui build' then 'moonui serve' to preview the site.");

    Ok(())
}

/// Write the starter pages under `content_dir`. Existing files are kept
/// unless `overwrite` is set.
fn write_pages(content_dir: &Path, overwrite: bool) -> Result<()> {
    for (relative, body) in PAGES {
        let path = content_dir.join(relative);
        if path.exists() && !overwrite {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# MoonUI Configuration

[site]
title = "MoonUI"
base_url = "/"
content = "content"
output = "dist"

[shell]
# Below this width the side panel becomes a toggled overlay
breakpoint = 1024
# Below this width the top-bar links move into the full-screen menu
menu_breakpoint = 768
scroll_key = "sidebar-scroll-position"
restore_delay_ms = 10

[[header.links]]
label = "Components"
href = "/components/buttons/icon/"

[[header.links]]
label = "Docs"
href = "/docs/introduction/"

[build]
minify = true
# Output of `wasm-pack build crates/moonui-web --target web`
wasm_dir = "crates/moonui-web/pkg"
"#;

const DEFAULT_INDEX: &str = r#"---
title: Home
nav: false
---

Minimal, copy-paste HTML components.

Browse the components in the side panel and copy the markup you need.
"#;

const DEFAULT_INTRODUCTION: &str = r#"---
title: Introduction
description: Everything about this project.
order: 1
---

MoonUI is a set of plain HTML components. There is nothing to install:
find a component, press **Copy** and paste it into your page.

## FAQ

<details name="faq">
<summary>Will MoonUI keep getting updated?</summary>
<p>Yes. New components land regularly and existing ones are kept working.</p>
</details>

<details name="faq">
<summary>How do I use MoonUI?</summary>
<p>Pick a component from the sidebar, copy its markup and paste it into your page.</p>
</details>

<details name="faq">
<summary>What about scripts?</summary>
<p>Most components are markup only. The few that need a script say so next to the snippet.</p>
</details>
"#;

const DEFAULT_ICON_BUTTON: &str = r#"---
title: Icon Button
description: A square button holding a single icon.
section: Buttons
order: 1
---

```html snippet
<button type="button" class="icon-btn" aria-label="Settings">&#9881;</button>
```
"#;

const DEFAULT_ACTION_CARD: &str = r#"---
title: Action Card
description: A card with a call to action.
section: Cards
order: 1
---

```html snippet title="Action Card"
<div class="card">
  <h3>Upgrade your plan</h3>
  <p>Unlock every component and future updates.</p>
  <button type="button">Upgrade</button>
</div>
```
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use moonui_static::{BuildConfig, StaticBuilder};
    use tempfile::tempdir;

    #[test]
    fn keeps_existing_pages_without_overwrite() {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");
        let intro = content.join("docs/introduction.md");
        fs::create_dir_all(intro.parent().unwrap()).unwrap();
        fs::write(&intro, "---\ntitle: Mine\n---\n").unwrap();

        write_pages(&content, false).unwrap();
        assert_eq!(fs::read_to_string(&intro).unwrap(), "---\ntitle: Mine\n---\n");
        assert!(content.join("components/cards/action.md").exists());

        write_pages(&content, true).unwrap();
        assert_eq!(fs::read_to_string(&intro).unwrap(), DEFAULT_INTRODUCTION);
    }

    #[tokio::test]
    async fn introduction_faq_is_an_exclusive_accordion() {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");
        write_pages(&content, false).unwrap();
        let out = temp.path().join("dist");

        StaticBuilder::new(BuildConfig {
            content_dir: content,
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        let page = fs::read_to_string(out.join("docs/introduction/index.html")).unwrap();
        assert_eq!(page.matches("<details").count(), 3);
        assert_eq!(page.matches(r#"<details name="faq">"#).count(), 3);
        assert!(page.contains("<summary>How do I use MoonUI?</summary>"));
    }
}
