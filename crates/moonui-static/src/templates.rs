//! Template engine for rendering the site shell and pages.

use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};

use moonui_content::CodeBlock;
use moonui_shell::markup::MarkupIds;
use moonui_shell::LinkSection;

/// A panel link as rendered on one page.
#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    /// Whether this link points at the page being rendered
    pub active: bool,
}

/// A panel section as rendered on one page.
#[derive(Debug, Clone, Serialize)]
pub struct NavSection {
    pub title: String,
    pub links: Vec<NavLink>,
}

impl NavSection {
    /// Mark the links of `sections` that match `route`.
    pub fn for_route(sections: &[LinkSection], route: &str) -> Vec<NavSection> {
        sections
            .iter()
            .map(|section| NavSection {
                title: section.title.clone(),
                links: section
                    .entries
                    .iter()
                    .map(|entry| NavLink {
                        label: entry.label.clone(),
                        href: entry.href.clone(),
                        active: entry.is_active(route),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// A top-bar link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderLink {
    pub label: String,
    pub href: String,
    /// Open in a new tab
    #[serde(default)]
    pub external: bool,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Page summary under the title
    pub description: Option<String>,
    /// Rendered content HTML
    pub content: String,
    /// Panel sections with the current link marked
    pub sections: Vec<NavSection>,
    /// Top-bar links
    pub header_links: Vec<HeaderLink>,
    /// Base URL
    pub base_url: String,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
    /// Shell config JSON, already escaped for a script element
    pub shell_config: String,
    /// Element ids shared with the browser bindings
    pub ids: MarkupIds,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("page.html".to_string(), PAGE_TEMPLATE.to_string())
            .expect("Failed to add page template");

        env.add_template_owned("header.html".to_string(), HEADER_TEMPLATE.to_string())
            .expect("Failed to add header template");

        env.add_template_owned("panel.html".to_string(), PANEL_TEMPLATE.to_string())
            .expect("Failed to add panel template");

        env.add_template_owned("snippet.html".to_string(), SNIPPET_TEMPLATE.to_string())
            .expect("Failed to add snippet template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(&self, template: &str, context: &Context) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            description => &context.description,
            content => &context.content,
            sections => &context.sections,
            header_links => &context.header_links,
            base_url => &context.base_url,
            styles => &context.styles,
            shell_config => &context.shell_config,
            ids => &context.ids,
        })
    }

    /// Render a copyable snippet: live preview, caption, copy button, source.
    pub fn render_snippet(&self, block: &CodeBlock) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("snippet.html")?;

        tmpl.render(context! {
            id => &block.id,
            caption => block.caption(),
            language => block.language.as_str(),
            source => block.source.trim_end(),
            copy_attr => moonui_shell::markup::COPY_ATTR,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ site_title }} - {{ title }}</title>
  {% if description %}<meta name="description" content="{{ description }}">
  {% endif %}{% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}<link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  {% include "header.html" %}
  <div id="{{ ids.layout }}" class="layout">
    {% include "panel.html" %}
    <div id="{{ ids.backdrop }}" class="backdrop" {{ ids.shown_attr }}="false"></div>
    <main class="main">
      {% block content %}{% endblock %}
    </main>
    <button id="{{ ids.panel_toggle }}" class="panel-toggle" type="button"
            aria-controls="{{ ids.panel }}" aria-expanded="false" aria-label="Toggle navigation"
            {{ ids.shown_attr }}="false">
      <span class="icon-open" aria-hidden="true">&#9776;</span>
      <span class="icon-close" aria-hidden="true">&#10005;</span>
    </button>
  </div>
  <script type="application/json" id="{{ ids.config }}">{{ shell_config | safe }}</script>
  <script type="module" src="{{ base_url }}assets/main.js"></script>
</body>
</html>"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="page">
  <a href="{{ base_url }}" class="back-link">&larr; Back</a>
  <h1>{{ title }}</h1>
  {% if description %}<p class="description">{{ description }}</p>{% endif %}
  <div class="divider"></div>
  <div class="content">
    {{ content | safe }}
  </div>
</article>
{% endblock %}"##;

const HEADER_TEMPLATE: &str = r##"<header class="topbar">
  <div class="topbar-start">
    <a href="{{ base_url }}" class="logo">{{ site_title }}</a>
    <nav class="topbar-links" aria-label="Site">
    {% for link in header_links %}
      <a href="{{ link.href }}"{% if link.external %} target="_blank" rel="noopener"{% endif %}>{{ link.label }}</a>
    {% endfor %}
    </nav>
  </div>
  <button id="{{ ids.menu_open }}" class="menu-trigger" type="button" aria-label="Toggle Menu"
          aria-controls="{{ ids.menu }}" aria-expanded="false">&#9776;</button>
  <div id="{{ ids.menu }}" class="menu-overlay" hidden>
    <button id="{{ ids.menu_close }}" class="menu-close" type="button" aria-label="Close Menu">&#10005;</button>
    {% for link in header_links %}
    <a href="{{ link.href }}"{% if link.external %} target="_blank" rel="noopener"{% endif %}>{{ link.label }}</a>
    {% endfor %}
  </div>
</header>"##;

const PANEL_TEMPLATE: &str = r##"<aside id="{{ ids.panel }}" class="panel" {{ ids.shown_attr }}="false">
  <nav class="panel-nav" aria-label="Primary sidebar">
  {% for section in sections %}
    {% if section.title %}
    <section class="panel-section">
      <p class="panel-section-title">{{ section.title }}</p>
      {% for link in section.links %}
      <a href="{{ link.href }}" class="panel-link{% if link.active %} active{% endif %}"{% if link.active %} aria-current="page"{% endif %}>{{ link.label }}</a>
      {% endfor %}
    </section>
    {% else %}
    <div class="panel-group">
      {% for link in section.links %}
      <a href="{{ link.href }}" class="panel-link{% if link.active %} active{% endif %}"{% if link.active %} aria-current="page"{% endif %}>{{ link.label }}</a>
      {% endfor %}
    </div>
    <div class="panel-divider"></div>
    {% endif %}
  {% endfor %}
  </nav>
</aside>"##;

const SNIPPET_TEMPLATE: &str = r##"<section class="snippet" id="{{ id }}">
  <div class="snippet-preview">{{ source | safe }}</div>
  <div class="snippet-bar">
    <span class="snippet-caption">{{ caption }}</span>
    <button type="button" class="copy-btn" {{ copy_attr }}="{{ source }}">Copy</button>
  </div>
  <pre class="snippet-source"><code class="language-{{ language }}">{{ source }}</code></pre>
</section>"##;
