//! Code block classification and snippet metadata.

/// Language of a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    Html,
    Css,
    JavaScript,
    Jsx,
    Tsx,
    Json,
    Bash,
    #[default]
    Unknown,
}

impl Language {
    /// Parse language from code fence info string.
    pub fn from_info(info: &str) -> Self {
        let lang = info.split_whitespace().next().unwrap_or("");
        match lang.to_lowercase().as_str() {
            "html" => Self::Html,
            "css" => Self::Css,
            "js" | "javascript" => Self::JavaScript,
            "jsx" => Self::Jsx,
            "tsx" => Self::Tsx,
            "json" => Self::Json,
            "bash" | "sh" | "shell" => Self::Bash,
            _ => Self::Unknown,
        }
    }

    /// Only plain markup can be dropped into the page as a live preview.
    pub fn is_previewable(&self) -> bool {
        matches!(self, Self::Html)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::JavaScript => "js",
            Self::Jsx => "jsx",
            Self::Tsx => "tsx",
            Self::Json => "json",
            Self::Bash => "bash",
            Self::Unknown => "text",
        }
    }
}

/// Rendering mode for a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockMode {
    /// Preview plus copy button
    Snippet,
    /// Plain highlighted source
    #[default]
    Source,
}

impl BlockMode {
    pub fn from_info(info: &str) -> Self {
        if info.split_whitespace().any(|w| w.eq_ignore_ascii_case("snippet")) {
            Self::Snippet
        } else {
            Self::Source
        }
    }
}

/// A fenced code block from a page.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Unique identifier (format: snippet-{line_number})
    pub id: String,

    pub language: Language,

    pub mode: BlockMode,

    /// Source text, which is also what the copy button copies
    pub source: String,

    /// Line number where the block starts (1-indexed)
    pub line_number: usize,

    /// Caption from `title="..."` in the info string
    pub title: Option<String>,
}

impl CodeBlock {
    pub fn new(language: Language, mode: BlockMode, source: String, line_number: usize) -> Self {
        Self {
            id: format!("snippet-{}", line_number),
            language,
            mode,
            source,
            line_number,
            title: None,
        }
    }

    /// Whether this block renders as a previewable, copyable snippet.
    pub fn is_snippet(&self) -> bool {
        self.mode == BlockMode::Snippet && self.language.is_previewable()
    }

    /// Caption shown above the snippet source.
    pub fn caption(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{} Snippet", self.language.as_str().to_uppercase()))
    }
}

/// Extract `title="..."` from a code fence info string.
pub fn extract_title(info: &str) -> Option<String> {
    let start = info.find("title=\"")?;
    let rest = &info[start + 7..];
    let end = rest.find('"')?;
    let title = &rest[..end];
    (!title.is_empty()).then(|| title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language() {
        assert_eq!(Language::from_info("html snippet"), Language::Html);
        assert_eq!(Language::from_info("CSS"), Language::Css);
        assert_eq!(Language::from_info("sh"), Language::Bash);
        assert_eq!(Language::from_info(""), Language::Unknown);
    }

    #[test]
    fn parses_mode() {
        assert_eq!(BlockMode::from_info("html snippet"), BlockMode::Snippet);
        assert_eq!(BlockMode::from_info("html"), BlockMode::Source);
        assert_eq!(BlockMode::from_info("html snippets-off"), BlockMode::Source);
    }

    #[test]
    fn extracts_title() {
        assert_eq!(
            extract_title(r#"html snippet title="Icon Button""#),
            Some("Icon Button".to_string())
        );
        assert_eq!(extract_title("html snippet"), None);
        assert_eq!(extract_title(r#"html title="""#), None);
    }

    #[test]
    fn only_html_snippets_preview() {
        let html = CodeBlock::new(Language::Html, BlockMode::Snippet, "<b>x</b>".into(), 3);
        assert!(html.is_snippet());
        assert_eq!(html.caption(), "HTML Snippet");
        assert_eq!(html.id, "snippet-3");

        let css = CodeBlock::new(Language::Css, BlockMode::Snippet, "a{}".into(), 9);
        assert!(!css.is_snippet());
    }
}
