//! Page parser.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
use crate::snippet::{extract_title, BlockMode, CodeBlock, Language};

/// A parsed content page.
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown body (without frontmatter)
    pub content: String,

    /// Fenced code blocks in document order
    pub code_blocks: Vec<CodeBlock>,
}

impl ParsedPage {
    pub fn title(&self) -> Option<&str> {
        self.frontmatter.as_ref().map(|f| f.title.as_str())
    }

    pub fn snippets(&self) -> impl Iterator<Item = &CodeBlock> {
        self.code_blocks.iter().filter(|b| b.is_snippet())
    }
}

/// Errors that can occur when parsing a page.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Markdown extensions enabled for every page.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Parse a page, extracting frontmatter and code blocks.
pub fn parse_page(source: &str) -> Result<ParsedPage, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    // Lines consumed by the frontmatter, so block line numbers match the file.
    let body_start = source.len() - content.len();
    let line_offset = source[..body_start].matches('\n').count();

    let mut code_blocks = Vec::new();
    let mut current: Option<(String, usize, String)> = None; // (info, line, text)

    for (event, range) in Parser::new_ext(content, markdown_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let line = content[..range.start].matches('\n').count() + 1 + line_offset;
                current = Some((info, line, String::new()));
            }

            Event::Text(text) => {
                if let Some((_, _, ref mut body)) = current {
                    body.push_str(&text);
                }
            }

            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, line, body)) = current.take() {
                    let mut block = CodeBlock::new(
                        Language::from_info(&info),
                        BlockMode::from_info(&info),
                        body,
                        line,
                    );
                    block.title = extract_title(&info);
                    code_blocks.push(block);
                }
            }

            _ => {}
        }
    }

    Ok(ParsedPage {
        frontmatter,
        content: content.to_string(),
        code_blocks,
    })
}
