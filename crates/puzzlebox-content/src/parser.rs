//! MDX document parser.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde::de::DeserializeOwned;

use crate::codeblock::CodeBlock;
use crate::frontmatter::{extract_frontmatter, FrontmatterError};

/// Markdown extensions enabled for all content.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// A parsed MDX document.
#[derive(Debug, Clone)]
pub struct ParsedDoc<T> {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<T>,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Extracted code blocks
    pub code_blocks: Vec<CodeBlock>,

    /// Table of contents entries
    pub toc: Vec<TocEntry>,
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Errors that can occur when parsing MDX.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Parse an MDX document.
///
/// Extracts frontmatter and code blocks, and generates a table of contents.
pub fn parse_mdx<T: DeserializeOwned>(source: &str) -> Result<ParsedDoc<T>, ParseError> {
    let (frontmatter, content) = extract_frontmatter::<T>(source)?;

    let mut code_blocks = Vec::new();
    let mut toc = Vec::new();

    // Line numbers are reported relative to the full source, frontmatter included
    let frontmatter_len = source.len() - content.len();
    let line_offset = source[..frontmatter_len].lines().count();

    let mut current_code_block: Option<(String, usize, String)> = None; // (info, line, source)
    let mut current_heading: Option<(u8, String)> = None; // (level, text)

    for (event, range) in Parser::new_ext(content, markdown_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match &kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let line = content[..range.start].matches('\n').count() + 1 + line_offset;
                current_code_block = Some((info, line, String::new()));
            }

            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, line, source)) = current_code_block.take() {
                    code_blocks.push(CodeBlock::from_info(&info, source, line));
                }
            }

            Event::Start(Tag::Heading { level, .. }) => {
                current_heading = Some((level as u8, String::new()));
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, title)) = current_heading.take() {
                    let id = slugify(&title);
                    toc.push(TocEntry { title, id, level });
                }
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, ref mut source)) = current_code_block {
                    source.push_str(&text);
                } else if let Some((_, ref mut heading)) = current_heading {
                    heading.push_str(&text);
                }
            }

            _ => {}
        }
    }

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        code_blocks,
        toc,
    })
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::PuzzleFrontmatter;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_mdx() {
        let source = r#"---
title: Two Sum
description: Classic warm-up
---

# Two Sum

Given an array of integers, return the indices of the two numbers.

```ts {2}
function twoSum(nums: number[], target: number) {
  return [];
}
```

## Constraints

Each input has exactly one solution.
"#;

        let doc = parse_mdx::<PuzzleFrontmatter>(source).unwrap();

        let fm = doc.frontmatter.unwrap();
        assert_eq!(fm.title, "Two Sum");
        assert_eq!(fm.description, "Classic warm-up");

        assert_eq!(doc.code_blocks.len(), 1);
        let block = &doc.code_blocks[0];
        assert_eq!(block.language.as_deref(), Some("ts"));
        assert!(block.is_highlighted(2));
        assert!(block.source.contains("return [];"));
        assert_eq!(block.line_number, 10);

        assert_eq!(doc.toc.len(), 2);
        assert_eq!(doc.toc[0].title, "Two Sum");
        assert_eq!(doc.toc[0].level, 1);
        assert_eq!(doc.toc[0].id, "two-sum");
        assert_eq!(doc.toc[1].title, "Constraints");
        assert_eq!(doc.toc[1].level, 2);
    }

    #[test]
    fn parses_without_frontmatter() {
        let source = "# Just Markdown\n\nNo frontmatter.";

        let doc = parse_mdx::<PuzzleFrontmatter>(source).unwrap();

        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.toc.len(), 1);
        assert_eq!(doc.toc[0].title, "Just Markdown");
    }

    #[test]
    fn heading_ids_include_inline_code() {
        let source = "## Using `HashMap`\n\nText.";

        let doc = parse_mdx::<PuzzleFrontmatter>(source).unwrap();

        assert_eq!(doc.toc[0].title, "Using HashMap");
        assert_eq!(doc.toc[0].id, "using-hashmap");
    }

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("API Reference"), "api-reference");
        assert_eq!(slugify("Button (Primary)"), "button-primary");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }
}
