//! Code block extraction and parsing.

use std::collections::BTreeSet;

/// A parsed code block from MDX.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Language tag (first word of the info string), lowercased
    pub language: Option<String>,

    /// Source code content
    pub source: String,

    /// Line number where the block starts (1-indexed)
    pub line_number: usize,

    /// Optional title from `title="..."`
    pub title: Option<String>,

    /// 1-indexed lines to highlight, from `{1,3-5}`
    pub highlighted: BTreeSet<usize>,
}

impl CodeBlock {
    /// Create a code block from its fence info string.
    pub fn from_info(info: &str, source: String, line_number: usize) -> Self {
        Self {
            language: parse_language(info),
            source,
            line_number,
            title: extract_title(info),
            highlighted: parse_highlighted_lines(info),
        }
    }

    /// Whether a given 1-indexed line is highlighted.
    pub fn is_highlighted(&self, line: usize) -> bool {
        self.highlighted.contains(&line)
    }
}

/// Parse the language tag from a code fence info string.
///
/// Accepts both `ts` and the `language-ts` class form.
pub fn parse_language(info: &str) -> Option<String> {
    let lang = info.split_whitespace().next()?;
    if lang.starts_with('{') || lang.contains('=') {
        return None;
    }
    let lang = lang.strip_prefix("language-").unwrap_or(lang);
    Some(lang.to_lowercase())
}

/// Extract a title from a code fence info string if present.
///
/// Supports formats like:
/// - `ts title="solution.ts"`
/// - `ts title=solution.ts`
pub fn extract_title(info: &str) -> Option<String> {
    if let Some(start) = info.find("title=\"") {
        let rest = &info[start + 7..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }

    if let Some(start) = info.find("title=") {
        let rest = &info[start + 6..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let title = rest[..end].trim_matches('"');
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }

    None
}

/// Parse a `{1,3-5}` highlight range list from a code fence info string.
pub fn parse_highlighted_lines(info: &str) -> BTreeSet<usize> {
    let mut lines = BTreeSet::new();

    let Some(start) = info.find('{') else {
        return lines;
    };
    let Some(len) = info[start..].find('}') else {
        return lines;
    };

    for part in info[start + 1..start + len].split(',') {
        let part = part.trim();
        match part.split_once('-') {
            Some((from, to)) => {
                if let (Ok(from), Ok(to)) = (from.trim().parse::<usize>(), to.trim().parse()) {
                    lines.extend(from..=to);
                }
            }
            None => {
                if let Ok(line) = part.parse() {
                    lines.insert(line);
                }
            }
        }
    }

    lines
}
