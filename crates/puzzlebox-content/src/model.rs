//! Loaded blog posts and puzzles.

use chrono::{DateTime, NaiveDate};

/// Starter text for puzzles that do not provide their own.
pub const DEFAULT_STARTER_CODE: &str = "// Write your solution here";

/// Editor language for puzzles that do not name one.
pub const DEFAULT_STARTER_LANGUAGE: &str = "typescript";

/// A blog post loaded from `blog/<slug>.mdx`.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub slug: String,
    pub title: String,
    /// Publication date as written in the frontmatter
    pub date: String,
    pub author: String,
    pub excerpt: String,
    pub image: Option<String>,
    /// MDX body without the frontmatter block
    pub content: String,
}

impl Post {
    /// Publication date, if `date` is `YYYY-MM-DD` or RFC 3339.
    pub fn published(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// A coding puzzle loaded from `puzzles/<slug>.mdx`.
#[derive(Debug, Clone, PartialEq)]
pub struct Puzzle {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub starter_code: Option<String>,
    pub starter_code_language: Option<String>,
    pub image: Option<String>,
    /// MDX body without the frontmatter block
    pub content: String,
}

impl Puzzle {
    pub fn starter_code_or_default(&self) -> &str {
        self.starter_code.as_deref().unwrap_or(DEFAULT_STARTER_CODE)
    }

    pub fn language_or_default(&self) -> &str {
        self.starter_code_language
            .as_deref()
            .unwrap_or(DEFAULT_STARTER_LANGUAGE)
    }

    /// Browser storage key under which the visitor's solution is persisted.
    ///
    /// Derived from the title, lowercased with whitespace runs replaced by `-`.
    pub fn storage_key(&self) -> String {
        let kebab = self
            .title
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("puzzle-solution-{}", kebab)
    }
}

/// Parse a frontmatter date written as `YYYY-MM-DD` or RFC 3339.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn puzzle(title: &str) -> Puzzle {
        Puzzle {
            slug: "two-sum".to_string(),
            title: title.to_string(),
            description: String::new(),
            starter_code: None,
            starter_code_language: None,
            image: None,
            content: String::new(),
        }
    }

    #[test]
    fn puzzle_defaults() {
        let p = puzzle("Two Sum");

        assert_eq!(p.starter_code_or_default(), "// Write your solution here");
        assert_eq!(p.language_or_default(), "typescript");
    }

    #[test]
    fn puzzle_overrides_defaults() {
        let mut p = puzzle("Two Sum");
        p.starter_code = Some("fn main() {}".to_string());
        p.starter_code_language = Some("rust".to_string());

        assert_eq!(p.starter_code_or_default(), "fn main() {}");
        assert_eq!(p.language_or_default(), "rust");
    }

    #[test]
    fn storage_key_is_kebab_cased_title() {
        assert_eq!(
            puzzle("Longest  Palindromic Substring").storage_key(),
            "puzzle-solution-longest-palindromic-substring"
        );
    }

    #[test]
    fn parses_both_date_forms() {
        assert_eq!(
            parse_date("2025-03-10"),
            NaiveDate::from_ymd_opt(2025, 3, 10)
        );
        assert_eq!(
            parse_date("2025-03-10T09:30:00Z"),
            NaiveDate::from_ymd_opt(2025, 3, 10)
        );
        assert_eq!(parse_date("last week"), None);
        assert_eq!(parse_date(""), None);
    }
}
