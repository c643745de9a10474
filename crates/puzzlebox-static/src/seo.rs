//! Page metadata for search engines and social previews.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Open Graph image dimensions.
pub const IMAGE_WIDTH: u32 = 1200;
pub const IMAGE_HEIGHT: u32 = 630;

/// Maximum length of an extracted description, in characters.
pub const DESCRIPTION_LIMIT: usize = 160;

/// Site-wide metadata, read from the `[site]` table of `site.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Title of the home page
    pub title: String,

    /// Suffix appended to page titles: `<page> | <brand>`
    pub brand: String,

    pub description: String,

    /// Absolute origin used for canonical URLs, without a trailing slash
    pub base_url: String,

    pub site_name: String,

    /// Default social preview image
    pub image: String,

    /// Repository link shown in the header
    pub github: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Slash Engineering | Puzzles".to_string(),
            brand: "Slash Engineering".to_string(),
            description: "Explore Slash's engineering blog and coding puzzles where we share our technical insights and interesting challenges.".to_string(),
            base_url: "https://puzzles.slash.com".to_string(),
            site_name: "Slash | Puzzles".to_string(),
            image: "/og-image.png".to_string(),
            github: Some("https://github.com/slashfi/puzzles".to_string()),
        }
    }
}

impl SiteConfig {
    /// Canonical URL of a site-relative path.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// `<title> | <brand>`
    pub fn page_title(&self, title: &str) -> String {
        format!("{} | {}", title, self.brand)
    }
}

/// Social preview image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageMeta {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

/// Everything rendered into a page's `<head>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub url: String,
    /// Open Graph type: `website` or `article`
    pub og_type: &'static str,
    pub locale: &'static str,
    pub site_name: String,
    pub image: ImageMeta,
    pub twitter_card: &'static str,
    pub published_time: Option<String>,
    pub authors: Vec<String>,
}

impl PageMeta {
    /// Metadata of a regular page. `None` fields fall back to the site defaults.
    pub fn base(
        site: &SiteConfig,
        title: Option<&str>,
        description: Option<&str>,
        path: &str,
    ) -> Self {
        let title = title.unwrap_or(&site.title).to_string();

        Self {
            description: description.unwrap_or(&site.description).to_string(),
            url: site.url(path),
            og_type: "website",
            locale: "en_US",
            site_name: site.site_name.clone(),
            image: ImageMeta {
                url: site.image.clone(),
                width: IMAGE_WIDTH,
                height: IMAGE_HEIGHT,
                alt: title.clone(),
            },
            twitter_card: "summary_large_image",
            published_time: None,
            authors: Vec::new(),
            title,
        }
    }

    /// Metadata of a blog post or puzzle.
    pub fn article(
        site: &SiteConfig,
        title: &str,
        description: &str,
        path: &str,
        published_time: Option<&str>,
        authors: Vec<String>,
    ) -> Self {
        Self {
            og_type: "article",
            published_time: published_time
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            authors,
            ..Self::base(site, Some(title), Some(description), path)
        }
    }

    /// Metadata for a slug that has no content, e.g. `"Blog Post"`.
    pub fn not_found(site: &SiteConfig, kind: &str, path: &str) -> Self {
        let title = site.page_title(&format!("{} Not Found", kind));
        let description = format!(
            "The requested {} could not be found.",
            kind.to_lowercase()
        );
        Self::base(site, Some(&title), Some(&description), path)
    }
}

/// Pick a description for a content page.
///
/// A non-empty excerpt is used as written. Otherwise the first `<p>` or the
/// first line followed by a blank line is taken, then the title/author
/// fallback, then a site default. Tags are stripped from extracted text and
/// it is cut to [`DESCRIPTION_LIMIT`] characters.
pub fn extract_description(
    site: &SiteConfig,
    content: &str,
    excerpt: Option<&str>,
    fallback_title: Option<&str>,
    fallback_author: Option<&str>,
) -> String {
    static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)<p>(.*?)</p>|^(.*?)(?:\n\n|\n$)").expect("Invalid paragraph regex")
    });
    static TAG: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("Invalid tag regex"));

    if let Some(excerpt) = excerpt.filter(|e| !e.is_empty()) {
        return excerpt.to_string();
    }

    let extracted = match PARAGRAPH.captures(content) {
        Some(caps) => caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        None => match (fallback_title, fallback_author) {
            (Some(title), Some(author)) if !title.is_empty() && !author.is_empty() => {
                format!("Read {} by {} on Puzzles", title, author)
            }
            _ => format!("Read more on {} Puzzles", site.brand),
        },
    };

    TAG.replace_all(&extracted, "")
        .chars()
        .take(DESCRIPTION_LIMIT)
        .collect()
}
