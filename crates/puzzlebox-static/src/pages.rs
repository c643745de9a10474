//! Page rendering shared by the static builder and the dev server.

use minijinja::{context, Value};
use serde::Serialize;

use puzzlebox_content::{ContentError, ContentLibrary, Post, Puzzle};

use crate::render::render_body;
use crate::seo::{extract_description, PageMeta, SiteConfig};
use crate::templates::TemplateEngine;

/// Card image for posts without their own.
pub const DEFAULT_BLOG_IMAGE: &str = "/globe.svg";

/// Card image for puzzles without their own.
pub const DEFAULT_PUZZLE_IMAGE: &str = "/file.svg";

/// Errors that can occur while rendering a page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to encode editor config: {0}")]
    EditorConfig(#[from] serde_json::Error),
}

/// What a not-found page is standing in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Page,
    BlogPost,
    Puzzle,
}

impl Missing {
    fn label(self) -> &'static str {
        match self {
            Self::Page => "Page",
            Self::BlogPost => "Blog Post",
            Self::Puzzle => "Puzzle",
        }
    }
}

/// A card in the home page grid.
#[derive(Debug, Clone, Serialize)]
struct CardView<'a> {
    kind: &'static str,
    href: String,
    badge: &'static str,
    image: &'a str,
    title: &'a str,
    date: Option<&'a str>,
    author: Option<&'a str>,
    description: &'a str,
    action: &'static str,
}

impl<'a> CardView<'a> {
    fn post(post: &'a Post) -> Self {
        Self {
            kind: "blog",
            href: format!("/blog/{}/", post.slug),
            badge: "Blog Post",
            image: post.image.as_deref().unwrap_or(DEFAULT_BLOG_IMAGE),
            title: &post.title,
            date: Some(&post.date).filter(|d| !d.is_empty()).map(String::as_str),
            author: Some(&post.author).filter(|a| !a.is_empty()).map(String::as_str),
            description: "",
            action: "Read more →",
        }
    }

    fn puzzle(puzzle: &'a Puzzle) -> Self {
        Self {
            kind: "puzzle",
            href: format!("/puzzles/{}/", puzzle.slug),
            badge: "Puzzle",
            image: puzzle.image.as_deref().unwrap_or(DEFAULT_PUZZLE_IMAGE),
            title: &puzzle.title,
            date: None,
            author: None,
            description: &puzzle.description,
            action: "View puzzle →",
        }
    }
}

/// Configuration handed to the browser code editor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditorConfig<'a> {
    default_value: &'a str,
    language: &'a str,
    height: &'static str,
    theme: &'static str,
    storage_key: String,
    options: serde_json::Value,
}

impl<'a> EditorConfig<'a> {
    fn for_puzzle(puzzle: &'a Puzzle) -> Self {
        Self {
            default_value: puzzle.starter_code_or_default(),
            language: puzzle.language_or_default(),
            height: "100%",
            theme: "light",
            storage_key: puzzle.storage_key(),
            options: serde_json::json!({
                "minimap": { "enabled": true, "scale": 10, "showSlider": "mouseover" },
                "fontSize": 14,
                "fontFamily": "'Fira Code', 'Consolas', monospace",
                "fontLigatures": true,
                "scrollBeyondLastLine": false,
                "automaticLayout": true,
                "tabSize": 2,
                "wordWrap": "on",
                "lineNumbers": "on",
                "folding": true,
                "smoothScrolling": true,
                "padding": { "top": 16, "bottom": 16 },
            }),
        }
    }

    /// JSON safe to embed inside a `<script>` element.
    fn to_script_json(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

/// Renders every page of the site from a content library.
pub struct SiteRenderer {
    site: SiteConfig,
    library: ContentLibrary,
    templates: TemplateEngine,
    hmr: bool,
}

impl SiteRenderer {
    pub fn new(site: SiteConfig, library: ContentLibrary) -> Self {
        Self {
            site,
            library,
            templates: TemplateEngine::new(),
            hmr: false,
        }
    }

    /// Include the live reload client on every page.
    pub fn with_hmr(mut self, hmr: bool) -> Self {
        self.hmr = hmr;
        self
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn library(&self) -> &ContentLibrary {
        &self.library
    }

    /// The home page: hero and a grid of all posts followed by all puzzles.
    pub fn render_home(&self) -> Result<String, RenderError> {
        let posts = self.library.all_blog_posts()?;
        let puzzles = self.library.all_puzzles()?;

        let cards: Vec<CardView<'_>> = posts
            .iter()
            .map(CardView::post)
            .chain(puzzles.iter().map(CardView::puzzle))
            .collect();

        let meta = PageMeta::base(&self.site, None, None, "");

        Ok(self.templates.render(
            "home.html",
            context! { meta => meta, site => &self.site, hmr => self.hmr, cards => cards },
        )?)
    }

    /// A blog post page, or `None` if no post has this slug.
    pub fn render_blog_post(&self, slug: &str) -> Result<Option<String>, RenderError> {
        let Some(post) = self.library.blog_post(slug)? else {
            return Ok(None);
        };

        self.blog_post_page(&post).map(Some)
    }

    pub fn blog_post_page(&self, post: &Post) -> Result<String, RenderError> {
        let body = render_body(&self.templates, &post.content)?;

        let description = extract_description(
            &self.site,
            &post.content,
            Some(&post.excerpt),
            Some(&post.title),
            Some(&post.author),
        );
        let meta = PageMeta::article(
            &self.site,
            &self.site.page_title(&post.title),
            &description,
            &format!("blog/{}", post.slug),
            Some(&post.date),
            vec![post.author.clone()],
        );

        Ok(self.templates.render(
            "blog.html",
            context! {
                meta => meta,
                site => &self.site,
                hmr => self.hmr,
                post => context! { title => &post.title, date => &post.date, author => &post.author },
                content => Value::from_safe_string(body.html),
                toc => body.toc.iter().map(|e| context! { title => &e.title, id => &e.id, level => e.level }).collect::<Vec<_>>(),
            },
        )?)
    }

    /// A puzzle page, or `None` if no puzzle has this slug.
    pub fn render_puzzle(&self, slug: &str) -> Result<Option<String>, RenderError> {
        let Some(puzzle) = self.library.puzzle(slug)? else {
            return Ok(None);
        };

        self.puzzle_page(&puzzle).map(Some)
    }

    pub fn puzzle_page(&self, puzzle: &Puzzle) -> Result<String, RenderError> {
        let body = render_body(&self.templates, &puzzle.content)?;
        let editor_config = EditorConfig::for_puzzle(puzzle).to_script_json()?;

        let meta = PageMeta::article(
            &self.site,
            &self.site.page_title(&puzzle.title),
            &puzzle.description,
            &format!("puzzles/{}", puzzle.slug),
            None,
            Vec::new(),
        );

        Ok(self.templates.render(
            "puzzle.html",
            context! {
                meta => meta,
                site => &self.site,
                hmr => self.hmr,
                wide => true,
                puzzle => context! { title => &puzzle.title, description => &puzzle.description },
                content => Value::from_safe_string(body.html),
                editor_config => Value::from_safe_string(editor_config),
            },
        )?)
    }

    /// The not-found page shown for `path`.
    pub fn render_not_found(&self, missing: Missing, path: &str) -> Result<String, RenderError> {
        let meta = PageMeta::not_found(&self.site, missing.label(), path);
        let message = meta.description.clone();

        Ok(self.templates.render(
            "404.html",
            context! { meta => meta, site => &self.site, hmr => self.hmr, message => message },
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn renderer() -> (TempDir, SiteRenderer) {
        let dir = TempDir::new().unwrap();
        let blog = dir.path().join("blog");
        let puzzles = dir.path().join("puzzles");
        fs::create_dir_all(&blog).unwrap();
        fs::create_dir_all(&puzzles).unwrap();

        fs::write(
            blog.join("ledgers.mdx"),
            "---\ntitle: Ledgers\ndate: \"2025-03-10\"\nauthor: Ada\n---\n\nWe keep balances honest.\n\n## Double entry\n\nEvery debit has a credit.\n",
        )
        .unwrap();
        fs::write(
            puzzles.join("two-sum.mdx"),
            "---\ntitle: Two Sum\ndescription: Find the pair.\n---\n\nReturn the indices.\n",
        )
        .unwrap();

        let renderer = SiteRenderer::new(SiteConfig::default(), ContentLibrary::new(dir.path()));
        (dir, renderer)
    }

    #[test]
    fn home_lists_posts_then_puzzles() {
        let (_dir, renderer) = renderer();

        let html = renderer.render_home().unwrap();

        let blog = html.find("content-card-blog").unwrap();
        let puzzle = html.find("content-card-puzzle").unwrap();
        assert!(blog < puzzle);
        assert!(html.contains("globe.svg"));
        assert!(html.contains("file.svg"));
        assert!(html.contains("View puzzle →"));
        assert!(html.contains("<title>Slash Engineering | Puzzles</title>"));
    }

    #[test]
    fn blog_post_page_has_article_metadata() {
        let (_dir, renderer) = renderer();

        let html = renderer.render_blog_post("ledgers").unwrap().unwrap();

        assert!(html.contains("<title>Ledgers | Slash Engineering</title>"));
        assert!(html.contains("content=\"article\""));
        assert!(html.contains("content=\"We keep balances honest.\""));
        assert!(html.contains("2025-03-10 • Ada"));
        assert!(html.contains("<h2 id=\"double-entry\">"));
        assert!(!html.contains("On this page"));
    }

    #[test]
    fn puzzle_page_embeds_editor_config() {
        let (_dir, renderer) = renderer();

        let html = renderer.render_puzzle("two-sum").unwrap().unwrap();

        assert!(html.contains("\"storageKey\":\"puzzle-solution-two-sum\""));
        assert!(html.contains("\"defaultValue\":\"// Write your solution here\""));
        assert!(html.contains("\"language\":\"typescript\""));
        assert!(html.contains("Find the pair."));
        assert!(html.contains("<p>Return the indices.</p>"));
    }

    #[test]
    fn unknown_slugs_render_nothing() {
        let (_dir, renderer) = renderer();

        assert!(renderer.render_blog_post("missing").unwrap().is_none());
        assert!(renderer.render_puzzle("../blog/ledgers").unwrap().is_none());
    }

    #[test]
    fn not_found_page() {
        let (_dir, renderer) = renderer();

        let html = renderer
            .render_not_found(Missing::Puzzle, "puzzles/missing")
            .unwrap();

        assert!(html.contains("<title>Puzzle Not Found | Slash Engineering</title>"));
        assert!(html.contains("The requested puzzle could not be found."));
    }

    #[test]
    fn editor_config_cannot_close_script() {
        let puzzle = Puzzle {
            slug: "x".to_string(),
            title: "X".to_string(),
            description: String::new(),
            starter_code: Some("</script>".to_string()),
            starter_code_language: None,
            image: None,
            content: String::new(),
        };

        let json = EditorConfig::for_puzzle(&puzzle).to_script_json().unwrap();

        assert!(!json.contains("</script>"));
    }
}
