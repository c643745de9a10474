//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use puzzlebox_content::{ContentLibrary, Post, Puzzle};

use crate::assets::AssetPipeline;
use crate::pages::{Missing, SiteRenderer};
use crate::seo::SiteConfig;

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Content directory holding `blog/` and `puzzles/`
    pub content_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Static files copied verbatim into the output (images, favicons)
    pub public_dir: Option<PathBuf>,

    /// Minify CSS output
    pub minify: bool,

    /// Site metadata
    pub site: SiteConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("dist"),
            public_dir: Some(PathBuf::from("public")),
            minify: true,
            site: SiteConfig::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of HTML pages generated
    pub pages: usize,

    /// Number of blog posts rendered
    pub posts: usize,

    /// Number of puzzles rendered
    pub puzzles: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read content: {0}")]
    ReadError(String),

    #[error("Failed to render {page}: {message}")]
    RenderError { page: String, message: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A page to be rendered.
#[derive(Debug, Clone, Copy)]
enum PageJob<'a> {
    Home,
    Post(&'a Post),
    Puzzle(&'a Puzzle),
    NotFound,
}

impl PageJob<'_> {
    /// Site-relative URL path, with a trailing slash for directories.
    fn url_path(&self) -> String {
        match self {
            Self::Home => String::new(),
            Self::Post(post) => format!("blog/{}/", post.slug),
            Self::Puzzle(puzzle) => format!("puzzles/{}/", puzzle.slug),
            Self::NotFound => "404.html".to_string(),
        }
    }

    fn output_path(&self, output_dir: &Path) -> PathBuf {
        match self {
            Self::NotFound => output_dir.join("404.html"),
            _ => output_dir.join(self.url_path()).join("index.html"),
        }
    }
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    renderer: SiteRenderer,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let renderer = SiteRenderer::new(
            config.site.clone(),
            ContentLibrary::new(&config.content_dir),
        );

        Self { config, renderer }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        if !self.config.content_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Content directory not found: {}",
                self.config.content_dir.display()
            )));
        }

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let library = self.renderer.library();
        let posts = library
            .all_blog_posts()
            .map_err(|e| BuildError::ReadError(e.to_string()))?;
        let puzzles = library
            .all_puzzles()
            .map_err(|e| BuildError::ReadError(e.to_string()))?;

        let jobs: Vec<PageJob<'_>> = [PageJob::Home, PageJob::NotFound]
            .into_iter()
            .chain(posts.iter().map(PageJob::Post))
            .chain(puzzles.iter().map(PageJob::Puzzle))
            .collect();

        // Render and write pages in parallel
        let results: Vec<Result<(), BuildError>> =
            jobs.par_iter().map(|job| self.build_page(job)).collect();

        for result in results {
            result?;
        }

        self.generate_assets()?;
        self.copy_public()?;
        self.generate_sitemap(&jobs)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: jobs.len(),
            posts: posts.len(),
            puzzles: puzzles.len(),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Render one page and write it to its output path.
    fn build_page(&self, job: &PageJob<'_>) -> Result<(), BuildError> {
        let html = match job {
            PageJob::Home => self.renderer.render_home(),
            PageJob::Post(post) => self.renderer.blog_post_page(post),
            PageJob::Puzzle(puzzle) => self.renderer.puzzle_page(puzzle),
            PageJob::NotFound => self.renderer.render_not_found(Missing::Page, ""),
        }
        .map_err(|e| BuildError::RenderError {
            page: format!("/{}", job.url_path()),
            message: e.to_string(),
        })?;

        let output_path = job.output_path(&self.config.output_dir);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;
        tracing::debug!("Wrote {}", output_path.display());

        Ok(())
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            match AssetPipeline::minify_css(&css) {
                Ok(minified) => minified,
                Err(e) => {
                    tracing::warn!("Writing unminified CSS: {}", e);
                    css
                }
            }
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Copy the public directory into the output.
    fn copy_public(&self) -> Result<(), BuildError> {
        let Some(public_dir) = &self.config.public_dir else {
            return Ok(());
        };
        if !public_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(public_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(public_dir).unwrap_or(path);
            let target = self.config.output_dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
            }
            fs::copy(path, &target).map_err(|e| {
                BuildError::WriteError(format!("{}: {}", target.display(), e))
            })?;
            copied += 1;
        }

        tracing::info!("Copied {} public files from {}", copied, public_dir.display());
        Ok(())
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, jobs: &[PageJob<'_>]) -> Result<(), BuildError> {
        let site = &self.config.site;

        let urls: Vec<String> = jobs
            .iter()
            .filter(|job| !matches!(job, PageJob::NotFound))
            .map(|job| {
                let url = match job.url_path() {
                    path if path.is_empty() => format!("{}/", site.url("")),
                    path => site.url(&path),
                };
                format!("  <url>\n    <loc>{}</loc>\n  </url>", url)
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}",
            site.url("sitemap.xml")
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}
