//! Static site generator for the puzzles site.
//!
//! Renders blog posts, puzzles and the home page from MDX content, with the
//! theme stylesheet, SEO metadata and the video scrubber runtime.

pub mod assets;
pub mod builder;
pub mod pages;
pub mod render;
pub mod seo;
pub mod templates;
pub mod theme;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use pages::{Missing, RenderError, SiteRenderer};
pub use seo::{extract_description, PageMeta, SiteConfig};
pub use templates::TemplateEngine;
