//! MDX content for the puzzles site.
//!
//! This crate loads blog posts and puzzles from MDX files, extracts YAML
//! frontmatter and code blocks, and recognizes the inline components
//! (`<Video>`, `<Badge>`, `<Button>`, `<Card>`) authors can embed.

pub mod codeblock;
pub mod components;
pub mod frontmatter;
pub mod library;
pub mod model;
pub mod parser;

pub use codeblock::CodeBlock;
pub use components::{split_components, MdxComponent, Preload, Segment, VideoProps};
pub use frontmatter::{FrontmatterError, PostFrontmatter, PuzzleFrontmatter};
pub use library::{ContentError, ContentLibrary};
pub use model::{parse_date, Post, Puzzle, DEFAULT_STARTER_CODE, DEFAULT_STARTER_LANGUAGE};
pub use parser::{markdown_options, parse_mdx, slugify, ParseError, ParsedDoc, TocEntry};
