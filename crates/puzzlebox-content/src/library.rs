//! Content library over a `blog/` and `puzzles/` directory of MDX files.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::frontmatter::{FrontmatterError, PostFrontmatter, PuzzleFrontmatter};
use crate::model::{Post, Puzzle};
use crate::parser::{parse_mdx, ParseError};

/// Errors that can occur when loading content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },

    #[error("Missing frontmatter in {0}")]
    MissingFrontmatter(PathBuf),
}

/// Read access to the site's blog posts and puzzles.
#[derive(Debug, Clone)]
pub struct ContentLibrary {
    root: PathBuf,
}

impl ContentLibrary {
    /// Library rooted at a directory containing `blog/` and `puzzles/`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blog_dir(&self) -> PathBuf {
        self.root.join("blog")
    }

    pub fn puzzles_dir(&self) -> PathBuf {
        self.root.join("puzzles")
    }

    /// Slugs of all blog posts, sorted.
    pub fn blog_slugs(&self) -> Result<Vec<String>, ContentError> {
        list_slugs(&self.blog_dir())
    }

    /// Slugs of all puzzles, sorted.
    pub fn puzzle_slugs(&self) -> Result<Vec<String>, ContentError> {
        list_slugs(&self.puzzles_dir())
    }

    /// Load one blog post. `Ok(None)` when no post has this slug.
    pub fn blog_post(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        let Some((path, source)) = read_entry(&self.blog_dir(), slug)? else {
            return Ok(None);
        };

        let (frontmatter, body) = parse_entry::<PostFrontmatter>(&path, &source)?;

        Ok(Some(Post {
            slug: slug.to_string(),
            title: frontmatter.title,
            date: frontmatter.date,
            author: frontmatter.author,
            excerpt: frontmatter.excerpt.unwrap_or_default(),
            image: frontmatter.image,
            content: body,
        }))
    }

    /// Load one puzzle. `Ok(None)` when no puzzle has this slug.
    pub fn puzzle(&self, slug: &str) -> Result<Option<Puzzle>, ContentError> {
        let Some((path, source)) = read_entry(&self.puzzles_dir(), slug)? else {
            return Ok(None);
        };

        let (frontmatter, body) = parse_entry::<PuzzleFrontmatter>(&path, &source)?;

        Ok(Some(Puzzle {
            slug: slug.to_string(),
            title: frontmatter.title,
            description: frontmatter.description,
            starter_code: frontmatter.starter_code,
            starter_code_language: frontmatter.starter_code_language,
            image: frontmatter.image,
            content: body,
        }))
    }

    /// All blog posts, newest first. Posts that fail to load are skipped.
    pub fn all_blog_posts(&self) -> Result<Vec<Post>, ContentError> {
        let mut posts: Vec<Post> = self
            .blog_slugs()?
            .iter()
            .filter_map(|slug| match self.blog_post(slug) {
                Ok(post) => post,
                Err(e) => {
                    tracing::warn!("Skipping blog post {}: {}", slug, e);
                    None
                }
            })
            .collect();

        // Undated posts go last; the sort is stable so ties keep slug order
        posts.sort_by(|a, b| match (a.published(), b.published()) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Ok(posts)
    }

    /// All puzzles in slug order. Puzzles that fail to load are skipped.
    pub fn all_puzzles(&self) -> Result<Vec<Puzzle>, ContentError> {
        Ok(self
            .puzzle_slugs()?
            .iter()
            .filter_map(|slug| match self.puzzle(slug) {
                Ok(puzzle) => puzzle,
                Err(e) => {
                    tracing::warn!("Skipping puzzle {}: {}", slug, e);
                    None
                }
            })
            .collect())
    }
}

fn list_slugs(dir: &Path) -> Result<Vec<String>, ContentError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Read {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut slugs: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "mdx"))
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
        .collect();

    slugs.sort();
    Ok(slugs)
}

/// A slug names a single file directly inside its content directory.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.contains(['/', '\\'])
        && !slug.contains("..")
}

fn read_entry(dir: &Path, slug: &str) -> Result<Option<(PathBuf, String)>, ContentError> {
    if !is_valid_slug(slug) {
        return Ok(None);
    }

    let path = dir.join(format!("{}.mdx", slug));
    match std::fs::read_to_string(&path) {
        Ok(source) => Ok(Some((path, source))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ContentError::Read { path, source: e }),
    }
}

fn parse_entry<T: serde::de::DeserializeOwned>(
    path: &Path,
    source: &str,
) -> Result<(T, String), ContentError> {
    let doc = parse_mdx::<T>(source).map_err(|e| match e {
        ParseError::Frontmatter(source) => ContentError::Parse {
            path: path.to_path_buf(),
            source,
        },
    })?;

    tracing::debug!(
        "Parsed {}: {} headings, {} code blocks",
        path.display(),
        doc.toc.len(),
        doc.code_blocks.len()
    );

    let frontmatter = doc
        .frontmatter
        .ok_or_else(|| ContentError::MissingFrontmatter(path.to_path_buf()))?;

    Ok((frontmatter, doc.content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, contents: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn post(title: &str, date: &str) -> String {
        format!(
            "---\ntitle: {}\ndate: \"{}\"\nauthor: Ada\nexcerpt: Notes.\n---\n\n# {}\n",
            title, date, title
        )
    }

    fn library() -> (TempDir, ContentLibrary) {
        let dir = TempDir::new().unwrap();
        let library = ContentLibrary::new(dir.path());
        (dir, library)
    }

    #[test]
    fn lists_sorted_mdx_slugs() {
        let (dir, library) = library();
        write(&dir, "blog/zeta.mdx", &post("Zeta", "2025-01-01"));
        write(&dir, "blog/alpha.mdx", &post("Alpha", "2025-01-02"));
        write(&dir, "blog/notes.txt", "ignored");

        assert_eq!(library.blog_slugs().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn missing_directories_are_empty() {
        let (_dir, library) = library();

        assert!(library.blog_slugs().unwrap().is_empty());
        assert!(library.all_puzzles().unwrap().is_empty());
    }

    #[test]
    fn loads_blog_post() {
        let (dir, library) = library();
        write(&dir, "blog/ledger.mdx", &post("Building a Ledger", "2025-03-10"));

        let post = library.blog_post("ledger").unwrap().unwrap();

        assert_eq!(post.slug, "ledger");
        assert_eq!(post.title, "Building a Ledger");
        assert_eq!(post.author, "Ada");
        assert_eq!(post.excerpt, "Notes.");
        assert!(post.content.starts_with("# Building a Ledger"));
    }

    #[test]
    fn unknown_and_unsafe_slugs_are_absent() {
        let (dir, library) = library();
        write(&dir, "secret.mdx", &post("Secret", "2025-01-01"));

        assert_eq!(library.blog_post("nope").unwrap(), None);
        assert_eq!(library.blog_post("../secret").unwrap(), None);
        assert_eq!(library.puzzle("a/b").unwrap(), None);
        assert_eq!(library.puzzle("").unwrap(), None);
    }

    #[test]
    fn malformed_entry_is_an_error() {
        let (dir, library) = library();
        write(&dir, "puzzles/broken.mdx", "---\ntitle: [oops\n---\n");
        write(&dir, "puzzles/bare.mdx", "# No frontmatter\n");

        assert!(matches!(
            library.puzzle("broken"),
            Err(ContentError::Parse { .. })
        ));
        assert!(matches!(
            library.puzzle("bare"),
            Err(ContentError::MissingFrontmatter(_))
        ));
    }

    #[test]
    fn all_blog_posts_newest_first_and_skips_broken() {
        let (dir, library) = library();
        write(&dir, "blog/old.mdx", &post("Old", "2024-05-01"));
        write(&dir, "blog/new.mdx", &post("New", "2025-02-01T08:00:00Z"));
        write(&dir, "blog/undated.mdx", &post("Undated", "someday"));
        write(&dir, "blog/broken.mdx", "---\ntitle: Broken\n");

        let titles: Vec<_> = library
            .all_blog_posts()
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, vec!["New", "Old", "Undated"]);
    }

    #[test]
    fn loads_puzzles_in_slug_order() {
        let (dir, library) = library();
        write(
            &dir,
            "puzzles/two-sum.mdx",
            "---\ntitle: Two Sum\ndescription: Warm-up\nstarter_code_language: rust\n---\nSolve it.\n",
        );
        write(&dir, "puzzles/fizz-buzz.mdx", "---\ntitle: Fizz Buzz\n---\n");

        let puzzles = library.all_puzzles().unwrap();

        assert_eq!(puzzles.len(), 2);
        assert_eq!(puzzles[0].slug, "fizz-buzz");
        assert_eq!(puzzles[0].language_or_default(), "typescript");
        assert_eq!(puzzles[1].description, "Warm-up");
        assert_eq!(puzzles[1].language_or_default(), "rust");
        assert_eq!(puzzles[1].content.trim(), "Solve it.");
    }
}
