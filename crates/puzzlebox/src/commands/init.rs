//! Scaffold a new puzzles site.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Run the init command in the current directory.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing puzzlebox...");

    let created = scaffold(Path::new("."), config_path, yes)?;
    if created.is_empty() {
        tracing::warn!("Nothing to create. Use --yes to overwrite existing files.");
        return Ok(());
    }

    for path in &created {
        tracing::info!("Created {}", path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'puzzlebox dev' to start the development server.");

    Ok(())
}

/// Write the config and sample content under `root`.
///
/// Existing files are kept unless `overwrite` is set. Returns the files written.
pub fn scaffold(root: &Path, config_path: &Path, overwrite: bool) -> Result<Vec<PathBuf>> {
    let files = [
        (config_path.to_path_buf(), DEFAULT_CONFIG),
        (PathBuf::from("content/blog/hello-world.mdx"), DEFAULT_POST),
        (PathBuf::from("content/puzzles/two-sum.mdx"), DEFAULT_PUZZLE),
    ];

    fs::create_dir_all(root.join("public")).context("Failed to create public directory")?;

    let mut created = Vec::new();
    for (relative, contents) in files {
        let path = root.join(&relative);
        if path.exists() && !overwrite {
            tracing::debug!("Keeping existing {}", path.display());
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        created.push(relative);
    }

    Ok(created)
}

pub const DEFAULT_CONFIG: &str = r#"# puzzlebox configuration

[site]
title = "Slash Engineering | Puzzles"
brand = "Slash Engineering"
description = "Explore Slash's engineering blog and coding puzzles where we share our technical insights and interesting challenges."
base_url = "https://puzzles.slash.com"
site_name = "Slash | Puzzles"
image = "/og-image.png"
github = "https://github.com/slashfi/puzzles"

[content]
# Holds blog/ and puzzles/
dir = "content"

[build]
output = "dist"
minify = true
# Copied verbatim into the output
public = "public"
"#;

const DEFAULT_POST: &str = r#"---
title: Hello, World
date: "2025-01-15"
author: Slash Engineering
excerpt: Why we started writing about the problems we solve every day.
---

Welcome to the engineering blog. We write about the systems behind the product.

## What to expect

Deep dives, postmortems and the occasional puzzle.

<Video src="/videos/demo.mp4" />

```typescript {2}
function greet(name: string) {
  return `Hello, ${name}!`;
}
```

<Button href="/puzzles/two-sum/">Try a puzzle</Button>
"#;

const DEFAULT_PUZZLE: &str = r#"---
title: Two Sum
description: Find two numbers in an array that add up to a target.
starter_code: |
  function twoSum(nums: number[], target: number): [number, number] {
    // Write your solution here
  }
starter_code_language: typescript
---

Given an array of integers `nums` and an integer `target`, return the indices
of the two numbers that add up to `target`.

<Badge>Easy</Badge>

## Example

```text
nums = [2, 7, 11, 15], target = 9
=> [0, 1]
```
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn scaffolds_config_and_content() {
        let dir = TempDir::new().unwrap();

        let created = scaffold(dir.path(), Path::new("site.toml"), false).unwrap();

        assert_eq!(created.len(), 3);
        assert!(dir.path().join("site.toml").exists());
        assert!(dir.path().join("content/blog/hello-world.mdx").exists());
        assert!(dir.path().join("content/puzzles/two-sum.mdx").exists());
        assert!(dir.path().join("public").is_dir());
    }

    #[test]
    fn keeps_existing_files_unless_overwriting() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("site.toml"), "# mine").unwrap();

        let created = scaffold(dir.path(), Path::new("site.toml"), false).unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("site.toml")).unwrap(),
            "# mine"
        );

        let created = scaffold(dir.path(), Path::new("site.toml"), true).unwrap();
        assert_eq!(created.len(), 3);
        assert_eq!(
            fs::read_to_string(dir.path().join("site.toml")).unwrap(),
            DEFAULT_CONFIG
        );
    }
}
