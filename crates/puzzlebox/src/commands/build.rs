//! Static site build command.

use std::path::PathBuf;

use anyhow::Result;
use puzzlebox_static::{BuildConfig, StaticBuilder};

use crate::config::ConfigFile;

fn build_config(config: ConfigFile, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
    BuildConfig {
        content_dir: config.content.dir,
        output_dir: output.unwrap_or(config.build.output),
        public_dir: Some(config.build.public),
        minify: minify.unwrap_or(config.build.minify),
        site: config.site,
    }
}

/// Run the build command.
pub async fn run(config: ConfigFile, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let result = StaticBuilder::new(build_config(config, output, minify))
        .build()
        .await?;

    tracing::info!(
        "Built {} pages ({} posts, {} puzzles) in {}ms",
        result.pages,
        result.posts,
        result.puzzles,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
