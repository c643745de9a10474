//! Development server command.

use anyhow::Result;
use puzzlebox_server::{DevServer, DevServerConfig};

use crate::config::ConfigFile;

/// Run the dev server.
pub async fn run(config: ConfigFile, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let server_config = DevServerConfig {
        content_dir: config.content.dir,
        public_dir: config.build.public,
        port,
        open,
        site: config.site,
        ..Default::default()
    };

    DevServer::new(server_config).start().await?;

    Ok(())
}
