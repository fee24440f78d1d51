//! Development mode command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use vreg_server::{DevServer, DevServerConfig, ServerConfig};

/// Run the dev command.
pub async fn run(config_path: &Path, port: u16, output: Option<PathBuf>, open: bool) -> Result<()> {
    tracing::info!("Starting registry dev server on port {}", port);

    let config = DevServerConfig {
        config_path: config_path.to_path_buf(),
        output,
        server: ServerConfig {
            port,
            open,
            ..Default::default()
        },
    };

    DevServer::new(config).start().await?;

    Ok(())
}
