//! Registry preview command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use vreg_server::{RegistryServer, ServerConfig};

use super::build::resolve_config;

/// Run the serve command.
pub async fn run(config_path: &Path, port: u16, dir: Option<PathBuf>, open: bool) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => resolve_config(config_path, None)?.output_dir,
    };

    let config = ServerConfig {
        dir,
        port,
        open,
        ..Default::default()
    };

    RegistryServer::new(config).start().await?;

    Ok(())
}
