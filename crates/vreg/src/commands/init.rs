//! Initialize a registry config for a project.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use vreg_registry::{config_root, discover_components, RegistryConfig, RegistrySettings};

const CONFIG_HEADER: &str = "# vreg registry configuration
#
# Each [[components]] entry is bundled into <output>/<name>.json.
# Files are read from <components_dir>/<name>/ in the order listed.
# Set `index` on a component to replace its generated index.ts.

";

/// Run the init command.
pub async fn run(config_path: &Path, components_dir: Option<PathBuf>, yes: bool) -> Result<()> {
    tracing::info!("Initializing vreg...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    let mut registry = RegistrySettings::default();
    if let Some(dir) = components_dir {
        registry.components_dir = dir;
    }

    let scan_dir = config_root(config_path).join(&registry.components_dir);
    let mut components = if scan_dir.is_dir() {
        discover_components(&scan_dir)?
    } else {
        tracing::warn!(
            "{} not found, writing the built-in component list",
            scan_dir.display()
        );
        Vec::new()
    };

    if components.is_empty() {
        components = RegistryConfig::default().components;
    }

    let config = RegistryConfig {
        registry,
        components,
    };
    config.validate()?;

    let content = format!("{}{}", CONFIG_HEADER, config.to_toml()?);
    fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    tracing::info!(
        "Created {} with {} components",
        config_path.display(),
        config.components.len()
    );
    tracing::info!("Run 'vreg build' to generate the registry.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_discovered_components() {
        let temp = tempdir().unwrap();
        let badge = temp.path().join("src/ui/badge");
        fs::create_dir_all(&badge).unwrap();
        fs::write(
            badge.join("Badge.vue"),
            "<script setup>\nimport { cva } from 'class-variance-authority'\n</script>\n",
        )
        .unwrap();
        let config_path = temp.path().join("registry.toml");

        run(&config_path, Some(PathBuf::from("src/ui")), false)
            .await
            .unwrap();

        let config = RegistryConfig::load(&config_path).unwrap();
        assert_eq!(config.registry.components_dir, PathBuf::from("src/ui"));
        assert_eq!(config.components.len(), 1);
        assert_eq!(config.components[0].name, "badge");
        assert_eq!(
            config.components[0].dependencies,
            vec!["class-variance-authority"]
        );
    }

    #[tokio::test]
    async fn falls_back_to_built_in_components() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("registry.toml");

        run(&config_path, None, false).await.unwrap();

        let config = RegistryConfig::load(&config_path).unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[tokio::test]
    async fn keeps_existing_config_without_yes() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("registry.toml");
        fs::write(&config_path, "# mine\n").unwrap();

        run(&config_path, None, false).await.unwrap();

        assert_eq!(fs::read_to_string(&config_path).unwrap(), "# mine\n");
    }
}
