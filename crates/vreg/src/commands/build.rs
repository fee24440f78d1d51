//! Registry build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use vreg_registry::{config_root, BuildConfig, RegistryBuilder, RegistryConfig};

/// Resolve the build configuration from the config file and CLI overrides.
pub fn resolve_config(config_path: &Path, output: Option<PathBuf>) -> Result<BuildConfig> {
    let file_config = RegistryConfig::load(config_path)?;

    let mut config = file_config.build_config(config_root(config_path));
    if let Some(output) = output {
        config.output_dir = output;
    }

    Ok(config)
}

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building registry...");

    let config = resolve_config(config_path, output)?;
    let result = RegistryBuilder::new(config).build()?;

    tracing::info!(
        "Built {} items with {} files in {}ms",
        result.items,
        result.files,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn resolves_relative_to_config_file() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("registry.toml");
        fs::write(
            &config_path,
            "[registry]\noutput = \"dist/r\"\n\n[[components]]\nname = \"badge\"\nfiles = [\"Badge.vue\"]\n",
        )
        .unwrap();

        let config = resolve_config(&config_path, None).unwrap();

        assert_eq!(config.output_dir, temp.path().join("dist/r"));
        assert_eq!(config.components_dir, temp.path().join("app/components/ui"));
        assert_eq!(config.components.len(), 1);
    }

    #[test]
    fn output_flag_wins() {
        let temp = tempdir().unwrap();

        let config =
            resolve_config(&temp.path().join("registry.toml"), Some(PathBuf::from("out"))).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[tokio::test]
    async fn fails_when_a_source_is_missing() {
        let temp = tempdir().unwrap();

        let err = run(&temp.path().join("registry.toml"), None)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("WheelPicker.vue"));
        assert!(err.to_string().contains("wheel-picker"));
    }
}
