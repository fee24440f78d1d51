//! Development mode: serve the registry and rebuild it on change.

use std::path::PathBuf;
use std::time::Duration;

use vreg_registry::{config_root, BuildConfig, ConfigError, RegistryBuilder, RegistryConfig};

use crate::server::{serve, ServerConfig, ServerError};
use crate::watcher::FileWatcher;

/// Time to let an editor finish writing before rebuilding.
const SETTLE_DELAY: Duration = Duration::from_millis(150);

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Path to registry.toml (may not exist)
    pub config_path: PathBuf,

    /// Output directory overriding the config file
    pub output: Option<PathBuf>,

    /// Host, port and browser settings; `dir` is taken from the build config
    pub server: ServerConfig,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("registry.toml"),
            output: None,
            server: ServerConfig::default(),
        }
    }
}

/// Load and resolve the build configuration for a dev session.
pub fn load_build_config(config: &DevServerConfig) -> Result<BuildConfig, ConfigError> {
    let file = RegistryConfig::load(&config.config_path)?;
    let mut build = file.build_config(config_root(&config.config_path));
    if let Some(output) = &config.output {
        build.output_dir = output.clone();
    }
    Ok(build)
}

/// Build on a blocking thread and log the outcome. Failures are not fatal in
/// dev mode.
pub async fn rebuild(config: BuildConfig) -> bool {
    let result = tokio::task::spawn_blocking(move || RegistryBuilder::new(config).build()).await;

    match result {
        Ok(Ok(result)) => {
            tracing::info!(
                "Built {} items ({} files) in {}ms",
                result.items,
                result.files,
                result.duration_ms
            );
            true
        }
        Ok(Err(e)) => {
            tracing::error!("Build failed: {}", e);
            false
        }
        Err(e) => {
            tracing::error!("Build task failed: {}", e);
            false
        }
    }
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Build, then serve the output while watching for changes.
    pub async fn start(self) -> Result<(), ServerError> {
        let build = load_build_config(&self.config)
            .map_err(|e| ServerError::ConfigError(e.to_string()))?;

        rebuild(build.clone()).await;

        let (watcher, mut rx) = FileWatcher::new(
            std::slice::from_ref(&build.components_dir),
            &self.config.config_path,
        )
        .map_err(|e| ServerError::WatchError(e.to_string()))?;

        tracing::info!(
            "Watching {} and {}",
            build.components_dir.display(),
            self.config.config_path.display()
        );

        let dev_config = self.config.clone();
        let mut current = build.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                tokio::time::sleep(SETTLE_DELAY).await;

                let mut config_changed = event.is_config();
                while let Ok(next) = rx.try_recv() {
                    config_changed |= next.is_config();
                }

                if config_changed {
                    tracing::info!("Config changed, reloading {}", dev_config.config_path.display());
                    match load_build_config(&dev_config) {
                        Ok(build) => current = build,
                        Err(e) => {
                            tracing::error!("Failed to reload config: {}", e);
                            continue;
                        }
                    }
                } else {
                    tracing::info!("Source changed: {}", event.path().display());
                }

                rebuild(current.clone()).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let server = ServerConfig {
            dir: build.output_dir,
            ..self.config.server
        };

        serve(&server).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn output_flag_overrides_config() {
        let temp = tempdir().unwrap();
        let config = DevServerConfig {
            config_path: temp.path().join("registry.toml"),
            output: Some(temp.path().join("dist")),
            ..Default::default()
        };

        let build = load_build_config(&config).unwrap();

        assert_eq!(build.output_dir, temp.path().join("dist"));
        assert_eq!(build.components_dir, temp.path().join("app/components/ui"));
    }

    #[tokio::test]
    async fn rebuild_reports_failure_without_panicking() {
        let temp = tempdir().unwrap();
        let config = DevServerConfig {
            config_path: temp.path().join("registry.toml"),
            ..Default::default()
        };

        let ok = rebuild(load_build_config(&config).unwrap()).await;

        assert!(!ok);
    }

    #[tokio::test]
    async fn rebuild_writes_items() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("registry.toml"),
            "[registry]\ncomponents_dir = \"ui\"\noutput = \"out\"\n\n[[components]]\nname = \"badge\"\nfiles = [\"Badge.vue\"]\n",
        )
        .unwrap();
        fs::create_dir_all(temp.path().join("ui/badge")).unwrap();
        fs::write(temp.path().join("ui/badge/Badge.vue"), "<template />").unwrap();

        let config = DevServerConfig {
            config_path: temp.path().join("registry.toml"),
            ..Default::default()
        };

        let ok = rebuild(load_build_config(&config).unwrap()).await;

        assert!(ok);
        assert!(temp.path().join("out/badge.json").exists());
    }
}
