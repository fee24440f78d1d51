//! Registry configuration (`registry.toml`).

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::builder::BuildConfig;
use crate::index::INDEX_FILE;
use crate::manifest::MANIFEST_NAME;

/// Definition of one component to bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Component identifier, also its directory and output file name
    pub name: String,

    /// Npm packages the component needs
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Source files, relative to the component directory
    pub files: Vec<String>,

    /// Npm packages needed only at build time
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dev_dependencies: Vec<String>,

    /// Other registry items this one builds on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry_dependencies: Vec<String>,

    /// Explicit `index.ts` content, replacing the derived one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

impl ComponentSpec {
    /// Create a spec with no optional fields.
    pub fn new(name: &str, dependencies: &[&str], files: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            dependencies: dependencies.iter().map(|s| s.to_string()).collect(),
            files: files.iter().map(|s| s.to_string()).collect(),
            dev_dependencies: Vec::new(),
            registry_dependencies: Vec::new(),
            index: None,
        }
    }
}

/// The `[registry]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Registry name, used in the manifest
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// Directory holding one subdirectory per component
    #[serde(default = "default_components_dir")]
    pub components_dir: PathBuf,

    /// Directory the item JSON files are written to
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Also write a `registry.json` listing every item
    #[serde(default)]
    pub manifest: bool,
}

fn default_name() -> String {
    "enzoui".to_string()
}
fn default_components_dir() -> PathBuf {
    PathBuf::from("app/components/ui")
}
fn default_output() -> PathBuf {
    PathBuf::from("public/registry")
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            name: default_name(),
            homepage: None,
            components_dir: default_components_dir(),
            output: default_output(),
            manifest: false,
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub registry: RegistrySettings,

    #[serde(default)]
    pub components: Vec<ComponentSpec>,
}

impl Default for RegistryConfig {
    /// The built-in component list used when no config file exists.
    fn default() -> Self {
        Self {
            registry: RegistrySettings::default(),
            components: vec![
                ComponentSpec::new(
                    "wheel-picker",
                    &["@vueuse/core"],
                    &["WheelPicker.vue", "WheelPickerWrapper.vue"],
                ),
                ComponentSpec::new(
                    "ambient-grid",
                    &["clsx", "tailwind-merge"],
                    &["AmbientGrid.vue"],
                ),
            ],
        }
    }
}

/// Path reported for configuration parsed from a string.
const INLINE_SOURCE: &str = "<inline>";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl RegistryConfig {
    /// Load configuration from `path`, falling back to the built-in defaults
    /// when the file does not exist. The result is validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            tracing::info!("Loaded config from {}", path.display());
            config
        } else {
            tracing::debug!(
                "{} not found, using built-in component list",
                path.display()
            );
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text without validating it.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from(INLINE_SOURCE),
            message: e.to_string(),
        })
    }

    /// Render as TOML, as written by `init`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Check names and file lists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.components.is_empty() {
            return Err(ConfigError::Invalid("no components configured".to_string()));
        }

        let mut seen = HashSet::new();

        for spec in &self.components {
            validate_name(&spec.name)?;

            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate component name '{}'",
                    spec.name
                )));
            }

            if self.registry.manifest && spec.name == MANIFEST_NAME {
                return Err(ConfigError::Invalid(format!(
                    "component name '{}' is reserved for the registry manifest",
                    MANIFEST_NAME
                )));
            }

            if spec.files.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "component '{}' lists no files",
                    spec.name
                )));
            }

            for file in &spec.files {
                validate_file(&spec.name, file)?;
            }
        }

        Ok(())
    }

    /// Resolve paths against `root` (the directory holding the config file).
    pub fn build_config(&self, root: &Path) -> BuildConfig {
        BuildConfig {
            components_dir: root.join(&self.registry.components_dir),
            output_dir: root.join(&self.registry.output),
            manifest: self.registry.manifest,
            name: self.registry.name.clone(),
            homepage: self.registry.homepage.clone(),
            components: self.components.clone(),
        }
    }
}

/// Directory that relative paths in a config file are resolved against.
pub fn config_root(config_path: &Path) -> &Path {
    config_path.parent().unwrap_or(Path::new(""))
}

fn validate_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Invalid("component name is empty".to_string()));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ConfigError::Invalid(format!(
            "component name '{}' must be a single path segment",
            name
        )));
    }
    Ok(())
}

fn validate_file(component: &str, file: &str) -> Result<(), ConfigError> {
    let path = Path::new(file);
    let relative = !file.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

    if !relative {
        return Err(ConfigError::Invalid(format!(
            "file '{}' of component '{}' must be a relative path inside the component directory",
            file, component
        )));
    }

    if file == INDEX_FILE {
        return Err(ConfigError::Invalid(format!(
            "component '{}' lists {}, which is generated",
            component, INDEX_FILE
        )));
    }

    Ok(())
}
