//! Registry builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{ComponentSpec, RegistryConfig};
use crate::index::{generate_index, INDEX_FILE};
use crate::item::{FileEntry, ItemType, RegistryItem};
use crate::manifest::{RegistryManifest, MANIFEST_FILE};

/// Configuration for building a registry.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding one subdirectory per component
    pub components_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Write `registry.json` after all items
    pub manifest: bool,

    /// Registry name
    pub name: String,

    /// Registry homepage
    pub homepage: Option<String>,

    /// Components to bundle, in build order
    pub components: Vec<ComponentSpec>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        RegistryConfig::default().build_config(Path::new(""))
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of registry items written
    pub items: usize,

    /// Number of file entries bundled, index entries included
    pub files: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,

    /// Paths written, in build order
    pub written: Vec<PathBuf>,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read {file} for {component}: {source}")]
    SourceFileUnreadable {
        component: String,
        file: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize {component}: {source}")]
    Serialize {
        component: String,
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Builds one JSON descriptor per configured component.
///
/// Components are processed strictly in order. The first unreadable source
/// file aborts the build before anything is written for that component;
/// items written for earlier components stay on disk.
pub struct RegistryBuilder {
    config: BuildConfig,
}

impl RegistryBuilder {
    /// Create a new registry builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Build every component.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let mut manifest = RegistryManifest::new(&self.config.name, self.config.homepage.clone());
        let mut written = Vec::with_capacity(self.config.components.len());
        let mut files = 0;

        for spec in &self.config.components {
            let item = self.build_item(spec)?;
            let path = self.write_item(&item)?;

            tracing::info!("Registry built: {}", path.display());

            files += item.files.len();
            manifest.push(&item);
            written.push(path);
        }

        if self.config.manifest {
            let path = self.write_manifest(&manifest)?;
            tracing::info!("Manifest written: {}", path.display());
        }

        Ok(BuildResult {
            items: written.len(),
            files,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
            written,
        })
    }

    /// Read a component's sources and assemble its registry item.
    pub fn build_item(&self, spec: &ComponentSpec) -> Result<RegistryItem, BuildError> {
        let dir = self.config.components_dir.join(&spec.name);
        let mut sources = Vec::with_capacity(spec.files.len());

        for file in &spec.files {
            let content = fs::read_to_string(dir.join(file)).map_err(|source| {
                BuildError::SourceFileUnreadable {
                    component: spec.name.clone(),
                    file: file.clone(),
                    source,
                }
            })?;
            tracing::debug!("Read {}/{} ({} bytes)", spec.name, file, content.len());
            sources.push(content);
        }

        let pairs: Vec<(&str, &str)> = spec
            .files
            .iter()
            .map(String::as_str)
            .zip(sources.iter().map(String::as_str))
            .collect();
        let index = generate_index(spec, &pairs);

        let mut files: Vec<FileEntry> = spec
            .files
            .iter()
            .zip(sources)
            .map(|(file, content)| FileEntry::new(&spec.name, file, content))
            .collect();
        files.push(FileEntry::new(&spec.name, INDEX_FILE, index));

        Ok(RegistryItem {
            name: spec.name.clone(),
            kind: ItemType::Ui,
            dependencies: spec.dependencies.clone(),
            dev_dependencies: spec.dev_dependencies.clone(),
            registry_dependencies: spec.registry_dependencies.clone(),
            files,
        })
    }

    /// Output path for a component's item.
    pub fn item_path(&self, name: &str) -> PathBuf {
        self.config.output_dir.join(format!("{}.json", name))
    }

    /// Serialize an item to `<output>/<name>.json`, overwriting.
    fn write_item(&self, item: &RegistryItem) -> Result<PathBuf, BuildError> {
        self.ensure_output_dir()?;

        let json = item.to_json().map_err(|source| BuildError::Serialize {
            component: item.name.clone(),
            source,
        })?;

        let path = self.item_path(&item.name);
        fs::write(&path, json).map_err(|source| BuildError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    fn write_manifest(&self, manifest: &RegistryManifest) -> Result<PathBuf, BuildError> {
        self.ensure_output_dir()?;

        let json = manifest.to_json().map_err(|source| BuildError::Serialize {
            component: manifest.name.clone(),
            source,
        })?;

        let path = self.config.output_dir.join(MANIFEST_FILE);
        fs::write(&path, json).map_err(|source| BuildError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    fn ensure_output_dir(&self) -> Result<(), BuildError> {
        fs::create_dir_all(&self.config.output_dir).map_err(|source| BuildError::Write {
            path: self.config.output_dir.clone(),
            source,
        })
    }
}
