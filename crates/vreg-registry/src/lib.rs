//! Registry builder for Vue component libraries.
//!
//! Reads each configured component's source files, bundles them with a
//! generated `index.ts` and their dependency list into a registry item, and
//! writes one JSON descriptor per component for installer CLIs to consume.

pub mod builder;
pub mod config;
pub mod discover;
pub mod index;
pub mod item;
pub mod manifest;

pub use builder::{BuildConfig, BuildError, BuildResult, RegistryBuilder};
pub use config::{config_root, ComponentSpec, ConfigError, RegistryConfig, RegistrySettings};
pub use discover::{discover_components, DiscoverError};
pub use index::{generate_index, INDEX_FILE};
pub use item::{FileEntry, ItemType, RegistryItem};
pub use manifest::{ManifestEntry, ManifestFile, RegistryManifest, MANIFEST_FILE};
