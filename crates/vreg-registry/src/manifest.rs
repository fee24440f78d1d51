//! Registry manifest (`registry.json`) listing every built item.

use serde::{Deserialize, Serialize};

use crate::item::{ItemType, RegistryItem};

/// Reserved item name; its output path would collide with the manifest.
pub const MANIFEST_NAME: &str = "registry";

/// Manifest file name inside the output directory.
pub const MANIFEST_FILE: &str = "registry.json";

/// Index of all items in a registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryManifest {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    pub items: Vec<ManifestEntry>,
}

/// An item as listed in the manifest, without file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ItemType,

    pub dependencies: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dev_dependencies: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry_dependencies: Vec<String>,

    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestFile {
    pub path: String,

    #[serde(rename = "type")]
    pub kind: ItemType,
}

impl From<&RegistryItem> for ManifestEntry {
    fn from(item: &RegistryItem) -> Self {
        Self {
            name: item.name.clone(),
            kind: item.kind,
            dependencies: item.dependencies.clone(),
            dev_dependencies: item.dev_dependencies.clone(),
            registry_dependencies: item.registry_dependencies.clone(),
            files: item
                .files
                .iter()
                .map(|f| ManifestFile {
                    path: f.path.clone(),
                    kind: f.kind,
                })
                .collect(),
        }
    }
}

impl RegistryManifest {
    pub fn new(name: &str, homepage: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            homepage,
            items: Vec::new(),
        }
    }

    /// Record a built item.
    pub fn push(&mut self, item: &RegistryItem) {
        self.items.push(ManifestEntry::from(item));
    }

    /// Render as 2-space indented JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
