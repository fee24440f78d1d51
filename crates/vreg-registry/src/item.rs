//! Registry item data model.

use serde::{Deserialize, Serialize};

/// Kind tag carried by items and file entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemType {
    /// A UI component
    #[default]
    #[serde(rename = "registry:ui")]
    Ui,
}

/// One bundled file of a registry item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Install path, prefixed with the component name
    pub path: String,

    /// Verbatim source text, or generated text for the index entry
    pub content: String,

    #[serde(rename = "type")]
    pub kind: ItemType,
}

impl FileEntry {
    /// Create a UI file entry at `<component>/<file>`.
    pub fn new(component: &str, file: &str, content: String) -> Self {
        Self {
            path: format!("{}/{}", component, file),
            content,
            kind: ItemType::Ui,
        }
    }
}

/// A component descriptor as consumed by installer CLIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ItemType,

    pub dependencies: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dev_dependencies: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry_dependencies: Vec<String>,

    /// Source files followed by the generated index entry
    pub files: Vec<FileEntry>,
}

impl RegistryItem {
    /// Render as 2-space indented JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> RegistryItem {
        RegistryItem {
            name: "ambient-grid".to_string(),
            kind: ItemType::Ui,
            dependencies: vec!["clsx".to_string()],
            dev_dependencies: Vec::new(),
            registry_dependencies: Vec::new(),
            files: vec![FileEntry::new(
                "ambient-grid",
                "AmbientGrid.vue",
                "<template />".to_string(),
            )],
        }
    }

    #[test]
    fn serializes_in_registry_shape() {
        let json = sample().to_json().unwrap();

        assert_eq!(
            json,
            r#"{
  "name": "ambient-grid",
  "type": "registry:ui",
  "dependencies": [
    "clsx"
  ],
  "files": [
    {
      "path": "ambient-grid/AmbientGrid.vue",
      "content": "<template />",
      "type": "registry:ui"
    }
  ]
}"#
        );
    }

    #[test]
    fn includes_optional_dependency_lists_when_present() {
        let mut item = sample();
        item.dev_dependencies = vec!["@types/node".to_string()];
        item.registry_dependencies = vec!["button".to_string()];

        let value: serde_json::Value = serde_json::from_str(&item.to_json().unwrap()).unwrap();

        assert_eq!(value["devDependencies"][0], "@types/node");
        assert_eq!(value["registryDependencies"][0], "button");
    }

    #[test]
    fn keeps_empty_dependencies_array() {
        let mut item = sample();
        item.dependencies.clear();

        let json = item.to_json().unwrap();

        assert!(json.contains("\"dependencies\": []"));
    }
}
