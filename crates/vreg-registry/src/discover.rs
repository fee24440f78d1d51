//! Component discovery for generating a starter configuration.
//!
//! Each immediate subdirectory of the components directory is treated as one
//! component. Its script and SFC files become the component's file list and
//! the packages they import become its dependencies.

use std::fs;
use std::path::{Path, PathBuf};

use vreg_sfc::{extract_scripts, package_imports};
use walkdir::WalkDir;

use crate::config::ComponentSpec;

/// Errors that can occur while discovering components.
#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    #[error("Components directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
}

const SOURCE_EXTENSIONS: &[&str] = &["vue", "ts", "js"];

/// Scan `components_dir` and describe every component found, sorted by name.
pub fn discover_components(components_dir: &Path) -> Result<Vec<ComponentSpec>, DiscoverError> {
    if !components_dir.is_dir() {
        return Err(DiscoverError::DirectoryNotFound(
            components_dir.to_path_buf(),
        ));
    }

    let mut specs = Vec::new();

    for entry in WalkDir::new(components_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };

        match describe_component(name, entry.path()) {
            Some(spec) => specs.push(spec),
            None => tracing::warn!("Skipping {}: no component sources", name),
        }
    }

    Ok(specs)
}

fn describe_component(name: &str, dir: &Path) -> Option<ComponentSpec> {
    let mut files = Vec::new();
    let mut dependencies: Vec<String> = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !SOURCE_EXTENSIONS.contains(&ext) {
            continue;
        }

        // Skip generated index, tests, and stories
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if (entry.depth() == 1 && filename.starts_with("index."))
            || filename.contains(".test.")
            || filename.contains(".spec.")
            || filename.contains(".stories.")
        {
            continue;
        }

        let Ok(relative) = path.strip_prefix(dir) else {
            continue;
        };
        let relative = relative
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/");

        match fs::read_to_string(path) {
            Ok(source) => dependencies.extend(source_imports(ext, &source)),
            Err(e) => tracing::warn!("Failed to read {}: {}", path.display(), e),
        }

        files.push(relative);
    }

    if files.is_empty() {
        return None;
    }

    files.sort();
    dependencies.sort();
    dependencies.dedup();

    Some(ComponentSpec {
        name: name.to_string(),
        dependencies,
        files,
        dev_dependencies: Vec::new(),
        registry_dependencies: Vec::new(),
        index: None,
    })
}

fn source_imports(ext: &str, source: &str) -> Vec<String> {
    if ext != "vue" {
        return package_imports(source);
    }

    match extract_scripts(source) {
        Ok(blocks) => blocks
            .iter()
            .flat_map(|b| package_imports(&b.content))
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to read script blocks: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn discovers_components_and_dependencies() {
        let temp = tempdir().unwrap();
        let ui = temp.path().join("ui");
        let picker = ui.join("wheel-picker");
        let grid = ui.join("ambient-grid");
        fs::create_dir_all(&picker).unwrap();
        fs::create_dir_all(&grid).unwrap();

        fs::write(
            picker.join("WheelPickerWrapper.vue"),
            "<template><slot /></template>",
        )
        .unwrap();
        fs::write(
            picker.join("WheelPicker.vue"),
            "<script setup lang=\"ts\">\nimport { useVModel } from '@vueuse/core'\nimport { ref } from 'vue'\n</script>\n",
        )
        .unwrap();
        fs::write(picker.join("index.ts"), "export {}").unwrap();
        fs::write(
            grid.join("AmbientGrid.vue"),
            "<script setup>\nimport { twMerge } from 'tailwind-merge'\nimport { clsx } from 'clsx'\n</script>\n",
        )
        .unwrap();
        fs::write(grid.join("AmbientGrid.stories.ts"), "import x from 'storybook'").unwrap();

        let specs = discover_components(&ui).unwrap();

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "ambient-grid");
        assert_eq!(specs[0].files, vec!["AmbientGrid.vue"]);
        assert_eq!(specs[0].dependencies, vec!["clsx", "tailwind-merge"]);
        assert_eq!(specs[1].name, "wheel-picker");
        assert_eq!(
            specs[1].files,
            vec!["WheelPicker.vue", "WheelPickerWrapper.vue"]
        );
        assert_eq!(specs[1].dependencies, vec!["@vueuse/core"]);
    }

    #[test]
    fn keeps_nested_files_with_forward_slashes() {
        let temp = tempdir().unwrap();
        let parts = temp.path().join("toast/parts");
        fs::create_dir_all(&parts).unwrap();
        fs::write(temp.path().join("toast/Toast.vue"), "<template />").unwrap();
        fs::write(parts.join("index.ts"), "export * from './Item'").unwrap();

        let specs = discover_components(temp.path()).unwrap();

        assert_eq!(specs[0].files, vec!["Toast.vue", "parts/index.ts"]);
    }

    #[test]
    fn skips_directories_without_sources() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("empty")).unwrap();
        fs::write(temp.path().join("empty/README.md"), "# nothing").unwrap();

        let specs = discover_components(temp.path()).unwrap();

        assert!(specs.is_empty());
    }

    #[test]
    fn errors_on_missing_directory() {
        let temp = tempdir().unwrap();

        let result = discover_components(&temp.path().join("nope"));

        assert!(matches!(result, Err(DiscoverError::DirectoryNotFound(_))));
    }
}
