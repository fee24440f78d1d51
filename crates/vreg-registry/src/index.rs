//! Generated `index.ts` for registry items.

use std::collections::HashSet;
use std::path::Path;

use vreg_sfc::sfc_exported_types;

use crate::config::ComponentSpec;

/// File name of the synthetic index entry.
pub const INDEX_FILE: &str = "index.ts";

/// Build the `index.ts` content for a component.
///
/// `sources` pairs each listed file with its content, in list order. An
/// explicit `index` on the spec is used verbatim. Otherwise every `.vue` file
/// contributes a default re-export named after its file stem, then each `.vue`
/// file exporting types contributes a type re-export, then `.ts`/`.js` modules
/// are re-exported wholesale.
///
/// Export names are unique across the component: a name already exported by
/// an earlier entry is skipped with a warning.
pub fn generate_index(spec: &ComponentSpec, sources: &[(&str, &str)]) -> String {
    if let Some(index) = &spec.index {
        return index.clone();
    }

    let mut exported = HashSet::new();
    let mut out = String::new();

    for &(file, _) in sources {
        if extension(file) != "vue" {
            continue;
        }
        let Some(name) = export_name(file) else {
            tracing::warn!(
                "No export name for {}/{}, leaving it out of {}",
                spec.name,
                file,
                INDEX_FILE
            );
            continue;
        };
        if !exported.insert(name.clone()) {
            tracing::warn!("{}: '{}' is already exported, skipping {}", spec.name, name, file);
            continue;
        }
        out.push_str(&format!("export {{ default as {} }} from './{}'\n", name, file));
    }

    for &(file, content) in sources {
        if extension(file) != "vue" {
            continue;
        }
        let names = match sfc_exported_types(content) {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Skipping type exports of {}/{}: {}", spec.name, file, e);
                continue;
            }
        };

        let names: Vec<String> = names
            .into_iter()
            .filter(|name| {
                let fresh = exported.insert(name.clone());
                if !fresh {
                    tracing::warn!(
                        "{}: type '{}' is already exported, skipping it from {}",
                        spec.name,
                        name,
                        file
                    );
                }
                fresh
            })
            .collect();

        if !names.is_empty() {
            out.push_str(&format!(
                "export type {{ {} }} from './{}'\n",
                names.join(", "),
                file
            ));
        }
    }

    for &(file, _) in sources {
        let ext = extension(file);
        if matches!(ext, "ts" | "js") && !file.ends_with(".d.ts") {
            let module = &file[..file.len() - ext.len() - 1];
            out.push_str(&format!("export * from './{}'\n", module));
        }
    }

    out
}

fn extension(file: &str) -> &str {
    Path::new(file)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
}

/// Identifier a `.vue` file is re-exported under, from its file stem.
///
/// `Chart.client.vue` becomes `ChartClient`. Names that would start with a
/// digit get a leading underscore. `None` when the stem has no identifier
/// characters at all.
fn export_name(file: &str) -> Option<String> {
    let stem = Path::new(file).file_stem().and_then(|s| s.to_str())?;
    let name = to_pascal_case(stem);

    match name.chars().next() {
        None => None,
        Some(c) if c.is_ascii_digit() => Some(format!("_{}", name)),
        Some(_) => Some(name),
    }
}

/// Convert a file stem to PascalCase, splitting on every character that
/// cannot appear in an identifier.
fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| !(c.is_alphanumeric() || c == '$'))
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
