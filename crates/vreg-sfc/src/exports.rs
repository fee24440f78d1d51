//! Exported type detection.

use regex::Regex;
use std::sync::LazyLock;

use crate::block::{extract_scripts, SfcError};

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: export interface Foo / export type Foo = / export enum Foo / export const enum Foo
    Regex::new(
        r"(?m)^[ \t]*export\s+(?:declare\s+)?(?:interface|type|(?:const\s+)?enum)\s+([A-Za-z_$][\w$]*)",
    )
    .expect("Invalid type declaration regex")
});

static TYPE_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: export type { Foo, Bar as Baz }
    Regex::new(r"(?m)^[ \t]*export\s+type\s*\{([^}]*)\}").expect("Invalid type list regex")
});

/// Names of the types a script exports, in source order without duplicates.
pub fn exported_types(script: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();

    for cap in DECLARATION_RE.captures_iter(script) {
        if let Some(name) = cap.get(1) {
            found.push((name.start(), name.as_str().to_string()));
        }
    }

    for cap in TYPE_LIST_RE.captures_iter(script) {
        let Some(list) = cap.get(1) else { continue };
        for part in list.as_str().split(',') {
            // `Foo as Bar` exports `Bar`
            let name = part.rsplit(" as ").next().unwrap_or("").trim();
            if !name.is_empty() {
                found.push((list.start(), name.to_string()));
            }
        }
    }

    found.sort_by_key(|(pos, _)| *pos);

    let mut names: Vec<String> = Vec::new();
    for (_, name) in found {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Names of the types exported from any typed `<script>` block of an SFC.
pub fn sfc_exported_types(source: &str) -> Result<Vec<String>, SfcError> {
    let mut names: Vec<String> = Vec::new();

    for block in extract_scripts(source)? {
        if !block.lang.is_typed() {
            continue;
        }
        for name in exported_types(&block.content) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    Ok(names)
}
