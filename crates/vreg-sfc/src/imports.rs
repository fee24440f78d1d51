//! Package import detection.

use regex::Regex;
use std::sync::LazyLock;

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: import x from 'pkg' / import { a } from "pkg" / import 'pkg'
    Regex::new(r#"(?m)^[ \t]*import\s+(?:type\s+)?(?:[^'";]*?\s*from\s*)?['"]([^'"]+)['"]"#)
        .expect("Invalid import regex")
});

/// Specifier prefixes that never name an npm package.
const LOCAL_PREFIXES: &[&str] = &[".", "/", "@/", "~/", "~~/", "#"];

/// Packages provided by the host app.
const HOST_PACKAGES: &[&str] = &["vue"];

/// Node built-in modules, importable without the `node:` scheme.
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Reduce an import specifier to its package name.
///
/// Returns `None` for relative imports, path aliases and Node built-ins.
pub fn package_name(specifier: &str) -> Option<String> {
    if specifier.is_empty()
        || specifier.starts_with("node:")
        || LOCAL_PREFIXES.iter().any(|p| specifier.starts_with(p))
    {
        return None;
    }

    let mut parts = specifier.split('/');
    let first = parts.next()?;

    let name = if first.starts_with('@') {
        let second = parts.next().filter(|s| !s.is_empty())?;
        format!("{}/{}", first, second)
    } else if NODE_BUILTINS.contains(&first) {
        return None;
    } else {
        first.to_string()
    };

    Some(name)
}

/// Npm packages imported by a script, in first-seen order.
pub fn package_imports(script: &str) -> Vec<String> {
    let mut packages: Vec<String> = Vec::new();

    for cap in IMPORT_RE.captures_iter(script) {
        let Some(specifier) = cap.get(1) else { continue };
        let Some(name) = package_name(specifier.as_str()) else {
            continue;
        };
        if HOST_PACKAGES.contains(&name.as_str()) || packages.contains(&name) {
            continue;
        }
        packages.push(name);
    }

    packages
}
