//! `<script>` block extraction.

use regex::Regex;
use std::sync::LazyLock;

/// Script language declared by a block's `lang` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptLang {
    #[default]
    JavaScript,
    TypeScript,
    Tsx,
    Jsx,
}

impl ScriptLang {
    /// Parse the value of a `lang` attribute.
    pub fn from_attr(lang: &str) -> Self {
        match lang.to_lowercase().as_str() {
            "ts" | "typescript" => Self::TypeScript,
            "tsx" => Self::Tsx,
            "jsx" => Self::Jsx,
            _ => Self::JavaScript,
        }
    }

    /// Whether the block may contain type declarations.
    pub fn is_typed(&self) -> bool {
        matches!(self, Self::TypeScript | Self::Tsx)
    }
}

/// A `<script>` block from a single-file component.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptBlock {
    /// Declared language
    pub lang: ScriptLang,

    /// `<script setup>` block
    pub setup: bool,

    /// Block body between the opening and closing tags
    pub content: String,

    /// 1-based line of the opening tag
    pub line: usize,
}

/// Errors that can occur when reading an SFC.
#[derive(Debug, thiserror::Error)]
pub enum SfcError {
    #[error("Unclosed <script> block opened at line {0}")]
    UnclosedBlock(usize),
}

static OPEN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<script\b([^>]*)>").expect("Invalid script tag regex"));

static LANG_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\blang\s*=\s*["']([^"']+)["']"#).expect("Invalid lang attribute regex")
});

static SETUP_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)setup(?:\s|=|$)").expect("Invalid setup regex"));

const CLOSE_TAG: &str = "</script>";

/// Extract every `<script>` block from an SFC, in source order.
pub fn extract_scripts(source: &str) -> Result<Vec<ScriptBlock>, SfcError> {
    let mut blocks = Vec::new();
    let mut offset = 0;

    while let Some(cap) = OPEN_TAG_RE.captures(&source[offset..]) {
        let Some(tag) = cap.get(0) else { break };
        let attrs = cap.get(1).map(|m| m.as_str()).unwrap_or("");

        let open_start = offset + tag.start();
        let body_start = offset + tag.end();
        let line = source[..open_start].matches('\n').count() + 1;

        let Some(close) = source[body_start..].find(CLOSE_TAG) else {
            return Err(SfcError::UnclosedBlock(line));
        };
        let body_end = body_start + close;

        let lang = LANG_ATTR_RE
            .captures(attrs)
            .and_then(|c| c.get(1))
            .map(|m| ScriptLang::from_attr(m.as_str()))
            .unwrap_or_default();

        blocks.push(ScriptBlock {
            lang,
            setup: SETUP_ATTR_RE.is_match(attrs),
            content: source[body_start..body_end].to_string(),
            line,
        });

        offset = body_end + CLOSE_TAG.len();
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_setup_and_plain_blocks() {
        let source = r#"<script lang="ts">
export interface Option { value: string }
</script>

<script setup lang="ts">
const props = defineProps<{ options: Option[] }>()
</script>

<template>
  <div />
</template>
"#;

        let blocks = extract_scripts(source).unwrap();

        assert_eq!(blocks.len(), 2);
        assert!(!blocks[0].setup);
        assert!(blocks[1].setup);
        assert_eq!(blocks[0].lang, ScriptLang::TypeScript);
        assert_eq!(blocks[0].line, 1);
        assert_eq!(blocks[1].line, 5);
        assert!(blocks[0].content.contains("export interface Option"));
    }

    #[test]
    fn defaults_to_javascript() {
        let blocks = extract_scripts("<script setup>\nconst a = 1\n</script>").unwrap();

        assert_eq!(blocks[0].lang, ScriptLang::JavaScript);
        assert!(blocks[0].setup);
    }

    #[test]
    fn handles_template_only_component() {
        let blocks = extract_scripts("<template><div /></template>").unwrap();

        assert!(blocks.is_empty());
    }

    #[test]
    fn errors_on_unclosed_block() {
        let result = extract_scripts("<template />\n<script setup>\nconst a = 1\n");

        assert!(matches!(result, Err(SfcError::UnclosedBlock(2))));
    }

    #[test]
    fn setup_attribute_is_not_confused_with_lang_value() {
        let blocks = extract_scripts(r#"<script lang="setupish">x</script>"#).unwrap();

        assert!(!blocks[0].setup);
    }
}
