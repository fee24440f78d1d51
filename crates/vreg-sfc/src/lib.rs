//! Vue single-file component inspection.
//!
//! This crate pulls `<script>` blocks out of `.vue` files and answers the two
//! questions the registry builder asks of a component source: which types it
//! exports, and which npm packages it imports.

pub mod block;
pub mod exports;
pub mod imports;

pub use block::{extract_scripts, ScriptBlock, ScriptLang, SfcError};
pub use exports::{exported_types, sfc_exported_types};
pub use imports::{package_imports, package_name};
