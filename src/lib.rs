//! docwalk - doc comment extraction for JavaScript and TypeScript
//!
//! docwalk parses source files, ties every JSDoc comment to the syntax node it
//! documents and emits the comments as structured entries, each reported once
//! per file and ordered across files by a sortable key.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Comment correlation engine and multi-file pipeline

pub mod cli;
pub mod config;
pub mod core;
