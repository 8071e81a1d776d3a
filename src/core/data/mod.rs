//! Core data types shared by the parser, the walkers and the extractor.
//!
//! ## Module Structure
//!
//! - `location`: Positions, line/column ranges and byte spans

pub mod location;

pub use location::{Position, SourceSpan, SyntaxLocation};
