//! Source parsers.
//!
//! - `js`: JavaScript / TypeScript / JSX parser (uses swc, lowers into [`SyntaxTree`])
//!
//! [`SyntaxTree`]: crate::core::tree::SyntaxTree

pub mod js;

pub use js::parse_source;
