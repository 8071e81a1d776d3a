//! Per-unit record of comments that have already been emitted.
//!
//! Walkers can reach the same comment more than once: as the leading comment
//! of several nested nodes starting at the same offset, or once per pass when
//! a comment is both inside one node and after another. A comment is
//! identified by its file and start position, and is emitted only the first
//! time it is seen.
//!
//! A tracker must never outlive or be shared beyond one unit: two files can
//! easily hold comments at the same line and column.

use std::collections::HashSet;
use std::fmt;

use crate::core::data::Position;

/// Identity of a comment: `file:line:column` of its start.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisitationKey(String);

impl VisitationKey {
    pub fn new(file: &str, start: Position) -> Self {
        Self(format!("{}:{}:{}", file, start.line, start.column))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VisitationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Default)]
pub struct VisitedComments {
    keys: HashSet<VisitationKey>,
}

impl VisitedComments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, key: &VisitationKey) -> bool {
        self.keys.contains(key)
    }

    pub fn mark(&mut self, key: VisitationKey) {
        self.keys.insert(key);
    }
}
