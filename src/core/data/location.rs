use serde::{Deserialize, Serialize};

/// A single point in a source file.
///
/// Lines are 1-based, columns are 0-based character offsets within the line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Start/end range of a comment or syntax node, in line/column terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyntaxLocation {
    pub start: Position,
    pub end: Position,
}

impl SyntaxLocation {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Byte offsets into the source text of a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// True if `offset` lies within the span, both ends inclusive.
    pub fn covers(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// The exact slice of `source` this span refers to.
    ///
    /// Returns `None` when the span does not land on valid char boundaries.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}
