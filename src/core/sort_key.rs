//! Sortable line-number keys.
//!
//! Line numbers are embedded in sort keys as fixed-width, zero-padded decimal
//! strings so that plain string comparison orders them numerically
//! (`"00000010"` after `"00000009"`, where `"10"` would sort before `"9"`).

/// Width used for line numbers inside sort keys.
pub const SORT_KEY_WIDTH: usize = 8;

/// Left-pad the decimal form of `value` with `'0'` up to `width` characters.
///
/// Values wider than `width` are returned in full, never truncated.
pub fn left_pad(value: usize, width: usize) -> String {
    format!("{value:0>width$}")
}

/// Compose the sort key of a comment: the unit's prefix, a space, and the
/// padded line of the node the comment documents.
pub fn sort_key(prefix: &str, line: usize) -> String {
    format!("{} {}", prefix, left_pad(line, SORT_KEY_WIDTH))
}
