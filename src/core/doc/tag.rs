//! JSDoc block tag parsing.
//!
//! A tag is a line starting with `@title`, followed by an optional `{type}`,
//! an optional name (only for tags that name something, see
//! [`NAMED_TAGS`]) and a free-text description that may continue on the
//! following lines.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// `@title` at the start of a line, capturing the title and the rest.
static TAG_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z][\w-]*)(?:\s+|$)(?s)(.*)$").unwrap());

/// Tags whose first word after the type is a name.
pub const NAMED_TAGS: &[&str] = &[
    "param", "arg", "argument", "property", "prop", "typedef", "callback", "name", "lends",
    "memberof", "alias",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub title: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_expr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Returns true if `line` opens a new tag.
pub fn is_tag_line(line: &str) -> bool {
    TAG_START_REGEX.is_match(line.trim_start())
}

/// Parse one tag from its text (the `@title` line plus continuation lines).
///
/// Returns the tag and, when the type expression is malformed, a message
/// describing the problem. A malformed type does not drop the tag.
pub fn parse_tag(text: &str) -> Option<(Tag, Option<String>)> {
    let caps = TAG_START_REGEX.captures(text.trim())?;
    let title = caps.get(1)?.as_str().to_string();
    let mut rest = caps.get(2).map_or("", |m| m.as_str()).trim_start();

    let mut tag = Tag {
        title,
        ..Default::default()
    };
    let mut error = None;

    if rest.starts_with('{') {
        match split_balanced(rest, '{', '}') {
            Some((inner, after)) => {
                tag.type_expr = Some(inner.trim().to_string()).filter(|t| !t.is_empty());
                rest = after.trim_start();
            }
            None => {
                error = Some(format!("Missing closing brace in type of @{}", tag.title));
                rest = "";
            }
        }
    }

    if NAMED_TAGS.contains(&tag.title.as_str()) {
        rest = parse_name(rest, &mut tag);
    }

    let description = rest.trim();
    if !description.is_empty() {
        tag.description = Some(description.to_string());
    }

    Some((tag, error))
}

/// Take the name off the front of `rest`, handling `[name]` and
/// `[name=default]`, and return what follows it.
fn parse_name<'a>(rest: &'a str, tag: &mut Tag) -> &'a str {
    if rest.starts_with('[') {
        if let Some((inner, after)) = split_balanced(rest, '[', ']') {
            let (name, default) = match inner.split_once('=') {
                Some((name, default)) => (name.trim(), Some(default.trim())),
                None => (inner.trim(), None),
            };
            tag.name = Some(name.to_string()).filter(|n| !n.is_empty());
            tag.optional = true;
            tag.default = default.filter(|d| !d.is_empty()).map(str::to_string);
            return after;
        }
    }

    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (name, after) = rest.split_at(end);
    if !name.is_empty() {
        tag.name = Some(name.to_string());
    }
    after
}

/// Split `text` (starting with `open`) at its matching `close`.
///
/// Returns the text between the delimiters and the text after `close`.
fn split_balanced(text: &str, open: char, close: char) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                let inner = &text[open.len_utf8()..i];
                let after = &text[i + close.len_utf8()..];
                return Some((inner, after));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tag(text: &str) -> Tag {
        let (tag, error) = parse_tag(text).unwrap();
        assert_eq!(error, None);
        tag
    }

    #[test]
    fn test_is_tag_line() {
        assert!(is_tag_line("@param x"));
        assert!(is_tag_line("  @returns"));
        assert!(!is_tag_line("email me@example.com"));
        assert!(!is_tag_line("@ nothing"));
    }

    #[test]
    fn test_param_with_type_and_description() {
        assert_eq!(
            tag("@param {string} name the user's name"),
            Tag {
                title: "param".into(),
                type_expr: Some("string".into()),
                name: Some("name".into()),
                description: Some("the user's name".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_nested_braces_in_type() {
        let parsed = tag("@returns {Promise<{ ok: boolean }>} the result");
        assert_eq!(parsed.type_expr.as_deref(), Some("Promise<{ ok: boolean }>"));
        assert_eq!(parsed.name, None);
        assert_eq!(parsed.description.as_deref(), Some("the result"));
    }

    #[test]
    fn test_optional_name_with_default() {
        let parsed = tag("@param {number} [retries = 3] how many times");
        assert_eq!(parsed.name.as_deref(), Some("retries"));
        assert!(parsed.optional);
        assert_eq!(parsed.default.as_deref(), Some("3"));
        assert_eq!(parsed.description.as_deref(), Some("how many times"));
    }

    #[test]
    fn test_optional_name_without_default() {
        let parsed = tag("@param [flag]");
        assert_eq!(parsed.name.as_deref(), Some("flag"));
        assert!(parsed.optional);
        assert_eq!(parsed.default, None);
        assert_eq!(parsed.description, None);
    }

    #[test]
    fn test_unnamed_tag_keeps_everything_as_description() {
        let parsed = tag("@deprecated use other() instead");
        assert_eq!(parsed.title, "deprecated");
        assert_eq!(parsed.name, None);
        assert_eq!(parsed.description.as_deref(), Some("use other() instead"));
    }

    #[test]
    fn test_bare_tag() {
        assert_eq!(
            tag("@private"),
            Tag {
                title: "private".into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_lends_names_its_target() {
        let parsed = tag("@lends Widget.prototype");
        assert_eq!(parsed.title, "lends");
        assert_eq!(parsed.name.as_deref(), Some("Widget.prototype"));
    }

    #[test]
    fn test_multiline_description() {
        let parsed = tag("@param x first line\nsecond line");
        assert_eq!(parsed.description.as_deref(), Some("first line\nsecond line"));
    }

    #[test]
    fn test_unclosed_type_reports_error() {
        let (parsed, error) = parse_tag("@param {string name").unwrap();
        assert_eq!(parsed.title, "param");
        assert_eq!(parsed.type_expr, None);
        assert_eq!(error.as_deref(), Some("Missing closing brace in type of @param"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let json = serde_json::to_string(&tag("@param {string} name")).unwrap();
        assert_eq!(json, r#"{"title":"param","type":"string","name":"name"}"#);
    }
}
