use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout_json};

const MATH: &str = r#"/**
 * Adds two numbers.
 * @param {number} a
 * @param {number} b
 * @returns {number}
 */
export function add(a, b) {
  return a + b;
}

/** Internal helper. */
function clamp(x) {
  return x;
}
"#;

#[test]
fn test_extract_default_includes() -> Result<()> {
    let test = CliTest::with_file("src/math.js", MATH)?;
    test.write_file("scripts/build.js", "/** Not included. */\nfunction build() {}\n")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let entries = stdout_json(&output)?;
    let descriptions: Vec<_> = entries.iter().map(|e| e["description"].clone()).collect();
    assert_eq!(descriptions, vec!["Adds two numbers.", "Internal helper."]);

    let first = &entries[0];
    assert_eq!(first["context"]["file"], "src/math.js");
    assert_eq!(first["context"]["sortKey"], "src/math.js 00000007");
    assert_eq!(first["loc"]["start"]["line"], 1);
    assert_eq!(first["tags"].as_array().map(Vec::len), Some(3));
    assert_eq!(first["tags"][2]["title"], "returns");
    assert!(first["context"].get("ast").is_none());
    assert!(first["context"]["code"].as_str().is_some_and(|code| code.contains("function clamp")));

    Ok(())
}

#[test]
fn test_extract_document_exported_flag() -> Result<()> {
    let test = CliTest::with_file("src/math.js", MATH)?;

    let output = test.extract_command().arg("--document-exported").output()?;
    assert_eq!(output.status.code(), Some(0));

    let entries = stdout_json(&output)?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["description"], "Adds two numbers.");

    Ok(())
}

#[test]
fn test_extract_document_exported_from_config() -> Result<()> {
    let test = CliTest::with_file("src/math.js", MATH)?;
    test.write_file(".docwalkrc.json", r#"{ "documentExported": true }"#)?;

    let entries = stdout_json(&test.extract_command().output()?)?;
    assert_eq!(entries.len(), 1);

    Ok(())
}

#[test]
fn test_undocumented_exports_are_listed() -> Result<()> {
    let test = CliTest::with_file(
        "src/index.ts",
        "export const VERSION = '1.0';\n\nexport interface Options {\n  /** Retry count. */\n  retries: number;\n}\n",
    )?;

    let output = test
        .extract_command()
        .arg("--document-exported")
        .output()?;
    let entries = stdout_json(&output)?;
    let descriptions: Vec<_> = entries.iter().map(|e| e["description"].clone()).collect();
    assert_eq!(descriptions, vec!["", "", "Retry count."]);

    Ok(())
}

#[test]
fn test_extract_explicit_paths() -> Result<()> {
    let test = CliTest::with_file("lib/a.js", "/** A. */\nfunction a() {}\n")?;
    test.write_file("lib/nested/b.ts", "/** B. */\nfunction b() {}\n")?;
    test.write_file("other.js", "/** Other. */\nfunction other() {}\n")?;
    test.write_file("src/skipped.js", "/** Skipped. */\nfunction skipped() {}\n")?;

    let output = test.extract_command().arg("lib").arg("other.js").output()?;
    assert_eq!(output.status.code(), Some(0));

    let entries = stdout_json(&output)?;
    let files: Vec<_> = entries.iter().map(|e| e["context"]["file"].clone()).collect();
    assert_eq!(files, vec!["lib/a.js", "lib/nested/b.ts", "other.js"]);

    Ok(())
}

#[test]
fn test_explicit_directory_keeps_config_ignores() -> Result<()> {
    let test = CliTest::with_file("src/index.js", "/** Index. */\nfunction index() {}\n")?;
    test.write_file("src/generated/types.js", "/** Generated. */\nfunction types() {}\n")?;
    test.write_file(".docwalkrc.json", r#"{ "ignores": ["src/generated"] }"#)?;

    for args in [vec![], vec!["src"]] {
        let entries = stdout_json(&test.extract_command().args(&args).output()?)?;
        let descriptions: Vec<_> = entries.iter().map(|e| e["description"].clone()).collect();
        assert_eq!(descriptions, vec!["Index."]);
    }

    Ok(())
}

#[test]
fn test_entries_are_ordered_across_files() -> Result<()> {
    let test = CliTest::with_file("src/b.js", "/** B. */\nfunction b() {}\n")?;
    test.write_file("src/a.js", "\n\n\n/** A late. */\nfunction late() {}\n")?;
    test.write_file("src/a/inner.js", "/** Inner. */\nfunction inner() {}\n")?;

    let entries = stdout_json(&test.extract_command().output()?)?;
    let keys: Vec<_> = entries.iter().map(|e| e["context"]["sortKey"].clone()).collect();
    assert_eq!(
        keys,
        vec![
            "src/a.js 00000005",
            "src/a/inner.js 00000002",
            "src/b.js 00000002"
        ]
    );

    Ok(())
}

#[test]
fn test_comment_reported_once() -> Result<()> {
    let test = CliTest::with_file(
        "src/obj.js",
        "/** Sets the value. */\nobj.value = compute();\nfunction f() {} /** After f. */\n",
    )?;

    let entries = stdout_json(&test.extract_command().output()?)?;
    let descriptions: Vec<_> = entries.iter().map(|e| e["description"].clone()).collect();
    assert_eq!(descriptions, vec!["Sets the value.", "After f."]);
    assert!(entries[1]["context"].get("code").is_none());

    Ok(())
}

#[test]
fn test_lends_comments_are_skipped() -> Result<()> {
    let test = CliTest::with_file(
        "src/widget.js",
        "Object.assign(Widget.prototype, /** @lends Widget.prototype */ {\n  /** Draws. */\n  draw() {},\n});\n",
    )?;

    let entries = stdout_json(&test.extract_command().output()?)?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["description"], "Draws.");

    Ok(())
}

#[test]
fn test_parse_failure_exit_code() -> Result<()> {
    let test = CliTest::with_file("src/good.js", "/** Good. */\nfunction good() {}\n")?;
    test.write_file("src/bad.js", "function (")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)?.len(), 1);
    assert!(stderr(&output).contains("1 file(s) could not be parsed"));

    let verbose = test.extract_command().arg("-v").output()?;
    assert_eq!(verbose.status.code(), Some(1));
    assert!(stderr(&verbose).contains("src/bad.js"));

    Ok(())
}

#[test]
fn test_text_format() -> Result<()> {
    let test = CliTest::with_file("src/math.js", MATH)?;

    let output = test.extract_command().args(["--format", "text"]).output()?;
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("src/math.js:7"));
    assert!(stdout.contains("  Adds two numbers."));
    assert!(stdout.contains("@param {number} a"));
    assert!(stderr(&output).contains("Extracted 2 comments from 1 file"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file("src/math.js", MATH)?;
    test.write_file(".docwalkrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_missing_path_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command().arg("nope.js").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Path does not exist"));
    assert!(!test.root().join("nope.js").exists());

    Ok(())
}

#[test]
fn test_empty_project() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_json(&output)?.is_empty());

    Ok(())
}
