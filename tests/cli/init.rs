use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Created .docwalkrc.json"));

    let content = test.read_file(".docwalkrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["documentExported"], false);
    assert_eq!(parsed["includes"], serde_json::json!(["src"]));
    assert_eq!(parsed["ignores"], serde_json::json!([]));
    assert_eq!(parsed["ignoreTestFiles"], false);
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".docwalkrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".docwalkrc.json already exists"));
    assert_eq!(test.read_file(".docwalkrc.json")?, "{}");

    Ok(())
}
