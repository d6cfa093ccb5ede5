use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["sourceRoot"], "./");
    assert_eq!(parsed["includes"], serde_json::json!(["**/main"]));
    assert_eq!(parsed["ignores"], serde_json::json!([]));
    assert_eq!(parsed["defaultSchema"], "master");
    assert_eq!(parsed["guessSchema"], true);
    assert_eq!(parsed["extraKeywords"], serde_json::json!([]));

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .tablescanrc.json"));
    assert!(test.root().join(".tablescanrc.json").exists());

    let content = test.read_file(".tablescanrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tablescanrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".tablescanrc.json already exists"));
    assert_eq!(test.read_file(".tablescanrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "app/src/main/resources/mapper/UserMapper.xml",
        "<select>SELECT * FROM sys_user</select>",
    )?;

    let output = test.scan_command().output()?;
    assert!(
        output.status.success(),
        "Scan should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("sys_user"));

    Ok(())
}
