use anyhow::Result;
use insta::assert_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const ORDER_MAPPER_JAVA: &str = r#"package com.shop.mapper;

@DS("slave")
public interface OrderMapper {
    @Select("SELECT * FROM t_order WHERE id = #{id}")
    Order find(long id);
}
"#;

const ORDER_MAPPER_XML: &str = r#"<mapper namespace="com.shop.mapper.OrderMapper">
  <select id="list">SELECT o.id FROM t_order o JOIN t_order_item i ON o.id = i.order_id</select>
</mapper>
"#;

const USER_JAVA: &str = r#"package com.shop.entity;

@TableName("sys_user")
public class User {
}
"#;

const USER_DAO_JAVA: &str = r#"package com.shop.dao;

public class UserDao {
    private static final String SQL = "select name from sys_user where id = ?";
}
"#;

/// A two-module layout with a test directory that must not be scanned.
fn shop_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        "order/src/main/java/com/shop/mapper/OrderMapper.java",
        ORDER_MAPPER_JAVA,
    )?;
    test.write_file(
        "order/src/main/resources/mapper/OrderMapper.xml",
        ORDER_MAPPER_XML,
    )?;
    test.write_file("user/src/main/java/com/shop/entity/User.java", USER_JAVA)?;
    test.write_file("user/src/main/java/com/shop/dao/UserDao.java", USER_DAO_JAVA)?;
    test.write_file(
        "user/src/test/java/com/shop/UserDaoTest.java",
        "String q = \"SELECT * FROM t_fixture\";",
    )?;
    Ok(test)
}

#[test]
fn test_scan_text_report() -> Result<()> {
    let test = shop_project()?;

    let output = test.scan_command().arg("--no-guess").output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(out.contains("Scanned 4 files, 1 @DS marker"));
    assert!(out.contains("slave   t_order_item"));
    assert!(out.contains("master  sys_user"));
    assert!(out.contains("Found 3 tables in 2 schemas"));
    assert!(!out.contains("t_fixture"));

    Ok(())
}

#[test]
fn test_scan_writes_sheets() -> Result<()> {
    let test = shop_project()?;

    let output = test
        .scan_command()
        .args(["--no-guess", "--output", "report"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    for sheet in [
        "raw.csv",
        "cleaned.csv",
        "inventory.csv",
        "file_stats.csv",
        "summary.csv",
    ] {
        assert!(test.root().join("report").join(sheet).exists(), "{}", sheet);
    }

    assert_snapshot!(test.read_file("report/inventory.csv")?, @r"
    schema,table_name
    master,sys_user
    slave,t_order
    slave,t_order_item
    ");

    assert_snapshot!(test.read_file("report/file_stats.csv")?, @r"
    file_type,files,tables,average_per_file
    Java,3,4,1.33
    XML,1,2,2.00
    Other,0,0,0.00
    ");

    let raw = test.read_file("report/raw.csv")?;
    assert!(raw.contains("@Select,slave,declared,t_order,OrderMapper.java,5"));
    assert!(raw.contains("XML,slave,declared,t_order_item,OrderMapper.xml,2"));
    assert!(raw.contains("Java SQL,master,default,sys_user,UserDao.java,4"));

    Ok(())
}

#[test]
fn test_scan_json() -> Result<()> {
    let test = shop_project()?;

    let output = test
        .scan_command()
        .args(["--no-guess", "--format", "json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let report: Value = serde_json::from_slice(&output.stdout)?;
    let inventory = report["inventory"].as_array().unwrap();
    assert_eq!(inventory.len(), 3);
    assert_eq!(report["summary"]["counters"]["discoveredFiles"], 4);
    assert_eq!(report["summary"]["counters"]["schemaMarkers"], 1);
    assert_eq!(report["summary"]["schemas"]["slave"], 2);

    Ok(())
}

#[test]
fn test_scan_no_files() -> Result<()> {
    let test = CliTest::with_file("README.md", "# nothing here")?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No .java or .xml files found"));

    Ok(())
}

#[test]
fn test_scan_falls_back_to_root() -> Result<()> {
    let test = CliTest::with_file(
        "legacy/dao/ReportDao.java",
        "String q = \"SELECT * FROM t_report\";",
    )?;

    let output = test.scan_command().args(["--no-guess", "-v"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("master  t_report"));
    assert!(stderr(&output).contains("scanning the whole source root"));

    Ok(())
}

#[test]
fn test_scan_source_root_argument() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("svc/src/main/A.xml", "SELECT * FROM t_a")?;
    test.write_file("other/src/main/B.xml", "SELECT * FROM t_b")?;

    let output = test
        .scan_command()
        .args(["--no-guess", "--source-root", "svc"])
        .output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("t_a"));
    assert!(!out.contains("t_b"));

    Ok(())
}

#[test]
fn test_scan_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".tablescanrc.json",
        r#"{
            "defaultSchema": "core",
            "guessSchema": false,
            "ignores": ["**/generated/**"],
            "extraKeywords": ["t_tmp"]
        }"#,
    )?;
    test.write_file("src/main/A.xml", "SELECT * FROM t_a\nSELECT * FROM t_tmp")?;
    test.write_file("src/main/generated/B.xml", "SELECT * FROM t_generated")?;

    let output = test.scan_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(out.contains("core    t_a"));
    assert!(!out.contains("t_tmp"));
    assert!(!out.contains("t_generated"));

    Ok(())
}

#[test]
fn test_scan_default_schema_argument_wins() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tablescanrc.json", r#"{ "defaultSchema": "core" }"#)?;
    test.write_file("src/main/A.xml", "SELECT * FROM t_a")?;

    let output = test
        .scan_command()
        .args(["--no-guess", "--default-schema", "archive"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("archive  t_a"));

    Ok(())
}

#[test]
fn test_scan_invalid_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tablescanrc.json", r#"{ "ignores": ["[invalid"] }"#)?;
    test.write_file("src/main/A.xml", "SELECT * FROM t_a")?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.starts_with("Error:"));
    assert!(err.contains("ignores"));

    Ok(())
}

#[test]
fn test_scan_verbose_lists_rejections() -> Result<()> {
    let test = CliTest::with_file(
        "src/main/A.xml",
        "SELECT * FROM ${tableName}\nSELECT * FROM t_a",
    )?;

    let output = test.scan_command().args(["--no-guess", "-v"]).output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("Rejected matches"));
    assert!(out.contains("A.xml:1 \"${tableName}\" (contains variable form)"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    let out = stdout(&output);

    assert!(output.status.success());
    assert!(out.contains("scan"));
    assert!(out.contains("init"));

    Ok(())
}
