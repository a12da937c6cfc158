use std::fs;
use std::process::Command;

#[test]
fn test_cli_generate_creates_export_tree() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("export");

    let exe = env!("CARGO_BIN_EXE_ldscaffold");
    let status = Command::new(exe)
        .arg("generate")
        .arg("--service-id")
        .arg("demo")
        .arg("--schema")
        .arg("public")
        .arg("--db-url")
        .arg("postgresql://u:p@localhost:5432/gis")
        .arg("--blocks")
        .arg("QUERYABLES,CRS")
        .arg("--output")
        .arg(&output)
        .status()
        .expect("run cli");
    assert!(status.success());

    assert!(output.join("services/demo.yml").exists());
    assert!(output.join("providers/demo.yml").exists());

    let raw = fs::read_to_string(output.join("services/demo.yml")).expect("read service file");
    let doc: serde_yaml::Value = serde_yaml::from_str(&raw).expect("parse service file");
    let api = doc
        .get("api")
        .and_then(serde_yaml::Value::as_sequence)
        .expect("api list");
    assert_eq!(api.len(), 2);
}

#[test]
fn test_cli_set_override_lands_in_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("export");

    let exe = env!("CARGO_BIN_EXE_ldscaffold");
    let status = Command::new(exe)
        .arg("generate")
        .arg("--service-id")
        .arg("demo")
        .arg("--schema")
        .arg("public")
        .arg("--blocks")
        .arg("HTML")
        .arg("--set")
        .arg("HTML.homeUrl=\"https://dummy.com\"")
        .arg("--output")
        .arg(&output)
        .status()
        .expect("run cli");
    assert!(status.success());

    let raw = fs::read_to_string(output.join("services/demo.yml")).expect("read service file");
    assert!(raw.contains("homeUrl: https://dummy.com"));
}

#[test]
fn test_cli_rejects_unknown_block() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("export");

    let exe = env!("CARGO_BIN_EXE_ldscaffold");
    let result = Command::new(exe)
        .arg("generate")
        .arg("--service-id")
        .arg("demo")
        .arg("--schema")
        .arg("public")
        .arg("--blocks")
        .arg("NOT_A_BLOCK")
        .arg("--output")
        .arg(&output)
        .output()
        .expect("run cli");
    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn test_cli_blocks_lists_supported_set() {
    let exe = env!("CARGO_BIN_EXE_ldscaffold");
    let result = Command::new(exe).arg("blocks").output().expect("run cli");
    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    for name in ["QUERYABLES", "TILES", "CRS", "STYLES", "HTML", "FILTER", "PROJECTIONS"] {
        assert!(stdout.contains(name), "missing {name} in blocks output");
    }
}
