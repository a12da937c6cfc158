use ldproxy_scaffold::{ScaffoldConfig, ScaffoldError};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn read_yaml(path: &Path) -> Value {
    let contents = fs::read_to_string(path).expect("read generated file");
    serde_yaml::from_str(&contents).expect("parse generated file")
}

fn api_list(doc: &Value) -> &Vec<Value> {
    doc.get("api")
        .and_then(Value::as_sequence)
        .expect("api list in service doc")
}

#[test]
fn test_each_supported_block_renders_enabled_document() {
    for name in [
        "QUERYABLES",
        "TILES",
        "CRS",
        "STYLES",
        "HTML",
        "FILTER",
        "PROJECTIONS",
    ] {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocks = strings(&[name]);
        let config =
            ScaffoldConfig::new("demo", "public", None, None, false, Some(&blocks), None)
                .expect("valid config");
        config.generate(dir.path()).expect("generate");

        let doc = read_yaml(&dir.path().join("services/demo.yml"));
        let entry = api_list(&doc)
            .iter()
            .find(|e| e.get("buildingBlock") == Some(&Value::from(name)))
            .unwrap_or_else(|| panic!("no {name} entry in api list"));
        assert_eq!(entry.get("enabled"), Some(&Value::from(true)));
    }
}

#[test]
fn test_unknown_block_fails_before_any_file_is_written() {
    let blocks = strings(&["NOT_A_BLOCK"]);
    let err = ScaffoldConfig::new("demo", "public", None, None, false, Some(&blocks), None)
        .expect_err("validation failure");
    assert!(matches!(err, ScaffoldError::UnknownBlock { name } if name == "NOT_A_BLOCK"));
}

#[test]
fn test_html_override_is_merged_into_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocks = strings(&["HTML"]);
    let params = vec![(
        "HTML".to_string(),
        vec![("homeUrl".to_string(), Value::from("https://dummy.com"))],
    )];
    let config = ScaffoldConfig::new(
        "demo",
        "public",
        None,
        None,
        false,
        Some(&blocks),
        Some(params),
    )
    .expect("valid config");
    config.generate(dir.path()).expect("generate");

    let doc = read_yaml(&dir.path().join("services/demo.yml"));
    let html = &api_list(&doc)[0];
    assert_eq!(html.get("buildingBlock"), Some(&Value::from("HTML")));
    assert_eq!(html.get("enabled"), Some(&Value::from(true)));
    assert_eq!(
        html.get("homeUrl"),
        Some(&Value::from("https://dummy.com"))
    );
}

#[test]
fn test_override_for_unrequested_block_has_no_effect() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocks = strings(&["QUERYABLES"]);
    let params = vec![(
        "HTML".to_string(),
        vec![("homeUrl".to_string(), Value::from("https://dummy.com"))],
    )];
    let config = ScaffoldConfig::new(
        "demo",
        "public",
        None,
        None,
        false,
        Some(&blocks),
        Some(params),
    )
    .expect("valid config");
    config.generate(dir.path()).expect("generate");

    let raw = fs::read_to_string(dir.path().join("services/demo.yml")).expect("read");
    assert!(!raw.contains("homeUrl"));
    let doc = read_yaml(&dir.path().join("services/demo.yml"));
    assert_eq!(api_list(&doc).len(), 1);
}

#[test]
fn test_repeated_generation_is_byte_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocks = strings(&["QUERYABLES", "TILES"]);
    let config = ScaffoldConfig::new(
        "demo",
        "public",
        Some("postgresql://u:p@localhost:5432/gis".to_string()),
        None,
        false,
        Some(&blocks),
        None,
    )
    .expect("valid config");

    config.generate(dir.path()).expect("first run");
    let service_first = fs::read(dir.path().join("services/demo.yml")).expect("read");
    let provider_first = fs::read(dir.path().join("providers/demo.yml")).expect("read");

    config.generate(dir.path()).expect("second run");
    let service_second = fs::read(dir.path().join("services/demo.yml")).expect("read");
    let provider_second = fs::read(dir.path().join("providers/demo.yml")).expect("read");

    assert_eq!(service_first, service_second);
    assert_eq!(provider_first, provider_second);
}

#[test]
fn test_end_to_end_demo_service() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocks = strings(&["QUERYABLES", "CRS"]);
    let config = ScaffoldConfig::new("demo", "public", None, None, false, Some(&blocks), None)
        .expect("valid config");
    let export_root = config.generate(dir.path()).expect("generate");
    assert_eq!(export_root, dir.path());

    let doc = read_yaml(&dir.path().join("services/demo.yml"));
    assert_eq!(doc.get("id"), Some(&Value::from("demo")));
    assert_eq!(doc.get("serviceType"), Some(&Value::from("OGC_API")));

    let api = api_list(&doc);
    assert_eq!(api.len(), 2);
    assert_eq!(
        api[0].get("buildingBlock"),
        Some(&Value::from("QUERYABLES"))
    );
    assert_eq!(api[1].get("buildingBlock"), Some(&Value::from("CRS")));
    for entry in api {
        assert_eq!(entry.get("enabled"), Some(&Value::from(true)));
    }
}

#[test]
fn test_params_file_flows_into_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let params_path = dir.path().join("ldscaffold-params.toml");
    fs::write(
        &params_path,
        "[blocks.STYLES]\nderiveCollectionStyles = false\n",
    )
    .expect("write params");

    let file = ldproxy_scaffold::params::load_params(&params_path)
        .expect("load")
        .expect("params present");
    let blocks = strings(&["STYLES"]);
    let config = ScaffoldConfig::new(
        "demo",
        "public",
        None,
        None,
        false,
        Some(&blocks),
        Some(file.into_overrides()),
    )
    .expect("valid config");
    config.generate(dir.path()).expect("generate");

    let doc = read_yaml(&dir.path().join("services/demo.yml"));
    let styles = &api_list(&doc)[0];
    assert_eq!(
        styles.get("deriveCollectionStyles"),
        Some(&Value::from(false))
    );
}
