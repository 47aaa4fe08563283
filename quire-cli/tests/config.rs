use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use tempfile::tempdir;

const NESTED_TREE: &str = r#"{"type":"doc","content":[
  {"type":"bulletList","content":[
    {"type":"listItem","content":[
      {"type":"paragraph","content":[{"type":"text","text":"outer"}]},
      {"type":"bulletList","content":[
        {"type":"listItem","content":[{"type":"paragraph","content":[{"type":"text","text":"inner"}]}]}
      ]}
    ]}
  ]}
]}"#;

#[test]
fn export_respects_list_indent_from_config() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.json");
    fs::write(&input_path, NESTED_TREE).unwrap();

    let config_path = dir.path().join("quire.toml");
    fs::write(
        &config_path,
        r#"[export.rules]
list_indent = 4
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("export")
        .arg(input_path.as_os_str())
        .arg("--config")
        .arg(config_path.as_os_str());

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout, "- outer\n    - inner\n");
}

#[test]
fn extra_params_override_config() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.json");
    fs::write(&input_path, NESTED_TREE).unwrap();

    let config_path = dir.path().join("quire.toml");
    fs::write(&config_path, "[export.rules]\nlist_indent = 4\n").unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("export")
        .arg(input_path.as_os_str())
        .arg("--config")
        .arg(config_path.as_os_str())
        .arg("--extra-list-indent")
        .arg("1");

    let output = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(String::from_utf8(output).unwrap(), "- outer\n - inner\n");
}

#[test]
fn pretty_json_from_config() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("notes.md");
    fs::write(&input_path, "Hello").unwrap();

    let config_path = dir.path().join("quire.toml");
    fs::write(&config_path, "[convert.json]\npretty = true\n").unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("import")
        .arg(input_path.as_os_str())
        .arg("--config")
        .arg(config_path.as_os_str());

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.lines().count() > 1);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["content"][0]["content"][0]["text"], "Hello");
}

#[test]
fn missing_config_file_fails() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("notes.md");
    fs::write(&input_path, "Hello").unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("import")
        .arg(input_path.as_os_str())
        .arg("--config")
        .arg(dir.path().join("absent.toml").as_os_str());

    cmd.assert().failure();
}
