use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_crd-update"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_patch_from_stdin() {
    let input = std::fs::read_to_string(fixture("httpsource-crd.yaml")).unwrap();
    let output = run_with_stdin(&[], &input);

    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let doc: serde_yaml::Value = serde_yaml::from_str(&stdout).unwrap();
    assert_eq!(doc["kind"], serde_yaml::Value::from("CustomResourceDefinition"));
    let sink = &doc["spec"]["versions"][0]["schema"]["openAPIV3Schema"]["properties"]["spec"]
        ["properties"]["sink"];
    assert!(sink["description"]
        .as_str()
        .unwrap()
        .ends_with("the events will be sent back to the sender."));
}

#[test]
fn test_schema_path_error() {
    let input = std::fs::read_to_string(fixture("no-spec-crd.yaml")).unwrap();
    let output = run_with_stdin(&[], &input);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.contains("unable to read spec definition from OpenAPI schema"));
}

#[test]
fn test_multi_document_error() {
    let input = std::fs::read_to_string(fixture("multi-document.yaml")).unwrap();
    let output = run_with_stdin(&[], &input);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a single YAML document"));
}

#[test]
fn test_parse_error() {
    let output = run_with_stdin(&[], "spec: [unclosed\n");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a valid YAML document"));
}

#[test]
fn test_input_and_output_files() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("patched.yaml");

    let output = run_with_stdin(
        &[
            "--input",
            fixture("required-sink-crd.yaml").to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
            "--catalog",
            "b",
        ],
        "",
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let patched = std::fs::read_to_string(&output_path).unwrap();
    assert!(patched.contains("nodeSelector"));
}

#[test]
fn test_failed_patch_leaves_output_file_alone() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("patched.yaml");

    let output = run_with_stdin(
        &["--output", output_path.to_str().unwrap()],
        "spec:\n  group: example.com\n",
    );

    assert!(!output.status.success());
    assert!(!output_path.exists());
}

#[test]
fn test_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("crd-update.yaml");
    std::fs::write(&config_path, "version: \"1.0\"\ncatalog:\n  variant: c\n").unwrap();

    let input = std::fs::read_to_string(fixture("required-sink-crd.yaml")).unwrap();
    let output = run_with_stdin(&["--config", config_path.to_str().unwrap()], &input);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("affinity"));
    assert!(!stdout.contains("tolerations"));
}

#[test]
fn test_unknown_catalog_variant() {
    let output = run_with_stdin(&["--catalog", "z"], "");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_catalog_list() {
    let output = run_with_stdin(&["catalog", "list"], "");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Available catalog variants:"));
    assert!(stdout.contains("c-no-sink"));
    assert!(stdout.contains("(default)"));
}

#[test]
fn test_catalog_show() {
    let output = run_with_stdin(&["catalog", "show", "c"], "");

    assert!(output.status.success());
    let doc: serde_yaml::Value =
        serde_yaml::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert!(doc["sink"].get("anyOf").is_some());
    assert!(doc["adapterOverrides"]["properties"].get("env").is_none());
}

#[test]
fn test_catalog_show_json() {
    let output = run_with_stdin(&["catalog", "show", "c-no-sink", "--format", "json"], "");

    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(doc.get("sink").is_none());
    assert!(doc["adapterOverrides"]["properties"]["public"].is_object());
}

#[test]
fn test_width_flag_folds_output() {
    let input = std::fs::read_to_string(fixture("httpsource-crd.yaml")).unwrap();
    let narrow = run_with_stdin(&["--width", "60"], &input);
    let wide = run_with_stdin(&["--width", "10000"], &input);

    assert!(narrow.status.success());
    assert!(wide.status.success());

    let narrow = String::from_utf8_lossy(&narrow.stdout);
    let wide = String::from_utf8_lossy(&wide.stdout);
    assert!(narrow.lines().count() > wide.lines().count());

    let narrow: serde_yaml::Value = serde_yaml::from_str(&narrow).unwrap();
    let wide: serde_yaml::Value = serde_yaml::from_str(&wide).unwrap();
    assert_eq!(narrow, wide);
}
