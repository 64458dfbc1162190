use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const SYMBOLIC_LINK: &str = r#"<p><a href="java.util.List">List</a></p>"#;

fn cross_reference_role(stdout: &[u8]) -> String {
    let doc: serde_json::Value = serde_json::from_slice(stdout).unwrap();
    let inline = &doc["blocks"][0]["content"][0];
    assert_eq!(inline["type"], "cross_reference");
    inline["role"].as_str().unwrap().to_string()
}

#[test]
fn default_role_is_any() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.html");
    fs::write(&input_path, SYMBOLIC_LINK).unwrap();

    let mut cmd = cargo_bin_cmd!("rst");
    cmd.current_dir(dir.path()).arg(input_path.as_os_str());

    let output = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(cross_reference_role(&output), "any");
}

#[test]
fn role_comes_from_explicit_config_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.html");
    fs::write(&input_path, SYMBOLIC_LINK).unwrap();

    let config_path = dir.path().join("custom.toml");
    fs::write(
        &config_path,
        r#"[convert]
symbolic_role = "java:ref"
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("rst");
    cmd.current_dir(dir.path())
        .arg(input_path.as_os_str())
        .arg("--config")
        .arg(config_path.as_os_str());

    let output = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(cross_reference_role(&output), "java:ref");
}

#[test]
fn rst_toml_in_working_directory_is_picked_up() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("doc.html"), SYMBOLIC_LINK).unwrap();
    fs::write(
        dir.path().join("rst.toml"),
        "[convert]\nsymbolic_role = \"py:obj\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("rst");
    cmd.current_dir(dir.path()).arg("doc.html");

    let output = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(cross_reference_role(&output), "py:obj");
}

#[test]
fn extra_flag_overrides_config_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("doc.html"), SYMBOLIC_LINK).unwrap();
    fs::write(
        dir.path().join("rst.toml"),
        "[convert]\nsymbolic_role = \"py:obj\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("rst");
    cmd.current_dir(dir.path())
        .arg("doc.html")
        .arg("--extra-symbolic-role")
        .arg("cpp:any");

    let output = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(cross_reference_role(&output), "cpp:any");
}

#[test]
fn strict_mode_fails_on_diagnostics_but_still_writes_output() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("doc.html"),
        r#"<p>see<img src="x.png">here</p>"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("rst");
    cmd.current_dir(dir.path()).arg("doc.html").arg("--extra-strict");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("\"unrecognized\""))
        .stderr(predicate::str::contains("1 diagnostic(s) recorded"));
}

#[test]
fn lenient_mode_succeeds_on_diagnostics() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("doc.html"),
        r#"<p>see<img src="x.png">here</p>"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("rst");
    cmd.current_dir(dir.path()).arg("doc.html");

    cmd.assert().success();
}

#[test]
fn invalid_boolean_extra_is_rejected() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("doc.html"), "<p>x</p>").unwrap();

    let mut cmd = cargo_bin_cmd!("rst");
    cmd.current_dir(dir.path())
        .arg("doc.html")
        .arg("--extra-strict")
        .arg("perhaps");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--extra-strict"));
}
