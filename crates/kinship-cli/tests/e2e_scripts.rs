//! E2E tests for scripts, project config and the demo walkthrough.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn kin_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("kin"));
    cmd.current_dir(dir);
    cmd.env("XDG_CONFIG_HOME", dir);
    cmd.env_remove("FORMAT");
    cmd.env("KINSHIP_LOG", "error");
    cmd
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture");
}

const JANE_FAMILY: &str = r#"
# Jane's children, two of them married
ADD_PERSON Jane FEMALE
ADD_CHILD Jane Lara FEMALE
ADD_CHILD Jane Emily FEMALE
ADD_CHILD Jane Sarah FEMALE
ADD_CHILD Jane Kurt MALE
ADD_CHILD Jane Russel MALE
ADD_SPOUSE Kurt Fiona
ADD_SPOUSE Lara Michael
GET_RELATIONSHIP Michael SISTER_IN_LAW
GET_RELATIONSHIP Russel PATERNAL_UNCLE
"#;

#[test]
fn run_prints_one_line_per_query() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "kinship.toml", "[tree]\nseed = \"empty\"\n");
    write(dir.path(), "jane.kin", JANE_FAMILY);

    kin_cmd(dir.path())
        .args(["run", "jane.kin"])
        .assert()
        .success()
        .stdout("Emily Sarah Fiona\nNONE\n");
}

#[test]
fn run_json_includes_additions() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "kinship.toml", "[tree]\nseed = \"empty\"\n");
    write(dir.path(), "jane.kin", JANE_FAMILY);

    let output = kin_cmd(dir.path())
        .args(["run", "jane.kin", "--json"])
        .output()
        .expect("kin should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    let outcomes = json.as_array().expect("array");
    assert_eq!(outcomes.len(), 10);
    assert_eq!(outcomes[0]["kind"], "added");
    assert_eq!(outcomes[8]["kind"], "related");
    assert_eq!(
        outcomes[8]["names"],
        serde_json::json!(["Emily", "Sarah", "Fiona"])
    );
}

#[test]
fn run_on_sample_tree_extends_it() {
    let dir = TempDir::new().expect("tempdir");
    write(
        dir.path(),
        "karlo.kin",
        "ADD_CHILD Victoire Karlo MALE\nGET_RELATIONSHIP Karlo MATERNAL_AUNT\nGET_RELATIONSHIP Remus SIBLINGS\n",
    );

    kin_cmd(dir.path())
        .args(["run", "karlo.kin"])
        .assert()
        .success()
        .stdout("Dominique\nKarlo\n");
}

#[test]
fn script_error_reports_line_and_code() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "bad.kin", "# header\nADD_CHILD Bill Baby MALE\n");

    let output = kin_cmd(dir.path())
        .args(["run", "bad.kin", "--json"])
        .output()
        .expect("kin should not crash");
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).expect("error JSON");
    assert_eq!(json["error"]["error_code"], "K2004");
    let message = json["error"]["message"].as_str().expect("message");
    assert!(message.contains("line 2"), "message was: {message}");
}

#[test]
fn configured_scripts_apply_before_commands() {
    let dir = TempDir::new().expect("tempdir");
    write(
        dir.path(),
        "kinship.toml",
        "[tree]\nseed = \"empty\"\nscripts = [\"jane.kin\"]\n",
    );
    write(dir.path(), "jane.kin", JANE_FAMILY);

    kin_cmd(dir.path())
        .args(["query", "Fiona", "BROTHER_IN_LAW"])
        .assert()
        .success()
        .stdout("Russel Michael\n");
}

#[test]
fn root_flag_points_at_another_project() {
    let project = TempDir::new().expect("tempdir");
    let elsewhere = TempDir::new().expect("tempdir");
    write(project.path(), "kinship.toml", "[tree]\nseed = \"empty\"\n");

    kin_cmd(elsewhere.path())
        .arg("--root")
        .arg(project.path())
        .args(["query", "Bill", "SON"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Person Bill does not exist"));
}

#[test]
fn malformed_config_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "kinship.toml", "[tree]\nseed = \"forest\"\n");

    kin_cmd(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("kinship.toml"));

    let output = kin_cmd(dir.path())
        .args(["list", "--json"])
        .output()
        .expect("kin should not crash");
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).expect("error JSON");
    assert_eq!(json["error"]["error_code"], "K1001");
    assert_eq!(
        json["error"]["suggestion"],
        "Fix syntax in kinship.toml and retry."
    );
}

#[test]
fn empty_quoted_name_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "kinship.toml", "[tree]\nseed = \"empty\"\n");
    write(dir.path(), "blank.kin", "ADD_PERSON \"\" FEMALE\n");

    let output = kin_cmd(dir.path())
        .args(["run", "blank.kin", "--json"])
        .output()
        .expect("kin should not crash");
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).expect("error JSON");
    assert_eq!(json["error"]["error_code"], "K4001");
}

#[test]
fn demo_walkthrough_on_sample() {
    let dir = TempDir::new().expect("tempdir");
    kin_cmd(dir.path())
        .arg("demo")
        .assert()
        .success()
        .stdout("Alice Lily\nKarlo\nDominique\n");
}

#[test]
fn demo_fails_without_sample() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "kinship.toml", "[tree]\nseed = \"empty\"\n");
    kin_cmd(dir.path()).arg("demo").assert().failure();
}

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().expect("tempdir");
    kin_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kin"));
}
