use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FIXTURE: &str = r#"
[[models]]
id = "todo"
definition = { title = "Todo list" }

[models.acls]
read_definition = ["system.Everyone"]
create_record = ["system.Authenticated"]
update_my_record = ["system.Authenticated"]
read_all_records = ["admin"]

[[records]]
model = "todo"
id = "r1"
authors = ["alice"]

[[tokens]]
id = "alice"
secret = "alice-secret"

[[tokens]]
id = "bob"
secret = "bob-secret"

[[tokens]]
id = "admin"
secret = "admin-secret"
"#;

fn setup() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let fixture = dir.path().join("fixture.toml");
    fs::write(&fixture, FIXTURE).unwrap();
    let fixture = fixture.to_string_lossy().to_string();
    (dir, fixture)
}

fn cli() -> Command {
    Command::cargo_bin("vellum_cli").unwrap()
}

#[test]
fn test_anonymous_reads_definition() {
    let (_dir, fixture) = setup();

    cli()
        .args(["check", "--fixture", &fixture])
        .args(["--action", "get_definition", "--model", "todo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALLOW read-definition on models/todo"));
}

#[test]
fn test_anonymous_cannot_create_record() {
    let (_dir, fixture) = setup();

    cli()
        .args(["check", "--fixture", &fixture])
        .args(["--action", "create-record", "--model", "todo"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("DENY"));
}

#[test]
fn test_author_may_patch_own_record() {
    let (_dir, fixture) = setup();
    let check = |token: &str, secret: &str| {
        let mut cmd = cli();
        cmd.args(["check", "--fixture", &fixture])
            .args(["--action", "patch-record", "--model", "todo", "--record", "r1"])
            .args(["--token", token, "--secret", secret]);
        cmd
    };

    check("alice", "alice-secret").assert().success();
    check("bob", "bob-secret")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("outcome:    Denied"));
}

#[test]
fn test_wrong_secret_is_anonymous() {
    let (_dir, fixture) = setup();

    cli()
        .args(["check", "--fixture", &fixture])
        .args(["--action", "post_record", "--model", "todo"])
        .args(["--token", "alice", "--secret", "guess"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("principals: {system.Everyone}"));
}

#[test]
fn test_model_creators_from_config() {
    let (dir, fixture) = setup();
    let config = dir.path().join("vellum.toml");
    fs::write(&config, "model_creators = [\"admin\"]\nlog_level = \"error\"\n").unwrap();
    let config = config.to_string_lossy().to_string();

    cli()
        .args(["--config", &config, "check", "--fixture", &fixture])
        .args(["--action", "create-model"])
        .args(["--token", "admin", "--secret", "admin-secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Allowed (model creator)"));

    cli()
        .args(["--config", &config, "check", "--fixture", &fixture])
        .args(["--action", "create-model"])
        .args(["--token", "alice", "--secret", "alice-secret"])
        .assert()
        .code(1);
}

#[test]
fn test_replace_missing_model() {
    let (_dir, fixture) = setup();

    // Default configuration lets everyone create models
    cli()
        .args(["check", "--fixture", &fixture])
        .args(["--action", "put_model", "--model", "fresh"])
        .assert()
        .success();
}

#[test]
fn test_json_output() {
    let (_dir, fixture) = setup();

    let output = cli()
        .args(["check", "--fixture", &fixture, "--json"])
        .args(["--action", "get_records", "--model", "todo"])
        .args(["--token", "admin", "--secret", "admin-secret"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let evaluation: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(evaluation["action"], "list-records");
    assert_eq!(evaluation["outcome"], "Allowed");
    assert_eq!(evaluation["resource"]["model_id"], "todo");
}

#[test]
fn test_invalid_config_is_an_error() {
    let (dir, fixture) = setup();
    let config = dir.path().join("vellum.toml");
    fs::write(&config, "model_creators = [\"system.Everyone\"]\n").unwrap();
    let config = config.to_string_lossy().to_string();

    cli()
        .args(["--config", &config, "check", "--fixture", &fixture])
        .args(["--action", "create-model"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_unknown_action_rejected() {
    let (_dir, fixture) = setup();

    cli()
        .args(["check", "--fixture", &fixture, "--action", "fly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown action"));
}

#[test]
fn test_actions_listing() {
    cli()
        .arg("actions")
        .assert()
        .success()
        .stdout(predicate::str::contains("patch-record"))
        .stdout(predicate::str::contains("ANY[update_my_record, update_all_records]"));

    let output = cli().args(["actions", "--json"]).output().unwrap();
    let table: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(table.as_object().unwrap().len(), 12);
}

#[test]
fn test_new_token() {
    cli()
        .arg("new-token")
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(r#"^id = "[0-9a-f]{32}"\nsecret = "[0-9a-f]{32}"\n$"#)
                .unwrap(),
        );
}
