use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_document() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time must be monotonic")
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "expl-cli-smoke-{}-{nanos}.json",
        std::process::id()
    ));
    let document = r#"{
        "version": 3,
        "objective": "Learn",
        "init_state_name": "Intro",
        "states": {
            "Intro": {
                "interaction": {
                    "id": "Continue",
                    "handlers": [{"name": "submit", "rule_specs": [{"definition": {"rule_type": "default"}, "dest": "END"}]}]
                }
            }
        }
    }"#;
    fs::write(&path, document).expect("must write document");
    path
}

#[test]
fn graph_subcommand_prints_the_initial_state() {
    let document = temp_document();
    Command::cargo_bin("expl")
        .expect("binary must build")
        .args(["graph", "--document"])
        .arg(&document)
        .assert()
        .success()
        .stdout(predicate::str::contains("init: Intro"))
        .stdout(predicate::str::contains("Intro -> END"));
}

#[test]
fn validate_subcommand_exits_non_zero_for_unknown_files() {
    Command::cargo_bin("expl")
        .expect("binary must build")
        .args(["validate", "--document", "/nonexistent/expl-document.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read file failed"));
}
