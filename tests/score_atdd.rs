use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn covcheck() -> Command {
    Command::cargo_bin("covcheck").expect("binary should compile")
}

const SLEEP_CONFIG: &str = r#"
[[items]]
id = "sleep"
text = "Sleep quality"
category = "symptoms"
keywords = ["sleep", "insomnia", "tired"]
threshold = 0.5

[topics]
sleep = ["sleep"]
"#;

fn write_sleep_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("covcheck.toml");
    fs::write(&path, SLEEP_CONFIG).expect("config should write");
    path
}

#[test]
fn score_partial_transcript_exits_one() {
    let dir = TempDir::new().expect("temp dir should be created");
    let transcript = dir.path().join("visit.txt");
    fs::write(&transcript, "I haven't been sleeping well").expect("transcript should write");

    covcheck()
        .arg("score")
        .arg(&transcript)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("# Coverage Report"))
        .stdout(predicate::str::contains("- [x] Sleep quality (sleep)").not())
        .stdout(predicate::str::contains("[sleep]"));
}

#[test]
fn score_covered_custom_checklist_exits_zero() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = write_sleep_config(&dir);
    let transcript = dir.path().join("visit.txt");
    fs::write(&transcript, "We talked about sleep and insomnia at length")
        .expect("transcript should write");

    covcheck()
        .arg("score")
        .arg(&transcript)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Completed: 1/1"))
        .stdout(predicate::str::contains("- [x] Sleep quality (sleep)"));
}

#[test]
fn score_json_reports_policy_and_method() {
    let dir = TempDir::new().expect("temp dir should be created");
    let transcript = dir.path().join("visit.txt");
    fs::write(&transcript, "mood has been low").expect("transcript should write");

    covcheck()
        .arg("score")
        .arg(&transcript)
        .arg("--format")
        .arg("json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"policy\": \"diminishing\""))
        .stdout(predicate::str::contains("\"method\": \"fallback\""));
}

#[test]
fn score_with_topic_signals_reports_hybrid() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = write_sleep_config(&dir);
    let transcript = dir.path().join("visit.txt");
    fs::write(&transcript, "nothing on topic here").expect("transcript should write");
    let topics = dir.path().join("topics.json");
    fs::write(&topics, r#"[{"topic": "sleep", "confidence_score": 0.82}]"#)
        .expect("topics should write");

    covcheck()
        .arg("score")
        .arg(&transcript)
        .arg("--config")
        .arg(&config)
        .arg("--topics")
        .arg(&topics)
        .arg("--format")
        .arg("json")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"method\": \"hybrid\""));
}

#[test]
fn score_rejects_malformed_topic_payload() {
    let dir = TempDir::new().expect("temp dir should be created");
    let transcript = dir.path().join("visit.txt");
    fs::write(&transcript, "sleep came up").expect("transcript should write");
    let topics = dir.path().join("topics.json");
    fs::write(&topics, "{not json").expect("topics should write");

    covcheck()
        .arg("score")
        .arg(&transcript)
        .arg("--topics")
        .arg(&topics)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("topic signal parse error"));
}

#[test]
fn score_occurrence_policy_caps_at_one_hundred() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = write_sleep_config(&dir);
    let transcript = dir.path().join("visit.txt");
    fs::write(&transcript, "sleep ".repeat(10)).expect("transcript should write");

    covcheck()
        .arg("score")
        .arg(&transcript)
        .arg("--config")
        .arg(&config)
        .arg("--policy")
        .arg("occurrence")
        .arg("--format")
        .arg("json")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"points\": 100.0"))
        .stdout(predicate::str::contains("\"policy\": \"occurrence\""));
}

#[test]
fn stream_accumulates_incremental_updates() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = write_sleep_config(&dir);

    covcheck()
        .arg("stream")
        .arg("--config")
        .arg(&config)
        .write_stdin("I haven't been sleeping well\nI feel so tired all the time\n")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Completed: 1/1"))
        .stdout(predicate::str::contains("[sleep, tired]"));
}

#[test]
fn stream_with_empty_input_reports_nothing_covered() {
    covcheck()
        .arg("stream")
        .write_stdin("")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Completed: 0/"));
}

#[test]
fn validate_accepts_well_formed_config() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = write_sleep_config(&dir);

    covcheck()
        .arg("validate")
        .arg(&config)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("config ok"));
}

#[test]
fn validate_rejects_duplicate_item_ids() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = dir.path().join("bad.toml");
    fs::write(
        &config,
        r#"
[[items]]
id = "sleep"
text = "Sleep quality"
keywords = ["sleep"]

[[items]]
id = "sleep"
text = "Sleep again"
keywords = ["rest"]
"#,
    )
    .expect("config should write");

    covcheck()
        .arg("validate")
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("duplicate item id"));
}

#[test]
fn score_honors_config_policy_selection() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = dir.path().join("covcheck.toml");
    fs::write(
        &config,
        r#"
[session]
policy = "occurrence"

[[items]]
id = "sleep"
text = "Sleep quality"
keywords = ["sleep"]
"#,
    )
    .expect("config should write");
    let transcript = dir.path().join("visit.txt");
    fs::write(&transcript, "sleep").expect("transcript should write");

    covcheck()
        .arg("score")
        .arg(&transcript)
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"policy\": \"occurrence\""))
        .stdout(predicate::str::contains("\"points\": 20.0"));
}
