use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn narrator() -> Command {
    Command::cargo_bin("frame-narrator").unwrap()
}

const VALID_DOC: &str = "text: A valid frame.\nselectedFile: src/a.js\n```js\nlet x = 1;\n```\n---\n";

#[test]
fn parse_prints_frames_json() {
    let dir = tempfile::tempdir().unwrap();
    let md = dir.path().join("frames.md");
    fs::write(&md, VALID_DOC).unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["parse", "frames.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"selectedFile\": \"src/a.js\""))
        .stdout(predicate::str::contains("\"language\": \"js\""));
}

#[test]
fn parse_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let md = dir.path().join("frames.md");
    fs::write(&md, VALID_DOC).unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["parse", "frames.md", "--output", "frames.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 frames"));

    let json = fs::read_to_string(dir.path().join("frames.json")).unwrap();
    assert!(json.contains("\"text\": \"A valid frame.\""));
}

#[test]
fn parse_rejects_missing_text() {
    let dir = tempfile::tempdir().unwrap();
    let md = dir.path().join("frames.md");
    fs::write(&md, "selectedFile: a.js\n---\n").unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["parse", "frames.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field \"text\""));
}

#[test]
fn check_passes_a_valid_document() {
    let dir = tempfile::tempdir().unwrap();
    let md = dir.path().join("frames.md");
    fs::write(&md, VALID_DOC).unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["check", "frames.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Frame 1: ✓"));
}

#[test]
fn check_fails_on_missing_fields_and_budget() {
    let dir = tempfile::tempdir().unwrap();
    let md = dir.path().join("frames.md");
    let code: String = (0..30).map(|i| format!("line {i}\n")).collect();
    fs::write(&md, format!("selectedFile: a.js\n```js\n{code}```\n---\n")).unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["check", "frames.md", "--max-code-lines", "24"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing text:"))
        .stdout(predicate::str::contains("30/24 lines (6 over)"));
}

#[test]
fn check_flags_document_not_ending_with_separator() {
    let dir = tempfile::tempdir().unwrap();
    let md = dir.path().join("frames.md");
    fs::write(&md, "text: Fine.\nselectedFile: a.js\n").unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["check", "frames.md"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("does not end with ---"));
}

#[test]
fn check_sanitizes_the_document_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let md = dir.path().join("frames.md");
    fs::write(
        &md,
        "text: Compare with x === y.\nselectedFile: a.js\n```js\nlet x;\n```\n---\n",
    )
    .unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["check", "frames.md"])
        .assert()
        .success();

    let rewritten = fs::read_to_string(&md).unwrap();
    assert!(rewritten.contains("x strictly equals y"));
}

#[test]
fn sanitize_reports_substitution_count() {
    let dir = tempfile::tempdir().unwrap();
    let md = dir.path().join("frames.md");
    fs::write(&md, "text: a === b\nselectedFile: a.js\n---\n").unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["sanitize", "frames.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 TTS substitution made"));
}

#[test]
fn sanitize_leaves_clean_documents_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let md = dir.path().join("frames.md");
    fs::write(&md, VALID_DOC).unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["sanitize", "frames.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes needed"));
}

#[test]
fn generate_fails_on_missing_frames_file() {
    let dir = tempfile::tempdir().unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["generate", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read frames"));
}

#[test]
fn generate_fails_on_malformed_frames_json() {
    let dir = tempfile::tempdir().unwrap();
    let frames = dir.path().join("frames.json");
    fs::write(&frames, "this is not json").unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["generate", "frames.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse frames"));
}

#[test]
fn models_lists_the_pocket_backend() {
    let dir = tempfile::tempdir().unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["models"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pocket-tts"));
}

#[test]
fn bare_config_prints_the_default_path() {
    let dir = tempfile::tempdir().unwrap();

    narrator()
        .current_dir(dir.path())
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}
