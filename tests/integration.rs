use predicates::prelude::*;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_man2zig")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn mini() -> assert_cmd::Command {
    let mut c = cmd();
    c.args(["-c", &fixture_path("mini.toml")]);
    c
}

/// mini.toml with an extra function that the manual does not document.
fn config_with_unknown_symbol() -> NamedTempFile {
    let raw = std::fs::read_to_string(fixture_path("mini.toml")).unwrap();
    let raw = raw.replace(
        r#"functions = ["mini_call", "mini_pop"]"#,
        r#"functions = ["mini_call", "mini_pop", "mini_missing"]"#,
    );
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), raw).unwrap();
    file
}

// -- generate --

#[test]
fn generate_zig_to_stdout() {
    let expected = std::fs::read_to_string(fixture_path("mini.expected.zig")).unwrap();

    let assert = mini()
        .args(["generate", &fixture_path("manual.html")])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn generate_keeps_registry_order() {
    let assert = mini()
        .args(["generate", &fixture_path("manual.html")])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let positions: Vec<usize> = [
        "pub const mini_State",
        "pub const mini_Hook",
        "pub const mini_call",
        "pub const mini_pop",
        "pub const miniL_check",
        "pub const MINI_MULTRET",
    ]
    .iter()
    .map(|decl| output.find(decl).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

#[test]
fn generate_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("mini.zig");

    mini()
        .args(["generate", &fixture_path("manual.html"), "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let output = std::fs::read_to_string(&out).unwrap();
    let expected = std::fs::read_to_string(fixture_path("mini.expected.zig")).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn generate_json_format() {
    let assert = mini()
        .args(["generate", &fixture_path("manual.html"), "-f", "json"])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let records: serde_json::Value = serde_json::from_str(&output).unwrap();

    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[0]["symbol"], "mini_State");
    assert_eq!(records[0]["category"], "opaque_type");
    assert_eq!(records[3]["symbol"], "mini_pop");
    assert_eq!(records[3]["doc"][0], "Pops n elements from the stack.");
    assert_eq!(records[3]["link"], "https://example.org/manual.html#mini_pop");
    assert_eq!(records[5]["category"], "constant");
}

#[test]
fn invalid_format_fails() {
    mini()
        .args(["generate", &fixture_path("manual.html"), "-f", "markdown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: markdown"));
}

#[test]
fn missing_manual_fails() {
    mini()
        .args(["generate", "/nonexistent/manual.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read manual"));
}

#[test]
fn unknown_symbol_is_skipped_by_default() {
    let config = config_with_unknown_symbol();

    cmd()
        .arg("-c")
        .arg(config.path())
        .args(["generate", &fixture_path("manual.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("pub const mini_pop = c.mini_pop;"))
        .stdout(predicate::str::contains("mini_missing").not())
        .stderr(predicate::str::contains("mini_missing"));
}

#[test]
fn unknown_symbol_fails_in_strict_mode() {
    let config = config_with_unknown_symbol();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("mini.zig");

    cmd()
        .arg("-c")
        .arg(config.path())
        .args(["generate", &fixture_path("manual.html"), "--strict", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 7 symbols could not be extracted"))
        .stderr(predicate::str::contains("mini_missing"));

    assert!(!out.exists());
}

#[test]
fn quiet_suppresses_skip_warnings() {
    let config = config_with_unknown_symbol();

    cmd()
        .arg("-c")
        .arg(config.path())
        .args(["-q", "generate", &fixture_path("manual.html")])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn duplicate_symbol_is_rejected() {
    let raw = std::fs::read_to_string(fixture_path("mini.toml")).unwrap();
    let raw = raw.replace(
        r#"aux_functions = ["miniL_check"]"#,
        r#"aux_functions = ["miniL_check", "mini_pop"]"#,
    );
    let config = NamedTempFile::new().unwrap();
    std::fs::write(config.path(), raw).unwrap();

    cmd()
        .arg("-c")
        .arg(config.path())
        .args(["generate", &fixture_path("manual.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("symbol `mini_pop` is registered twice"));
}

#[test]
fn invalid_config_fails() {
    let config = NamedTempFile::new().unwrap();
    std::fs::write(config.path(), "[manual]\nencoding = \"utf-8\"\n").unwrap();

    cmd()
        .arg("-c")
        .arg(config.path())
        .args(["generate", &fixture_path("manual.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

// -- split --

#[test]
fn split_writes_fragment_cache() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("definitions.json");

    mini()
        .args(["split", &fixture_path("manual.html"), "-o"])
        .arg(&out)
        .assert()
        .success();

    let json = std::fs::read_to_string(&out).unwrap();
    let fragments: Vec<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(fragments.len(), 4);
    assert!(fragments.iter().all(|f| f.starts_with("<hr><h3><a name=")));
    assert!(fragments[0].contains("mini_State"));
    assert!(fragments[2].contains("mini_pop"));
    assert!(!fragments[2].contains("3.8"));
    assert!(fragments[3].contains("miniL_check"));
    assert!(!fragments[3].contains("Standard Libraries"));
}

#[test]
fn split_missing_marker_fails() {
    let raw = std::fs::read_to_string(fixture_path("mini.toml")).unwrap();
    let raw = raw.replace("'<h1>5 '", "'<h1>6 '");
    let config = NamedTempFile::new().unwrap();
    std::fs::write(config.path(), raw).unwrap();
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("-c")
        .arg(config.path())
        .args(["split", &fixture_path("manual.html"), "-o"])
        .arg(dir.path().join("definitions.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("marker not found"));
}

// -- extract --

#[test]
fn extract_prints_prose_and_prototype() {
    mini()
        .args(["extract", &fixture_path("manual.html"), "mini_call"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Calls a function."))
        .stdout(predicate::str::contains(
            "void mini_call (mini_State *L, int nargs, int nresults);",
        ))
        .stdout(predicate::str::contains("mini_pop").not());
}

#[test]
fn extract_unknown_symbol_fails() {
    mini()
        .args(["extract", &fixture_path("manual.html"), "mini_nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no anchor named `mini_nope`"));
}
