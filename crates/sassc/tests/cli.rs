//! End-to-end tests for the sassc binary
//!
//! Each test writes its stylesheets into a temporary directory and runs the
//! real binary against them.

use std::path::Path;
use std::process::{Command, Output};

use base64::Engine as _;

const USAGE: &str = "\n{\n  \"status: 5,\n  \"message\": Invalid number of parameters\n}\n\n";

fn sassc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sassc"))
        .args(args)
        .output()
        .expect("Failed to run sassc")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is UTF-8")
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path.to_string_lossy().into_owned()
}

/// Split compiled output into the CSS and the decoded embedded source map.
fn split_embedded_map(out: &str) -> (&str, serde_json::Value) {
    let (css, comment) = out
        .rsplit_once("\n/*# sourceMappingURL=data:application/json;base64,")
        .expect("embedded sourceMappingURL comment");
    let encoded = comment.strip_suffix(" */\n").expect("comment terminator");
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .expect("valid base64");
    (css, serde_json::from_slice(&decoded).expect("valid source map JSON"))
}

#[test]
fn test_no_arguments_prints_usage() {
    let output = sassc(&[]);
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stdout(&output), USAGE);
}

#[test]
fn test_wrong_argument_counts_print_usage() {
    for args in [
        &["only-one.scss"][..],
        &["a.scss", "a.css", "extra"][..],
        &["a", "b", "c", "d", "e"][..],
    ] {
        let output = sassc(args);
        assert_eq!(output.status.code(), Some(5), "args: {args:?}");
        assert_eq!(stdout(&output), USAGE, "args: {args:?}");
    }
}

#[test]
fn test_usage_ignores_existing_files() {
    // Three arguments, even if the first is a perfectly good stylesheet.
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "ok.scss", "a { color: red; }\n");

    let output = sassc(&[input.as_str(), "out.css", "--verbose"]);
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stdout(&output), USAGE);
}

#[test]
fn test_compiles_minimal_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "style.scss", "body { color: red; }\n");
    let out_css = dir.path().join("out.css").to_string_lossy().into_owned();

    let output = sassc(&[input.as_str(), out_css.as_str()]);
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    let (css, map) = split_embedded_map(&out);
    assert_eq!(css, "body {\n  color: red;\n}\n");
    assert!(!out.contains("\"status\""), "unexpected error JSON: {out}");

    assert_eq!(map["version"], 3);
    assert_eq!(map["file"], "out.css");
    assert_eq!(map["sources"][0], "style.scss");
    assert_eq!(map["sourcesContent"][0], "body { color: red; }\n");

    // Nothing is written to the output path.
    assert!(!Path::new(&out_css).exists());
    assert!(!Path::new(&format!("{out_css}.map")).exists());
}

#[test]
fn test_compiles_nesting_variables_and_imports() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "_colors.scss", "$accent: #336699;\n");
    let input = write_fixture(
        dir.path(),
        "main.scss",
        "@import \"colors\";\nnav {\n  ul { margin: 0; }\n  a { color: $accent; }\n}\n",
    );

    // Run from somewhere else to make sure imports resolve next to the input.
    let output = Command::new(env!("CARGO_BIN_EXE_sassc"))
        .args([input.as_str(), "out.css"])
        .current_dir(std::env::temp_dir())
        .output()
        .expect("Failed to run sassc");
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    let (css, _) = split_embedded_map(&out);
    assert!(css.contains("nav ul {\n  margin: 0;\n}"), "got: {css}");
    assert!(css.contains("nav a {\n  color: #336699;\n}"), "got: {css}");
}

#[test]
fn test_numbers_use_precision_ten() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        dir.path(),
        "math.scss",
        "@use \"sass:math\";\n.third { width: math.div(100%, 3); }\n",
    );

    let output = sassc(&[input.as_str(), "out.css"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("width: 33.3333333333%;"));
}

#[test]
fn test_syntax_error_prints_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "broken.scss", "a {\n  color: red\n");

    let output = sassc(&[input.as_str(), "out.css"]);
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.ends_with("}\n"));
    assert!(!out.contains("sourceMappingURL"), "unexpected CSS: {out}");

    let report: serde_json::Value = serde_json::from_str(out.trim_end()).expect("valid JSON");
    assert_eq!(report["status"], 1);
    assert!(report["file"].as_str().unwrap().ends_with("broken.scss"));
    assert!(report["line"].as_u64().unwrap() >= 1);
    assert!(report["column"].as_u64().unwrap() >= 1);
    assert!(!report["message"].as_str().unwrap().is_empty());
    assert!(report["formatted"].as_str().unwrap().starts_with("Error: "));
}

#[test]
fn test_undefined_variable_is_sass_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "undefined.scss", "a { color: $nope; }\n");

    let output = sassc(&[input.as_str(), "out.css"]);
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_str(stdout(&output).trim_end()).unwrap();
    assert_eq!(report["message"], "Undefined variable.");
}

#[test]
fn test_missing_input_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.scss").to_string_lossy().into_owned();

    let output = sassc(&[input.as_str(), "out.css"]);
    assert_eq!(output.status.code(), Some(3));

    let report: serde_json::Value = serde_json::from_str(stdout(&output).trim_end()).unwrap();
    assert_eq!(report["status"], 3);
    assert_eq!(
        report["message"],
        format!("File to read not found or unreadable: {input}")
    );
}

#[test]
fn test_flag_like_arguments_are_paths() {
    let output = sassc(&["--help", "-o"]);
    // Treated as an input file named "--help", which does not exist.
    assert_eq!(output.status.code(), Some(3));
    assert!(stdout(&output).contains("File to read not found or unreadable: --help"));
}

#[test]
fn test_repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_fixture(dir.path(), "good.scss", ".a { .b { top: 1px + 2px; } }\n");
    let bad = write_fixture(dir.path(), "bad.scss", ".a { top: 1px + 2s; }\n");

    for input in [good.as_str(), bad.as_str()] {
        let first = sassc(&[input, "out.css"]);
        let second = sassc(&[input, "out.css"]);
        assert_eq!(first.status.code(), second.status.code());
        assert_eq!(first.stdout, second.stdout);
    }
}

#[test]
fn test_stdout_has_exactly_one_block() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "style.scss", "a { b: c; }\n");

    let output = sassc(&[input.as_str(), "out.css"]);
    let out = stdout(&output);
    assert_eq!(out.matches("sourceMappingURL").count(), 1);
    assert!(output.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_argument_still_counts() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let output = Command::new(env!("CARGO_BIN_EXE_sassc"))
        .arg(OsStr::from_bytes(b"\xff"))
        .output()
        .expect("Failed to run sassc");
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stdout(&output), USAGE);
    assert!(output.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[cfg(unix)]
#[test]
fn test_compiles_non_utf8_input_path() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join(OsStr::from_bytes(b"caf\xe9.scss"));
    std::fs::write(&input, "a { b: c; }\n").expect("Failed to write fixture");

    let output = Command::new(env!("CARGO_BIN_EXE_sassc"))
        .arg(&input)
        .arg("out.css")
        .output()
        .expect("Failed to run sassc");
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    let (css, map) = split_embedded_map(&out);
    assert_eq!(css, "a {\n  b: c;\n}\n");
    // JSON cannot carry the raw byte, so the map gets a replacement character.
    assert!(
        map["sources"][0].as_str().unwrap().ends_with("caf\u{FFFD}.scss"),
        "got: {map}"
    );
    assert_eq!(map["sourcesContent"][0], "a { b: c; }\n");

    let missing = dir.path().join(OsStr::from_bytes(b"gone\xff.scss"));
    let output = Command::new(env!("CARGO_BIN_EXE_sassc"))
        .arg(&missing)
        .arg("out.css")
        .output()
        .expect("Failed to run sassc");
    assert_eq!(output.status.code(), Some(3));
    let report: serde_json::Value = serde_json::from_str(stdout(&output).trim_end()).unwrap();
    assert!(
        report["message"].as_str().unwrap().ends_with("gone\u{FFFD}.scss"),
        "got: {report}"
    );
}
