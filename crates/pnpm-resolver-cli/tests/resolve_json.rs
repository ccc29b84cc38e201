//! Integration tests for `pnpm-resolve resolve --json` and `paths --json`.
//!
//! Each test builds a small monorepo on disk:
//!
//! ```text
//! <root>/node_modules/hoisted/            root-hoisted package
//! <root>/node_modules/.store/react-npm-18.2.0/node_modules/react/
//! <root>/node_modules/.store/@scope-ui-npm-1.0.0/node_modules/@scope/ui/
//! <root>/packages/app/node_modules/local/ workspace package
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pnpm-resolve"))
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

struct Repo {
    _dir: TempDir,
    root: PathBuf,
}

impl Repo {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        let nm = root.join("node_modules");
        let store = nm.join(".store");
        let app_nm = root.join("packages/app/node_modules");

        write(&nm.join("hoisted/package.json"), r#"{"main": "lib/main"}"#);
        write(&nm.join("hoisted/lib/main.js"), "");

        let react = store.join("react-npm-18.2.0/node_modules/react");
        write(&react.join("package.json"), r#"{"main": "index.js"}"#);
        write(&react.join("index.js"), "");

        let ui = store.join("@scope-ui-npm-1.0.0/node_modules/@scope/ui");
        write(&ui.join("package.json"), r#"{"module": "dist/ui.mjs"}"#);
        write(&ui.join("dist/ui.mjs"), "");

        write(&app_nm.join("local/package.json"), r#"{"exports": {"import": "./esm/index.js"}}"#);
        write(&app_nm.join("local/esm/index.js"), "");

        write(&app_nm.join("broken/package.json"), "{not json");

        Self { _dir: dir, root }
    }

    fn app(&self) -> PathBuf {
        self.root.join("packages/app")
    }

    fn resolve(&self, args: &[&str]) -> Output {
        bin()
            .arg("--json")
            .arg("resolve")
            .arg("--anchor")
            .arg(self.app())
            .args(args)
            .output()
            .expect("Failed to run resolve command")
    }
}

fn parse_results(output: &Output) -> Vec<serde_json::Value> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    json.as_array().expect("output should be an array").clone()
}

#[test]
fn test_resolves_across_all_search_paths() {
    let repo = Repo::new();
    let output = repo.resolve(&["local", "hoisted", "react", "@scope/ui"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let results = parse_results(&output);
    assert_eq!(results.len(), 4);

    let expected = [
        ("local", repo.app().join("node_modules/local/esm/index.js")),
        ("hoisted", repo.root.join("node_modules/hoisted/lib/main.js")),
        (
            "react",
            repo.root
                .join("node_modules/.store/react-npm-18.2.0/node_modules/react/index.js"),
        ),
        (
            "@scope/ui",
            repo.root
                .join("node_modules/.store/@scope-ui-npm-1.0.0/node_modules/@scope/ui/dist/ui.mjs"),
        ),
    ];

    for (result, (spec, path)) in results.iter().zip(expected) {
        assert_eq!(result["specifier"], spec);
        assert_eq!(result["status"], "resolved");
        assert_eq!(result["resolved"], path.display().to_string());
        assert!(result["reason"].is_null());
        assert!(result.get("trace").is_none());
    }
}

#[test]
fn test_unresolved_exits_nonzero() {
    let repo = Repo::new();
    let output = repo.resolve(&["react", "missing-pkg", "./relative"]);

    assert_eq!(output.status.code(), Some(1));

    let results = parse_results(&output);
    assert_eq!(results[0]["status"], "resolved");
    assert_eq!(results[1]["status"], "unresolved");
    assert_eq!(results[1]["reason"], "NOT_FOUND");
    assert!(results[1]["resolved"].is_null());
    assert_eq!(results[2]["reason"], "INELIGIBLE");
}

#[test]
fn test_malformed_manifest_reports_warning() {
    let repo = Repo::new();
    let output = repo.resolve(&["broken"]);

    assert_eq!(output.status.code(), Some(1));

    let results = parse_results(&output);
    assert_eq!(results[0]["reason"], "NO_ENTRY");
    let warnings = results[0]["warnings"].as_array().unwrap();
    assert!(warnings
        .iter()
        .any(|w| w["code"] == "manifest_parse_error"));
}

#[test]
fn test_package_allow_list() {
    let repo = Repo::new();
    let output = repo.resolve(&["--package", "react", "react", "hoisted"]);

    assert_eq!(output.status.code(), Some(1));

    let results = parse_results(&output);
    assert_eq!(results[0]["status"], "resolved");
    assert_eq!(results[1]["reason"], "INELIGIBLE");
}

#[test]
fn test_trace_included_on_request() {
    let repo = Repo::new();
    let output = repo.resolve(&["--trace", "react"]);
    assert!(output.status.success());

    let results = parse_results(&output);
    let trace = results[0]["trace"].as_array().expect("trace should be present");
    assert!(trace.iter().any(|s| s["step"] == "store_lookup"));
    assert_eq!(trace.last().unwrap()["step"], "final_path");
}

#[test]
fn test_debug_flag_controls_resolution_logs() {
    let repo = Repo::new();

    let output = repo.resolve(&["--debug", "react", "missing-pkg"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Resolving react from <entry>"), "stderr: {stderr}");
    assert!(stderr.contains("Resolved react to"), "stderr: {stderr}");
    assert!(stderr.contains("Unable to resolve missing-pkg"), "stderr: {stderr}");

    let output = repo.resolve(&["react", "missing-pkg"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("Resolving react"), "stderr: {stderr}");
    assert!(!stderr.contains("Resolved react to"), "stderr: {stderr}");
    assert!(!stderr.contains("Unable to resolve"), "stderr: {stderr}");
}

#[test]
fn test_debug_logs_carry_importer() {
    let repo = Repo::new();
    let output = repo.resolve(&["--debug", "--importer", "/src/app.js", "react", "missing-pkg"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    // --json switches the log lines to JSON as well.
    let events: Vec<serde_json::Value> = stderr
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect();

    for prefix in ["Resolving react", "Resolved react to", "Unable to resolve missing-pkg"] {
        let event = events
            .iter()
            .find(|e| {
                e["fields"]["message"]
                    .as_str()
                    .is_some_and(|m| m.starts_with(prefix))
            })
            .unwrap_or_else(|| panic!("no event starting with {prefix:?}; stderr: {stderr}"));
        assert_eq!(event["fields"]["importer"], "/src/app.js");
    }
}

#[test]
fn test_unknown_layout_rejected() {
    let output = bin()
        .args(["paths", "--layout", "webpack"])
        .output()
        .expect("Failed to run paths command");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown layout: webpack"), "stderr: {stderr}");
}

#[test]
fn test_config_file_overrides_store() {
    let repo = Repo::new();
    let other = repo.root.join("elsewhere/.store");
    let pkg = other.join("only-here-npm-0.1.0/node_modules/only-here");
    write(&pkg.join("package.json"), "{}");
    write(&pkg.join("index.js"), "");

    // Relative paths in the file are taken relative to the file's directory.
    let config = repo.app().join("resolver.json");
    write(&config, r#"{"pnpmStorePath": "../../elsewhere/.store"}"#);

    let output = bin()
        .args(["--json", "resolve", "--config"])
        .arg(&config)
        .arg("only-here")
        .output()
        .expect("Failed to run resolve command");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let results = parse_results(&output);
    assert_eq!(
        results[0]["resolved"],
        pkg.join("index.js").display().to_string()
    );
}

#[test]
fn test_rollup_layout_paths() {
    let repo = Repo::new();
    let anchor = repo.app().join("build");
    fs::create_dir_all(&anchor).unwrap();

    let output = bin()
        .args(["--json", "paths", "--layout", "rollup", "--anchor"])
        .arg(&anchor)
        .output()
        .expect("Failed to run paths command");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let paths = json["search_paths"].as_array().unwrap();
    assert_eq!(paths.len(), 3);

    assert_eq!(paths[0]["role"], "workspace");
    assert_eq!(
        paths[0]["path"],
        repo.app().join("node_modules").display().to_string()
    );
    assert_eq!(paths[0]["strategy"], "direct");
    assert_eq!(paths[0]["exists"], true);

    assert_eq!(
        paths[1]["path"],
        repo.root.join("node_modules").display().to_string()
    );
    assert_eq!(paths[2]["strategy"], "store");
    assert_eq!(
        paths[2]["path"],
        repo.root.join("node_modules/.store").display().to_string()
    );
}

#[test]
fn test_version_command() {
    let output = bin().arg("version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("pnpm-resolve "));
}
