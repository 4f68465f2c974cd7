use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_apidoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn render_json() -> serde_json::Value {
    let assert = cmd()
        .args(["-f", "json", "--input", "/project/src"])
        .arg(fixture_path("comments.json"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    serde_json::from_str(&output).unwrap()
}

fn render_html(extra: &[&str]) -> String {
    let assert = cmd()
        .args(["--input", "/project/src"])
        .args(extra)
        .arg(fixture_path("comments.json"))
        .assert()
        .success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

// -- pipeline output (json) --

#[test]
fn json_namespace_paths() {
    let value = render_json();
    let docs = value["docs"].as_array().unwrap();
    let paths: Vec<&str> = docs
        .iter()
        .map(|d| d["namespacePath"].as_str().unwrap())
        .collect();
    assert_eq!(paths, ["", "ui", "ui/dom", "ui", "events"]);
    assert_eq!(docs[2]["context"]["relativeFile"], "ui/dom/mount.js");
}

#[test]
fn json_tree_shape() {
    let value = render_json();
    let tree = &value["tree"];
    assert_eq!(tree["path"], "");
    assert_eq!(tree["items"][0]["name"], "Overview");

    let children = tree["children"].as_object().unwrap();
    assert_eq!(children.len(), 2);
    assert!(children.contains_key("ui"));
    assert!(children.contains_key("events"));

    let ui = &tree["children"]["ui"];
    assert_eq!(ui["items"][0]["name"], "Widget");
    assert_eq!(ui["items"][1]["name"], "resetRegistry");
    assert_eq!(ui["children"]["dom"]["path"], "ui/dom");
    assert_eq!(ui["children"]["dom"]["items"][0]["name"], "mount");
}

#[test]
fn json_constructor_promoted() {
    let value = render_json();
    let widget = &value["docs"][1];
    assert_eq!(widget["constructor"]["name"], "constructor");
    assert_eq!(widget["params"][0]["name"], "el");
    let instance = widget["members"]["instance"].as_array().unwrap();
    assert_eq!(instance.len(), 1);
    assert_eq!(instance[0]["name"], "render");
}

#[test]
fn json_repairs_nested_members() {
    let value = render_json();
    let registry = &value["docs"][1]["members"]["static"][0];
    assert_eq!(registry["type"]["type"], "NameExpression");
    assert_eq!(registry["type"]["name"], "Map");
    assert_eq!(value["docs"][3]["isInternal"], true);
    assert_eq!(value["docs"][2]["isInternal"], false);
}

#[test]
fn json_config_passed_through() {
    let mut config = NamedTempFile::with_suffix(".json").unwrap();
    config
        .write_all(br#"{"input": ["/elsewhere"], "theme": "dark"}"#)
        .unwrap();

    let assert = cmd()
        .args(["-f", "json", "--input", "/project/src"])
        .args(["-c", config.path().to_str().unwrap()])
        .arg(fixture_path("comments.json"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["config"]["theme"], "dark");
    assert_eq!(value["config"]["input"][0], "/project/src");
}

// -- html output --

#[test]
fn html_signatures() {
    let html = render_html(&[]);
    assert!(html.contains("<code>new Widget(el: Element, options: "));
    assert!(html.contains("mount(widget: <a href=\"#widget\">Widget</a>): "));
    assert!(html.contains("<code>Handler(event: Event)</code>"));
}

#[test]
fn html_sidebar_and_notes() {
    let html = render_html(&["--name", "widgets", "--project-version", "2.1.0"]);
    assert!(html.contains("<title>widgets 2.1.0</title>"));
    assert!(html.contains("<li class=\"namespace\" data-path=\"ui/dom\"><span>dom</span>"));
    assert!(html.contains("<h2>Overview</h2>"));
}

#[test]
fn html_examples_and_markdown() {
    let html = render_html(&[]);
    assert!(html.contains("<pre><code class=\"language-js\">"));
    assert!(html.contains("<span class=\"hl-keyword\">new</span>"));
    assert!(html.contains("<p>Attach a <strong>widget</strong> to the page.</p>"));
}

#[test]
fn html_hides_internal() {
    let html = render_html(&[]);
    assert!(!html.contains("resetRegistry"));

    let html = render_html(&["--show-internal"]);
    assert!(html.contains("resetRegistry"));
}

#[test]
fn html_auto_highlight_leaves_shell_examples_plain() {
    let mut config = NamedTempFile::with_suffix(".json").unwrap();
    config
        .write_all(br#"{"hljs": {"highlightAuto": true}}"#)
        .unwrap();
    let input = r#"[{
        "kind": "function",
        "name": "install",
        "examples": [{"description": "$ npm install widgets"}, {"description": "install();"}],
        "context": {"file": "/root/install.js"}
    }]"#;

    let assert = cmd()
        .args(["--input", "/root"])
        .args(["-c", config.path().to_str().unwrap()])
        .write_stdin(input)
        .assert()
        .success();
    let html = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(html.contains("<pre><code>$ npm install widgets</code></pre>"));
    assert!(html.contains("<pre><code class=\"language-js\"><span class=\"hl-"));
}

#[test]
fn mdast_descriptions_render() {
    let input = r#"[{
        "kind": "function",
        "name": "mount",
        "description": {
            "type": "root",
            "children": [{
                "type": "paragraph",
                "children": [
                    {"type": "text", "value": "Attach a "},
                    {"type": "strong", "children": [{"type": "text", "value": "widget"}]},
                    {"type": "text", "value": "."}
                ]
            }]
        },
        "params": [{
            "name": "el",
            "description": {
                "type": "root",
                "children": [{"type": "paragraph", "children": [{"type": "inlineCode", "value": "Element"}]}]
            }
        }],
        "context": {"file": "/root/mount.js"}
    }]"#;

    let assert = cmd()
        .args(["--input", "/root"])
        .write_stdin(input)
        .assert()
        .success();
    let html = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(html.contains("<p>Attach a <strong>widget</strong>.</p>"));
    assert!(html.contains("<li><code>el</code>: <code>Element</code></li>"));
}

// -- stdin and directory modes --

#[test]
fn stdin_mode() {
    let input = r#"[{"kind": "function", "name": "hello", "context": {"file": "/root/a/hello.js"}}]"#;

    let assert = cmd()
        .args(["-f", "json", "--input", "/root"])
        .write_stdin(input)
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["tree"]["children"]["a"]["items"][0]["name"], "hello");
}

#[test]
fn directory_mode_writes_page_and_assets() {
    let dir = TempDir::new().unwrap();
    let extra = TempDir::new().unwrap();
    std::fs::write(extra.path().join("logo.svg"), "<svg/>").unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["--input", "/project/src"])
        .args(["--assets", extra.path().to_str().unwrap()])
        .arg(fixture_path("comments.json"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let page = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(page.contains("<!DOCTYPE html>"));
    assert!(dir.path().join("assets/style.css").is_file());
    assert!(dir.path().join("assets/logo.svg").is_file());
}

#[test]
fn directory_mode_json_extension() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "json", "--input", "/project/src"])
        .arg(fixture_path("comments.json"))
        .assert()
        .success();

    assert!(dir.path().join("index.json").is_file());
}

// -- failures --

#[test]
fn invalid_format_fails() {
    cmd()
        .args(["-f", "xml"])
        .arg(fixture_path("comments.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn malformed_comments_fail() {
    let mut input = NamedTempFile::with_suffix(".json").unwrap();
    input.write_all(b"{ not json").unwrap();

    cmd()
        .arg(input.path().to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse comments"));
}

#[test]
fn missing_comments_file_fails() {
    cmd()
        .arg("/nonexistent/comments.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read /nonexistent/comments.json"));
}
