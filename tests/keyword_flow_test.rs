//! End-to-end keyword flows on Rust sources, using the syntax-tree statement resolver

use keyword_core::commands::{create_keyword, delete_keyword, show_keywords};
use keyword_core::config::KeywordConfigLayer;
use keyword_core::{
    AliasUpdate, BuiltinFallbacks, Document, Keyword, KeywordConfig, RegexMatcher,
    TreeSitterStatementResolver, resolver_for,
};
use std::fs;
use tempfile::TempDir;

fn use_config(cleanup: bool) -> KeywordConfig {
    let layer = KeywordConfigLayer::from_value(serde_json::json!({
        "place": r"(^use [^;]+;\n)+",
        "definition": r"^use ([\w:]+);$",
        "new_place": "^()",
        "cleanup": if cleanup { serde_json::json!(true) } else { serde_json::Value::Null },
        "snippets": [{"contents": "use $value;"}],
        "search": r"^use ([\w:]+) as (\w+);$"
    }))
    .unwrap();
    KeywordConfig::from_layer("use", layer).unwrap()
}

#[test]
fn test_create_and_delete_use_declarations() {
    let config = use_config(false);
    let matcher = RegexMatcher::new();
    let statements = TreeSitterStatementResolver::new();
    let keyword = Keyword::new(&config, &matcher, &statements);
    let fallbacks = BuiltinFallbacks::new(&matcher);

    let mut document = Document::new("use std::fmt;\nuse std::io;\n\nfn main() {}\n");

    create_keyword(&keyword, &mut document, &fallbacks, "std::env", None)
        .unwrap()
        .unwrap();
    assert_eq!(
        document.text(),
        "use std::fmt;\nuse std::io;\nuse std::env;\n\nfn main() {}\n"
    );

    let entries = delete_keyword(&keyword, &mut document, "std::fmt")
        .unwrap()
        .unwrap();
    assert_eq!(document.text(), "use std::io;\nuse std::env;\n\nfn main() {}\n");

    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["std::io", "std::env"]);
}

#[test]
fn test_first_keyword_goes_to_new_place() {
    let config = use_config(false);
    let matcher = RegexMatcher::new();
    let statements = TreeSitterStatementResolver::new();
    let keyword = Keyword::new(&config, &matcher, &statements);
    let fallbacks = BuiltinFallbacks::new(&matcher);

    let mut document = Document::new("fn main() {}\n");
    let created = create_keyword(&keyword, &mut document, &fallbacks, "std::env", None)
        .unwrap()
        .unwrap();

    assert_eq!(created.position, 0);
    assert_eq!(document.text(), "use std::env;\nfn main() {}\n");
}

#[test]
fn test_cleanup_removes_last_use_line() {
    let config = use_config(true);
    let matcher = RegexMatcher::new();
    let statements = TreeSitterStatementResolver::new();
    let keyword = Keyword::new(&config, &matcher, &statements);

    let mut document = Document::new("use std::io;\nfn main() {}\n");
    let entries = delete_keyword(&keyword, &mut document, "std::io")
        .unwrap()
        .unwrap();

    assert_eq!(document.text(), "fn main() {}\n");
    assert_eq!(entries.len(), 1);
    assert!(entries[0].occurrence.is_none());
}

#[test]
fn test_resolver_follows_document_language() {
    let config = use_config(false);
    let matcher = RegexMatcher::new();

    let document = Document::new("use a::b;\n").with_path("src/lib.rs");
    let statements = resolver_for(&document);
    let keyword = Keyword::new(&config, &matcher, statements.as_ref());

    let entries = show_keywords(&keyword, &document).unwrap();
    assert_eq!(entries[0].label, "a::b");
}

#[test]
fn test_alias_update_writes_project_settings() {
    let temp_dir = TempDir::new().unwrap();
    let project_file = temp_dir.path().join("demo.keyword-project");
    fs::write(
        &project_file,
        r#"{"folders": [{"path": "."}], "settings": {"keyword.use": {"aliases": {"old": ["use old;"]}}}}"#,
    )
    .unwrap();
    let source = temp_dir.path().join("lib.rs");
    fs::write(&source, "use std::collections::HashMap as Map;\nuse std::fmt as f;\n").unwrap();

    let update = AliasUpdate::open(temp_dir.path()).unwrap();
    assert_eq!(update.project().path(), project_file.as_path());

    let harvested = update
        .run(&[use_config(false)], &[source], &RegexMatcher::new())
        .unwrap();
    assert_eq!(harvested["use"]["Map"], ["std::collections::HashMap"]);

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&project_file).unwrap()).unwrap();
    assert_eq!(saved["folders"], serde_json::json!([{"path": "."}]));
    assert_eq!(
        saved["settings"]["keyword.use"]["aliases"],
        serde_json::json!({
            "old": ["use old;"],
            "Map": ["std::collections::HashMap"],
            "f": ["std::fmt"]
        })
    );
}
