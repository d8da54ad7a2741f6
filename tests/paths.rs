// Integration tests for file reference resolution
use bib_middleware::core::{Entry, FieldValue, Library};
use bib_middleware::pipeline::Middleware;
use bib_middleware::pipeline::nodes::paths::{ParsePaths, WritePaths, resolve_path};
use std::path::{Path, PathBuf};

fn path_of(entry: &Entry, key: &str) -> PathBuf {
    match &entry.get(key).unwrap().value {
        FieldValue::Path(path) => path.clone(),
        other => panic!("expected a path, got {}", other.kind()),
    }
}

#[test]
fn test_resolution_rules() {
    let root = Path::new("/root");
    assert_eq!(resolve_path(Path::new("/abs/path.pdf"), root), PathBuf::from("/abs/path.pdf"));
    assert_eq!(resolve_path(Path::new("rel/x.pdf"), root), PathBuf::from("/root/rel/x.pdf"));

    if let Some(home) = dirs::home_dir() {
        assert_eq!(resolve_path(Path::new("~/x.pdf"), root), home.join("x.pdf"));
    }
}

#[tokio::test]
async fn test_parse_paths_resolves_existing_and_missing() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("papers")).unwrap();
    std::fs::write(root.path().join("papers/a.pdf"), b"%PDF").unwrap();

    let entry = Entry::new("article", "k")
        .with_field("file", "papers/a.pdf")
        .with_field("look_in", "missing/dir")
        .with_field("title", "papers/a.pdf");

    let block = ParsePaths::new(root.path()).transform_entry(entry, &Library::new()).await;
    assert!(!block.is_failed());

    let entry = block.entry();
    let file = path_of(entry, "file");
    assert_eq!(file, root.path().join("papers/a.pdf"));
    assert!(file.exists());
    // a missing file is reported in the log only
    assert_eq!(path_of(entry, "look_in"), root.path().join("missing/dir"));
    assert_eq!(entry.text("title"), Some("papers/a.pdf"));
}

#[tokio::test]
async fn test_paths_written_back_portably() {
    let root = tempfile::tempdir().unwrap();
    let library = Library::new();

    let entry = Entry::new("article", "k")
        .with_field("file", "sub/a.pdf")
        .with_field("look_in", "/opt/elsewhere");
    let block = ParsePaths::new(root.path()).transform_entry(entry, &library).await;
    let block = WritePaths::new(root.path())
        .transform_entry(block.entry().clone(), &library)
        .await;

    assert_eq!(block.entry().text("file"), Some("sub/a.pdf"));
    assert_eq!(block.entry().text("look_in"), Some("/opt/elsewhere"));
}
