use dirscribe_build::{BuildConfig, CodecError, TreeBuilder, WarningKind};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PROJECT: &str = "\
project/
    src/
        main.py
        utils.py
    tests/
        test_main.py
    README.md
";

fn write_structure(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("structure.txt");
    fs::write(&path, text).unwrap();
    path
}

/// Every path under `root`, relative and sorted, directories suffixed with `/`.
fn snapshot(root: &Path) -> Vec<String> {
    fn visit(base: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let rel = path.strip_prefix(base).unwrap().to_string_lossy().to_string();
            if path.is_dir() {
                out.push(format!("{rel}/"));
                visit(base, &path, out);
            } else {
                out.push(rel);
            }
        }
    }
    let mut out = Vec::new();
    visit(root, root, &mut out);
    out.sort();
    out
}

#[test]
fn test_concrete_scenario() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let config = BuildConfig::new(&out);

    let report = TreeBuilder::new()
        .build_from_str("project/\n    src/\n        main.ext\n", &config)
        .unwrap();

    assert!(report.is_clean());
    assert!(out.join("project").is_dir());
    assert!(out.join("project/src").is_dir());
    let main = out.join("project/src/main.ext");
    assert!(main.is_file());
    assert_eq!(fs::metadata(&main).unwrap().len(), 0);
}

#[test]
fn test_build_from_file() {
    let temp = TempDir::new().unwrap();
    let structure = write_structure(temp.path(), PROJECT);
    let out = temp.path().join("out");

    let report = TreeBuilder::new()
        .build_from_file(&structure, &BuildConfig::new(&out))
        .unwrap();

    assert_eq!(report.materialized.dirs_ensured, 3);
    assert_eq!(report.materialized.files_created, 4);
    assert_eq!(
        snapshot(&out),
        vec![
            "project/",
            "project/README.md",
            "project/src/",
            "project/src/main.py",
            "project/src/utils.py",
            "project/tests/",
            "project/tests/test_main.py",
        ]
    );
}

#[test]
fn test_materializing_twice_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let config = BuildConfig::new(&out);
    let builder = TreeBuilder::new();

    builder.build_from_str(PROJECT, &config).unwrap();
    let first = snapshot(&out);
    fs::write(out.join("project/README.md"), "# keep").unwrap();

    let report = builder.build_from_str(PROJECT, &config).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.materialized.files_created, 0);
    assert_eq!(report.materialized.files_preserved, 4);
    assert_eq!(snapshot(&out), first);
    assert_eq!(
        fs::read_to_string(out.join("project/README.md")).unwrap(),
        "# keep"
    );
}

#[test]
fn test_depth_jump_attaches_to_open_directory() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    let report = TreeBuilder::new()
        .build_from_str("a/\n                deep.txt\n", &BuildConfig::new(&out))
        .unwrap();

    assert!(report.is_clean());
    assert_eq!(snapshot(&out), vec!["a/", "a/deep.txt"]);
}

#[test]
fn test_malformed_indentation_warns_and_continues() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    let report = TreeBuilder::new()
        .build_from_str("   three.txt\nfour.txt\n", &BuildConfig::new(&out))
        .unwrap();

    let warnings: Vec<_> = report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::MalformedIndentation);
    assert_eq!(snapshot(&out), vec!["four.txt", "three.txt"]);
}

#[test]
fn test_missing_structure_file() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    let err = TreeBuilder::new()
        .build_from_file(&temp.path().join("nope.txt"), &BuildConfig::new(&out))
        .unwrap_err();

    assert!(matches!(err, CodecError::InputNotFound { .. }));
    assert!(!out.exists());
}

#[test]
fn test_partial_failure_keeps_going() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    fs::create_dir_all(&out).unwrap();
    // A file where the structure wants a directory
    fs::write(out.join("blocked"), "").unwrap();

    let report = TreeBuilder::new()
        .build_from_str("blocked/\n    inner.txt\nfree/\n    ok.txt\n", &BuildConfig::new(&out))
        .unwrap();

    assert_eq!(report.materialized.failed(), 2);
    assert!(out.join("free/ok.txt").is_file());
    assert_eq!(fs::metadata(out.join("blocked")).unwrap().len(), 0);
    assert!(out.join("blocked").is_file());
}

#[test]
fn test_custom_indent_unit() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let config = BuildConfig::builder()
        .output_root(&out)
        .indent_unit(2usize)
        .build()
        .unwrap();

    let report = TreeBuilder::new()
        .build_from_str("app/\n  lib/\n    mod.rs\n  Cargo.toml\n", &config)
        .unwrap();

    assert!(report.is_clean());
    assert_eq!(
        snapshot(&out),
        vec!["app/", "app/Cargo.toml", "app/lib/", "app/lib/mod.rs"]
    );
}
