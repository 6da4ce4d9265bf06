use scaffo::constants::{DEFAULT_IGNORE_FILES, DEFAULT_IGNORE_FOLDERS, IGNORE_FILE};
use scaffo::ignore::{is_ignored, is_included, parse_ignore_file, IgnoreMatcher, PatternSet};
use std::fs;
use tempfile::TempDir;

const NONE: &[&str] = &[];

#[test]
fn test_default_folders_are_ignored() {
    assert!(is_ignored("node_modules", true, DEFAULT_IGNORE_FOLDERS, DEFAULT_IGNORE_FILES, NONE));
    assert!(is_ignored(
        "web/node_modules",
        true,
        DEFAULT_IGNORE_FOLDERS,
        DEFAULT_IGNORE_FILES,
        NONE,
    ));
    assert!(!is_ignored("src", true, DEFAULT_IGNORE_FOLDERS, DEFAULT_IGNORE_FILES, NONE));
}

#[test]
fn test_files_under_ignored_folders_are_ignored() {
    let folders = [".git"];
    assert!(is_ignored("lib/.git/config", false, &folders, NONE, NONE));
    assert!(is_ignored(".git/objects/ab/cdef", false, &folders, NONE, NONE));
    assert!(!is_ignored("lib/.gitignore", false, &folders, NONE, NONE));
}

#[test]
fn test_folder_pattern_with_full_path() {
    let folders = ["docs/drafts"];
    assert!(is_ignored("docs/drafts", true, &folders, NONE, NONE));
    assert!(is_ignored("docs/drafts/2024/plan.md", false, &folders, NONE, NONE));
    assert!(!is_ignored("docs/final/plan.md", false, &folders, NONE, NONE));
}

#[test]
fn test_ignored_directory_ignores_every_nested_file() {
    let matcher = IgnoreMatcher::new(&["vendor"], NONE, NONE);
    assert!(matcher.is_ignored("third_party/vendor", true));
    for file in ["third_party/vendor/a.c", "third_party/vendor/x/y/z.h", "vendor/README"] {
        assert!(matcher.is_ignored(file, false), "{file} should be ignored");
    }
}

#[test]
fn test_file_patterns_match_base_name_and_path() {
    let files = ["*.log", "config/secrets.json"];
    assert!(is_ignored("server.log", false, NONE, &files, NONE));
    assert!(is_ignored("var/run/server.log", false, NONE, &files, NONE));
    assert!(is_ignored("config/secrets.json", false, NONE, &files, NONE));
    assert!(!is_ignored("logs.txt", false, NONE, &files, NONE));
    assert!(!is_ignored("other/config/secrets.json", false, NONE, &files, NONE));
}

#[test]
fn test_file_patterns_do_not_apply_to_directories() {
    let files = ["*.log"];
    assert!(!is_ignored("archive.log", true, NONE, &files, NONE));
}

#[test]
fn test_extra_patterns_apply_to_both_kinds() {
    let extra = ["**/*.tmp", "build/**", "generated"];
    assert!(is_ignored("a/b/c.tmp", false, NONE, NONE, &extra));
    assert!(is_ignored("c.tmp", false, NONE, NONE, &extra));
    assert!(is_ignored("build/out/app", false, NONE, NONE, &extra));
    assert!(is_ignored("src/generated", true, NONE, NONE, &extra));
    assert!(!is_ignored("src/main.rs", false, NONE, NONE, &extra));
}

#[test]
fn test_backslash_paths_are_normalized() {
    let folders = ["node_modules"];
    assert!(is_ignored("web\\node_modules\\pkg\\index.js", false, &folders, NONE, NONE));
}

#[test]
fn test_question_mark_matches_one_character() {
    let files = ["file?.txt"];
    assert!(is_ignored("file1.txt", false, NONE, &files, NONE));
    assert!(!is_ignored("file12.txt", false, NONE, &files, NONE));
}

#[test]
fn test_malformed_pattern_does_not_fail() {
    let extra = ["[unclosed"];
    assert!(is_ignored("notes/[unclosed].md", false, NONE, NONE, &extra));
    assert!(!is_ignored("notes/closed.md", false, NONE, NONE, &extra));
}

#[test]
fn test_is_included() {
    let patterns = ["src/**/*.rs", "Cargo.toml"];
    assert!(is_included("src/lib.rs", &patterns));
    assert!(is_included("src/a/b/mod.rs", &patterns));
    assert!(is_included("Cargo.toml", &patterns));
    assert!(!is_included("tests/a.rs", &patterns));
    // No parent-directory semantics for allow-lists.
    assert!(!is_included("src/main.rs", &["src"]));
}

#[test]
fn test_pattern_set_trims_trailing_separator() {
    let set = PatternSet::new(["__pycache__/"]);
    assert!(set.is_match("__pycache__"));
}

#[test]
fn test_parse_ignore_file() {
    let temp_dir = TempDir::new().unwrap();

    // Test without .scaffoldignore
    assert!(parse_ignore_file(temp_dir.path()).is_empty());

    // Test with .scaffoldignore
    fs::write(
        temp_dir.path().join(IGNORE_FILE),
        "# local artifacts\n\n*.pyc\n   docs\\drafts  \n#trailing comment\n",
    )
    .unwrap();
    let patterns = parse_ignore_file(temp_dir.path());
    assert_eq!(patterns, vec!["*.pyc", "docs/drafts"]);
}
