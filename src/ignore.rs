//! File and directory classification for scaffo.
//! Decides which entries of a source tree are ignored, which are static assets
//! and which match explicit allow-lists. Also reads `.scaffoldignore` files,
//! similar to .gitignore functionality.

use crate::constants::IGNORE_FILE;
use globset::{GlobBuilder, GlobMatcher};
use log::debug;
use std::{collections::HashSet, fs::read_to_string, path::Path};

/// Converts a path to the canonical `/`-separated form used for matching.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[derive(Debug, Clone)]
enum Pattern {
    Glob(GlobMatcher),
    /// Malformed globs degrade to a substring test instead of failing the walk.
    Literal(String),
}

impl Pattern {
    fn new(pattern: &str) -> Option<Self> {
        let pattern = normalize_path(pattern.trim());
        let pattern = pattern.trim_end_matches('/');
        if pattern.is_empty() {
            return None;
        }
        match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => Some(Self::Glob(glob.compile_matcher())),
            Err(e) => {
                debug!("Pattern '{pattern}' is not a valid glob ({e}), matching it literally");
                Some(Self::Literal(pattern.to_string()))
            }
        }
    }

    fn is_match(&self, path: &str) -> bool {
        match self {
            Self::Glob(matcher) => matcher.is_match(path),
            Self::Literal(literal) => path.contains(literal.as_str()),
        }
    }
}

/// A compiled, ordered list of glob patterns.
///
/// `*` and `?` never cross a `/`, `**` spans any number of segments.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { patterns: patterns.into_iter().filter_map(|p| Pattern::new(p.as_ref())).collect() }
    }

    /// Returns true when any pattern matches the (normalized) path.
    pub fn is_match(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.patterns.iter().any(|pattern| pattern.is_match(&path))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// Ignore rules for one pipeline run, compiled once and queried per entry.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    folders: PatternSet,
    files: PatternSet,
    extra: PatternSet,
}

impl IgnoreMatcher {
    pub fn new<S: AsRef<str>>(ignore_folders: &[S], ignore_files: &[S], extra: &[S]) -> Self {
        Self {
            folders: PatternSet::new(ignore_folders),
            files: PatternSet::new(ignore_files),
            extra: PatternSet::new(extra),
        }
    }

    /// Checks whether a path relative to the walk root must be skipped.
    ///
    /// Directories are tested by base name and full path against the folder
    /// patterns. Files are tested the same way against the file patterns, and
    /// every ancestor directory is tested against the folder patterns, so a
    /// file under an ignored directory is ignored even when the walk did not
    /// prune it. Extra patterns (from `.scaffoldignore`) apply to both kinds.
    pub fn is_ignored(&self, path: &str, is_dir: bool) -> bool {
        let path = normalize_path(path);
        let path = path.trim_end_matches('/');
        let base = base_name(path);

        if is_dir {
            if self.folders.is_match(base) || self.folders.is_match(path) {
                return true;
            }
        } else {
            if self.files.is_match(base) || self.files.is_match(path) {
                return true;
            }
            let segments: Vec<&str> = path.split('/').collect();
            for depth in 1..segments.len() {
                let ancestor = segments[..depth].join("/");
                if self.folders.is_match(segments[depth - 1]) || self.folders.is_match(&ancestor)
                {
                    return true;
                }
            }
        }

        self.extra.is_match(path) || self.extra.is_match(base)
    }
}

/// One-shot form of [`IgnoreMatcher::is_ignored`].
pub fn is_ignored<S: AsRef<str>>(
    path: &str,
    is_dir: bool,
    ignore_folders: &[S],
    ignore_files: &[S],
    extra: &[S],
) -> bool {
    IgnoreMatcher::new(ignore_folders, ignore_files, extra).is_ignored(path, is_dir)
}

/// Positive match against an allow-list. Only the full path is tested; parent
/// directories carry no meaning here.
pub fn is_included<S: AsRef<str>>(path: &str, include_patterns: &[S]) -> bool {
    PatternSet::new(include_patterns).is_match(path)
}

/// Reads the `.scaffoldignore` file from the source root.
///
/// # Notes
/// - If the file doesn't exist, returns an empty list
/// - Each non-blank line is one glob pattern
/// - Lines starting with `#` are comments
///
/// # Example
/// ```ignore
/// # Contents of .scaffoldignore:
/// *.pyc
/// __pycache__/
/// docs/drafts/**
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(source_root: P) -> Vec<String> {
    let ignore_path = source_root.as_ref().join(IGNORE_FILE);
    match read_to_string(&ignore_path) {
        Ok(contents) => {
            let patterns: Vec<String> = contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(normalize_path)
                .collect();
            debug!("Loaded {} pattern(s) from {}", patterns.len(), ignore_path.display());
            patterns
        }
        Err(_) => {
            debug!("{IGNORE_FILE} does not exist");
            Vec::new()
        }
    }
}

/// Ordered union of two pattern lists: trimmed, blanks dropped, first occurrence kept.
pub fn merge_patterns<A, B>(base: &[A], overrides: &[B]) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut seen = HashSet::new();
    base.iter()
        .map(|p| p.as_ref().trim())
        .chain(overrides.iter().map(|p| p.as_ref().trim()))
        .filter(|p| !p.is_empty() && seen.insert(p.to_string()))
        .map(str::to_string)
        .collect()
}
