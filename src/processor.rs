//! File-level processing shared by the pipelines: walking a source tree with
//! ignore rules, classifying files as static or templated, and writing
//! results while keeping the source permission bits.

use crate::constants::BINARY_SNIFF_LEN;
use crate::error::{Error, Result};
use crate::ignore::{IgnoreMatcher, PatternSet};
use log::{debug, warn};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Returns `path` relative to `root` with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        Error::InvalidPathError(format!("'{}' is outside '{}'", path.display(), root.display()))
    })?;
    let segments = relative
        .components()
        .map(|component| {
            component.as_os_str().to_str().ok_or_else(|| {
                Error::InvalidPathError(format!("'{}' is not valid UTF-8", path.display()))
            })
        })
        .collect::<Result<Vec<&str>>>()?;
    Ok(segments.join("/"))
}

/// Joins a rendered `/`-separated relative path onto `root`.
///
/// Leading `/` left behind by blank tokens is dropped and `.` segments are
/// skipped. Any `..` or absolute component is an error, so the result always
/// lies under `root`.
pub fn join_under(root: &Path, relative: &str) -> Result<PathBuf> {
    let relative = relative.trim_start_matches('/');
    let mut target = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(segment) => target.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidPathError(format!(
                    "'{relative}' leaves '{}'",
                    root.display()
                )));
            }
        }
    }
    Ok(target)
}

/// Looks for a NUL byte in the first bytes of the file.
pub fn looks_binary<P: AsRef<Path>>(path: P) -> Result<bool> {
    let mut head = Vec::with_capacity(BINARY_SNIFF_LEN);
    File::open(path)?.take(BINARY_SNIFF_LEN as u64).read_to_end(&mut head)?;
    Ok(head.contains(&0))
}

/// Static files are copied byte for byte: they match a static glob or look binary.
pub fn is_static(relative: &str, path: &Path, static_globs: &PatternSet) -> Result<bool> {
    if static_globs.is_match(relative) {
        return Ok(true);
    }
    looks_binary(path)
}

/// A single write to the output tree.
#[derive(Debug)]
pub enum FileOperation<'a> {
    CreateDir { target: PathBuf },
    Copy { source: &'a Path, target: PathBuf },
    Write { source: &'a Path, target: PathBuf, content: Vec<u8> },
}

impl<'a> FileOperation<'a> {
    /// Builds the operation for a file: static files are copied, all others
    /// are read as bytes and go through `render`.
    pub fn for_file<F>(
        source: &'a Path,
        target: PathBuf,
        is_static: bool,
        render: F,
    ) -> Result<Self>
    where
        F: FnOnce(&[u8]) -> Vec<u8>,
    {
        if is_static {
            return Ok(Self::Copy { source, target });
        }
        let content = fs::read(source)?;
        if std::str::from_utf8(&content).is_err() {
            debug!("'{}' is not valid UTF-8, processing it as bytes", source.display());
        }
        Ok(Self::Write { source, target, content: render(&content) })
    }

    pub fn target(&self) -> &Path {
        match self {
            Self::CreateDir { target } | Self::Copy { target, .. } | Self::Write { target, .. } => {
                target
            }
        }
    }

    pub fn execute(&self) -> Result<()> {
        match self {
            Self::CreateDir { target } => {
                fs::create_dir_all(target)?;
            }
            Self::Copy { source, target } => {
                create_parent(target)?;
                debug!("Copying file: {}", target.display());
                // fs::copy carries the permission bits over.
                fs::copy(source, target)?;
            }
            Self::Write { source, target, content } => {
                create_parent(target)?;
                debug!("Writing file: {}", target.display());
                fs::write(target, content)?;
                fs::set_permissions(target, fs::metadata(source)?.permissions())?;
            }
        }
        Ok(())
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Walks a source tree in sorted pre-order, calling `visit` with every entry
/// that is not ignored, together with its `/`-separated relative path.
///
/// The root itself is not visited. Entries under any of `skip` (e.g. an
/// output directory nested in the source) are pruned, as are ignored
/// directories. Returns the number of entries left out by the ignore rules.
pub fn walk_source<F>(
    source_root: &Path,
    skip: &[PathBuf],
    matcher: &IgnoreMatcher,
    mut visit: F,
) -> Result<usize>
where
    F: FnMut(&DirEntry, &str) -> Result<()>,
{
    let mut ignored = 0;
    let mut walker = WalkDir::new(source_root).sort_by_file_name().into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }
        let path = entry.path();
        let is_dir = entry.file_type().is_dir();

        if skip.iter().any(|dir| path.starts_with(dir)) {
            debug!("Skipping output directory {}", path.display());
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }
        if entry.path_is_symlink() && path.is_dir() {
            warn!("Skipping symlinked directory {}", path.display());
            continue;
        }

        let relative = relative_path(source_root, path)?;
        if matcher.is_ignored(&relative, is_dir) {
            debug!("Skipping '{relative}' matched by ignore patterns");
            ignored += 1;
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }
        visit(&entry, &relative)?;
    }
    Ok(ignored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_uses_forward_slashes() {
        let root = Path::new("/work/project");
        let path = root.join("src").join("main.rs");
        assert_eq!(relative_path(root, &path).unwrap(), "src/main.rs");
    }

    #[test]
    fn join_under_drops_leading_separators() {
        let root = Path::new("/work/out");
        assert_eq!(join_under(root, "/var/x.txt").unwrap(), root.join("var").join("x.txt"));
        assert_eq!(join_under(root, "./a//b").unwrap(), root.join("a").join("b"));
        assert_eq!(join_under(root, "").unwrap(), root);
    }

    #[test]
    fn join_under_rejects_parent_segments() {
        let result = join_under(Path::new("/work/out"), "../../etc/passwd");
        assert!(matches!(result, Err(Error::InvalidPathError(_))));
    }

    #[test]
    fn relative_path_outside_root_is_an_error() {
        let result = relative_path(Path::new("/work/project"), Path::new("/elsewhere/file"));
        assert!(matches!(result, Err(Error::InvalidPathError(_))));
    }
}
