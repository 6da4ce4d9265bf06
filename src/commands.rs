//! Project-level commands that surround the pipelines: writing a starter
//! configuration and summarizing what a build would pick up.

use crate::build::canonical_source_root;
use crate::config::{Config, RenameRule, Replacement, Variable};
use crate::constants::{
    DEFAULT_IGNORE_FILES, DEFAULT_IGNORE_FOLDERS, DEFAULT_STATIC_GLOBS, DEFAULT_TEMPLATE_DIR,
};
use crate::error::Result;
use crate::ignore::parse_ignore_file;
use crate::processor::walk_source;
use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::{self, Path, PathBuf};
use walkdir::WalkDir;

fn to_strings(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

/// Finds a project name from the first `*.csproj` file in the tree, skipping
/// the default ignored folders.
pub fn detect_project_name<P: AsRef<Path>>(source_root: P) -> Option<String> {
    WalkDir::new(source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !DEFAULT_IGNORE_FOLDERS.contains(&&*name)
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .find_map(|entry| {
            entry.file_name().to_str()?.strip_suffix(".csproj").map(str::to_string)
        })
        .filter(|name| !name.is_empty())
}

/// Source root as written into the config: relative to the config file's
/// directory when it lies below it, absolute otherwise.
fn config_relative_source(config_path: &Path, source_root: &Path) -> Result<PathBuf> {
    let source = fs::canonicalize(source_root)?;
    let config_dir = path::absolute(config_path)?
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let config_dir = fs::canonicalize(&config_dir).unwrap_or(config_dir);
    Ok(match source.strip_prefix(&config_dir) {
        Ok(relative) if relative.as_os_str().is_empty() => PathBuf::from("."),
        Ok(relative) => relative.to_path_buf(),
        Err(_) => source,
    })
}

/// Writes a starter configuration for `source_root` to `config_path`.
///
/// The config declares `PROJECT_NAME` and a `PROJECT_SLUG` derived from it.
/// When a project name can be detected, a replacement and a rename rule from
/// that name to the `PROJECT_NAME` token are added.
pub fn init_config<P, Q>(config_path: P, source_root: Q) -> Result<Config>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let config_path = config_path.as_ref();
    let source_root = source_root.as_ref();

    let mut variables = IndexMap::new();
    variables.insert(
        "PROJECT_NAME".to_string(),
        Variable::string("Human-readable project name", true),
    );
    variables.insert(
        "PROJECT_SLUG".to_string(),
        Variable::string("kebab-case slug for folder names", true)
            .derived("PROJECT_NAME", "slug-kebab"),
    );

    let mut config = Config {
        source_root: config_relative_source(config_path, source_root)?,
        template_root: PathBuf::from(DEFAULT_TEMPLATE_DIR),
        ignore_folders: to_strings(DEFAULT_IGNORE_FOLDERS),
        ignore_files: to_strings(DEFAULT_IGNORE_FILES),
        static_files: to_strings(DEFAULT_STATIC_GLOBS),
        variables,
        ..Default::default()
    };

    if let Some(name) = detect_project_name(source_root) {
        debug!("Detected project name '{name}'");
        let token = config.token.wrap("PROJECT_NAME");
        config.replacements.push(Replacement::new(&name, &token));
        config.rename_rules.push(RenameRule::new(&name, &token));
    }

    config.save(config_path)?;
    Ok(config)
}

/// What a build of the configured source tree would include.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Analysis {
    /// Files that would be templated or copied.
    pub files: usize,
    /// Files and directories matched by ignore patterns (directories count once).
    pub skipped: usize,
    pub ignore_file_patterns: usize,
}

/// Walks the source tree with the configured ignore rules without writing anything.
pub fn analyze(config: &Config) -> Result<Analysis> {
    let source_root = canonical_source_root(config)?;
    let extra = parse_ignore_file(&source_root);
    let matcher = config.ignore_matcher(&extra);
    let skip: Vec<PathBuf> = fs::canonicalize(&config.template_root).into_iter().collect();

    let mut files = 0;
    let skipped = walk_source(&source_root, &skip, &matcher, |entry, _| {
        if !entry.file_type().is_dir() {
            files += 1;
        }
        Ok(())
    })?;
    Ok(Analysis { files, skipped, ignore_file_patterns: extra.len() })
}
