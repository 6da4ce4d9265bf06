//! Build pipeline: turns a source project into a template tree.
//!
//! `start -> walking -> writing-metadata -> done`. Any filesystem error
//! aborts the build and leaves the partially written template on disk.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ignore::{parse_ignore_file, PatternSet};
use crate::metadata::TemplateMetadata;
use crate::processor::{is_static, join_under, walk_source, FileOperation};
use crate::rename::Renamer;
use crate::renderer::apply_replacements_bytes;
use log::debug;
use std::fs;
use std::path::{self, Path, PathBuf};

/// File counts of a finished build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub files: usize,
    pub templated: usize,
    pub static_files: usize,
}

/// Canonical source root, or a configuration error naming it.
pub(crate) fn canonical_source_root(config: &Config) -> Result<PathBuf> {
    fs::canonicalize(&config.source_root).map_err(|e| {
        Error::ConfigError(format!(
            "source root '{}' is not accessible: {e}",
            config.source_root.display()
        ))
    })
}

/// Builds a template from `config.source_root` into `template_root`.
///
/// An existing template at `template_root` is replaced. Rename rules are
/// applied in declared order and literal replacements in declared order;
/// tokens already present in the source are kept as they are.
///
/// # Errors
/// * `Error::ConfigError` if the source root is missing or lies inside the template root
/// * any filesystem error met during the walk
pub fn build_template<P: AsRef<Path>>(config: &Config, template_root: P) -> Result<BuildReport> {
    let source_root = canonical_source_root(config)?;
    let template_root = path::absolute(template_root.as_ref())?;

    if template_root.exists() {
        let existing = fs::canonicalize(&template_root)?;
        if source_root.starts_with(&existing) {
            return Err(Error::ConfigError(format!(
                "template root '{}' contains the source root",
                template_root.display()
            )));
        }
        debug!("Replacing existing template at {}", existing.display());
        fs::remove_dir_all(&existing)?;
    }
    fs::create_dir_all(&template_root)?;
    let template_root = fs::canonicalize(&template_root)?;

    let extra = parse_ignore_file(&source_root);
    let matcher = config.ignore_matcher(&extra);
    let static_files = config.static_globs();
    let static_globs = PatternSet::new(&static_files);
    let renamer = Renamer::new(config.rename_rules.clone());

    debug!("Build: walking {}", source_root.display());
    let mut report = BuildReport::default();
    walk_source(&source_root, &[template_root.clone()], &matcher, |entry, relative| {
        let target = join_under(&template_root, &renamer.rename(relative))?;
        if entry.file_type().is_dir() {
            return FileOperation::CreateDir { target }.execute();
        }

        report.files += 1;
        let source = entry.path();
        let operation = FileOperation::for_file(
            source,
            target,
            is_static(relative, source, &static_globs)?,
            |content| apply_replacements_bytes(content, &config.replacements),
        )?;
        match operation {
            FileOperation::Write { .. } => report.templated += 1,
            _ => report.static_files += 1,
        }
        operation.execute()
    })?;

    debug!("Build: writing metadata");
    TemplateMetadata::new(&config.token, &config.variables, static_files).save(&template_root)?;
    debug!("Build: done");
    Ok(report)
}
