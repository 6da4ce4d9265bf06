//! Generate pipelines: materialize a project from a built template
//! (two-phase) or straight from the source project (single-phase `run`).

use crate::build::canonical_source_root;
use crate::config::{Config, Variable};
use crate::constants::{METADATA_FILE, PROJECT_NAME_KEYS};
use crate::error::{Error, Result};
use crate::ignore::{parse_ignore_file, PatternSet};
use crate::metadata::TemplateMetadata;
use crate::processor::{is_static, join_under, relative_path, walk_source, FileOperation};
use crate::rename::Renamer;
use crate::renderer::{apply_replacements_bytes, TemplateRenderer, TokenRenderer};
use crate::resolver::{Resolver, Values};
use crate::variations::derive_rules;
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::fs;
use std::path::{self, Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of a generate or run pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Directory the project was written to, after project-name derivation.
    pub output_root: PathBuf,
    pub templated: usize,
    pub static_files: usize,
}

impl GenerateReport {
    fn new(output_root: PathBuf) -> Self {
        Self { output_root, templated: 0, static_files: 0 }
    }

    fn record(&mut self, operation: &FileOperation) {
        match operation {
            FileOperation::Write { .. } => self.templated += 1,
            FileOperation::Copy { .. } => self.static_files += 1,
            FileOperation::CreateDir { .. } => {}
        }
    }
}

/// Replaces the last segment of `output` with the project name, taken from
/// the first of `name`, `projectName`, `PROJECT_NAME` that was resolved.
/// A blank name leaves `output` unchanged.
pub fn project_output_dir(output: &Path, values: &Values) -> PathBuf {
    let name = PROJECT_NAME_KEYS
        .iter()
        .find_map(|key| values.get(*key))
        .map(|name| name.trim())
        .filter(|name| !name.is_empty());
    match (name, output.parent()) {
        (Some(name), Some(parent)) => parent.join(name),
        (Some(name), None) => PathBuf::from(name),
        (None, _) => output.to_path_buf(),
    }
}

/// Ensures the output directory does not exist yet.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if anything exists at `output_dir`
pub fn ensure_new_output<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let output_dir = output_dir.as_ref();
    if output_dir.symlink_metadata().is_ok() {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(())
}

/// Resolves variables, derives the output root and checks it is free.
/// Nothing is written before this succeeds.
fn prepare_output(
    variables: &IndexMap<String, Variable>,
    output: &Path,
    resolver: &Resolver,
) -> Result<(Values, PathBuf)> {
    let values = resolver.resolve(variables)?;
    let output_root = project_output_dir(&path::absolute(output)?, &values);
    ensure_new_output(&output_root)?;
    Ok((values, output_root))
}

fn create_output_root(output_root: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_root)?;
    Ok(fs::canonicalize(output_root)?)
}

/// Copies the configuration file into the project. Failures only warn.
fn copy_config_file(config_path: &Path, output_root: &Path) {
    let Some(file_name) = config_path.file_name() else {
        warn!("Could not copy config file '{}': not a file path", config_path.display());
        return;
    };
    let target = output_root.join(file_name);
    match fs::copy(config_path, &target) {
        Ok(_) => info!("Copied config file to {}", target.display()),
        Err(e) => warn!("Could not copy config file '{}': {e}", config_path.display()),
    }
}

/// Generates a project from a template built by [`crate::build::build_template`].
///
/// Paths get token substitution; files matching the template's static globs
/// (or looking binary) are copied, all others get token substitution.
///
/// # Errors
/// * `Error::MetadataError` if the template has no readable metadata
/// * resolution errors, before anything is written
/// * `Error::OutputDirectoryExistsError`, before anything is written
/// * any filesystem error met during the walk
pub fn generate<P, Q>(
    template_root: P,
    output: Q,
    resolver: &Resolver,
    copy_config: Option<&Path>,
) -> Result<GenerateReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let template_root = template_root.as_ref();
    let metadata = TemplateMetadata::load(template_root)?;
    let template_root = fs::canonicalize(template_root)?;

    let (values, output_root) = prepare_output(&metadata.variables, output.as_ref(), resolver)?;
    let output_root = create_output_root(&output_root)?;
    info!("Generating {} from template {}", output_root.display(), template_root.display());

    let renderer = TokenRenderer::new(metadata.token.clone());
    let static_globs = PatternSet::new(&metadata.static_files);
    let metadata_path = template_root.join(METADATA_FILE);
    let mut report = GenerateReport::new(output_root.clone());

    let mut walker = WalkDir::new(&template_root).min_depth(1).sort_by_file_name().into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry?;
        let source = entry.path();
        if source == metadata_path {
            continue;
        }
        if source.starts_with(&output_root) {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }

        let relative = relative_path(&template_root, source)?;
        let target = join_under(&output_root, &renderer.render(&relative, &values))?;
        let operation = if entry.file_type().is_dir() {
            FileOperation::CreateDir { target }
        } else {
            FileOperation::for_file(
                source,
                target,
                is_static(&relative, source, &static_globs)?,
                |content| renderer.render_bytes(content, &values),
            )?
        };
        report.record(&operation);
        operation.execute()?;
    }

    if let Some(config_path) = copy_config {
        copy_config_file(config_path, &output_root);
    }
    Ok(report)
}

/// Generates a project straight from the source tree, without a template.
///
/// Works on a private copy of `config`: naming-convention variations between
/// the source directory name and the output directory name are appended to
/// the replacements and rename rules, and both lists are sorted longest
/// first. File contents get the replacements, then token substitution.
///
/// # Errors
/// Same as [`generate`], with configuration errors for a missing source root.
pub fn run<Q: AsRef<Path>>(
    config: &Config,
    output: Q,
    resolver: &Resolver,
    copy_config: Option<&Path>,
) -> Result<GenerateReport> {
    let source_root = canonical_source_root(config)?;
    let (values, output_root) = prepare_output(&config.variables, output.as_ref(), resolver)?;

    let mut config = config.clone();
    let source_name = file_name(&source_root);
    let target_name = file_name(&output_root);
    info!("Detecting variations: {source_name} -> {target_name}");
    derive_rules(&source_name, &target_name).extend_config(&mut config);

    let output_root = create_output_root(&output_root)?;
    info!("Scaffolding from {} to {}", source_root.display(), output_root.display());

    let mut skip = vec![output_root.clone()];
    if let Ok(template_root) = fs::canonicalize(&config.template_root) {
        skip.push(template_root);
    }

    let extra = parse_ignore_file(&source_root);
    let matcher = config.ignore_matcher(&extra);
    let static_globs = PatternSet::new(config.static_globs());
    let renamer = Renamer::longest_first(config.rename_rules.clone());
    let renderer = TokenRenderer::new(config.token.clone());
    let mut report = GenerateReport::new(output_root.clone());

    walk_source(&source_root, &skip, &matcher, |entry, relative| {
        let renamed = renamer.rename(relative);
        let target = join_under(&output_root, &renderer.render(&renamed, &values))?;
        let source = entry.path();
        let operation = if entry.file_type().is_dir() {
            FileOperation::CreateDir { target }
        } else {
            FileOperation::for_file(
                source,
                target,
                is_static(relative, source, &static_globs)?,
                |content| {
                    let replaced = apply_replacements_bytes(content, &config.replacements);
                    renderer.render_bytes(&replaced, &values)
                },
            )?
        };
        debug!("{relative} -> {}", operation.target().display());
        report.record(&operation);
        operation.execute()
    })?;

    if let Some(config_path) = copy_config {
        copy_config_file(config_path, &output_root);
    }
    Ok(report)
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}
