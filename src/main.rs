//! scaffo's main application entry point and orchestration logic.
//! Handles command-line argument parsing and dispatches to the pipelines.

use std::path::{Path, PathBuf};

use scaffo::{
    build::build_template,
    cli::{get_args, Args, Command, ValueArgs},
    commands::{analyze, init_config},
    config::Config,
    constants::{DEFAULT_OUTPUT_DIR, DEFAULT_TEMPLATE_DIR},
    error::{default_error_handler, Result},
    generate::{generate, run as run_project, GenerateReport},
    prompt::default_prompter,
    resolver::{EnvOverrides, Resolver},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Loads the config and keeps the config file itself out of the walk.
fn load_config(config_path: &Path, from: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::load(config_path)?;
    if let Some(from) = from {
        config.source_root = from;
    }
    if let Some(file_name) = config_path.file_name() {
        config.ignore_files.push(file_name.to_string_lossy().into_owned());
    }
    Ok(config)
}

fn config_to_copy<'a>(config_path: &'a Path, values: &ValueArgs) -> Option<&'a Path> {
    values.copy_config.then_some(config_path)
}

fn print_generated(report: &GenerateReport) {
    println!(
        "Created {} templated file(s) and {} static asset(s)",
        report.templated, report.static_files
    );
    println!("Project generated at {}", report.output_root.display());
}

fn build(config: &Config, template_root: &Path) -> Result<()> {
    let report = build_template(config, template_root)?;
    println!(
        "Copied {} file(s): {} templated, {} static",
        report.files, report.templated, report.static_files
    );
    println!("Template written to {}", template_root.display());
    Ok(())
}

/// Main application logic execution.
///
/// # Flow
/// * `init` writes a starter config
/// * `analyze` prints a config summary and file counts
/// * `build-template` walks the source and writes the template plus metadata
/// * `generate` resolves variables and materializes a project from a template
/// * `run` resolves variables and materializes a project straight from source
/// * `all` chains `build-template` and `generate`
fn run(args: Args) -> Result<()> {
    let config_path = args.config;
    let prompter = default_prompter();

    match args.command {
        Command::Init { from } => {
            let source_root = from.unwrap_or_else(|| PathBuf::from("."));
            println!("Initializing scaffold config using source root {}", source_root.display());
            let config = init_config(&config_path, &source_root)?;
            if let Some(rule) = config.rename_rules.first() {
                println!("Detected project name: {}", rule.from);
            }
            println!("Config file written to {}", config_path.display());
        }
        Command::Analyze => {
            let config = Config::load(&config_path)?;
            let analysis = analyze(&config)?;
            println!("Config summary:");
            println!("  SourceRoot: {}", config.source_root.display());
            println!("  TemplateRoot: {}", config.template_root.display());
            let (folders, files) = (&config.ignore_folders, &config.ignore_files);
            println!("  IgnoreFolders ({}): {:?}", folders.len(), folders);
            println!("  IgnoreFiles ({}): {:?}", files.len(), files);
            println!("  StaticFiles ({})", config.static_files.len());
            println!("  Variables ({})", config.variables.len());
            for (name, variable) in &config.variables {
                println!("    - {} (type={}, required={})", name, variable.kind, variable.required);
            }
            if analysis.ignore_file_patterns > 0 {
                let patterns = analysis.ignore_file_patterns;
                println!("  Loaded {patterns} pattern(s) from .scaffoldignore");
            }
            println!("  Files to template: {} (skipped {})", analysis.files, analysis.skipped);
        }
        Command::BuildTemplate { from, output } => {
            let config = load_config(&config_path, from)?;
            let template_root = output.unwrap_or_else(|| config.template_root.clone());
            build(&config, &template_root)?;
        }
        Command::Generate { template, out, values } => {
            let template_root = template.unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));
            let output = out.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
            let overrides = EnvOverrides::new().with_values(values.set.clone());
            let resolver = Resolver::new(&overrides, prompter.as_ref());
            let report = generate(
                &template_root,
                &output,
                &resolver,
                config_to_copy(&config_path, &values),
            )?;
            print_generated(&report);
        }
        Command::Run { from, out, values } => {
            let config = load_config(&config_path, from)?;
            let output = out.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
            let overrides = EnvOverrides::new().with_values(values.set.clone());
            let resolver = Resolver::new(&overrides, prompter.as_ref());
            println!("Scaffolding from {}...", config.source_root.display());
            let report =
                run_project(&config, &output, &resolver, config_to_copy(&config_path, &values))?;
            print_generated(&report);
        }
        Command::All { template, out, values } => {
            println!("Running build-template then generate in a single step...");
            let config = load_config(&config_path, None)?;
            let template_root = template.unwrap_or_else(|| config.template_root.clone());
            build(&config, &template_root)?;

            let output = out.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
            let overrides = EnvOverrides::new().with_values(values.set.clone());
            let resolver = Resolver::new(&overrides, prompter.as_ref());
            let report = generate(
                &template_root,
                &output,
                &resolver,
                config_to_copy(&config_path, &values),
            )?;
            print_generated(&report);
        }
    }
    Ok(())
}
