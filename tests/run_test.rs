use indexmap::IndexMap;
use scaffo::build::build_template;
use scaffo::config::{Config, RenameRule, Replacement, Variable};
use scaffo::error::Error;
use scaffo::generate::run;
use scaffo::prompt::NonInteractivePrompter;
use scaffo::resolver::Resolver;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LOGO: [u8; 10] = [0x89, 0x00, b'M', b'y', b'B', b'a', b'n', b'k', 0x00, 0xff];

fn write<C: AsRef<[u8]>>(root: &Path, relative: &str, content: C) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A project called `MyBank`, spelled in several conventions.
fn my_bank(root: &Path) -> Config {
    let source = root.join("MyBank");
    write(&source, "MyBank/Program.cs", "namespace MyBank; // {{PROJECT_NAME}}");
    write(&source, "my-bank/settings.json", r#"{"name": "my-bank", "env": "MY_BANK_ENV"}"#);
    write(&source, "README.md", "# MyBank\nmybank MYBANK my_bank");
    write(&source, "logo.png", LOGO);
    write(&source, "node_modules/left-pad/index.js", "module.exports = 1;");

    let mut variables = IndexMap::new();
    variables.insert("PROJECT_NAME".to_string(), Variable::string("Project name", true));
    Config { source_root: source, variables, ..Default::default() }.with_defaults()
}

fn resolver_values() -> HashMap<String, String> {
    HashMap::from([("PROJECT_NAME".to_string(), "NewApp".to_string())])
}

#[test_log::test]
fn test_run_applies_variations() {
    let temp_dir = TempDir::new().unwrap();
    let config = my_bank(temp_dir.path());

    let overrides = resolver_values();
    let prompter = NonInteractivePrompter;
    let resolver = Resolver::new(&overrides, &prompter);
    let report = run(&config, temp_dir.path().join("out/new-app"), &resolver, None).unwrap();

    let output = &report.output_root;
    assert!(output.ends_with("out/NewApp"));
    assert_eq!(
        fs::read_to_string(output.join("NewApp/Program.cs")).unwrap(),
        "namespace NewApp; // NewApp"
    );
    assert_eq!(
        fs::read_to_string(output.join("new-app/settings.json")).unwrap(),
        r#"{"name": "new-app", "env": "NEW_APP_ENV"}"#
    );
    assert_eq!(
        fs::read_to_string(output.join("README.md")).unwrap(),
        "# NewApp\nnewapp NEWAPP new_app"
    );
    assert_eq!(fs::read(output.join("logo.png")).unwrap(), LOGO);
    assert!(!output.join("node_modules").exists());
    assert!(!output.join("MyBank").exists());
    assert_eq!(report.templated, 3);
    assert_eq!(report.static_files, 1);
}

#[test]
fn test_run_replaces_in_invalid_utf8() {
    let temp_dir = TempDir::new().unwrap();
    let config = my_bank(temp_dir.path());
    write(&config.source_root, "Legacy.cs", b"// caf\xe9\nnamespace MyBank; // {{PROJECT_NAME}}\n");

    let overrides = resolver_values();
    let prompter = NonInteractivePrompter;
    let resolver = Resolver::new(&overrides, &prompter);
    let report = run(&config, temp_dir.path().join("out/new-app"), &resolver, None).unwrap();

    assert_eq!(
        fs::read(report.output_root.join("Legacy.cs")).unwrap(),
        b"// caf\xe9\nnamespace NewApp; // NewApp\n".to_vec()
    );
}

#[test]
fn test_run_ignores_defaults_without_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("MyBank");
    write(&source, "README.md", "# MyBank");
    write(&source, ".git/HEAD", "ref: refs/heads/main");
    write(&source, "node_modules/x.js", "module.exports = 1;");
    let config = Config { source_root: source, ..Default::default() };

    let overrides: HashMap<String, String> = HashMap::new();
    let prompter = NonInteractivePrompter;
    let resolver = Resolver::new(&overrides, &prompter);
    let report = run(&config, temp_dir.path().join("out/NewApp"), &resolver, None).unwrap();

    assert_eq!(fs::read_to_string(report.output_root.join("README.md")).unwrap(), "# NewApp");
    assert!(!report.output_root.join(".git").exists());
    assert!(!report.output_root.join("node_modules").exists());
}

#[test]
fn test_run_does_not_modify_caller_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = my_bank(temp_dir.path());
    let before = config.clone();

    let overrides = resolver_values();
    let prompter = NonInteractivePrompter;
    let resolver = Resolver::new(&overrides, &prompter);
    run(&config, temp_dir.path().join("out/new-app"), &resolver, None).unwrap();

    assert_eq!(config, before);
}

#[test]
fn test_user_rules_win_ties_with_variations() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = my_bank(temp_dir.path());
    config.rename_rules.push(RenameRule::new("MyBank", "Legacy"));
    config.replacements.push(Replacement::new("MyBank;", "Core;"));
    config.replacements.push(Replacement::new("MyBank", "Legacy"));

    let overrides = resolver_values();
    let prompter = NonInteractivePrompter;
    let resolver = Resolver::new(&overrides, &prompter);
    let report = run(&config, temp_dir.path().join("out/new-app"), &resolver, None).unwrap();

    // Declared rules win ties with the generated `MyBank` rules.
    assert_eq!(
        fs::read_to_string(report.output_root.join("Legacy/Program.cs")).unwrap(),
        "namespace Core; // NewApp"
    );
    assert_eq!(
        fs::read_to_string(report.output_root.join("README.md")).unwrap(),
        "# Legacy\nnewapp NEWAPP new_app"
    );
}

#[test]
fn test_longer_variation_beats_shorter_user_rule() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = my_bank(temp_dir.path());
    config.replacements.push(Replacement::new("Bank", "Vault"));
    config.rename_rules.push(RenameRule::new("my", "ours"));

    let overrides = resolver_values();
    let prompter = NonInteractivePrompter;
    let resolver = Resolver::new(&overrides, &prompter);
    let report = run(&config, temp_dir.path().join("out/new-app"), &resolver, None).unwrap();

    assert_eq!(
        fs::read_to_string(report.output_root.join("README.md")).unwrap(),
        "# NewApp\nnewapp NEWAPP new_app"
    );
    assert!(report.output_root.join("new-app/settings.json").exists());
}

#[test]
fn test_run_skips_nested_template_root() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = my_bank(temp_dir.path());
    config.template_root = config.source_root.join("template-out");
    build_template(&config, &config.template_root).unwrap();

    let overrides = resolver_values();
    let prompter = NonInteractivePrompter;
    let resolver = Resolver::new(&overrides, &prompter);
    let report = run(&config, temp_dir.path().join("out/new-app"), &resolver, None).unwrap();

    assert!(report.output_root.join("README.md").exists());
    assert!(!report.output_root.join("template-out").exists());
}

#[test]
fn test_run_into_existing_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = my_bank(temp_dir.path());
    fs::create_dir_all(temp_dir.path().join("out/NewApp")).unwrap();

    let overrides = resolver_values();
    let prompter = NonInteractivePrompter;
    let resolver = Resolver::new(&overrides, &prompter);
    let result = run(&config, temp_dir.path().join("out/new-app"), &resolver, None);

    assert!(matches!(result, Err(Error::OutputDirectoryExistsError { .. })));
    assert_eq!(fs::read_dir(temp_dir.path().join("out/NewApp")).unwrap().count(), 0);
}

#[test]
fn test_run_with_missing_source() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config { source_root: temp_dir.path().join("nope"), ..Default::default() };

    let overrides: HashMap<String, String> = HashMap::new();
    let prompter = NonInteractivePrompter;
    let resolver = Resolver::new(&overrides, &prompter);
    let result = run(&config, temp_dir.path().join("out"), &resolver, None);

    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_run_copies_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = my_bank(temp_dir.path());
    let config_path = temp_dir.path().join("scaffold.config.json");
    config.save(&config_path).unwrap();

    let overrides = resolver_values();
    let prompter = NonInteractivePrompter;
    let resolver = Resolver::new(&overrides, &prompter);
    let report = run(
        &config,
        temp_dir.path().join("out/new-app"),
        &resolver,
        Some(config_path.as_path()),
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(report.output_root.join("scaffold.config.json")).unwrap(),
        fs::read_to_string(&config_path).unwrap()
    );
}
