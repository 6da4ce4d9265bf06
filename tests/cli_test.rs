use scaffo::cli::{Args, Command};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("scaffo")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_defaults() {
    let parsed = Args::try_parse_from(make_args(&["generate"])).unwrap();

    assert_eq!(parsed.config, PathBuf::from("scaffold.config.json"));
    assert!(!parsed.verbose);
    match parsed.command {
        Command::Generate { template, out, values } => {
            assert_eq!(template, None);
            assert_eq!(out, None);
            assert!(!values.copy_config);
            assert!(values.set.is_empty());
        }
        other => panic!("Expected generate, got {other:?}"),
    }
}

#[test]
fn test_generate_flags() {
    let args = make_args(&[
        "generate",
        "--template",
        "./tpl",
        "--out",
        "./apps/new",
        "--copy-config",
        "--set",
        "PROJECT_NAME=Acme Web",
        "--set",
        "QUERY=a=b",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    let Command::Generate { template, out, values } = parsed.command else {
        panic!("Expected generate");
    };
    assert_eq!(template, Some(PathBuf::from("./tpl")));
    assert_eq!(out, Some(PathBuf::from("./apps/new")));
    assert!(values.copy_config);
    assert_eq!(
        values.set,
        vec![
            ("PROJECT_NAME".to_string(), "Acme Web".to_string()),
            ("QUERY".to_string(), "a=b".to_string()),
        ]
    );
}

#[test]
fn test_global_flags_after_subcommand() {
    let args = make_args(&["run", "--from", "./src", "-v", "-c", "scaffold.yaml"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    assert_eq!(parsed.config, PathBuf::from("scaffold.yaml"));
    assert!(matches!(parsed.command, Command::Run { from: Some(_), out: None, .. }));
}

#[test]
fn test_build_template_args() {
    let args = make_args(&["build-template", "--output", "./template-out"]);
    let parsed = Args::try_parse_from(args).unwrap();

    match parsed.command {
        Command::BuildTemplate { from, output } => {
            assert_eq!(from, None);
            assert_eq!(output, Some(PathBuf::from("./template-out")));
        }
        other => panic!("Expected build-template, got {other:?}"),
    }
}

#[test]
fn test_invalid_args() {
    // Missing subcommand
    assert!(Args::try_parse_from(make_args(&[])).is_err());
    // Malformed --set
    assert!(Args::try_parse_from(make_args(&["run", "--set", "NOVALUE"])).is_err());
    assert!(Args::try_parse_from(make_args(&["run", "--set", "=value"])).is_err());
    // Unknown subcommand
    assert!(Args::try_parse_from(make_args(&["deploy"])).is_err());
}
