//! Configuration handling for scaffo.
//! This module provides the configuration model consumed by the pipelines,
//! its built-in defaults, and loading/saving in JSON or YAML form.

use crate::constants::{
    DEFAULT_IGNORE_FILES, DEFAULT_IGNORE_FOLDERS, DEFAULT_STATIC_GLOBS, DEFAULT_TEMPLATE_DIR,
    DEFAULT_TOKEN_END, DEFAULT_TOKEN_START,
};
use crate::error::{Error, Result};
use crate::ignore::{merge_patterns, IgnoreMatcher};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Declares one template variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variable {
    /// Informational type tag; values are always strings.
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub description: String,
    /// Name of the variable this one is derived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Transform applied to the `from` value (see `resolver::apply_transform`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

impl Variable {
    pub fn string(description: &str, required: bool) -> Self {
        Self {
            kind: "string".to_string(),
            required,
            description: description.to_string(),
            ..Default::default()
        }
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn derived(mut self, from: &str, transform: &str) -> Self {
        self.from = Some(from.to_string());
        self.transform = Some(transform.to_string());
        self
    }

    /// Declared default, treating a blank string as absent.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.trim().is_empty())
    }

    pub fn source(&self) -> Option<&str> {
        self.from.as_deref().filter(|f| !f.trim().is_empty())
    }
}

/// Literal find/replace pair applied to file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub find: String,
    #[serde(rename = "replaceWith")]
    pub replace_with: String,
}

impl Replacement {
    pub fn new(find: impl Into<String>, replace_with: impl Into<String>) -> Self {
        Self { find: find.into(), replace_with: replace_with.into() }
    }
}

/// Renames a leading path segment (or a whole path).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    pub from: String,
    pub to: String,
}

impl RenameRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }
}

/// Token delimiters surrounding a variable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenDelimiters {
    pub start: String,
    pub end: String,
}

impl Default for TokenDelimiters {
    fn default() -> Self {
        Self { start: DEFAULT_TOKEN_START.to_string(), end: DEFAULT_TOKEN_END.to_string() }
    }
}

impl TokenDelimiters {
    pub fn new(start: &str, end: &str) -> Self {
        Self { start: start.to_string(), end: end.to_string() }.normalized()
    }

    /// Trims both delimiters and replaces blank ones with the defaults.
    pub fn normalized(self) -> Self {
        let start = self.start.trim();
        let end = self.end.trim();
        Self {
            start: if start.is_empty() { DEFAULT_TOKEN_START } else { start }.to_string(),
            end: if end.is_empty() { DEFAULT_TOKEN_END } else { end }.to_string(),
        }
    }

    /// Builds the token for a variable name, e.g. `{{PROJECT_NAME}}`.
    pub fn wrap(&self, name: &str) -> String {
        format!("{}{}{}", self.start, name, self.end)
    }
}

/// Scaffolding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub source_root: PathBuf,
    pub template_root: PathBuf,
    pub token: TokenDelimiters,
    pub ignore_folders: Vec<String>,
    pub ignore_files: Vec<String>,
    pub static_files: Vec<String>,
    pub variables: IndexMap<String, Variable>,
    pub replacements: Vec<Replacement>,
    pub rename_rules: Vec<RenameRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("."),
            template_root: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            token: TokenDelimiters::default(),
            ignore_folders: Vec::new(),
            ignore_files: Vec::new(),
            static_files: Vec::new(),
            variables: IndexMap::new(),
            replacements: Vec::new(),
            rename_rules: Vec::new(),
        }
    }
}

impl Config {
    /// Normalizes delimiters and roots and merges the pattern lists with the
    /// built-in defaults. Idempotent.
    pub fn with_defaults(mut self) -> Self {
        self.token = self.token.normalized();
        if self.source_root.as_os_str().is_empty() {
            self.source_root = PathBuf::from(".");
        }
        if self.template_root.as_os_str().is_empty() {
            self.template_root = PathBuf::from(DEFAULT_TEMPLATE_DIR);
        }
        self.ignore_folders = merge_patterns(DEFAULT_IGNORE_FOLDERS, &self.ignore_folders);
        self.ignore_files = merge_patterns(DEFAULT_IGNORE_FILES, &self.ignore_files);
        self.static_files = merge_patterns(DEFAULT_STATIC_GLOBS, &self.static_files);
        self
    }

    /// Ignore rules for a walk: the configured folder and file lists merged
    /// with the built-in defaults, plus `extra` (the project's ignore file).
    pub fn ignore_matcher(&self, extra: &[String]) -> IgnoreMatcher {
        IgnoreMatcher::new(
            &merge_patterns(DEFAULT_IGNORE_FOLDERS, &self.ignore_folders),
            &merge_patterns(DEFAULT_IGNORE_FILES, &self.ignore_files),
            extra,
        )
    }

    /// Static globs merged with the built-in defaults.
    pub fn static_globs(&self) -> Vec<String> {
        merge_patterns(DEFAULT_STATIC_GLOBS, &self.static_files)
    }

    /// Parses configuration content. YAML is used for `.yaml`/`.yml`
    /// extensions, JSON otherwise.
    pub fn parse(content: &str, format_hint: &Path) -> Result<Self> {
        let config: Config = if is_yaml(format_hint) {
            serde_yaml::from_str(content)?
        } else {
            serde_json::from_str(content)?
        };
        Ok(config.with_defaults())
    }

    /// Loads configuration from a file and applies defaults.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the file does not exist
    /// * `Error::JsonError` / `Error::YamlError` if parsing fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::ConfigError(format!(
                "configuration file '{}' not found",
                path.display()
            )));
        }
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        let mut config = Self::parse(&content, path)?;

        // Relative roots are relative to the config file, not the working directory.
        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if config.source_root.is_relative() {
                config.source_root = base.join(&config.source_root);
            }
            if config.template_root.is_relative() {
                config.template_root = base.join(&config.template_root);
            }
        }
        Ok(config)
    }

    /// Writes the configuration, creating missing parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        fs::write(path, content)?;
        debug!("Configuration written to {}", path.display());
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "yaml" | "yml"))
        .unwrap_or(false)
}
