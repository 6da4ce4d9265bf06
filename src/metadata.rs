//! Template metadata persisted next to a built template.
//!
//! Written once at the end of build-template, read once at the start of
//! generate, never modified in place.

use crate::config::{TokenDelimiters, Variable};
use crate::constants::METADATA_FILE;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    #[serde(default)]
    pub token: TokenDelimiters,
    #[serde(default)]
    pub variables: IndexMap<String, Variable>,
    /// Merged static globs, matched against template-relative paths.
    #[serde(default)]
    pub static_files: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl TemplateMetadata {
    pub fn new(
        token: &TokenDelimiters,
        variables: &IndexMap<String, Variable>,
        static_files: Vec<String>,
    ) -> Self {
        Self {
            token: token.clone().normalized(),
            variables: variables.clone(),
            static_files,
            generated_at: Utc::now(),
        }
    }

    pub fn path<P: AsRef<Path>>(template_root: P) -> PathBuf {
        template_root.as_ref().join(METADATA_FILE)
    }

    /// Reads the metadata file of a built template.
    ///
    /// # Errors
    /// * `Error::MetadataError` if the file is missing or cannot be parsed
    pub fn load<P: AsRef<Path>>(template_root: P) -> Result<Self> {
        let template_root = template_root.as_ref();
        let metadata_error = |reason: String| Error::MetadataError {
            template_dir: template_root.display().to_string(),
            reason,
        };
        let content = fs::read_to_string(Self::path(template_root))
            .map_err(|e| metadata_error(e.to_string()))?;
        let metadata: TemplateMetadata =
            serde_json::from_str(&content).map_err(|e| metadata_error(e.to_string()))?;
        debug!(
            "Loaded template metadata built at {} with {} variable(s)",
            metadata.generated_at,
            metadata.variables.len()
        );
        Ok(Self { token: metadata.token.normalized(), ..metadata })
    }

    pub fn save<P: AsRef<Path>>(&self, template_root: P) -> Result<()> {
        let path = Self::path(template_root);
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        fs::write(&path, content)?;
        debug!("Template metadata written to {}", path.display());
        Ok(())
    }
}
