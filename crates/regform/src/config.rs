// File: src/config.rs
// Purpose: Configuration parsing from regform.toml

use anyhow::{Context, Result};
use regform_validation::RuleOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValidatorConfig {
    #[serde(default)]
    pub rules: RuleOptions,

    #[serde(default)]
    pub submit: SubmitConfig,

    #[serde(default)]
    pub document: DocumentConfig,
}

/// Submission behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// Smooth-scroll the first invalid field into view when submission is blocked
    #[serde(default = "default_true")]
    pub scroll_into_view: bool,
}

/// Element ids and classes the browser host looks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_form_id")]
    pub form_id: String,

    #[serde(default = "default_success_id")]
    pub success_id: String,

    /// Class added to the success element once the form is submitted
    #[serde(default = "default_success_class")]
    pub success_class: String,
}

fn default_true() -> bool {
    true
}

fn default_form_id() -> String {
    "regForm".to_string()
}

fn default_success_id() -> String {
    "successMsg".to_string()
}

fn default_success_class() -> String {
    "show".to_string()
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            scroll_into_view: default_true(),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            form_id: default_form_id(),
            success_id: default_success_id(),
            success_class: default_success_class(),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./regform.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("regform.toml")
    }

    /// Parse TOML content; blank content yields defaults
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }
}
