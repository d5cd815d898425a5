//! YAML configuration for ERD generation.
//!
//! Every section and field is optional:
//!
//! ```yaml
//! extract:
//!   comment_scope: statement   # or: global
//!   promote_table_keys: false
//! markup:
//!   type_style: declared       # or: base
//! render:
//!   command: mmdc
//!   theme: base
//!   theme_variables:
//!     primary_color: "#f9f9f9"
//! output:
//!   file_name: er_diagram.svg
//! ```

use crate::erd::MarkupOptions;
use crate::extract::ExtractOptions;
use crate::render::RenderConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default name for rendered SVG files
pub const DEFAULT_SVG_FILE_NAME: &str = "er_diagram.svg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// File name used for SVG output when no path is given
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_SVG_FILE_NAME.to_string(),
        }
    }
}

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErdConfig {
    pub extract: ExtractOptions,
    pub markup: MarkupOptions,
    pub render: RenderConfig,
    pub output: OutputConfig,
}

impl ErdConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Load `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
