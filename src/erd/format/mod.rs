//! Output format implementations for ERD export.

mod html;
pub(crate) mod json;
mod mermaid;

pub use html::{to_html, HtmlPage};
pub use json::to_json;
pub use mermaid::to_mermaid;
#[allow(unused_imports)]
pub use json::{ErdJson, ErdStats};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for ERD export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Mermaid erDiagram markup
    #[default]
    Mermaid,
    /// JSON model for programmatic use
    Json,
    /// Standalone HTML page rendering the diagram with mermaid.js
    Html,
    /// SVG rendered by the Mermaid CLI
    Svg,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(format!(
                "Unknown format: {}. Valid options: mermaid, json, html, svg",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Mermaid => write!(f, "mermaid"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Svg => write!(f, "svg"),
        }
    }
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mermaid => "mmd",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
            OutputFormat::Svg => "svg",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mmd" | "mermaid" => Some(OutputFormat::Mermaid),
            "json" => Some(OutputFormat::Json),
            "html" | "htm" => Some(OutputFormat::Html),
            "svg" => Some(OutputFormat::Svg),
            _ => None,
        }
    }
}

/// How column types are written into markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeStyle {
    /// Type exactly as declared, e.g. `DECIMAL(10,2)`
    #[default]
    Declared,
    /// Base type only, reduced to identifier characters, e.g. `DECIMAL`
    Base,
}

impl FromStr for TypeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "declared" | "full" => Ok(TypeStyle::Declared),
            "base" | "bare" => Ok(TypeStyle::Base),
            _ => Err(format!(
                "Unknown type style: {}. Valid options: declared, base",
                s
            )),
        }
    }
}

impl fmt::Display for TypeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeStyle::Declared => write!(f, "declared"),
            TypeStyle::Base => write!(f, "base"),
        }
    }
}

/// Markup generation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupOptions {
    pub type_style: TypeStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("MMD"), Some(OutputFormat::Mermaid));
        assert_eq!(OutputFormat::from_extension("htm"), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::from_extension("svg"), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_extension("png"), None);
    }

    #[test]
    fn test_format_round_trips_through_display() {
        for format in [
            OutputFormat::Mermaid,
            OutputFormat::Json,
            OutputFormat::Html,
            OutputFormat::Svg,
        ] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
        assert!("dot".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_type_style_parse() {
        assert_eq!("BASE".parse::<TypeStyle>().unwrap(), TypeStyle::Base);
        assert!("short".parse::<TypeStyle>().is_err());
    }
}
