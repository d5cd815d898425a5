//! SVG rendering through the Mermaid CLI (`mmdc`).

use crate::error::GenerateError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::process::Command;
use tracing::debug;

/// Turns Mermaid markup into SVG text
pub trait Renderer {
    fn render(&self, markup: &str, config: &RenderConfig) -> Result<String, GenerateError>;
}

/// Renderer settings: the Mermaid CLI invocation and the diagram theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Mermaid CLI executable
    pub command: String,
    /// Arguments placed before the input/output flags, e.g. for `npx`
    pub args: Vec<String>,
    pub theme: String,
    pub flowchart: FlowchartConfig,
    pub theme_variables: ThemeVariables,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            command: "mmdc".to_string(),
            args: Vec::new(),
            theme: "base".to_string(),
            flowchart: FlowchartConfig::default(),
            theme_variables: ThemeVariables::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowchartConfig {
    pub use_max_width: bool,
    pub html_labels: bool,
    pub curve: String,
}

impl Default for FlowchartConfig {
    fn default() -> Self {
        Self {
            use_max_width: false,
            html_labels: true,
            curve: "basis".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeVariables {
    pub primary_color: String,
    pub primary_text_color: String,
    pub primary_border_color: String,
    pub line_color: String,
    pub secondary_color: String,
    pub tertiary_color: String,
}

impl Default for ThemeVariables {
    fn default() -> Self {
        Self {
            primary_color: "#f9f9f9".to_string(),
            primary_text_color: "#000".to_string(),
            primary_border_color: "#000".to_string(),
            line_color: "#000".to_string(),
            secondary_color: "#fff".to_string(),
            tertiary_color: "#fff".to_string(),
        }
    }
}

// Mermaid's own config keys are camelCase
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MermaidConfig<'a> {
    theme: &'a str,
    flowchart: MermaidFlowchart<'a>,
    theme_variables: MermaidThemeVariables<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MermaidFlowchart<'a> {
    use_max_width: bool,
    html_labels: bool,
    curve: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MermaidThemeVariables<'a> {
    primary_color: &'a str,
    primary_text_color: &'a str,
    primary_border_color: &'a str,
    line_color: &'a str,
    secondary_color: &'a str,
    tertiary_color: &'a str,
}

impl RenderConfig {
    /// Mermaid configuration object as compact JSON
    pub fn mermaid_config(&self) -> String {
        let vars = &self.theme_variables;
        let config = MermaidConfig {
            theme: &self.theme,
            flowchart: MermaidFlowchart {
                use_max_width: self.flowchart.use_max_width,
                html_labels: self.flowchart.html_labels,
                curve: &self.flowchart.curve,
            },
            theme_variables: MermaidThemeVariables {
                primary_color: &vars.primary_color,
                primary_text_color: &vars.primary_text_color,
                primary_border_color: &vars.primary_border_color,
                line_color: &vars.line_color,
                secondary_color: &vars.secondary_color,
                tertiary_color: &vars.tertiary_color,
            },
        };
        serde_json::to_string(&config).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Renders by running the Mermaid CLI in a scratch directory.
///
/// The child process is waited on without a timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidCli;

impl Renderer for MermaidCli {
    fn render(&self, markup: &str, config: &RenderConfig) -> Result<String, GenerateError> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("diagram.mmd");
        let output = dir.path().join("diagram.svg");
        let config_path = dir.path().join("mermaid-config.json");

        fs::write(&input, markup)?;
        fs::write(&config_path, config.mermaid_config())?;

        debug!(command = %config.command, "running Mermaid CLI");

        let result = Command::new(&config.command)
            .args(&config.args)
            .arg("-i")
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .arg("-c")
            .arg(&config_path)
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    GenerateError::RendererNotFound {
                        command: config.command.clone(),
                    }
                } else {
                    GenerateError::render(format!("failed to run {}: {}", config.command, e))
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(GenerateError::render(format!(
                "{} exited with {}: {}",
                config.command,
                result.status,
                stderr.trim()
            )));
        }

        match fs::read_to_string(&output) {
            Ok(svg) => Ok(svg),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(GenerateError::render(format!(
                "{} produced no output",
                config.command
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mermaid_config_json() {
        let json: serde_json::Value =
            serde_json::from_str(&RenderConfig::default().mermaid_config()).unwrap();
        assert_eq!(json["theme"], "base");
        assert_eq!(json["flowchart"]["useMaxWidth"], false);
        assert_eq!(json["flowchart"]["htmlLabels"], true);
        assert_eq!(json["flowchart"]["curve"], "basis");
        assert_eq!(json["themeVariables"]["primaryColor"], "#f9f9f9");
        assert_eq!(json["themeVariables"]["tertiaryColor"], "#fff");
    }

    #[test]
    fn test_missing_command() {
        let config = RenderConfig {
            command: "sql-erd-no-such-renderer".to_string(),
            ..Default::default()
        };
        let err = MermaidCli.render("erDiagram\n", &config).unwrap_err();
        assert!(matches!(err, GenerateError::RendererNotFound { .. }));
        assert!(err.to_string().contains("--format html"));
    }

    #[cfg(unix)]
    fn script_config(dir: &tempfile::TempDir, body: &str) -> RenderConfig {
        let script = dir.path().join("fake-mmdc.sh");
        fs::write(&script, body).unwrap();
        RenderConfig {
            command: "sh".to_string(),
            args: vec![script.to_string_lossy().into_owned()],
            ..Default::default()
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_render_reads_svg_output() {
        let dir = tempfile::tempdir().unwrap();
        // $2 = input, $4 = output, $6 = config
        let config = script_config(
            &dir,
            "printf '<svg>%s</svg>' \"$(head -n 1 \"$2\")\" > \"$4\"\ngrep -q curve \"$6\" || exit 3\n",
        );
        let svg = MermaidCli.render("erDiagram\n", &config).unwrap();
        assert_eq!(svg, "<svg>erDiagram</svg>");
    }

    #[cfg(unix)]
    #[test]
    fn test_render_failure_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let config = script_config(&dir, "echo 'Parse error on line 2' >&2\nexit 1\n");
        let err = MermaidCli.render("erDiagram\n  broken", &config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Parse error on line 2"), "{message}");
    }

    #[cfg(unix)]
    #[test]
    fn test_render_without_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = script_config(&dir, "exit 0\n");
        let err = MermaidCli.render("erDiagram\n", &config).unwrap_err();
        assert!(err.to_string().contains("produced no output"));
    }
}
