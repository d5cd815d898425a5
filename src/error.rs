//! Error type shared by the generation pipeline.

use thiserror::Error;

/// Failure of any stage of diagram generation.
///
/// The CLI and the interactive session surface every variant the same way:
/// as a single "generation failed" message built from `Display`.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The SQL text could not be parsed
    #[error("SQL parse error: {message}")]
    Parse { message: String },

    /// The renderer executable could not be found on PATH
    #[error("Mermaid CLI '{command}' not found. Install @mermaid-js/mermaid-cli or use --format html instead.")]
    RendererNotFound { command: String },

    /// The renderer ran but did not produce a diagram
    #[error("diagram rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GenerateError {
    pub fn render(message: impl Into<String>) -> Self {
        GenerateError::Render(message.into())
    }
}
