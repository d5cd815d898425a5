//! Request-scoped generation state.
//!
//! A `Session` holds the SQL text being edited plus the outcome of the last
//! generation: either a diagram or an error message, never both.

use crate::config::ErdConfig;
use crate::erd;
use crate::error::GenerateError;
use crate::model::TableInfo;
use crate::render::Renderer;
use tracing::{info, warn};

/// Output of a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub tables: Vec<TableInfo>,
    pub markup: String,
    /// Rendered SVG, when a renderer was supplied
    pub svg: Option<String>,
}

/// Outcome of [`Session::generate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// A generation was already in flight; nothing changed
    Ignored,
    Succeeded,
    Failed,
}

#[derive(Debug, Default)]
pub struct Session {
    sql: String,
    busy: bool,
    error: Option<String>,
    diagram: Option<Diagram>,
}

impl Session {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            ..Default::default()
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn set_sql(&mut self, sql: impl Into<String>) {
        self.sql = sql.into();
    }

    pub fn push_line(&mut self, line: &str) {
        self.sql.push_str(line);
        self.sql.push('\n');
    }

    pub fn clear(&mut self) {
        self.sql.clear();
        self.error = None;
        self.diagram = None;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn diagram(&self) -> Option<&Diagram> {
        self.diagram.as_ref()
    }

    /// Run parse, extract, markup and (with a renderer) render on the
    /// current SQL text.
    ///
    /// Previous results are cleared first, so a failure leaves no diagram
    /// behind. Returns [`Generation::Ignored`] without touching any state
    /// while another generation is in flight.
    ///
    /// Generation runs synchronously under `&mut self`, so callers never
    /// observe `busy` set; the flag mirrors the "generating" state of a UI
    /// front end that triggers this from an event handler.
    pub fn generate(&mut self, config: &ErdConfig, renderer: Option<&dyn Renderer>) -> Generation {
        if self.busy {
            warn!("generation already in progress, ignoring trigger");
            return Generation::Ignored;
        }

        self.busy = true;
        self.error = None;
        self.diagram = None;

        let outcome = match run_pipeline(&self.sql, config, renderer) {
            Ok(diagram) => {
                info!(tables = diagram.tables.len(), "diagram generated");
                self.diagram = Some(diagram);
                Generation::Succeeded
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Generation::Failed
            }
        };

        self.busy = false;
        outcome
    }
}

fn run_pipeline(
    sql: &str,
    config: &ErdConfig,
    renderer: Option<&dyn Renderer>,
) -> Result<Diagram, GenerateError> {
    let erd = erd::generate(sql, &config.extract, &config.markup)?;
    let svg = match renderer {
        Some(renderer) => Some(renderer.render(&erd.markup, &config.render)?),
        None => None,
    };

    Ok(Diagram {
        tables: erd.tables,
        markup: erd.markup,
        svg,
    })
}
