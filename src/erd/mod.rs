//! ERD generation from extracted table metadata.
//!
//! This module provides:
//! - The end-to-end text pipeline (parse, extract, markup)
//! - Table selection by glob pattern
//! - Output formats: Mermaid, JSON, HTML (SVG goes through [`crate::render`])

pub mod format;

pub use format::{to_html, to_json, to_mermaid, HtmlPage, MarkupOptions, OutputFormat};

use crate::error::GenerateError;
use crate::extract::{extract_tables, ExtractOptions};
use crate::model::TableInfo;
use crate::parser::parse_sql;
use glob::Pattern;

/// Result of running the text pipeline on one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erd {
    pub tables: Vec<TableInfo>,
    pub markup: String,
}

/// Parse `sql`, extract its tables and generate Mermaid markup.
///
/// A parse failure aborts the whole request; no markup is produced.
pub fn generate(
    sql: &str,
    extract: &ExtractOptions,
    markup: &MarkupOptions,
) -> Result<Erd, GenerateError> {
    let parsed = parse_sql(sql)?;
    let tables = extract_tables(&parsed, sql, extract);
    let markup = to_mermaid(&tables, markup);

    tracing::info!(tables = tables.len(), "generated ERD markup");
    Ok(Erd { tables, markup })
}

/// Keep only tables matching at least one pattern (no-op for an empty list)
pub fn filter_tables(tables: &mut Vec<TableInfo>, patterns: &[Pattern]) {
    if patterns.is_empty() {
        return;
    }
    tables.retain(|t| patterns.iter().any(|p| p.matches(&t.table_name)));
}

/// Drop tables matching any pattern
pub fn exclude_tables(tables: &mut Vec<TableInfo>, patterns: &[Pattern]) {
    if patterns.is_empty() {
        return;
    }
    tables.retain(|t| !patterns.iter().any(|p| p.matches(&t.table_name)));
}
