//! Generate command implementation.

use super::ErdArgs;
use crate::erd::{
    exclude_tables, filter_tables, to_html, to_json, to_mermaid, HtmlPage, OutputFormat,
};
use crate::extract::extract_tables;
use crate::input::read_sql;
use crate::model::column_count;
use crate::parser::parse_sql;
use crate::render::{MermaidCli, Renderer};
use anyhow::{Context, Result};
use glob::Pattern;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Run the generate command
pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    tables: Option<String>,
    exclude: Option<String>,
    json: bool,
    erd: &ErdArgs,
) -> Result<()> {
    let format = resolve_format(json, format.as_deref(), output.as_deref())?;
    let config = erd.resolve()?;

    let include_patterns = parse_patterns(tables.as_deref())?;
    let exclude_patterns = parse_patterns(exclude.as_deref())?;

    let sql = read_sql(&file)?;

    let parsed = parse_sql(&sql).context("generation failed")?;
    let mut tables = extract_tables(&parsed, &sql, &config.extract);
    filter_tables(&mut tables, &include_patterns);
    exclude_tables(&mut tables, &exclude_patterns);

    if tables.is_empty() && format != OutputFormat::Json {
        eprintln!("No CREATE TABLE statements found.");
    }

    let content = match format {
        OutputFormat::Mermaid => to_mermaid(&tables, &config.markup),
        OutputFormat::Json => to_json(&tables),
        OutputFormat::Html => {
            let title = file
                .file_name()
                .and_then(|n| n.to_str())
                .filter(|n| *n != "-")
                .map(|n| format!("ERD - {}", n))
                .unwrap_or_else(|| "Entity Relationship Diagram".to_string());
            let page = HtmlPage {
                title: &title,
                download_name: &config.output.file_name,
                render: &config.render,
            };
            to_html(&tables, &config.markup, &page)
        }
        OutputFormat::Svg => {
            let markup = to_mermaid(&tables, &config.markup);
            MermaidCli
                .render(&markup, &config.render)
                .context("generation failed")?
        }
    };

    // SVG always goes to a file
    let output = match (output, format) {
        (None, OutputFormat::Svg) => Some(PathBuf::from(&config.output.file_name)),
        (output, _) => output,
    };

    if let Some(ref out_path) = output {
        fs::write(out_path, content.as_bytes())
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        eprintln!("ERD written to: {}", out_path.display());
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            writeln!(stdout)?;
        }
    }

    if format != OutputFormat::Json {
        eprintln!(
            "\nERD: {} tables, {} columns",
            tables.len(),
            column_count(&tables)
        );
    }

    Ok(())
}

fn resolve_format(json: bool, format: Option<&str>, output: Option<&Path>) -> Result<OutputFormat> {
    if json {
        return Ok(OutputFormat::Json);
    }
    if let Some(f) = format {
        return f.parse().map_err(|e| anyhow::anyhow!("{}", e));
    }
    // Detect from output extension
    Ok(output
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension)
        .unwrap_or(OutputFormat::Mermaid))
}

fn parse_patterns(list: Option<&str>) -> Result<Vec<Pattern>> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Pattern::new(s).with_context(|| format!("invalid table pattern '{}'", s)))
        .collect()
}
