//! Mermaid erDiagram format output.

use super::{MarkupOptions, TypeStyle};
use crate::model::TableInfo;

/// Generate Mermaid erDiagram markup for `tables`, in input order.
///
/// Names, types and comments are embedded as-is; a comment containing `"`
/// yields markup Mermaid will reject.
pub fn to_mermaid(tables: &[TableInfo], options: &MarkupOptions) -> String {
    let mut output = String::new();

    output.push_str("erDiagram\n");

    for table in tables {
        output.push_str(&format!("  {} {{\n", table.table_name));

        for col in &table.columns {
            let col_type = match options.type_style {
                TypeStyle::Declared => col.data_type.clone(),
                TypeStyle::Base => base_type(&col.data_type),
            };
            output.push_str(&format!("    {} {}", col_type, col.name));

            if !col.constraints.is_empty() {
                output.push_str(&format!(" \"{}\"", col.constraint_list()));
            }
            if !col.comment.is_empty() {
                output.push_str(&format!(" \"{}\"", col.comment));
            }
            output.push('\n');
        }

        output.push_str("  }\n");
    }

    tracing::debug!(markup = %output, "generated mermaid markup");
    output
}

/// Type without parameters, reduced to identifier characters
fn base_type(s: &str) -> String {
    let base = if let Some(paren_pos) = s.find('(') {
        &s[..paren_pos]
    } else {
        s
    };
    base.trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
