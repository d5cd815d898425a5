//! Table and column metadata extraction from parsed CREATE TABLE statements.

mod comments;

pub use comments::CommentIndex;

use crate::model::{ColumnInfo, Constraint, TableInfo};
use crate::parser::{ident_name, object_table_name, ParsedSql};
use serde::{Deserialize, Serialize};
use sqlparser::ast::{ColumnDef, ColumnOption, CreateTable, Expr, Statement, TableConstraint, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Name used when a CREATE TABLE statement carries no usable table name
pub const PLACEHOLDER_TABLE_NAME: &str = "unnamed_table";

/// Text region covered by the comment scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentScope {
    /// Only the statement that declares the table
    #[default]
    Statement,
    /// The whole input; a comment found for `id` applies to every `id` column
    Global,
}

impl FromStr for CommentScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "statement" | "table" => Ok(CommentScope::Statement),
            "global" => Ok(CommentScope::Global),
            _ => Err(format!(
                "Unknown comment scope: {}. Valid options: statement, global",
                s
            )),
        }
    }
}

impl fmt::Display for CommentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentScope::Statement => write!(f, "statement"),
            CommentScope::Global => write!(f, "global"),
        }
    }
}

/// Extraction settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractOptions {
    pub comment_scope: CommentScope,
    /// Fold table-level PRIMARY KEY / single-column UNIQUE into column flags
    pub promote_table_keys: bool,
}

/// Extract every CREATE TABLE from `parsed`, in statement order.
///
/// Statements of any other kind are skipped. `sql` is the full input text and
/// is only consulted for [`CommentScope::Global`]; statement scope reads the
/// source span stored with each statement.
pub fn extract_tables(parsed: &ParsedSql, sql: &str, options: &ExtractOptions) -> Vec<TableInfo> {
    let global = match options.comment_scope {
        CommentScope::Global => Some(CommentIndex::scan(sql)),
        CommentScope::Statement => None,
    };

    let mut tables = Vec::new();
    for parsed_stmt in parsed {
        let create = match &parsed_stmt.statement {
            Statement::CreateTable(create) => create,
            _ => {
                debug!("skipping statement that is not CREATE TABLE");
                continue;
            }
        };

        let local;
        let comments = match &global {
            Some(index) => index,
            None => {
                local = CommentIndex::scan(&parsed_stmt.source);
                &local
            }
        };

        tables.push(extract_table(create, comments, options));
    }

    tables
}

fn extract_table(create: &CreateTable, comments: &CommentIndex, options: &ExtractOptions) -> TableInfo {
    let table_name = object_table_name(&create.name).unwrap_or_else(|| {
        warn!(
            "CREATE TABLE without a table name, using '{}'",
            PLACEHOLDER_TABLE_NAME
        );
        PLACEHOLDER_TABLE_NAME.to_string()
    });

    let mut table = TableInfo::new(table_name);
    for def in &create.columns {
        let column = extract_column(def, comments, options.comment_scope);
        debug!(table = %table.table_name, column = ?column, "extracted column");
        table.columns.push(column);
    }

    if options.promote_table_keys {
        promote_table_keys(&mut table, &create.constraints);
    }

    table
}

fn extract_column(def: &ColumnDef, comments: &CommentIndex, scope: CommentScope) -> ColumnInfo {
    let mut column = ColumnInfo::new(ident_name(&def.name), def.data_type.to_string());
    let mut inline_comment = None;

    for option in &def.options {
        match &option.option {
            ColumnOption::Unique { is_primary, .. } => {
                column.add_constraint(if *is_primary {
                    Constraint::PrimaryKey
                } else {
                    Constraint::Unique
                });
            }
            ColumnOption::NotNull => column.add_constraint(Constraint::NotNull),
            ColumnOption::Default(expr) => {
                column.add_constraint(Constraint::Default(default_value(expr)))
            }
            ColumnOption::Comment(text) if !text.is_empty() => {
                inline_comment = Some(text.clone());
            }
            _ => {}
        }
    }

    let scanned = comments.get(&column.name).map(str::to_string);
    // Global scope: the last scanned comment for a name wins over the column's own
    column.comment = match scope {
        CommentScope::Statement => inline_comment.or(scanned),
        CommentScope::Global => scanned.or(inline_comment),
    }
    .unwrap_or_default();

    column
}

/// Default value as shown in the diagram: string literals lose their quotes
fn default_value(expr: &Expr) -> String {
    match expr {
        Expr::Value(Value::SingleQuotedString(s) | Value::DoubleQuotedString(s)) => s.clone(),
        other => other.to_string(),
    }
}

fn promote_table_keys(table: &mut TableInfo, constraints: &[TableConstraint]) {
    for constraint in constraints {
        match constraint {
            TableConstraint::PrimaryKey { columns, .. } => {
                for ident in columns {
                    if let Some(col) = table.column_mut(&ident_name(ident)) {
                        col.add_constraint(Constraint::PrimaryKey);
                    }
                }
            }
            TableConstraint::Unique { columns, .. } if columns.len() == 1 => {
                if let Some(col) = table.column_mut(&ident_name(&columns[0])) {
                    col.add_constraint(Constraint::Unique);
                }
            }
            _ => {}
        }
    }
}
