//! Normalized table/column model produced by extraction.

use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

/// Column-level constraint flag.
///
/// Variants are declared in display order; a column's constraint list is
/// always sorted this way regardless of clause order in the SQL text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Constraint {
    PrimaryKey,
    NotNull,
    Unique,
    /// Default value as written, string literals unquoted
    Default(String),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::PrimaryKey => write!(f, "PK"),
            Constraint::NotNull => write!(f, "NOT NULL"),
            Constraint::Unique => write!(f, "UNIQUE"),
            Constraint::Default(value) => write!(f, "DEFAULT {}", value),
        }
    }
}

impl Serialize for Constraint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One column of an extracted table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type as rendered by the parser, e.g. `VARCHAR(255)`
    pub data_type: String,
    #[schemars(with = "Vec<String>")]
    pub constraints: Vec<Constraint>,
    /// Inline comment, empty when the column has none
    pub comment: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            constraints: Vec::new(),
            comment: String::new(),
        }
    }

    /// Add a constraint, keeping the list ordered and free of duplicates
    pub fn add_constraint(&mut self, constraint: Constraint) {
        if let Err(pos) = self.constraints.binary_search(&constraint) {
            // First DEFAULT wins
            if matches!(constraint, Constraint::Default(_))
                && self
                    .constraints
                    .iter()
                    .any(|c| matches!(c, Constraint::Default(_)))
            {
                return;
            }
            self.constraints.insert(pos, constraint);
        }
    }

    pub fn has_constraint(&self, constraint: &Constraint) -> bool {
        self.constraints.contains(constraint)
    }

    /// Constraints joined the way they appear in markup
    pub fn constraint_list(&self) -> String {
        self.constraints
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One extracted table with columns in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TableInfo {
    pub table_name: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
        }
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut ColumnInfo> {
        self.columns
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Total number of columns across tables
pub fn column_count(tables: &[TableInfo]) -> usize {
    tables.iter().map(|t| t.columns.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_display() {
        assert_eq!(Constraint::PrimaryKey.to_string(), "PK");
        assert_eq!(Constraint::NotNull.to_string(), "NOT NULL");
        assert_eq!(Constraint::Unique.to_string(), "UNIQUE");
        assert_eq!(Constraint::Default("0".into()).to_string(), "DEFAULT 0");
    }

    #[test]
    fn test_constraints_stay_ordered() {
        let mut col = ColumnInfo::new("id", "INT");
        col.add_constraint(Constraint::Default("0".into()));
        col.add_constraint(Constraint::NotNull);
        col.add_constraint(Constraint::PrimaryKey);
        col.add_constraint(Constraint::NotNull);
        assert_eq!(col.constraint_list(), "PK, NOT NULL, DEFAULT 0");
    }

    #[test]
    fn test_single_default() {
        let mut col = ColumnInfo::new("n", "INT");
        col.add_constraint(Constraint::Default("1".into()));
        col.add_constraint(Constraint::Default("2".into()));
        assert_eq!(col.constraints, vec![Constraint::Default("1".into())]);
    }

    #[test]
    fn test_constraint_serializes_as_string() {
        let json = serde_json::to_string(&vec![Constraint::PrimaryKey, Constraint::Unique]).unwrap();
        assert_eq!(json, r#"["PK","UNIQUE"]"#);
    }
}
