//! JSON format output for extracted tables.

use crate::model::{column_count, TableInfo};
use schemars::JsonSchema;
use serde::Serialize;

/// JSON representation of the ERD
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErdJson {
    pub tables: Vec<TableInfo>,
    pub stats: ErdStats,
}

/// ERD statistics
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErdStats {
    pub table_count: usize,
    pub column_count: usize,
}

/// Generate JSON output for `tables`
pub fn to_json(tables: &[TableInfo]) -> String {
    let erd = build_erd_json(tables);
    serde_json::to_string_pretty(&erd).unwrap_or_else(|_| "{}".to_string())
}

/// Build the JSON structure
pub fn build_erd_json(tables: &[TableInfo]) -> ErdJson {
    ErdJson {
        tables: tables.to_vec(),
        stats: ErdStats {
            table_count: tables.len(),
            column_count: column_count(tables),
        },
    }
}
