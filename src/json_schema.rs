//! JSON Schema generation for CLI output types.
//!
//! Schemas are generated using the schemars crate and can be exported via the
//! `schema` subcommand.

use schemars::{schema_for, Schema};
use std::collections::BTreeMap;

/// Returns all JSON schemas for commands that support --json output.
/// Uses BTreeMap for deterministic ordering (important for diffable output).
pub fn all_schemas() -> BTreeMap<&'static str, Schema> {
    let mut schemas = BTreeMap::new();

    schemas.insert("generate", schema_for!(crate::erd::format::json::ErdJson));

    schemas
}

/// Generate a single schema by command name.
pub fn get_schema(command: &str) -> Option<Schema> {
    all_schemas().remove(command)
}

/// List all available schema names.
pub fn schema_names() -> Vec<&'static str> {
    all_schemas().keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_schema_describes_tables() {
        let schema = get_schema("generate").unwrap();
        let value = serde_json::to_value(&schema).unwrap();
        assert!(value["properties"]["tables"].is_object());
        assert!(value["properties"]["stats"].is_object());
    }

    #[test]
    fn test_unknown_schema() {
        assert!(get_schema("split").is_none());
        assert_eq!(schema_names(), vec!["generate"]);
    }
}
