use crate::json_schema::{get_schema, schema_names};
use anyhow::Result;

pub fn run(command: &str, list: bool) -> Result<()> {
    if list {
        for name in schema_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let Some(schema) = get_schema(command) else {
        anyhow::bail!(
            "no schema for '{}' (available: {})",
            command,
            schema_names().join(", ")
        );
    };

    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
