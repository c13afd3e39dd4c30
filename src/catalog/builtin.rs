//! The catalog and schema shipped inside the binary.

use crate::schema_loader::{CompiledSchema, SchemaLoadOptions, compile_schema};
use anyhow::{Context, Result};
use serde_json::Value;

pub const CATALOG_SCHEMA_VERSION: &str = "agency_services_v1";

pub const BUILTIN_CATALOG_JSON: &str = include_str!("../../catalog/services.json");

pub const BUILTIN_SCHEMA_JSON: &str = include_str!("../../schema/service_catalog.schema.json");

pub(crate) fn builtin_schema() -> Result<CompiledSchema> {
    let raw: Value =
        serde_json::from_str(BUILTIN_SCHEMA_JSON).context("parsing built-in catalog schema")?;
    compile_schema(
        raw,
        "built-in catalog schema",
        SchemaLoadOptions {
            expected_version: Some(CATALOG_SCHEMA_VERSION),
            patch_schema_version_const: true,
            ..Default::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_schema_pins_current_version() {
        let schema = builtin_schema().expect("built-in schema compiles");
        assert_eq!(schema.schema_version, CATALOG_SCHEMA_VERSION);
    }

    #[test]
    fn builtin_catalog_declares_current_version() {
        let value: Value = serde_json::from_str(BUILTIN_CATALOG_JSON).unwrap();
        assert_eq!(
            value.get("schema_version").and_then(Value::as_str),
            Some(CATALOG_SCHEMA_VERSION)
        );
    }
}
