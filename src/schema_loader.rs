//! JSON Schema compilation with `schema_version` enforcement.
//!
//! Catalog files carry a `schema_version`; the schema pins it with a `const`.
//! Callers compile the schema once (from disk or from the compiled-in copy),
//! optionally patch that const to the version they expect, and validate
//! instances against the result.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

/// A compiled schema plus the version its const was resolved to.
pub(crate) struct CompiledSchema {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// Controls how a schema is normalized before compilation.
pub(crate) struct SchemaLoadOptions<'a> {
    /// Where to find the schema_version const inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Override schema_version when provided (used to align consts).
    pub expected_version: Option<&'a str>,
    /// Patch the const to `expected_version` before compiling.
    pub patch_schema_version_const: bool,
}

impl Default for SchemaLoadOptions<'_> {
    fn default() -> Self {
        Self {
            schema_version_pointer: "/properties/schema_version/const",
            expected_version: None,
            patch_schema_version_const: false,
        }
    }
}

pub(crate) fn load_json_schema(path: &Path, options: SchemaLoadOptions<'_>) -> Result<CompiledSchema> {
    let raw: Value = serde_json::from_reader(
        File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
    )
    .with_context(|| format!("parsing schema {}", path.display()))?;
    compile_schema(raw, &path.display().to_string(), options)
}

pub(crate) fn compile_schema(
    mut raw: Value,
    label: &str,
    options: SchemaLoadOptions<'_>,
) -> Result<CompiledSchema> {
    let schema_version = match options.expected_version {
        Some(version) => version.to_string(),
        None => extract_schema_version(&raw, options.schema_version_pointer)
            .ok_or_else(|| anyhow!("schema {label} missing schema_version const"))?,
    };

    if !is_valid_version_token(&schema_version) {
        bail!("schema {label} has invalid schema_version '{schema_version}'");
    }

    if options.patch_schema_version_const {
        let target = raw.pointer_mut(options.schema_version_pointer).ok_or_else(|| {
            anyhow!(
                "schema {label} missing pointer {} for schema_version const",
                options.schema_version_pointer
            )
        })?;
        *target = Value::String(schema_version.clone());
    }

    // Compilation errors borrow the schema, so flatten them to text here.
    let compiled = JSONSchema::compile(&raw)
        .map_err(|err| anyhow!("compiling schema {label}: {err}"))?;

    Ok(CompiledSchema {
        schema_version,
        compiled,
    })
}

/// Validate `instance`, joining every violation into a single error.
pub(crate) fn validate_instance(schema: &CompiledSchema, instance: &Value, label: &str) -> Result<()> {
    if let Err(errors) = schema.compiled.validate(instance) {
        let details = errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("{label} failed schema validation:\n{details}");
    }
    Ok(())
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if is_valid_version_token(version) {
        Some(version.to_string())
    } else {
        None
    }
}

pub(crate) fn is_valid_version_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}
