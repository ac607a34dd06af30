//! JSON decoding and encoding of schema exports

use std::fs;
use std::path::Path;

use tracing::debug;

use super::OcsfSchema;
use crate::error::Result;

/// Decode a schema export from a JSON string.
///
/// Unknown keys are ignored and absent collections default to empty.
pub fn from_json(json: &str) -> Result<OcsfSchema> {
    let schema: OcsfSchema = serde_json::from_str(json)?;
    debug!(
        version = %schema.version,
        classes = schema.classes.len(),
        objects = schema.objects.len(),
        types = schema.types.len(),
        "Decoded schema"
    );
    Ok(schema)
}

/// Read and decode a schema export from a file
pub fn from_file(path: impl AsRef<Path>) -> Result<OcsfSchema> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading schema file");
    let content = fs::read_to_string(path)?;
    from_json(&content)
}

/// Encode a schema as pretty-printed JSON, restoring `@deprecated` and `$include`
pub fn to_json(schema: &OcsfSchema) -> Result<String> {
    Ok(serde_json::to_string_pretty(schema)?)
}
