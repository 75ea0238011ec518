//! Manifest loader.
//!
//! Reads `tools.json` verbatim. No schema is enforced here; the validator and
//! the generators each decide how strict to be about the document's shape.
//! Failing to read or parse the file is the only fatal condition.

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Default manifest location, relative to the current directory or repo root.
pub const DEFAULT_MANIFEST_PATH: &str = "tools.json";

/// The manifest document as parsed, top-level keys in file order.
#[derive(Clone, Debug)]
pub struct RawManifest {
    document: Value,
}

impl RawManifest {
    /// Wrap an already-parsed document. The top level must be an object.
    pub fn from_value(document: Value) -> Result<Self> {
        if !document.is_object() {
            bail!(
                "manifest must be a JSON object, got {}",
                json_type_name(&document)
            );
        }
        Ok(Self { document })
    }

    /// The whole document, for the validator.
    pub fn as_value(&self) -> &Value {
        &self.document
    }

    /// The `tools` array, when present and well-formed.
    pub fn tools(&self) -> Option<&Vec<Value>> {
        self.document.get("tools").and_then(Value::as_array)
    }

    /// The `categories` mapping, when present and well-formed.
    pub fn categories(&self) -> Option<&Map<String, Value>> {
        self.document.get("categories").and_then(Value::as_object)
    }
}

/// Load and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<RawManifest> {
    if !path.is_file() {
        bail!("manifest not found: {}", path.display());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    let document: Value = serde_json::from_str(&raw)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    RawManifest::from_value(document).with_context(|| format!("loading {}", path.display()))
}

/// JSON type name used in diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
