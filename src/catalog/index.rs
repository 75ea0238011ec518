//! Ordered view of the manifest used by the generators.
//!
//! The catalog keeps tools in manifest order and categories verbatim. Entries
//! that cannot be placed (no name, unknown type) are logged and dropped here so
//! each generator sees the same set of tools; strict checking is the
//! validator's job, not this module's.

use crate::catalog::{SkippedTool, ToolRecord, ToolType};
use crate::manifest::RawManifest;
use anyhow::{Result, bail};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Clone, Debug, Default)]
/// Manifest tools in file order plus the category definitions.
pub struct Catalog {
    tools: Vec<ToolRecord>,
    categories: Option<Map<String, Value>>,
    skipped: Vec<SkippedTool>,
}

impl Catalog {
    /// Project the manifest into a catalog.
    ///
    /// Fails only when the `tools` array itself is missing; without it there
    /// is nothing to generate. A missing or non-object `categories` is kept as
    /// absent and left for the generators that need it to reject.
    pub fn from_manifest(manifest: &RawManifest) -> Result<Self> {
        let Some(entries) = manifest.tools() else {
            bail!("manifest missing required 'tools' array");
        };

        let mut tools = Vec::with_capacity(entries.len());
        let mut skipped = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            match ToolRecord::from_entry(index, entry) {
                Ok(record) => tools.push(record),
                Err(reason) => {
                    warn!("skipping {reason}");
                    skipped.push(reason);
                }
            }
        }

        let categories = manifest.categories().cloned();
        Ok(Self {
            tools,
            categories,
            skipped,
        })
    }

    /// Tools in manifest order.
    pub fn tools(&self) -> &[ToolRecord] {
        &self.tools
    }

    /// Category definitions exactly as written in the manifest, if it has
    /// a `categories` object.
    pub fn categories(&self) -> Option<&Map<String, Value>> {
        self.categories.as_ref()
    }

    /// Entries dropped while building the catalog.
    pub fn skipped(&self) -> &[SkippedTool] {
        &self.skipped
    }

    /// Tool names grouped by type, types in stable order.
    pub fn names_by_type(&self) -> BTreeMap<ToolType, Vec<&str>> {
        let mut grouped: BTreeMap<ToolType, Vec<&str>> = BTreeMap::new();
        for tool in &self.tools {
            grouped
                .entry(tool.tool_type)
                .or_default()
                .push(tool.name.as_str());
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(value: Value) -> RawManifest {
        RawManifest::from_value(value).expect("object manifest")
    }

    #[test]
    fn keeps_manifest_order_and_drops_unplaceable_entries() {
        let catalog = Catalog::from_manifest(&manifest(json!({
            "tools": [
                {"name": "b", "type": "agent", "description": "d", "category": "c"},
                42,
                {"name": "a", "type": "agent", "description": "d", "category": "c"},
                {"name": "z", "type": "widget"}
            ],
            "categories": {"c": {"name": "C", "description": "d"}}
        })))
        .unwrap();

        let names: Vec<_> = catalog.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(catalog.skipped().len(), 2);
        assert_eq!(
            catalog.names_by_type().get(&ToolType::Agent),
            Some(&vec!["b", "a"])
        );
    }

    #[test]
    fn requires_tools_array() {
        assert!(Catalog::from_manifest(&manifest(json!({"categories": {}}))).is_err());
    }

    #[test]
    fn categories_absent_unless_object() {
        let missing = Catalog::from_manifest(&manifest(json!({"tools": []}))).unwrap();
        assert!(missing.categories().is_none());

        let listed =
            Catalog::from_manifest(&manifest(json!({"tools": [], "categories": []}))).unwrap();
        assert!(listed.categories().is_none());

        let present = Catalog::from_manifest(&manifest(json!({
            "tools": [],
            "categories": {"c": {"name": "C", "description": "d"}}
        })))
        .unwrap();
        assert_eq!(present.categories().map(Map::len), Some(1));
    }
}
