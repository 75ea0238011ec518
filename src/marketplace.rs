//! Marketplace and settings documents for the plugin loader.
//!
//! The marketplace lists externally sourced plugins first, in their input
//! order, followed by one plugin that bundles the whole helpers tree. Bad
//! external entries are skipped one at a time; they never block the rest.

use crate::config::PublisherConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExternalPlugin {
    pub name: String,
    pub description: String,
    /// Passed through untouched: a GitHub shorthand, git URL, or source object.
    pub source: Value,
}

impl ExternalPlugin {
    /// Validate one entry of the external plugin document.
    pub fn from_entry(entry: &Value) -> Result<Self, String> {
        let Some(fields) = entry.as_object() else {
            return Err(format!("skipping external plugin that is not an object: {entry}"));
        };
        let name = match fields.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(_) => {
                return Err(format!(
                    "skipping external plugin whose 'name' is not a string: {entry}"
                ));
            }
            None => return Err(format!("skipping external plugin missing 'name': {entry}")),
        };
        let Some(source) = fields.get("source") else {
            return Err(format!(
                "skipping external plugin '{name}' missing 'source'"
            ));
        };
        let description = fields
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{name} plugin"));
        Ok(Self {
            name,
            description,
            source: source.clone(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BundledPlugin {
    pub name: String,
    pub source: String,
    pub description: String,
    pub strict: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PluginEntry {
    External(ExternalPlugin),
    Bundled(BundledPlugin),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Owner {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marketplace {
    pub name: String,
    pub owner: Owner,
    pub plugins: Vec<PluginEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub extra_known_marketplaces: BTreeMap<String, Value>,
    pub enabled_plugins: BTreeMap<String, bool>,
}

/// Parse the external plugin document's `plugins` list.
pub fn parse_external_plugins(document: &Value) -> Vec<ExternalPlugin> {
    let entries = document
        .get("plugins")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    entries
        .iter()
        .filter_map(|entry| match ExternalPlugin::from_entry(entry) {
            Ok(plugin) => Some(plugin),
            Err(reason) => {
                warn!("{reason}");
                None
            }
        })
        .collect()
}

/// Load external plugins from `path`.
///
/// A missing file means no externals. An unreadable or malformed file is
/// logged and also treated as no externals.
pub fn load_external_plugins(path: &Path) -> Vec<ExternalPlugin> {
    if !path.exists() {
        return Vec::new();
    }
    match read_json(path) {
        Ok(document) => parse_external_plugins(&document),
        Err(err) => {
            warn!("could not read external plugins config: {err:#}");
            Vec::new()
        }
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

pub fn build_marketplace(publisher: &PublisherConfig, externals: Vec<ExternalPlugin>) -> Marketplace {
    let mut plugins: Vec<PluginEntry> = externals.into_iter().map(PluginEntry::External).collect();
    plugins.push(PluginEntry::Bundled(BundledPlugin {
        name: publisher.marketplace_name.clone(),
        source: publisher.bundle_source.clone(),
        description: publisher.bundle_description.clone(),
        strict: false,
    }));

    Marketplace {
        name: publisher.marketplace_name.clone(),
        owner: Owner {
            name: publisher.owner.clone(),
        },
        plugins,
    }
}

pub fn build_settings(publisher: &PublisherConfig) -> Settings {
    let mut source = Map::new();
    source.insert(
        "source".to_string(),
        json!({"source": "directory", "path": publisher.install_path}),
    );

    let mut extra_known_marketplaces = BTreeMap::new();
    extra_known_marketplaces.insert(publisher.marketplace_name.clone(), Value::Object(source));

    let mut enabled_plugins = BTreeMap::new();
    enabled_plugins.insert(publisher.plugin_id(), true);

    Settings {
        extra_known_marketplaces,
        enabled_plugins,
    }
}
