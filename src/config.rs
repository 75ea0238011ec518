//! Repository layout and publisher settings.
//!
//! Both are plain values built per invocation. Binaries start from the
//! conventional layout under the discovered repo root and override individual
//! paths from their CLI flags.

use crate::gems::GEM_REGISTRY_PATH;
use crate::manifest::DEFAULT_MANIFEST_PATH;
use std::path::{Path, PathBuf};

pub const HELPERS_DIR: &str = "helpers";
pub const WEBSITE_DATA_PATH: &str = "docs/data.json";
pub const SETTINGS_PATH: &str = "images/claude/claude-settings.json";
pub const MARKETPLACE_PATH: &str = ".claude-plugin/marketplace.json";
pub const EXTERNAL_PLUGINS_PATH: &str = "claude-external-plugin-sources.json";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where every input and output of the pipeline lives.
pub struct RepoLayout {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub helpers_dir: PathBuf,
    pub website_data: PathBuf,
    pub settings: PathBuf,
    pub marketplace: PathBuf,
    pub external_plugins: PathBuf,
}

impl RepoLayout {
    /// Conventional layout rooted at `root`.
    pub fn for_root(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            manifest: root.join(DEFAULT_MANIFEST_PATH),
            helpers_dir: root.join(HELPERS_DIR),
            website_data: root.join(WEBSITE_DATA_PATH),
            settings: root.join(SETTINGS_PATH),
            marketplace: root.join(MARKETPLACE_PATH),
            external_plugins: root.join(EXTERNAL_PLUGINS_PATH),
        }
    }

    /// Layout implied by a manifest path: helpers sit next to the manifest.
    pub fn for_manifest(manifest: &Path) -> Self {
        let root = match manifest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self {
            manifest: manifest.to_path_buf(),
            ..Self::for_root(&root)
        }
    }

    pub fn gem_registry(&self) -> PathBuf {
        self.helpers_dir.join(GEM_REGISTRY_PATH)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Names and locations baked into the marketplace, settings and website
/// documents.
pub struct PublisherConfig {
    pub marketplace_name: String,
    pub owner: String,
    /// Directory the marketplace is installed to inside the container image.
    pub install_path: String,
    /// Source of the bundled plugin, relative to the marketplace file's repo.
    pub bundle_source: String,
    pub bundle_description: String,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            marketplace_name: "odh-ai-helpers".to_string(),
            owner: "ODH".to_string(),
            install_path: "/opt/ai-helpers".to_string(),
            bundle_source: "./helpers".to_string(),
            bundle_description:
                "AI automation tools, plugins, and assistants for enhanced productivity"
                    .to_string(),
        }
    }
}

impl PublisherConfig {
    /// Identifier of the bundled plugin in `enabledPlugins`.
    pub fn plugin_id(&self) -> String {
        format!("{0}@{0}", self.marketplace_name)
    }
}
