//! Gem registry (`helpers/gems/gems.yaml`).
//!
//! Gems are hosted externally, so the registry is the only local record of
//! them. Tools refer to a gem by the slug of its title.

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Registry location relative to the helpers directory.
pub const GEM_REGISTRY_PATH: &str = "gems/gems.yaml";

#[derive(Clone, Debug, PartialEq, Eq)]
/// One titled registry entry.
pub struct GemEntry {
    pub title: String,
    pub link: Option<String>,
}

impl GemEntry {
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }
}

#[derive(Clone, Debug, Default)]
/// Titled entries of the registry, in file order.
pub struct GemRegistry {
    pub gems: Vec<GemEntry>,
}

impl GemRegistry {
    /// Parse the registry file. Entries without a string `title` are ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading gem registry {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("parsing gem registry {}", path.display()))
    }

    pub fn parse(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Value = serde_yaml::from_str(data)?;
        let entries = document
            .get("gems")
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let gems = entries
            .iter()
            .filter_map(|entry| {
                let title = entry.get("title")?.as_str()?.to_string();
                let link = entry
                    .get("link")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Some(GemEntry { title, link })
            })
            .collect();
        Ok(Self { gems })
    }

    /// Link of the first gem whose title slugs to `name`.
    pub fn link_for(&self, name: &str) -> Option<&str> {
        self.gems
            .iter()
            .find(|gem| gem.slug() == name)
            .and_then(|gem| gem.link.as_deref())
    }
}

/// Lowercase the title and collapse every run of characters outside
/// `[a-z0-9]` into a single `-`, trimming hyphens at both ends.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for ch in title.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
