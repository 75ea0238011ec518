//! Website data builder.
//!
//! Projects the catalog into `docs/data.json`: tools are partitioned by type in
//! manifest order and each entry is enriched from its asset file. Enrichment
//! never fails the build; unreadable or malformed assets are logged and the
//! entry keeps its defaults. A manifest without `categories` does.

use crate::catalog::{Catalog, ToolRecord, ToolType};
use crate::config::{PublisherConfig, RepoLayout};
use crate::front_matter::{FrontMatter, parse_front_matter};
use crate::gems::GemRegistry;
use anyhow::{Result, bail};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

#[derive(Clone, Debug, Serialize)]
pub struct WebsiteData {
    pub name: String,
    pub owner: String,
    pub categories: CategorySection,
    pub tools: ToolSections,
}

#[derive(Clone, Debug, Serialize)]
pub struct CategorySection {
    pub categories: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ToolSections {
    pub gemini: Vec<WebsiteEntry>,
    pub skills: Vec<WebsiteEntry>,
    pub commands: Vec<WebsiteEntry>,
    pub agents: Vec<WebsiteEntry>,
}

impl ToolSections {
    fn bucket_mut(&mut self, kind: ToolType) -> &mut Vec<WebsiteEntry> {
        match kind {
            ToolType::Gem => &mut self.gemini,
            ToolType::Skill => &mut self.skills,
            ToolType::Command => &mut self.commands,
            ToolType::Agent => &mut self.agents,
        }
    }

    pub fn bucket(&self, kind: ToolType) -> &[WebsiteEntry] {
        match kind {
            ToolType::Gem => &self.gemini,
            ToolType::Skill => &self.skills,
            ToolType::Command => &self.commands,
            ToolType::Agent => &self.agents,
        }
    }

    pub fn total(&self) -> usize {
        self.gemini.len() + self.skills.len() + self.commands.len() + self.agents.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Base manifest fields plus the type-specific enrichment.
pub struct WebsiteEntry {
    pub name: String,
    pub description: String,
    pub category: String,
    pub file_path: String,
    #[serde(flatten)]
    pub details: EntryDetails,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntryDetails {
    Skill {
        id: String,
        allowed_tools: Value,
    },
    Command {
        argument_hint: String,
        synopsis: String,
    },
    Agent {
        id: String,
        tools: Value,
        model: Value,
    },
    Gem {
        link: String,
    },
}

/// Build the website document for `catalog`, reading assets under the
/// layout's repo root.
///
/// The manifest must carry a `categories` object; the site renders tools
/// under it.
pub fn build_website_data(
    catalog: &Catalog,
    layout: &RepoLayout,
    publisher: &PublisherConfig,
) -> Result<WebsiteData> {
    let Some(categories) = catalog.categories() else {
        bail!("manifest missing required 'categories' object");
    };
    let gems = load_gem_links(&layout.gem_registry());

    let mut tools = ToolSections::default();
    for tool in catalog.tools() {
        let entry = website_entry(tool, &layout.root, &gems);
        tools.bucket_mut(tool.tool_type).push(entry);
    }

    Ok(WebsiteData {
        name: publisher.marketplace_name.clone(),
        owner: publisher.owner.clone(),
        categories: CategorySection {
            categories: categories.clone(),
        },
        tools,
    })
}

fn website_entry(tool: &ToolRecord, root: &Path, gems: &GemRegistry) -> WebsiteEntry {
    let file_path = tool.file_path();
    let details = match tool.tool_type {
        ToolType::Skill => {
            let asset = root.join(&file_path);
            if !asset.is_file() {
                warn!("skill file not found: {}", asset.display());
            }
            let fm = read_front_matter(&asset);
            EntryDetails::Skill {
                id: tool.name.clone(),
                allowed_tools: front_matter_value(&fm, "allowed-tools"),
            }
        }
        ToolType::Command => {
            let asset = root.join(&file_path);
            let content = read_asset(&asset);
            let fm = content
                .as_deref()
                .map(|text| front_matter_of(&asset, text))
                .unwrap_or_default();
            let synopsis = content
                .as_deref()
                .and_then(extract_synopsis)
                .unwrap_or_else(|| format!("/{}", tool.name));
            EntryDetails::Command {
                argument_hint: fm.line("argument-hint").unwrap_or_default().to_string(),
                synopsis,
            }
        }
        ToolType::Agent => {
            let fm = read_front_matter(&root.join(&file_path));
            EntryDetails::Agent {
                id: tool.name.clone(),
                tools: front_matter_value(&fm, "tools"),
                model: front_matter_value(&fm, "model"),
            }
        }
        ToolType::Gem => EntryDetails::Gem {
            link: gems.link_for(&tool.name).unwrap_or_default().to_string(),
        },
    };

    WebsiteEntry {
        name: tool.name.clone(),
        description: tool.description.clone(),
        category: tool.category.clone(),
        file_path,
        details,
    }
}

/// Asset contents, or `None` when the file is absent or unreadable.
fn read_asset(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) => {
            warn!("could not read metadata from {}: {err}", path.display());
            None
        }
    }
}

fn read_front_matter(path: &Path) -> FrontMatter {
    read_asset(path)
        .map(|content| front_matter_of(path, &content))
        .unwrap_or_default()
}

fn front_matter_of(path: &Path, content: &str) -> FrontMatter {
    let fm = parse_front_matter(content);
    if let Some(issue) = &fm.issue {
        if fm.is_empty() {
            warn!("could not read metadata from {}: {issue}", path.display());
        } else {
            debug!("{}: {issue}; using key: value lines", path.display());
        }
    }
    fm
}

fn front_matter_value(fm: &FrontMatter, key: &str) -> Value {
    fm.json(key).unwrap_or_else(|| Value::String(String::new()))
}

/// First line of the code block that follows a `## Synopsis` heading.
pub fn extract_synopsis(content: &str) -> Option<String> {
    static SYNOPSIS: OnceLock<Regex> = OnceLock::new();
    let pattern = SYNOPSIS.get_or_init(|| {
        Regex::new(r"## Synopsis\s*```[^\n]*\n([^\n]+)").expect("synopsis pattern compiles")
    });
    let line = pattern.captures(content)?.get(1)?.as_str().trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

fn load_gem_links(path: &Path) -> GemRegistry {
    if !path.is_file() {
        return GemRegistry::default();
    }
    GemRegistry::load(path).unwrap_or_else(|err| {
        warn!("could not read gem registry: {err:#}");
        GemRegistry::default()
    })
}
