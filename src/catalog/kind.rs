//! Tool variants and their on-disk conventions.
//!
//! Every place that maps a tool type to an asset path or a
//! wire string goes through [`ToolType`] so the conventions live in one table
//! instead of drifting between the scanner and the generators.

use anyhow::{Result, bail};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolType {
    Skill,
    Command,
    Agent,
    Gem,
}

impl ToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::Skill => "skill",
            ToolType::Command => "command",
            ToolType::Agent => "agent",
            ToolType::Gem => "gem",
        }
    }

    /// Path of the asset file describing a tool, relative to the repo root.
    ///
    /// Gems live outside the repository and have no local file.
    pub fn asset_path(&self, name: &str) -> Option<String> {
        match self {
            ToolType::Skill => Some(format!("helpers/skills/{name}/SKILL.md")),
            ToolType::Command => Some(format!("helpers/commands/{name}.md")),
            ToolType::Agent => Some(format!("helpers/agents/{name}.md")),
            ToolType::Gem => None,
        }
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ToolType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "skill" => Ok(ToolType::Skill),
            "command" => Ok(ToolType::Command),
            "agent" => Ok(ToolType::Agent),
            "gem" => Ok(ToolType::Gem),
            other => bail!("Unknown tool type: {other}"),
        }
    }
}

/// Wire names of every tool type, sorted for error messages.
pub fn valid_type_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = ALL_TOOL_TYPES.iter().map(ToolType::as_str).collect();
    names.sort_unstable();
    names
}

pub const ALL_TOOL_TYPES: &[ToolType] = &[
    ToolType::Gem,
    ToolType::Skill,
    ToolType::Command,
    ToolType::Agent,
];
