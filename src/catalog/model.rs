use crate::catalog::ToolType;
use crate::manifest::json_type_name;
use serde_json::{Map, Value};
use std::fmt;

/// Field names a manifest tool entry may carry, in reporting order.
pub const TOOL_FIELDS: [&str; 4] = ["name", "type", "description", "category"];

/// Field names a category definition must carry, in reporting order.
pub const CATEGORY_FIELDS: [&str; 2] = ["name", "description"];

#[derive(Clone, Debug, PartialEq, Eq)]
/// One manifest entry as seen by the generators.
pub struct ToolRecord {
    pub name: String,
    pub tool_type: ToolType,
    pub description: String,
    pub category: String,
}

/// Why a manifest entry could not become a [`ToolRecord`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkippedTool {
    NotAnObject { index: usize, found: &'static str },
    MissingName { index: usize },
    MissingType { name: String },
    UnknownType { name: String, value: String },
}

impl fmt::Display for SkippedTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkippedTool::NotAnObject { index, found } => {
                write!(f, "malformed tool entry at index {index} (not an object, got {found})")
            }
            SkippedTool::MissingName { index } => {
                write!(f, "tool at index {index} has no usable 'name'")
            }
            SkippedTool::MissingType { name } => {
                write!(f, "tool '{name}' has no usable 'type'")
            }
            SkippedTool::UnknownType { name, value } => {
                write!(f, "unknown tool type '{value}' for tool '{name}'")
            }
        }
    }
}

impl ToolRecord {
    /// Lenient projection of one manifest entry.
    ///
    /// `name` and a known `type` are required to place the tool anywhere;
    /// `description` and `category` fall back to empty strings so a tool with
    /// an incomplete entry still reaches the generated documents.
    pub fn from_entry(index: usize, entry: &Value) -> Result<Self, SkippedTool> {
        let Some(fields) = entry.as_object() else {
            return Err(SkippedTool::NotAnObject {
                index,
                found: json_type_name(entry),
            });
        };
        let name = match non_empty_str(fields, "name") {
            Some(name) => name.to_string(),
            None => return Err(SkippedTool::MissingName { index }),
        };
        let Some(raw_type) = non_empty_str(fields, "type") else {
            return Err(SkippedTool::MissingType { name });
        };
        let tool_type = match ToolType::try_from(raw_type) {
            Ok(kind) => kind,
            Err(_) => {
                return Err(SkippedTool::UnknownType {
                    name,
                    value: raw_type.to_string(),
                });
            }
        };
        Ok(Self {
            name,
            tool_type,
            description: string_or_default(fields, "description"),
            category: string_or_default(fields, "category"),
        })
    }

    /// Repo-relative path of the tool's asset file; empty for gems.
    pub fn file_path(&self) -> String {
        self.tool_type.asset_path(&self.name).unwrap_or_default()
    }
}

fn non_empty_str<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn string_or_default(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
