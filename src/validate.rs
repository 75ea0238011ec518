//! Consistency validator for the tool manifest.
//!
//! Reconciles the raw manifest with the filesystem view and returns every
//! finding rather than stopping at the first. Only a missing or mistyped
//! `tools`/`categories` top-level key ends validation early, since nothing
//! else can be checked without them.
//!
//! Findings come out in a fixed order (per-tool schema, name uniqueness,
//! category structure, category closure, filesystem agreement) so CI logs and
//! tests can diff the output.

use crate::catalog::{CATEGORY_FIELDS, TOOL_FIELDS, ToolType, valid_type_names};
use crate::manifest::json_type_name;
use crate::scanner::FilesystemToolView;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required '{0}' field")]
    MissingTopLevel(&'static str),
    #[error("'tools' field must be an array")]
    ToolsNotArray,
    #[error("'categories' field must be an object")]
    CategoriesNotObject,
    #[error("Tool at index {index} must be an object, got {found}")]
    ToolNotObject { index: usize, found: &'static str },
    #[error("Tool '{tool}' is missing required field: {field}")]
    MissingToolField { tool: String, field: &'static str },
    #[error("Tool '{tool}' has disallowed field: {field}. Only allowed fields: {}", allowed_tool_fields())]
    DisallowedToolField { tool: String, field: String },
    #[error("Tool '{tool}' has invalid type '{value}'. Valid types: {}", valid_type_names().join(", "))]
    InvalidToolType { tool: String, value: String },
    #[error("Tool '{tool}' field '{field}' must be a string, got {found}")]
    ToolFieldNotString {
        tool: String,
        field: &'static str,
        found: &'static str,
    },
    #[error("Tool '{tool}' has empty {field}")]
    EmptyToolField { tool: String, field: &'static str },
    #[error("Duplicate tool name: '{0}'")]
    DuplicateToolName(String),
    #[error("Category '{key}' must be an object, got {found}")]
    CategoryNotObject { key: String, found: &'static str },
    #[error("Category '{key}' is missing required field: {field}")]
    MissingCategoryField { key: String, field: &'static str },
    #[error("Category '{key}' field '{field}' must be a string, got {found}")]
    CategoryFieldNotString {
        key: String,
        field: &'static str,
        found: &'static str,
    },
    #[error("Category '{key}' has empty {field}")]
    EmptyCategoryField { key: String, field: &'static str },
    #[error("Category '{0}' is referenced by tools but not defined in categories section")]
    UndefinedCategory(String),
    #[error("Category '{0}' is defined but not used by any tools")]
    UnusedCategory(String),
    #[error("Tool '{name}' (type: {kind}) found in filesystem but missing from manifest")]
    MissingFromManifest { name: String, kind: ToolType },
    #[error("Tool '{name}' has mismatched type: filesystem={filesystem}, manifest={manifest}")]
    TypeMismatch {
        name: String,
        filesystem: ToolType,
        manifest: String,
    },
    #[error("Tool name '{name}' is ambiguous on disk: found as {}", join_types(.kinds))]
    AmbiguousFilesystemName { name: String, kinds: Vec<ToolType> },
}

fn allowed_tool_fields() -> String {
    let mut fields = TOOL_FIELDS.to_vec();
    fields.sort_unstable();
    fields.join(", ")
}

fn join_types(kinds: &[ToolType]) -> String {
    kinds
        .iter()
        .map(ToolType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run every check over `manifest` and the on-disk view.
pub fn validate_manifest(manifest: &Value, filesystem: &FilesystemToolView) -> Vec<ValidationError> {
    let (tools, categories) = match top_level(manifest) {
        Ok(parts) => parts,
        Err(err) => return vec![err],
    };

    let mut errors = Vec::new();
    for (index, tool) in tools.iter().enumerate() {
        check_tool_structure(index, tool, &mut errors);
    }
    check_unique_names(tools, &mut errors);
    check_category_structure(categories, &mut errors);
    check_category_closure(tools, categories, &mut errors);
    check_filesystem_agreement(tools, filesystem, &mut errors);
    errors
}

fn top_level(manifest: &Value) -> Result<(&Vec<Value>, &Map<String, Value>), ValidationError> {
    let tools = manifest
        .get("tools")
        .ok_or(ValidationError::MissingTopLevel("tools"))?;
    let categories = manifest
        .get("categories")
        .ok_or(ValidationError::MissingTopLevel("categories"))?;
    let tools = tools.as_array().ok_or(ValidationError::ToolsNotArray)?;
    let categories = categories
        .as_object()
        .ok_or(ValidationError::CategoriesNotObject)?;
    Ok((tools, categories))
}

/// Label used for a tool in messages: its string name, else its position.
fn tool_label(index: usize, tool: &Map<String, Value>) -> String {
    match tool.get("name").and_then(Value::as_str) {
        Some(name) => name.to_string(),
        None => format!("tool[{index}]"),
    }
}

fn check_tool_structure(index: usize, tool: &Value, errors: &mut Vec<ValidationError>) {
    let Some(fields) = tool.as_object() else {
        errors.push(ValidationError::ToolNotObject {
            index,
            found: json_type_name(tool),
        });
        return;
    };
    let label = tool_label(index, fields);

    for field in TOOL_FIELDS {
        if !fields.contains_key(field) {
            errors.push(ValidationError::MissingToolField {
                tool: label.clone(),
                field,
            });
        }
    }

    let disallowed: BTreeSet<&String> = fields
        .keys()
        .filter(|key| !TOOL_FIELDS.contains(&key.as_str()))
        .collect();
    for field in disallowed {
        errors.push(ValidationError::DisallowedToolField {
            tool: label.clone(),
            field: field.clone(),
        });
    }

    if let Some(value) = fields.get("type").and_then(invalid_type_value) {
        errors.push(ValidationError::InvalidToolType {
            tool: label.clone(),
            value,
        });
    }

    for field in TOOL_FIELDS {
        match fields.get(field) {
            None => {}
            Some(Value::String(value)) => {
                if value.trim().is_empty() {
                    errors.push(ValidationError::EmptyToolField {
                        tool: label.clone(),
                        field,
                    });
                }
            }
            Some(other) => errors.push(ValidationError::ToolFieldNotString {
                tool: label.clone(),
                field,
                found: json_type_name(other),
            }),
        }
    }
}

/// Text of a declared `type` that names no tool type.
///
/// Blank values (empty string, `null`, `false`, zero, empty containers) are
/// left to the missing/empty checks.
fn invalid_type_value(declared: &Value) -> Option<String> {
    match declared {
        Value::String(raw) if raw.is_empty() => None,
        Value::String(raw) => ToolType::try_from(raw.as_str()).is_err().then(|| raw.clone()),
        Value::Null | Value::Bool(false) => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn check_unique_names(tools: &[Value], errors: &mut Vec<ValidationError>) {
    let mut seen: HashSet<&str> = HashSet::new();
    for tool in tools {
        let Some(name) = tool.get("name").and_then(Value::as_str) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateToolName(name.to_string()));
        }
    }
}

fn check_category_structure(categories: &Map<String, Value>, errors: &mut Vec<ValidationError>) {
    for (key, definition) in categories {
        let Some(fields) = definition.as_object() else {
            errors.push(ValidationError::CategoryNotObject {
                key: key.clone(),
                found: json_type_name(definition),
            });
            continue;
        };

        for field in CATEGORY_FIELDS {
            if !fields.contains_key(field) {
                errors.push(ValidationError::MissingCategoryField {
                    key: key.clone(),
                    field,
                });
            }
        }

        for field in CATEGORY_FIELDS {
            match fields.get(field) {
                None => {}
                Some(Value::String(value)) => {
                    if value.trim().is_empty() {
                        errors.push(ValidationError::EmptyCategoryField {
                            key: key.clone(),
                            field,
                        });
                    }
                }
                Some(other) => errors.push(ValidationError::CategoryFieldNotString {
                    key: key.clone(),
                    field,
                    found: json_type_name(other),
                }),
            }
        }
    }
}

fn check_category_closure(
    tools: &[Value],
    categories: &Map<String, Value>,
    errors: &mut Vec<ValidationError>,
) {
    let mut referenced: BTreeSet<&str> = BTreeSet::new();
    for (index, tool) in tools.iter().enumerate() {
        let Some(fields) = tool.as_object() else {
            continue;
        };
        match fields.get("category") {
            None | Some(Value::Null) => {}
            Some(Value::String(category)) => {
                if !category.is_empty() {
                    referenced.insert(category.as_str());
                }
            }
            Some(other) => errors.push(ValidationError::ToolFieldNotString {
                tool: tool_label(index, fields),
                field: "category",
                found: json_type_name(other),
            }),
        }
    }

    let defined: BTreeSet<&str> = categories.keys().map(String::as_str).collect();
    for category in referenced.difference(&defined) {
        errors.push(ValidationError::UndefinedCategory(category.to_string()));
    }
    for category in defined.difference(&referenced) {
        errors.push(ValidationError::UnusedCategory(category.to_string()));
    }
}

fn check_filesystem_agreement(
    tools: &[Value],
    filesystem: &FilesystemToolView,
    errors: &mut Vec<ValidationError>,
) {
    // Later duplicates win, matching a plain name -> type map over the manifest.
    let mut manifest_types: HashMap<&str, Option<&Value>> = HashMap::new();
    for tool in tools {
        if let Some(name) = tool.get("name").and_then(Value::as_str) {
            manifest_types.insert(name, tool.get("type"));
        }
    }

    for (name, kind) in filesystem.iter() {
        if let Some(kinds) = filesystem.ambiguity(name) {
            errors.push(ValidationError::AmbiguousFilesystemName {
                name: name.to_string(),
                kinds: kinds.to_vec(),
            });
            continue;
        }
        match manifest_types.get(name) {
            None => errors.push(ValidationError::MissingFromManifest {
                name: name.to_string(),
                kind,
            }),
            Some(&declared) => {
                if declared.and_then(Value::as_str) != Some(kind.as_str()) {
                    errors.push(ValidationError::TypeMismatch {
                        name: name.to_string(),
                        filesystem: kind,
                        manifest: describe_declared_type(declared),
                    });
                }
            }
        }
    }
}

fn describe_declared_type(declared: Option<&Value>) -> String {
    match declared {
        None => "<missing>".to_string(),
        Some(Value::String(value)) => value.clone(),
        Some(other) => other.to_string(),
    }
}
