//! Leading `---` delimited metadata blocks in asset files.
//!
//! One parser serves every tool type. The block is read as YAML; when that
//! fails, or the block is not a mapping, each `key: value` line is still
//! recovered so hand-written headers such as `argument-hint: [key] [--flag]`
//! keep their values. Problems are recorded, never returned as errors.

use serde_json::Value as JsonValue;
use serde_yaml::{Mapping, Value};

const DELIMITER: &str = "---";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrontMatter {
    fields: Mapping,
    /// Every `key: value` line of the block, trimmed, in file order.
    lines: Vec<(String, String)>,
    /// Why the block could not be read as YAML, when it was present but broken.
    pub issue: Option<String>,
}

impl FrontMatter {
    fn unterminated() -> Self {
        Self {
            issue: Some("front-matter block is not terminated by '---'".to_string()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.lines.is_empty()
    }

    /// The parsed YAML value of a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Raw text after the first `:` on the last line declaring `key`.
    pub fn line(&self, key: &str) -> Option<&str> {
        self.lines
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// A field as JSON, keeping lists and scalars in their parsed shape.
    ///
    /// Falls back to the raw line text when the block was not valid YAML.
    pub fn json(&self, key: &str) -> Option<JsonValue> {
        if let Some(value) = self.get(key) {
            return serde_json::to_value(value).ok();
        }
        if self.fields.is_empty() {
            return self.line(key).map(|text| JsonValue::String(text.to_string()));
        }
        None
    }
}

fn split_lines(raw: &str) -> Vec<(String, String)> {
    raw.trim()
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Parse the front-matter block at the start of `content`.
pub fn parse_front_matter(content: &str) -> FrontMatter {
    let mut lines = content.lines();
    if lines.next().map(str::trim_end) != Some(DELIMITER) {
        return FrontMatter::default();
    }

    let mut block = Vec::new();
    let mut terminated = false;
    for line in lines {
        if line.trim_end() == DELIMITER {
            terminated = true;
            break;
        }
        block.push(line);
    }
    if !terminated {
        return FrontMatter::unterminated();
    }

    let raw = block.join("\n");
    if raw.trim().is_empty() {
        return FrontMatter::default();
    }
    let lines = split_lines(&raw);
    let (fields, issue) = match serde_yaml::from_str::<Value>(&raw) {
        Ok(Value::Mapping(fields)) => (fields, None),
        Ok(_) => (
            Mapping::new(),
            Some("front-matter block is not a key/value mapping".to_string()),
        ),
        Err(err) => (Mapping::new(), Some(format!("invalid front-matter: {err}"))),
    };
    FrontMatter {
        fields,
        lines,
        issue,
    }
}
