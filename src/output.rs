use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `document` as 2-space indented JSON with a trailing newline.
///
/// Parent directories are created. The file is written to a sibling temp file
/// and renamed into place, so readers never observe a half-written document.
pub fn write_json_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("creating output directory {}", parent.display()))?;

    let mut rendered = serde_json::to_string_pretty(document)
        .with_context(|| format!("serializing {}", path.display()))?;
    rendered.push('\n');

    let mut staging = NamedTempFile::new_in(parent)
        .with_context(|| format!("staging {}", path.display()))?;
    staging
        .write_all(rendered.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    staging
        .persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}
