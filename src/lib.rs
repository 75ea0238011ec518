pub mod catalog;
pub mod config;
pub mod front_matter;
pub mod gems;
pub mod logging;
pub mod manifest;
pub mod marketplace;
pub mod output;
pub mod scanner;
pub mod validate;
pub mod website;

pub use catalog::{Catalog, SkippedTool, ToolRecord, ToolType};
pub use config::{PublisherConfig, RepoLayout};
pub use front_matter::{FrontMatter, parse_front_matter};
pub use gems::{GemEntry, GemRegistry, slugify};
pub use manifest::{DEFAULT_MANIFEST_PATH, RawManifest, load_manifest};
pub use marketplace::{
    ExternalPlugin, Marketplace, Settings, build_marketplace, build_settings,
    load_external_plugins,
};
pub use output::write_json_document;
pub use scanner::{FilesystemToolView, scan_helpers};
pub use validate::{ValidationError, validate_manifest};
pub use website::{WebsiteData, build_website_data};

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const ROOT_SENTINEL: &str = DEFAULT_MANIFEST_PATH;
const ROOT_ENV: &str = "TOOLS_ROOT";

fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(ROOT_SENTINEL).is_file()
}

fn repo_root_from_env(raw: &str) -> Option<PathBuf> {
    if raw.is_empty() {
        return None;
    }
    let candidate = PathBuf::from(raw);
    if !is_repo_root(&candidate) {
        return None;
    }
    fs::canonicalize(candidate).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the repository holding `tools.json`.
///
/// Order: `TOOLS_ROOT`, then the current directory and its ancestors.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(ROOT_ENV) {
        if let Some(root) = repo_root_from_env(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(root) = search_upwards(&cwd) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the repository root (no {ROOT_SENTINEL} found). Run from the repository or set {ROOT_ENV}."
    );
}

/// Layout for a binary: an explicit `--root` wins, otherwise discovery.
pub fn resolve_layout(root_override: Option<&Path>) -> Result<RepoLayout> {
    let root = match root_override {
        Some(root) => root.to_path_buf(),
        None => find_repo_root()?,
    };
    Ok(RepoLayout::for_root(&root))
}
