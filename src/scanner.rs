//! Filesystem scanner.
//!
//! Enumerates the tools that actually exist under `helpers/`, independently of
//! the manifest, so the validator can compare the two views. Directory entries
//! are visited in sorted order and the rules run as skills, commands, agents,
//! gems; the resulting view is therefore deterministic for a given tree.

use crate::catalog::ToolType;
use crate::gems::GEM_REGISTRY_PATH;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SKILLS_DIR: &str = "skills";
const COMMANDS_DIR: &str = "commands";
const AGENTS_DIR: &str = "agents";
const MARKDOWN_EXTENSION: &str = "md";
const README_FILE: &str = "readme.md";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Tools found on disk, keyed by name, in enumeration order.
///
/// A name produced by more than one rule with different types is recorded as
/// ambiguous; the entry keeps the first type seen.
pub struct FilesystemToolView {
    entries: Vec<(String, ToolType)>,
    ambiguous: BTreeMap<String, Vec<ToolType>>,
}

impl FilesystemToolView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one discovered tool.
    pub fn insert(&mut self, name: impl Into<String>, kind: ToolType) {
        let name = name.into();
        let Some(existing) = self.get(&name) else {
            self.entries.push((name, kind));
            return;
        };
        if existing == kind {
            return;
        }
        let kinds = self
            .ambiguous
            .entry(name)
            .or_insert_with(|| vec![existing]);
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    pub fn get(&self, name: &str) -> Option<ToolType> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, kind)| *kind)
    }

    /// Every type a name was found as, when more than one.
    pub fn ambiguity(&self, name: &str) -> Option<&[ToolType]> {
        self.ambiguous.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ToolType)> {
        self.entries
            .iter()
            .map(|(name, kind)| (name.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Enumerate the tools present under `helpers_dir`.
///
/// Missing folders contribute nothing; unreadable folders and a broken gem
/// registry are logged and skipped.
pub fn scan_helpers(helpers_dir: &Path) -> FilesystemToolView {
    let mut view = FilesystemToolView::new();

    for dir in sorted_entries(&helpers_dir.join(SKILLS_DIR)) {
        if !dir.is_dir() {
            continue;
        }
        if let Some(name) = dir.file_name().and_then(|n| n.to_str()) {
            view.insert(name, ToolType::Skill);
        }
    }

    for (folder, kind) in [(COMMANDS_DIR, ToolType::Command), (AGENTS_DIR, ToolType::Agent)] {
        for file in sorted_entries(&helpers_dir.join(folder)) {
            if let Some(name) = markdown_tool_name(&file) {
                view.insert(name, kind);
            }
        }
    }

    scan_gems(&helpers_dir.join(GEM_REGISTRY_PATH), &mut view);

    debug!(
        helpers = %helpers_dir.display(),
        tools = view.len(),
        "scanned helpers tree"
    );
    view
}

#[cfg(feature = "gems")]
fn scan_gems(registry_path: &Path, view: &mut FilesystemToolView) {
    use crate::gems::GemRegistry;

    if !registry_path.is_file() {
        return;
    }
    match GemRegistry::load(registry_path) {
        Ok(registry) => {
            for gem in &registry.gems {
                view.insert(gem.slug(), ToolType::Gem);
            }
        }
        Err(err) => warn!("could not parse gem registry, gems skipped: {err:#}"),
    }
}

#[cfg(not(feature = "gems"))]
fn scan_gems(registry_path: &Path, _view: &mut FilesystemToolView) {
    if registry_path.is_file() {
        warn!(
            "found {} but gem registry support is not compiled in; gem validation skipped. \
             Rebuild with the `gems` feature or remove the file to silence this warning.",
            registry_path.display()
        );
    }
}

/// Name of a command/agent tool backed by `path`, if it is one.
fn markdown_tool_name(path: &Path) -> Option<&str> {
    if !path.is_file() {
        return None;
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some(MARKDOWN_EXTENSION) {
        return None;
    }
    let file_name = path.file_name()?.to_str()?;
    if file_name.eq_ignore_ascii_case(README_FILE) {
        return None;
    }
    path.file_stem()?.to_str()
}

fn sorted_entries(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    let reader = match fs::read_dir(dir) {
        Ok(reader) => reader,
        Err(err) => {
            warn!("could not read {}: {err}", dir.display());
            return Vec::new();
        }
    };
    let mut paths: Vec<PathBuf> = reader
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .collect();
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_collapses_same_type_repeats() {
        let mut view = FilesystemToolView::new();
        view.insert("notes", ToolType::Gem);
        view.insert("notes", ToolType::Gem);
        assert_eq!(view.len(), 1);
        assert!(view.ambiguity("notes").is_none());
    }

    #[test]
    fn view_records_cross_type_collisions() {
        let mut view = FilesystemToolView::new();
        view.insert("review", ToolType::Skill);
        view.insert("review", ToolType::Command);
        view.insert("review", ToolType::Agent);
        view.insert("review", ToolType::Command);
        assert_eq!(view.get("review"), Some(ToolType::Skill));
        assert_eq!(
            view.ambiguity("review"),
            Some(&[ToolType::Skill, ToolType::Command, ToolType::Agent][..])
        );
    }

    fn helpers_with_gem_registry() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let helpers = dir.path().join("helpers");
        fs::create_dir_all(helpers.join("gems")).unwrap();
        fs::create_dir_all(helpers.join("skills/review")).unwrap();
        fs::write(
            helpers.join(GEM_REGISTRY_PATH),
            "gems:\n  - title: Release Helper\n    link: https://gemini.example/g\n",
        )
        .unwrap();
        dir
    }

    #[cfg(feature = "gems")]
    #[test]
    fn gem_titles_become_slugged_tools() {
        let dir = helpers_with_gem_registry();
        let view = scan_helpers(&dir.path().join("helpers"));
        assert_eq!(view.get("release-helper"), Some(ToolType::Gem));
        assert_eq!(view.get("review"), Some(ToolType::Skill));
    }

    #[cfg(not(feature = "gems"))]
    #[test]
    fn gem_registry_is_skipped_without_gem_support() {
        let dir = helpers_with_gem_registry();
        let view = scan_helpers(&dir.path().join("helpers"));
        assert!(view.iter().all(|(_, kind)| kind != ToolType::Gem));
        assert_eq!(view.get("review"), Some(ToolType::Skill));
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn missing_helpers_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_helpers(&dir.path().join("helpers")).is_empty());
    }

    #[test]
    fn markdown_rule_ignores_readme_and_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["README.md", "Readme.MD", "notes.txt", "deploy.md", "build.MD"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        let names: Vec<_> = sorted_entries(dir.path())
            .iter()
            .filter_map(|p| markdown_tool_name(p).map(str::to_string))
            .collect();
        assert_eq!(names, vec!["deploy".to_string()]);
    }
}
