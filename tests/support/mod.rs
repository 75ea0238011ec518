#![allow(dead_code)]

// Scratch repositories for integration tests: a tools.json plus a helpers/
// tree, removed on drop.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct TempRepo {
    pub root: PathBuf,
}

impl TempRepo {
    pub fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let mut dir = env::temp_dir();
        dir.push(format!(
            "tool-catalog-test-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        fs::create_dir_all(&dir).expect("failed to create temp repo");
        Self { root: dir }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("tools.json")
    }

    pub fn helpers(&self) -> PathBuf {
        self.root.join("helpers")
    }

    pub fn write_manifest(&self, manifest: &Value) -> Result<()> {
        self.write_file("tools.json", &serde_json::to_string_pretty(manifest)?)
    }

    pub fn write_file(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
    }

    pub fn add_skill(&self, name: &str, skill_md: &str) -> Result<()> {
        self.write_file(&format!("helpers/skills/{name}/SKILL.md"), skill_md)
    }

    pub fn add_command(&self, name: &str, body: &str) -> Result<()> {
        self.write_file(&format!("helpers/commands/{name}.md"), body)
    }

    pub fn add_agent(&self, name: &str, body: &str) -> Result<()> {
        self.write_file(&format!("helpers/agents/{name}.md"), body)
    }

    pub fn write_gems(&self, yaml: &str) -> Result<()> {
        self.write_file("helpers/gems/gems.yaml", yaml)
    }

    pub fn read_json(&self, relative: &str) -> Result<Value> {
        let path = self.root.join(relative);
        let raw = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl Drop for TempRepo {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

pub fn tool(name: &str, kind: &str, category: &str) -> Value {
    json!({
        "name": name,
        "type": kind,
        "description": format!("{name} helper"),
        "category": category,
    })
}

pub fn category(name: &str) -> Value {
    json!({"name": name, "description": format!("{name} tools")})
}

/// A small consistent repository: one tool of each type, all categories used.
pub fn sample_repo() -> Result<TempRepo> {
    let repo = TempRepo::new();
    repo.write_manifest(&json!({
        "tools": [
            tool("code-review", "skill", "development"),
            tool("jira-triage", "command", "project"),
            tool("release-notes", "agent", "project"),
            tool("my-cool-gem", "gem", "development"),
        ],
        "categories": {
            "development": category("Development"),
            "project": category("Project"),
        }
    }))?;
    repo.add_skill(
        "code-review",
        "---\nname: code-review\nallowed-tools: Read, Grep\n---\n# Code review\n",
    )?;
    repo.add_command(
        "jira-triage",
        "---\ndescription: triage\nargument-hint: <issue-key>\n---\n# Jira triage\n\n## Synopsis\n\n```\n/jira-triage <issue-key>\n```\n",
    )?;
    repo.add_agent(
        "release-notes",
        "---\nname: release-notes\ntools: [Read, Write]\nmodel: sonnet\n---\nWrites notes.\n",
    )?;
    repo.write_gems("gems:\n  - title: My Cool Gem!\n    link: https://gemini.example/gem/1\n")?;
    repo.write_file("helpers/commands/README.md", "# Commands\n")?;
    Ok(repo)
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    cmd.output()
        .with_context(|| format!("failed to execute {:?}", cmd.get_program()))
}
