// Validator guard rails against real helpers trees: the manifest, the scanned
// filesystem view, and their agreement.
mod support;

use anyhow::Result;
use serde_json::json;
use support::{TempRepo, category, sample_repo, tool};
use tool_catalog::{ToolType, load_manifest, scan_helpers, validate_manifest};

fn validate_repo(repo: &TempRepo) -> Result<Vec<String>> {
    let manifest = load_manifest(&repo.manifest_path())?;
    let filesystem = scan_helpers(&repo.helpers());
    Ok(validate_manifest(manifest.as_value(), &filesystem)
        .iter()
        .map(ToString::to_string)
        .collect())
}

#[test]
fn consistent_repo_validates_cleanly() -> Result<()> {
    let repo = sample_repo()?;
    assert_eq!(validate_repo(&repo)?, Vec::<String>::new());
    Ok(())
}

#[test]
fn scanner_sees_every_rule() -> Result<()> {
    let repo = sample_repo()?;
    let view = scan_helpers(&repo.helpers());
    let found: Vec<_> = view.iter().collect();
    assert_eq!(
        found,
        vec![
            ("code-review", ToolType::Skill),
            ("jira-triage", ToolType::Command),
            ("release-notes", ToolType::Agent),
            ("my-cool-gem", ToolType::Gem),
        ]
    );
    Ok(())
}

#[test]
fn unlisted_disk_tools_are_reported_once_each() -> Result<()> {
    let repo = sample_repo()?;
    repo.add_skill("pdf-tools", "---\nname: pdf-tools\n---\n")?;
    repo.add_agent("qa-bot", "no front matter")?;
    repo.write_file("helpers/commands/notes.txt", "ignored")?;

    assert_eq!(
        validate_repo(&repo)?,
        vec![
            "Tool 'pdf-tools' (type: skill) found in filesystem but missing from manifest",
            "Tool 'qa-bot' (type: agent) found in filesystem but missing from manifest",
        ]
    );
    Ok(())
}

#[test]
fn manifest_only_entries_are_not_flagged() -> Result<()> {
    let repo = TempRepo::new();
    repo.write_manifest(&json!({
        "tools": [tool("external-gem", "gem", "misc"), tool("stale", "command", "misc")],
        "categories": {"misc": category("Misc")}
    }))?;
    assert!(validate_repo(&repo)?.is_empty());
    Ok(())
}

#[test]
fn undefined_category_without_definitions_is_one_error() -> Result<()> {
    let repo = TempRepo::new();
    repo.write_manifest(&json!({
        "tools": [{"name": "foo", "type": "skill", "description": "x", "category": "bar"}],
        "categories": {}
    }))?;
    assert_eq!(
        validate_repo(&repo)?,
        vec!["Category 'bar' is referenced by tools but not defined in categories section"]
    );
    Ok(())
}

#[test]
fn missing_description_is_one_error() -> Result<()> {
    let repo = TempRepo::new();
    repo.write_manifest(&json!({
        "tools": [{"name": "foo", "type": "skill", "category": "bar"}],
        "categories": {"bar": category("Bar")}
    }))?;
    assert_eq!(
        validate_repo(&repo)?,
        vec!["Tool 'foo' is missing required field: description"]
    );
    Ok(())
}

#[test]
fn n_duplicates_yield_n_minus_one_errors() -> Result<()> {
    for copies in 2..=4 {
        let repo = TempRepo::new();
        let tools: Vec<_> = (0..copies).map(|_| tool("same", "skill", "c")).collect();
        repo.write_manifest(&json!({"tools": tools, "categories": {"c": category("C")}}))?;
        let errors = validate_repo(&repo)?;
        assert_eq!(errors.len(), copies - 1, "copies = {copies}");
        assert!(errors.iter().all(|e| e == "Duplicate tool name: 'same'"));
    }
    Ok(())
}

#[test]
fn closure_errors_are_independent() -> Result<()> {
    let repo = TempRepo::new();
    repo.write_manifest(&json!({
        "tools": [tool("a", "gem", "ghost")],
        "categories": {"orphan": category("Orphan")}
    }))?;
    assert_eq!(
        validate_repo(&repo)?,
        vec![
            "Category 'ghost' is referenced by tools but not defined in categories section",
            "Category 'orphan' is defined but not used by any tools",
        ]
    );
    Ok(())
}

#[test]
fn type_disagreement_with_disk() -> Result<()> {
    let repo = sample_repo()?;
    let mut manifest = repo.read_json("tools.json")?;
    manifest["tools"][2]["type"] = json!("command");
    repo.write_manifest(&manifest)?;

    assert_eq!(
        validate_repo(&repo)?,
        vec!["Tool 'release-notes' has mismatched type: filesystem=agent, manifest=command"]
    );
    Ok(())
}

#[test]
fn cross_type_name_collision_is_ambiguous() -> Result<()> {
    let repo = sample_repo()?;
    repo.add_command("code-review", "# also a command\n")?;

    assert_eq!(
        validate_repo(&repo)?,
        vec!["Tool name 'code-review' is ambiguous on disk: found as skill, command"]
    );
    Ok(())
}

#[test]
fn broken_gem_registry_is_skipped() -> Result<()> {
    let repo = sample_repo()?;
    repo.write_gems("gems: [unclosed")?;
    let view = scan_helpers(&repo.helpers());
    assert_eq!(view.get("my-cool-gem"), None);
    assert!(validate_repo(&repo)?.is_empty());
    Ok(())
}

#[test]
fn findings_follow_section_order() -> Result<()> {
    let repo = TempRepo::new();
    repo.add_skill("on-disk", "")?;
    repo.write_manifest(&json!({
        "tools": [
            tool("dup", "skill", "used"),
            tool("dup", "skill", "missing"),
            {"name": "bad", "type": "skill", "description": "", "category": "used"}
        ],
        "categories": {"used": category("Used"), "broken": []}
    }))?;

    assert_eq!(
        validate_repo(&repo)?,
        vec![
            "Tool 'bad' has empty description",
            "Duplicate tool name: 'dup'",
            "Category 'broken' must be an object, got array",
            "Category 'missing' is referenced by tools but not defined in categories section",
            "Category 'broken' is defined but not used by any tools",
            "Tool 'on-disk' (type: skill) found in filesystem but missing from manifest",
        ]
    );
    Ok(())
}
