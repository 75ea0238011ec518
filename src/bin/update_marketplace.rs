//! Regenerate the plugin marketplace and container settings from tools.json.
//!
//! Writes `.claude-plugin/marketplace.json` (external plugins first, then the
//! bundled helpers plugin) and `images/claude/claude-settings.json`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tool_catalog::{
    Catalog, PublisherConfig, build_marketplace, build_settings, load_external_plugins,
    load_manifest, logging, resolve_layout, write_json_document,
};

#[derive(Parser, Debug)]
#[command(name = "update-marketplace")]
#[command(about = "Generate marketplace and settings documents from the tool manifest")]
struct Cli {
    /// Repository root; discovered from TOOLS_ROOT or the current directory when omitted.
    #[arg(long)]
    root: Option<PathBuf>,
    /// Settings output path.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Marketplace output path.
    #[arg(long)]
    marketplace: Option<PathBuf>,
    /// External plugin sources document.
    #[arg(long)]
    external_plugins: Option<PathBuf>,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut layout = resolve_layout(cli.root.as_deref()).context("locating repo root")?;
    if let Some(path) = cli.settings {
        layout.settings = path;
    }
    if let Some(path) = cli.marketplace {
        layout.marketplace = path;
    }
    if let Some(path) = cli.external_plugins {
        layout.external_plugins = path;
    }

    println!("Loading tools configuration...");
    let manifest = load_manifest(&layout.manifest)?;
    let catalog = Catalog::from_manifest(&manifest)?;

    println!("Found tools:");
    for (kind, names) in catalog.names_by_type() {
        println!("  {kind}: {} ({})", names.len(), names.join(", "));
    }

    let externals = load_external_plugins(&layout.external_plugins);
    if !externals.is_empty() {
        let names: Vec<&str> = externals.iter().map(|p| p.name.as_str()).collect();
        println!("Found external plugins: {}", names.join(", "));
    }

    let publisher = PublisherConfig::default();

    println!("Generating settings...");
    let settings = build_settings(&publisher);
    println!("Writing {}...", layout.settings.display());
    write_json_document(&layout.settings, &settings)?;

    println!("Generating marketplace configuration...");
    let marketplace = build_marketplace(&publisher, externals);
    println!("Writing {}...", layout.marketplace.display());
    write_json_document(&layout.marketplace, &marketplace)?;

    println!("✓ Settings and marketplace updated successfully!");
    Ok(())
}
