//! Build docs/data.json for the helpers website from tools.json.
//!
//! Asset metadata problems are logged and the affected entries keep their
//! defaults; only an unreadable manifest, or one without `tools` and
//! `categories`, stops the build.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tool_catalog::{
    Catalog, PublisherConfig, ToolType, build_website_data, load_manifest, logging,
    resolve_layout, write_json_document,
};

#[derive(Parser, Debug)]
#[command(name = "build-website")]
#[command(about = "Generate website data from the tool manifest")]
struct Cli {
    /// Repository root; discovered from TOOLS_ROOT or the current directory when omitted.
    #[arg(long)]
    root: Option<PathBuf>,
    /// Output path (default: <root>/docs/data.json).
    #[arg(long)]
    output: Option<PathBuf>,
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
    if let Some(output) = cli.output {
        layout.website_data = output;
    }

    let manifest = load_manifest(&layout.manifest)?;
    let catalog = Catalog::from_manifest(&manifest)?;
    let publisher = PublisherConfig::default();

    let data = build_website_data(&catalog, &layout, &publisher)?;
    write_json_document(&layout.website_data, &data)?;
    println!("Website data written to {}", layout.website_data.display());

    println!("Total Skills: {}", data.tools.bucket(ToolType::Skill).len());
    println!("Total Commands: {}", data.tools.bucket(ToolType::Command).len());
    println!("Total Agents: {}", data.tools.bucket(ToolType::Agent).len());
    println!("Total Gemini Gems: {}", data.tools.bucket(ToolType::Gem).len());
    println!("Total tools: {}", data.tools.total());
    Ok(())
}
