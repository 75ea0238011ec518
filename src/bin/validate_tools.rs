//! Validate tools.json against its schema and the helpers tree.
//!
//! Usage:
//!   validate-tools                # ./tools.json, helpers in ./helpers
//!   validate-tools path/to/tools.json
//!
//! Every finding is printed, one per line, followed by a count. Exits 1 when
//! anything was found or the manifest could not be loaded.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tool_catalog::{
    DEFAULT_MANIFEST_PATH, FilesystemToolView, RepoLayout, load_manifest, logging, scan_helpers,
    validate_manifest,
};

#[derive(Parser, Debug)]
#[command(name = "validate-tools")]
#[command(about = "Validate tools.json structure and consistency with the helpers tree")]
struct Cli {
    /// Manifest to validate; helpers are read from the directory beside it.
    #[arg(default_value = DEFAULT_MANIFEST_PATH)]
    manifest: PathBuf,
}

fn main() -> ExitCode {
    logging::init();
    match run() {
        Ok(0) => {
            println!("✓ All manifest validations passed.");
            ExitCode::SUCCESS
        }
        Ok(count) => {
            println!("\n{count} error(s) found.");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<usize> {
    let cli = Cli::parse();
    let layout = RepoLayout::for_manifest(&cli.manifest);
    let manifest = load_manifest(&layout.manifest)?;

    let filesystem = if layout.helpers_dir.is_dir() {
        scan_helpers(&layout.helpers_dir)
    } else {
        FilesystemToolView::new()
    };

    let errors = validate_manifest(manifest.as_value(), &filesystem);
    if !errors.is_empty() {
        println!("{} validation errors found:", layout.manifest.display());
        for error in &errors {
            println!("  ✗ {error}");
        }
    }
    Ok(errors.len())
}
