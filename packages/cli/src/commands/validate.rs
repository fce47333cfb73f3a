use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use folio_model::{SiteDocument, Slot};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Site document file (overrides config)
    pub data: Option<PathBuf>,
}

pub fn validate(args: ValidateArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let data_file = config.data_file(cwd, args.data.as_deref());

    println!(
        "{} {}",
        "🔍 Validating".bright_blue().bold(),
        data_file.display()
    );

    let source = fs::read_to_string(&data_file)
        .map_err(|e| anyhow!("Cannot read {}: {}", data_file.display(), e))?;
    let (document, diagnostics) = SiteDocument::from_json_str(&source)?;

    for (key, slot) in document.slots() {
        if let Slot::Blocks(page) = slot {
            println!("  {} {} ({} blocks)", "✓".green(), key, page.len());
        }
    }

    if diagnostics.is_empty() {
        println!();
        println!("✨ {} No problems found", "Done".green().bold());
        return Ok(());
    }

    println!();
    for diagnostic in &diagnostics {
        eprintln!("  {} {}", "✗".red(), diagnostic);
    }
    Err(anyhow!(
        "{} malformed entries would be dropped on load",
        diagnostics.len()
    ))
}
