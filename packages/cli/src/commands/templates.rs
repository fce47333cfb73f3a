use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::catalog;

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn templates(args: TemplatesArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(catalog())?);
        return Ok(());
    }

    for template in catalog() {
        println!(
            "  {} ({} blocks)",
            template.name.bright_white().bold(),
            template.blocks.len()
        );
        println!("    {}", template.description);
    }
    Ok(())
}
