use super::{open_host, page_keys};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_model::Slot;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct PagesArgs {
    /// Site document file (overrides config)
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

pub async fn pages(args: PagesArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let data_file = config.data_file(cwd, args.data.as_deref());
    let host = open_host(&data_file, true).await;
    let document = host.current();

    for key in page_keys(&document) {
        let contents = match document.slot(&key) {
            Some(Slot::Blocks(page)) => format!("{} blocks", page.len()),
            Some(slot) => slot.kind().to_string(),
            None => "no content".to_string(),
        };
        println!(
            "  {} {:<32} {:<12} {:?}",
            format!("{:<24}", key).bright_white(),
            document.page_title(&key),
            contents,
            document.layout_hint(&key)
        );
    }
    Ok(())
}
