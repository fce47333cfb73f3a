use super::{open_host, page_keys};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_renderer::{render_index, render_page, RenderOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page key to render; the page index when omitted
    pub page: Option<String>,

    /// Site document file (overrides config)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Write HTML files into this directory instead of stdout.
    /// Without a page key every page is written.
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Skip indentation and newlines
    #[arg(long)]
    pub compact: bool,
}

pub async fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let data_file = config.data_file(cwd, args.data.as_deref());
    let host = open_host(&data_file, true).await;
    let document = host.current();

    let options = if args.compact {
        RenderOptions::compact()
    } else {
        RenderOptions::default()
    };

    let Some(out_dir) = args.out_dir else {
        let html = match &args.page {
            Some(key) => render_page(&document, key, &options)?,
            None => render_index(&document, &options),
        };
        print!("{}", html);
        return Ok(());
    };

    let out_dir = cwd.join(out_dir);
    fs::create_dir_all(&out_dir)?;

    let keys = match args.page {
        Some(key) => vec![key],
        None => {
            let index = out_dir.join("index.html");
            fs::write(&index, render_index(&document, &options))?;
            println!("  {} index → {}", "✓".green(), index.display());
            page_keys(&document)
        }
    };

    for key in &keys {
        let html = render_page(&document, key, &options)?;
        let path = out_dir.join(format!("{}.html", key));
        fs::write(&path, html)?;
        println!("  {} {} → {}", "✓".green(), key, path.display());
    }

    println!();
    println!(
        "✨ {} Rendered {} pages",
        "Done".green().bold(),
        keys.len()
    );
    Ok(())
}
