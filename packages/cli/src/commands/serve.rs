use super::open_host;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_server::ServeOptions;
use folio_store::DocumentSource;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Site document file (overrides config)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Directory served for paths that are not pages
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Answer writes with 405
    #[arg(long)]
    pub read_only: bool,

    /// Reload when the data file changes on disk
    #[arg(short, long)]
    pub watch: bool,
}

pub async fn serve(args: ServeArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let data_file = config.data_file(cwd, args.data.as_deref());
    let read_only = args.read_only || config.read_only;

    let options = ServeOptions {
        host: args.host.unwrap_or_else(|| config.host.clone()),
        port: args.port.unwrap_or(config.port),
        static_dir: args
            .static_dir
            .map(|dir| cwd.join(dir))
            .or_else(|| config.static_dir(cwd)),
        read_only,
        watch: (args.watch || config.watch).then(|| data_file.clone()),
    };

    println!("{}", "🌐 Starting Folio server...".bright_blue().bold());
    println!("  Data:   {}", data_file.display());
    if let Some(dir) = &options.static_dir {
        println!("  Static: {}", dir.display());
    }
    if read_only {
        println!("  {}", "Read-only: saves are refused".yellow());
    }

    let host = Arc::new(open_host(&data_file, read_only).await);
    if host.source() == DocumentSource::BundledDefault {
        println!(
            "{} {} could not be read, serving the bundled default site",
            "⚠️".yellow(),
            data_file.display()
        );
    }

    folio_server::serve(host, options).await?;
    Ok(())
}
