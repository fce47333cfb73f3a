mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    edit, pages, render, serve, templates, validate, EditArgs, PagesArgs, RenderArgs, ServeArgs,
    TemplatesArgs, ValidateArgs,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Folio CLI - serve, render and edit block-based site pages
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the site data API and public pages
    Serve(ServeArgs),

    /// Render a page (or the page index) to HTML
    Render(RenderArgs),

    /// Check a site document for malformed blocks
    Validate(ValidateArgs),

    /// List the pages of the site
    Pages(PagesArgs),

    /// List the page templates
    Templates(TemplatesArgs),

    /// Edit the blocks of a page and save the site document
    Edit(EditArgs),
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Command::Serve(args) => serve(args, &cwd).await,
        Command::Render(args) => render(args, &cwd).await,
        Command::Validate(args) => validate(args, &cwd),
        Command::Pages(args) => pages(args, &cwd).await,
        Command::Templates(args) => templates(args),
        Command::Edit(args) => edit(args, &cwd).await,
    }
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["folio", "serve", "--port", "8080", "--read-only"]).unwrap();
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.read_only);
                assert!(!args.watch);
            }
            other => panic!("Expected serve, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_render_without_page() {
        let cli = Cli::try_parse_from(["folio", "render", "--compact"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Render(RenderArgs { page: None, compact: true, .. })
        ));
    }

    #[test]
    fn test_unknown_command() {
        assert!(Cli::try_parse_from(["folio", "compile"]).is_err());
    }
}
