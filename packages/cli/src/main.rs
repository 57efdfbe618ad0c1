mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    inspect, preview, save, show, status, validate, Context, InspectArgs, PreviewArgs, SaveArgs,
    ShowArgs, ValidateArgs,
};
use config::Config;
use tracing_subscriber::EnvFilter;

/// SVG Paper CLI - edit and check print templates against the rendering service
#[derive(Parser, Debug)]
#[command(name = "svgpaper")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Service base URL (overrides config `rpcUrl` and SVGPAPER_RPC_URL)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the service is reachable
    Status,

    /// Show a template's pages and field bindings
    Show(ShowArgs),

    /// List the text elements of a page
    Inspect(InspectArgs),

    /// Validate a template directory
    Validate(ValidateArgs),

    /// Render a preview of a template
    Preview(PreviewArgs),

    /// Save a template, validating first
    Save(SaveArgs),
}

async fn run(cli: Cli, cwd: &str) -> anyhow::Result<()> {
    let config = Config::load(cwd)?.with_rpc_url_override(cli.rpc_url);
    tracing::debug!(rpc_url = %config.rpc_url, template_dir = %config.template_dir, "configuration loaded");
    let ctx = Context::new(config)?;

    match cli.command {
        Command::Status => status(&ctx).await,
        Command::Show(args) => show(args, &ctx).await,
        Command::Inspect(args) => inspect(args, &ctx).await,
        Command::Validate(args) => validate(args, &ctx).await,
        Command::Preview(args) => preview(args, &ctx).await,
        Command::Save(args) => save(args, &ctx).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("svgpaper=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match std::env::current_dir() {
        Ok(cwd) => run(cli, &cwd.display().to_string()).await,
        Err(err) => Err(anyhow::anyhow!("Cannot get current directory: {}", err)),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
