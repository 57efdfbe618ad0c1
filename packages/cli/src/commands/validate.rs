use super::{Context, TemplateArgs};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use svgpaper_model::ValidationResponse;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Print the raw validation result as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn validate(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open(&args.template).await?;
    let response = session.validate().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_validation(&response);
        println!();
        let done = if response.is_ok() {
            "Done".green().bold()
        } else {
            "Done".red().bold()
        };
        println!("✨ {} {}", done, session.status());
    }

    // Exit with error code if there are errors
    if !response.is_ok() {
        std::process::exit(1);
    }

    Ok(())
}

/// Errors and warnings, one per line
pub fn print_validation(response: &ValidationResponse) {
    for error in response.errors() {
        println!("   {} {}", "error".red().bold(), error);
    }
    for warning in response.warnings() {
        println!("   {} {}", "warning".yellow().bold(), warning);
    }
    if response.errors().is_empty() && response.warnings().is_empty() {
        println!("   {} No issues found!", "✓".green());
    }
}
