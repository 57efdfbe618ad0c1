use super::validate::print_validation;
use super::{Context, TemplateArgs};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use svgpaper_editor::SaveStatus;
use svgpaper_model::ValidationResponse;

#[derive(Args, Debug)]
pub struct SaveArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Set `template.id` before saving
    #[arg(long)]
    pub id: Option<String>,

    /// Set `template.version` before saving
    #[arg(long = "version")]
    pub template_version: Option<String>,

    /// Exit successfully even when the saved template fails validation
    #[arg(long)]
    pub skip_invalid_exit: bool,
}

pub async fn save(args: SaveArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open(&args.template).await?;

    if let Some(id) = args.id {
        session.set_template_id(id)?;
    }
    if let Some(version) = args.template_version {
        session.set_version(version)?;
    }

    let status = session.save().await?;

    match &status {
        SaveStatus::Saved { warnings } => {
            println!("   {} {}", "✓".green(), status.message());
            for warning in warnings {
                println!("   {} {}", "warning".yellow().bold(), warning);
            }
        }
        SaveStatus::SavedWithErrors { errors, warnings } => {
            println!("   {} {}", "⚠".yellow(), status.message());
            print_validation(&ValidationResponse::Failed {
                errors: errors.clone(),
                warnings: warnings.clone(),
            });
            if !args.skip_invalid_exit {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
