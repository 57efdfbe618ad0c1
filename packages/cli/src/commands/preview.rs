use super::{Context, TemplateArgs};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use svgpaper_model::{PreviewMode, PreviewResponse};

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Sample data mode (realistic, placeholder); defaults to config `previewMode`
    #[arg(short, long)]
    pub mode: Option<PreviewMode>,
}

pub async fn preview(args: PreviewArgs, ctx: &Context) -> Result<()> {
    let mode = args.mode.unwrap_or(ctx.config.preview_mode);
    let session = ctx
        .load_into(ctx.session().with_preview_mode(mode), &args.template)
        .await?;

    let response = session.preview().await?;

    match &response {
        PreviewResponse::Generated(output) => {
            println!("   {} {}", "✓".green(), session.status());
            println!("   Output: {}", output.html);
        }
        PreviewResponse::Failed { .. } => {
            println!("   {} {}", "✗".red(), session.status());
            std::process::exit(1);
        }
    }

    Ok(())
}
