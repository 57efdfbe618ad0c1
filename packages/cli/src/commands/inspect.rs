use super::{Context, TemplateArgs};
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use svgpaper_client::{AssetSource, FsAssetSource};
use svgpaper_editor::{EditSession, PageSelection};

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Page to inspect (defaults to the first page)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Print the page's raw SVG instead of its text elements
    #[arg(long)]
    pub raw: bool,

    /// Read raw SVG from this local root instead of the service
    #[arg(long, requires = "raw")]
    pub assets_root: Option<PathBuf>,
}

pub async fn inspect(args: InspectArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open(&args.template).await?;

    if let Some(page_id) = &args.page {
        if session.select_page(page_id).await? == PageSelection::UnknownPage {
            bail!("No page with id '{}'", page_id);
        }
    }

    let Some(svg_path) = session.selected_svg_path() else {
        println!("   {} Template has no pages", "⚠".yellow());
        return Ok(());
    };

    if args.raw {
        let svg = match &args.assets_root {
            Some(root) => fetch_raw(&session, &FsAssetSource::new(root)).await?,
            None => fetch_raw(&session, ctx.client.as_ref()).await?,
        };
        println!("{}", svg);
        return Ok(());
    }

    println!();
    println!("🔍 {} {}", "Text elements in".bold(), svg_path);

    let elements = session.text_elements();
    if elements.is_empty() {
        println!("   {} No text elements found", "⚠".yellow());
        return Ok(());
    }

    for element in &elements {
        let label = if element.id.is_some() {
            element.label().cyan()
        } else {
            element.label().yellow()
        };
        let size = element
            .font
            .size
            .map(|s| format!("{}pt", s))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "   {:>3}. {} {:?} {}",
            element.index,
            label,
            element.text,
            format!(
                "@({:.1}, {:.1}) size={}",
                element.position.x, element.position.y, size
            )
            .dimmed()
        );
    }

    Ok(())
}

async fn fetch_raw(session: &EditSession, assets: &dyn AssetSource) -> Result<String> {
    match session.fetch_selected_svg(assets).await? {
        Some(svg) => Ok(svg),
        None => bail!("No page selected"),
    }
}
