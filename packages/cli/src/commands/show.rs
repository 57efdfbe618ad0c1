use super::{Context, TemplateArgs};
use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use svgpaper_model::{Align, Source, Template};

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Print the template document as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open(&args.template).await?;
    let template = session.template().context("No template loaded")?;

    if args.json {
        println!("{}", template.to_json_pretty()?);
        return Ok(());
    }

    print_template(&template);
    Ok(())
}

fn print_template(template: &Template) {
    println!();
    println!("{} {}", "Template:".bold(), template.info.id);
    println!("   Version: {}", template.info.version);
    println!("   Schema:  {}", template.schema.dimmed());

    println!();
    println!("{} ({})", "Pages".bold(), template.pages.len());
    for page in &template.pages {
        println!(
            "   {} {} {} {}",
            page.id.cyan(),
            format!("[{}]", page.kind).dimmed(),
            page.svg,
            format!("{} tables", page.table_count()).dimmed()
        );
    }

    println!();
    println!("{} ({})", "Fields".bold(), template.fields.len());
    for (index, field) in template.fields.iter().enumerate() {
        println!(
            "   {:>3}. {} ← {}.{} {}",
            index,
            field.svg_id.cyan(),
            source_name(field.source),
            field.key,
            format!("fit={} align={}", field.fit, align_name(field.effective_align())).dimmed()
        );
    }
}

fn source_name(source: Source) -> &'static str {
    match source {
        Source::Meta => "meta",
        Source::Items => "items",
    }
}

fn align_name(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}
