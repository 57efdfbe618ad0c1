use super::Context;
use anyhow::Result;
use colored::Colorize;

pub async fn status(ctx: &Context) -> Result<()> {
    println!("🔌 {} {}", "Connecting".green().bold(), ctx.config.rpc_url);

    let session = ctx.session();
    match session.connect().await {
        Ok(info) => {
            println!("   {} {}", "✓".green(), session.status());
            println!(
                "   Service version: {}",
                info.version().unwrap_or("(not reported)")
            );
            Ok(())
        }
        Err(err) => {
            println!("   {} {}", "✗".red(), session.status());
            Err(err.into())
        }
    }
}
