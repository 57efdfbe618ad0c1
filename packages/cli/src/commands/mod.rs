pub mod inspect;
pub mod preview;
pub mod save;
pub mod show;
pub mod status;
pub mod validate;

pub use inspect::{inspect, InspectArgs};
pub use preview::{preview, PreviewArgs};
pub use save::{save, SaveArgs};
pub use show::{show, ShowArgs};
pub use status::status;
pub use validate::{validate, ValidateArgs};

use crate::config::Config;
use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use std::sync::Arc;
use svgpaper_client::HttpRpcClient;
use svgpaper_editor::EditSession;

/// Template directory selection shared by every document command
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateArgs {
    /// Template directory on the service (defaults to config `templateDir`)
    #[arg(short, long)]
    pub dir: Option<String>,
}

/// Resolved configuration plus the service connection
pub struct Context {
    pub config: Config,
    pub client: Arc<HttpRpcClient>,
}

impl Context {
    pub fn new(config: Config) -> Result<Self> {
        let client = HttpRpcClient::with_timeout(config.rpc_url.clone(), config.timeout())
            .with_context(|| format!("Invalid service URL: {}", config.rpc_url))?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    pub fn session(&self) -> EditSession {
        EditSession::new("cli", self.client.clone()).with_preview_mode(self.config.preview_mode)
    }

    /// `--dir`, else the configured template directory
    pub fn template_dir(&self, args: &TemplateArgs) -> String {
        args.dir
            .clone()
            .unwrap_or_else(|| self.config.template_dir.clone())
    }

    /// New session with the template loaded
    pub async fn open(&self, args: &TemplateArgs) -> Result<EditSession> {
        self.load_into(self.session(), args).await
    }

    pub async fn load_into(&self, session: EditSession, args: &TemplateArgs) -> Result<EditSession> {
        let dir = self.template_dir(args);
        session
            .load(&dir)
            .await
            .with_context(|| format!("Cannot load template from {}", dir))?;
        println!("📄 {}", session.status().green());
        Ok(session)
    }
}
