//! # SVG Paper Editor
//!
//! Editing session for SVG Paper templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Template, edits, response shapes     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - load/save/validate/preview workflow      │
//! │  - one in-flight operation per session      │
//! │  - page selection + text inspection         │
//! │  - status line, error, result caches        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ client: rendering/validation service        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Session owns the state**: views read snapshots, every change goes
//!    through a session operation
//! 2. **Derived, not cached**: selection and element list are recomputed from
//!    the current document and inspection result
//! 3. **Last selection wins**: late inspection results for an older
//!    selection are dropped
//! 4. **Persisted ≠ valid**: a save with validation errors still saved
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use svgpaper_client::HttpRpcClient;
//! use svgpaper_editor::EditSession;
//!
//! let client = Arc::new(HttpRpcClient::new("http://127.0.0.1:8788")?);
//! let session = EditSession::new("cli", client);
//!
//! session.load("test-templates/delivery-slip/v1").await?;
//! session.select_page("p2").await?;
//! session.add_field()?;
//!
//! let status = session.save().await?;
//! println!("{}", status.message());
//! ```

mod errors;
mod selection;
mod session;
mod state;

pub use errors::SessionError;
pub use selection::SelectionToken;
pub use session::EditSession;
pub use state::{OperationKind, PageSelection, SaveStatus, SessionPhase, SessionSnapshot};

// Re-export common types for convenience
pub use svgpaper_client::{AssetSource, RemoteClient, RemoteError};
pub use svgpaper_model::{Template, TemplateEdit, TextElement};
