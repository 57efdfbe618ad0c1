//! Error types for the editor

use crate::OperationKind;
use svgpaper_client::RemoteError;
use svgpaper_model::EditError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("No template loaded")]
    NoDocument,

    #[error("Another operation is in progress: {0}")]
    Busy(OperationKind),

    #[error("Template id and version must be set before saving")]
    MissingIdentity,

    #[error("Template has no pages to preview")]
    NoPages,

    #[error("Result discarded: the document was replaced")]
    Superseded,

    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl SessionError {
    /// The remote call never produced an application response
    pub fn is_transport(&self) -> bool {
        matches!(self, SessionError::Remote(e) if e.is_transport())
    }
}
