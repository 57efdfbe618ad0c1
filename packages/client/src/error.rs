//! Error types for remote operations

use thiserror::Error;

/// JSON-RPC error code the service uses for a missing template/asset
pub const NOT_FOUND_CODE: i64 = -32004;

/// JSON-RPC error code the service uses for a malformed template document
pub const TEMPLATE_PARSE_CODE: i64 = -32005;

/// Failure of a remote call
///
/// In-band failures (`ok: false`) are not errors; they arrive as normal
/// [`ValidationResponse`](svgpaper_model::ValidationResponse) /
/// [`PreviewResponse`](svgpaper_model::PreviewResponse) values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Build from a JSON-RPC error object
    pub fn from_rpc(code: i64, message: String) -> Self {
        match code {
            NOT_FOUND_CODE => RemoteError::NotFound(message),
            TEMPLATE_PARSE_CODE => RemoteError::Parse(message),
            _ => RemoteError::Rpc { code, message },
        }
    }

    /// The request never produced an application response
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RemoteError::Transport(_) | RemoteError::Rpc { .. } | RemoteError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RemoteError::Decode(e.to_string())
        } else {
            RemoteError::Transport(e.to_string())
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;
