//! # SVG Paper Client
//!
//! Typed contract to the rendering/validation service.
//!
//! [`RemoteClient`] is the seam the editor session depends on;
//! [`HttpRpcClient`] implements it over JSON-RPC/HTTP. Errors follow one
//! taxonomy ([`RemoteError`]): transport-class failures, `NotFound` and
//! `Parse` from template loading. In-band `ok: false` results are ordinary
//! response values, never errors.

mod assets;
mod client;
mod error;
mod rpc;

pub use assets::FsAssetSource;
pub use client::{AssetSource, RemoteClient};
pub use error::{RemoteError, RemoteResult, NOT_FOUND_CODE, TEMPLATE_PARSE_CODE};
pub use rpc::{HttpRpcClient, DEFAULT_BASE_URL};
