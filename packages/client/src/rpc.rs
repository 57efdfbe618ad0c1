//! # JSON-RPC over HTTP
//!
//! Talks to the service the way the browser editor does: JSON-RPC 2.0
//! requests POSTed to `{base}/rpc`, SVG assets fetched with
//! `GET {base}/api/svg?path=...`.

use crate::{AssetSource, RemoteClient, RemoteError, RemoteResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use svgpaper_model::{
    InspectTextResponse, PreviewMode, PreviewResponse, SaveResponse, Template,
    ValidationResponse, VersionInfo,
};

/// Address of the local development server
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8788";

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

pub struct HttpRpcClient {
    base_url: String,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpRpcClient {
    pub fn new(base_url: impl Into<String>) -> RemoteResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> RemoteResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<R: DeserializeOwned>(&self, method: &str, params: Value) -> RemoteResult<R> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(method, id, "rpc call");

        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        let response = self
            .http
            .post(format!("{}/rpc", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(method, id, error = %e, "rpc transport failure");
                RemoteError::from(e)
            })?;

        let status = response.status();
        let body = response.bytes().await?;

        // Error objects may come with a non-2xx status; prefer them over the status line
        let envelope: RpcResponse = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                tracing::warn!(method, id, %status, "rpc rejected");
                return Err(RemoteError::Transport(format!("HTTP {}", status)));
            }
            Err(e) => return Err(RemoteError::Decode(e.to_string())),
        };

        if let Some(error) = envelope.error {
            tracing::warn!(method, id, code = error.code, message = %error.message, "rpc error");
            return Err(RemoteError::from_rpc(error.code, error.message));
        }
        if !status.is_success() {
            tracing::warn!(method, id, %status, "rpc rejected");
            return Err(RemoteError::Transport(format!("HTTP {}", status)));
        }

        serde_json::from_value(envelope.result).map_err(|e| {
            tracing::warn!(method, id, error = %e, "undecodable rpc result");
            RemoteError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl RemoteClient for HttpRpcClient {
    async fn get_version(&self) -> RemoteResult<VersionInfo> {
        self.call("getVersion", json!({})).await
    }

    async fn load_template(&self, dir: &str) -> RemoteResult<Template> {
        self.call("loadTemplate", json!({ "dir": dir })).await
    }

    async fn save_template(
        &self,
        dir: &str,
        template: &Template,
        validate_first: bool,
    ) -> RemoteResult<SaveResponse> {
        let params = json!({
            "dir": dir,
            "template": template,
            "validate": validate_first,
        });
        self.call("saveTemplate", params).await
    }

    async fn validate(&self, dir: &str) -> RemoteResult<ValidationResponse> {
        self.call("validate", json!({ "dir": dir })).await
    }

    async fn preview(
        &self,
        dir: &str,
        output_dir: &str,
        mode: PreviewMode,
    ) -> RemoteResult<PreviewResponse> {
        let params = json!({
            "dir": dir,
            "outputDir": output_dir,
            "mode": mode,
        });
        self.call("preview", params).await
    }

    async fn inspect_text(&self, svg_path: &str) -> RemoteResult<InspectTextResponse> {
        self.call("inspectText", json!({ "svgPath": svg_path })).await
    }
}

#[async_trait]
impl AssetSource for HttpRpcClient {
    async fn fetch_svg(&self, path: &str) -> RemoteResult<String> {
        let response = self
            .http
            .get(format!("{}/api/svg", self.base_url))
            .query(&[("path", path)])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.text().await?),
            reqwest::StatusCode::NOT_FOUND => Err(RemoteError::NotFound(path.to_string())),
            status => Err(RemoteError::Transport(format!(
                "Failed to load SVG: {}",
                status.as_u16()
            ))),
        }
    }
}
