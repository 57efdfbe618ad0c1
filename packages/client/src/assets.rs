use crate::{AssetSource, RemoteError, RemoteResult};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Serves SVG assets from a local directory (offline use, tests)
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> RemoteResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches("./"));

        // Stay inside the root
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(RemoteError::NotFound(path.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetSource for FsAssetSource {
    async fn fetch_svg(&self, path: &str) -> RemoteResult<String> {
        let full_path = self.resolve(path)?;

        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => RemoteError::NotFound(path.to_string()),
                _ => RemoteError::Transport(format!("Failed to read {}: {}", path, e)),
            })
    }
}
