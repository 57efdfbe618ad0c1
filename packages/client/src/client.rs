use crate::RemoteResult;
use async_trait::async_trait;
use svgpaper_model::{
    InspectTextResponse, PreviewMode, PreviewResponse, SaveResponse, Template,
    ValidationResponse, VersionInfo,
};

/// Operations offered by the rendering/validation service
///
/// Paths are service-side paths (template directories relative to the
/// service's working directory), not local filesystem paths.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Liveness/handshake probe
    async fn get_version(&self) -> RemoteResult<VersionInfo>;

    /// Read `template.json` from `dir`
    async fn load_template(&self, dir: &str) -> RemoteResult<Template>;

    /// Persist `template` to `dir`, optionally validating first
    ///
    /// A failed validation does not mean the save was rejected; inspect
    /// `validation` in the response.
    async fn save_template(
        &self,
        dir: &str,
        template: &Template,
        validate_first: bool,
    ) -> RemoteResult<SaveResponse>;

    async fn validate(&self, dir: &str) -> RemoteResult<ValidationResponse>;

    /// Render sample output for the template in `dir` into `output_dir`
    async fn preview(
        &self,
        dir: &str,
        output_dir: &str,
        mode: PreviewMode,
    ) -> RemoteResult<PreviewResponse>;

    /// List the text nodes of an SVG asset
    async fn inspect_text(&self, svg_path: &str) -> RemoteResult<InspectTextResponse>;
}

/// Read-only fetch of raw graphic content for display
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch_svg(&self, path: &str) -> RemoteResult<String>;
}
