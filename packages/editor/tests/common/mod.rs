//! Scripted remote service for session tests
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use svgpaper_client::{RemoteClient, RemoteError, RemoteResult};
use svgpaper_model::{
    BBox, FontInfo, InspectTextResponse, Point, PreviewMode, PreviewOutput, PreviewResponse,
    SaveResponse, Template, TextElement, ValidationIssue, ValidationResponse, VersionInfo,
};
use tokio::sync::Notify;

pub const DIR: &str = "test-templates/delivery-slip/v1";

/// Remote client answering from canned responses
///
/// A gate registered for a call key makes that call wait until the gate is
/// opened, which lets a test decide the order in which results land.
pub struct ScriptedClient {
    templates: Mutex<HashMap<String, RemoteResult<Template>>>,
    inspections: Mutex<HashMap<String, RemoteResult<InspectTextResponse>>>,
    save: Mutex<RemoteResult<SaveResponse>>,
    validation: Mutex<RemoteResult<ValidationResponse>>,
    preview: Mutex<RemoteResult<PreviewResponse>>,
    version: Mutex<RemoteResult<VersionInfo>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            templates: Mutex::new(HashMap::new()),
            inspections: Mutex::new(HashMap::new()),
            save: Mutex::new(Ok(SaveResponse {
                validation: Some(ValidationResponse::Passed { warnings: vec![] }),
            })),
            validation: Mutex::new(Ok(ValidationResponse::Passed { warnings: vec![] })),
            preview: Mutex::new(Ok(PreviewResponse::Generated(PreviewOutput {
                pages: vec![json!({}), json!({})],
                html: "out/preview/delivery-slip-1.0/index.html".to_string(),
            }))),
            version: Mutex::new(Ok(VersionInfo(json!({ "version": "0.4.2" })))),
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Client serving the delivery-slip template with two inspected pages
    pub fn delivery_slip() -> Self {
        let client = Self::new();
        client.with_template(DIR, delivery_slip());
        client.with_inspection(&format!("{}/p1.svg", DIR), &["customer_name", "issue_date"]);
        client.with_inspection(&format!("{}/p2.svg", DIR), &["item_name", "item_qty", "total"]);
        client
    }

    pub fn with_template(&self, dir: &str, template: Template) {
        self.templates
            .lock()
            .unwrap()
            .insert(dir.to_string(), Ok(template));
    }

    pub fn with_load_error(&self, dir: &str, error: RemoteError) {
        self.templates
            .lock()
            .unwrap()
            .insert(dir.to_string(), Err(error));
    }

    pub fn with_inspection(&self, svg_path: &str, ids: &[&str]) {
        let texts = ids
            .iter()
            .enumerate()
            .map(|(index, id)| text(index, id))
            .collect();
        self.inspections
            .lock()
            .unwrap()
            .insert(svg_path.to_string(), Ok(InspectTextResponse { texts }));
    }

    pub fn with_inspection_error(&self, svg_path: &str, error: RemoteError) {
        self.inspections
            .lock()
            .unwrap()
            .insert(svg_path.to_string(), Err(error));
    }

    pub fn with_save(&self, result: RemoteResult<SaveResponse>) {
        *self.save.lock().unwrap() = result;
    }

    pub fn with_validation(&self, result: RemoteResult<ValidationResponse>) {
        *self.validation.lock().unwrap() = result;
    }

    pub fn with_preview(&self, result: RemoteResult<PreviewResponse>) {
        *self.preview.lock().unwrap() = result;
    }

    pub fn with_version(&self, result: RemoteResult<VersionInfo>) {
        *self.version.lock().unwrap() = result;
    }

    /// Hold calls with this key until the returned gate is notified
    pub fn gate(&self, key: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(key.to_string(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    async fn enter(&self, key: String) {
        self.calls.lock().unwrap().push(key.clone());
        let gate = self.gates.lock().unwrap().get(&key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl RemoteClient for ScriptedClient {
    async fn get_version(&self) -> RemoteResult<VersionInfo> {
        self.enter("getVersion".to_string()).await;
        self.version.lock().unwrap().clone()
    }

    async fn load_template(&self, dir: &str) -> RemoteResult<Template> {
        self.enter(format!("loadTemplate:{}", dir)).await;
        self.templates
            .lock()
            .unwrap()
            .get(dir)
            .cloned()
            .unwrap_or_else(|| Err(RemoteError::NotFound(dir.to_string())))
    }

    async fn save_template(
        &self,
        dir: &str,
        _template: &Template,
        validate_first: bool,
    ) -> RemoteResult<SaveResponse> {
        assert!(validate_first, "saves always validate first");
        self.enter(format!("saveTemplate:{}", dir)).await;
        self.save.lock().unwrap().clone()
    }

    async fn validate(&self, dir: &str) -> RemoteResult<ValidationResponse> {
        self.enter(format!("validate:{}", dir)).await;
        self.validation.lock().unwrap().clone()
    }

    async fn preview(
        &self,
        dir: &str,
        output_dir: &str,
        mode: PreviewMode,
    ) -> RemoteResult<PreviewResponse> {
        self.enter(format!("preview:{}:{}:{}", dir, output_dir, mode.as_str()))
            .await;
        self.preview.lock().unwrap().clone()
    }

    async fn inspect_text(&self, svg_path: &str) -> RemoteResult<InspectTextResponse> {
        self.enter(format!("inspectText:{}", svg_path)).await;
        self.inspections
            .lock()
            .unwrap()
            .get(svg_path)
            .cloned()
            .unwrap_or_else(|| Err(RemoteError::NotFound(svg_path.to_string())))
    }
}

pub fn text(index: usize, id: &str) -> TextElement {
    TextElement {
        index,
        id: Some(id.to_string()),
        suggested_id: None,
        text: id.to_uppercase(),
        position: Point {
            x: 10.0,
            y: 20.0 * index as f64,
        },
        bbox: BBox {
            x: 10.0,
            y: 20.0 * index as f64 - 8.0,
            w: 60.0,
            h: 10.0,
        },
        font: FontInfo { size: Some(9.0) },
    }
}

pub fn delivery_slip() -> Template {
    serde_json::from_value(json!({
        "schema": "svg-paper/template@1",
        "template": { "id": "delivery-slip", "version": "1.0" },
        "pages": [
            { "id": "p1", "kind": "first", "svg": "p1.svg", "tables": [] },
            { "id": "p2", "kind": "repeat", "svg": "p2.svg", "tables": [{ "id": "items" }] }
        ],
        "fields": [
            { "svg_id": "customer_name", "source": "meta", "key": "customer.name", "fit": "shrink" },
            { "svg_id": "item_name", "source": "items", "key": "name", "fit": "none", "align": "left" }
        ]
    }))
    .unwrap()
}

pub fn failed_validation(count: usize) -> ValidationResponse {
    ValidationResponse::Failed {
        errors: (0..count)
            .map(|i| ValidationIssue {
                code: "E_SVG_ID".to_string(),
                file: "template.json".to_string(),
                message: format!("svg_id #{} not found", i),
            })
            .collect(),
        warnings: vec!["page p2 has no fields".to_string()],
    }
}
