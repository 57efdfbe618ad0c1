//! Text nodes discovered inside a page's SVG by the inspection service.
//!
//! A snapshot is recomputed wholesale on every inspection call and never
//! merged with a previous one.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FontInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

/// One text node in discovery order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    /// Position in discovery order (stable per inspection call)
    pub index: usize,

    /// Existing `id` attribute, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Identifier proposed by the inspector when `id` is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_id: Option<String>,

    pub text: String,
    pub position: Point,
    pub bbox: BBox,

    #[serde(default)]
    pub font: FontInfo,
}

impl TextElement {
    /// Display label: `id`, then `suggestedId`, then `(no id)`
    pub fn label(&self) -> &str {
        self.id
            .as_deref()
            .or(self.suggested_id.as_deref())
            .unwrap_or("(no id)")
    }
}

/// `inspectText` result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InspectTextResponse {
    #[serde(default)]
    pub texts: Vec<TextElement>,
}
