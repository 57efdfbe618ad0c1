//! # Template Document
//!
//! In-memory form of a `template.json`: identity metadata, the ordered page
//! list and the ordered field bindings.
//!
//! Members the editor does not model are kept in `extra` maps so that a
//! load → edit → save cycle writes them back untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root template document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Template {
    /// Format identifier (read-only once loaded)
    pub schema: String,

    /// Template identity
    #[serde(rename = "template")]
    pub info: TemplateInfo,

    /// Pages in document order
    #[serde(default)]
    pub pages: Vec<Page>,

    /// Field bindings in declaration order
    #[serde(default)]
    pub fields: Vec<FieldBinding>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `template` block of the document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: String,
    pub version: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One physical page backed by an SVG asset
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    /// Unique within the template
    pub id: String,

    /// Page role tag (opaque to the editor)
    pub kind: String,

    /// SVG path relative to the template directory
    pub svg: String,

    /// Table regions; the editor only ever counts them
    #[serde(default)]
    pub tables: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Data bucket a binding reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Meta,
    Items,
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Binds a data key to an element id inside a page's SVG
///
/// Nothing ties `svg_id` to a real element at edit time; dangling bindings
/// are allowed and left for the remote validator to report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub svg_id: String,
    pub source: Source,
    pub key: String,

    /// Text fitting policy (opaque sizing hint)
    pub fit: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for FieldBinding {
    /// The binding appended by "add field"
    fn default() -> Self {
        Self {
            svg_id: String::new(),
            source: Source::Meta,
            key: String::new(),
            fit: "none".to_string(),
            align: Some(Align::Left),
            extra: Map::new(),
        }
    }
}

impl FieldBinding {
    /// Alignment with the `left` fallback applied
    pub fn effective_align(&self) -> Align {
        self.align.unwrap_or_default()
    }
}

impl Page {
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl Template {
    /// Parse a template document from JSON text
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Serialize with two-space indentation (the on-disk form)
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    /// Find a page by id
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    /// Find the page whose asset is `svg` (relative path)
    pub fn page_by_svg(&self, svg: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.svg == svg)
    }

    /// Both `template.id` and `template.version` are non-empty
    pub fn has_identity(&self) -> bool {
        !self.info.id.is_empty() && !self.info.version.is_empty()
    }

    /// Preview output directory derived from identity
    ///
    /// `delivery-slip` / `1.0` → `out/preview/delivery-slip-1.0`
    pub fn preview_output_dir(&self) -> String {
        format!("out/preview/{}-{}", self.info.id, self.info.version)
    }
}
