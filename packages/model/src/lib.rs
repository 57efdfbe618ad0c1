//! # SVG Paper Model
//!
//! Template documents and the shapes exchanged with the rendering service.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Template + edits + response shapes   │
//! │  - template.json (pages, field bindings)    │
//! │  - value-returning structural edits         │
//! │  - ok/failed responses as enums             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ client: typed calls to the remote service   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session state machine               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate performs I/O.

mod edits;
mod inspect;
mod responses;
mod template;

pub use edits::{
    add_field, remove_field, replace_field, set_template_id, set_version, EditError,
    TemplateEdit,
};
pub use inspect::{BBox, FontInfo, InspectTextResponse, Point, TextElement};
pub use responses::{
    PreviewMode, PreviewOutput, PreviewResponse, SaveResponse, ValidationIssue,
    ValidationResponse, VersionInfo,
};
pub use template::{Align, FieldBinding, Page, Source, Template, TemplateInfo};
