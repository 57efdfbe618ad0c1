//! Session state and the views derived from it.

use crate::selection::SelectionBridge;
use serde::Serialize;
use std::fmt;
use svgpaper_model::{
    PreviewResponse, Template, TextElement, ValidationIssue, ValidationResponse,
};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    /// No document loaded
    Empty,
    /// A `load` is in flight
    Loading,
    /// Document present, nothing in flight
    Ready,
    /// A `save`/`validate`/`preview` is in flight
    Busy,
}

/// Remote operations that occupy the session's single in-flight slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OperationKind {
    Load,
    Save,
    Validate,
    Preview,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Load => "load",
            OperationKind::Save => "save",
            OperationKind::Validate => "validate",
            OperationKind::Preview => "preview",
        };
        f.write_str(name)
    }
}

/// Outcome of a completed save
///
/// Persistence and validity are reported separately by the service: both
/// variants mean the document was written.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveStatus {
    /// Validation passed (or was not reported)
    Saved { warnings: Vec<String> },
    /// Written, but validation reported errors
    SavedWithErrors {
        errors: Vec<ValidationIssue>,
        warnings: Vec<String>,
    },
}

impl SaveStatus {
    pub(crate) fn from_validation(validation: Option<ValidationResponse>) -> Self {
        match validation {
            Some(ValidationResponse::Failed { errors, warnings }) => {
                SaveStatus::SavedWithErrors { errors, warnings }
            }
            Some(ValidationResponse::Passed { warnings }) => SaveStatus::Saved { warnings },
            None => SaveStatus::Saved { warnings: vec![] },
        }
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        match self {
            SaveStatus::Saved { .. } => &[],
            SaveStatus::SavedWithErrors { errors, .. } => errors,
        }
    }

    /// Status line text
    pub fn message(&self) -> String {
        match self {
            SaveStatus::Saved { .. } => "Template saved successfully".to_string(),
            SaveStatus::SavedWithErrors { errors, .. } => {
                format!("Saved with {} validation errors", errors.len())
            }
        }
    }
}

/// Outcome of a page selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelection {
    /// No page with that id; selection left unchanged
    UnknownPage,
    /// Inspection landed for the still-current selection
    Inspected { page_id: String, elements: usize },
    /// A newer selection superseded this one before inspection finished
    Stale,
}

/// Cloned, read-only view of a session
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub template_dir: Option<String>,
    pub template: Option<Template>,
    pub selected_page_id: Option<String>,
    pub selected_svg_path: Option<String>,
    pub text_elements: Vec<TextElement>,
    pub status: String,
    pub error: Option<String>,
    pub validation: Option<ValidationResponse>,
    pub preview: Option<PreviewResponse>,
    pub dirty: bool,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct InFlight {
    pub ticket: u64,
    pub kind: OperationKind,
}

pub(crate) struct SessionState {
    pub template_dir: Option<String>,
    pub template: Option<Template>,
    pub selection: SelectionBridge,
    pub status: String,
    pub error: Option<String>,
    pub validation: Option<ValidationResponse>,
    pub preview: Option<PreviewResponse>,
    pub dirty: bool,

    /// Bumped when the document is replaced or closed
    pub generation: u64,
    pub in_flight: Option<InFlight>,
    pub next_ticket: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            template_dir: None,
            template: None,
            selection: SelectionBridge::default(),
            status: "Ready".to_string(),
            error: None,
            validation: None,
            preview: None,
            dirty: false,
            generation: 0,
            in_flight: None,
            next_ticket: 1,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.in_flight, &self.template) {
            (Some(op), _) if op.kind == OperationKind::Load => SessionPhase::Loading,
            (Some(_), _) => SessionPhase::Busy,
            (None, Some(_)) => SessionPhase::Ready,
            (None, None) => SessionPhase::Empty,
        }
    }

    /// Selected page id, only while the document still has that page
    pub fn selected_page_id(&self) -> Option<String> {
        let token = self.selection.current()?;
        self.template
            .as_ref()?
            .page(&token.page_id)
            .map(|page| page.id.clone())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            template_dir: self.template_dir.clone(),
            template: self.template.clone(),
            selected_page_id: self.selected_page_id(),
            selected_svg_path: self.selection.current().map(|t| t.svg_path.clone()),
            text_elements: self.selection.elements().to_vec(),
            status: self.status.clone(),
            error: self.error.clone(),
            validation: self.validation.clone(),
            preview: self.preview.clone(),
            dirty: self.dirty,
        }
    }

    /// Record a failure that produced no application response
    pub fn fail(&mut self, message: String, status: &str) {
        self.error = Some(message);
        self.status = status.to_string();
    }
}
