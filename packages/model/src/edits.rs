//! # Template Edits
//!
//! Structural operations on a [`Template`].
//!
//! ## Edit Semantics
//!
//! - Every edit takes a document by reference and returns a new one; the
//!   input is never modified.
//! - Index-based edits fail with [`EditError::IndexOutOfRange`] instead of
//!   clamping, so a stale index never touches the wrong binding.
//! - Edits do not check cross-field semantics (dangling `svg_id`, duplicate
//!   page ids). The remote validator owns those.

use crate::{FieldBinding, Template};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Edits a user can make to a loaded template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TemplateEdit {
    /// Replace `template.id`
    SetTemplateId { id: String },

    /// Replace `template.version`
    SetVersion { version: String },

    /// Replace the binding at `index`
    ReplaceField { index: usize, field: FieldBinding },

    /// Append a default binding
    AddField,

    /// Remove the binding at `index`
    RemoveField { index: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Field index {index} out of range (template has {len} fields)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl TemplateEdit {
    /// Apply the edit, producing a new document
    pub fn apply(&self, doc: &Template) -> Result<Template, EditError> {
        self.validate(doc)?;

        let mut next = doc.clone();
        match self {
            TemplateEdit::SetTemplateId { id } => next.info.id = id.clone(),
            TemplateEdit::SetVersion { version } => next.info.version = version.clone(),
            TemplateEdit::ReplaceField { index, field } => next.fields[*index] = field.clone(),
            TemplateEdit::AddField => next.fields.push(FieldBinding::default()),
            TemplateEdit::RemoveField { index } => {
                next.fields.remove(*index);
            }
        }

        Ok(next)
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Template) -> Result<(), EditError> {
        match self {
            TemplateEdit::ReplaceField { index, .. } | TemplateEdit::RemoveField { index } => {
                check_index(doc, *index)
            }
            _ => Ok(()),
        }
    }
}

fn check_index(doc: &Template, index: usize) -> Result<(), EditError> {
    if index < doc.fields.len() {
        Ok(())
    } else {
        Err(EditError::IndexOutOfRange {
            index,
            len: doc.fields.len(),
        })
    }
}

pub fn set_template_id(doc: &Template, id: impl Into<String>) -> Template {
    let mut next = doc.clone();
    next.info.id = id.into();
    next
}

pub fn set_version(doc: &Template, version: impl Into<String>) -> Template {
    let mut next = doc.clone();
    next.info.version = version.into();
    next
}

pub fn replace_field(
    doc: &Template,
    index: usize,
    field: FieldBinding,
) -> Result<Template, EditError> {
    TemplateEdit::ReplaceField { index, field }.apply(doc)
}

/// Append `{svg_id:"", source:"meta", key:"", fit:"none", align:"left"}`
pub fn add_field(doc: &Template) -> Template {
    let mut next = doc.clone();
    next.fields.push(FieldBinding::default());
    next
}

pub fn remove_field(doc: &Template, index: usize) -> Result<Template, EditError> {
    TemplateEdit::RemoveField { index }.apply(doc)
}
