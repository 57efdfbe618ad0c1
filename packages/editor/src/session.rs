//! # Edit Session
//!
//! Owns one open template and everything derived from it: the selected
//! page, its text elements, the status line, the last validation and
//! preview results.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty ──load──▶ Loading ──▶ Ready ──save/validate/preview──▶ Busy ──▶ Ready
//!                               ▲                                 │
//!                               └──────── transport failure ──────┘ (error set)
//! ```
//!
//! ## Sequencing rules
//!
//! - One remote operation in flight per session. A second attempt is
//!   rejected with [`SessionError::Busy`]; nothing is queued.
//! - The in-flight slot is owned by a ticket. Completion frees the slot
//!   only if its ticket still owns it.
//! - Results are tagged with the document generation they were issued
//!   for. A result arriving after `load`/`close` replaced the document is
//!   discarded with [`SessionError::Superseded`].
//! - Page selection does not take the slot. Inspection results go through
//!   the selection bridge and only land for the still-current selection.
//!
//! Methods take `&self` so that selection changes can overlap an in-flight
//! operation on the same control flow. The state lock is never held across
//! an `.await`.

use crate::selection::{asset_path, SelectionToken};
use crate::state::{InFlight, SessionState};
use crate::{OperationKind, PageSelection, SaveStatus, SessionError, SessionPhase, SessionSnapshot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use svgpaper_client::{AssetSource, RemoteClient};
use svgpaper_model::{
    FieldBinding, PreviewMode, PreviewResponse, Template, TemplateEdit, TextElement,
    ValidationResponse, VersionInfo,
};

/// Single editing session over one template directory
pub struct EditSession {
    /// Session identifier (used in logs)
    pub id: String,

    client: Arc<dyn RemoteClient>,
    preview_mode: PreviewMode,
    state: Mutex<SessionState>,
}

/// Holds the in-flight slot for one operation
struct OperationGuard<'a> {
    session: &'a EditSession,
    ticket: u64,
    generation: u64,
    kind: OperationKind,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.session.lock();
        if state.in_flight.map(|op| op.ticket) == Some(self.ticket) {
            state.in_flight = None;
        }
    }
}

/// What an operation on the loaded document needs from the state
struct DocumentContext {
    dir: String,
    template: Template,
}

impl EditSession {
    pub fn new(id: impl Into<String>, client: Arc<dyn RemoteClient>) -> Self {
        Self {
            id: id.into(),
            client,
            preview_mode: PreviewMode::default(),
            state: Mutex::new(SessionState::new()),
        }
    }

    pub fn with_preview_mode(mut self, mode: PreviewMode) -> Self {
        self.preview_mode = mode;
        self
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Operation slot
    // ------------------------------------------------------------------

    fn claim(
        &self,
        state: &mut SessionState,
        kind: OperationKind,
        status: &str,
    ) -> Result<OperationGuard<'_>, SessionError> {
        if let Some(op) = state.in_flight {
            tracing::debug!(session = %self.id, requested = %kind, running = %op.kind, "rejecting concurrent operation");
            return Err(SessionError::Busy(op.kind));
        }

        if kind == OperationKind::Load {
            state.generation += 1;
        }

        let ticket = state.next_ticket;
        state.next_ticket += 1;
        state.in_flight = Some(InFlight { ticket, kind });
        state.error = None;
        state.status = status.to_string();

        Ok(OperationGuard {
            session: self,
            ticket,
            generation: state.generation,
            kind,
        })
    }

    /// Claim the slot for an operation on the loaded document
    fn claim_for_document(
        &self,
        kind: OperationKind,
        status: &str,
    ) -> Result<(OperationGuard<'_>, DocumentContext), SessionError> {
        let mut state = self.lock();

        let (dir, template) = match (&state.template_dir, &state.template) {
            (Some(dir), Some(template)) => (dir.clone(), template.clone()),
            _ => return Err(SessionError::NoDocument),
        };
        if let Some(op) = state.in_flight {
            return Err(SessionError::Busy(op.kind));
        }

        let precheck = match kind {
            OperationKind::Save if !template.has_identity() => Some(SessionError::MissingIdentity),
            OperationKind::Preview if template.pages.is_empty() => Some(SessionError::NoPages),
            _ => None,
        };
        if let Some(err) = precheck {
            state.error = Some(err.to_string());
            return Err(err);
        }

        let guard = self.claim(&mut state, kind, status)?;
        Ok((guard, DocumentContext { dir, template }))
    }

    /// Apply a result if the document it was issued for is still current
    fn complete<T>(
        &self,
        guard: &OperationGuard<'_>,
        apply: impl FnOnce(&mut SessionState) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let mut state = self.lock();
        if state.generation != guard.generation {
            tracing::debug!(session = %self.id, operation = %guard.kind, "discarding result for replaced document");
            return Err(SessionError::Superseded);
        }
        apply(&mut state)
    }

    // ------------------------------------------------------------------
    // Remote operations
    // ------------------------------------------------------------------

    /// Probe the service; updates the status line only
    pub async fn connect(&self) -> Result<VersionInfo, SessionError> {
        let result = self.client.get_version().await;

        let mut state = self.lock();
        match result {
            Ok(info) => {
                tracing::info!(session = %self.id, version = ?info.version(), "connected");
                state.status = "Connected to RPC server".to_string();
                Ok(info)
            }
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "service unreachable");
                state.status = "Error: Cannot connect to RPC server".to_string();
                Err(e.into())
            }
        }
    }

    /// Load the template in `dir` and select its first page
    ///
    /// Inspection of the first page is part of the load; its failure leaves
    /// an empty element list but does not fail the load.
    pub async fn load(&self, dir: &str) -> Result<(), SessionError> {
        let guard = {
            let mut state = self.lock();
            self.claim(&mut state, OperationKind::Load, "Loading template...")?
        };
        tracing::info!(session = %self.id, dir, "loading template");

        let result = self.client.load_template(dir).await;

        let token = self.complete(&guard, |state| match result {
            Ok(template) => {
                state.status = format!(
                    "Loaded template: {} v{}",
                    template.info.id, template.info.version
                );
                state.template_dir = Some(dir.to_string());
                state.validation = None;
                state.preview = None;
                state.dirty = false;

                let token = match template.first_page() {
                    Some(page) => Some(
                        state
                            .selection
                            .select(page.id.clone(), asset_path(dir, &page.svg)),
                    ),
                    None => {
                        state.selection.clear();
                        None
                    }
                };
                state.template = Some(template);
                Ok(token)
            }
            Err(e) => {
                tracing::warn!(dir, error = %e, "load failed");
                state.fail(e.to_string(), "Error loading template");
                Err(e.into())
            }
        })?;

        if let Some(token) = token {
            self.inspect(token).await;
        }
        Ok(())
    }

    /// Persist the current document, validating first
    pub async fn save(&self) -> Result<SaveStatus, SessionError> {
        let (guard, ctx) = self.claim_for_document(OperationKind::Save, "Saving template...")?;
        tracing::info!(session = %self.id, dir = %ctx.dir, "saving template");

        let result = self
            .client
            .save_template(&ctx.dir, &ctx.template, true)
            .await;

        self.complete(&guard, |state| match result {
            Ok(response) => {
                let status = SaveStatus::from_validation(response.validation);
                state.status = status.message();
                // Edits made while the save was in flight are still unsaved
                if state.template.as_ref() == Some(&ctx.template) {
                    state.dirty = false;
                }
                Ok(status)
            }
            Err(e) => {
                tracing::warn!(dir = %ctx.dir, error = %e, "save failed");
                state.fail(e.to_string(), "Error saving template");
                Err(e.into())
            }
        })
    }

    /// Validate the template directory and keep the full response
    pub async fn validate(&self) -> Result<ValidationResponse, SessionError> {
        let (guard, ctx) =
            self.claim_for_document(OperationKind::Validate, "Validating template...")?;

        let result = self.client.validate(&ctx.dir).await;

        self.complete(&guard, |state| match result {
            Ok(response) => {
                state.status = if response.is_ok() {
                    "Validation passed".to_string()
                } else {
                    format!("Validation failed: {} errors", response.errors().len())
                };
                state.validation = Some(response.clone());
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(dir = %ctx.dir, error = %e, "validation call failed");
                state.validation = None;
                state.fail(e.to_string(), "Error during validation");
                Err(e.into())
            }
        })
    }

    /// Render a preview into `out/preview/{id}-{version}`
    pub async fn preview(&self) -> Result<PreviewResponse, SessionError> {
        let (guard, ctx) =
            self.claim_for_document(OperationKind::Preview, "Generating preview...")?;
        let output_dir = ctx.template.preview_output_dir();
        tracing::info!(session = %self.id, dir = %ctx.dir, output_dir = %output_dir, "generating preview");

        let result = self
            .client
            .preview(&ctx.dir, &output_dir, self.preview_mode)
            .await;

        self.complete(&guard, |state| match result {
            Ok(response) => {
                state.status = if response.is_ok() {
                    format!("Preview generated: {} pages", response.page_count())
                } else {
                    "Preview generation failed".to_string()
                };
                state.preview = Some(response.clone());
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(dir = %ctx.dir, error = %e, "preview call failed");
                state.preview = None;
                state.fail(e.to_string(), "Error generating preview");
                Err(e.into())
            }
        })
    }

    /// Select a page by id and inspect its SVG
    ///
    /// Unknown ids are a no-op. Does not wait for, or block on, any
    /// in-flight operation or earlier inspection.
    pub async fn select_page(&self, page_id: &str) -> Result<PageSelection, SessionError> {
        let token = {
            let mut state = self.lock();
            let (dir, page) = match (&state.template_dir, &state.template) {
                (Some(dir), Some(template)) => (dir.clone(), template.page(page_id).cloned()),
                _ => return Err(SessionError::NoDocument),
            };

            match page {
                Some(page) => state.selection.select(page.id, asset_path(&dir, &page.svg)),
                None => {
                    tracing::debug!(session = %self.id, page_id, "ignoring unknown page");
                    return Ok(PageSelection::UnknownPage);
                }
            }
        };

        Ok(self.inspect(token).await)
    }

    async fn inspect(&self, token: SelectionToken) -> PageSelection {
        let elements = match self.client.inspect_text(&token.svg_path).await {
            Ok(response) => response.texts,
            Err(e) => {
                // The element list is advisory; degrade to empty
                tracing::warn!(svg = %token.svg_path, error = %e, "inspection failed");
                Vec::new()
            }
        };
        let count = elements.len();

        if self.lock().selection.apply(&token, elements) {
            PageSelection::Inspected {
                page_id: token.page_id,
                elements: count,
            }
        } else {
            tracing::debug!(session = %self.id, page_id = %token.page_id, epoch = token.epoch, "discarding stale inspection");
            PageSelection::Stale
        }
    }

    /// Raw SVG of the selected page, for display
    pub async fn fetch_selected_svg(
        &self,
        assets: &dyn AssetSource,
    ) -> Result<Option<String>, SessionError> {
        let path = self.selected_svg_path();
        match path {
            Some(path) => Ok(Some(assets.fetch_svg(&path).await?)),
            None => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Local edits
    // ------------------------------------------------------------------

    /// Replace the document with the edited value
    pub fn apply_edit(&self, edit: TemplateEdit) -> Result<(), SessionError> {
        let mut state = self.lock();
        let template = state.template.as_ref().ok_or(SessionError::NoDocument)?;
        let next = edit.apply(template)?;
        state.template = Some(next);
        state.dirty = true;
        Ok(())
    }

    pub fn set_template_id(&self, id: impl Into<String>) -> Result<(), SessionError> {
        self.apply_edit(TemplateEdit::SetTemplateId { id: id.into() })
    }

    pub fn set_version(&self, version: impl Into<String>) -> Result<(), SessionError> {
        self.apply_edit(TemplateEdit::SetVersion {
            version: version.into(),
        })
    }

    pub fn replace_field(&self, index: usize, field: FieldBinding) -> Result<(), SessionError> {
        self.apply_edit(TemplateEdit::ReplaceField { index, field })
    }

    pub fn add_field(&self) -> Result<(), SessionError> {
        self.apply_edit(TemplateEdit::AddField)
    }

    pub fn remove_field(&self, index: usize) -> Result<(), SessionError> {
        self.apply_edit(TemplateEdit::RemoveField { index })
    }

    /// Drop the document; results of operations still in flight are discarded
    pub fn close(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.in_flight = None;
        state.template = None;
        state.template_dir = None;
        state.selection.clear();
        state.validation = None;
        state.preview = None;
        state.error = None;
        state.dirty = false;
        state.status = "Ready".to_string();
    }

    pub fn dismiss_error(&self) {
        self.lock().error = None;
    }

    pub fn clear_validation(&self) {
        self.lock().validation = None;
    }

    pub fn clear_preview(&self) {
        self.lock().preview = None;
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn phase(&self) -> SessionPhase {
        self.lock().phase()
    }

    /// An operation is in flight; callers gate new operations on this
    pub fn is_loading(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    pub fn template(&self) -> Option<Template> {
        self.lock().template.clone()
    }

    pub fn template_dir(&self) -> Option<String> {
        self.lock().template_dir.clone()
    }

    pub fn selected_page_id(&self) -> Option<String> {
        self.lock().selected_page_id()
    }

    pub fn selected_svg_path(&self) -> Option<String> {
        self.lock().selection.current().map(|t| t.svg_path.clone())
    }

    pub fn text_elements(&self) -> Vec<TextElement> {
        self.lock().selection.elements().to_vec()
    }

    pub fn status(&self) -> String {
        self.lock().status.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn validation(&self) -> Option<ValidationResponse> {
        self.lock().validation.clone()
    }

    pub fn preview_result(&self) -> Option<PreviewResponse> {
        self.lock().preview.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.lock().dirty
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }
}
