//! # Selection / Inspection Bridge
//!
//! Keeps the text element list tied to exactly one selected page.
//!
//! Every selection change mints a new [`SelectionToken`]. An inspection call
//! carries the token it was issued for, and its result is applied only if
//! that token is still the current one when the call completes: last
//! selection wins, and an older call finishing late is dropped.

use svgpaper_model::TextElement;

/// Ownership token for one selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionToken {
    /// Bumped on every selection change
    pub epoch: u64,

    pub page_id: String,

    /// `{template_dir}/{page.svg}`
    pub svg_path: String,
}

#[derive(Debug, Default)]
pub(crate) struct SelectionBridge {
    epoch: u64,
    current: Option<SelectionToken>,
    elements: Vec<TextElement>,
}

impl SelectionBridge {
    /// Select a page; the element list is emptied until its inspection lands
    pub fn select(&mut self, page_id: String, svg_path: String) -> SelectionToken {
        self.epoch += 1;
        let token = SelectionToken {
            epoch: self.epoch,
            page_id,
            svg_path,
        };
        self.current = Some(token.clone());
        self.elements.clear();
        token
    }

    /// Drop the selection (no document, or a document without pages)
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.current = None;
        self.elements.clear();
    }

    pub fn is_current(&self, token: &SelectionToken) -> bool {
        self.current.as_ref() == Some(token)
    }

    /// Compare-and-apply an inspection result
    pub fn apply(&mut self, token: &SelectionToken, elements: Vec<TextElement>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.elements = elements;
        true
    }

    pub fn current(&self) -> Option<&SelectionToken> {
        self.current.as_ref()
    }

    pub fn elements(&self) -> &[TextElement] {
        &self.elements
    }
}

/// Service path of a page asset
pub(crate) fn asset_path(template_dir: &str, svg: &str) -> String {
    format!("{}/{}", template_dir.trim_end_matches('/'), svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgpaper_model::{BBox, FontInfo, Point};

    fn element(index: usize, id: &str) -> TextElement {
        TextElement {
            index,
            id: Some(id.to_string()),
            suggested_id: None,
            text: id.to_string(),
            position: Point::default(),
            bbox: BBox::default(),
            font: FontInfo::default(),
        }
    }

    #[test]
    fn test_current_token_applies() {
        let mut bridge = SelectionBridge::default();
        let token = bridge.select("p1".to_string(), "t/p1.svg".to_string());

        assert!(bridge.apply(&token, vec![element(0, "a")]));
        assert_eq!(bridge.elements().len(), 1);
    }

    #[test]
    fn test_stale_token_is_discarded() {
        let mut bridge = SelectionBridge::default();
        let p2 = bridge.select("p2".to_string(), "t/p2.svg".to_string());
        let p1 = bridge.select("p1".to_string(), "t/p1.svg".to_string());

        assert!(bridge.apply(&p1, vec![element(0, "p1-text")]));
        assert!(!bridge.apply(&p2, vec![element(0, "p2-text")]));

        assert_eq!(bridge.elements()[0].text, "p1-text");
        assert_eq!(bridge.current().map(|t| t.page_id.as_str()), Some("p1"));
    }

    #[test]
    fn test_reselecting_same_page_still_supersedes() {
        let mut bridge = SelectionBridge::default();
        let first = bridge.select("p1".to_string(), "t/p1.svg".to_string());
        let second = bridge.select("p1".to_string(), "t/p1.svg".to_string());

        assert_ne!(first, second);
        assert!(!bridge.apply(&first, vec![element(0, "old")]));
        assert!(bridge.apply(&second, vec![element(0, "new")]));
    }

    #[test]
    fn test_clear_invalidates_in_flight_token() {
        let mut bridge = SelectionBridge::default();
        let token = bridge.select("p1".to_string(), "t/p1.svg".to_string());
        bridge.clear();

        assert!(!bridge.apply(&token, vec![element(0, "a")]));
        assert!(bridge.elements().is_empty());
        assert!(bridge.current().is_none());
    }

    #[test]
    fn test_asset_path() {
        assert_eq!(asset_path("t/slip/v1", "p1.svg"), "t/slip/v1/p1.svg");
        assert_eq!(asset_path("t/slip/v1/", "p1.svg"), "t/slip/v1/p1.svg");
    }
}
