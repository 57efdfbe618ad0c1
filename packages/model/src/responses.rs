//! Response shapes of the rendering/validation service.
//!
//! The service reports in-band failures with `ok: false`. On the Rust side
//! those responses are enums, so "persisted but invalid" and "preview failed"
//! are distinct variants rather than a flag next to optional fields. The wire
//! form (`ok` plus payload) is handled by private `*Wire` structs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Liveness probe result (contents are not interpreted)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionInfo(pub Value);

impl VersionInfo {
    /// `version` member when the service reports one
    pub fn version(&self) -> Option<&str> {
        self.0.get("version").and_then(Value::as_str)
    }
}

/// One structured validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: String,
    pub file: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.file, self.message)
    }
}

/// Result of `validate` (and of the validation step of `saveTemplate`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ValidationWire", into = "ValidationWire")]
pub enum ValidationResponse {
    Passed {
        warnings: Vec<String>,
    },
    Failed {
        errors: Vec<ValidationIssue>,
        warnings: Vec<String>,
    },
}

impl ValidationResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationResponse::Passed { .. })
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        match self {
            ValidationResponse::Passed { .. } => &[],
            ValidationResponse::Failed { errors, .. } => errors,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            ValidationResponse::Passed { warnings } | ValidationResponse::Failed { warnings, .. } => {
                warnings
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ValidationWire {
    ok: bool,
    #[serde(default)]
    errors: Vec<ValidationIssue>,
    #[serde(default)]
    warnings: Vec<String>,
}

impl TryFrom<ValidationWire> for ValidationResponse {
    type Error = String;

    fn try_from(wire: ValidationWire) -> Result<Self, Self::Error> {
        match (wire.ok, wire.errors.is_empty()) {
            (true, true) => Ok(ValidationResponse::Passed {
                warnings: wire.warnings,
            }),
            (true, false) => Err(format!(
                "validation reported ok with {} errors",
                wire.errors.len()
            )),
            (false, _) => Ok(ValidationResponse::Failed {
                errors: wire.errors,
                warnings: wire.warnings,
            }),
        }
    }
}

impl From<ValidationResponse> for ValidationWire {
    fn from(response: ValidationResponse) -> Self {
        match response {
            ValidationResponse::Passed { warnings } => ValidationWire {
                ok: true,
                errors: vec![],
                warnings,
            },
            ValidationResponse::Failed { errors, warnings } => ValidationWire {
                ok: false,
                errors,
                warnings,
            },
        }
    }
}

/// `saveTemplate` result; `validation` is present when validation ran first
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResponse>,
}

/// Preview rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    /// Fill fields with realistic sample data
    #[default]
    Realistic,
    /// Fill fields with their keys
    Placeholder,
}

impl PreviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewMode::Realistic => "realistic",
            PreviewMode::Placeholder => "placeholder",
        }
    }
}

impl std::str::FromStr for PreviewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "realistic" => Ok(PreviewMode::Realistic),
            "placeholder" => Ok(PreviewMode::Placeholder),
            other => Err(format!("unknown preview mode: {}", other)),
        }
    }
}

/// Files produced by a preview run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreviewOutput {
    #[serde(default)]
    pub pages: Vec<Value>,
    pub html: String,
}

/// Result of `preview`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PreviewWire", into = "PreviewWire")]
pub enum PreviewResponse {
    Generated(PreviewOutput),
    /// In-band failure; whatever output the service still reported is kept
    Failed { output: Option<PreviewOutput> },
}

impl PreviewResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, PreviewResponse::Generated(_))
    }

    pub fn output(&self) -> Option<&PreviewOutput> {
        match self {
            PreviewResponse::Generated(output) => Some(output),
            PreviewResponse::Failed { output } => output.as_ref(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.output().map(|o| o.pages.len()).unwrap_or(0)
    }
}

#[derive(Serialize, Deserialize)]
struct PreviewWire {
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output: Option<PreviewOutput>,
}

impl TryFrom<PreviewWire> for PreviewResponse {
    type Error = String;

    fn try_from(wire: PreviewWire) -> Result<Self, Self::Error> {
        match (wire.ok, wire.output) {
            (true, Some(output)) => Ok(PreviewResponse::Generated(output)),
            (true, None) => Err("preview reported ok without output".to_string()),
            (false, output) => Ok(PreviewResponse::Failed { output }),
        }
    }
}

impl From<PreviewResponse> for PreviewWire {
    fn from(response: PreviewResponse) -> Self {
        match response {
            PreviewResponse::Generated(output) => PreviewWire {
                ok: true,
                output: Some(output),
            },
            PreviewResponse::Failed { output } => PreviewWire { ok: false, output },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_failed_keeps_errors_verbatim() {
        let wire = json!({
            "ok": false,
            "errors": [
                { "code": "E_SVG_ID", "file": "template.json", "message": "svg_id 'total' not found in p1.svg" }
            ],
            "warnings": ["page p2 has no fields"]
        });

        let response: ValidationResponse = serde_json::from_value(wire).unwrap();

        assert!(!response.is_ok());
        assert_eq!(response.errors().len(), 1);
        assert_eq!(
            response.errors()[0].to_string(),
            "[E_SVG_ID] template.json: svg_id 'total' not found in p1.svg"
        );
        assert_eq!(response.warnings(), ["page p2 has no fields".to_string()]);
    }

    #[test]
    fn test_validation_passed_serializes_ok_flag() {
        let response = ValidationResponse::Passed { warnings: vec![] };
        let wire = serde_json::to_value(&response).unwrap();

        assert_eq!(wire, json!({ "ok": true, "errors": [], "warnings": [] }));
    }

    #[test]
    fn test_validation_ok_with_errors_is_rejected() {
        let wire = json!({
            "ok": true,
            "errors": [{ "code": "E", "file": "f", "message": "m" }],
            "warnings": []
        });

        assert!(serde_json::from_value::<ValidationResponse>(wire).is_err());
    }

    #[test]
    fn test_save_response_without_validation() {
        let response: SaveResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.validation.is_none());
    }

    #[test]
    fn test_preview_generated() {
        let wire = json!({
            "ok": true,
            "output": { "pages": [{ "svg": "page-1.svg" }, { "svg": "page-2.svg" }], "html": "out/preview/a-1/index.html" }
        });

        let response: PreviewResponse = serde_json::from_value(wire).unwrap();

        assert!(response.is_ok());
        assert_eq!(response.page_count(), 2);
        assert_eq!(response.output().unwrap().html, "out/preview/a-1/index.html");
    }

    #[test]
    fn test_preview_failure_payload() {
        let response: PreviewResponse = serde_json::from_value(json!({ "ok": false })).unwrap();

        assert_eq!(response, PreviewResponse::Failed { output: None });
        assert_eq!(response.page_count(), 0);
    }

    #[test]
    fn test_preview_ok_without_output_is_rejected() {
        assert!(serde_json::from_value::<PreviewResponse>(json!({ "ok": true })).is_err());
    }

    #[test]
    fn test_preview_mode_parsing() {
        assert_eq!("realistic".parse::<PreviewMode>(), Ok(PreviewMode::Realistic));
        assert!("fancy".parse::<PreviewMode>().is_err());
        assert_eq!(serde_json::to_value(PreviewMode::Placeholder).unwrap(), "placeholder");
    }

    #[test]
    fn test_version_info_is_opaque() {
        let info: VersionInfo = serde_json::from_value(json!({ "version": "0.4.2", "node": "24" })).unwrap();
        assert_eq!(info.version(), Some("0.4.2"));

        let bare: VersionInfo = serde_json::from_value(json!("0.4.2")).unwrap();
        assert_eq!(bare.version(), None);
    }
}
