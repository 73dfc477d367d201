//! # Project Data Structures
//!
//! `ProjectInfo` titles reports. `CalculationRequest` is a JSON document
//! holding project info plus a list of calculations to run as one batch.
//! Requests are read, never written back; no computation is stored.
//!
//! ## Structure
//!
//! ```text
//! CalculationRequest
//! ├── version: String (schema version)
//! ├── project: ProjectInfo (name, engineer, job id)
//! └── items: Vec<CalculationItem> (tagged by "type")
//! ```
//!
//! ## Example
//!
//! ```rust
//! use scour_core::project::CalculationRequest;
//!
//! let json = r#"{
//!     "project": { "name": "Yellow River reach 4", "engineer": "A. Chen", "job_id": "26-017" },
//!     "items": [
//!         { "type": "LocalScour", "label": "RV-1",
//!           "h0_m": 5.0, "u_mps": 2.0, "uc_mps": 1.0, "alpha_deg": 15.0, "n": 2.0 }
//!     ]
//! }"#;
//!
//! let request = CalculationRequest::from_json(json).unwrap();
//! let evaluated = request.evaluate();
//! assert_eq!(evaluated.len(), 1);
//! assert!(evaluated[0].outcome.is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{CalculationItem, CalculationOutcome};
use crate::errors::CalcResult;

/// Current schema version for request files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Project metadata shown in report headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project name; appended to record titles when not blank
    #[serde(default)]
    pub name: String,

    /// Name of the responsible engineer
    #[serde(default)]
    pub engineer: String,

    /// Job/project number
    #[serde(default)]
    pub job_id: String,
}

impl ProjectInfo {
    /// Create project info.
    ///
    /// # Example
    ///
    /// ```rust
    /// use scour_core::project::ProjectInfo;
    ///
    /// let project = ProjectInfo::new("Reach 4", "A. Chen", "26-017");
    /// assert_eq!(project.display_name(), Some("Reach 4"));
    /// assert_eq!(ProjectInfo::default().display_name(), None);
    /// ```
    pub fn new(name: impl Into<String>, engineer: impl Into<String>, job_id: impl Into<String>) -> Self {
        ProjectInfo {
            name: name.into(),
            engineer: engineer.into(),
            job_id: job_id.into(),
        }
    }

    /// Trimmed project name, or `None` when blank
    pub fn display_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// A batch of calculations with shared project info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Schema version (for migration compatibility)
    #[serde(default = "default_version")]
    pub version: String,

    /// Project metadata for report headers
    #[serde(default)]
    pub project: ProjectInfo,

    /// Calculations in evaluation order
    pub items: Vec<CalculationItem>,
}

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// One item of a request together with its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedItem {
    pub item: CalculationItem,
    pub outcome: CalcResult<CalculationOutcome>,
}

impl CalculationRequest {
    /// Create a request with no items.
    pub fn new(project: ProjectInfo) -> Self {
        CalculationRequest {
            version: SCHEMA_VERSION.to_string(),
            project,
            items: Vec::new(),
        }
    }

    /// Parse a request from JSON.
    ///
    /// Malformed JSON and unknown item types fail with `SerializationError`.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let request: CalculationRequest = serde_json::from_str(json)?;
        if request.version != SCHEMA_VERSION {
            log::warn!(
                "request schema version {} differs from supported {}",
                request.version,
                SCHEMA_VERSION
            );
        }
        Ok(request)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Evaluate every item independently. A failing item does not stop the
    /// remaining ones.
    pub fn evaluate(&self) -> Vec<EvaluatedItem> {
        self.items
            .iter()
            .map(|item| EvaluatedItem {
                item: item.clone(),
                outcome: item.evaluate(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{CriticalVelocitySource, GeneralScourInput, LocalScourInput};
    use crate::factors::PositionType;

    fn general_item() -> CalculationItem {
        CalculationItem::GeneralScour(GeneralScourInput {
            label: "SD-1".to_string(),
            h0_m: 3.0,
            d50_m: 0.02,
            u_mps: 1.5,
            l0_m: 30.0,
            b_m: 120.0,
            theta_deg: 30.0,
            m: 2.0,
            position: PositionType::BendConcave,
            critical_velocity: CriticalVelocitySource::Cohesive {
                gamma_s_kn_m3: 26.0,
                gamma_w_kn_m3: 9.81,
            },
        })
    }

    fn local_item(h0_m: f64) -> CalculationItem {
        CalculationItem::LocalScour(LocalScourInput {
            label: "RV-1".to_string(),
            h0_m,
            u_mps: 2.0,
            uc_mps: 1.0,
            alpha_deg: 15.0,
            n: 2.0,
        })
    }

    #[test]
    fn test_project_display_name() {
        assert_eq!(ProjectInfo::new("  Reach 4 ", "", "").display_name(), Some("Reach 4"));
        assert_eq!(ProjectInfo::new("   ", "", "").display_name(), None);
    }

    #[test]
    fn test_request_roundtrip() {
        let mut request = CalculationRequest::new(ProjectInfo::new("Reach 4", "A. Chen", "26-017"));
        request.items.push(general_item());
        request.items.push(local_item(5.0));

        let json = request.to_json().unwrap();
        assert!(json.contains("\"type\": \"GeneralScour\""));
        assert!(json.contains("\"method\": \"formula-a\""));

        let roundtrip = CalculationRequest::from_json(&json).unwrap();
        assert_eq!(roundtrip, request);
    }

    #[test]
    fn test_request_defaults() {
        let request = CalculationRequest::from_json(r#"{ "items": [] }"#).unwrap();
        assert_eq!(request.version, SCHEMA_VERSION);
        assert_eq!(request.project, ProjectInfo::default());
    }

    #[test]
    fn test_malformed_request() {
        let err = CalculationRequest::from_json(r#"{ "items": [ { "type": "Pier" } ] }"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(CalculationRequest::from_json("not json").is_err());
    }

    #[test]
    fn test_evaluate_continues_after_failure() {
        let mut request = CalculationRequest::new(ProjectInfo::default());
        request.items.push(local_item(0.0));
        request.items.push(general_item());
        request.items.push(local_item(5.0));

        let evaluated = request.evaluate();
        assert_eq!(evaluated.len(), 3);
        assert_eq!(evaluated[0].outcome.as_ref().unwrap_err().error_code(), "OUT_OF_DOMAIN");
        assert!(evaluated[1].outcome.is_ok());
        assert_eq!(evaluated[2].outcome.as_ref().unwrap().depth_m(), 15.0);
    }
}
