//! # Error Types
//!
//! Structured error types for scour_core. Every failure is returned to the
//! caller at the first violated precondition; nothing is retried or
//! recovered inside the core.
//!
//! ## Example
//!
//! ```rust
//! use scour_core::errors::{CalcError, CalcResult};
//!
//! fn validate_depth(h0_m: f64) -> CalcResult<()> {
//!     if h0_m <= 0.0 {
//!         return Err(CalcError::out_of_domain(
//!             "h0_m",
//!             h0_m.to_string(),
//!             "Flow depth must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_depth(0.0).unwrap_err().error_code(), "OUT_OF_DOMAIN");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for scour_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for scour calculations.
///
/// Each variant carries enough context for the presentation layer to show
/// a useful message without inspecting the inputs again.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A numeric input violates a range or sign precondition
    #[error("Value out of domain for '{field}': {value} - {reason}")]
    OutOfDomain {
        field: String,
        value: String,
        reason: String,
    },

    /// A method-dependent input group was not supplied
    #[error("Missing required parameter: {field}")]
    MissingParameter { field: String },

    /// A selector string does not name any known variant
    #[error("Invalid selector for '{field}': '{value}' (expected one of: {expected})")]
    InvalidSelector {
        field: String,
        value: String,
        expected: String,
    },

    /// Inputs are numerically valid but the configuration produces no scour
    #[error("Physically invalid: {calculation_type} - {reason}")]
    PhysicallyInvalid {
        calculation_type: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Report compilation or PDF rendering failed
    #[error("Report error during {stage}: {reason}")]
    ReportError { stage: String, reason: String },
}

impl CalcError {
    /// Create an OutOfDomain error
    pub fn out_of_domain(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::OutOfDomain {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingParameter error
    pub fn missing_parameter(field: impl Into<String>) -> Self {
        CalcError::MissingParameter { field: field.into() }
    }

    /// Create an InvalidSelector error
    pub fn invalid_selector(field: impl Into<String>, value: impl Into<String>, expected: impl Into<String>) -> Self {
        CalcError::InvalidSelector {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a PhysicallyInvalid error
    pub fn physically_invalid(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::PhysicallyInvalid {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a ReportError
    pub fn report_error(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ReportError {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// True when the caller supplied bad input (as opposed to a report failure)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::OutOfDomain { .. }
                | CalcError::MissingParameter { .. }
                | CalcError::InvalidSelector { .. }
                | CalcError::PhysicallyInvalid { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::OutOfDomain { .. } => "OUT_OF_DOMAIN",
            CalcError::MissingParameter { .. } => "MISSING_PARAMETER",
            CalcError::InvalidSelector { .. } => "INVALID_SELECTOR",
            CalcError::PhysicallyInvalid { .. } => "PHYSICALLY_INVALID",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::ReportError { .. } => "REPORT_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject zero, negative and NaN values for a strictly positive quantity.
pub(crate) fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::out_of_domain(field, value.to_string(), reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::out_of_domain("h0_m", "-3", "Flow depth must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"OutOfDomain\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_parameter("uc_mps").error_code(), "MISSING_PARAMETER");
        assert_eq!(
            CalcError::invalid_selector("position", "bend-convex", "bend-concave, straight").error_code(),
            "INVALID_SELECTOR"
        );
        assert_eq!(
            CalcError::physically_invalid("General scour (D.2.1)", "Um <= Uc").error_code(),
            "PHYSICALLY_INVALID"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(CalcError::missing_parameter("gamma_s_kn_m3").is_input_error());
        assert!(!CalcError::report_error("compile", "bad markup").is_input_error());
    }

    #[test]
    fn test_require_positive_rejects_nan() {
        assert!(require_positive("d50_m", 0.02, "must be positive").is_ok());
        assert!(require_positive("d50_m", 0.0, "must be positive").is_err());
        assert!(require_positive("d50_m", f64::NAN, "must be positive").is_err());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: CalcError = serde_json::from_str::<f64>("not a number").unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
