//! # Scour Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`general_scour`] - General scour at a spur dike (D.2.1)
//! - [`local_scour`] - Local scour at a revetment (D.2.2)

pub mod general_scour;
pub mod local_scour;

use serde::{Deserialize, Serialize};

use crate::equations::{general_scour_equations, local_scour_equations, Equation};
use crate::errors::CalcResult;

// Re-export commonly used types
pub use general_scour::{
    CriticalVelocityMethod, CriticalVelocitySource, GeneralScourInput, GeneralScourParams, GeneralScourResult,
};
pub use local_scour::{LocalScourInput, LocalScourResult};

/// Enum wrapper for all calculation types.
///
/// Lets a request hold both kinds of calculation in one list with a
/// `"type"` tag in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Spur-dike general scour
    GeneralScour(GeneralScourInput),
    /// Revetment local scour
    LocalScour(LocalScourInput),
}

/// Result of evaluating a [`CalculationItem`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutcome {
    GeneralScour(GeneralScourResult),
    LocalScour(LocalScourResult),
}

impl CalculationOutcome {
    /// The scour depth in meters, whichever formula produced it
    pub fn depth_m(&self) -> f64 {
        match self {
            CalculationOutcome::GeneralScour(r) => r.hs_m,
            CalculationOutcome::LocalScour(r) => r.hs_local_m,
        }
    }
}

/// Log prefix for a calculation: its label, or `fallback` when unlabeled
pub(crate) fn label_or<'a>(label: &'a str, fallback: &'a str) -> &'a str {
    if label.is_empty() {
        fallback
    } else {
        label
    }
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::GeneralScour(g) => &g.label,
            CalculationItem::LocalScour(l) => &l.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::GeneralScour(_) => general_scour::CALCULATION_TYPE,
            CalculationItem::LocalScour(_) => local_scour::CALCULATION_TYPE,
        }
    }

    /// Equations the calculation applies, in evaluation order
    pub fn equations(&self) -> Vec<Equation> {
        match self {
            CalculationItem::GeneralScour(input) => general_scour_equations(input.critical_velocity.method()),
            CalculationItem::LocalScour(_) => local_scour_equations(),
        }
    }

    /// Run the calculation this item describes
    pub fn evaluate(&self) -> CalcResult<CalculationOutcome> {
        match self {
            CalculationItem::GeneralScour(input) => general_scour::calculate(input).map(CalculationOutcome::GeneralScour),
            CalculationItem::LocalScour(input) => local_scour::calculate(input).map(CalculationOutcome::LocalScour),
        }
    }
}
