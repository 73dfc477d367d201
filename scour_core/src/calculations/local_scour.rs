//! # Local Scour at Revetments (D.2.2)
//!
//! ```text
//! η  = Table D.2.2(α)
//! Uep = U · 2η/(1 + η)
//! hs = H0 · ((Uep/Uc)^n − 1)
//! ```
//!
//! hs is negative when Uep < Uc. That outcome means no erosion at the face
//! and is returned unmodified.
//!
//! ## Example
//!
//! ```rust
//! use scour_core::calculations::local_scour::{calculate, LocalScourInput};
//!
//! let input = LocalScourInput {
//!     label: "RV-1".to_string(),
//!     h0_m: 5.0,
//!     u_mps: 2.0,
//!     uc_mps: 1.0,
//!     alpha_deg: 15.0,
//!     n: 2.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.eta, 1.0);
//! assert_eq!(result.hs_local_m, 15.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{edge_velocity, local_scour_depth};
use crate::errors::{require_positive, CalcResult};
use crate::factors::eta_from_angle;

use super::label_or;

/// Calculation type name used in errors and reports
pub const CALCULATION_TYPE: &str = "Local scour (D.2.2)";

/// Input parameters for D.2.2 local scour.
///
/// α is not range-checked; the η table folds and clamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalScourInput {
    /// User label for this calculation (e.g., "RV-1")
    #[serde(default)]
    pub label: String,

    /// Flow depth at the revetment H0 (m)
    pub h0_m: f64,

    /// Approach velocity U (m/s)
    pub u_mps: f64,

    /// Incipient-motion velocity of the bed material Uc (m/s)
    pub uc_mps: f64,

    /// Angle between revetment face and flow α (degrees)
    pub alpha_deg: f64,

    /// Exponent n, set by the shape of the revetment plan
    pub n: f64,
}

/// Results from D.2.2 local scour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalScourResult {
    /// Local scour depth hs (m); negative means no erosion
    pub hs_local_m: f64,

    /// Deflected velocity at the revetment face Uep (m/s)
    pub uep_mps: f64,

    /// Table D.2.2 factor η
    pub eta: f64,
}

impl LocalScourResult {
    /// True when the computed depth is positive
    pub fn indicates_scour(&self) -> bool {
        self.hs_local_m > 0.0
    }

    /// Named values for the intermediate-quantities listing of a report
    pub fn intermediate_values(&self) -> Vec<(&'static str, f64)> {
        vec![("eta", self.eta), ("Uep", self.uep_mps), ("hs", self.hs_local_m)]
    }
}

/// Calculate D.2.2 local scour at a revetment.
///
/// # Returns
///
/// * `Ok(LocalScourResult)` - Depth (possibly negative), Uep and η
/// * `Err(CalcError::OutOfDomain)` - H0, U, Uc or n is not positive
pub fn calculate(input: &LocalScourInput) -> CalcResult<LocalScourResult> {
    require_positive("h0_m", input.h0_m, "Flow depth must be positive")?;
    require_positive("u_mps", input.u_mps, "Approach velocity must be positive")?;
    require_positive("uc_mps", input.uc_mps, "Critical velocity must be positive")?;
    require_positive("n", input.n, "Exponent n must be positive")?;

    let eta = eta_from_angle(input.alpha_deg);
    let uep = edge_velocity(input.u_mps, eta);
    let hs = local_scour_depth(input.h0_m, uep, input.uc_mps, input.n);

    log::debug!(
        "{}: alpha={} eta={eta} Uep={uep} hs={hs} m",
        label_or(&input.label, "local scour"),
        input.alpha_deg
    );

    Ok(LocalScourResult {
        hs_local_m: hs,
        uep_mps: uep,
        eta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use approx::assert_relative_eq;

    fn test_input() -> LocalScourInput {
        LocalScourInput {
            label: "RV-1".to_string(),
            h0_m: 5.0,
            u_mps: 2.0,
            uc_mps: 1.0,
            alpha_deg: 15.0,
            n: 2.0,
        }
    }

    #[test]
    fn test_scenario_lowest_table_angle() {
        let result = calculate(&test_input()).unwrap();
        assert_eq!(result.eta, 1.0);
        assert_eq!(result.uep_mps, 2.0);
        assert_eq!(result.hs_local_m, 15.0);
        assert!(result.indicates_scour());
    }

    #[test]
    fn test_negative_depth_passed_through() {
        let input = LocalScourInput {
            u_mps: 0.5,
            uc_mps: 2.0,
            alpha_deg: 90.0,
            ..test_input()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.eta, 3.0);
        assert_relative_eq!(result.uep_mps, 0.75, epsilon = 1e-12);
        assert_relative_eq!(result.hs_local_m, 5.0 * (0.375_f64.powi(2) - 1.0), epsilon = 1e-12);
        assert_relative_eq!(result.hs_local_m, -4.296_875, epsilon = 1e-12);
        assert!(!result.indicates_scour());
    }

    #[test]
    fn test_interpolated_angle() {
        let input = LocalScourInput {
            h0_m: 4.0,
            u_mps: 1.5,
            uc_mps: 1.2,
            alpha_deg: 45.0,
            n: 1.5,
            ..test_input()
        };
        let result = calculate(&input).unwrap();
        assert_relative_eq!(result.eta, 1.875, epsilon = 1e-12);
        assert_relative_eq!(result.uep_mps, 1.956_521_739_130_434_8, max_relative = 1e-12);
        assert_relative_eq!(result.hs_local_m, 4.327_509_540_031_237, max_relative = 1e-10);
    }

    #[test]
    fn test_alpha_sign_ignored() {
        let positive = calculate(&LocalScourInput { alpha_deg: 35.0, ..test_input() }).unwrap();
        let negative = calculate(&LocalScourInput { alpha_deg: -35.0, ..test_input() }).unwrap();
        assert_eq!(positive, negative);
    }

    #[test]
    fn test_domain_violations() {
        let cases = [
            ("h0_m", LocalScourInput { h0_m: 0.0, ..test_input() }),
            ("u_mps", LocalScourInput { u_mps: -1.0, ..test_input() }),
            ("uc_mps", LocalScourInput { uc_mps: 0.0, ..test_input() }),
            ("n", LocalScourInput { n: 0.0, ..test_input() }),
        ];
        for (expected_field, input) in cases {
            match calculate(&input) {
                Err(CalcError::OutOfDomain { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("expected OutOfDomain for {expected_field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_serialization() {
        let json = r#"{ "h0_m": 5.0, "u_mps": 2.0, "uc_mps": 1.0, "alpha_deg": 15.0, "n": 2.0 }"#;
        let input: LocalScourInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.label, "");
        assert_eq!(calculate(&input).unwrap().hs_local_m, 15.0);
    }
}
