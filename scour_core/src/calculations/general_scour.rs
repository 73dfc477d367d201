//! # General Scour at Spur Dikes (D.2.1)
//!
//! Depth of general scour at a non-submerged spur dike:
//!
//! ```text
//! hs/H0 = 2.80 · k1 · k2 · k3 · ((Um − Uc)/sqrt(g·d50))^0.75 · (L0/H0)^0.08
//! ```
//!
//! ## Evaluation Order
//!
//! 1. H0 and d50 must be positive
//! 2. k1, k2, k3 from position, angle θ and head slope m
//! 3. Um from the approach velocity and the blocked width share L0/B
//! 4. Uc from the selected method (formula D.2.1-5, D.2.1-6, or a manual value)
//! 5. Um must exceed Uc, otherwise the configuration produces no scour
//! 6. Velocity term, depth ratio, depth
//!
//! The first violated precondition is returned as the error.
//!
//! ## Example
//!
//! ```rust
//! use scour_core::calculations::general_scour::{calculate, CriticalVelocitySource, GeneralScourInput};
//! use scour_core::factors::PositionType;
//!
//! let input = GeneralScourInput {
//!     label: "SD-1".to_string(),
//!     h0_m: 3.0,
//!     d50_m: 0.02,
//!     u_mps: 1.5,
//!     l0_m: 30.0,
//!     b_m: 120.0,
//!     theta_deg: 30.0,
//!     m: 2.0,
//!     position: PositionType::BendConcave,
//!     critical_velocity: CriticalVelocitySource::Cohesive {
//!         gamma_s_kn_m3: 26.0,
//!         gamma_w_kn_m3: 9.81,
//!     },
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!(result.hs_m > 0.0);
//! assert_eq!(result.hs_m, result.hs_over_h0 * input.h0_m);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::equations::{
    critical_velocity_cohesive, critical_velocity_gravel, deflected_velocity, general_scour_ratio, velocity_term,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::factors::{angle_factor, slope_factor, PositionType};

use super::label_or;

/// Calculation type name used in errors and reports
pub const CALCULATION_TYPE: &str = "General scour (D.2.1)";

// ============================================================================
// Critical Velocity Selection
// ============================================================================

/// How the incipient-motion velocity Uc is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CriticalVelocityMethod {
    /// Formula D.2.1-5, cohesive or fine sediment
    #[default]
    #[serde(rename = "formula-a")]
    Cohesive,

    /// Formula D.2.1-6, gravel and cobble
    #[serde(rename = "formula-b")]
    Gravel,

    /// Value supplied by the engineer
    #[serde(rename = "manual")]
    Manual,
}

impl CriticalVelocityMethod {
    /// All methods for UI selection
    pub const ALL: [CriticalVelocityMethod; 3] = [
        CriticalVelocityMethod::Cohesive,
        CriticalVelocityMethod::Gravel,
        CriticalVelocityMethod::Manual,
    ];

    /// Stable tag used in JSON and on the command line
    pub fn tag(&self) -> &'static str {
        match self {
            CriticalVelocityMethod::Cohesive => "formula-a",
            CriticalVelocityMethod::Gravel => "formula-b",
            CriticalVelocityMethod::Manual => "manual",
        }
    }

    /// Display name for UI and reports
    pub fn display_name(&self) -> &'static str {
        match self {
            CriticalVelocityMethod::Cohesive => "Cohesive sediment formula (D.2.1-5)",
            CriticalVelocityMethod::Gravel => "Gravel incipient velocity (D.2.1-6)",
            CriticalVelocityMethod::Manual => "Manual input",
        }
    }
}

impl fmt::Display for CriticalVelocityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for CriticalVelocityMethod {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "formula-a" | "a" | "cohesive" | "d.2.1-5" => Ok(CriticalVelocityMethod::Cohesive),
            "formula-b" | "b" | "gravel" | "d.2.1-6" => Ok(CriticalVelocityMethod::Gravel),
            "manual" => Ok(CriticalVelocityMethod::Manual),
            _ => Err(CalcError::invalid_selector(
                "uc_method",
                s,
                "formula-a, formula-b, manual",
            )),
        }
    }
}

/// Source of Uc together with the fields its method needs.
///
/// ## JSON Example
///
/// ```json
/// { "method": "formula-a", "gamma_s_kn_m3": 26.0, "gamma_w_kn_m3": 9.81 }
/// { "method": "manual", "uc_mps": 1.2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum CriticalVelocitySource {
    /// Formula D.2.1-5
    #[serde(rename = "formula-a")]
    Cohesive { gamma_s_kn_m3: f64, gamma_w_kn_m3: f64 },

    /// Formula D.2.1-6
    #[serde(rename = "formula-b")]
    Gravel { gamma_s_kn_m3: f64, gamma_w_kn_m3: f64 },

    /// Engineer-supplied Uc; bypasses both formulas
    #[serde(rename = "manual")]
    Manual { uc_mps: f64 },
}

impl CriticalVelocitySource {
    /// The method tag of this source
    pub fn method(&self) -> CriticalVelocityMethod {
        match self {
            CriticalVelocitySource::Cohesive { .. } => CriticalVelocityMethod::Cohesive,
            CriticalVelocitySource::Gravel { .. } => CriticalVelocityMethod::Gravel,
            CriticalVelocitySource::Manual { .. } => CriticalVelocityMethod::Manual,
        }
    }

    /// Resolve Uc (m/s) for the given flow depth and grain size.
    pub fn resolve(&self, h0_m: f64, d50_m: f64) -> CalcResult<f64> {
        match *self {
            CriticalVelocitySource::Cohesive { gamma_s_kn_m3, gamma_w_kn_m3 } => {
                critical_velocity_cohesive(h0_m, d50_m, gamma_s_kn_m3, gamma_w_kn_m3)
            }
            CriticalVelocitySource::Gravel { gamma_s_kn_m3, gamma_w_kn_m3 } => {
                critical_velocity_gravel(h0_m, d50_m, gamma_s_kn_m3, gamma_w_kn_m3)
            }
            CriticalVelocitySource::Manual { uc_mps } => {
                require_positive("uc_mps", uc_mps, "Manual critical velocity must be positive")?;
                Ok(uc_mps)
            }
        }
    }
}

// ============================================================================
// Input
// ============================================================================

/// Input parameters for D.2.1 general scour.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "SD-1",
///   "h0_m": 3.0,
///   "d50_m": 0.02,
///   "u_mps": 1.5,
///   "l0_m": 30.0,
///   "b_m": 120.0,
///   "theta_deg": 30.0,
///   "m": 2.0,
///   "position": "bend-concave",
///   "critical_velocity": { "method": "formula-a", "gamma_s_kn_m3": 26.0, "gamma_w_kn_m3": 9.81 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralScourInput {
    /// User label for this calculation (e.g., "SD-1", "Left bank dike 3")
    #[serde(default)]
    pub label: String,

    /// Approach flow depth H0 (m)
    pub h0_m: f64,

    /// Median bed-sediment grain size d50 (m)
    pub d50_m: f64,

    /// Approach velocity U (m/s)
    pub u_mps: f64,

    /// Effective spur-dike length L0 (m)
    pub l0_m: f64,

    /// Channel width B (m)
    pub b_m: f64,

    /// Angle between dike axis and flow θ (degrees, 0 < θ ≤ 90)
    pub theta_deg: f64,

    /// Dike-head side slope ratio m
    pub m: f64,

    /// Dike position in the reach (k1)
    pub position: PositionType,

    /// Uc method and its fields
    pub critical_velocity: CriticalVelocitySource,
}

/// Flat parameter set as a form or spreadsheet supplies it: a method tag plus
/// optional method-dependent fields.
///
/// Converts into [`GeneralScourInput`] with `TryFrom`, which reports the
/// first field the selected method needs but did not receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralScourParams {
    #[serde(default)]
    pub label: String,
    pub h0_m: f64,
    pub d50_m: f64,
    pub u_mps: f64,
    pub l0_m: f64,
    pub b_m: f64,
    pub theta_deg: f64,
    pub m: f64,
    pub position: PositionType,
    pub uc_method: CriticalVelocityMethod,
    #[serde(default)]
    pub gamma_s_kn_m3: Option<f64>,
    #[serde(default)]
    pub gamma_w_kn_m3: Option<f64>,
    #[serde(default)]
    pub uc_manual_mps: Option<f64>,
}

impl TryFrom<GeneralScourParams> for GeneralScourInput {
    type Error = CalcError;

    fn try_from(params: GeneralScourParams) -> Result<Self, Self::Error> {
        let unit_weights = || -> CalcResult<(f64, f64)> {
            let gamma_s = params
                .gamma_s_kn_m3
                .ok_or_else(|| CalcError::missing_parameter("gamma_s_kn_m3"))?;
            let gamma_w = params
                .gamma_w_kn_m3
                .ok_or_else(|| CalcError::missing_parameter("gamma_w_kn_m3"))?;
            Ok((gamma_s, gamma_w))
        };

        let critical_velocity = match params.uc_method {
            CriticalVelocityMethod::Cohesive => {
                let (gamma_s_kn_m3, gamma_w_kn_m3) = unit_weights()?;
                CriticalVelocitySource::Cohesive { gamma_s_kn_m3, gamma_w_kn_m3 }
            }
            CriticalVelocityMethod::Gravel => {
                let (gamma_s_kn_m3, gamma_w_kn_m3) = unit_weights()?;
                CriticalVelocitySource::Gravel { gamma_s_kn_m3, gamma_w_kn_m3 }
            }
            CriticalVelocityMethod::Manual => CriticalVelocitySource::Manual {
                uc_mps: params
                    .uc_manual_mps
                    .ok_or_else(|| CalcError::missing_parameter("uc_manual_mps"))?,
            },
        };

        Ok(GeneralScourInput {
            label: params.label,
            h0_m: params.h0_m,
            d50_m: params.d50_m,
            u_mps: params.u_mps,
            l0_m: params.l0_m,
            b_m: params.b_m,
            theta_deg: params.theta_deg,
            m: params.m,
            position: params.position,
            critical_velocity,
        })
    }
}

// ============================================================================
// Result
// ============================================================================

/// Results from D.2.1 general scour.
///
/// ## JSON Example
///
/// ```json
/// {
///   "hs_m": 24.82,
///   "hs_over_h0": 8.27,
///   "k1": 1.34,
///   "k2": 0.7515,
///   "k3": 0.8694,
///   "um_mps": 3.3,
///   "uc_mps": 1.546,
///   "velocity_term": 3.914
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneralScourResult {
    /// Scour depth hs (m)
    pub hs_m: f64,

    /// Depth ratio hs/H0
    pub hs_over_h0: f64,

    /// Position coefficient k1
    pub k1: f64,

    /// Angle coefficient k2
    pub k2: f64,

    /// Slope coefficient k3
    pub k3: f64,

    /// Concentrated velocity at the dike head Um (m/s)
    pub um_mps: f64,

    /// Resolved incipient velocity Uc (m/s)
    pub uc_mps: f64,

    /// Dimensionless velocity term (Um − Uc)/sqrt(g·d50)
    pub velocity_term: f64,
}

impl GeneralScourResult {
    /// Named values for the intermediate-quantities listing of a report
    pub fn intermediate_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("hs", self.hs_m),
            ("hs/H0", self.hs_over_h0),
            ("k1", self.k1),
            ("k2", self.k2),
            ("k3", self.k3),
            ("Um", self.um_mps),
            ("Uc", self.uc_mps),
            ("v", self.velocity_term),
        ]
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Calculate D.2.1 general scour at a spur dike.
///
/// # Returns
///
/// * `Ok(GeneralScourResult)` - Depth, ratio and every intermediate value
/// * `Err(CalcError::OutOfDomain)` - A numeric input is outside its range
/// * `Err(CalcError::PhysicallyInvalid)` - Um ≤ Uc, so no scour is produced
pub fn calculate(input: &GeneralScourInput) -> CalcResult<GeneralScourResult> {
    require_positive("h0_m", input.h0_m, "Flow depth must be positive")?;
    require_positive("d50_m", input.d50_m, "Median grain size must be positive")?;

    let k1 = input.position.factor();
    let k2 = angle_factor(input.theta_deg)?;
    let k3 = slope_factor(input.m)?;

    let um = deflected_velocity(input.u_mps, input.l0_m, input.b_m)?;
    let uc = input.critical_velocity.resolve(input.h0_m, input.d50_m)?;
    log::debug!(
        "{}: k1={k1} k2={k2} k3={k3} Um={um} Uc={uc} ({})",
        label_or(&input.label, "general scour"),
        input.critical_velocity.method().tag()
    );

    if !(um > uc) {
        return Err(CalcError::physically_invalid(
            CALCULATION_TYPE,
            format!("Um ({um:.4} m/s) must exceed Uc ({uc:.4} m/s); no scour is produced under these conditions"),
        ));
    }

    let v = velocity_term(um, uc, input.d50_m);
    if !(v > 0.0) {
        return Err(CalcError::physically_invalid(
            CALCULATION_TYPE,
            format!("Velocity term (Um - Uc)/sqrt(g*d50) = {v} is not positive"),
        ));
    }

    let hs_over_h0 = general_scour_ratio(k1, k2, k3, v, input.l0_m, input.h0_m);
    let hs_m = hs_over_h0 * input.h0_m;
    log::debug!("{}: v={v} hs/H0={hs_over_h0} hs={hs_m} m", label_or(&input.label, "general scour"));

    Ok(GeneralScourResult {
        hs_m,
        hs_over_h0,
        k1,
        k2,
        k3,
        um_mps: um,
        uc_mps: uc,
        velocity_term: v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_input() -> GeneralScourInput {
        GeneralScourInput {
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
        }
    }

    fn test_params() -> GeneralScourParams {
        GeneralScourParams {
            label: "SD-1".to_string(),
            h0_m: 3.0,
            d50_m: 0.02,
            u_mps: 1.5,
            l0_m: 30.0,
            b_m: 120.0,
            theta_deg: 30.0,
            m: 2.0,
            position: PositionType::BendConcave,
            uc_method: CriticalVelocityMethod::Cohesive,
            gamma_s_kn_m3: Some(26.0),
            gamma_w_kn_m3: Some(9.81),
            uc_manual_mps: None,
        }
    }

    #[test]
    fn test_scenario_cohesive_formula() {
        let result = calculate(&test_input()).unwrap();

        assert_eq!(result.k1, 1.34);
        assert_relative_eq!(result.k2, (30.0_f64 / 90.0).powf(0.26), max_relative = 1e-12);
        assert_relative_eq!(result.k3, (-0.14_f64).exp(), max_relative = 1e-12);
        assert_relative_eq!(result.um_mps, 3.3, epsilon = 1e-12);
        assert_relative_eq!(result.uc_mps, 1.545_813_529_117_552_8, max_relative = 1e-10);
        assert_relative_eq!(result.hs_over_h0, 8.273_795_221_057_426, max_relative = 1e-10);
        assert_relative_eq!(result.hs_m, 24.821_385_663_172_28, max_relative = 1e-10);

        // hs is derived from the ratio, so the identity is exact
        assert_eq!(result.hs_m, result.hs_over_h0 * 3.0);
    }

    #[test]
    fn test_gravel_formula_straight_reach() {
        let mut input = test_input();
        input.position = PositionType::Straight;
        input.critical_velocity = CriticalVelocitySource::Gravel {
            gamma_s_kn_m3: 26.0,
            gamma_w_kn_m3: 9.81,
        };

        let result = calculate(&input).unwrap();
        assert_eq!(result.k1, 1.0);
        assert_relative_eq!(result.uc_mps, 1.416_589_616_755_026_5, max_relative = 1e-10);
        assert_relative_eq!(result.hs_m, 19.537_686_042_133_103, max_relative = 1e-10);
    }

    #[test]
    fn test_manual_velocity_bypasses_formulas() {
        let mut input = test_input();
        input.position = PositionType::Straight;
        input.theta_deg = 90.0;
        input.critical_velocity = CriticalVelocitySource::Manual { uc_mps: 1.0 };

        let result = calculate(&input).unwrap();
        assert_eq!(result.uc_mps, 1.0);
        assert_eq!(result.k2, 1.0);
        assert_relative_eq!(result.hs_m, 30.200_338_409_607_91, max_relative = 1e-10);
    }

    #[test]
    fn test_ratio_identity_across_inputs() {
        for (theta, m, u) in [(10.0, 0.5, 1.0), (45.0, 1.5, 2.0), (90.0, 3.0, 4.5)] {
            let mut input = test_input();
            input.theta_deg = theta;
            input.m = m;
            input.u_mps = u;
            let result = calculate(&input).unwrap();
            assert_relative_eq!(result.hs_over_h0, result.hs_m / input.h0_m, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_velocity_term_recorded() {
        let result = calculate(&test_input()).unwrap();
        let expected = (result.um_mps - result.uc_mps) / (9.81_f64 * 0.02).sqrt();
        assert_eq!(result.velocity_term, expected);
    }

    #[test]
    fn test_no_scour_when_um_below_uc() {
        let mut input = test_input();
        input.u_mps = 0.1;
        input.l0_m = 1.0;
        input.b_m = 1000.0;
        input.critical_velocity = CriticalVelocitySource::Manual { uc_mps: 2.0 };

        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "PHYSICALLY_INVALID");
        assert!(err.to_string().contains("no scour is produced"));
    }

    #[test]
    fn test_um_equal_uc_is_invalid() {
        let mut input = test_input();
        let um = deflected_velocity(input.u_mps, input.l0_m, input.b_m).unwrap();
        input.critical_velocity = CriticalVelocitySource::Manual { uc_mps: um };

        assert_eq!(calculate(&input).unwrap_err().error_code(), "PHYSICALLY_INVALID");
    }

    #[test]
    fn test_domain_violations() {
        let cases: [(&str, fn(&mut GeneralScourInput)); 9] = [
            ("h0_m", (|i: &mut GeneralScourInput| i.h0_m = 0.0)),
            ("d50_m", (|i: &mut GeneralScourInput| i.d50_m = -0.01)),
            ("theta_deg", (|i: &mut GeneralScourInput| i.theta_deg = 0.0)),
            ("theta_deg", (|i: &mut GeneralScourInput| i.theta_deg = 91.0)),
            ("m", (|i: &mut GeneralScourInput| i.m = 0.0)),
            ("u_mps", (|i: &mut GeneralScourInput| i.u_mps = 0.0)),
            ("b_m", (|i: &mut GeneralScourInput| i.b_m = 0.0)),
            (
                "gamma_s_kn_m3",
                (|i: &mut GeneralScourInput| {
                    i.critical_velocity = CriticalVelocitySource::Gravel {
                        gamma_s_kn_m3: 9.81,
                        gamma_w_kn_m3: 9.81,
                    }
                }),
            ),
            ("uc_mps", (|i: &mut GeneralScourInput| i.critical_velocity = CriticalVelocitySource::Manual { uc_mps: 0.0 })),
        ];

        for (expected_field, mutate) in cases {
            let mut input = test_input();
            mutate(&mut input);
            match calculate(&input) {
                Err(CalcError::OutOfDomain { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("expected OutOfDomain for {expected_field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_first_violation_reported() {
        let mut input = test_input();
        input.h0_m = 0.0;
        input.theta_deg = 120.0;
        match calculate(&input) {
            Err(CalcError::OutOfDomain { field, .. }) => assert_eq!(field, "h0_m"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_params_conversion() {
        let input = GeneralScourInput::try_from(test_params()).unwrap();
        assert_eq!(input, test_input());

        let mut manual = test_params();
        manual.uc_method = CriticalVelocityMethod::Manual;
        manual.uc_manual_mps = Some(1.2);
        let input = GeneralScourInput::try_from(manual).unwrap();
        assert_eq!(input.critical_velocity, CriticalVelocitySource::Manual { uc_mps: 1.2 });
    }

    #[test]
    fn test_params_missing_fields() {
        let mut params = test_params();
        params.gamma_w_kn_m3 = None;
        assert_eq!(
            GeneralScourInput::try_from(params).unwrap_err(),
            CalcError::missing_parameter("gamma_w_kn_m3")
        );

        let mut params = test_params();
        params.uc_method = CriticalVelocityMethod::Manual;
        assert_eq!(
            GeneralScourInput::try_from(params).unwrap_err(),
            CalcError::missing_parameter("uc_manual_mps")
        );

        // A manual value does not stand in for missing unit weights
        let mut params = test_params();
        params.uc_method = CriticalVelocityMethod::Gravel;
        params.gamma_s_kn_m3 = None;
        params.uc_manual_mps = Some(1.0);
        assert_eq!(
            GeneralScourInput::try_from(params).unwrap_err().error_code(),
            "MISSING_PARAMETER"
        );
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("A".parse::<CriticalVelocityMethod>().unwrap(), CriticalVelocityMethod::Cohesive);
        assert_eq!("formula-b".parse::<CriticalVelocityMethod>().unwrap(), CriticalVelocityMethod::Gravel);
        assert_eq!("manual".parse::<CriticalVelocityMethod>().unwrap(), CriticalVelocityMethod::Manual);
        assert_eq!(
            "formula-c".parse::<CriticalVelocityMethod>().unwrap_err().error_code(),
            "INVALID_SELECTOR"
        );
    }

    #[test]
    fn test_serialization() {
        let input = test_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"method\": \"formula-a\""));
        assert!(json.contains("\"position\": \"bend-concave\""));

        let roundtrip: GeneralScourInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);

        let manual: CriticalVelocitySource =
            serde_json::from_str(r#"{ "method": "manual", "uc_mps": 1.2 }"#).unwrap();
        assert_eq!(manual.method(), CriticalVelocityMethod::Manual);
    }

    #[test]
    fn test_params_json_missing_optional() {
        let json = r#"{
            "h0_m": 3.0, "d50_m": 0.02, "u_mps": 1.5, "l0_m": 30.0, "b_m": 120.0,
            "theta_deg": 30.0, "m": 2.0, "position": "straight", "uc_method": "formula-b"
        }"#;
        let params: GeneralScourParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.gamma_s_kn_m3, None);
        assert_eq!(
            GeneralScourInput::try_from(params).unwrap_err(),
            CalcError::missing_parameter("gamma_s_kn_m3")
        );
    }
}
