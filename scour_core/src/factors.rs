//! # Scour Coefficient Factors
//!
//! Dimensionless coefficients used by the D.2.1 and D.2.2 scour formulas.
//!
//! ## Coefficients
//!
//! | Symbol | Meaning | Source |
//! |--------|---------|--------|
//! | k1 | Dike position in the reach | [`PositionType::factor`] |
//! | k2 | Dike-to-flow angle θ | [`angle_factor`] |
//! | k3 | Dike-head side slope m | [`slope_factor`] |
//! | η | Revetment angle amplification | [`eta_from_angle`] (Table D.2.2) |
//!
//! ## Example
//!
//! ```rust
//! use scour_core::factors::{angle_factor, eta_from_angle, slope_factor, PositionType};
//!
//! let k1 = PositionType::BendConcave.factor();
//! let k2 = angle_factor(90.0).unwrap();
//! let k3 = slope_factor(2.0).unwrap();
//! assert_eq!(k1, 1.34);
//! assert_eq!(k2, 1.0);
//! assert!(k3 < 1.0);
//! assert_eq!(eta_from_angle(25.0), 1.375);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

/// Exponent of the angle coefficient k2 = (θ/90)^0.26
pub const ANGLE_EXPONENT: f64 = 0.26;

/// Decay rate of the slope coefficient k3 = e^(-0.07 m)
pub const SLOPE_DECAY_RATE: f64 = 0.07;

// ============================================================================
// k1 - Position Type
// ============================================================================

/// Position of a single spur dike in the river reach (k1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PositionType {
    /// Single dike on the concave bank of a bend: k1 = 1.34
    #[default]
    BendConcave,

    /// Single dike in a transition or straight reach: k1 = 1.00
    Straight,
}

impl PositionType {
    /// All position variants for UI selection
    pub const ALL: [PositionType; 2] = [PositionType::BendConcave, PositionType::Straight];

    /// Get the k1 factor value
    pub fn factor(&self) -> f64 {
        match self {
            PositionType::BendConcave => 1.34,
            PositionType::Straight => 1.00,
        }
    }

    /// Stable tag used in JSON and on the command line
    pub fn tag(&self) -> &'static str {
        match self {
            PositionType::BendConcave => "bend-concave",
            PositionType::Straight => "straight",
        }
    }

    /// Display name for UI and reports
    pub fn display_name(&self) -> &'static str {
        match self {
            PositionType::BendConcave => "Concave bank of bend, single dike (k1=1.34)",
            PositionType::Straight => "Transition/straight reach, single dike (k1=1.00)",
        }
    }
}

impl fmt::Display for PositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PositionType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bend-concave" | "bend" | "concave" => Ok(PositionType::BendConcave),
            "straight" | "transition" => Ok(PositionType::Straight),
            _ => Err(CalcError::invalid_selector(
                "position",
                s,
                "bend-concave, straight",
            )),
        }
    }
}

// ============================================================================
// k2 / k3 - Angle and Slope
// ============================================================================

/// Angle coefficient k2 = (θ/90)^0.26.
///
/// θ is the angle between the dike axis and the flow, in degrees, and must
/// lie in (0, 90]. k2 increases with θ and equals 1.0 at 90°.
pub fn angle_factor(theta_deg: f64) -> CalcResult<f64> {
    if !(theta_deg > 0.0 && theta_deg <= 90.0) {
        return Err(CalcError::out_of_domain(
            "theta_deg",
            theta_deg.to_string(),
            "Dike-to-flow angle must be in (0, 90] degrees",
        ));
    }
    Ok((theta_deg / 90.0).powf(ANGLE_EXPONENT))
}

/// Slope coefficient k3 = e^(-0.07 m) for dike-head side slope ratio m > 0.
pub fn slope_factor(m: f64) -> CalcResult<f64> {
    require_positive("m", m, "Dike-head side slope ratio must be positive")?;
    Ok((-SLOPE_DECAY_RATE * m).exp())
}

// ============================================================================
// η - Table D.2.2
// ============================================================================

/// Fixed piecewise-linear (angle, factor) schedule.
///
/// Breakpoints are sorted ascending by angle. Inputs are folded to their
/// absolute value and clamped to the first/last factor outside the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleFactorTable {
    points: &'static [(f64, f64)],
}

/// Table D.2.2: η versus the angle α between revetment face and flow.
pub const ETA_TABLE: AngleFactorTable = AngleFactorTable {
    points: &[
        (15.0, 1.00),
        (20.0, 1.25),
        (30.0, 1.50),
        (40.0, 1.75),
        (50.0, 2.00),
        (60.0, 2.25),
        (70.0, 2.50),
        (80.0, 2.75),
        (90.0, 3.00),
    ],
};

impl AngleFactorTable {
    /// Breakpoints as (angle_deg, factor) pairs
    pub fn points(&self) -> &'static [(f64, f64)] {
        self.points
    }

    /// Interpolated factor for an angle in degrees.
    pub fn interpolate(&self, angle_deg: f64) -> f64 {
        let a = angle_deg.abs();
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 1.0,
        };

        if a <= first.0 {
            return first.1;
        }
        // NaN matches no bracket and takes the high clamp
        if a >= last.0 || a.is_nan() {
            return last.1;
        }

        // First breakpoint strictly above a; a > first.0 so idx >= 1
        let idx = self.points.partition_point(|&(x, _)| x <= a);
        let (x0, y0) = self.points[idx - 1];
        let (x1, y1) = self.points[idx];

        let t = (a - x0) / (x1 - x0);
        let value = y0 + t * (y1 - y0);
        log::trace!("eta table: angle {a} between {x0} and {x1} -> {value}");
        value
    }
}

/// η from Table D.2.2 for revetment angle α (degrees).
pub fn eta_from_angle(alpha_deg: f64) -> f64 {
    ETA_TABLE.interpolate(alpha_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_position_factors() {
        assert_eq!(PositionType::BendConcave.factor(), 1.34);
        assert_eq!(PositionType::Straight.factor(), 1.00);
    }

    #[test]
    fn test_position_from_str() {
        assert_eq!("bend-concave".parse::<PositionType>().unwrap(), PositionType::BendConcave);
        assert_eq!(" Straight ".parse::<PositionType>().unwrap(), PositionType::Straight);

        let err = "convex".parse::<PositionType>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SELECTOR");
    }

    #[test]
    fn test_position_serialization() {
        let json = serde_json::to_string(&PositionType::BendConcave).unwrap();
        assert_eq!(json, "\"bend-concave\"");
        for position in PositionType::ALL {
            let json = serde_json::to_string(&position).unwrap();
            assert_eq!(json, format!("\"{}\"", position.tag()));
        }
    }

    #[test]
    fn test_angle_factor_at_right_angle() {
        assert_eq!(angle_factor(90.0).unwrap(), 1.0);
    }

    #[test]
    fn test_angle_factor_increasing() {
        let mut previous = 0.0;
        for theta in [0.5, 5.0, 15.0, 30.0, 45.0, 60.0, 75.0, 89.9, 90.0] {
            let k2 = angle_factor(theta).unwrap();
            assert!(k2 > previous, "k2({theta}) = {k2} not above {previous}");
            previous = k2;
        }
    }

    #[test]
    fn test_angle_factor_thirty_degrees() {
        assert_relative_eq!(angle_factor(30.0).unwrap(), (1.0_f64 / 3.0).powf(0.26), max_relative = 1e-12);
        assert_relative_eq!(angle_factor(30.0).unwrap(), 0.751_533_724, epsilon = 1e-8);
    }

    #[test]
    fn test_angle_factor_domain() {
        for theta in [0.0, -10.0, 91.0, f64::NAN] {
            let err = angle_factor(theta).unwrap_err();
            assert_eq!(err.error_code(), "OUT_OF_DOMAIN", "theta = {theta}");
        }
    }

    #[test]
    fn test_slope_factor_decreasing_and_limits() {
        assert_relative_eq!(slope_factor(2.0).unwrap(), (-0.14_f64).exp(), max_relative = 1e-12);
        assert!(slope_factor(1e-9).unwrap() > 0.999_999);
        assert!(slope_factor(1000.0).unwrap() < 1e-30);

        let mut previous = 1.0;
        for m in [0.1, 0.5, 1.0, 2.0, 5.0, 10.0] {
            let k3 = slope_factor(m).unwrap();
            assert!(k3 < previous);
            previous = k3;
        }
    }

    #[test]
    fn test_slope_factor_domain() {
        assert_eq!(slope_factor(0.0).unwrap_err().error_code(), "OUT_OF_DOMAIN");
        assert_eq!(slope_factor(-1.5).unwrap_err().error_code(), "OUT_OF_DOMAIN");
    }

    #[test]
    fn test_eta_breakpoints_exact() {
        for &(angle, eta) in ETA_TABLE.points() {
            assert_eq!(eta_from_angle(angle), eta, "angle = {angle}");
        }
        assert_eq!(eta_from_angle(15.0), 1.00);
        assert_eq!(eta_from_angle(30.0), 1.50);
        assert_eq!(eta_from_angle(90.0), 3.00);
    }

    #[test]
    fn test_eta_interpolation() {
        assert_relative_eq!(eta_from_angle(25.0), 1.375);
        assert_relative_eq!(eta_from_angle(45.0), 1.875);
        assert_relative_eq!(eta_from_angle(17.5), 1.125);
    }

    #[test]
    fn test_eta_symmetry_and_clamps() {
        assert_eq!(eta_from_angle(-40.0), eta_from_angle(40.0));
        assert_eq!(eta_from_angle(5.0), 1.00);
        assert_eq!(eta_from_angle(0.0), 1.00);
        assert_eq!(eta_from_angle(100.0), 3.00);
        assert_eq!(eta_from_angle(-120.0), 3.00);
    }
}
