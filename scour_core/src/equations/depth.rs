//! # Scour Depth Formulas
//!
//! Closed-form depth expressions of clauses D.2.1 and D.2.2. These are the
//! bare formulas; the calculation modules validate inputs before calling
//! them.

/// Leading coefficient of the D.2.1 depth ratio
pub const GENERAL_SCOUR_COEFFICIENT: f64 = 2.80;

/// Exponent of the velocity term in D.2.1. Fixed by the clause.
pub const GENERAL_SCOUR_VELOCITY_EXPONENT: f64 = 0.75;

/// Exponent of the length ratio L0/H0 in D.2.1
pub const GENERAL_SCOUR_LENGTH_EXPONENT: f64 = 0.08;

/// Depth ratio for general scour at a non-submerged spur dike (D.2.1).
///
/// # Formula
/// ```text
/// hs/H0 = 2.80 · k1 · k2 · k3 · v^0.75 · (L0/H0)^0.08
/// ```
///
/// where v = (Um − Uc)/sqrt(g·d50) is the dimensionless velocity term.
#[inline]
pub fn general_scour_ratio(k1: f64, k2: f64, k3: f64, velocity_term: f64, l0_m: f64, h0_m: f64) -> f64 {
    GENERAL_SCOUR_COEFFICIENT
        * k1
        * k2
        * k3
        * velocity_term.powf(GENERAL_SCOUR_VELOCITY_EXPONENT)
        * (l0_m / h0_m).powf(GENERAL_SCOUR_LENGTH_EXPONENT)
}

/// Local scour depth at a sloped or smooth revetment (D.2.2).
///
/// # Formula
/// ```text
/// hs = H0 · ((Uep/Uc)^n − 1)
/// ```
///
/// Negative when Uep < Uc, meaning the flow does not erode the bed.
#[inline]
pub fn local_scour_depth(h0_m: f64, uep_mps: f64, uc_mps: f64, n: f64) -> f64 {
    h0_m * ((uep_mps / uc_mps).powf(n) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_general_scour_ratio_unit_inputs() {
        // All factors 1 and L0 = H0 leave only the coefficient
        assert_relative_eq!(general_scour_ratio(1.0, 1.0, 1.0, 1.0, 3.0, 3.0), 2.80);
    }

    #[test]
    fn test_general_scour_ratio_velocity_exponent() {
        let base = general_scour_ratio(1.0, 1.0, 1.0, 1.0, 3.0, 3.0);
        let doubled = general_scour_ratio(1.0, 1.0, 1.0, 2.0, 3.0, 3.0);
        assert_relative_eq!(doubled / base, 2.0_f64.powf(0.75), max_relative = 1e-12);
    }

    #[test]
    fn test_local_scour_depth() {
        assert_relative_eq!(local_scour_depth(5.0, 2.0, 1.0, 2.0), 15.0);
        assert_relative_eq!(local_scour_depth(5.0, 0.75, 2.0, 2.0), -4.296875);
        assert_eq!(local_scour_depth(5.0, 1.0, 1.0, 1.7), 0.0);
    }
}
