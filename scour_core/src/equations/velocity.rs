//! # Flow Velocity Formulas
//!
//! Velocities that drive the scour formulas: the concentrated flow at a spur
//! dike (Um), the sediment incipient-motion velocity (Uc), and the deflected
//! flow at a revetment (Uep).
//!
//! ## Notation
//!
//! - `H0` = Approach flow depth (m)
//! - `d50` = Median bed-sediment grain size (m)
//! - `U` = Approach velocity (m/s)
//! - `L0` = Effective spur-dike length (m)
//! - `B` = Channel width (m)
//! - `γs`, `γ` = Sediment and water unit weights (kN/m³)
//! - `η` = Revetment angle factor from Table D.2.2
//!
//! All quantities are SI. Unit weights only appear as the ratio (γs−γ)/γ, so
//! any consistent unit works for them.

use crate::errors::{require_positive, CalcError, CalcResult};

/// Gravitational acceleration g (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Flow concentration factor in Um = (1 + 4.8·L0/B)·U
pub const DEFLECTION_FACTOR: f64 = 4.8;

/// Velocity concentrated at the dike head.
///
/// # Formula
/// ```text
/// Um = (1 + 4.8·L0/B)·U
/// ```
///
/// The concentration grows with the share of the channel width the dike
/// blocks.
pub fn deflected_velocity(u_mps: f64, l0_m: f64, b_m: f64) -> CalcResult<f64> {
    require_positive("u_mps", u_mps, "Approach velocity must be positive")?;
    require_positive("l0_m", l0_m, "Effective dike length must be positive")?;
    require_positive("b_m", b_m, "Channel width must be positive")?;
    Ok((1.0 + DEFLECTION_FACTOR * (l0_m / b_m)) * u_mps)
}

/// Shared preconditions of both incipient-motion formulas.
fn check_sediment_inputs(h0_m: f64, d50_m: f64, gamma_s: f64, gamma_w: f64) -> CalcResult<()> {
    require_positive("h0_m", h0_m, "Flow depth must be positive")?;
    require_positive("d50_m", d50_m, "Median grain size must be positive")?;
    require_positive("gamma_w_kn_m3", gamma_w, "Water unit weight must be positive")?;
    if !(gamma_s > gamma_w) {
        return Err(CalcError::out_of_domain(
            "gamma_s_kn_m3",
            gamma_s.to_string(),
            format!("Sediment unit weight must exceed water unit weight ({gamma_w})"),
        ));
    }
    Ok(())
}

/// Incipient-motion velocity for cohesive and fine sediment (formula D.2.1-5).
///
/// # Formula
/// ```text
/// Uc = (H0/d50)^0.14 · sqrt( 17.6·((γs−γ)/γ)·d50 + 6.05e-7·(10 + H0)/d50^1.72 )
/// ```
///
/// The radicand is floored at zero before the square root.
pub fn critical_velocity_cohesive(h0_m: f64, d50_m: f64, gamma_s: f64, gamma_w: f64) -> CalcResult<f64> {
    check_sediment_inputs(h0_m, d50_m, gamma_s, gamma_w)?;

    let relative_density = (gamma_s - gamma_w) / gamma_w;
    let weight_term = 17.6 * relative_density * d50_m;
    let cohesion_term = 6.05e-7 * (10.0 + h0_m) / d50_m.powf(1.72);
    let radicand = (weight_term + cohesion_term).max(0.0);

    Ok((h0_m / d50_m).powf(0.14) * radicand.sqrt())
}

/// Incipient-motion velocity for gravel and cobble beds (formula D.2.1-6).
///
/// # Formula
/// ```text
/// Uc = 1.08 · sqrt(g·d50·(γs−γ)/γ) · (H0/d50)^(1/6)
/// ```
pub fn critical_velocity_gravel(h0_m: f64, d50_m: f64, gamma_s: f64, gamma_w: f64) -> CalcResult<f64> {
    check_sediment_inputs(h0_m, d50_m, gamma_s, gamma_w)?;

    let relative_density = (gamma_s - gamma_w) / gamma_w;
    let base = 1.08 * (GRAVITY * d50_m * relative_density).sqrt();
    Ok(base * (h0_m / d50_m).powf(1.0 / 6.0))
}

/// Dimensionless excess velocity v = (Um − Uc)/sqrt(g·d50).
#[inline]
pub fn velocity_term(um_mps: f64, uc_mps: f64, d50_m: f64) -> f64 {
    (um_mps - uc_mps) / (GRAVITY * d50_m).sqrt()
}

/// Deflected velocity at the revetment face, Uep = U·2η/(1 + η).
#[inline]
pub fn edge_velocity(u_mps: f64, eta: f64) -> f64 {
    u_mps * (2.0 * eta / (1.0 + eta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deflected_velocity() {
        // (1 + 4.8 * 30/120) * 1.5 = 3.3
        assert_relative_eq!(deflected_velocity(1.5, 30.0, 120.0).unwrap(), 3.3, epsilon = 1e-12);
    }

    #[test]
    fn test_deflected_velocity_domain() {
        assert!(deflected_velocity(0.0, 30.0, 120.0).is_err());
        assert!(deflected_velocity(1.5, -1.0, 120.0).is_err());
        let err = deflected_velocity(1.5, 30.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            CalcError::out_of_domain("b_m", "0", "Channel width must be positive")
        );
    }

    #[test]
    fn test_cohesive_formula() {
        let uc = critical_velocity_cohesive(3.0, 0.02, 26.0, 9.81).unwrap();
        assert_relative_eq!(uc, 1.545_813_529_117_552_8, max_relative = 1e-10);
    }

    #[test]
    fn test_cohesive_terms_add_before_root() {
        // Fine silt: the cohesion term dominates the submerged-weight term
        let h0: f64 = 2.0;
        let d50: f64 = 1e-4;
        let rel = (26.5 - 9.81) / 9.81;
        let expected = (h0 / d50).powf(0.14)
            * (17.6 * rel * d50 + 6.05e-7 * (10.0 + h0) / d50.powf(1.72)).sqrt();
        let uc = critical_velocity_cohesive(h0, d50, 26.5, 9.81).unwrap();
        assert_relative_eq!(uc, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_gravel_formula() {
        let uc = critical_velocity_gravel(3.0, 0.02, 26.0, 9.81).unwrap();
        assert_relative_eq!(uc, 1.416_589_616_755_026_5, max_relative = 1e-10);
    }

    #[test]
    fn test_equal_unit_weights_rejected() {
        for formula in [critical_velocity_cohesive, critical_velocity_gravel] {
            let err = formula(3.0, 0.02, 9.81, 9.81).unwrap_err();
            assert_eq!(err.error_code(), "OUT_OF_DOMAIN");
            assert!(matches!(err, CalcError::OutOfDomain { ref field, .. } if field == "gamma_s_kn_m3"));
        }
    }

    #[test]
    fn test_sediment_domain() {
        assert!(critical_velocity_gravel(0.0, 0.02, 26.0, 9.81).is_err());
        assert!(critical_velocity_gravel(3.0, 0.0, 26.0, 9.81).is_err());
        assert!(critical_velocity_cohesive(3.0, 0.02, 20.0, 26.0).is_err());
    }

    #[test]
    fn test_velocity_term() {
        let v = velocity_term(3.3, 1.0, 0.02);
        assert_relative_eq!(v, 2.3 / (9.81_f64 * 0.02).sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_edge_velocity() {
        assert_eq!(edge_velocity(2.0, 1.0), 2.0);
        assert_eq!(edge_velocity(0.5, 3.0), 0.75);
    }
}
