//! # Scour Equations
//!
//! The closed-form hydraulics behind both scour calculations. Keeping the
//! formulas in one place makes them easy to audit against the clauses they
//! come from.
//!
//! ## Modules
//!
//! - [`velocity`] - Um, Uc (formulas D.2.1-5 and D.2.1-6), velocity term, Uep
//! - [`depth`] - D.2.1 depth ratio and D.2.2 local scour depth
//! - [`registry`] - Equation metadata and tracking for the report appendix
//!
//! Dimensionless coefficients (k1, k2, k3, η) live in [`crate::factors`].
//!
//! ## Units
//!
//! SI throughout: metres, m/s, kN/m³, degrees for angles.

pub mod depth;
pub mod registry;
pub mod velocity;

pub use velocity::{
    critical_velocity_cohesive,
    critical_velocity_gravel,
    deflected_velocity,
    edge_velocity,
    velocity_term,
    GRAVITY,
};

pub use depth::{
    general_scour_ratio,
    local_scour_depth,
    GENERAL_SCOUR_VELOCITY_EXPONENT,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    general_scour_equations,
    local_scour_equations,
    generate_equations_markdown,
};
