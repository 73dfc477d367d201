//! # scour_core - Scour Depth Calculation Engine
//!
//! `scour_core` computes scour depth at river-training structures: general
//! scour at non-submerged spur dikes (clause D.2.1) and local scour at
//! revetments (clause D.2.2). All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Fail Fast**: The first violated precondition is the error returned
//!
//! ## Quick Start
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
//!     critical_velocity: CriticalVelocitySource::Manual { uc_mps: 1.0 },
//! };
//!
//! let result = calculate(&input).unwrap();
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("hs_over_h0"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - D.2.1 and D.2.2 evaluators
//! - [`factors`] - k1, k2, k3 and the η table
//! - [`equations`] - Velocity and depth formulas, equation registry
//! - [`report`] - Human-readable calculation records
//! - [`pdf`] - PDF rendering of records
//! - [`project`] - Project info and batch requests
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod factors;
pub mod pdf;
pub mod project;
pub mod report;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutcome};
pub use errors::{CalcError, CalcResult};
pub use project::{CalculationRequest, ProjectInfo};
pub use report::CalculationRecord;
