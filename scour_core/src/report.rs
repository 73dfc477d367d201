//! # Calculation Records
//!
//! A `CalculationRecord` is the human-readable account of one calculation:
//! title, basis, known conditions, calculation process, result and the full
//! set of intermediate values. The plain-text and PDF outputs both render
//! from it.
//!
//! ## Number Formatting
//!
//! [`format_value`] prints scientific notation for |v| ≥ 1e4 and for
//! 0 < |v| < 1e-3 (exponent written `e+04`), otherwise fixed point with
//! trailing zeros removed. Main lines use [`MAIN_DIGITS`], the intermediate
//! listing [`APPENDIX_DIGITS`].

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::calculations::{
    CalculationItem, CalculationOutcome, CriticalVelocitySource, GeneralScourInput, GeneralScourResult,
    LocalScourInput, LocalScourResult,
};
use crate::equations::GENERAL_SCOUR_VELOCITY_EXPONENT;
use crate::errors::{CalcError, CalcResult};
use crate::project::ProjectInfo;

/// Digits after the decimal point on main record lines
pub const MAIN_DIGITS: usize = 6;

/// Digits after the decimal point in the intermediate-values listing
pub const APPENDIX_DIGITS: usize = 12;

const TITLE_PREFIX: &str = "Scour Depth Calculation";

/// Format a number for a calculation record.
///
/// ```rust
/// use scour_core::report::format_value;
///
/// assert_eq!(format_value(3.3, 6), "3.3");
/// assert_eq!(format_value(2.0, 6), "2");
/// assert_eq!(format_value(12345.0, 2), "1.23e+04");
/// assert_eq!(format_value(0.0005, 3), "5.000e-04");
/// ```
pub fn format_value(value: f64, digits: usize) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e4 || (magnitude > 0.0 && magnitude < 1e-3) {
        return signed_exponent(format!("{value:.digits$e}"));
    }
    let fixed = format!("{value:.digits$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// Rewrite Rust's `1.23e4` exponent as `1.23e+04` (signed, at least two digits).
fn signed_exponent(formatted: String) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(rest) => ('-', rest),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

fn fmt_main(value: f64) -> String {
    format_value(value, MAIN_DIGITS)
}

/// A headed group of record lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSection {
    pub heading: String,
    pub lines: Vec<String>,
}

impl RecordSection {
    fn new(heading: &str, lines: Vec<String>) -> Self {
        RecordSection {
            heading: heading.to_string(),
            lines,
        }
    }
}

/// Human-readable record of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRecord {
    /// Record title, suffixed with the project name when one is set
    pub title: String,

    /// User label of the calculation (may be empty)
    pub label: String,

    /// Design basis line
    pub basis: String,

    /// When the record was built
    pub generated: DateTime<Utc>,

    /// Known conditions, calculation process, result
    pub sections: Vec<RecordSection>,

    /// Every result field at appendix precision, in result order
    pub intermediate_values: Vec<(String, String)>,
}

impl CalculationRecord {
    fn new(project: &ProjectInfo, heading: &str, label: &str, basis: &str) -> Self {
        let title = match project.display_name() {
            Some(name) => format!("{TITLE_PREFIX} - {heading} - {name}"),
            None => format!("{TITLE_PREFIX} - {heading}"),
        };
        CalculationRecord {
            title,
            label: label.trim().to_string(),
            basis: basis.to_string(),
            generated: Utc::now(),
            sections: Vec::new(),
            intermediate_values: Vec::new(),
        }
    }

    fn with_intermediates(mut self, values: Vec<(&'static str, f64)>) -> Self {
        self.intermediate_values = values
            .into_iter()
            .map(|(name, value)| (name.to_string(), format_value(value, APPENDIX_DIGITS)))
            .collect();
        self
    }

    /// Build the record of a D.2.1 general scour calculation.
    ///
    /// The velocity term is read from `result`, never recomputed.
    pub fn general_scour(project: &ProjectInfo, input: &GeneralScourInput, result: &GeneralScourResult) -> Self {
        let mut record = Self::new(
            project,
            "D.2.1 Spur Dike General Scour",
            &input.label,
            "Basis: Appendix D, clause D.2.1 (general scour depth at non-submerged spur dikes).",
        );

        let uc_line = match input.critical_velocity {
            CriticalVelocitySource::Manual { uc_mps } => {
                format!("Uc source: manual input, Uc={} m/s", fmt_main(uc_mps))
            }
            CriticalVelocitySource::Cohesive { gamma_s_kn_m3, gamma_w_kn_m3 }
            | CriticalVelocitySource::Gravel { gamma_s_kn_m3, gamma_w_kn_m3 } => format!(
                "Uc source: {}, γs={} kN/m³, γ={} kN/m³",
                input.critical_velocity.method(),
                fmt_main(gamma_s_kn_m3),
                fmt_main(gamma_w_kn_m3)
            ),
        };

        record.sections.push(RecordSection::new(
            "1  Known Conditions",
            vec![
                format!(
                    "H0={} m, d50={} m, U={} m/s, L0={} m, B={} m",
                    fmt_main(input.h0_m),
                    fmt_main(input.d50_m),
                    fmt_main(input.u_mps),
                    fmt_main(input.l0_m),
                    fmt_main(input.b_m)
                ),
                format!("θ={}°, m={}, k1 type={}", fmt_main(input.theta_deg), fmt_main(input.m), input.position),
                uc_line,
            ],
        ));
        record.sections.push(RecordSection::new(
            "2  Calculation Process",
            vec![
                format!("Velocity-term exponent a is fixed at {GENERAL_SCOUR_VELOCITY_EXPONENT:.2}."),
                format!("k1={}, k2={}, k3={}", fmt_main(result.k1), fmt_main(result.k2), fmt_main(result.k3)),
                format!("Um={} m/s, Uc={} m/s", fmt_main(result.um_mps), fmt_main(result.uc_mps)),
                format!("v=(Um−Uc)/sqrt(g·d50)={}", fmt_main(result.velocity_term)),
                format!("hs/H0={}", fmt_main(result.hs_over_h0)),
            ],
        ));
        record
            .sections
            .push(RecordSection::new("3  Result", vec![format!("hs={} m", fmt_main(result.hs_m))]));

        record.with_intermediates(result.intermediate_values())
    }

    /// Build the record of a D.2.2 local scour calculation.
    pub fn local_scour(project: &ProjectInfo, input: &LocalScourInput, result: &LocalScourResult) -> Self {
        let mut record = Self::new(
            project,
            "D.2.2 Revetment Local Scour",
            &input.label,
            "Basis: Appendix D, clause D.2.2 (local scour depth at sloped and flush revetments).",
        );

        record.sections.push(RecordSection::new(
            "1  Known Conditions",
            vec![format!(
                "H0={} m, U={} m/s, Uc={} m/s, α={}°, n={}",
                fmt_main(input.h0_m),
                fmt_main(input.u_mps),
                fmt_main(input.uc_mps),
                fmt_main(input.alpha_deg),
                fmt_main(input.n)
            )],
        ));
        record.sections.push(RecordSection::new(
            "2  Calculation Process",
            vec![
                format!("η (Table D.2.2)={}", fmt_main(result.eta)),
                format!("Uep=U·(2η/(1+η))={} m/s", fmt_main(result.uep_mps)),
                format!("hs=H0·((Uep/Uc)^n−1)={} m", fmt_main(result.hs_local_m)),
            ],
        ));

        let mut result_lines = vec![format!("hs (local)={} m", fmt_main(result.hs_local_m))];
        if !result.indicates_scour() {
            result_lines.push("Uep does not exceed Uc; no local scour develops.".to_string());
        }
        record.sections.push(RecordSection::new("3  Result", result_lines));

        record.with_intermediates(result.intermediate_values())
    }

    /// Build the record for an evaluated request item.
    ///
    /// Fails with `InvalidSelector` when the outcome kind does not match the
    /// item kind.
    pub fn from_outcome(project: &ProjectInfo, item: &CalculationItem, outcome: &CalculationOutcome) -> CalcResult<Self> {
        match (item, outcome) {
            (CalculationItem::GeneralScour(input), CalculationOutcome::GeneralScour(result)) => {
                Ok(Self::general_scour(project, input, result))
            }
            (CalculationItem::LocalScour(input), CalculationOutcome::LocalScour(result)) => {
                Ok(Self::local_scour(project, input, result))
            }
            _ => Err(CalcError::invalid_selector(
                "outcome",
                item.calc_type(),
                "an outcome of the same calculation type",
            )),
        }
    }

    /// Render the record for a terminal.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", "=".repeat(self.title.chars().count()));
        if !self.label.is_empty() {
            let _ = writeln!(out, "Item: {}", self.label);
        }
        let _ = writeln!(out, "Generated: {}", self.generated.format("%Y-%m-%d %H:%M:%S UTC"));
        let _ = writeln!(out, "{}", self.basis);

        for section in &self.sections {
            let _ = writeln!(out, "\n{}", section.heading);
            for line in &section.lines {
                let _ = writeln!(out, "{line}");
            }
        }

        let _ = writeln!(out, "\nAppendix  Intermediate Values");
        for (name, value) in &self.intermediate_values {
            let _ = writeln!(out, "    {name} = {value}");
        }
        out
    }
}
