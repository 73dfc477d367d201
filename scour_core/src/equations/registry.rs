//! # Equation Registry
//!
//! Central registry of every formula used by the scour calculations. Each
//! equation carries metadata (clause reference, formulas, variables) so the
//! PDF appendix and EQUATIONS.md can be generated from one source.
//!
//! ## Usage
//!
//! ```rust
//! use scour_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record_for_member(Equation::GeneralScourDepth, "Depth ratio", "SD-1");
//!
//! let meta = Equation::GeneralScourDepth.metadata();
//! assert!(meta.formula_plain.contains("2.80"));
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::calculations::general_scour::CriticalVelocityMethod;
use crate::pdf::typst_string;

// ============================================================================
// Code References
// ============================================================================

/// Where in the design code an equation comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// A whole clause of Appendix D (e.g. "D.2.1")
    Clause { clause: &'static str },
    /// A numbered formula inside a clause (e.g. "D.2.1-5")
    Formula { number: &'static str },
    /// A lookup table (e.g. "Table D.2.2")
    Table { table: &'static str },
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Clause { clause } => format!("Appendix D, clause {}", clause),
            CodeReference::Formula { number } => format!("Appendix D, formula ({})", number),
            CodeReference::Table { table } => format!("Appendix D, {}", table),
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the appendix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Dimensionless coefficients (k1, k2, k3, η)
    Coefficients,
    /// Flow and incipient-motion velocities
    Velocities,
    /// Final scour depth expressions
    ScourDepth,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Coefficients => "Coefficients",
            EquationCategory::Velocities => "Velocities",
            EquationCategory::ScourDepth => "Scour Depth",
        }
    }

    /// Sort order for the appendix (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Coefficients => 1,
            EquationCategory::Velocities => 2,
            EquationCategory::ScourDepth => 3,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
///
/// `symbol` is written in Typst math syntax.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one formula.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in Typst math notation for PDF rendering
    pub formula_typst: &'static str,
    /// The formula in plain text for markdown
    pub formula_plain: &'static str,
    /// Clause reference
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping in appendix
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All formulas used by the scour calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Coefficients
    // -------------------------------------------------------------------------
    /// k1 from the dike position
    PositionFactor,
    /// k2 = (θ/90)^0.26
    AngleFactor,
    /// k3 = e^(-0.07m)
    SlopeFactor,
    /// η from Table D.2.2
    RevetmentAngleFactor,

    // -------------------------------------------------------------------------
    // Velocities
    // -------------------------------------------------------------------------
    /// Um = (1 + 4.8 L0/B) U
    DeflectedVelocity,
    /// Uc, formula D.2.1-5
    CriticalVelocityCohesive,
    /// Uc, formula D.2.1-6
    CriticalVelocityGravel,
    /// v = (Um - Uc)/sqrt(g d50)
    VelocityTerm,
    /// Uep = U 2η/(1+η)
    EdgeVelocity,

    // -------------------------------------------------------------------------
    // Scour depth
    // -------------------------------------------------------------------------
    /// D.2.1 general scour at spur dikes
    GeneralScourDepth,
    /// D.2.2 local scour at revetments
    LocalScourDepth,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::PositionFactor => EquationMetadata {
                name: "Position Coefficient",
                description: "Coefficient k1 for the position of a single spur dike in the reach",
                formula_typst: r#"$k_1 = 1.34$ (concave bank of bend), $k_1 = 1.00$ (transition or straight reach)"#,
                formula_plain: "k1 = 1.34 (concave bank of bend), k1 = 1.00 (transition/straight reach)",
                reference: CodeReference::Clause { clause: "D.2.1" },
                variables: vec![Variable::new("k_1", "Position coefficient", "-")],
                assumptions: vec!["Single, non-submerged spur dike"],
                category: EquationCategory::Coefficients,
                source_module: "factors.rs",
                source_function: "PositionType::factor",
            },

            Equation::AngleFactor => EquationMetadata {
                name: "Angle Coefficient",
                description: "Coefficient k2 for the angle between the dike axis and the flow",
                formula_typst: r#"$k_2 = (theta / 90)^(0.26)$"#,
                formula_plain: "k2 = (theta/90)^0.26",
                reference: CodeReference::Clause { clause: "D.2.1" },
                variables: vec![
                    Variable::new("k_2", "Angle coefficient", "-"),
                    Variable::new("theta", "Dike-to-flow angle", "deg"),
                ],
                assumptions: vec!["0 < theta <= 90 degrees"],
                category: EquationCategory::Coefficients,
                source_module: "factors.rs",
                source_function: "angle_factor",
            },

            Equation::SlopeFactor => EquationMetadata {
                name: "Slope Coefficient",
                description: "Coefficient k3 for the side slope of the dike head",
                formula_typst: r#"$k_3 = e^(-0.07 m)$"#,
                formula_plain: "k3 = exp(-0.07 m)",
                reference: CodeReference::Clause { clause: "D.2.1" },
                variables: vec![
                    Variable::new("k_3", "Slope coefficient", "-"),
                    Variable::new("m", "Dike-head side slope ratio", "-"),
                ],
                assumptions: vec!["m > 0"],
                category: EquationCategory::Coefficients,
                source_module: "factors.rs",
                source_function: "slope_factor",
            },

            Equation::RevetmentAngleFactor => EquationMetadata {
                name: "Revetment Angle Factor",
                description: "Factor eta from the angle between revetment face and flow, interpolated linearly between tabulated angles",
                formula_typst: r#"$eta = 1.00$ at $alpha <= 15°$, rising by 0.25 per 10 degrees to $eta = 3.00$ at $alpha >= 90°$"#,
                formula_plain: "eta = 1.00 (alpha <= 15), 1.25 (20), 1.50 (30), ... 2.75 (80), 3.00 (alpha >= 90); linear between",
                reference: CodeReference::Table { table: "Table D.2.2" },
                variables: vec![
                    Variable::new("eta", "Angle factor", "-"),
                    Variable::new("alpha", "Angle between revetment face and flow", "deg"),
                ],
                assumptions: vec!["Absolute value of alpha is used", "Clamped outside 15 to 90 degrees"],
                category: EquationCategory::Coefficients,
                source_module: "factors.rs",
                source_function: "eta_from_angle",
            },

            Equation::DeflectedVelocity => EquationMetadata {
                name: "Concentrated Velocity at Dike Head",
                description: "Flow velocity accelerated by the width the dike blocks",
                formula_typst: r#"$U_m = (1 + 4.8 L_0 / B) U$"#,
                formula_plain: "Um = (1 + 4.8 L0/B) U",
                reference: CodeReference::Clause { clause: "D.2.1" },
                variables: vec![
                    Variable::new("U_m", "Concentrated velocity at the dike head", "m/s"),
                    Variable::new("U", "Approach velocity", "m/s"),
                    Variable::new("L_0", "Effective dike length", "m"),
                    Variable::new("B", "Channel width", "m"),
                ],
                assumptions: vec!["U, L0, B > 0"],
                category: EquationCategory::Velocities,
                source_module: "equations/velocity.rs",
                source_function: "deflected_velocity",
            },

            Equation::CriticalVelocityCohesive => EquationMetadata {
                name: "Incipient Velocity, Cohesive Sediment",
                description: "Incipient-motion velocity of cohesive or fine bed sediment",
                formula_typst: r#"$U_c = (H_0 / d_50)^(0.14) sqrt(17.6 (gamma_s - gamma) / gamma d_50 + 6.05 times 10^(-7) (10 + H_0) / d_50^(1.72))$"#,
                formula_plain: "Uc = (H0/d50)^0.14 * sqrt(17.6 (gs - g)/g d50 + 6.05e-7 (10 + H0)/d50^1.72)",
                reference: CodeReference::Formula { number: "D.2.1-5" },
                variables: vec![
                    Variable::new("U_c", "Incipient velocity", "m/s"),
                    Variable::new("H_0", "Approach flow depth", "m"),
                    Variable::new("d_50", "Median grain size", "m"),
                    Variable::new("gamma_s", "Sediment unit weight", "kN/m3"),
                    Variable::new("gamma", "Water unit weight", "kN/m3"),
                ],
                assumptions: vec!["Radicand floored at zero", "gamma_s > gamma"],
                category: EquationCategory::Velocities,
                source_module: "equations/velocity.rs",
                source_function: "critical_velocity_cohesive",
            },

            Equation::CriticalVelocityGravel => EquationMetadata {
                name: "Incipient Velocity, Gravel",
                description: "Incipient-motion velocity of gravel and cobble beds",
                formula_typst: r#"$U_c = 1.08 sqrt(g d_50 (gamma_s - gamma) / gamma) (H_0 / d_50)^(1/6)$"#,
                formula_plain: "Uc = 1.08 sqrt(g d50 (gs - g)/g) (H0/d50)^(1/6)",
                reference: CodeReference::Formula { number: "D.2.1-6" },
                variables: vec![
                    Variable::new("U_c", "Incipient velocity", "m/s"),
                    Variable::new("g", "Gravitational acceleration, 9.81", "m/s2"),
                    Variable::new("d_50", "Median grain size", "m"),
                    Variable::new("gamma_s", "Sediment unit weight", "kN/m3"),
                    Variable::new("gamma", "Water unit weight", "kN/m3"),
                ],
                assumptions: vec!["gamma_s > gamma"],
                category: EquationCategory::Velocities,
                source_module: "equations/velocity.rs",
                source_function: "critical_velocity_gravel",
            },

            Equation::VelocityTerm => EquationMetadata {
                name: "Dimensionless Excess Velocity",
                description: "Excess of the concentrated velocity over the incipient velocity, scaled by grain size",
                formula_typst: r#"$v = (U_m - U_c) / sqrt(g d_50)$"#,
                formula_plain: "v = (Um - Uc)/sqrt(g d50)",
                reference: CodeReference::Clause { clause: "D.2.1" },
                variables: vec![
                    Variable::new("v", "Velocity term", "-"),
                    Variable::new("U_m", "Concentrated velocity", "m/s"),
                    Variable::new("U_c", "Incipient velocity", "m/s"),
                ],
                assumptions: vec!["Um > Uc, otherwise no scour is produced"],
                category: EquationCategory::Velocities,
                source_module: "equations/velocity.rs",
                source_function: "velocity_term",
            },

            Equation::EdgeVelocity => EquationMetadata {
                name: "Deflected Velocity at Revetment",
                description: "Velocity deflected along the revetment face",
                formula_typst: r#"$U_"ep" = U (2 eta) / (1 + eta)$"#,
                formula_plain: "Uep = U * 2 eta/(1 + eta)",
                reference: CodeReference::Clause { clause: "D.2.2" },
                variables: vec![
                    Variable::new("U_\"ep\"", "Deflected velocity at the revetment", "m/s"),
                    Variable::new("U", "Approach velocity", "m/s"),
                    Variable::new("eta", "Angle factor", "-"),
                ],
                assumptions: vec![],
                category: EquationCategory::Velocities,
                source_module: "equations/velocity.rs",
                source_function: "edge_velocity",
            },

            Equation::GeneralScourDepth => EquationMetadata {
                name: "General Scour at Spur Dike",
                description: "Depth of general scour at a non-submerged spur dike",
                formula_typst: r#"$h_s / H_0 = 2.80 k_1 k_2 k_3 ((U_m - U_c) / sqrt(g d_50))^(0.75) (L_0 / H_0)^(0.08)$"#,
                formula_plain: "hs/H0 = 2.80 k1 k2 k3 ((Um - Uc)/sqrt(g d50))^0.75 (L0/H0)^0.08",
                reference: CodeReference::Clause { clause: "D.2.1" },
                variables: vec![
                    Variable::new("h_s", "Scour depth", "m"),
                    Variable::new("H_0", "Approach flow depth", "m"),
                    Variable::new("L_0", "Effective dike length", "m"),
                ],
                assumptions: vec!["Velocity exponent fixed at 0.75", "Um > Uc"],
                category: EquationCategory::ScourDepth,
                source_module: "equations/depth.rs",
                source_function: "general_scour_ratio",
            },

            Equation::LocalScourDepth => EquationMetadata {
                name: "Local Scour at Revetment",
                description: "Depth of local scour at a sloped or smooth revetment",
                formula_typst: r#"$h_s = H_0 ((U_"ep" / U_c)^n - 1)$"#,
                formula_plain: "hs = H0 ((Uep/Uc)^n - 1)",
                reference: CodeReference::Clause { clause: "D.2.2" },
                variables: vec![
                    Variable::new("h_s", "Local scour depth", "m"),
                    Variable::new("H_0", "Flow depth at the revetment toe", "m"),
                    Variable::new("U_c", "Incipient velocity", "m/s"),
                    Variable::new("n", "Empirical exponent", "-"),
                ],
                assumptions: vec!["A negative result means the bed is not eroded"],
                category: EquationCategory::ScourDepth,
                source_module: "equations/depth.rs",
                source_function: "local_scour_depth",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// All categories in appendix order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![Coefficients, Velocities, ScourDepth];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::PositionFactor,
    Equation::AngleFactor,
    Equation::SlopeFactor,
    Equation::RevetmentAngleFactor,
    Equation::DeflectedVelocity,
    Equation::CriticalVelocityCohesive,
    Equation::CriticalVelocityGravel,
    Equation::VelocityTerm,
    Equation::EdgeVelocity,
    Equation::GeneralScourDepth,
    Equation::LocalScourDepth,
];

/// Equations applied by a D.2.1 calculation with the given Uc method.
pub fn general_scour_equations(method: CriticalVelocityMethod) -> Vec<Equation> {
    let mut equations = vec![
        Equation::PositionFactor,
        Equation::AngleFactor,
        Equation::SlopeFactor,
        Equation::DeflectedVelocity,
    ];
    match method {
        CriticalVelocityMethod::Cohesive => equations.push(Equation::CriticalVelocityCohesive),
        CriticalVelocityMethod::Gravel => equations.push(Equation::CriticalVelocityGravel),
        CriticalVelocityMethod::Manual => {}
    }
    equations.push(Equation::VelocityTerm);
    equations.push(Equation::GeneralScourDepth);
    equations
}

/// Equations applied by a D.2.2 calculation.
pub fn local_scour_equations() -> Vec<Equation> {
    vec![
        Equation::RevetmentAngleFactor,
        Equation::EdgeVelocity,
        Equation::LocalScourDepth,
    ]
}

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Context describing where/why it was used
    pub context: String,
    /// Label of the calculation item it was applied to
    pub member_label: Option<String>,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            member_label: None,
        }
    }

    pub fn for_member(equation: Equation, context: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            member_label: Some(label.into()),
        }
    }
}

/// Collector for equation usage across one report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Record equation usage for a specific calculation item
    pub fn record_for_member(&mut self, equation: Equation, context: impl Into<String>, label: impl Into<String>) {
        self.usages.push(EquationUsage::for_member(equation, context, label));
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group usages by equation
    pub fn by_equation(&self) -> HashMap<Equation, Vec<&EquationUsage>> {
        let mut map: HashMap<Equation, Vec<&EquationUsage>> = HashMap::new();
        for usage in &self.usages {
            map.entry(usage.equation).or_default().push(usage);
        }
        map
    }

    /// Group unique equations by category, in appendix order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Merge another tracker into this one
    pub fn merge(&mut self, other: EquationTracker) {
        self.usages.extend(other.usages);
    }
}

// ============================================================================
// Typst Appendix Generation
// ============================================================================

impl EquationTracker {
    /// Generate Typst markup for the "List of Equations" appendix.
    ///
    /// ```rust
    /// use scour_core::equations::registry::{Equation, EquationTracker};
    ///
    /// let mut tracker = EquationTracker::new();
    /// tracker.record_for_member(Equation::LocalScourDepth, "Local scour", "RV-1");
    ///
    /// let typst = tracker.generate_appendix_typst();
    /// assert!(typst.contains("Local Scour at Revetment"));
    /// ```
    pub fn generate_appendix_typst(&self) -> String {
        let mut output = String::new();

        output.push_str(r##"
#pagebreak()

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Appendix: List of Equations]
  ]
]

#v(12pt)

#text(size: 10pt)[
  This appendix lists the formulas applied in this calculation record,
  with their clause references and the items they were applied to.
]

#v(16pt)
"##);

        let by_category = self.by_category();
        if by_category.is_empty() {
            output.push_str("#text(style: \"italic\")[No equations recorded for this report.]\n");
            return output;
        }

        let usage_by_eq = self.by_equation();

        for (category, equations) in by_category {
            output.push_str(&format!("\n== {}\n\n", category.display_name()));

            for equation in equations {
                let meta = equation.metadata();

                output.push_str(&format!("=== {}\n\n", meta.name));
                output.push_str(&format!("#text(size: 10pt)[#{}]\n\n", typst_string(meta.description)));
                output.push_str(&format!("*Formula:* {}\n\n", meta.formula_typst));
                output.push_str(&format!("*Reference:* #{}\n\n", typst_string(&meta.reference.citation())));

                if !meta.variables.is_empty() {
                    output.push_str("*Variables:*\n");
                    output.push_str("#table(\n");
                    output.push_str("  columns: (auto, 1fr, auto),\n");
                    output.push_str("  inset: 6pt,\n");
                    output.push_str("  stroke: 0.5pt,\n");
                    output.push_str("  align: (left, left, left),\n");
                    output.push_str("  table.header([*Symbol*], [*Description*], [*Units*]),\n");
                    for var in &meta.variables {
                        output.push_str(&format!(
                            "  [${}$], [#{}], [#{}],\n",
                            var.symbol,
                            typst_string(var.description),
                            typst_string(var.units)
                        ));
                    }
                    output.push_str(")\n\n");
                }

                if let Some(usages) = usage_by_eq.get(&equation) {
                    let mut labels: Vec<&str> = usages
                        .iter()
                        .filter_map(|u| u.member_label.as_deref())
                        .collect();
                    labels.sort();
                    labels.dedup();

                    if !labels.is_empty() {
                        output.push_str(&format!("*Applied to:* #{}\n\n", typst_string(&labels.join(", "))));
                    }
                }

                if !meta.assumptions.is_empty() {
                    output.push_str("*Assumptions:*\n");
                    for assumption in &meta.assumptions {
                        output.push_str(&format!("- #{}\n", typst_string(assumption)));
                    }
                    output.push('\n');
                }

                output.push_str("#v(8pt)\n");
                output.push_str("#line(length: 100%, stroke: 0.25pt + gray)\n");
                output.push_str("#v(8pt)\n\n");
            }
        }

        output
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md listing every registered formula.
///
/// ```rust
/// use scour_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Scour Equations Reference"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(12_000);

    output.push_str(r#"# Scour Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used by the scour depth calculations,
with its clause reference, source location and assumptions.

## Units

| Quantity | Unit |
|----------|------|
| Depths, lengths, grain size | m |
| Velocities | m/s |
| Unit weights | kN/m3 |
| Angles | degrees |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol.replace('"', ""),
                        var.description,
                        var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}
