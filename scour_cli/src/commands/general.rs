//! `scour general` - D.2.1 general scour at a spur dike.

use anyhow::Result;
use clap::Args;
use scour_core::calculations::general_scour::{calculate, GeneralScourInput, GeneralScourParams};
use scour_core::calculations::CalculationItem;
use scour_core::factors::PositionType;
use scour_core::pdf::render_record_pdf;
use scour_core::CalculationRecord;
use tracing::debug;

use super::{calculation_failed, print_json, print_record, write_pdf, ReportArgs};

#[derive(Args, Debug)]
pub struct GeneralArgs {
    /// Label for this calculation (e.g. "SD-1")
    #[arg(long, default_value = "")]
    pub label: String,

    /// Approach flow depth H0 [m]
    #[arg(long, allow_negative_numbers = true)]
    pub h0: f64,

    /// Median grain size d50 [m]
    #[arg(long, allow_negative_numbers = true)]
    pub d50: f64,

    /// Approach velocity U [m/s]
    #[arg(long, allow_negative_numbers = true)]
    pub u: f64,

    /// Effective spur-dike length L0 [m]
    #[arg(long, allow_negative_numbers = true)]
    pub l0: f64,

    /// Channel width B [m]
    #[arg(long, allow_negative_numbers = true)]
    pub b: f64,

    /// Dike-to-flow angle θ [deg], 0 < θ ≤ 90
    #[arg(long, allow_negative_numbers = true)]
    pub theta: f64,

    /// Dike-head side slope ratio m
    #[arg(long, allow_negative_numbers = true)]
    pub m: f64,

    /// Dike position: bend-concave (k1=1.34) or straight (k1=1.00)
    #[arg(long, default_value = "bend-concave")]
    pub position: String,

    /// Uc method: formula-a (cohesive), formula-b (gravel) or manual
    #[arg(long, default_value = "formula-a")]
    pub uc_method: String,

    /// Sediment unit weight γs [kN/m³]
    #[arg(long, allow_negative_numbers = true)]
    pub gamma_s: Option<f64>,

    /// Water unit weight γ [kN/m³]
    #[arg(long, allow_negative_numbers = true)]
    pub gamma_w: Option<f64>,

    /// Manual Uc [m/s]
    #[arg(long, allow_negative_numbers = true)]
    pub uc: Option<f64>,

    #[command(flatten)]
    pub report: ReportArgs,
}

impl GeneralArgs {
    fn to_input(&self) -> scour_core::CalcResult<GeneralScourInput> {
        let params = GeneralScourParams {
            label: self.label.clone(),
            h0_m: self.h0,
            d50_m: self.d50,
            u_mps: self.u,
            l0_m: self.l0,
            b_m: self.b,
            theta_deg: self.theta,
            m: self.m,
            position: self.position.parse::<PositionType>()?,
            uc_method: self.uc_method.parse()?,
            gamma_s_kn_m3: self.gamma_s,
            gamma_w_kn_m3: self.gamma_w,
            uc_manual_mps: self.uc,
        };
        GeneralScourInput::try_from(params)
    }
}

pub fn execute(args: GeneralArgs) -> Result<()> {
    const WHAT: &str = "General scour calculation";

    let input = args.to_input().map_err(|e| calculation_failed(e, WHAT))?;
    debug!("General scour input: {:?}", input);

    let result = calculate(&input).map_err(|e| calculation_failed(e, WHAT))?;
    let project = args.report.project();
    let record = CalculationRecord::general_scour(&project, &input, &result);

    if args.report.json {
        print_json(&result)?;
    } else {
        print_record(&record);
    }

    if let Some(path) = args.report.pdf.clone() {
        let equations = CalculationItem::GeneralScour(input).equations();
        let bytes = render_record_pdf(&project, &record, &equations).map_err(|e| calculation_failed(e, "PDF report"))?;
        write_pdf(path, &bytes)?;
    }
    Ok(())
}
