//! `scour local` - D.2.2 local scour at a revetment.

use anyhow::Result;
use clap::Args;
use scour_core::calculations::local_scour::{calculate, LocalScourInput};
use scour_core::calculations::CalculationItem;
use scour_core::pdf::render_record_pdf;
use scour_core::CalculationRecord;
use tracing::{debug, info};

use super::{calculation_failed, print_json, print_record, write_pdf, ReportArgs};

#[derive(Args, Debug)]
pub struct LocalArgs {
    /// Label for this calculation (e.g. "RV-1")
    #[arg(long, default_value = "")]
    pub label: String,

    /// Flow depth at the revetment H0 [m]
    #[arg(long, allow_negative_numbers = true)]
    pub h0: f64,

    /// Approach velocity U [m/s]
    #[arg(long, allow_negative_numbers = true)]
    pub u: f64,

    /// Incipient-motion velocity Uc [m/s]
    #[arg(long, allow_negative_numbers = true)]
    pub uc: f64,

    /// Revetment-to-flow angle α [deg]
    #[arg(long, allow_negative_numbers = true)]
    pub alpha: f64,

    /// Exponent n
    #[arg(long, allow_negative_numbers = true)]
    pub n: f64,

    #[command(flatten)]
    pub report: ReportArgs,
}

impl LocalArgs {
    pub(crate) fn to_input(&self) -> LocalScourInput {
        LocalScourInput {
            label: self.label.clone(),
            h0_m: self.h0,
            u_mps: self.u,
            uc_mps: self.uc,
            alpha_deg: self.alpha,
            n: self.n,
        }
    }
}

pub fn execute(args: LocalArgs) -> Result<()> {
    let input = args.to_input();
    debug!("Local scour input: {:?}", input);

    let result = calculate(&input).map_err(|e| calculation_failed(e, "Local scour calculation"))?;
    if !result.indicates_scour() {
        info!("Uep does not exceed Uc; computed depth is not positive");
    }

    let project = args.report.project();
    let record = CalculationRecord::local_scour(&project, &input, &result);

    if args.report.json {
        print_json(&result)?;
    } else {
        print_record(&record);
    }

    if let Some(path) = args.report.pdf.clone() {
        let equations = CalculationItem::LocalScour(input).equations();
        let bytes = render_record_pdf(&project, &record, &equations).map_err(|e| calculation_failed(e, "PDF report"))?;
        write_pdf(path, &bytes)?;
    }
    Ok(())
}
