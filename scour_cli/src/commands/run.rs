//! `scour run` - evaluate every item of a JSON calculation request.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use scour_core::pdf::render_request_pdf;
use scour_core::{CalculationRecord, CalculationRequest};
use tracing::{info, warn};

use super::{calculation_failed, print_json, print_record, write_pdf, ReportArgs};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Request file (JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub report: ReportArgs,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read request {}", args.input.display()))?;
    let mut request = CalculationRequest::from_json(&json).map_err(|e| calculation_failed(e, "Reading request"))?;
    request.project = args.report.project_over(request.project);

    info!("Evaluating {} calculation(s) from {}", request.items.len(), args.input.display());
    let evaluated = request.evaluate();

    let mut failed = 0usize;
    for (i, entry) in evaluated.iter().enumerate() {
        if let Err(err) = &entry.outcome {
            failed += 1;
            warn!("Item {} ({}) failed: {}", i + 1, entry.item.label(), err);
        }
    }

    if args.report.json {
        print_json(&evaluated)?;
    } else {
        for entry in &evaluated {
            match &entry.outcome {
                Ok(outcome) => {
                    let record = CalculationRecord::from_outcome(&request.project, &entry.item, outcome)
                        .map_err(|e| calculation_failed(e, "Building record"))?;
                    print_record(&record);
                }
                Err(err) => {
                    println!("{} [{}]: {}\n", entry.item.calc_type(), entry.item.label(), err);
                }
            }
        }
    }

    if let Some(path) = args.report.pdf.clone() {
        let bytes = render_request_pdf(&request).map_err(|e| calculation_failed(e, "PDF report"))?;
        write_pdf(path, &bytes)?;
    }

    if failed > 0 {
        bail!("{failed} of {} calculation(s) failed", evaluated.len());
    }
    Ok(())
}
