//! Subcommands and the report options they share.

pub mod general;
pub mod local;
pub mod run;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scour_core::{CalcError, CalculationRecord, ProjectInfo};
use serde::Serialize;
use tracing::info;

/// Project and output options
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Project name shown in record titles
    #[arg(long)]
    pub project_name: Option<String>,

    /// Responsible engineer
    #[arg(long)]
    pub engineer: Option<String>,

    /// Job/project number
    #[arg(long)]
    pub job_id: Option<String>,

    /// Print results as JSON instead of the text record
    #[arg(long)]
    pub json: bool,

    /// Write a PDF report to this path (".pdf" appended when missing)
    #[arg(long)]
    pub pdf: Option<PathBuf>,
}

impl ReportArgs {
    /// Project info from the flags, layered over `base`
    pub fn project_over(&self, base: ProjectInfo) -> ProjectInfo {
        ProjectInfo {
            name: self.project_name.clone().unwrap_or(base.name),
            engineer: self.engineer.clone().unwrap_or(base.engineer),
            job_id: self.job_id.clone().unwrap_or(base.job_id),
        }
    }

    pub fn project(&self) -> ProjectInfo {
        self.project_over(ProjectInfo::default())
    }
}

/// Append ".pdf" unless the path already ends with it (any case)
pub fn ensure_pdf_suffix(path: PathBuf) -> PathBuf {
    let has_suffix = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if has_suffix {
        path
    } else {
        let mut raw = path.into_os_string();
        raw.push(".pdf");
        PathBuf::from(raw)
    }
}

pub fn write_pdf(path: PathBuf, bytes: &[u8]) -> Result<PathBuf> {
    let path = ensure_pdf_suffix(path);
    fs::write(&path, bytes).with_context(|| format!("failed to write report to {}", path.display()))?;
    info!("Report written to {}", path.display());
    Ok(path)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_record(record: &CalculationRecord) {
    println!("{}", record.to_plain_text());
}

/// Print the structured error to stderr and wrap it for the exit path
pub fn calculation_failed(err: CalcError, what: &str) -> anyhow::Error {
    if let Ok(json) = serde_json::to_string_pretty(&err) {
        eprintln!("{json}");
    }
    anyhow::Error::new(err).context(format!("{what} failed"))
}
