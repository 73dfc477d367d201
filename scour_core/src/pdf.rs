//! # PDF Generation Module
//!
//! Renders calculation records to PDF using Typst.
//!
//! ## Architecture
//!
//! - The page template is an embedded string constant
//! - User and record text enter the source as Typst string literals, never as markup
//! - Fonts come from `typst-assets`; the world has no file access
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use scour_core::calculations::local_scour::{calculate, LocalScourInput};
//! use scour_core::calculations::CalculationItem;
//! use scour_core::pdf::render_record_pdf;
//! use scour_core::project::ProjectInfo;
//! use scour_core::report::CalculationRecord;
//!
//! let input = LocalScourInput {
//!     label: "RV-1".to_string(),
//!     h0_m: 5.0,
//!     u_mps: 2.0,
//!     uc_mps: 1.0,
//!     alpha_deg: 15.0,
//!     n: 2.0,
//! };
//! let result = calculate(&input).unwrap();
//! let project = ProjectInfo::new("Reach 4", "A. Chen", "26-017");
//! let record = CalculationRecord::local_scour(&project, &input, &result);
//! let equations = CalculationItem::LocalScour(input).equations();
//!
//! let pdf_bytes = render_record_pdf(&project, &record, &equations).unwrap();
//! std::fs::write("rv-1.pdf", pdf_bytes).unwrap();
//! ```

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::equations::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::project::{CalculationRequest, ProjectInfo};
use crate::report::{format_value, CalculationRecord, MAIN_DIGITS};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Bundled fonts, parsed once per process
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    typst_assets::fonts()
        .flat_map(|data| Font::iter(Bytes::new(data)))
        .collect()
});

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = FONTS.clone();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), u8::try_from(now.month()).ok()?, u8::try_from(now.day()).ok()?)
    }
}

// ============================================================================
// Typst Source Building
// ============================================================================

/// Quote text as a Typst string literal.
///
/// Embedded in markup as `#"..."`, the text is displayed verbatim: `*`, `_`,
/// `$` and `#` carry no meaning inside it.
pub(crate) fn typst_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Page setup shared by every report
const PREAMBLE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2.5cm, bottom: 2.5cm, left: 2.5cm, right: 2.5cm),
  header: align(right)[
    #text(size: 9pt, fill: gray)[Scour Depth Calculations]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Job: #{{JOB_ID}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 11pt)
#set par(justify: false)
"##;

const DISCLAIMER: &str = r##"
#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)
#text(size: 9pt, fill: gray)[
  Generated by Scour Calc \
  Results should be checked by a qualified hydraulic engineer.
]
"##;

fn preamble(project: &ProjectInfo, date: &str) -> String {
    PREAMBLE
        .replace("{{JOB_ID}}", &typst_string(&project.job_id))
        .replace("{{DATE}}", date)
}

fn project_table(project: &ProjectInfo, date: &str) -> String {
    format!(
        r##"
#table(
  columns: (auto, 1fr),
  stroke: none,
  row-gutter: 4pt,
  [Project:], [#{name}],
  [Engineer:], [#{engineer}],
  [Job ID:], [#{job_id}],
  [Date:], [{date}],
)
"##,
        name = typst_string(&project.name),
        engineer = typst_string(&project.engineer),
        job_id = typst_string(&project.job_id),
    )
}

/// Typst markup for one calculation record
fn record_markup(record: &CalculationRecord) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        r##"
#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 16pt, weight: "bold")[#{title}]
"##,
        title = typst_string(&record.title)
    ));
    if !record.label.is_empty() {
        out.push_str(&format!("    #v(4pt)\n    #text(size: 13pt)[#{}]\n", typst_string(&record.label)));
    }
    out.push_str("  ]\n]\n\n#v(8pt)\n\n");
    out.push_str(&format!(
        "#text(size: 9pt, fill: gray)[Generated #{}]\n\n",
        typst_string(&record.generated.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    ));
    out.push_str(&format!("#{}\n\n", typst_string(&record.basis)));

    for section in &record.sections {
        out.push_str(&format!("== #{}\n\n", typst_string(&section.heading)));
        for line in &section.lines {
            out.push_str(&format!("#{}\n\n", typst_string(line)));
        }
    }

    out.push_str("== Appendix: Intermediate Values\n\n");
    out.push_str(
        "#table(\n  columns: (auto, 1fr),\n  inset: 6pt,\n  stroke: 0.5pt,\n  align: (left, right),\n  table.header([*Quantity*], [*Value*]),\n",
    );
    for (name, value) in &record.intermediate_values {
        out.push_str(&format!("  [#{}], [#{}],\n", typst_string(name), typst_string(value)));
    }
    out.push_str(")\n");
    out
}

/// Compile Typst source and render it to PDF bytes.
fn compile_pdf(source: String) -> CalcResult<Vec<u8>> {
    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::report_error("compile", error_msgs.join("; "))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::report_error("render", error_msgs.join("; "))
    })?;

    log::debug!("rendered PDF report ({} bytes)", pdf_bytes.len());
    Ok(pdf_bytes)
}

// ============================================================================
// PDF Rendering Functions
// ============================================================================

/// Render one calculation record to PDF, followed by the list of the
/// equations it applied.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::ReportError)` - If compilation or rendering fails
pub fn render_record_pdf(project: &ProjectInfo, record: &CalculationRecord, equations: &[Equation]) -> CalcResult<Vec<u8>> {
    let date = Utc::now().format("%Y-%m-%d").to_string();

    let mut source = preamble(project, &date);
    source.push_str(&record_markup(record));
    source.push_str("\n#v(12pt)\n*Project Information*\n#v(4pt)\n");
    source.push_str(&project_table(project, &date));
    source.push_str(DISCLAIMER);

    let tracker = equation_usage(&record.title, &record.label, equations);
    source.push_str(&tracker.generate_appendix_typst());

    compile_pdf(source)
}

/// Equation usage of one calculation. A blank label records the usage
/// without a member.
fn equation_usage(context: &str, label: &str, equations: &[Equation]) -> EquationTracker {
    let mut tracker = EquationTracker::new();
    for &equation in equations {
        if label.is_empty() {
            tracker.record(equation, context);
        } else {
            tracker.record_for_member(equation, context, label);
        }
    }
    tracker
}

/// Evaluate every item of a request and render the successful ones to a
/// single PDF: a summary page, one page per record, and the equations
/// appendix.
///
/// Failed items are listed on the summary page with their error.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::ReportError)` - If no item succeeds, or rendering fails
pub fn render_request_pdf(request: &CalculationRequest) -> CalcResult<Vec<u8>> {
    let project = &request.project;
    let date = Utc::now().format("%Y-%m-%d").to_string();

    let mut summary_rows = Vec::new();
    let mut pages = Vec::new();
    let mut tracker = EquationTracker::new();

    for (i, evaluated) in request.evaluate().iter().enumerate() {
        let item = &evaluated.item;
        let label = if item.label().is_empty() {
            format!("Item {}", i + 1)
        } else {
            item.label().to_string()
        };

        match &evaluated.outcome {
            Ok(outcome) => {
                let record = CalculationRecord::from_outcome(project, item, outcome)?;
                pages.push(record_markup(&record));
                tracker.merge(equation_usage(item.calc_type(), &label, &item.equations()));
                summary_rows.push(format!(
                    "  [{}], [#{}], [#{}], [#{}], [OK],",
                    i + 1,
                    typst_string(&label),
                    typst_string(item.calc_type()),
                    typst_string(&format_value(outcome.depth_m(), MAIN_DIGITS)),
                ));
            }
            Err(err) => {
                log::debug!("{label}: not included in report: {err}");
                summary_rows.push(format!(
                    "  [{}], [#{}], [#{}], [-], [#{}],",
                    i + 1,
                    typst_string(&label),
                    typst_string(item.calc_type()),
                    typst_string(&err.to_string()),
                ));
            }
        }
    }

    if pages.is_empty() {
        return Err(CalcError::report_error(
            "assemble",
            "No calculation in the request produced a result",
        ));
    }

    let mut source = preamble(project, &date);
    source.push_str(&format!(
        r##"
#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 20pt, radius: 4pt)[
    #text(size: 22pt, weight: "bold")[Scour Depth Calculation Package]
    #v(8pt)
    #text(size: 14pt)[#{name}]
  ]
]

#v(16pt)
"##,
        name = typst_string(&project.name)
    ));
    source.push_str(&project_table(project, &date));
    source.push_str(
        "\n#v(16pt)\n\n== Calculation Summary\n\n#table(\n  columns: (auto, 1fr, auto, auto, 1fr),\n  inset: 6pt,\n  stroke: 0.5pt,\n  align: (left, left, left, right, left),\n  table.header([*No.*], [*Item*], [*Type*], [*hs (m)*], [*Status*]),\n",
    );
    source.push_str(&summary_rows.join("\n"));
    source.push_str("\n)\n");
    source.push_str(DISCLAIMER);

    for page in &pages {
        source.push_str("\n#pagebreak()\n");
        source.push_str(page);
    }
    source.push_str(&tracker.generate_appendix_typst());

    compile_pdf(source)
}
