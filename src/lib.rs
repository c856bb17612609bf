//! Chartdeck - assemble slide decks from positioned markup and chart data
//!
//! A report is an ordered list of slide templates plus a chart directory that
//! maps `(template id, placeholder id)` to a chart spec. Each template is parsed
//! into static content and named placeholder regions; every declared chart is
//! drawn at exactly its placeholder's rectangle; the finished document is
//! written once, atomically.
//!
//! # Features
//!
//! - **Typed chart specs**: pie, bar/column and single- or dual-axis line
//!   charts, validated before any slide is produced
//! - **Exact placement**: a chart's bounding box always equals its placeholder's
//! - **Pluggable collaborators**: any [`template::TemplateParser`] and
//!   [`document::DocumentWriter`]; XHTML templates and `.pptx` output ship with
//!   the crate
//! - **All or nothing**: a failed run leaves no output file behind
//!
//! # Example
//!
//! ```no_run
//! use chartdeck::chart::{ChartKind, ChartSpec, Series};
//! use chartdeck::directory::ChartDirectory;
//! use chartdeck::document::PptxWriter;
//! use chartdeck::report::{ReportAssembler, ReportMetadata};
//! use chartdeck::template::{MarkupParser, TemplateRef};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metadata = ReportMetadata::new("Opinion analysis");
//! let templates = vec![
//!     TemplateRef::new("slides/slide1.html"),
//!     TemplateRef::new("slides/slide2.html"),
//! ];
//!
//! let mut directory = ChartDirectory::new();
//! directory.insert(
//!     "slide1.html",
//!     "donut-chart",
//!     ChartSpec::new(
//!         ChartKind::Pie,
//!         vec![Series::new("share", ["positive", "negative"], vec![60.0, 40.0])],
//!     ),
//! )?;
//!
//! let assembler = ReportAssembler::new(
//!     MarkupParser::with_layout(metadata.layout),
//!     PptxWriter::new(),
//!     metadata,
//! );
//! let summary = assembler.assemble(&templates, &directory, "report.pptx".as_ref())?;
//! println!("{} slides, {} charts", summary.slides, summary.charts);
//! # Ok(())
//! # }
//! ```

pub mod binder;
pub mod chart;
pub mod common;
pub mod config;
pub mod directory;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod placeholder;
pub mod report;
pub mod template;

pub use error::{ConfigError, Error, Result};
