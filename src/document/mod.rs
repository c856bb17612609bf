//! Document writer collaborator.
//!
//! The engine never touches a file format directly: it hands finished slides and
//! chart records to a [`DocumentWriter`]. [`PptxWriter`] is the bundled
//! implementation and produces an Office Open XML presentation.
//!
//! # Example
//!
//! ```rust,no_run
//! use chartdeck::document::{
//!     AxisGroup, ChartOptions, ChartType, DocumentWriter, PptxWriter, SeriesRecord, SlideContent,
//! };
//! use chartdeck::placeholder::Rect;
//! use chartdeck::report::ReportMetadata;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PptxWriter::new();
//! let mut doc = writer.new_document(&ReportMetadata::new("Quarterly"))?;
//! let slide = writer.add_slide(&mut doc, SlideContent::default())?;
//!
//! let series = [SeriesRecord {
//!     name: "2024".into(),
//!     labels: vec!["Q1".into(), "Q2".into()],
//!     values: vec![100.0, 150.0],
//!     axis: AxisGroup::Primary,
//!     color: Some("4472C4".into()),
//! }];
//! let options = ChartOptions::at(Rect::new(1.0, 1.0, 5.0, 3.0));
//! writer.add_chart(&mut doc, slide, ChartType::Column, &series, &options)?;
//! writer.serialize(&doc, "quarterly.pptx".as_ref())?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod layout;
pub mod model;
pub mod pptx;

pub use error::WriterError;
pub use layout::SlideLayout;
pub use model::{
    AxisGroup, ChartOptions, ChartType, SeriesRecord, SlideContent, SlideHandle, TextBlock,
    ValueAxisOptions,
};
pub use pptx::{PptxDocument, PptxWriter};

use crate::report::ReportMetadata;
use std::path::Path;

/// Builds and serializes one output document.
///
/// Calls are blocking and have no partial-result semantics. A document is owned
/// by exactly one caller and is never mutated concurrently.
pub trait DocumentWriter {
    /// In-progress document handle.
    type Document;

    /// Create an empty document with the given metadata and slide size.
    fn new_document(&self, metadata: &ReportMetadata) -> error::Result<Self::Document>;

    /// Append a slide and return its handle. Slides keep insertion order.
    fn add_slide(
        &self,
        document: &mut Self::Document,
        content: SlideContent,
    ) -> error::Result<SlideHandle>;

    /// Add a chart to an existing slide.
    fn add_chart(
        &self,
        document: &mut Self::Document,
        slide: SlideHandle,
        chart_type: ChartType,
        series: &[SeriesRecord],
        options: &ChartOptions,
    ) -> error::Result<()>;

    /// Write the finished document to `path`.
    ///
    /// Either the complete file is written or nothing is left at `path`.
    fn serialize(&self, document: &Self::Document, path: &Path) -> error::Result<()>;
}
