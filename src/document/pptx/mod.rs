//! PowerPoint (`.pptx`) document writer.
//!
//! Charts are written as native DrawingML charts with literal data caches, so
//! they stay editable in PowerPoint without an embedded workbook.

mod chart;
mod constants;
mod package;
mod pres;
mod shape;
mod slide;
mod template;

pub use pres::PptxDocument;
pub use shape::ChartShape;
pub use slide::PptxSlide;

use crate::document::DocumentWriter;
use crate::document::error::Result;
use crate::document::model::{ChartOptions, ChartType, SeriesRecord, SlideContent, SlideHandle};
use crate::report::ReportMetadata;
use std::path::Path;

/// [`DocumentWriter`] producing Office Open XML presentations.
#[derive(Debug, Clone, Copy, Default)]
pub struct PptxWriter;

impl PptxWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize a document to the bytes of a `.pptx` file without touching the filesystem.
    pub fn to_bytes(&self, document: &PptxDocument) -> Result<Vec<u8>> {
        package::to_bytes(document)
    }
}

impl DocumentWriter for PptxWriter {
    type Document = PptxDocument;

    fn new_document(&self, metadata: &ReportMetadata) -> Result<PptxDocument> {
        log::debug!(
            "new presentation '{}' with layout {}",
            metadata.title,
            metadata.layout
        );
        Ok(PptxDocument::new(metadata.clone()))
    }

    fn add_slide(&self, document: &mut PptxDocument, content: SlideContent) -> Result<SlideHandle> {
        Ok(document.add_slide(content))
    }

    fn add_chart(
        &self,
        document: &mut PptxDocument,
        slide: SlideHandle,
        chart_type: ChartType,
        series: &[SeriesRecord],
        options: &ChartOptions,
    ) -> Result<()> {
        document.add_chart(slide, chart_type, series, options)
    }

    fn serialize(&self, document: &PptxDocument, path: &Path) -> Result<()> {
        let bytes = package::to_bytes(document)?;
        package::persist_atomically(&bytes, path)
    }
}
