/// In-memory presentation built by [`super::PptxWriter`].
use crate::document::error::{Result, WriterError};
use crate::document::layout::SlideLayout;
use crate::document::model::{
    AxisGroup, ChartOptions, ChartType, SeriesRecord, SlideContent, SlideHandle,
};
use crate::report::ReportMetadata;
use std::fmt::Write as FmtWrite;

use super::shape::{ChartShape, ShapeKind};
use super::slide::PptxSlide;

/// A presentation under construction.
///
/// Slides keep insertion order; charts are numbered package-wide in the order
/// they are added.
#[derive(Debug)]
pub struct PptxDocument {
    /// Slides in the presentation
    pub(crate) slides: Vec<PptxSlide>,
    /// Title, layout and authorship
    pub(crate) metadata: ReportMetadata,
    /// Number of charts added so far
    pub(crate) chart_count: usize,
}

impl PptxDocument {
    pub(crate) fn new(metadata: ReportMetadata) -> Self {
        Self {
            slides: Vec::new(),
            metadata,
            chart_count: 0,
        }
    }

    /// Document metadata.
    pub fn metadata(&self) -> &ReportMetadata {
        &self.metadata
    }

    /// Slide layout.
    pub fn layout(&self) -> SlideLayout {
        self.metadata.layout
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get the number of charts across all slides.
    pub fn chart_count(&self) -> usize {
        self.chart_count
    }

    /// Get a slide by handle.
    pub fn slide(&self, handle: SlideHandle) -> Option<&PptxSlide> {
        self.slides.get(handle.index())
    }

    /// Iterate over slides in document order.
    pub fn slides(&self) -> impl Iterator<Item = &PptxSlide> {
        self.slides.iter()
    }

    pub(crate) fn add_slide(&mut self, content: SlideContent) -> SlideHandle {
        let handle = SlideHandle(self.slides.len());
        let slide_id = (self.slides.len() + 256) as u32;
        let mut slide = PptxSlide::new(slide_id, content.name);
        for block in content.texts {
            slide.push(ShapeKind::TextBox(block));
        }
        self.slides.push(slide);
        handle
    }

    pub(crate) fn add_chart(
        &mut self,
        handle: SlideHandle,
        chart_type: ChartType,
        series: &[SeriesRecord],
        options: &ChartOptions,
    ) -> Result<()> {
        if handle.index() >= self.slides.len() {
            return Err(WriterError::UnknownSlide(handle));
        }
        check_chart(chart_type, series, options)?;

        self.chart_count += 1;
        let chart = ChartShape {
            chart_number: self.chart_count,
            chart_type,
            series: series.to_vec(),
            options: options.clone(),
        };
        self.slides[handle.index()].push(ShapeKind::Chart(chart));
        Ok(())
    }

    /// Generate presentation.xml.
    ///
    /// `slide_rel_ids` holds one relationship ID per slide in document order.
    pub(crate) fn presentation_xml(&self, slide_rel_ids: &[String]) -> Result<String> {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#);

        xml.push_str("<p:sldMasterIdLst>");
        xml.push_str(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#);
        xml.push_str("</p:sldMasterIdLst>");

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                )?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        let (cx, cy) = self.metadata.layout.size_emu();
        write!(xml, r#"<p:sldSz cx="{}" cy="{}"/>"#, cx, cy)?;
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

fn check_chart(chart_type: ChartType, series: &[SeriesRecord], options: &ChartOptions) -> Result<()> {
    if !options.rect.is_well_formed() {
        return Err(WriterError::InvalidGeometry(options.rect));
    }
    if series.is_empty() {
        return Err(WriterError::NoSeries);
    }
    if chart_type.is_circular() && series.len() > 1 {
        return Err(WriterError::Unsupported {
            chart_type,
            reason: format!("{} series", series.len()),
        });
    }

    for record in series {
        if record.labels.len() != record.values.len() {
            return Err(WriterError::MalformedSeries {
                series: record.name.clone(),
                reason: format!(
                    "{} labels but {} values",
                    record.labels.len(),
                    record.values.len()
                ),
            });
        }
        if let Some(index) = record.values.iter().position(|v| !v.is_finite()) {
            return Err(WriterError::MalformedSeries {
                series: record.name.clone(),
                reason: format!("value {} is not finite", index),
            });
        }
        if record.axis == AxisGroup::Secondary && chart_type != ChartType::Line {
            return Err(WriterError::Unsupported {
                chart_type,
                reason: "a secondary value axis".to_string(),
            });
        }
    }

    Ok(())
}
