//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use chartdeck::document::{
    ChartOptions, ChartType, DocumentWriter, SeriesRecord, SlideContent, SlideHandle, WriterError,
};
use chartdeck::placeholder::Placeholder;
use chartdeck::report::ReportMetadata;
use chartdeck::template::{ParseError, ParsedTemplate, TemplateParser, TemplateRef};
use std::cell::Cell;
use std::collections::HashMap;
use std::path::Path;

/// A chart as received by [`RecordingWriter`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedChart {
    pub slide: SlideHandle,
    pub chart_type: ChartType,
    pub series: Vec<SeriesRecord>,
    pub options: ChartOptions,
}

/// Everything [`RecordingWriter`] was asked to build.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordedDocument {
    pub title: String,
    pub slides: Vec<SlideContent>,
    pub charts: Vec<RecordedChart>,
}

impl RecordedDocument {
    pub fn slide_names(&self) -> Vec<&str> {
        self.slides
            .iter()
            .map(|s| s.name.as_deref().unwrap_or(""))
            .collect()
    }

    pub fn charts_on(&self, slide: usize) -> Vec<&RecordedChart> {
        self.charts
            .iter()
            .filter(|c| c.slide.index() == slide)
            .collect()
    }
}

/// In-memory writer that records every call.
///
/// `serialize` writes one slide name per line, so tests can tell whether a
/// file was produced at all.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub serialize_calls: Cell<usize>,
    /// Reject every chart added to the slide at this index
    pub reject_charts_on: Option<usize>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_charts_on(slide: usize) -> Self {
        Self {
            serialize_calls: Cell::new(0),
            reject_charts_on: Some(slide),
        }
    }
}

impl DocumentWriter for RecordingWriter {
    type Document = RecordedDocument;

    fn new_document(&self, metadata: &ReportMetadata) -> Result<RecordedDocument, WriterError> {
        Ok(RecordedDocument {
            title: metadata.title.clone(),
            ..Default::default()
        })
    }

    fn add_slide(
        &self,
        document: &mut RecordedDocument,
        content: SlideContent,
    ) -> Result<SlideHandle, WriterError> {
        document.slides.push(content);
        Ok(SlideHandle::new(document.slides.len() - 1))
    }

    fn add_chart(
        &self,
        document: &mut RecordedDocument,
        slide: SlideHandle,
        chart_type: ChartType,
        series: &[SeriesRecord],
        options: &ChartOptions,
    ) -> Result<(), WriterError> {
        if slide.index() >= document.slides.len() {
            return Err(WriterError::UnknownSlide(slide));
        }
        if self.reject_charts_on == Some(slide.index()) {
            return Err(WriterError::Unsupported {
                chart_type,
                reason: "charts on this slide".into(),
            });
        }
        document.charts.push(RecordedChart {
            slide,
            chart_type,
            series: series.to_vec(),
            options: options.clone(),
        });
        Ok(())
    }

    fn serialize(&self, document: &RecordedDocument, path: &Path) -> Result<(), WriterError> {
        self.serialize_calls.set(self.serialize_calls.get() + 1);
        std::fs::write(path, document.slide_names().join("\n"))?;
        Ok(())
    }
}

/// Parser serving canned placeholders by template id.
///
/// The slide name is the template id. Unknown ids fail to parse.
#[derive(Debug, Default)]
pub struct StaticParser {
    slides: HashMap<String, Vec<Placeholder>>,
}

impl StaticParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slide(mut self, id: &str, placeholders: Vec<Placeholder>) -> Self {
        self.slides.insert(id.to_string(), placeholders);
        self
    }
}

impl TemplateParser for StaticParser {
    fn parse(&self, template: &TemplateRef) -> Result<ParsedTemplate, ParseError> {
        let placeholders = self
            .slides
            .get(&template.id)
            .cloned()
            .ok_or_else(|| ParseError::Xml(format!("no markup for '{}'", template.id)))?;
        Ok(ParsedTemplate {
            content: SlideContent {
                name: Some(template.id.clone()),
                texts: Vec::new(),
            },
            placeholders,
        })
    }
}

/// Positioned markup for a 16:9 slide carrying the given placeholders.
///
/// Each placeholder is `(id, left, top, width, height)` in points.
pub fn slide_markup(title: &str, placeholders: &[(&str, f64, f64, f64, f64)]) -> String {
    let mut markup = format!(
        "<html><head><title>{title}</title></head>\n<body style=\"width: 720pt; height: 405pt\">\n\
         <h1 style=\"left: 36pt; top: 18pt; width: 648pt; height: 40pt; font-size: 28pt\">{title}</h1>\n"
    );
    for (id, left, top, width, height) in placeholders {
        markup.push_str(&format!(
            "<div class=\"placeholder\" id=\"{id}\" style=\"left: {left}pt; top: {top}pt; width: {width}pt; height: {height}pt\"></div>\n"
        ));
    }
    markup.push_str("</body></html>\n");
    markup
}
