//! Report assembler.
//!
//! Owns the document for the duration of a run: creates it from the report
//! metadata, lets the [`SlidePipeline`] fill it, and serializes it exactly once
//! when every slide succeeded. A failed run writes nothing.

use crate::directory::ChartDirectory;
use crate::document::{DocumentWriter, SlideLayout};
use crate::error::{ConfigError, Error, Result};
use crate::pipeline::{PipelineReport, SkippedChart, SlidePipeline};
use crate::template::{TemplateParser, TemplateRef};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Title, slide size and authorship of the output document.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMetadata {
    /// Document title
    pub title: String,
    /// Slide size
    pub layout: SlideLayout,
    /// Author
    pub author: Option<String>,
    /// Subject
    pub subject: Option<String>,
}

impl ReportMetadata {
    /// Metadata with the default layout and no authorship.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            layout: SlideLayout::default(),
            author: None,
            subject: None,
        }
    }

    /// Set the slide layout.
    pub fn with_layout(mut self, layout: SlideLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// Summary of a written report.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    /// Path the document was written to
    pub output: PathBuf,
    /// Number of slides
    pub slides: usize,
    /// Number of charts
    pub charts: usize,
    /// Charts skipped because their placeholder was missing
    pub skipped: Vec<SkippedChart>,
}

/// Sequences a whole run over one parser and one writer.
#[derive(Debug)]
pub struct ReportAssembler<P, W> {
    parser: P,
    writer: W,
    metadata: ReportMetadata,
}

impl<P, W> ReportAssembler<P, W>
where
    P: TemplateParser,
    W: DocumentWriter,
{
    /// Create an assembler.
    pub fn new(parser: P, writer: W, metadata: ReportMetadata) -> Self {
        Self {
            parser,
            writer,
            metadata,
        }
    }

    /// Report metadata.
    pub fn metadata(&self) -> &ReportMetadata {
        &self.metadata
    }

    /// The document writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Build the document in memory without serializing it.
    ///
    /// Runs the load-time checks first: template ids must be unique and every
    /// chart directory entry must name a listed template.
    pub fn build(
        &self,
        templates: &[TemplateRef],
        directory: &ChartDirectory,
    ) -> Result<(W::Document, PipelineReport)> {
        check_template_ids(templates)?;
        directory.check_templates(templates)?;

        let mut document = self
            .writer
            .new_document(&self.metadata)
            .map_err(Error::Document)?;
        log::info!(
            "building '{}' ({}) from {} template(s), {} chart(s) declared",
            self.metadata.title,
            self.metadata.layout,
            templates.len(),
            directory.len()
        );

        let report = SlidePipeline::new(&self.parser, &self.writer).run(
            &mut document,
            templates,
            directory,
        )?;
        Ok((document, report))
    }

    /// Build the document and write it to `output`.
    ///
    /// Serialization happens once, after every slide succeeded; on any error
    /// nothing is written.
    pub fn assemble(
        &self,
        templates: &[TemplateRef],
        directory: &ChartDirectory,
        output: &Path,
    ) -> Result<ReportSummary> {
        let (document, report) = self.build(templates, directory)?;

        self.writer
            .serialize(&document, output)
            .map_err(|source| Error::Io {
                path: output.to_path_buf(),
                source,
            })?;

        log::info!(
            "wrote {} ({} slide(s), {} chart(s), {} skipped)",
            output.display(),
            report.slides.len(),
            report.charts_bound,
            report.skipped.len()
        );

        Ok(ReportSummary {
            output: output.to_path_buf(),
            slides: report.slides.len(),
            charts: report.charts_bound,
            skipped: report.skipped,
        })
    }
}

fn check_template_ids(templates: &[TemplateRef]) -> Result<()> {
    let mut seen = HashSet::with_capacity(templates.len());
    for template in templates {
        if !seen.insert(template.id.as_str()) {
            return Err(ConfigError::DuplicateTemplate(template.id.clone()).into());
        }
    }
    Ok(())
}
