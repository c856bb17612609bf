//! Slide pipeline.
//!
//! Processes templates strictly in order. Each slide goes through
//! `Parsing -> Binding -> Done`, or stops in `Failed`, which aborts the run.

use crate::binder::ChartBinder;
use crate::chart::ChartKind;
use crate::directory::ChartDirectory;
use crate::document::{DocumentWriter, SlideHandle};
use crate::error::{Error, Result};
use crate::placeholder::PlaceholderIndex;
use crate::template::{ParsedTemplate, TemplateParser, TemplateRef};
use log::{info, warn};

/// A declared chart whose placeholder was missing from its slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedChart {
    /// Template id
    pub template: String,
    /// Placeholder id that was not found
    pub placeholder: String,
    /// Kind of the skipped chart
    pub kind: ChartKind,
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Slide handles in template order
    pub slides: Vec<SlideHandle>,
    /// Number of charts added
    pub charts_bound: usize,
    /// Charts skipped because their placeholder was missing
    pub skipped: Vec<SkippedChart>,
}

enum SlideState {
    Parsing,
    Binding(ParsedTemplate),
    Done(SlideHandle),
    Failed(Error),
}

/// Drives a template parser and a document writer over an ordered template list.
#[derive(Debug)]
pub struct SlidePipeline<'a, P, W> {
    parser: &'a P,
    writer: &'a W,
    binder: ChartBinder,
}

impl<'a, P, W> SlidePipeline<'a, P, W>
where
    P: TemplateParser,
    W: DocumentWriter,
{
    /// Create a pipeline over the given collaborators.
    pub fn new(parser: &'a P, writer: &'a W) -> Self {
        Self {
            parser,
            writer,
            binder: ChartBinder::new(),
        }
    }

    /// Add one slide per template to `document`, in order.
    ///
    /// Stops at the first fatal error. A chart whose placeholder is absent from
    /// its slide is skipped and recorded in [`PipelineReport::skipped`].
    pub fn run(
        &self,
        document: &mut W::Document,
        templates: &[TemplateRef],
        directory: &ChartDirectory,
    ) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();
        for template in templates {
            let handle = self.process(document, template, directory, &mut report)?;
            report.slides.push(handle);
        }
        Ok(report)
    }

    fn process(
        &self,
        document: &mut W::Document,
        template: &TemplateRef,
        directory: &ChartDirectory,
        report: &mut PipelineReport,
    ) -> Result<SlideHandle> {
        let mut state = SlideState::Parsing;
        loop {
            state = match state {
                SlideState::Parsing => match self.parser.parse(template) {
                    Ok(parsed) => SlideState::Binding(parsed),
                    Err(source) => SlideState::Failed(Error::Parse {
                        template: template.id.clone(),
                        source,
                    }),
                },
                SlideState::Binding(parsed) => {
                    match self.bind(document, template, parsed, directory, report) {
                        Ok(handle) => SlideState::Done(handle),
                        Err(err) => SlideState::Failed(err),
                    }
                },
                SlideState::Done(handle) => return Ok(handle),
                SlideState::Failed(err) => return Err(err),
            };
        }
    }

    fn bind(
        &self,
        document: &mut W::Document,
        template: &TemplateRef,
        parsed: ParsedTemplate,
        directory: &ChartDirectory,
        report: &mut PipelineReport,
    ) -> Result<SlideHandle> {
        let index = PlaceholderIndex::new(parsed.placeholders).map_err(|err| Error::Parse {
            template: template.id.clone(),
            source: err.into(),
        })?;

        let slide = self
            .writer
            .add_slide(document, parsed.content)
            .map_err(|source| Error::Slide {
                template: template.id.clone(),
                source,
            })?;

        let mut bound = 0;
        for entry in directory.entries_for(&template.id) {
            let Some(placeholder) = index.get(&entry.placeholder) else {
                warn!(
                    "template '{}' has no placeholder '{}', skipping {} chart",
                    template.id, entry.placeholder, entry.spec.kind
                );
                report.skipped.push(SkippedChart {
                    template: template.id.clone(),
                    placeholder: entry.placeholder.clone(),
                    kind: entry.spec.kind,
                });
                continue;
            };

            self.binder
                .bind(self.writer, document, slide, placeholder, &entry.spec)
                .map_err(|source| Error::Bind {
                    template: template.id.clone(),
                    placeholder: entry.placeholder.clone(),
                    kind: entry.spec.kind,
                    source,
                })?;
            bound += 1;
        }

        report.charts_bound += bound;
        info!(
            "slide {} from '{}': {} chart(s), {} placeholder(s)",
            slide,
            template.id,
            bound,
            index.len()
        );
        Ok(slide)
    }
}
