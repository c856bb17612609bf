//! Chart binder.
//!
//! Turns a validated [`ChartSpec`] into the records a [`DocumentWriter`]
//! understands and places the chart at exactly the placeholder's rectangle.

use crate::chart::style::cycle_colors;
use crate::chart::{BarOrientation, ChartKind, ChartSpec};
use crate::document::{
    AxisGroup, ChartOptions, ChartType, DocumentWriter, SeriesRecord, SlideHandle,
    ValueAxisOptions, WriterError,
};
use crate::placeholder::Placeholder;

/// Everything the writer needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    /// Writer chart type token
    pub chart_type: ChartType,
    /// Series in declaration order
    pub series: Vec<SeriesRecord>,
    /// Position and styling
    pub options: ChartOptions,
}

impl ChartRequest {
    /// Translate `spec` for the region described by `placeholder`.
    pub fn new(placeholder: &Placeholder, spec: &ChartSpec) -> Self {
        Self {
            chart_type: chart_type(spec),
            series: series_records(spec),
            options: chart_options(placeholder, spec),
        }
    }
}

/// Binds chart specs to placeholders through a document writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartBinder;

impl ChartBinder {
    /// Create a binder.
    pub fn new() -> Self {
        Self
    }

    /// Add the chart described by `spec` to `slide` at `placeholder`.
    ///
    /// Writer failures are returned unchanged; nothing is retried.
    pub fn bind<W: DocumentWriter>(
        &self,
        writer: &W,
        document: &mut W::Document,
        slide: SlideHandle,
        placeholder: &Placeholder,
        spec: &ChartSpec,
    ) -> Result<(), WriterError> {
        let request = ChartRequest::new(placeholder, spec);
        log::debug!(
            "binding {} chart ({} series) to '{}' at {}",
            request.chart_type,
            request.series.len(),
            placeholder.id,
            request.options.rect
        );
        writer.add_chart(
            document,
            slide,
            request.chart_type,
            &request.series,
            &request.options,
        )
    }
}

/// Writer token for a spec's kind.
///
/// A pie with a hole size becomes a doughnut; a bar chart becomes columns or
/// horizontal bars depending on its orientation.
pub fn chart_type(spec: &ChartSpec) -> ChartType {
    match spec.kind {
        ChartKind::Pie if spec.style.hole_size.is_some() => ChartType::Doughnut,
        ChartKind::Pie => ChartType::Pie,
        ChartKind::Bar => match spec.style.orientation.unwrap_or_default() {
            BarOrientation::Col => ChartType::Column,
            BarOrientation::Bar => ChartType::Bar,
        },
        ChartKind::Line => ChartType::Line,
    }
}

/// Whether series after the first go on a secondary value axis.
#[inline]
fn uses_secondary_axis(spec: &ChartSpec) -> bool {
    spec.kind == ChartKind::Line && spec.style.value_axis_count() > 1
}

/// Writer series records in declaration order.
pub fn series_records(spec: &ChartSpec) -> Vec<SeriesRecord> {
    let secondary = uses_secondary_axis(spec);
    let colors = match spec.kind {
        // pie colors go on the slices
        ChartKind::Pie => Vec::new(),
        _ => cycle_colors(&spec.style.colors, spec.series.len()),
    };

    spec.series
        .iter()
        .enumerate()
        .map(|(index, series)| SeriesRecord {
            name: series.name.clone(),
            labels: series.labels.clone(),
            values: series.values.clone(),
            axis: if secondary && index > 0 {
                AxisGroup::Secondary
            } else {
                AxisGroup::Primary
            },
            color: colors.get(index).cloned(),
        })
        .collect()
}

/// Writer options: the placeholder's rectangle plus the spec's styling.
pub fn chart_options(placeholder: &Placeholder, spec: &ChartSpec) -> ChartOptions {
    let style = &spec.style;
    let mut options = ChartOptions::at(placeholder.rect);
    options.title = style.title.clone();
    options.legend = style.legend_position();
    options.show_values = style.show_values;

    match spec.kind {
        ChartKind::Pie => {
            options.point_colors = cycle_colors(&style.colors, spec.category_count());
            options.show_percent = style.show_percent;
            options.hole_size = style.hole_size;
        },
        ChartKind::Bar | ChartKind::Line => {
            options.category_axis_title = style.axis_titles.category.clone();
            let axis_count = if uses_secondary_axis(spec) { 2 } else { 1 };
            options.value_axes = (0..axis_count)
                .map(|index| ValueAxisOptions {
                    title: style
                        .axis_titles
                        .value
                        .as_ref()
                        .and_then(|titles| titles.title(index))
                        .map(str::to_string),
                    gridlines: style.gridlines(),
                })
                .collect();
            if spec.kind == ChartKind::Line {
                options.line_width_pt = Some(style.line_width_pt());
            }
        },
    }

    options
}
