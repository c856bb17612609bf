//! Records exchanged with a document writer.

use crate::chart::LegendPosition;
use crate::placeholder::Rect;
use std::fmt;

/// Opaque handle to a slide inside one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideHandle(pub(crate) usize);

impl SlideHandle {
    /// Handle for the slide at zero-based `index`, for writer implementations.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based position of the slide in the document.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SlideHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

/// A positioned run of static text from a template.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Text content, whitespace collapsed
    pub text: String,
    /// Bounds in layout units
    pub rect: Rect,
    /// Font size in points
    pub font_size_pt: Option<f64>,
    /// Bold run
    pub bold: bool,
    /// Text color as `RRGGBB`
    pub color: Option<String>,
}

/// Static slide content produced by a template parser.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlideContent {
    /// Slide name
    pub name: Option<String>,
    /// Static text blocks in document order
    pub texts: Vec<TextBlock>,
}

/// Chart type token understood by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    /// Pie chart
    Pie,
    /// Pie chart with a hole
    Doughnut,
    /// Horizontal bars
    Bar,
    /// Vertical columns
    Column,
    /// Line chart
    Line,
}

impl ChartType {
    /// Returns the XML element name for this chart type.
    #[inline]
    pub const fn xml_element_name(&self) -> &'static str {
        match self {
            Self::Pie => "pieChart",
            Self::Doughnut => "doughnutChart",
            Self::Bar | Self::Column => "barChart",
            Self::Line => "lineChart",
        }
    }

    /// True for chart types drawn as a single ring of slices.
    #[inline]
    pub const fn is_circular(&self) -> bool {
        matches!(self, Self::Pie | Self::Doughnut)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
            Self::Bar => "bar",
            Self::Column => "column",
            Self::Line => "line",
        };
        f.write_str(name)
    }
}

/// Which value axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisGroup {
    /// Left-hand (or bottom for horizontal bars) value axis
    #[default]
    Primary,
    /// Right-hand value axis
    Secondary,
}

/// One series as handed to the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRecord {
    /// Series name
    pub name: String,
    /// Category labels
    pub labels: Vec<String>,
    /// Values, one per label
    pub values: Vec<f64>,
    /// Value axis assignment
    pub axis: AxisGroup,
    /// Series color as `RRGGBB`
    pub color: Option<String>,
}

/// Options for one value axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxisOptions {
    /// Axis title
    pub title: Option<String>,
    /// Draw major gridlines
    pub gridlines: bool,
}

/// Position and styling for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Chart frame bounds in layout units
    pub rect: Rect,
    /// Chart title
    pub title: Option<String>,
    /// Legend position, `None` hides the legend
    pub legend: Option<LegendPosition>,
    /// Slice colors for pie and doughnut charts
    pub point_colors: Vec<String>,
    /// Percentage data labels
    pub show_percent: bool,
    /// Value data labels
    pub show_values: bool,
    /// Category axis title
    pub category_axis_title: Option<String>,
    /// Value axes, primary first
    pub value_axes: Vec<ValueAxisOptions>,
    /// Line stroke width in points
    pub line_width_pt: Option<f64>,
    /// Doughnut hole size in percent
    pub hole_size: Option<u8>,
}

impl ChartOptions {
    /// Options positioned at `rect` with no styling.
    pub fn at(rect: Rect) -> Self {
        Self {
            rect,
            title: None,
            legend: None,
            point_colors: Vec::new(),
            show_percent: false,
            show_values: false,
            category_axis_title: None,
            value_axes: Vec::new(),
            line_width_pt: None,
            hole_size: None,
        }
    }
}
