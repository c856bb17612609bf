//! Chart enumerations shared by the spec model and the binder.

use serde::Deserialize;
use std::fmt;

/// Kind of chart requested for a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Pie chart (one data ring)
    #[serde(alias = "PIE")]
    Pie,
    /// Bar or column chart
    #[serde(alias = "BAR")]
    Bar,
    /// Line chart, optionally with a secondary value axis
    #[serde(alias = "LINE")]
    Line,
}

impl ChartKind {
    /// Lowercase name used in diagnostics and configuration.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pie => "pie",
            Self::Bar => "bar",
            Self::Line => "line",
        }
    }

    /// True if this kind draws category and value axes.
    #[inline]
    pub const fn has_axes(&self) -> bool {
        !matches!(self, Self::Pie)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bar direction for [`ChartKind::Bar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarOrientation {
    /// Vertical columns
    #[default]
    #[serde(alias = "column")]
    Col,
    /// Horizontal bars
    Bar,
}

impl BarOrientation {
    /// Returns the XML value for `c:barDir`.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Col => "col",
            Self::Bar => "bar",
        }
    }
}

/// Legend position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    /// Top
    #[serde(alias = "t")]
    Top,
    /// Bottom
    #[serde(alias = "b")]
    Bottom,
    /// Left
    #[serde(alias = "l")]
    Left,
    /// Right
    #[default]
    #[serde(alias = "r")]
    Right,
}

impl LegendPosition {
    /// Returns the XML value for `c:legendPos`.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Top => "t",
            Self::Bottom => "b",
            Self::Left => "l",
            Self::Right => "r",
        }
    }
}
