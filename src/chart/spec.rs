//! Typed chart requests and their validation.

use crate::chart::style::{StyleConfig, cycle_colors, normalize_color};
use crate::chart::types::ChartKind;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// A named data series: ordered category labels paired with numeric values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Series {
    /// Series name, shown in the legend
    pub name: String,
    /// Category labels
    pub labels: Vec<String>,
    /// Values, one per label
    pub values: Vec<f64>,
}

impl Series {
    /// Create a new series.
    pub fn new<L, S>(name: impl Into<String>, labels: L, values: Vec<f64>) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            values,
        }
    }

    /// Number of data points.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if the series has no data points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Reasons a [`ChartSpec`] is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// No series at all
    #[error("chart has no series")]
    EmptySeries,

    /// A series has a different number of labels and values
    #[error("series '{series}' has {labels} labels but {values} values")]
    LengthMismatch {
        series: String,
        labels: usize,
        values: usize,
    },

    /// Series disagree on the number of categories
    #[error("series '{series}' has {found} categories, expected {expected}")]
    RaggedSeries {
        series: String,
        expected: usize,
        found: usize,
    },

    /// Too many series for the chart kind
    #[error("{kind} chart accepts exactly one series, got {count}")]
    TooManySeries { kind: ChartKind, count: usize },

    /// A value is NaN or infinite
    #[error("series '{series}' has a non-finite value at index {index}")]
    NonFiniteValue { series: String, index: usize },

    /// A color token is not six hex digits
    #[error("invalid color token '{0}'")]
    InvalidColor(String),

    /// A recognized option has an unusable value
    #[error("invalid style option {option}: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },
}

/// A chart request: kind, series, and styling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartSpec {
    /// Chart kind
    pub kind: ChartKind,
    /// Series in legend/stacking order
    pub series: Vec<Series>,
    /// Styling options
    #[serde(default)]
    pub style: StyleConfig,
}

impl ChartSpec {
    /// Create a spec with default styling.
    pub fn new(kind: ChartKind, series: Vec<Series>) -> Self {
        Self {
            kind,
            series,
            style: StyleConfig::default(),
        }
    }

    /// Replace the styling.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Number of categories shared by every series.
    #[inline]
    pub fn category_count(&self) -> usize {
        self.series.first().map_or(0, Series::len)
    }

    /// Validate the spec and normalize its colors.
    ///
    /// Structural checks run in a fixed order: non-empty series, label/value
    /// counts per series, equal category counts across series, then the
    /// single-series rule for pies. A color list shorter than the series count
    /// (slice count for pies) is replaced by the default palette cycle rather
    /// than rejected.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        if self.series.is_empty() {
            return Err(ValidationError::EmptySeries);
        }

        for series in &self.series {
            if series.labels.len() != series.values.len() {
                return Err(ValidationError::LengthMismatch {
                    series: series.name.clone(),
                    labels: series.labels.len(),
                    values: series.values.len(),
                });
            }
        }

        let expected = self.category_count();
        if let Some(series) = self.series.iter().find(|s| s.len() != expected) {
            return Err(ValidationError::RaggedSeries {
                series: series.name.clone(),
                expected,
                found: series.len(),
            });
        }

        if self.kind == ChartKind::Pie && self.series.len() > 1 {
            return Err(ValidationError::TooManySeries {
                kind: self.kind,
                count: self.series.len(),
            });
        }

        for series in &self.series {
            if let Some(index) = series.values.iter().position(|v| !v.is_finite()) {
                return Err(ValidationError::NonFiniteValue {
                    series: series.name.clone(),
                    index,
                });
            }
        }

        self.normalize_colors()?;
        self.check_options()?;

        Ok(self)
    }

    fn normalize_colors(&mut self) -> Result<(), ValidationError> {
        let mut colors = Vec::with_capacity(self.style.colors.len());
        for token in &self.style.colors {
            let color =
                normalize_color(token).ok_or_else(|| ValidationError::InvalidColor(token.clone()))?;
            colors.push(color);
        }

        // pie colors are per slice
        let needed = match self.kind {
            ChartKind::Pie => self.category_count().max(1),
            _ => self.series.len(),
        };
        if colors.len() < needed {
            debug!(
                "{} chart declares {} colors for {} {}, using default palette",
                self.kind,
                colors.len(),
                needed,
                if self.kind == ChartKind::Pie { "slices" } else { "series" }
            );
            colors = cycle_colors(&[], needed);
        }

        self.style.colors = colors;
        Ok(())
    }

    fn check_options(&self) -> Result<(), ValidationError> {
        let style = &self.style;

        if let Some(hole) = style.hole_size {
            if self.kind != ChartKind::Pie {
                debug!("hole_size ignored on {} chart", self.kind);
            } else if !(10..=90).contains(&hole) {
                return Err(ValidationError::InvalidOption {
                    option: "hole_size",
                    reason: format!("{} is outside 10..=90", hole),
                });
            }
        }

        if let Some(width) = style.line_width {
            if self.kind != ChartKind::Line {
                debug!("line_width ignored on {} chart", self.kind);
            } else if !width.is_finite() || width <= 0.0 {
                return Err(ValidationError::InvalidOption {
                    option: "line_width",
                    reason: format!("{} is not a positive width", width),
                });
            }
        }

        if style.orientation.is_some() && self.kind != ChartKind::Bar {
            debug!("orientation ignored on {} chart", self.kind);
        }

        if style.show_percent && self.kind != ChartKind::Pie {
            debug!("show_percent ignored on {} chart", self.kind);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::style::DEFAULT_PALETTE;
    use proptest::prelude::*;

    fn pie() -> ChartSpec {
        ChartSpec::new(
            ChartKind::Pie,
            vec![Series::new("x", ["a", "b"], vec![60.0, 40.0])],
        )
    }

    #[test]
    fn test_valid_pie() {
        let spec = pie().validate().unwrap();
        assert_eq!(spec.category_count(), 2);
        assert_eq!(spec.style.colors, &DEFAULT_PALETTE[..2]);
    }

    #[test]
    fn test_empty_series() {
        let spec = ChartSpec::new(ChartKind::Bar, Vec::new());
        assert_eq!(spec.validate().unwrap_err(), ValidationError::EmptySeries);
    }

    #[test]
    fn test_length_mismatch() {
        let spec = ChartSpec::new(
            ChartKind::Line,
            vec![Series::new("s", ["a", "b", "c"], vec![1.0, 2.0])],
        );
        assert!(matches!(
            spec.validate(),
            Err(ValidationError::LengthMismatch {
                labels: 3,
                values: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_ragged_series() {
        let spec = ChartSpec::new(
            ChartKind::Bar,
            vec![
                Series::new("before", ["a", "b"], vec![1.0, 2.0]),
                Series::new("after", ["a"], vec![1.0]),
            ],
        );
        assert!(matches!(
            spec.validate(),
            Err(ValidationError::RaggedSeries {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_dual_axis_labels_may_differ() {
        let spec = ChartSpec::new(
            ChartKind::Line,
            vec![
                Series::new("views", ["1/23", "1/26"], vec![3.72, 4.2]),
                Series::new("videos", ["w1", "w2"], vec![1605.0, 1690.0]),
            ],
        );
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_pie_rejects_two_series() {
        let mut spec = pie();
        spec.series.push(Series::new("y", ["a", "b"], vec![1.0, 2.0]));
        assert_eq!(
            spec.validate().unwrap_err(),
            ValidationError::TooManySeries {
                kind: ChartKind::Pie,
                count: 2
            }
        );
    }

    #[test]
    fn test_short_color_list_uses_palette() {
        let mut spec = ChartSpec::new(
            ChartKind::Bar,
            vec![
                Series::new("a", ["x"], vec![1.0]),
                Series::new("b", ["x"], vec![2.0]),
            ],
        );
        spec.style.colors = vec!["#636efa".into()];
        let spec = spec.validate().unwrap();
        assert_eq!(spec.style.colors, vec!["4472C4", "ED7D31"]);
    }

    #[test]
    fn test_short_pie_color_list_uses_palette() {
        let slices = || Series::new("share", ["a", "b", "c"], vec![50.0, 30.0, 20.0]);

        let mut spec = ChartSpec::new(ChartKind::Pie, vec![slices()]);
        spec.style.colors = vec!["00CC96".into()];
        assert_eq!(spec.validate().unwrap().style.colors, &DEFAULT_PALETTE[..3]);

        let mut spec = ChartSpec::new(ChartKind::Pie, vec![slices()]);
        spec.style.colors = vec!["00CC96".into(), "E33737".into()];
        assert_eq!(spec.validate().unwrap().style.colors, &DEFAULT_PALETTE[..3]);

        let mut spec = ChartSpec::new(ChartKind::Pie, vec![slices()]);
        spec.style.colors = vec!["00CC96".into(), "E33737".into(), "636EFA".into()];
        assert_eq!(
            spec.validate().unwrap().style.colors,
            vec!["00CC96", "E33737", "636EFA"]
        );
    }

    #[test]
    fn test_colors_are_normalized() {
        let mut spec = pie();
        spec.style.colors = vec!["#00cc96".into(), "E33737".into()];
        let spec = spec.validate().unwrap();
        assert_eq!(spec.style.colors, vec!["00CC96", "E33737"]);
    }

    #[test]
    fn test_invalid_color() {
        let mut spec = pie();
        spec.style.colors = vec!["green".into()];
        assert_eq!(
            spec.validate().unwrap_err(),
            ValidationError::InvalidColor("green".into())
        );
    }

    #[test]
    fn test_non_finite_value() {
        let spec = ChartSpec::new(
            ChartKind::Line,
            vec![Series::new("s", ["a", "b"], vec![1.0, f64::NAN])],
        );
        assert_eq!(
            spec.validate().unwrap_err(),
            ValidationError::NonFiniteValue {
                series: "s".into(),
                index: 1
            }
        );
    }

    #[test]
    fn test_hole_size_range() {
        let mut spec = pie();
        spec.style.hole_size = Some(95);
        assert!(matches!(
            spec.validate(),
            Err(ValidationError::InvalidOption {
                option: "hole_size",
                ..
            })
        ));
    }

    #[test]
    fn test_inapplicable_options_are_ignored() {
        let mut spec = pie();
        spec.style.line_width = Some(-1.0);
        assert!(spec.validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_series_shape(labels in 0usize..8, values in 0usize..8) {
            let spec = ChartSpec::new(
                ChartKind::Bar,
                vec![Series::new(
                    "s",
                    (0..labels).map(|i| format!("c{i}")),
                    vec![1.0; values],
                )],
            );
            let result = spec.validate();
            if labels == values {
                prop_assert!(result.is_ok());
            } else {
                let is_mismatch = matches!(result, Err(ValidationError::LengthMismatch { .. }));
                prop_assert!(is_mismatch);
            }
        }
    }
}
