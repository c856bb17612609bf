//! Chart styling options.
//!
//! [`StyleConfig`] is a configuration bag: every option is optional, options that
//! do not apply to a chart kind are ignored, and unknown keys are dropped at
//! deserialization time.

use crate::chart::types::{BarOrientation, LegendPosition};
use serde::Deserialize;

/// Palette cycled when a spec declares fewer colors than it needs.
pub const DEFAULT_PALETTE: [&str; 6] = ["4472C4", "ED7D31", "A5A5A5", "FFC000", "5B9BD5", "70AD47"];

/// Default line stroke width in points.
pub const DEFAULT_LINE_WIDTH_PT: f64 = 2.0;

/// Legend visibility and placement.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegendStyle {
    /// Whether the legend is drawn
    pub shown: bool,
    /// Where the legend is drawn
    pub position: LegendPosition,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            shown: true,
            position: LegendPosition::default(),
        }
    }
}

/// Value axis title(s).
///
/// A list declares one value axis per entry, which is how a line chart asks for a
/// secondary axis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValueAxisTitles {
    /// One title for the single value axis
    Single(String),
    /// One title per value axis
    PerAxis(Vec<String>),
}

impl ValueAxisTitles {
    /// Number of value axis blocks declared.
    #[inline]
    pub fn axis_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::PerAxis(titles) => titles.len().max(1),
        }
    }

    /// Title of the value axis at `index`, if declared.
    pub fn title(&self, index: usize) -> Option<&str> {
        match self {
            Self::Single(title) if index == 0 => Some(title.as_str()),
            Self::Single(_) => None,
            Self::PerAxis(titles) => titles.get(index).map(String::as_str),
        }
    }
}

/// Axis titles.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AxisTitles {
    /// Category axis title
    pub category: Option<String>,
    /// Value axis title(s)
    pub value: Option<ValueAxisTitles>,
}

/// Styling options for one chart.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Bar direction (BAR only)
    pub orientation: Option<BarOrientation>,
    /// Legend visibility and placement
    pub legend: LegendStyle,
    /// Hex color tokens, per series (BAR/LINE) or per slice (PIE)
    #[serde(alias = "chartColors")]
    pub colors: Vec<String>,
    /// Axis titles (BAR/LINE)
    #[serde(alias = "axisTitles")]
    pub axis_titles: AxisTitles,
    /// Line stroke width in points (LINE only)
    #[serde(alias = "lineWidth", alias = "lineSize")]
    pub line_width: Option<f64>,
    /// Chart title
    pub title: Option<String>,
    /// Percentage data labels (PIE only)
    #[serde(alias = "showPercent")]
    pub show_percent: bool,
    /// Value data labels
    #[serde(alias = "showValues", alias = "showValue")]
    pub show_values: bool,
    /// Doughnut hole size in percent (PIE only)
    #[serde(alias = "holeSize")]
    pub hole_size: Option<u8>,
    /// Major gridlines on value axes (BAR/LINE)
    pub gridlines: Option<bool>,
}

impl StyleConfig {
    /// Number of value axis blocks the style declares (at least one).
    #[inline]
    pub fn value_axis_count(&self) -> usize {
        self.axis_titles
            .value
            .as_ref()
            .map_or(1, ValueAxisTitles::axis_count)
    }

    /// Legend position, or `None` when the legend is hidden.
    #[inline]
    pub fn legend_position(&self) -> Option<LegendPosition> {
        self.legend.shown.then_some(self.legend.position)
    }

    /// Whether value axes draw major gridlines.
    #[inline]
    pub fn gridlines(&self) -> bool {
        self.gridlines.unwrap_or(true)
    }

    /// Line width in points.
    #[inline]
    pub fn line_width_pt(&self) -> f64 {
        self.line_width.unwrap_or(DEFAULT_LINE_WIDTH_PT)
    }
}

/// Normalize a color token to uppercase `RRGGBB`.
///
/// Accepts an optional leading `#`. Returns `None` for anything that is not six
/// hex digits.
pub fn normalize_color(token: &str) -> Option<String> {
    let hex = token.trim().trim_start_matches('#');
    (hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .then(|| hex.to_ascii_uppercase())
}

/// Take `count` colors from `colors`, cycling when there are fewer.
pub fn cycle_colors(colors: &[String], count: usize) -> Vec<String> {
    if colors.is_empty() {
        return DEFAULT_PALETTE
            .iter()
            .cycle()
            .take(count)
            .map(|c| (*c).to_string())
            .collect();
    }
    colors.iter().cycle().take(count).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = StyleConfig::default();
        assert_eq!(style.legend_position(), Some(LegendPosition::Right));
        assert!(style.gridlines());
        assert_eq!(style.value_axis_count(), 1);
        assert_eq!(style.line_width_pt(), DEFAULT_LINE_WIDTH_PT);
    }

    #[test]
    fn test_hidden_legend() {
        let style = StyleConfig {
            legend: LegendStyle {
                shown: false,
                position: LegendPosition::Top,
            },
            ..Default::default()
        };
        assert_eq!(style.legend_position(), None);
    }

    #[test]
    fn test_value_axis_titles() {
        let dual = ValueAxisTitles::PerAxis(vec!["views".into(), "videos".into()]);
        assert_eq!(dual.axis_count(), 2);
        assert_eq!(dual.title(1), Some("videos"));
        assert_eq!(dual.title(2), None);

        let single = ValueAxisTitles::Single("%".into());
        assert_eq!(single.axis_count(), 1);
        assert_eq!(single.title(0), Some("%"));
        assert_eq!(single.title(1), None);
    }

    #[test]
    fn test_normalize_color() {
        assert_eq!(normalize_color("#e33737").as_deref(), Some("E33737"));
        assert_eq!(normalize_color("00CC96").as_deref(), Some("00CC96"));
        assert!(normalize_color("red").is_none());
        assert!(normalize_color("#12345").is_none());
    }

    #[test]
    fn test_cycle_colors() {
        let colors = vec!["111111".to_string(), "222222".to_string()];
        assert_eq!(
            cycle_colors(&colors, 3),
            vec!["111111", "222222", "111111"]
        );
        assert_eq!(cycle_colors(&[], 2), vec!["4472C4", "ED7D31"]);
    }
}
