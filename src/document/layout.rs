//! Slide size presets.

use crate::common::unit::inches_to_emu;
use serde::Deserialize;
use std::fmt;

/// Slide dimensions of the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SlideLayout {
    /// 10 x 5.625 in
    #[default]
    #[serde(rename = "16x9", alias = "LAYOUT_16x9")]
    Layout16x9,
    /// 10 x 6.25 in
    #[serde(rename = "16x10", alias = "LAYOUT_16x10")]
    Layout16x10,
    /// 10 x 7.5 in
    #[serde(rename = "4x3", alias = "LAYOUT_4x3")]
    Layout4x3,
    /// 13.333 x 7.5 in
    #[serde(rename = "wide", alias = "LAYOUT_WIDE")]
    LayoutWide,
}

impl SlideLayout {
    /// Slide width and height in inches.
    #[inline]
    pub const fn size_inches(&self) -> (f64, f64) {
        match self {
            Self::Layout16x9 => (10.0, 5.625),
            Self::Layout16x10 => (10.0, 6.25),
            Self::Layout4x3 => (10.0, 7.5),
            Self::LayoutWide => (13.333, 7.5),
        }
    }

    /// Slide width and height in EMUs.
    #[inline]
    pub fn size_emu(&self) -> (i64, i64) {
        match self {
            // 13.333in does not round to the 16:9 widescreen size PowerPoint uses
            Self::LayoutWide => (12_192_000, 6_858_000),
            _ => {
                let (w, h) = self.size_inches();
                (inches_to_emu(w), inches_to_emu(h))
            },
        }
    }

    /// Configuration token.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Layout16x9 => "16x9",
            Self::Layout16x10 => "16x10",
            Self::Layout4x3 => "4x3",
            Self::LayoutWide => "wide",
        }
    }
}

impl fmt::Display for SlideLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
