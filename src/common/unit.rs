//! Unit conversion utilities.
//!
//! Layout geometry is carried in inches (the layout unit of the whole crate) and
//! only converted to EMUs when slide and chart XML is written.

use std::fmt;
use std::str::FromStr;

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_MM: i64 = 36_000;
pub const EMUS_PER_PT: i64 = 12_700;

const POINTS_PER_INCH: f64 = 72.0;
const CSS_PX_PER_INCH: f64 = 96.0;

#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}

#[inline]
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

#[inline]
pub fn pt_to_emu_f64(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64).round() as i64
}

/// Length units accepted in template markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Point (1/72 inch)
    Point,
    /// CSS pixel (1/96 inch)
    Pixel,
    /// Inch
    Inch,
    /// Centimeter
    Centimeter,
    /// Millimeter
    Millimeter,
}

impl LengthUnit {
    /// Get the unit abbreviation
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "pt",
            Self::Pixel => "px",
            Self::Inch => "in",
            Self::Centimeter => "cm",
            Self::Millimeter => "mm",
        }
    }

    /// Number of inches in one of this unit.
    #[inline]
    pub fn inches_per_unit(&self) -> f64 {
        match self {
            Self::Point => 1.0 / POINTS_PER_INCH,
            Self::Pixel => 1.0 / CSS_PX_PER_INCH,
            Self::Inch => 1.0,
            Self::Centimeter => EMUS_PER_CM as f64 / EMUS_PER_INCH as f64,
            Self::Millimeter => EMUS_PER_MM as f64 / EMUS_PER_INCH as f64,
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pt" => Ok(Self::Point),
            "px" => Ok(Self::Pixel),
            "in" => Ok(Self::Inch),
            "cm" => Ok(Self::Centimeter),
            "mm" => Ok(Self::Millimeter),
            _ => Err(format!("unknown length unit '{}'", s)),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a CSS-style length (`12pt`, `1.5in`, `96px`, `0`) into inches.
///
/// A bare number is only accepted when it is zero, as in CSS.
pub fn parse_length_inches(value: &str) -> Result<f64, String> {
    let value = value.trim();
    let split = value
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);

    let magnitude: f64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid length '{}'", value))?;
    if !magnitude.is_finite() {
        return Err(format!("invalid length '{}'", value));
    }

    if unit.is_empty() {
        return if magnitude == 0.0 {
            Ok(0.0)
        } else {
            Err(format!("length '{}' has no unit", value))
        };
    }

    let unit: LengthUnit = unit.parse()?;
    Ok(magnitude * unit.inches_per_unit())
}

/// Parse a CSS font size into points, rounded to 1/100 pt.
pub fn parse_font_size_pt(value: &str) -> Result<f64, String> {
    parse_length_inches(value).map(|inches| (inches * POINTS_PER_INCH * 100.0).round() / 100.0)
}
