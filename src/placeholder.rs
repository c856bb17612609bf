//! Named insertion regions discovered on a slide template.
//!
//! A [`Placeholder`] is the rectangle a template author reserves for a chart. The
//! binder places charts at exactly this rectangle, so everything here is kept in
//! layout units (inches) without rounding.

use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// An axis-aligned rectangle in layout units (inches).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub w: f64,
    /// Height
    pub h: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// True when every coordinate is finite and the size is non-negative.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        [self.x, self.y, self.w, self.h].iter().all(|v| v.is_finite())
            && self.x >= 0.0
            && self.y >= 0.0
            && self.w >= 0.0
            && self.h >= 0.0
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}in, {:.3}in, {:.3}in x {:.3}in)",
            self.x, self.y, self.w, self.h
        )
    }
}

/// A named region on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Identifier, unique within one slide
    pub id: String,
    /// Bounds in layout units
    pub rect: Rect,
}

impl Placeholder {
    /// Create a new placeholder.
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// Find a placeholder by identifier.
///
/// Returns `None` when the slide does not carry the region; callers decide whether
/// that is an error. [`PlaceholderIndex::get`] is this lookup over a checked list.
pub fn lookup<'a>(placeholders: &'a [Placeholder], id: &str) -> Option<&'a Placeholder> {
    placeholders.iter().find(|p| p.id == id)
}

/// A placeholder id that appears more than once on one slide.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("duplicate placeholder id '{0}'")]
pub struct DuplicateId(pub String);

/// One slide's placeholders, with identifiers known to be unique.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderIndex {
    placeholders: Vec<Placeholder>,
}

impl PlaceholderIndex {
    /// Build an index, failing with the first repeated identifier.
    pub fn new(placeholders: Vec<Placeholder>) -> Result<Self, DuplicateId> {
        let mut seen = HashSet::with_capacity(placeholders.len());
        if let Some(repeated) = placeholders.iter().find(|p| !seen.insert(p.id.as_str())) {
            return Err(DuplicateId(repeated.id.clone()));
        }
        Ok(Self { placeholders })
    }

    /// Look up a placeholder by identifier.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&Placeholder> {
        lookup(&self.placeholders, id)
    }

    /// Placeholders in document order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Placeholder> {
        self.placeholders.iter()
    }

    /// Number of placeholders.
    #[inline]
    pub fn len(&self) -> usize {
        self.placeholders.len()
    }

    /// True if the slide has no placeholders.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placeholders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Placeholder> {
        vec![
            Placeholder::new("donut-chart", Rect::new(0.5, 1.0, 4.0, 3.0)),
            Placeholder::new("trend-chart", Rect::new(5.0, 1.0, 4.5, 3.0)),
        ]
    }

    #[test]
    fn test_lookup_found_and_missing() {
        let placeholders = sample();
        assert_eq!(
            lookup(&placeholders, "trend-chart").map(|p| p.rect.x),
            Some(5.0)
        );
        assert!(lookup(&placeholders, "bar-chart").is_none());
    }

    #[test]
    fn test_index_rejects_duplicate_ids() {
        let mut placeholders = sample();
        placeholders.push(Placeholder::new("donut-chart", Rect::default()));
        let err = PlaceholderIndex::new(placeholders).unwrap_err();
        assert_eq!(err, DuplicateId("donut-chart".into()));
        assert_eq!(err.to_string(), "duplicate placeholder id 'donut-chart'");
    }

    #[test]
    fn test_index_lookup() {
        let index = PlaceholderIndex::new(sample()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("donut-chart").unwrap().rect.w, 4.0);
        assert!(index.get("nope").is_none());
        for placeholder in index.iter() {
            assert_eq!(
                index.get(&placeholder.id),
                lookup(&sample(), &placeholder.id)
            );
        }
    }

    #[test]
    fn test_rect_well_formed() {
        assert!(Rect::new(0.0, 0.0, 0.0, 0.0).is_well_formed());
        assert!(!Rect::new(-1.0, 0.0, 1.0, 1.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, f64::NAN, 1.0).is_well_formed());
    }
}
