//! Chart specification model.
//!
//! A [`ChartSpec`] is what a report author declares for one placeholder: a
//! [`ChartKind`], one or more [`Series`], and a [`StyleConfig`] bag. Specs are
//! validated once, up front, before any slide is produced.
//!
//! # Example
//!
//! ```rust
//! use chartdeck::chart::{ChartKind, ChartSpec, Series};
//!
//! let spec = ChartSpec::new(
//!     ChartKind::Pie,
//!     vec![Series::new("share", ["yes", "no"], vec![60.0, 40.0])],
//! )
//! .validate()?;
//! assert_eq!(spec.category_count(), 2);
//! # Ok::<(), chartdeck::chart::ValidationError>(())
//! ```

pub mod spec;
pub mod style;
pub mod types;

pub use spec::{ChartSpec, Series, ValidationError};
pub use style::{AxisTitles, LegendStyle, StyleConfig, ValueAxisTitles};
pub use types::{BarOrientation, ChartKind, LegendPosition};
