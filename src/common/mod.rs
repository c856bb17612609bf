//! Utilities shared across the crate.

pub mod unit;
pub mod xml;
