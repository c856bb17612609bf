//! XML text helpers shared by the markup reader and the package writer.

mod escape;

pub use escape::{escape_xml, resolve_entity, unescape_xml};
