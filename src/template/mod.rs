//! Template parser collaborator.
//!
//! A template is one slide's source markup. Parsing it yields the static
//! content to draw on the slide and the named placeholder regions charts are
//! bound to. [`MarkupParser`] reads positioned XHTML; any other source can be
//! plugged in by implementing [`TemplateParser`].

mod markup;

pub use markup::MarkupParser;

use crate::document::SlideContent;
use crate::placeholder::{DuplicateId, Placeholder};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Locator for one slide template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateRef {
    /// Identifier used by chart directory entries
    pub id: String,
    /// Markup source path
    pub path: PathBuf,
}

impl TemplateRef {
    /// Reference a template by path; the id is the file name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { id, path }
    }

    /// Reference a template by path under an explicit id.
    pub fn with_id(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }

    /// Markup source path.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Result of parsing one template.
#[derive(Debug, Clone, Default)]
pub struct ParsedTemplate {
    /// Static slide content
    pub content: SlideContent,
    /// Placeholder regions in document order
    pub placeholders: Vec<Placeholder>,
}

/// Turns a template into slide content and placeholder regions.
pub trait TemplateParser {
    /// Parse one template.
    fn parse(&self, template: &TemplateRef) -> Result<ParsedTemplate, ParseError>;
}

/// Template parsing failures.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Template could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Markup is not well-formed
    #[error("malformed markup: {0}")]
    Xml(String),

    /// Placeholder element without an `id`
    #[error("placeholder <{element}> has no id")]
    MissingId { element: String },

    /// Placeholder geometry is missing, malformed or negative
    #[error("placeholder '{id}' has invalid geometry: {reason}")]
    InvalidGeometry { id: String, reason: String },

    /// Two placeholders share an id
    #[error("duplicate placeholder id '{0}'")]
    DuplicatePlaceholder(String),

    /// Body size does not match the document layout
    #[error(
        "body is {found_w}in x {found_h}in but the layout is {expected_w}in x {expected_h}in"
    )]
    LayoutMismatch {
        expected_w: f64,
        expected_h: f64,
        found_w: f64,
        found_h: f64,
    },
}

impl From<DuplicateId> for ParseError {
    fn from(err: DuplicateId) -> Self {
        ParseError::DuplicatePlaceholder(err.0)
    }
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        ParseError::Xml(err.to_string())
    }
}
