//! Crate-level error types.
//!
//! Every fatal error carries enough context (template id, placeholder id and
//! chart kind) to find the offending input without reading internals.

use crate::chart::{ChartKind, ValidationError};
use crate::document::WriterError;
use crate::template::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal report errors.
#[derive(Error, Debug)]
pub enum Error {
    /// A template could not be parsed
    #[error("template '{template}': {source}")]
    Parse {
        template: String,
        #[source]
        source: ParseError,
    },

    /// A chart spec is internally inconsistent
    #[error("{kind} chart '{placeholder}' on template '{template}': {source}")]
    Validation {
        template: String,
        placeholder: String,
        kind: ChartKind,
        #[source]
        source: ValidationError,
    },

    /// The document writer rejected a chart
    #[error("cannot bind {kind} chart '{placeholder}' on template '{template}': {source}")]
    Bind {
        template: String,
        placeholder: String,
        kind: ChartKind,
        #[source]
        source: WriterError,
    },

    /// The document writer rejected a slide
    #[error("cannot add slide for template '{template}': {source}")]
    Slide {
        template: String,
        #[source]
        source: WriterError,
    },

    /// The document could not be created
    #[error("cannot create document: {0}")]
    Document(#[source] WriterError),

    /// The document could not be written
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: WriterError,
    },

    /// The report configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Short, stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse",
            Self::Validation { .. } => "validation",
            Self::Bind { .. } | Self::Slide { .. } => "bind",
            Self::Document(_) | Self::Io { .. } => "io",
            Self::Config(_) => "config",
        }
    }
}

/// Configuration errors, detected before any slide is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is not valid YAML or does not match the schema
    #[error("malformed config: {0}")]
    Yaml(String),

    /// Two templates share an id
    #[error("duplicate template id '{0}'")]
    DuplicateTemplate(String),

    /// Two chart entries target the same placeholder
    #[error("duplicate chart for placeholder '{placeholder}' on template '{template}'")]
    DuplicateChart {
        template: String,
        placeholder: String,
    },

    /// A chart entry names a template that is not in the template list
    #[error("chart '{placeholder}' names unknown template '{template}'")]
    UnknownTemplate {
        template: String,
        placeholder: String,
    },

    /// No output path in the configuration or on the command line
    #[error("no output path given")]
    MissingOutput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_and_context() {
        let err = Error::Validation {
            template: "slide2.html".into(),
            placeholder: "donut".into(),
            kind: ChartKind::Pie,
            source: ValidationError::EmptySeries,
        };
        assert_eq!(err.kind(), "validation");
        let message = err.to_string();
        assert!(message.contains("slide2.html"));
        assert!(message.contains("donut"));
        assert!(message.contains("pie"));

        let err = Error::from(ConfigError::MissingOutput);
        assert_eq!(err.kind(), "config");
    }
}
