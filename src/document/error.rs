/// Error types for the document writer.
use crate::document::model::{ChartType, SlideHandle};
use crate::placeholder::Rect;
use thiserror::Error;

/// Result type for document writer operations.
pub type Result<T> = std::result::Result<T, WriterError>;

/// Failures reported by a document writer.
#[derive(Error, Debug)]
pub enum WriterError {
    /// Slide handle does not belong to this document
    #[error("unknown slide {0}")]
    UnknownSlide(SlideHandle),

    /// Chart geometry is negative or not finite
    #[error("invalid chart geometry {0}")]
    InvalidGeometry(Rect),

    /// Chart has no series
    #[error("chart has no series")]
    NoSeries,

    /// Series data is unusable
    #[error("series '{series}' is malformed: {reason}")]
    MalformedSeries { series: String, reason: String },

    /// Chart type cannot represent the request
    #[error("{chart_type} chart does not support {reason}")]
    Unsupported {
        chart_type: ChartType,
        reason: String,
    },

    /// XML generation error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::fmt::Error> for WriterError {
    fn from(err: std::fmt::Error) -> Self {
        WriterError::Xml(err.to_string())
    }
}

impl From<zip::result::ZipError> for WriterError {
    fn from(err: zip::result::ZipError) -> Self {
        WriterError::Zip(err.to_string())
    }
}
