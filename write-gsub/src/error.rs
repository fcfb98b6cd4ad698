//! Errors that occur during writing

use crate::validate::ValidationReport;

/// An error occured while writing this table
#[derive(Debug)]
pub enum Error {
    ValidationFailed(ValidationReport),
    /// A subtable was placed too far from its parent for its offset field.
    OffsetOverflow,
}

impl From<ValidationReport> for Error {
    fn from(report: ValidationReport) -> Self {
        Error::ValidationFailed(report)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ValidationFailed(report) => std::fmt::Display::fmt(report, f),
            Error::OffsetOverflow => f.write_str("A subtable offset does not fit in 16 bits"),
        }
    }
}

impl std::error::Error for Error {}
