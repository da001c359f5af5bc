//! Error types for GEXF decoding and encoding.

use thiserror::Error;

use crate::scalar::{ChannelError, DateError, UnknownEnumValue};

/// Coarse classification of codec failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input is not well-formed XML.
    MalformedMarkup,
    /// A required element or attribute is absent, or a value has the wrong shape.
    SchemaMismatch,
    /// A date attribute does not name a valid `YYYY-MM-DD` calendar date.
    InvalidDate,
    /// A token outside one of the closed enumerations.
    UnknownEnumValue,
    /// A color channel numeral outside [0, 255].
    ChannelOutOfRange,
}

/// Error while decoding markup into a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("malformed markup: {message}")]
    MalformedXml { message: String },

    #[error("unexpected root element {found:?}: expected <gexf> in the GEXF namespace")]
    UnexpectedRoot { found: String },

    #[error("unsupported GEXF version {found:?}: only 1.2 is supported")]
    UnsupportedVersion { found: String },

    #[error("element <{parent}> is missing required child <{element}>")]
    MissingElement {
        parent: &'static str,
        element: &'static str,
    },

    #[error("element <{element}> is missing required attribute {attribute:?}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("invalid number in <{element}> attribute {attribute:?}: {value:?}")]
    InvalidNumber {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    Enum(#[from] UnknownEnumValue),

    #[error(transparent)]
    Channel(#[from] ChannelError),
}

impl DecodeError {
    /// Returns the coarse kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::MalformedXml { .. } => ErrorKind::MalformedMarkup,
            DecodeError::UnexpectedRoot { .. }
            | DecodeError::UnsupportedVersion { .. }
            | DecodeError::MissingElement { .. }
            | DecodeError::MissingAttribute { .. }
            | DecodeError::InvalidNumber { .. } => ErrorKind::SchemaMismatch,
            DecodeError::Date(_) => ErrorKind::InvalidDate,
            DecodeError::Enum(_) => ErrorKind::UnknownEnumValue,
            DecodeError::Channel(ChannelError::OutOfRange { .. }) => ErrorKind::ChannelOutOfRange,
            DecodeError::Channel(ChannelError::NotANumber { .. }) => ErrorKind::SchemaMismatch,
        }
    }
}

/// Error while encoding a document to markup.
///
/// Encoding is structurally total; the only failure sources are the scalar
/// adapters (a document constructed with out-of-domain values) and the
/// underlying writer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("failed to write markup: {0}")]
    Write(String),

    #[error(transparent)]
    Date(#[from] DateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_kinds() {
        assert_eq!(
            DecodeError::MalformedXml {
                message: "eof".to_string()
            }
            .kind(),
            ErrorKind::MalformedMarkup
        );
        assert_eq!(
            DecodeError::MissingAttribute {
                element: "gexf",
                attribute: "version"
            }
            .kind(),
            ErrorKind::SchemaMismatch
        );
        assert_eq!(
            DecodeError::from(DateError::Pattern {
                text: "yesterday".to_string()
            })
            .kind(),
            ErrorKind::InvalidDate
        );
        assert_eq!(
            DecodeError::from(UnknownEnumValue {
                what: "edge type",
                token: "sideways".to_string()
            })
            .kind(),
            ErrorKind::UnknownEnumValue
        );
        assert_eq!(
            DecodeError::from(ChannelError::OutOfRange {
                channel: "r",
                value: 300
            })
            .kind(),
            ErrorKind::ChannelOutOfRange
        );
        assert_eq!(
            DecodeError::from(ChannelError::NotANumber {
                channel: "r",
                text: "red".to_string()
            })
            .kind(),
            ErrorKind::SchemaMismatch
        );
    }
}
