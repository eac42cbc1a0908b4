//! Error types for the importer.
//!
//! Every variant except the configuration and input ones is fatal for the
//! document being imported: converters never catch errors raised by their
//! descendants, so they surface unchanged at the top-level driver.

use thiserror::Error;

/// Main error type for the importer library.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The XML stream is malformed.
    #[error("XML parsing failed at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// The stream ended while elements were still open.
    #[error("Unexpected end of document inside <{element}>")]
    UnexpectedEof { element: String },

    /// A closing tag appeared with no element open.
    #[error("Unmatched closing tag at byte {position}")]
    UnmatchedEndTag { position: u64 },

    /// An element uses a namespace prefix that was never declared.
    #[error("Unbound namespace prefix '{prefix}' at byte {position}")]
    UnboundPrefix { prefix: String, position: u64 },

    /// An element expected to hold plain text contains child elements.
    #[error("Element <{element}> at byte {position} must contain only text")]
    NonTextContent { element: String, position: u64 },

    /// Element text could not be parsed into the expected type.
    #[error("Invalid value '{value}' in element <{element}> at byte {position}: {reason}")]
    InvalidValue {
        element: String,
        value: String,
        position: u64,
        reason: String,
    },

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// The document root is not an exchange format document.
    #[error("Unexpected root element <{0}>, expected VymennyFormat")]
    UnexpectedRoot(String),

    /// A converter returned without consuming the element it was given.
    #[error("Element <{element}> was not fully consumed by its converter")]
    UnconsumedElement { element: String },

    /// Database communication failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An input path cannot be imported.
    #[error("Invalid input '{0}'. Expected an .xml file or a directory containing them")]
    InvalidInput(String),
}

/// Result type alias for importer operations.
pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_display() {
        let err = ImportError::InvalidValue {
            element: "{urn:cz:isvs:ruian:schemas:CommonTypy:v1}Kod".to_string(),
            value: "abc".to_string(),
            position: 120,
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value 'abc' in element <{urn:cz:isvs:ruian:schemas:CommonTypy:v1}Kod> \
             at byte 120: invalid digit found in string"
        );
    }

    #[test]
    fn test_unexpected_eof_display() {
        let err = ImportError::UnexpectedEof {
            element: "Parcela".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected end of document inside <Parcela>");
    }

    #[test]
    fn test_missing_element_display() {
        let err = ImportError::MissingElement {
            element: "Id".to_string(),
            context: "Parcela".to_string(),
        };
        assert!(err.to_string().contains("Id"));
        assert!(err.to_string().contains("Parcela"));
    }
}
