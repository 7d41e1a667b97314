//! Error types for building and persisting decks.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while writing or reading a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write the presentation file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML writing or parsing error.
    #[error("XML error: {0}")]
    XmlError(String),

    /// A part the package must contain could not be found.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// The package structure does not describe a deck.
    #[error("Invalid presentation package: {0}")]
    InvalidPackage(String),
}
