//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur while parsing a request.
#[derive(Debug, Error)]
pub enum Error {
    /// The request is empty.
    #[error("Empty request")]
    EmptyRequest,

    /// The request head is not valid UTF-8.
    #[error("Request head is not valid UTF-8")]
    InvalidEncoding,

    /// The request line does not have exactly three parts.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The method token is not one the parser accepts.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The request target is not an origin-form path.
    #[error("Invalid HTTP path")]
    InvalidPath,

    /// The protocol version is not supported.
    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// A header line has no `:` separator.
    #[error("Invalid header format: {0}")]
    InvalidHeaderFormat(String),

    /// A required header is missing.
    #[error("Required header is missing: {0}")]
    MissingHeader(String),

    /// The body could not be decoded as JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}
