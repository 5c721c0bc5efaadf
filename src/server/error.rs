//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::Error as ParserError;
use crate::router::RouteError;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// Route registration or routing tree construction failed.
    #[error("Routing error: {0}")]
    Route(#[from] RouteError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// No route and no fallback matched the request.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A handler called `next()` after the last handler of its chain.
    #[error("Handler chain exhausted for path: {0}")]
    ChainExhausted(String),

    /// The server configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
