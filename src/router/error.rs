//! Error types for route registration and tree construction.

use thiserror::Error;

/// Errors raised while registering routes or building the routing tree.
///
/// A failed match is not an error; it is reported as the absence of a
/// handler chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The route path is empty.
    #[error("Route path is empty")]
    EmptyPath,

    /// The route path does not start with `/`.
    #[error("Route path must start with '/': {0}")]
    MissingLeadingSlash(String),

    /// A `*` segment appears before the last segment.
    #[error("Wildcard must be the last segment of the route path: {0}")]
    WildcardNotTerminal(String),

    /// A route, fallback or middleware was registered without any handler.
    #[error("Handler chain is empty")]
    NilHandler,

    /// A fallback chain is already registered.
    #[error("Fallback handler is already registered")]
    FallbackAlreadyRegistered,

    /// Two routes for the same method resolve to the same tree position.
    #[error("Route conflict: {method} {path} is already registered")]
    Conflict {
        /// The HTTP method of the conflicting route.
        method: String,
        /// The path pattern of the conflicting route.
        path: String,
    },
}
