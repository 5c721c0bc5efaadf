//! HTTP parser module.
//!
//! Turns the bytes of a single HTTP/1.x request into an [`HttpRequest`] whose
//! path is ready to be matched by the router.

mod error;
mod request;
mod request_line;
mod tests;

// Re-export public items
pub use error::Error;
pub use request::{parse_request, HttpRequest};
pub use request_line::{HttpVersion, Method, RequestLine};
