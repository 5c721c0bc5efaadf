//! HTTP server built on the router.
//!
//! The server compiles its routes into a [`RoutingTree`](crate::router::RoutingTree)
//! when it starts and hands every connection its own reference to that tree,
//! so requests are matched without locking.

mod config;
mod error;
mod handler;
mod http_server;
mod response;

// Re-export public items
pub use config::ServerConfig;
pub use error::Error;
pub use handler::{handler, Context, Handler, HandlerFuture};
pub use http_server::HttpServer;
pub use response::{HttpResponse, StatusCode};
