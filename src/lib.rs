//! A lightweight HTTP router backed by a ternary search tree.
//!
//! Routes are registered as `(method, pattern, handlers)` triples and compiled
//! once into one segment tree per method. Each tree node finds its literal
//! children through a ternary search tree, so matching costs time proportional
//! to the request path rather than to the number of routes.
//!
//! # Features
//!
//! - Literal segments, named parameters (`/users/:id`) and a trailing
//!   wildcard (`/static/*`)
//! - Literal > parameter > wildcard precedence with backtracking
//! - Conflicting routes rejected when the tree is built
//! - Optional fallback chain and global middleware
//! - A small tokio HTTP/1.x server that dispatches through the router
//!
//! # Examples
//!
//! ## Matching with the router alone
//!
//! ```
//! use tst_router::Router;
//!
//! let mut router = Router::new();
//! router.register_route("GET", "/articles/:id", vec!["show_article"]).unwrap();
//! router.register_route("GET", "/static/*", vec!["serve_file"]).unwrap();
//! router.build_routing_tree().unwrap();
//!
//! let matched = router.match_route("GET", "/articles/42").unwrap();
//! assert_eq!(matched.handlers, &["show_article"]);
//! assert_eq!(matched.params.get("id"), Some("42"));
//!
//! let matched = router.match_route("GET", "/static/css/site.css").unwrap();
//! assert_eq!(matched.params.get("*"), Some("css/site.css"));
//!
//! assert!(router.match_route("POST", "/articles/42").is_none());
//! ```
//!
//! ## Conflicts
//!
//! ```
//! use tst_router::{RouteError, Router};
//!
//! let mut router = Router::new();
//! router.register_route("GET", "/users/:id", vec![1]).unwrap();
//! router.register_route("GET", "/users/:name", vec![2]).unwrap();
//!
//! match router.build_routing_tree() {
//!     Err(RouteError::Conflict { method, path }) => println!("{method} {path} collides"),
//!     other => panic!("expected a conflict, got {other:?}"),
//! }
//! ```
//!
//! ## Serving
//!
//! ```no_run
//! use tst_router::{Context, HttpResponse, HttpServer, ServerConfig, StatusCode};
//!
//! # async fn run() -> Result<(), tst_router::ServerError> {
//! let server = HttpServer::new(ServerConfig::default());
//! server
//!     .get("/hello/:name", |ctx: Context| async move {
//!         let name = ctx.param("name").unwrap_or("world").to_string();
//!         Ok(HttpResponse::text(StatusCode::Ok, format!("Hello, {name}!")))
//!     })
//!     .await?;
//! server.start().await
//! # }
//! ```
//!
//! See the `demos` directory for a complete server.

// Export the router module
pub mod router;

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{parse_request, Error as ParserError, HttpRequest, HttpVersion, Method};
pub use router::{Params, RouteError, RouteMatch, Router, RoutingTree, Tst};
pub use server::{
    handler, Context, Error as ServerError, Handler, HttpResponse, HttpServer, ServerConfig,
    StatusCode,
};
