//! Route registration, tree construction and matching.
//!
//! Routes are collected in a [`RouteTable`], compiled once into an immutable
//! [`RoutingTree`] holding one segment tree per HTTP method, and matched
//! against without locking. Literal children of each tree node are looked up
//! through a ternary search tree ([`Tst`]).
//!
//! Path patterns are made of literal segments, parameter segments (`:name`)
//! and an optional trailing wildcard (`*`). At every node a literal child is
//! preferred over the parameter child, which is preferred over the wildcard.

mod error;
mod matcher;
mod table;
mod tree;
mod tst;
mod validator;

use std::sync::Arc;

pub use error::RouteError;
pub use matcher::{Params, RouteMatch};
pub use table::{RouteEntry, RouteTable};
pub use tree::{MethodTree, NodeId, NodeKind, RouteNode, RoutingTree};
pub use tst::Tst;
pub use validator::{split_path, split_pattern, validate, Segment, PARAM_SENTINEL, WILDCARD};

/// A router owned by the caller.
///
/// Routes are registered during setup; [`Router::build_routing_tree`] then
/// compiles them. Until the first successful build nothing matches.
#[derive(Debug)]
pub struct Router<H> {
    table: RouteTable<H>,
    tree: Option<Arc<RoutingTree<H>>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Create a router with no routes.
    pub fn new() -> Self {
        Self {
            table: RouteTable::new(),
            tree: None,
        }
    }

    /// Register a handler chain for `method` and `path`.
    pub fn register_route(
        &mut self,
        method: impl Into<String>,
        path: impl Into<String>,
        handlers: Vec<H>,
    ) -> Result<(), RouteError> {
        self.table.register_route(method, path, handlers)
    }

    /// Register the chain used when no route matches.
    pub fn register_fallback(&mut self, handlers: Vec<H>) -> Result<(), RouteError> {
        self.table.register_fallback(handlers)
    }

    /// Append handlers that run before every route and the fallback.
    pub fn use_middleware(&mut self, handlers: Vec<H>) -> Result<(), RouteError> {
        self.table.use_middleware(handlers)
    }

    /// The registered routes.
    pub fn table(&self) -> &RouteTable<H> {
        &self.table
    }

    /// The routing tree from the last successful build.
    pub fn routing_tree(&self) -> Option<Arc<RoutingTree<H>>> {
        self.tree.clone()
    }

    /// Match a request against the last built tree.
    pub fn match_route(&self, method: &str, path: &str) -> Option<RouteMatch<'_, H>> {
        self.tree.as_deref()?.match_route(method, path)
    }
}

impl<H: Clone> Router<H> {
    /// Compile the registered routes into a fresh routing tree.
    ///
    /// On success the new tree replaces the previous one; tasks still holding
    /// the old `Arc` keep matching against it. On a conflict the previous
    /// tree, if any, stays in place.
    pub fn build_routing_tree(&mut self) -> Result<Arc<RoutingTree<H>>, RouteError> {
        let tree = Arc::new(RoutingTree::build(&self.table)?);
        self.tree = Some(tree.clone());
        Ok(tree)
    }
}
