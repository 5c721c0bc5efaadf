//! Registered routes, collected before the routing tree is built.

use log::debug;

use crate::router::error::RouteError;
use crate::router::validator::validate;

/// A single registered route.
#[derive(Debug, Clone)]
pub struct RouteEntry<H> {
    /// The HTTP method, compared case-sensitively.
    pub method: String,
    /// The validated path pattern.
    pub path: String,
    /// The handler chain, run in order.
    pub handlers: Vec<H>,
}

/// Routes, fallback and middleware in registration order.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    entries: Vec<RouteEntry<H>>,
    fallback: Option<Vec<H>>,
    middleware: Vec<H>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouteTable<H> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: None,
            middleware: Vec::new(),
        }
    }

    /// Register a handler chain for `method` and `path`.
    ///
    /// Duplicates are not detected here; two patterns can collide without
    /// being equal strings, so conflicts are reported when the tree is built.
    pub fn register_route(
        &mut self,
        method: impl Into<String>,
        path: impl Into<String>,
        handlers: Vec<H>,
    ) -> Result<(), RouteError> {
        if handlers.is_empty() {
            return Err(RouteError::NilHandler);
        }

        let path = path.into();
        validate(&path)?;

        let method = method.into();
        debug!("Registered route {method} {path}");
        self.entries.push(RouteEntry {
            method,
            path,
            handlers,
        });
        Ok(())
    }

    /// Register the chain used when no route matches.
    ///
    /// Only one fallback may be registered.
    pub fn register_fallback(&mut self, handlers: Vec<H>) -> Result<(), RouteError> {
        if handlers.is_empty() {
            return Err(RouteError::NilHandler);
        }
        if self.fallback.is_some() {
            return Err(RouteError::FallbackAlreadyRegistered);
        }

        self.fallback = Some(handlers);
        Ok(())
    }

    /// Append handlers that run before every route and the fallback.
    pub fn use_middleware(&mut self, handlers: Vec<H>) -> Result<(), RouteError> {
        if handlers.is_empty() {
            return Err(RouteError::NilHandler);
        }

        self.middleware.extend(handlers);
        Ok(())
    }

    /// The registered routes.
    pub fn entries(&self) -> &[RouteEntry<H>] {
        &self.entries
    }

    /// The registered fallback chain, if any.
    pub fn fallback(&self) -> Option<&[H]> {
        self.fallback.as_deref()
    }

    /// The global middleware chain.
    pub fn middleware(&self) -> &[H] {
        &self.middleware
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no route is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
