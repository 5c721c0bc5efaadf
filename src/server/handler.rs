//! Request handlers and the per-request context that chains them.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::parser::HttpRequest;
use crate::router::Params;
use crate::server::{Error, HttpResponse};

/// Type alias for a boxed future that returns a Result<HttpResponse, Error>.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// A request handler. Routes, middleware and the fallback are chains of these.
pub type Handler = Arc<dyn Fn(Context) -> HandlerFuture + Send + Sync>;

/// Wrap an async function into a [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    Arc::new(move |ctx: Context| -> HandlerFuture { Box::pin(f(ctx)) })
}

/// The request being handled, its route parameters, and the position in the
/// handler chain.
///
/// A middleware hands control to the rest of the chain with
/// [`Context::next`] and may inspect or replace the response it returns.
pub struct Context {
    request: HttpRequest,
    params: Params,
    chain: Arc<[Handler]>,
    index: usize,
}

impl Context {
    pub(crate) fn new(request: HttpRequest, params: Params, chain: Arc<[Handler]>) -> Self {
        Self {
            request,
            params,
            chain,
            index: 0,
        }
    }

    /// The parsed request.
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// The value captured for a route parameter, e.g. `id` for `/users/:id`.
    ///
    /// The wildcard capture is available under `*`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    /// All captured route parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// A query string parameter.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.request.get_query_param(key)
    }

    /// A request header, looked up case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.request.get_header(name)
    }

    /// The raw request body.
    pub fn body(&self) -> &[u8] {
        &self.request.body
    }

    /// Decode the request body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(self.request.json()?)
    }

    /// Run the next handler of the chain and return its response.
    ///
    /// Calling this from the last handler of a chain is an error: it fails
    /// with [`Error::ChainExhausted`], which the server answers with a 500.
    pub async fn next(mut self) -> Result<HttpResponse, Error> {
        self.index += 1;
        self.run().await
    }

    pub(crate) async fn run(self) -> Result<HttpResponse, Error> {
        let Some(handler) = self.chain.get(self.index).cloned() else {
            return Err(Error::ChainExhausted(self.request.path));
        };
        handler(self).await
    }
}
