//! HTTP server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinSet;
use log::{debug, error, info, warn};

use crate::parser::{parse_request, Method};
use crate::router::{Router, RoutingTree};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::{handler, Context, Handler};
use crate::server::response::{HttpResponse, StatusCode};

/// An HTTP server dispatching requests through a compiled routing tree.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The registered routes and the last compiled tree.
    pub router: Arc<RwLock<Router<Handler>>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            router: Arc::new(RwLock::new(Router::new())),
        }
    }

    /// Register a handler chain for `method` and `path`.
    ///
    /// Routes only take effect once the routing tree is (re)built.
    pub async fn add_route(
        &self,
        method: Method,
        path: impl Into<String>,
        handlers: Vec<Handler>,
    ) -> Result<(), Error> {
        self.router
            .write()
            .await
            .register_route(method.as_str(), path, handlers)?;
        Ok(())
    }

    /// Register a single async function for `method` and `path`.
    pub async fn route<F, Fut>(&self, method: Method, path: impl Into<String>, f: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.add_route(method, path, vec![handler(f)]).await
    }

    /// Register a GET route.
    pub async fn get<F, Fut>(&self, path: impl Into<String>, f: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.route(Method::GET, path, f).await
    }

    /// Register a POST route.
    pub async fn post<F, Fut>(&self, path: impl Into<String>, f: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.route(Method::POST, path, f).await
    }

    /// Register a PUT route.
    pub async fn put<F, Fut>(&self, path: impl Into<String>, f: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.route(Method::PUT, path, f).await
    }

    /// Register a PATCH route.
    pub async fn patch<F, Fut>(&self, path: impl Into<String>, f: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.route(Method::PATCH, path, f).await
    }

    /// Register a DELETE route.
    pub async fn delete<F, Fut>(&self, path: impl Into<String>, f: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.route(Method::DELETE, path, f).await
    }

    /// Register the chain run when no route matches.
    pub async fn fallback(&self, handlers: Vec<Handler>) -> Result<(), Error> {
        self.router.write().await.register_fallback(handlers)?;
        Ok(())
    }

    /// Register handlers run before every route and the fallback.
    pub async fn use_middleware(&self, handlers: Vec<Handler>) -> Result<(), Error> {
        self.router.write().await.use_middleware(handlers)?;
        Ok(())
    }

    /// Compile the registered routes and swap in the new tree.
    ///
    /// Connections accepted afterwards use the new tree; connections already
    /// in flight finish on the one they started with.
    pub async fn build_routing_tree(&self) -> Result<Arc<RoutingTree<Handler>>, Error> {
        Ok(self.router.write().await.build_routing_tree()?)
    }

    /// The tree from the last successful build.
    pub async fn routing_tree(&self) -> Option<Arc<RoutingTree<Handler>>> {
        self.router.read().await.routing_tree()
    }

    /// Log the registered endpoints.
    async fn display_server_info(&self) {
        let router = self.router.read().await;
        let table = router.table();

        info!("Registered endpoints:");
        for entry in table.entries() {
            info!("  {method} {path}", method = entry.method, path = entry.path);
        }
        if table.fallback().is_some() {
            info!("  fallback handler registered");
        }
        if !table.middleware().is_empty() {
            info!("  {count} middleware handlers", count = table.middleware().len());
        }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: Arc<mpsc::Sender<()>>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Handle a new connection.
    fn handle_new_connection(
        mut socket: tokio::net::TcpStream,
        addr: SocketAddr,
        semaphore: Arc<tokio::sync::Semaphore>,
        tree: Arc<RoutingTree<Handler>>,
        read_buffer_size: usize,
        tasks: &mut JoinSet<()>,
    ) {
        tasks.spawn(async move {
            // The permit is released when the task completes
            let _permit = match semaphore.try_acquire_owned() {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Connection limit reached, rejecting connection from {addr}");
                    let response = HttpResponse::text(
                        StatusCode::ServiceUnavailable,
                        "Server is at capacity, please try again later",
                    );
                    let _ = socket.write_all(&response.to_bytes()).await;
                    return;
                }
            };

            match Self::handle_connection(&mut socket, &tree, read_buffer_size).await {
                Ok(()) => {}
                Err(Error::NotFound(path)) => debug!("No route for {path} from {addr}"),
                Err(e) => error!("Error handling connection from {addr}: {e}"),
            }
        });
    }

    /// Handle connection errors.
    async fn handle_connection_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        // For other errors, wait a bit before retrying
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let _ = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        info!("Server shutdown complete");
    }

    /// Build the routing tree, then accept connections until Ctrl+C.
    ///
    /// A route conflict aborts startup before the socket is bound.
    pub async fn start(&self) -> Result<(), Error> {
        self.config.validate()?;
        let startup_tree = match self.build_routing_tree().await {
            Ok(tree) => tree,
            Err(e) => {
                error!("Refusing to start: {e}");
                return Err(e);
            }
        };
        self.display_server_info().await;

        let listener = self.setup_listener().await?;
        let semaphore = Arc::new(tokio::sync::Semaphore::new(self.config.max_connections));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let shutdown_tx = Arc::new(shutdown_tx);
        let mut tasks = JoinSet::new();

        Self::setup_ctrl_c_handler(shutdown_tx.clone(), &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            let tree = self
                                .routing_tree()
                                .await
                                .unwrap_or_else(|| startup_tree.clone());
                            Self::handle_new_connection(
                                socket,
                                addr,
                                semaphore.clone(),
                                tree,
                                self.config.read_buffer_size,
                                &mut tasks,
                            );
                        }
                        Err(e) => {
                            if Self::handle_connection_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Handle a single connection: read one request, dispatch it, write the
    /// response.
    ///
    /// Unmatched requests get a 404 unless a fallback is compiled in.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        tree: &RoutingTree<Handler>,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let mut buf = vec![0; read_buffer_size];

        let n = socket.read(&mut buf).await?;
        if n == 0 {
            return Ok(()); // Connection closed
        }

        let request = match parse_request(&buf[..n]) {
            Ok(req) => req,
            Err(e) => {
                let response = HttpResponse::text(
                    StatusCode::BadRequest,
                    format!("Error parsing request: {e}"),
                );
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::ParseError(e));
            }
        };

        let Some(matched) = tree.match_route(request.method.as_str(), &request.path) else {
            let response = HttpResponse::text(
                StatusCode::NotFound,
                format!("Not found: {path}", path = request.path),
            );
            socket.write_all(&response.to_bytes()).await?;
            return Err(Error::NotFound(request.path));
        };

        if matched.is_fallback {
            debug!(
                "No route for {method} {path}, running fallback",
                method = request.method,
                path = request.path
            );
        }

        let ctx = Context::new(request, matched.params, Arc::from(matched.handlers));
        let response = match ctx.run().await {
            Ok(resp) => resp,
            Err(e) => {
                let response = HttpResponse::text(
                    StatusCode::InternalServerError,
                    format!("Internal server error: {e}"),
                );
                socket.write_all(&response.to_bytes()).await?;
                return Err(e);
            }
        };

        socket.write_all(&response.to_bytes()).await?;
        Ok(())
    }
}
