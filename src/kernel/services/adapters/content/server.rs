use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::sync::watch;

use super::{mime, ContentError, ContentRouter};
use crate::kernel::services::ports::ServerConfig;

/// How long blocked asset reads may hold up runtime shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

struct ServeState {
    router: Arc<ContentRouter>,
    request_delay: Duration,
    read_timeout: Duration,
}

/// A file ready to be sent.
#[derive(Debug)]
struct Served {
    content_type: Option<&'static str>,
    body: Vec<u8>,
}

impl Served {
    fn file(path: &Path, body: Vec<u8>) -> Self {
        Self {
            content_type: mime::guess(path),
            body,
        }
    }
}

pub struct ContentServer {
    config: ServerConfig,
    router: Arc<ContentRouter>,
}

impl ContentServer {
    pub fn new(config: ServerConfig, router: ContentRouter) -> Self {
        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// Binds the listener and starts serving on a dedicated thread.
    pub fn spawn(self) -> io::Result<ContentServerHandle> {
        let listener = std::net::TcpListener::bind(self.config.bind_addr())?;
        listener.set_nonblocking(true)?;
        let local_addr = listener.local_addr()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let state = Arc::new(ServeState {
            router: self.router,
            request_delay: Duration::from_millis(self.config.request_delay_ms),
            read_timeout: Duration::from_millis(self.config.read_timeout_ms),
        });

        let thread = std::thread::Builder::new()
            .name("melange-content".to_string())
            .spawn(move || {
                if let Err(e) = runtime.block_on(serve(listener, state, shutdown_rx)) {
                    tracing::error!(error = %e, "content server stopped");
                }
                runtime.shutdown_timeout(SHUTDOWN_GRACE);
            })?;

        tracing::info!(addr = %local_addr, "content server listening");
        Ok(ContentServerHandle {
            local_addr,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        })
    }
}

/// Stops the server when shut down or dropped.
pub struct ContentServerHandle {
    local_addr: SocketAddr,
    shutdown: Option<watch::Sender<bool>>,
    thread: Option<JoinHandle<()>>,
}

impl ContentServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(true);
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("content server thread panicked");
            }
        }
    }
}

impl Drop for ContentServerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn serve(
    listener: std::net::TcpListener,
    state: Arc<ServeState>,
    mut shutdown: watch::Receiver<bool>,
) -> io::Result<()> {
    let listener = tokio::net::TcpListener::from_std(listener)?;
    // Routing is ours (first match wins), so every request lands in the
    // fallback.
    let app = Router::new().fallback(handle).with_state(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await?;
    tracing::info!("content server shut down");
    Ok(())
}

async fn handle(State(state): State<Arc<ServeState>>, method: Method, uri: Uri) -> Response {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    let head_only = method == Method::HEAD;
    if method != Method::GET && !head_only {
        tracing::debug!(method = %method, uri = %target, status = 405, "request");
        return reply(StatusCode::METHOD_NOT_ALLOWED, None, Vec::new(), false);
    }

    if !state.request_delay.is_zero() {
        tokio::time::sleep(state.request_delay).await;
    }

    let router = Arc::clone(&state.router);
    let lookup = respond(router, target.clone(), state.read_timeout);
    let response = match isolate(lookup).await {
        Ok(served) => reply(StatusCode::OK, served.content_type, served.body, head_only),
        Err(e) => {
            if e.status() == 500 {
                tracing::error!(uri = %target, error = %e, "request failed");
            } else {
                tracing::debug!(uri = %target, error = %e, "request not served");
            }
            reply(status_code(&e), None, Vec::new(), head_only)
        }
    };

    tracing::debug!(method = %method, uri = %target, status = response.status().as_u16(), "request");
    response
}

/// Runs handler work in its own task so a panic becomes a `HandlerFault`
/// instead of taking the connection down.
async fn isolate<F>(work: F) -> Result<Served, ContentError>
where
    F: Future<Output = Result<Served, ContentError>> + Send + 'static,
{
    match tokio::spawn(work).await {
        Ok(result) => result,
        Err(join) => Err(ContentError::HandlerFault(if join.is_panic() {
            "handler panicked".to_string()
        } else {
            join.to_string()
        })),
    }
}

async fn respond(
    router: Arc<ContentRouter>,
    target: String,
    read_timeout: Duration,
) -> Result<Served, ContentError> {
    let path: PathBuf = router.resolve(&target)?;
    let read = tokio::time::timeout(read_timeout, tokio::fs::read(&path))
        .await
        .map_err(|_| ContentError::HandlerFault(format!("read timed out: {}", path.display())))?;
    match read {
        Ok(body) => Ok(Served::file(&path, body)),
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "asset read failed");
            Err(ContentError::AssetNotFound(path))
        }
    }
}

fn status_code(err: &ContentError) -> StatusCode {
    StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn reply(
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Vec<u8>,
    head_only: bool,
) -> Response {
    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_LENGTH, body.len())
        .header(header::CONNECTION, "close");
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    if status == StatusCode::METHOD_NOT_ALLOWED {
        builder = builder.header(header::ALLOW, "GET, HEAD");
    }
    let body = if head_only {
        Body::empty()
    } else {
        Body::from(body)
    };
    builder
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/content/server.rs"]
mod tests;
