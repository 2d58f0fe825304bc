//! Editor side — answers `Open` requests against a [`WindowHost`].
//!
//! The editor integration binds the socket at startup and runs
//! [`serve`] with its host adapter. Each connection gets its own task;
//! host access is serialized through a mutex.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::protocol::{ErrorCode, Request, Response};
use super::{IpcError, framed, recv, send};
use crate::resolver::{OpenError, ResolveStrategy, WindowHost, open_path};

/// Bind the socket, replacing a stale socket file left by a dead editor.
///
/// Fails with [`IpcError::AddrInUse`] if another process is still
/// accepting on it.
pub fn bind(socket: &Path) -> Result<UnixListener, IpcError> {
    match UnixListener::bind(socket) {
        Ok(listener) => Ok(listener),
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            if std::os::unix::net::UnixStream::connect(socket).is_ok() {
                return Err(IpcError::AddrInUse(socket.to_path_buf()));
            }
            tracing::debug!(socket = %socket.display(), "removing stale socket");
            std::fs::remove_file(socket)?;
            Ok(UnixListener::bind(socket)?)
        }
        Err(e) => Err(e.into()),
    }
}

/// Accept connections until `shutdown` is cancelled.
pub async fn serve<H>(
    listener: UnixListener,
    host: Arc<Mutex<H>>,
    strategy: ResolveStrategy,
    shutdown: CancellationToken,
) -> Result<(), IpcError>
where
    H: WindowHost + Send + 'static,
{
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::debug!("server shutting down");
                return Ok(());
            }
            accepted = listener.accept() => {
                let (stream, _) = accepted?;
                let host = Arc::clone(&host);
                let shutdown = shutdown.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        _ = shutdown.cancelled() => {}
                        result = handle_connection(stream, host, strategy) => {
                            if let Err(e) = result {
                                tracing::warn!(error = %e, "connection ended with error");
                            }
                        }
                    }
                });
            }
        }
    }
}

async fn handle_connection<H: WindowHost>(
    stream: UnixStream,
    host: Arc<Mutex<H>>,
    strategy: ResolveStrategy,
) -> Result<(), IpcError> {
    let mut transport = framed(stream);
    loop {
        let response = match recv::<Request>(&mut transport).await {
            Ok(Some(request)) => handle_request(request, &host, strategy).await,
            Ok(None) => return Ok(()),
            Err(IpcError::Decode(e)) => {
                tracing::warn!(error = %e, "undecodable request");
                Response::error("", ErrorCode::BadRequest, e)
            }
            Err(e) => return Err(e),
        };
        send(&mut transport, &response).await?;
    }
}

async fn handle_request<H: WindowHost>(
    request: Request,
    host: &Mutex<H>,
    strategy: ResolveStrategy,
) -> Response {
    match request {
        Request::Ping { id } => Response::Pong { id },
        Request::Open { id, path } => {
            let mut host = host.lock().await;
            match open_path(&mut *host, &path, strategy) {
                Ok(decision) => Response::Opened { id, decision },
                Err(OpenError::Resolve(e)) => Response::error(id, ErrorCode::InvalidPath, e),
                Err(OpenError::Host(e)) => {
                    tracing::warn!(path = %path.display(), error = %e, "host failed to open");
                    Response::error(id, ErrorCode::HostFailed, e)
                }
            }
        }
    }
}
