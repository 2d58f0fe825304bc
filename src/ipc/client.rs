//! Client side — used by the `openmate` command.

use std::path::{Path, PathBuf};

use tokio::net::UnixStream;

use super::protocol::{ErrorCode, Request, Response};
use super::{IpcError, Transport, framed, recv, send};
use crate::resolver::Decision;

/// A connection to the editor's socket.
pub struct Client {
    transport: Transport,
}

impl Client {
    pub async fn connect(socket: &Path) -> Result<Self, IpcError> {
        let stream = UnixStream::connect(socket)
            .await
            .map_err(|source| IpcError::Connect {
                path: socket.to_path_buf(),
                source,
            })?;
        Ok(Self {
            transport: framed(stream),
        })
    }

    /// Ask the editor to show `path`; returns the decision it carried out.
    pub async fn open(&mut self, path: &Path) -> Result<Decision, IpcError> {
        match self.roundtrip(Request::open(path)).await? {
            Response::Opened { decision, .. } => Ok(decision),
            _ => Err(IpcError::Unexpected("open")),
        }
    }

    pub async fn ping(&mut self) -> Result<(), IpcError> {
        match self.roundtrip(Request::ping()).await? {
            Response::Pong { .. } => Ok(()),
            _ => Err(IpcError::Unexpected("ping")),
        }
    }

    async fn roundtrip(&mut self, request: Request) -> Result<Response, IpcError> {
        send(&mut self.transport, &request).await?;
        let response: Response = recv(&mut self.transport).await?.ok_or(IpcError::Closed)?;

        // The server answers an undecodable frame with an empty id.
        let undecodable = matches!(
            &response,
            Response::Error { id, code: ErrorCode::BadRequest, .. } if id.is_empty()
        );
        if !undecodable && response.id() != request.id() {
            return Err(IpcError::IdMismatch {
                expected: request.id().to_string(),
                got: response.id().to_string(),
            });
        }
        if let Response::Error { code, message, .. } = response {
            return Err(IpcError::Remote { code, message });
        }
        Ok(response)
    }
}

/// Result of forwarding one path.
#[derive(Debug)]
pub struct ForwardOutcome {
    pub path: PathBuf,
    pub result: Result<Decision, IpcError>,
}

/// Forward each path over its own connection, in order.
///
/// A failure for one path does not stop the others. No retries.
pub async fn forward(socket: &Path, paths: &[PathBuf]) -> Vec<ForwardOutcome> {
    let mut outcomes = Vec::with_capacity(paths.len());
    for path in paths {
        let result = forward_one(socket, path).await;
        match &result {
            Ok(decision) => tracing::info!(path = %path.display(), %decision, "forwarded"),
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "forward failed"),
        }
        outcomes.push(ForwardOutcome {
            path: path.clone(),
            result,
        });
    }
    outcomes
}

async fn forward_one(socket: &Path, path: &Path) -> Result<Decision, IpcError> {
    let mut client = Client::connect(socket).await?;
    client.open(path).await
}
