//! IPC between the `openmate` command and the running editor.
//!
//! Unix domain socket, length-delimited frames, msgpack payloads
//! (`rmp_serde::to_vec_named`). One response per request, in order.

pub mod client;
pub mod protocol;
pub mod server;

use std::path::PathBuf;

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::net::UnixStream;
use tokio_util::codec::{Framed, LengthDelimitedCodec};

use protocol::ErrorCode;

/// Largest frame either side accepts.
pub const MAX_FRAME_LEN: usize = 1 << 20;

/// A framed socket connection.
pub type Transport = Framed<UnixStream, LengthDelimitedCodec>;

/// IPC error.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("cannot connect to {}: {source}", .path.display())]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("socket {} is already served by a running editor", .0.display())]
    AddrInUse(PathBuf),
    #[error("socket I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode message: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("failed to decode message: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
    #[error("connection closed before a response arrived")]
    Closed,
    #[error("editor rejected request ({code}): {message}")]
    Remote { code: ErrorCode, message: String },
    #[error("response id {got:?} does not match request {expected:?}")]
    IdMismatch { expected: String, got: String },
    #[error("unexpected response to {0} request")]
    Unexpected(&'static str),
}

/// Wrap a connected stream in the frame codec.
pub fn framed(stream: UnixStream) -> Transport {
    let codec = LengthDelimitedCodec::builder()
        .max_frame_length(MAX_FRAME_LEN)
        .new_codec();
    Framed::new(stream, codec)
}

/// Encode `msg` and write it as one frame.
pub async fn send<T: Serialize>(transport: &mut Transport, msg: &T) -> Result<(), IpcError> {
    let payload = rmp_serde::to_vec_named(msg)?;
    transport.send(Bytes::from(payload)).await?;
    Ok(())
}

/// Read and decode the next frame. `Ok(None)` on clean EOF.
///
/// A frame that fails to decode yields [`IpcError::Decode`]; the
/// connection is still usable afterwards.
pub async fn recv<T: DeserializeOwned>(transport: &mut Transport) -> Result<Option<T>, IpcError> {
    match transport.next().await {
        None => Ok(None),
        Some(frame) => {
            let frame = frame?;
            Ok(Some(rmp_serde::from_slice(&frame)?))
        }
    }
}
