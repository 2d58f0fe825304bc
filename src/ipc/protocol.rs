//! Wire messages.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::resolver::Decision;

/// Client → editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Show `path` in the right window.
    Open { id: String, path: PathBuf },
    /// Liveness check.
    Ping { id: String },
}

impl Request {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::Open {
            id: new_id(),
            path: path.into(),
        }
    }

    pub fn ping() -> Self {
        Self::Ping { id: new_id() }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Open { id, .. } | Self::Ping { id } => id,
        }
    }
}

/// Editor → client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// The decision that was carried out.
    Opened { id: String, decision: Decision },
    Pong { id: String },
    /// `id` is empty when the request could not be decoded.
    Error {
        id: String,
        code: ErrorCode,
        message: String,
    },
}

impl Response {
    pub fn id(&self) -> &str {
        match self {
            Self::Opened { id, .. } | Self::Pong { id } | Self::Error { id, .. } => id,
        }
    }

    pub fn error(id: impl Into<String>, code: ErrorCode, message: impl fmt::Display) -> Self {
        Self::Error {
            id: id.into(),
            code,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidPath,
    HostFailed,
    BadRequest,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidPath => "invalid_path",
            Self::HostFailed => "host_failed",
            Self::BadRequest => "bad_request",
        })
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
