//! Window resolution — which editor window should show a path.
//!
//! [`resolve`] is a pure function over a snapshot of open windows. The
//! [`WindowHost`] trait is the seam an editor integration implements so
//! [`open_path`] can carry the resulting [`Decision`] out.

mod decision;
mod host;
mod memory;
mod paths;

pub use decision::{ResolveStrategy, resolve, resolve_deepest, resolve_with};
pub use host::{HostError, OpenError, WindowHost, open_path, prioritize_active};
pub use memory::MemoryHost;
pub use paths::{PathComparator, PathSemantics, absolutize, normalize_lexically};

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Opaque identifier of an editor window, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Read-only view of one window at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSnapshot {
    pub id: WindowId,
    /// Project folders, in the order the host reports them.
    pub folders: Vec<PathBuf>,
    /// Absolute paths of files open as views in this window.
    pub views: Vec<PathBuf>,
}

impl WindowSnapshot {
    /// A window with no folders and no views.
    pub fn new(id: WindowId) -> Self {
        Self {
            id,
            folders: Vec::new(),
            views: Vec::new(),
        }
    }

    /// Append a project folder.
    pub fn with_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folders.push(folder.into());
        self
    }

    /// Append an open view.
    pub fn with_view(mut self, view: impl Into<PathBuf>) -> Self {
        self.views.push(view.into());
        self
    }
}

/// Where a path should be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decision {
    /// `window` already has a view of `path`.
    FocusView { window: WindowId, path: PathBuf },
    /// No view exists, but one of `window`'s folders contains the path.
    FocusWindow { window: WindowId },
    /// No window qualifies; open one rooted at `folder`.
    OpenNewWindow { folder: PathBuf },
}

impl Decision {
    /// The existing window this decision targets, if any.
    pub fn window(&self) -> Option<WindowId> {
        match self {
            Self::FocusView { window, .. } | Self::FocusWindow { window } => Some(*window),
            Self::OpenNewWindow { .. } => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FocusView { window, path } => {
                write!(f, "focus view {} in {window}", path.display())
            }
            Self::FocusWindow { window } => write!(f, "focus {window}"),
            Self::OpenNewWindow { folder } => {
                write!(f, "open new window at {}", folder.display())
            }
        }
    }
}

/// Input contract violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolverError {
    /// The path was empty or not absolute.
    #[error("invalid path {0:?}: expected an absolute path")]
    InvalidPath(PathBuf),
}
