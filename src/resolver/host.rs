//! WindowHost trait — the editor side of window resolution.
//!
//! Editor integrations implement [`WindowHost`] to expose their open
//! windows and carry out a [`Decision`]. [`open_path`] ties the pure
//! resolver to a live host.

use std::path::Path;

use super::decision::{new_window_for, resolve_with};
use super::paths::PathSemantics;
use super::{Decision, ResolveStrategy, ResolverError, WindowId, WindowSnapshot};

/// Failure reported by a host action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The window closed between snapshot and action.
    #[error("{0} is no longer open")]
    WindowGone(WindowId),
    /// Any other host-side failure.
    #[error("host action failed: {0}")]
    Failed(String),
}

/// Error from [`open_path`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpenError {
    #[error(transparent)]
    Resolve(#[from] ResolverError),
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Exposes editor window state and window actions.
///
/// Snapshots are taken once per [`open_path`] call; actions may observe a
/// newer state and report [`HostError::WindowGone`].
pub trait WindowHost {
    /// Current windows in the host's enumeration order.
    fn windows(&self) -> Vec<WindowSnapshot>;

    /// The focused window, if any.
    fn active_window(&self) -> Option<WindowId>;

    /// How this host compares paths.
    fn path_semantics(&self) -> PathSemantics {
        PathSemantics::native()
    }

    /// Whether `path` names a directory. Directories are added to new
    /// windows as project folders instead of being opened as views.
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// Bring an existing view of `path` to the front of `window`.
    fn focus_view(&mut self, window: WindowId, path: &Path) -> Result<(), HostError>;

    /// Raise `window` and give it focus.
    fn focus_window(&mut self, window: WindowId) -> Result<(), HostError>;

    /// Open `path` as a view in `window`.
    fn open_file(&mut self, window: WindowId, path: &Path) -> Result<(), HostError>;

    /// Create a window whose project folder is `folder`.
    fn new_window(&mut self, folder: &Path) -> Result<WindowId, HostError>;
}

/// Move the active window to the front, keeping the others in order.
pub fn prioritize_active(windows: &mut [WindowSnapshot], active: Option<WindowId>) {
    let Some(active) = active else { return };
    if let Some(pos) = windows.iter().position(|win| win.id == active) {
        windows[..=pos].rotate_right(1);
    }
}

/// Resolve `path` against `host` and carry out the decision.
///
/// Returns the decision that was actually executed. When the chosen
/// window disappears before it can be focused, falls back to a new
/// window at the path's parent.
///
/// Directories never match views, are not opened as views, and a new
/// window for one is rooted at the directory itself.
pub fn open_path<H: WindowHost + ?Sized>(
    host: &mut H,
    path: &Path,
    strategy: ResolveStrategy,
) -> Result<Decision, OpenError> {
    let is_dir = host.is_dir(path);

    let mut windows = host.windows();
    prioritize_active(&mut windows, host.active_window());
    if is_dir {
        for win in &mut windows {
            win.views.clear();
        }
    }

    let mut decision = resolve_with(strategy, path, &windows, host.path_semantics())?;
    if is_dir {
        decision = root_new_window_at(decision, path);
    }
    tracing::debug!(path = %path.display(), is_dir, %decision, "resolved");

    match execute(host, &decision, path, is_dir) {
        Ok(()) => Ok(decision),
        Err(HostError::WindowGone(window)) => {
            tracing::warn!(%window, path = %path.display(), "window closed, opening a new one");
            let mut fallback = new_window_for(path);
            if is_dir {
                fallback = root_new_window_at(fallback, path);
            }
            execute(host, &fallback, path, is_dir)?;
            Ok(fallback)
        }
        Err(e) => Err(e.into()),
    }
}

fn root_new_window_at(decision: Decision, dir: &Path) -> Decision {
    match decision {
        Decision::OpenNewWindow { .. } => Decision::OpenNewWindow {
            folder: dir.to_path_buf(),
        },
        other => other,
    }
}

fn execute<H: WindowHost + ?Sized>(
    host: &mut H,
    decision: &Decision,
    path: &Path,
    is_dir: bool,
) -> Result<(), HostError> {
    match decision {
        Decision::FocusView { window, path: view } => {
            host.focus_view(*window, view)?;
            host.focus_window(*window)
        }
        Decision::FocusWindow { window } => {
            if !is_dir {
                host.open_file(*window, path)?;
            }
            host.focus_window(*window)
        }
        Decision::OpenNewWindow { folder } => {
            let window = host.new_window(folder)?;
            tracing::info!(%window, folder = %folder.display(), "opened new window");
            if is_dir {
                return Ok(());
            }
            host.open_file(window, path)
        }
    }
}
