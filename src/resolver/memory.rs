//! In-memory window host.
//!
//! Mirrors editor state in plain vectors. Integrations that receive
//! window state as messages can keep a `MemoryHost` in sync and hand it
//! to the IPC server; tests use it as a stand-in editor.

use std::path::{Path, PathBuf};

use super::host::{HostError, WindowHost};
use super::paths::{PathComparator, PathSemantics};
use super::{WindowId, WindowSnapshot};

/// [`WindowHost`] over owned window snapshots.
#[derive(Debug, Default)]
pub struct MemoryHost {
    windows: Vec<WindowSnapshot>,
    active: Option<WindowId>,
    next_id: u64,
    semantics: PathSemantics,
    doomed: Option<WindowId>,
    new_window_error: Option<String>,
    dirs: Vec<PathBuf>,
}

impl MemoryHost {
    /// Empty host comparing paths with `semantics`.
    pub fn new(semantics: PathSemantics) -> Self {
        Self {
            semantics,
            ..Self::default()
        }
    }

    /// Append a window with the given folders and views. The first window
    /// added becomes active.
    pub fn add_window(&mut self, folders: &[&str], views: &[&str]) -> WindowId {
        let id = self.allocate();
        let mut win = WindowSnapshot::new(id);
        win.folders = folders.iter().map(PathBuf::from).collect();
        win.views = views.iter().map(PathBuf::from).collect();
        self.windows.push(win);
        if self.active.is_none() {
            self.active = Some(id);
        }
        id
    }

    /// Focus `window`, or clear focus with `None`.
    pub fn set_active(&mut self, window: Option<WindowId>) {
        self.active = window;
    }

    /// Remove `window`. Focus moves to the first remaining window.
    /// Returns `false` if it was not open.
    pub fn close_window(&mut self, window: WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != window);
        if self.active == Some(window) {
            self.active = self.windows.first().map(|w| w.id);
        }
        self.windows.len() != before
    }

    /// Close `window` the next time an action targets it, so the action
    /// sees a stale snapshot.
    pub fn close_on_next_action(&mut self, window: WindowId) {
        self.doomed = Some(window);
    }

    /// Make every subsequent `new_window` call fail with `message`.
    pub fn fail_new_windows(&mut self, message: impl Into<String>) {
        self.new_window_error = Some(message.into());
    }

    /// Record `path` as a directory. Nothing else is treated as one;
    /// the real filesystem is never consulted.
    pub fn mark_dir(&mut self, path: impl Into<PathBuf>) {
        self.dirs.push(path.into());
    }

    /// Whether `window` is open and has a view of `path`.
    pub fn has_view(&self, window: WindowId, path: &Path) -> bool {
        self.windows
            .iter()
            .find(|w| w.id == window)
            .is_some_and(|w| w.views.iter().any(|v| self.semantics.same(v, path)))
    }

    fn allocate(&mut self) -> WindowId {
        self.next_id += 1;
        WindowId(self.next_id)
    }

    fn window_mut(&mut self, window: WindowId) -> Result<&mut WindowSnapshot, HostError> {
        if self.doomed == Some(window) {
            self.doomed = None;
            self.close_window(window);
        }
        self.windows
            .iter_mut()
            .find(|w| w.id == window)
            .ok_or(HostError::WindowGone(window))
    }
}

impl WindowHost for MemoryHost {
    fn windows(&self) -> Vec<WindowSnapshot> {
        self.windows.clone()
    }

    fn active_window(&self) -> Option<WindowId> {
        self.active
    }

    fn path_semantics(&self) -> PathSemantics {
        self.semantics
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.iter().any(|dir| self.semantics.same(dir, path))
    }

    fn focus_view(&mut self, window: WindowId, path: &Path) -> Result<(), HostError> {
        let semantics = self.semantics;
        let win = self.window_mut(window)?;
        // Most recently focused view goes last.
        let pos = win
            .views
            .iter()
            .position(|v| semantics.same(v, path))
            .ok_or_else(|| HostError::Failed(format!("no view of {}", path.display())))?;
        let view = win.views.remove(pos);
        win.views.push(view);
        Ok(())
    }

    fn focus_window(&mut self, window: WindowId) -> Result<(), HostError> {
        self.window_mut(window)?;
        self.active = Some(window);
        Ok(())
    }

    fn open_file(&mut self, window: WindowId, path: &Path) -> Result<(), HostError> {
        let semantics = self.semantics;
        let win = self.window_mut(window)?;
        if !win.views.iter().any(|v| semantics.same(v, path)) {
            win.views.push(path.to_path_buf());
        }
        Ok(())
    }

    fn new_window(&mut self, folder: &Path) -> Result<WindowId, HostError> {
        if let Some(message) = &self.new_window_error {
            return Err(HostError::Failed(message.clone()));
        }
        let id = self.allocate();
        self.windows.push(WindowSnapshot::new(id).with_folder(folder));
        self.active = Some(id);
        Ok(id)
    }
}
