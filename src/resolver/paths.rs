//! Path comparison — equality and ancestry on path-segment boundaries.
//!
//! The resolver never compares raw strings. Hosts pick the semantics of
//! their filesystem (or supply their own [`PathComparator`]).

use std::io;
use std::path::{Component, Path, PathBuf};

/// Path comparison capability supplied by the host.
pub trait PathComparator {
    /// Whether `a` and `b` name the same path.
    fn same(&self, a: &Path, b: &Path) -> bool;

    /// Whether `folder` is `path` itself or one of its ancestors.
    fn contains(&self, folder: &Path, path: &Path) -> bool;
}

/// Built-in comparison semantics.
///
/// Both variants compare by [`Component`], which normalizes separators,
/// repeated and trailing separators, and interior `.` segments. `..` is
/// kept as-is; resolving it is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathSemantics {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

impl PathSemantics {
    /// Semantics of the platform this binary was built for.
    pub fn native() -> Self {
        if cfg!(any(windows, target_os = "macos")) {
            Self::CaseInsensitive
        } else {
            Self::CaseSensitive
        }
    }

    fn component_eq(self, a: Component<'_>, b: Component<'_>) -> bool {
        match self {
            Self::CaseSensitive => a == b,
            Self::CaseInsensitive => {
                a.as_os_str().to_string_lossy().to_lowercase()
                    == b.as_os_str().to_string_lossy().to_lowercase()
            }
        }
    }

    /// Number of segments in `folder` when it contains `path`.
    ///
    /// Used to rank ancestors by depth.
    pub fn ancestor_depth(self, folder: &Path, path: &Path) -> Option<usize> {
        let mut depth = 0;
        let mut rest = path.components();
        for segment in folder.components() {
            match rest.next() {
                Some(other) if self.component_eq(segment, other) => depth += 1,
                _ => return None,
            }
        }
        Some(depth)
    }
}

impl PathComparator for PathSemantics {
    fn same(&self, a: &Path, b: &Path) -> bool {
        let mut left = a.components();
        let mut right = b.components();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) if self.component_eq(x, y) => continue,
                _ => return false,
            }
        }
    }

    fn contains(&self, folder: &Path, path: &Path) -> bool {
        self.ancestor_depth(folder, path).is_some()
    }
}

/// Drop `.` segments and fold `..` into its parent, without touching
/// the filesystem. `..` above the root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

/// Make `path` absolute against the current directory and normalize it
/// lexically. Symlinks are not resolved.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    Ok(normalize_lexically(&std::path::absolute(path)?))
}
