//! The window-selection rule.
//!
//! Priority order, first match wins:
//! 1. a window with an open view of the path,
//! 2. a window with a folder that contains the path,
//! 3. a new window rooted at the path's parent directory.
//!
//! Ties go to the window enumerated first. The host controls that order
//! (see [`super::prioritize_active`]).

use std::path::{Path, PathBuf};

use super::paths::{PathComparator, PathSemantics};
use super::{Decision, ResolverError, WindowSnapshot};

/// How step 2 picks among several windows with a containing folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveStrategy {
    /// First qualifying window in enumeration order.
    #[default]
    FirstMatch,
    /// Window whose containing folder is deepest. Equal depths fall back
    /// to enumeration order.
    DeepestFolder,
}

/// Resolve `path` against `windows` with first-match folder selection.
pub fn resolve(
    path: &Path,
    windows: &[WindowSnapshot],
    paths: &dyn PathComparator,
) -> Result<Decision, ResolverError> {
    check_absolute(path)?;

    if let Some(decision) = find_view(path, windows, paths) {
        return Ok(decision);
    }

    let owner = windows.iter().find(|win| {
        win.folders
            .iter()
            .any(|folder| paths.contains(folder, path))
    });

    Ok(match owner {
        Some(win) => Decision::FocusWindow { window: win.id },
        None => new_window_for(path),
    })
}

/// Resolve `path`, preferring the window with the deepest containing folder.
///
/// Depth ranking needs segment counts, so this takes the built-in
/// [`PathSemantics`] rather than an arbitrary comparator.
pub fn resolve_deepest(
    path: &Path,
    windows: &[WindowSnapshot],
    semantics: PathSemantics,
) -> Result<Decision, ResolverError> {
    check_absolute(path)?;

    if let Some(decision) = find_view(path, windows, &semantics) {
        return Ok(decision);
    }

    let mut best: Option<(usize, &WindowSnapshot)> = None;
    for win in windows {
        let depth = win
            .folders
            .iter()
            .filter_map(|folder| semantics.ancestor_depth(folder, path))
            .max();
        if let Some(depth) = depth {
            // Strictly greater keeps the earlier window on ties.
            if best.is_none_or(|(d, _)| depth > d) {
                best = Some((depth, win));
            }
        }
    }

    Ok(match best {
        Some((_, win)) => Decision::FocusWindow { window: win.id },
        None => new_window_for(path),
    })
}

/// Dispatch on `strategy`.
pub fn resolve_with(
    strategy: ResolveStrategy,
    path: &Path,
    windows: &[WindowSnapshot],
    semantics: PathSemantics,
) -> Result<Decision, ResolverError> {
    match strategy {
        ResolveStrategy::FirstMatch => resolve(path, windows, &semantics),
        ResolveStrategy::DeepestFolder => resolve_deepest(path, windows, semantics),
    }
}

fn check_absolute(path: &Path) -> Result<(), ResolverError> {
    if path.as_os_str().is_empty() || !path.is_absolute() {
        return Err(ResolverError::InvalidPath(path.to_path_buf()));
    }
    Ok(())
}

fn find_view(
    path: &Path,
    windows: &[WindowSnapshot],
    paths: &dyn PathComparator,
) -> Option<Decision> {
    windows
        .iter()
        .find(|win| win.views.iter().any(|view| paths.same(view, path)))
        .map(|win| Decision::FocusView {
            window: win.id,
            path: path.to_path_buf(),
        })
}

/// Fallback decision: a new window rooted at the parent of `path`.
///
/// Directories get their own parent too. The root has no parent and is
/// used as-is.
pub(super) fn new_window_for(path: &Path) -> Decision {
    let folder = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(path));
    Decision::OpenNewWindow { folder }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::WindowId;

    const PATHS: PathSemantics = PathSemantics::CaseSensitive;

    fn win(id: u64) -> WindowSnapshot {
        WindowSnapshot::new(WindowId(id))
    }

    #[test]
    fn exact_view_beats_containing_folder() {
        let windows = vec![
            win(1).with_folder("/a/b"),
            win(2).with_view("/a/b/c.txt"),
        ];
        let decision = resolve(Path::new("/a/b/c.txt"), &windows, &PATHS).unwrap();
        assert_eq!(
            decision,
            Decision::FocusView {
                window: WindowId(2),
                path: PathBuf::from("/a/b/c.txt"),
            }
        );
    }

    #[test]
    fn containing_folder_focuses_window() {
        let windows = vec![win(7).with_folder("/a/b")];
        let decision = resolve(Path::new("/a/b/c.txt"), &windows, &PATHS).unwrap();
        assert_eq!(decision, Decision::FocusWindow { window: WindowId(7) });
    }

    #[test]
    fn nested_deep_beneath_folder() {
        let windows = vec![win(1).with_folder("/a")];
        let decision = resolve(Path::new("/a/b/c/d/e.txt"), &windows, &PATHS).unwrap();
        assert_eq!(decision, Decision::FocusWindow { window: WindowId(1) });
    }

    #[test]
    fn partial_segment_is_not_an_ancestor() {
        let windows = vec![win(1).with_folder("/a/bx")];
        let decision = resolve(Path::new("/a/b/c.txt"), &windows, &PATHS).unwrap();
        assert_eq!(
            decision,
            Decision::OpenNewWindow {
                folder: PathBuf::from("/a/b"),
            }
        );
    }

    #[test]
    fn no_match_opens_new_window_at_parent() {
        let windows = vec![win(1).with_folder("/p/q")];
        let decision = resolve(Path::new("/x/y/z.txt"), &windows, &PATHS).unwrap();
        assert_eq!(
            decision,
            Decision::OpenNewWindow {
                folder: PathBuf::from("/x/y"),
            }
        );
    }

    #[test]
    fn empty_window_list_opens_new_window() {
        let decision = resolve(Path::new("/x/y/z.txt"), &[], &PATHS).unwrap();
        assert_eq!(
            decision,
            Decision::OpenNewWindow {
                folder: PathBuf::from("/x/y"),
            }
        );
    }

    #[test]
    fn repeated_resolution_is_identical() {
        let windows = vec![
            win(1).with_folder("/srv"),
            win(2).with_folder("/home/u").with_view("/home/u/notes.md"),
        ];
        let path = Path::new("/home/u/todo.md");
        let first = resolve(path, &windows, &PATHS).unwrap();
        let second = resolve(path, &windows, &PATHS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn first_listed_window_wins_among_folder_matches() {
        let a = win(1).with_folder("/home/u");
        let b = win(2).with_folder("/home/u/proj");
        let path = Path::new("/home/u/proj/lib.rs");

        let forward = resolve(path, &[a.clone(), b.clone()], &PATHS).unwrap();
        assert_eq!(forward, Decision::FocusWindow { window: WindowId(1) });

        let reversed = resolve(path, &[b, a], &PATHS).unwrap();
        assert_eq!(reversed, Decision::FocusWindow { window: WindowId(2) });
    }

    #[test]
    fn first_listed_window_wins_among_view_matches() {
        let windows = vec![win(3).with_view("/a/x.txt"), win(4).with_view("/a/x.txt")];
        let decision = resolve(Path::new("/a/x.txt"), &windows, &PATHS).unwrap();
        assert_eq!(decision.window(), Some(WindowId(3)));
    }

    #[test]
    fn view_in_folderless_window_is_found() {
        let windows = vec![
            win(0).with_view("/home/u/proj/a.py"),
            win(1).with_folder("/home/u/proj"),
        ];
        let decision = resolve(Path::new("/home/u/proj/a.py"), &windows, &PATHS).unwrap();
        assert_eq!(
            decision,
            Decision::FocusView {
                window: WindowId(0),
                path: PathBuf::from("/home/u/proj/a.py"),
            }
        );
    }

    #[test]
    fn unrelated_folder_falls_back_to_parent() {
        let windows = vec![win(0).with_folder("/home/u/other")];
        let decision = resolve(Path::new("/home/u/proj/b.py"), &windows, &PATHS).unwrap();
        assert_eq!(
            decision,
            Decision::OpenNewWindow {
                folder: PathBuf::from("/home/u/proj"),
            }
        );
    }

    #[test]
    fn folder_equal_to_path_qualifies() {
        let windows = vec![win(5).with_folder("/work/repo")];
        let decision = resolve(Path::new("/work/repo"), &windows, &PATHS).unwrap();
        assert_eq!(decision, Decision::FocusWindow { window: WindowId(5) });
    }

    #[test]
    fn directory_path_uses_its_own_parent() {
        let decision = resolve(Path::new("/work/repo/"), &[], &PATHS).unwrap();
        assert_eq!(
            decision,
            Decision::OpenNewWindow {
                folder: PathBuf::from("/work"),
            }
        );
    }

    #[test]
    fn root_path_opens_at_root() {
        let decision = resolve(Path::new("/"), &[], &PATHS).unwrap();
        assert_eq!(
            decision,
            Decision::OpenNewWindow {
                folder: PathBuf::from("/"),
            }
        );
    }

    #[test]
    fn normalized_parent_segment_escapes_folder() {
        let windows = vec![win(1).with_folder("/home/u/proj")];
        let path = crate::resolver::normalize_lexically(Path::new("/home/u/proj/../x.txt"));
        let decision = resolve(&path, &windows, &PATHS).unwrap();
        assert_eq!(
            decision,
            Decision::OpenNewWindow {
                folder: PathBuf::from("/home/u"),
            }
        );
    }

    #[test]
    fn relative_path_is_rejected() {
        let result = resolve(Path::new("src/main.rs"), &[], &PATHS);
        assert_eq!(
            result,
            Err(ResolverError::InvalidPath(PathBuf::from("src/main.rs")))
        );
    }

    #[test]
    fn empty_path_is_rejected() {
        let result = resolve(Path::new(""), &[win(1).with_folder("/")], &PATHS);
        assert!(matches!(result, Err(ResolverError::InvalidPath(_))));
    }

    #[test]
    fn deepest_strategy_prefers_longest_ancestor() {
        let windows = vec![
            win(1).with_folder("/home/u"),
            win(2).with_folder("/srv").with_folder("/home/u/proj"),
        ];
        let path = Path::new("/home/u/proj/lib.rs");

        let first = resolve_with(ResolveStrategy::FirstMatch, path, &windows, PATHS).unwrap();
        assert_eq!(first, Decision::FocusWindow { window: WindowId(1) });

        let deepest = resolve_with(ResolveStrategy::DeepestFolder, path, &windows, PATHS).unwrap();
        assert_eq!(deepest, Decision::FocusWindow { window: WindowId(2) });
    }

    #[test]
    fn deepest_strategy_ties_keep_enumeration_order() {
        let windows = vec![win(8).with_folder("/a/b"), win(9).with_folder("/a/b/")];
        let decision = resolve_deepest(Path::new("/a/b/c.txt"), &windows, PATHS).unwrap();
        assert_eq!(decision, Decision::FocusWindow { window: WindowId(8) });
    }

    #[test]
    fn deepest_strategy_still_prefers_views() {
        let windows = vec![win(1).with_folder("/a/b"), win(2).with_view("/a/b/c.txt")];
        let decision = resolve_deepest(Path::new("/a/b/c.txt"), &windows, PATHS).unwrap();
        assert_eq!(decision.window(), Some(WindowId(2)));
    }
}
