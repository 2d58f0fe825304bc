//! Socket location.
//!
//! Precedence: `--socket`, then `OPENMATE_SOCKET` (both handled by clap),
//! then `$XDG_RUNTIME_DIR/openmate.sock`, then `/tmp/openmate-<uid>.sock`.

use std::path::PathBuf;

/// Environment variable naming the socket path.
pub const SOCKET_ENV: &str = "OPENMATE_SOCKET";

const SOCKET_NAME: &str = "openmate.sock";

/// Resolve the socket path from an explicit override or the environment.
pub fn socket_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        default_socket_path(std::env::var_os("XDG_RUNTIME_DIR").map(PathBuf::from))
    })
}

fn default_socket_path(runtime_dir: Option<PathBuf>) -> PathBuf {
    match runtime_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        Some(dir) => dir.join(SOCKET_NAME),
        None => {
            let uid = nix::unistd::getuid();
            std::env::temp_dir().join(format!("openmate-{uid}.sock"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = socket_path(Some(PathBuf::from("/run/custom.sock")));
        assert_eq!(path, PathBuf::from("/run/custom.sock"));
    }

    #[test]
    fn runtime_dir_is_used_when_set() {
        let path = default_socket_path(Some(PathBuf::from("/run/user/1000")));
        assert_eq!(path, PathBuf::from("/run/user/1000/openmate.sock"));
    }

    #[test]
    fn empty_runtime_dir_falls_back_to_temp() {
        let path = default_socket_path(Some(PathBuf::new()));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("openmate-"), "unexpected socket name {name}");
        assert!(name.ends_with(".sock"));
    }
}
