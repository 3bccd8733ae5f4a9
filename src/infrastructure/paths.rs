//! Paths inside the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`, which points at the cwd of
//! the last focused terminal (usually the user's home directory).

use std::path::PathBuf;

/// Directory holding the trace file: `~/.local/share/zellij/zpix` on the host.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zpix")
}

/// Maps a user-facing `~` path (e.g. the `theme_file` option) to its sandbox
/// location under `/host`.
///
/// ```
/// use zpix::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/nord.toml"), "/host/themes/nord.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/zpix.toml"), "/etc/zpix.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_under_host_share() {
        assert_eq!(get_data_dir(), PathBuf::from("/host/.local/share/zellij/zpix"));
    }

    #[test]
    fn only_leading_tilde_is_expanded() {
        assert_eq!(expand_tilde("~/a/~b"), "/host/a/~b");
        assert_eq!(expand_tilde("~user/theme.toml"), "~user/theme.toml");
        assert_eq!(expand_tilde("relative/theme.toml"), "relative/theme.toml");
    }
}
