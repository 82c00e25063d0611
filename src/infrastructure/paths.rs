//! Paths inside the Zellij plugin sandbox.
//!
//! The host's home directory is mounted under `/host`, so user-facing paths
//! such as `~/themes/dark.toml` must be rewritten before use.

use std::path::PathBuf;

/// Sandbox mount point of the host home directory.
pub const HOST_ROOT: &str = "/host";

/// Directory holding the plugin's trace files.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("zearch")
}

/// Location of the OTLP trace file inside [`get_data_dir`].
#[must_use]
pub fn trace_file() -> PathBuf {
    get_data_dir().join("zearch-otlp.json")
}

/// Rewrites a leading `~` to the sandbox's host mount.
///
/// ```
/// use zearch::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("/etc/zearch.toml"), "/etc/zearch.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path == "~" {
        HOST_ROOT.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{HOST_ROOT}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_forms() {
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("~/a/b"), "/host/a/b");
        assert_eq!(expand_tilde("~user/a"), "~user/a");
        assert_eq!(expand_tilde("relative/path"), "relative/path");
    }

    #[test]
    fn trace_file_lives_in_data_dir() {
        assert_eq!(
            trace_file(),
            PathBuf::from("/host/.local/share/zellij/zearch/zearch-otlp.json")
        );
    }
}
