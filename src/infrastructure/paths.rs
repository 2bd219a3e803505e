//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which
//! points at the directory Zellij was started from (usually `$HOME`).

use std::path::PathBuf;

const HOST_ROOT: &str = "/host";

/// Returns the plugin data directory, `/host/.local/share/zellij/galleria`.
///
/// Holds the trace log only; search results are never persisted.
///
/// ```
/// use galleria::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/galleria")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("galleria")
}

/// Maps a `~`-prefixed path onto the sandbox's `/host` mount.
///
/// Other paths pass through unchanged, as does `~user/...`.
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
    fn tilde_maps_to_host_mount() {
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
    }

    #[test]
    fn other_paths_pass_through() {
        assert_eq!(expand_tilde("/etc/galleria.toml"), "/etc/galleria.toml");
        assert_eq!(expand_tilde("~alice/dusk.toml"), "~alice/dusk.toml");
        assert_eq!(expand_tilde("themes/~/x"), "themes/~/x");
    }

    #[test]
    fn data_dir_lives_under_host() {
        assert!(get_data_dir().starts_with("/host"));
        assert!(get_data_dir().ends_with("galleria"));
    }
}
