//! Path handling inside the Zellij plugin sandbox.
//!
//! With full disk access the host filesystem is mounted at `/host`, rooted at
//! the directory Zellij was started from (normally the user's home).

use std::path::PathBuf;

/// Where the host filesystem is visible from inside the sandbox.
pub const HOST_ROOT: &str = "/host";

/// Plugin data directory: `~/.local/share/zellij/cinefind` on the host.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/cinefind")
}

/// Maps a leading `~` onto the host mount.
///
/// ```
/// use cinefind::infrastructure::paths::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}
