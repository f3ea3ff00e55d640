//! Profile enumeration under a server directory.

use std::path::{Path, PathBuf};

/// Directory prefix of profile directories under a server directory.
const PROFILE_PREFIX: &str = "settings_";

/// One settings profile under a server directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Profile name with the `settings_` prefix stripped.
    pub name: String,
    /// Full profile directory path.
    pub dir: PathBuf,
}

/// Lists the profiles under `<dat_root>/<server>/`, sorted by directory
/// name. The launcher's `cache` directory is excluded. A missing server
/// directory yields an empty list.
pub fn list_profiles(dat_root: &Path, server: &str) -> Vec<Profile> {
    let server_dir = dat_root.join(server);
    let Ok(entries) = std::fs::read_dir(&server_dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.is_dir()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(PROFILE_PREFIX) && n != "cache")
        })
        .collect();
    dirs.sort();

    dirs.into_iter()
        .filter_map(|dir| {
            let name = dir
                .file_name()?
                .to_str()?
                .strip_prefix(PROFILE_PREFIX)?
                .to_string();
            Some(Profile { name, dir })
        })
        .collect()
}

/// Resolves the directory of a named profile under a server directory.
pub fn profile_dir(dat_root: &Path, server: &str, profile_name: &str) -> PathBuf {
    dat_root
        .join(server)
        .join(format!("{PROFILE_PREFIX}{profile_name}"))
}
