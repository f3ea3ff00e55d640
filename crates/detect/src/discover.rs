//! Installation discovery: probes candidate prefixes for launcher state.

use std::path::{Path, PathBuf};

use crate::candidates::expand_path;

/// One discovered launcher installation.
///
/// `logs` always exists at discovery time; a candidate without a log
/// directory is dropped entirely. `dat_root` is best-effort and may be
/// absent even for a kept candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    /// Expanded candidate prefix this installation was found under.
    pub root: PathBuf,
    /// Launcher log directory.
    pub logs: PathBuf,
    /// Settings DAT root, when one of the known layouts exists.
    pub dat_root: Option<PathBuf>,
}

/// Relative sub-paths probed for the launcher log directory, in order.
const LOGS_SUBPATHS: &[&[&str]] = &[
    &["AppData", "Roaming", "EVE Online", "logs"],
    &[".local", "share", "EVE Online", "logs"],
    &["Library", "Application Support", "EVE Online", "logs"],
    &["EVE Online", "logs"],
    &["logs"],
];

/// Relative sub-paths probed for the settings DAT root, in order.
const DAT_SUBPATHS: &[&[&str]] = &[
    &["AppData", "Local", "CCP", "EVE"],
    &["Local", "CCP", "EVE"],
    &["CCP", "EVE"],
    &[".local", "share", "CCP", "EVE"],
    &["EVE Online", "AppData", "Local", "CCP", "EVE"],
];

/// Probes each candidate prefix and returns the usable installations.
///
/// For every candidate the first existing logs sub-path and the first
/// existing DAT sub-path are kept. Output order follows candidate order.
pub fn discover(candidate_roots: &[String]) -> Vec<Installation> {
    let mut found = Vec::new();

    for candidate in candidate_roots {
        let base = expand_path(candidate);
        let Some(logs) = first_existing_dir(&base, LOGS_SUBPATHS) else {
            tracing::debug!(candidate = %base.display(), "no logs directory, skipping");
            continue;
        };
        let dat_root = first_existing_dir(&base, DAT_SUBPATHS);

        tracing::info!(
            root = %base.display(),
            logs = %logs.display(),
            dat_root = ?dat_root,
            "installation found"
        );

        found.push(Installation {
            root: base,
            logs,
            dat_root,
        });
    }

    found
}

/// Returns the first sub-path under `base` that exists as a directory.
fn first_existing_dir(base: &Path, subpaths: &[&[&str]]) -> Option<PathBuf> {
    for parts in subpaths {
        let mut path = base.to_path_buf();
        for part in *parts {
            path.push(part);
        }
        if path.is_dir() {
            return Some(path);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn keeps_candidate_with_windows_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let logs = tmp.path().join("AppData/Roaming/EVE Online/logs");
        let dat = tmp.path().join("AppData/Local/CCP/EVE");
        fs::create_dir_all(&logs).unwrap();
        fs::create_dir_all(&dat).unwrap();

        let found = discover(&[tmp.path().display().to_string()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].logs, logs);
        assert_eq!(found[0].dat_root.as_deref(), Some(dat.as_path()));
    }

    #[test]
    fn bare_logs_form_matches_last() {
        let tmp = tempfile::tempdir().unwrap();
        let logs = tmp.path().join("logs");
        fs::create_dir_all(&logs).unwrap();

        let found = discover(&[tmp.path().display().to_string()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].logs, logs);
        assert_eq!(found[0].dat_root, None);
    }

    #[test]
    fn earlier_logs_form_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let roaming = tmp.path().join("AppData/Roaming/EVE Online/logs");
        let bare = tmp.path().join("logs");
        fs::create_dir_all(&roaming).unwrap();
        fs::create_dir_all(&bare).unwrap();

        let found = discover(&[tmp.path().display().to_string()]);
        assert_eq!(found[0].logs, roaming);
    }

    #[test]
    fn candidate_without_logs_is_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        // DAT root alone does not keep the candidate.
        fs::create_dir_all(tmp.path().join("CCP/EVE")).unwrap();

        let found = discover(&[tmp.path().display().to_string()]);
        assert!(found.is_empty());
    }

    #[test]
    fn logs_file_is_not_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("logs"), b"not a dir").unwrap();

        assert!(discover(&[tmp.path().display().to_string()]).is_empty());
    }

    #[test]
    fn output_follows_candidate_order() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        fs::create_dir_all(a.path().join("logs")).unwrap();
        fs::create_dir_all(b.path().join("logs")).unwrap();

        let found = discover(&[
            b.path().display().to_string(),
            a.path().display().to_string(),
        ]);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].root, b.path());
        assert_eq!(found[1].root, a.path());
    }
}
