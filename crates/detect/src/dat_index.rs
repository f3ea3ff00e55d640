//! Filename index over a settings DAT root.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Builds a basename → path index of settings files under a DAT root.
///
/// Matches `core_user_*.dat` and `core_char_*.dat` recursively,
/// case-sensitively. An absent or non-directory root yields an empty
/// index. Traversal visits entries in name order per directory, so a
/// duplicate basename deeper in the tree deterministically overwrites an
/// earlier one (accepted ambiguity, not an error).
pub fn build_dat_index(dat_root: Option<&Path>) -> BTreeMap<String, PathBuf> {
    let mut index = BTreeMap::new();
    let Some(root) = dat_root else {
        return index;
    };
    if !root.is_dir() {
        return index;
    }

    walk(root, &mut index);
    tracing::debug!(root = %root.display(), files = index.len(), "DAT index built");
    index
}

fn walk(dir: &Path, index: &mut BTreeMap<String, PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            walk(&path, index);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && is_settings_dat(name)
        {
            index.insert(name.to_string(), path);
        }
    }
}

/// Matches the two settings-file naming patterns.
fn is_settings_dat(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(".dat") else {
        return false;
    };
    stem.starts_with("core_user_") || stem.starts_with("core_char_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn matches_settings_patterns_only() {
        assert!(is_settings_dat("core_user_1000.dat"));
        assert!(is_settings_dat("core_char_111.dat"));
        // '*' may match empty, like the glob it mirrors.
        assert!(is_settings_dat("core_user_.dat"));
        assert!(!is_settings_dat("core_user_1000.DAT"));
        assert!(!is_settings_dat("core_public__.yaml"));
        assert!(!is_settings_dat("prefs.ini"));
        assert!(!is_settings_dat("core_char_111.dat.bak"));
    }

    #[test]
    fn indexes_nested_files() {
        let tmp = tempfile::tempdir().unwrap();
        let deep = tmp.path().join("server/settings_Default");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("core_user_1000.dat"), b"u").unwrap();
        fs::write(deep.join("core_char_111.dat"), b"c").unwrap();
        fs::write(deep.join("prefs.ini"), b"p").unwrap();

        let index = build_dat_index(Some(tmp.path()));
        assert_eq!(index.len(), 2);
        assert_eq!(index["core_user_1000.dat"], deep.join("core_user_1000.dat"));
        assert_eq!(index["core_char_111.dat"], deep.join("core_char_111.dat"));
    }

    #[test]
    fn missing_root_is_empty() {
        assert!(build_dat_index(None).is_empty());
        assert!(build_dat_index(Some(Path::new("/nonexistent/evecfg"))).is_empty());
    }

    #[test]
    fn duplicate_basename_last_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("core_char_5.dat"), b"first").unwrap();
        fs::write(b.join("core_char_5.dat"), b"second").unwrap();

        let index = build_dat_index(Some(tmp.path()));
        // Name-ordered traversal: "b" is visited after "a".
        assert_eq!(index["core_char_5.dat"], b.join("core_char_5.dat"));
    }
}
