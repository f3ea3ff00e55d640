//! Candidate root generation and path expansion.

use std::path::PathBuf;

use crate::platform::Platform;

/// Returns the default candidate installation prefixes for a platform.
///
/// Entries may contain a `~` home shorthand or environment references
/// (`%VAR%`, `${VAR}`, `$VAR`); callers expand them with [`expand_path`]
/// before probing. An unrecognized platform uses the Windows-style list.
pub fn default_roots(platform: Platform) -> Vec<String> {
    let roots: &[&str] = match platform {
        Platform::Linux => &[
            "~/.steam/debian-installation/steamapps/compatdata/8500/pfx/drive_c/users/steamuser",
            "~/.local/share/Steam/steamapps/compatdata/8500/pfx/drive_c/users/steamuser",
            "~/.steam/steam/steamapps/compatdata/8500/pfx/drive_c/users/steamuser",
        ],
        Platform::MacOs => &[
            "~/Library/Application Support/EVE Online",
            "/Applications/EVE Online.app/Contents",
        ],
        Platform::Windows | Platform::Other => &[
            r"%LOCALAPPDATA%\EVE Online",
            r"C:\Program Files (x86)\Steam\steamapps\compatdata\8500\pfx\drive_c\users\steamuser",
        ],
    };
    roots.iter().map(|r| (*r).to_string()).collect()
}

/// Merges caller-supplied extra roots ahead of the default list.
///
/// Extras keep precedence and first position; exact duplicate strings are
/// dropped, preserving first-seen order.
pub fn merge_roots(extra: &[String], defaults: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(extra.len() + defaults.len());
    for root in extra.iter().cloned().chain(defaults) {
        if !merged.contains(&root) {
            merged.push(root);
        }
    }
    merged
}

/// Expands a candidate prefix into a concrete path.
///
/// Resolves a leading `~` against the home directory and substitutes
/// `%VAR%`, `${VAR}` and `$VAR` environment references. Unknown variables
/// are left verbatim rather than erased, matching shell `expandvars`
/// behavior.
pub fn expand_path(raw: &str) -> PathBuf {
    let expanded = expand_env(raw);
    if let Some(rest) = expanded.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') {
            if let Some(home) = home_dir() {
                let mut path = home;
                path.push(rest.trim_start_matches(['/', '\\']));
                return path;
            }
        }
    }
    PathBuf::from(expanded)
}

/// Returns the user's home directory from the environment.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()
        .map(PathBuf::from)
}

/// Substitutes `%VAR%`, `${VAR}` and `$VAR` references in a path string.
fn expand_env(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find(['%', '$']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match match_var(tail) {
            Some((value, consumed)) => {
                out.push_str(&value);
                rest = &tail[consumed..];
            }
            None => {
                out.push_str(&tail[..1]);
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Matches one variable reference at the start of `tail`.
///
/// Returns the resolved value and the byte length of the reference, or
/// `None` when the reference is malformed or the variable is unset.
fn match_var(tail: &str) -> Option<(String, usize)> {
    if let Some(body) = tail.strip_prefix('%') {
        let end = body.find('%')?;
        let name = &body[..end];
        if name.is_empty() {
            return None;
        }
        let value = std::env::var(name).ok()?;
        return Some((value, end + 2));
    }

    if let Some(body) = tail.strip_prefix("${") {
        let end = body.find('}')?;
        let value = std::env::var(&body[..end]).ok()?;
        return Some((value, end + 3));
    }

    let body = tail.strip_prefix('$')?;
    let len = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .count();
    if len == 0 {
        return None;
    }
    let value = std::env::var(&body[..len]).ok()?;
    Some((value, len + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_per_platform() {
        assert_eq!(default_roots(Platform::Linux).len(), 3);
        assert_eq!(default_roots(Platform::MacOs).len(), 2);
        assert_eq!(default_roots(Platform::Windows).len(), 2);
        // Unrecognized platforms fall back to the Windows list.
        assert_eq!(
            default_roots(Platform::Other),
            default_roots(Platform::Windows)
        );
    }

    #[test]
    fn merge_extras_first_dedup() {
        let extra = vec!["/a".to_string(), "/b".to_string()];
        let defaults = vec!["/b".to_string(), "/c".to_string()];
        let merged = merge_roots(&extra, defaults);
        assert_eq!(merged, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn merge_empty_extras_keeps_defaults() {
        let defaults = vec!["/x".to_string(), "/x".to_string(), "/y".to_string()];
        assert_eq!(merge_roots(&[], defaults), vec!["/x", "/y"]);
    }

    #[test]
    fn expand_tilde_prefix() {
        // SAFETY: test-only env mutation, no parallel reader of HOME here.
        unsafe { std::env::set_var("HOME", "/home/pilot") };
        assert_eq!(
            expand_path("~/Library/logs"),
            PathBuf::from("/home/pilot/Library/logs")
        );
        assert_eq!(expand_path("~"), PathBuf::from("/home/pilot"));
    }

    #[test]
    fn expand_env_styles() {
        unsafe { std::env::set_var("EVECFG_TEST_VAR", "/opt/eve") };
        assert_eq!(expand_env("%EVECFG_TEST_VAR%/logs"), "/opt/eve/logs");
        assert_eq!(expand_env("${EVECFG_TEST_VAR}/logs"), "/opt/eve/logs");
        assert_eq!(expand_env("$EVECFG_TEST_VAR/logs"), "/opt/eve/logs");
    }

    #[test]
    fn expand_unknown_var_left_verbatim() {
        unsafe { std::env::remove_var("EVECFG_MISSING_VAR") };
        assert_eq!(expand_env("%EVECFG_MISSING_VAR%"), "%EVECFG_MISSING_VAR%");
        assert_eq!(expand_env("$EVECFG_MISSING_VAR"), "$EVECFG_MISSING_VAR");
    }

    #[test]
    fn expand_plain_path_untouched() {
        assert_eq!(expand_path("/var/games"), PathBuf::from("/var/games"));
    }
}
