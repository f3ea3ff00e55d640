//! Launcher log parsing: recovers account → character mappings.
//!
//! The launcher logs two kinds of lines we care about:
//!
//! ```text
//! Fetching character details for 111, 222, 333
//! Fetched 3 character details for 1000
//! ```
//!
//! "Fetching" lines carry a character-id list but no account; "Fetched"
//! lines carry the account and a count. The parser keeps a bounded history
//! of recent character lists and, on each "Fetched" line, attributes the
//! most recent list whose length matches the count to that account.

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of "Fetching" character lists kept in history (FIFO).
const HISTORY_LIMIT: usize = 200;

static FETCHING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Fetching character details for ([0-9, ]+)").expect("static pattern"));

static FETCHED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Fetched (\d+) character details for (\d+)").expect("static pattern"));

/// Parses all `*.log` files in a directory into account → character lists.
///
/// Files are processed in filename-sorted order, lines top to bottom; the
/// history carries across files. Undecodable bytes are replaced, vanished
/// files are skipped, and unmatched or malformed lines are ignored. A
/// later "Fetched" event for an account overwrites the earlier mapping
/// entirely.
///
/// When no history entry matches the "Fetched" count, the newest entry is
/// used as-is (empty list when history is empty). That fallback can
/// misattribute characters when fetches for several accounts interleave;
/// it is kept deliberately for compatibility with the launcher's observed
/// behavior.
pub fn parse_logs(logs_dir: &Path) -> BTreeMap<String, Vec<String>> {
    let mut history: VecDeque<Vec<String>> = VecDeque::new();
    let mut mappings = BTreeMap::new();

    for logfile in list_log_files(logs_dir) {
        // The file may have vanished between listing and read.
        let Ok(bytes) = std::fs::read(&logfile) else {
            tracing::debug!(file = %logfile.display(), "log file unreadable, skipping");
            continue;
        };
        let text = String::from_utf8_lossy(&bytes);

        for line in text.lines() {
            if let Some(caps) = FETCHING_RE.captures(line) {
                let chars: Vec<String> = caps[1]
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect();
                history.push_back(chars);
                if history.len() > HISTORY_LIMIT {
                    history.pop_front();
                }
                continue;
            }

            if let Some(caps) = FETCHED_RE.captures(line) {
                // A count too large for usize is treated as non-matching.
                let Ok(count) = caps[1].parse::<usize>() else {
                    continue;
                };
                let account = caps[2].to_string();
                let chosen = history
                    .iter()
                    .rev()
                    .find(|chars| chars.len() == count)
                    .or_else(|| history.back())
                    .cloned()
                    .unwrap_or_default();
                mappings.insert(account, chosen);
            }
        }
    }

    tracing::debug!(
        dir = %logs_dir.display(),
        accounts = mappings.len(),
        "log mappings parsed"
    );
    mappings
}

/// Lists `*.log` files in a directory, sorted by filename ascending.
fn list_log_files(logs_dir: &Path) -> Vec<std::path::PathBuf> {
    let Ok(entries) = std::fs::read_dir(logs_dir) else {
        return Vec::new();
    };

    let mut files: Vec<std::path::PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(".log"))
        })
        .collect();
    files.sort();
    files
}
