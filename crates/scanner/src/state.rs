//! Persisted scan state (`mappings.json`).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Character list for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccountChars {
    pub chars: Vec<String>,
}

/// The consolidated result of a scan pass, persisted as pretty JSON.
///
/// `dat_roots` and `logs_dirs` are deduplicated in insertion order;
/// `mappings` keys iterate sorted, so repeated scans over an unchanged
/// filesystem serialize byte-identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScanState {
    /// Data roots whose DAT index was non-empty.
    pub dat_roots: Vec<String>,
    /// Logs directories of every discovered installation.
    pub logs_dirs: Vec<String>,
    /// Account id → character list, last installation wins per account.
    pub mappings: BTreeMap<String, AccountChars>,
}

impl ScanState {
    /// Reads persisted scan state from disk.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Returns the account owning a character id, if it appears in any
    /// account's character list.
    pub fn account_for_char(&self, char_id: &str) -> Option<&str> {
        self.mappings
            .iter()
            .find(|(_, entry)| entry.chars.iter().any(|c| c == char_id))
            .map(|(account, _)| account.as_str())
    }

    /// Collects the distinct character ids across all accounts, sorted.
    pub fn all_char_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .mappings
            .values()
            .flat_map(|entry| entry.chars.iter().cloned())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScanState {
        let mut mappings = BTreeMap::new();
        mappings.insert(
            "1000".to_string(),
            AccountChars {
                chars: vec!["111".into(), "222".into()],
            },
        );
        mappings.insert(
            "2000".to_string(),
            AccountChars {
                chars: vec!["222".into(), "333".into()],
            },
        );
        ScanState {
            dat_roots: vec!["/data".into()],
            logs_dirs: vec!["/logs".into()],
            mappings,
        }
    }

    #[test]
    fn account_lookup() {
        let state = sample();
        assert_eq!(state.account_for_char("111"), Some("1000"));
        assert_eq!(state.account_for_char("333"), Some("2000"));
        assert_eq!(state.account_for_char("999"), None);
    }

    #[test]
    fn char_ids_deduplicated_sorted() {
        assert_eq!(sample().all_char_ids(), vec!["111", "222", "333"]);
    }

    #[test]
    fn json_field_names_stable() {
        let json = serde_json::to_string_pretty(&sample()).unwrap();
        assert!(json.contains("\"dat_roots\""));
        assert!(json.contains("\"logs_dirs\""));
        assert!(json.contains("\"mappings\""));
        assert!(json.contains("\"chars\""));

        let back: ScanState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(ScanState::load(std::path::Path::new("/nonexistent/mappings.json")).is_err());
    }
}
