//! One full scan pass: discover → index/parse → merge → persist.

use std::path::{Path, PathBuf};

use evecfg_detect::{Platform, build_dat_index, default_roots, discover, merge_roots, parse_logs};

use crate::error::ScanError;
use crate::state::{AccountChars, ScanState};

/// Default output filename, written into the current working directory.
pub const DEFAULT_OUTPUT: &str = "mappings.json";

/// Summary of a successful scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Where the scan state was written.
    pub output_path: PathBuf,
    /// Number of installations discovered.
    pub roots: usize,
    /// Number of accounts in the merged mapping.
    pub accounts: usize,
}

/// Runs scan passes over a fixed candidate list.
///
/// The whole pass is synchronous and uncoordinated: callers wanting a
/// responsive UI run it on their own worker, and concurrent scans against
/// the same output path must be serialized externally.
#[derive(Debug, Clone)]
pub struct Scanner {
    candidate_roots: Vec<String>,
}

impl Scanner {
    /// Creates a scanner with the default candidate roots for a platform.
    pub fn new(platform: Platform) -> Self {
        Self {
            candidate_roots: default_roots(platform),
        }
    }

    /// Creates a scanner with an explicit candidate list.
    pub fn with_candidates(candidate_roots: Vec<String>) -> Self {
        Self { candidate_roots }
    }

    /// Runs one scan pass and persists the merged result.
    ///
    /// `extra_roots` take precedence over the configured candidates.
    /// Returns [`ScanError::NoRoots`] when nothing was discovered (no
    /// output written) and [`ScanError::Write`] when persisting fails.
    pub fn scan(
        &self,
        extra_roots: &[String],
        output_path: Option<&Path>,
    ) -> Result<ScanReport, ScanError> {
        let candidates = merge_roots(extra_roots, self.candidate_roots.clone());
        tracing::info!(candidates = candidates.len(), "scan started");

        let installations = discover(&candidates);
        if installations.is_empty() {
            tracing::warn!("scan found no installations");
            return Err(ScanError::NoRoots);
        }

        let mut state = ScanState::default();
        for install in &installations {
            let mappings = parse_logs(&install.logs);
            let dat_index = build_dat_index(install.dat_root.as_deref());

            if let Some(dat_root) = &install.dat_root
                && !dat_index.is_empty()
            {
                push_unique(&mut state.dat_roots, realpath(dat_root));
            }
            push_unique(&mut state.logs_dirs, realpath(&install.logs));

            // Later installations overwrite earlier entries per account.
            for (account, chars) in mappings {
                state.mappings.insert(account, AccountChars { chars });
            }
        }

        let output_path = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        write_state(&state, &output_path)?;

        let report = ScanReport {
            output_path,
            roots: installations.len(),
            accounts: state.mappings.len(),
        };
        tracing::info!(
            roots = report.roots,
            accounts = report.accounts,
            output = %report.output_path.display(),
            "scan complete"
        );
        Ok(report)
    }
}

/// Serializes the state and writes it atomically: temp file in the
/// destination directory, then rename over the final path. Readers never
/// observe a partially written file.
fn write_state(state: &ScanState, path: &Path) -> Result<(), ScanError> {
    let json = serde_json::to_string_pretty(state)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, json).map_err(ScanError::Write)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(ScanError::Write(e));
    }
    Ok(())
}

/// Canonicalizes a path, falling back to the original when resolution
/// fails (e.g. the directory vanished mid-scan).
fn realpath(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}
