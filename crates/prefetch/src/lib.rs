//! Bulk prefetch of ESI metadata and images for every character in the
//! persisted scan state.
//!
//! Walks the distinct character ids from `mappings.json`, fetching for
//! each the character document, its portrait, and the owning
//! corporation's document and logo. Individual fetch failures are logged
//! and skipped; cancellation is cooperative via a `CancellationToken`
//! checked between characters.

use std::path::PathBuf;

use evecfg_esi::EsiClient;
use evecfg_scanner::{DEFAULT_OUTPUT, ScanState};
use tokio_util::sync::CancellationToken;

/// Portrait/logo pixel size requested from the image server.
const IMAGE_SIZE: u32 = 64;

/// Callback invoked with human-readable progress messages.
pub type ProgressFn = Box<dyn Fn(&str) + Send + Sync + 'static>;

/// Terminal outcome of a prefetch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefetchOutcome {
    /// All characters processed; `done` counts them.
    Completed { done: usize },
    /// Cancelled after `done` characters.
    Cancelled { done: usize },
    /// The scan state file does not exist.
    NoMappings,
    /// The scan state file exists but could not be parsed.
    BadMappings,
}

/// Prefetches metadata and images for characters in the scan state.
pub struct Prefetcher {
    esi: EsiClient,
    mappings_path: PathBuf,
    on_progress: Option<ProgressFn>,
}

impl Prefetcher {
    /// Creates a prefetcher reading `mappings.json` from the working
    /// directory.
    pub fn new(esi: EsiClient) -> Self {
        Self::with_mappings_path(esi, PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Creates a prefetcher with an explicit scan state path.
    pub fn with_mappings_path(esi: EsiClient, mappings_path: impl Into<PathBuf>) -> Self {
        Self {
            esi,
            mappings_path: mappings_path.into(),
            on_progress: None,
        }
    }

    /// Installs a progress callback.
    pub fn with_progress(mut self, on_progress: ProgressFn) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    fn emit(&self, msg: &str) {
        if let Some(cb) = &self.on_progress {
            cb(msg);
        }
    }

    /// Runs the prefetch to completion, cancellation, or a state-file
    /// problem. Per-character fetch errors never abort the run.
    pub async fn run(&self, cancel: &CancellationToken) -> PrefetchOutcome {
        tracing::info!(mappings = %self.mappings_path.display(), "prefetch starting");

        if !self.mappings_path.exists() {
            self.emit("scan state not found");
            return PrefetchOutcome::NoMappings;
        }
        let Ok(state) = ScanState::load(&self.mappings_path) else {
            self.emit("failed to read scan state");
            return PrefetchOutcome::BadMappings;
        };

        let char_ids = state.all_char_ids();
        let total = char_ids.len();
        let mut done = 0usize;

        for char_id in char_ids {
            if cancel.is_cancelled() {
                self.emit("cancelled");
                tracing::info!(done, "prefetch cancelled");
                return PrefetchOutcome::Cancelled { done };
            }
            done += 1;
            self.emit(&format!("Fetching char {char_id} ({done}/{total})"));

            let Ok(id) = char_id.parse::<u64>() else {
                tracing::warn!(char_id, "non-numeric character id, skipping");
                continue;
            };
            self.prefetch_character(id).await;
        }

        self.emit("prefetch complete");
        tracing::info!(done, "prefetch complete");
        PrefetchOutcome::Completed { done }
    }

    /// Fetches one character's document, portrait, and corporation data.
    async fn prefetch_character(&self, id: u64) {
        let character = match self.esi.character(id).await {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!(id, error = %e, "character fetch failed");
                None
            }
        };

        if let Err(e) = self.esi.character_portrait(id, IMAGE_SIZE).await {
            tracing::warn!(id, error = %e, "portrait fetch failed");
        }

        let Some(corp_id) = character.and_then(|c| c.corporation_id) else {
            return;
        };
        self.emit(&format!("Fetching corp {corp_id}"));
        if let Err(e) = self.esi.corporation(corp_id).await {
            tracing::warn!(corp_id, error = %e, "corporation fetch failed");
        }
        if let Err(e) = self.esi.corporation_logo(corp_id, IMAGE_SIZE).await {
            tracing::warn!(corp_id, error = %e, "corporation logo fetch failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evecfg_cache::CacheManager;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn prefetcher_at(dir: &std::path::Path, mappings: &str) -> Prefetcher {
        let cache = CacheManager::with_base(dir.join("cache")).unwrap();
        let esi = EsiClient::new(cache).unwrap();
        Prefetcher::with_mappings_path(esi, dir.join(mappings))
    }

    #[tokio::test]
    async fn missing_state_file() {
        let tmp = tempfile::tempdir().unwrap();
        let pf = prefetcher_at(tmp.path(), "mappings.json");
        assert_eq!(pf.run(&CancellationToken::new()).await, PrefetchOutcome::NoMappings);
    }

    #[tokio::test]
    async fn corrupt_state_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("mappings.json"), b"{not json").unwrap();
        let pf = prefetcher_at(tmp.path(), "mappings.json");
        assert_eq!(pf.run(&CancellationToken::new()).await, PrefetchOutcome::BadMappings);
    }

    #[tokio::test]
    async fn empty_mapping_completes_immediately() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("mappings.json"),
            b"{\"dat_roots\": [], \"logs_dirs\": [], \"mappings\": {}}",
        )
        .unwrap();
        let pf = prefetcher_at(tmp.path(), "mappings.json");
        assert_eq!(
            pf.run(&CancellationToken::new()).await,
            PrefetchOutcome::Completed { done: 0 }
        );
    }

    #[tokio::test]
    async fn pre_cancelled_token_stops_before_any_fetch() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("mappings.json"),
            serde_json::to_string_pretty(&serde_json::json!({
                "dat_roots": [],
                "logs_dirs": [],
                "mappings": {"1000": {"chars": ["111", "222"]}}
            }))
            .unwrap(),
        )
        .unwrap();

        let messages = Arc::new(AtomicUsize::new(0));
        let messages2 = Arc::clone(&messages);
        let pf = prefetcher_at(tmp.path(), "mappings.json").with_progress(Box::new(move |_| {
            messages2.fetch_add(1, Ordering::SeqCst);
        }));

        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(pf.run(&cancel).await, PrefetchOutcome::Cancelled { done: 0 });
        // Only the "cancelled" progress message was emitted.
        assert_eq!(messages.load(Ordering::SeqCst), 1);
    }
}
