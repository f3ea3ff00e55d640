//! Scan orchestration and persisted scan state.
//!
//! Composes the discovery pipeline from `evecfg-detect` — candidate roots,
//! installation probing, DAT indexing, log parsing — over every discovered
//! installation, merges the results, and persists them as `mappings.json`
//! for downstream consumers (prefetcher, settings copier, UI).

mod error;
mod scan;
mod state;

pub use error::ScanError;
pub use scan::{DEFAULT_OUTPUT, ScanReport, Scanner};
pub use state::{AccountChars, ScanState};
