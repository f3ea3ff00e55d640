//! EVE launcher installation discovery.
//!
//! Locates plausible installation roots across Windows, macOS and Linux
//! (Proton/Steam prefixes), probes each for a launcher log directory and a
//! settings DAT root, indexes per-account/per-character `.dat` files, and
//! recovers account → character mappings from launcher log text.
//!
//! Everything here is synchronous and side-effect-free: directory existence
//! checks and sequential file reads only. Missing directories and garbled
//! log lines are never errors; absent inputs produce empty outputs.

mod candidates;
mod dat_index;
mod discover;
mod logparse;
mod platform;

pub use candidates::{default_roots, expand_path, merge_roots};
pub use dat_index::build_dat_index;
pub use discover::{Installation, discover};
pub use logparse::parse_logs;
pub use platform::Platform;
