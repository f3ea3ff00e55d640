//! Settings-file copier.
//!
//! Duplicates per-character and per-account `.dat` settings files between
//! profile directories. Server and profile names are opaque path segments
//! resolved against `dat_roots[0]` from the persisted scan state:
//! `<dat_root>/<server>/settings_<profile>/core_char_<ID>.dat`.

mod copy;
mod profiles;

pub use copy::{CopyReport, CopySpec, CopyTarget, copy_settings, create_profile_from_templates};
pub use profiles::{Profile, list_profiles, profile_dir};

/// Tranquility (main server) directory name under a DAT root.
pub const TRANQUILITY_DIR: &str = "c_ccp_eve_tq_tranquility";

/// Singularity (test server) directory name under a DAT root.
pub const SINGULARITY_DIR: &str = "c_ccp_eve_sisi_singularity";

/// Errors from copy operations.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("source character file not found: {0}")]
    SourceMissing(String),
}
