//! Character and account settings copy rules.

use std::path::{Path, PathBuf};

use crate::CopyError;

/// Template files seeded into a newly created profile when present in the
/// source profile.
const TEMPLATE_FILES: &[&str] = &[
    "core_char__.dat",
    "core_user__.dat",
    "core_public__.yaml",
    "prefs.ini",
];

/// Source side of a copy operation.
#[derive(Debug, Clone)]
pub struct CopySpec {
    /// Profile directory the donor files live in.
    pub source_profile: PathBuf,
    /// Profile directory receiving the copies.
    pub dest_profile: PathBuf,
    /// Donor character id.
    pub source_char: String,
    /// Donor account id.
    pub donor_account: String,
    /// Copy the donor's account file even when the destination account
    /// file already exists.
    pub include_account_config: bool,
}

/// One receiving character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTarget {
    pub char_id: String,
    pub account_id: String,
}

/// Files written by a copy operation, by basename, in copy order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: Vec<String>,
}

/// Copies the donor character's settings file over each target character,
/// applying the account-file rules per target.
///
/// For every target: the character file is always copied (unless source
/// and destination are the same file, which is silently skipped); the
/// donor's account file is written to the *receiving* account's filename
/// when `include_account_config` is set or the destination account file
/// does not yet exist.
pub fn copy_settings(spec: &CopySpec, targets: &[CopyTarget]) -> Result<CopyReport, CopyError> {
    let source_char_file = spec
        .source_profile
        .join(format!("core_char_{}.dat", spec.source_char));
    if !source_char_file.exists() {
        return Err(CopyError::SourceMissing(
            source_char_file.display().to_string(),
        ));
    }
    let source_account_file = spec
        .source_profile
        .join(format!("core_user_{}.dat", spec.donor_account));

    let mut report = CopyReport::default();
    for target in targets {
        let dest_char_file = spec
            .dest_profile
            .join(format!("core_char_{}.dat", target.char_id));

        if same_file(&source_char_file, &dest_char_file) {
            // The donor selected as its own destination; nothing to do.
            tracing::debug!(char_id = %target.char_id, "skipping self-copy");
        } else {
            std::fs::copy(&source_char_file, &dest_char_file)?;
            report.copied.push(format!("core_char_{}.dat", target.char_id));
        }

        let dest_account_file = spec
            .dest_profile
            .join(format!("core_user_{}.dat", target.account_id));
        let should_copy_account = source_account_file.exists()
            && (spec.include_account_config || !dest_account_file.exists());

        if should_copy_account && !same_file(&source_account_file, &dest_account_file) {
            std::fs::copy(&source_account_file, &dest_account_file)?;
            report
                .copied
                .push(format!("core_user_{}.dat", target.account_id));
        }
    }

    tracing::info!(
        source = %spec.source_profile.display(),
        dest = %spec.dest_profile.display(),
        files = report.copied.len(),
        "settings copied"
    );
    Ok(report)
}

/// Creates a new profile directory seeded with the template files found
/// in the source profile. Returns the copied template names.
pub fn create_profile_from_templates(
    source_profile: &Path,
    dest_profile: &Path,
) -> Result<Vec<String>, CopyError> {
    std::fs::create_dir_all(dest_profile)?;

    let mut copied = Vec::new();
    for template in TEMPLATE_FILES {
        let source = source_profile.join(template);
        if source.exists() {
            std::fs::copy(&source, dest_profile.join(template))?;
            copied.push((*template).to_string());
        }
    }

    tracing::info!(
        dest = %dest_profile.display(),
        templates = copied.len(),
        "new profile created"
    );
    Ok(copied)
}

/// Returns whether two paths resolve to the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
