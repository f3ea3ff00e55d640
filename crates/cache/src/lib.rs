//! Disk cache for downloaded ESI metadata and images.
//!
//! Layout under the base directory:
//!
//! ```text
//! cache/char/<id>.json     character documents
//! cache/corp/<id>.json     corporation documents
//! cache/img/char/<id>.png  character portraits
//! cache/img/corp/<id>.png  corporation logos
//! ```
//!
//! Entries are keyed by entity id; content is opaque to the cache.

use std::fmt;
use std::path::{Path, PathBuf};

/// Errors from cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The kind of entity a cache entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Character,
    Corporation,
}

impl EntityKind {
    /// Returns the cache subdirectory name for this kind.
    fn subdir(&self) -> &'static str {
        match self {
            EntityKind::Character => "char",
            EntityKind::Corporation => "corp",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subdir())
    }
}

/// Provides access to the on-disk content cache.
pub struct CacheManager {
    base: PathBuf,
}

impl CacheManager {
    /// Creates a cache rooted at `cache/` under the working directory.
    pub fn new() -> Result<Self, CacheError> {
        Self::with_base(PathBuf::from("cache"))
    }

    /// Creates a cache rooted at a custom base directory.
    ///
    /// The subdirectory layout is created eagerly.
    pub fn with_base(base: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let base = base.into();
        for kind in [EntityKind::Character, EntityKind::Corporation] {
            std::fs::create_dir_all(base.join(kind.subdir()))?;
            std::fs::create_dir_all(base.join("img").join(kind.subdir()))?;
        }
        Ok(Self { base })
    }

    /// Returns the cache base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    /// Returns the path of a JSON document for an entity.
    pub fn json_path(&self, id: &str, kind: EntityKind) -> PathBuf {
        self.base.join(kind.subdir()).join(format!("{id}.json"))
    }

    /// Returns the path of an image blob for an entity.
    pub fn image_path(&self, id: &str, kind: EntityKind) -> PathBuf {
        self.base
            .join("img")
            .join(kind.subdir())
            .join(format!("{id}.png"))
    }

    /// Loads a cached JSON document, if present and parseable.
    ///
    /// A corrupt entry reads as a miss, not an error.
    pub fn load_json(&self, id: &str, kind: EntityKind) -> Option<serde_json::Value> {
        let path = self.json_path(id, kind);
        let text = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&text) {
            Ok(value) => {
                tracing::debug!(kind = %kind, id, "JSON cache hit");
                Some(value)
            }
            Err(_) => None,
        }
    }

    /// Writes a JSON document to the cache.
    pub fn save_json(
        &self,
        id: &str,
        kind: EntityKind,
        data: &serde_json::Value,
    ) -> Result<(), CacheError> {
        let path = self.json_path(id, kind);
        std::fs::write(&path, serde_json::to_string_pretty(data)?)?;
        tracing::debug!(kind = %kind, id, path = %path.display(), "saved JSON cache entry");
        Ok(())
    }

    /// Returns the path of a cached image, if present.
    pub fn load_image(&self, id: &str, kind: EntityKind) -> Option<PathBuf> {
        let path = self.image_path(id, kind);
        if path.exists() {
            tracing::debug!(kind = %kind, id, "image cache hit");
            Some(path)
        } else {
            None
        }
    }

    /// Writes image bytes to the cache, returning the entry's path.
    pub fn save_image_bytes(
        &self,
        id: &str,
        kind: EntityKind,
        data: &[u8],
    ) -> Result<PathBuf, CacheError> {
        let path = self.image_path(id, kind);
        std::fs::write(&path, data)?;
        tracing::debug!(kind = %kind, id, path = %path.display(), "saved image cache entry");
        Ok(path)
    }

    /// Removes every cached entry, keeping the directory layout.
    pub fn clear(&self) -> Result<(), CacheError> {
        for kind in [EntityKind::Character, EntityKind::Corporation] {
            clear_dir(&self.base.join(kind.subdir()))?;
            clear_dir(&self.base.join("img").join(kind.subdir()))?;
        }
        Ok(())
    }

    /// Returns the total size of cached content in bytes.
    pub fn size(&self) -> u64 {
        let mut size = 0u64;
        sum_dir(&self.base, &mut size);
        size
    }
}

fn clear_dir(dir: &Path) -> Result<(), CacheError> {
    let entries = std::fs::read_dir(dir)?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() {
            let _ = std::fs::remove_file(&path);
        }
    }
    Ok(())
}

/// Recursively sums file sizes.
fn sum_dir(dir: &Path, size: &mut u64) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            sum_dir(&path, size);
        } else if let Ok(meta) = entry.metadata() {
            *size += meta.len();
        }
    }
}
