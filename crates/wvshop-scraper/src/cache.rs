//! Build ID cache with an age-based validity window.
//!
//! The storefront gives no expiry for its build ID, so an entry is trusted for
//! a fixed TTL after it was resolved. Storage is pluggable: [`MemoryStore`]
//! lives for the process, [`FileStore`] survives restarts.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Default validity window: one hour.
pub const DEFAULT_TTL: TimeDelta = TimeDelta::hours(1);

/// A resolved build ID and when it was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(rename = "buildId")]
    pub build_id: String,
    /// Stored on disk as epoch milliseconds under `timestamp`.
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub resolved_at: DateTime<Utc>,
}

/// Backing storage for a single [`CacheEntry`].
///
/// Implementations hold at most one entry; `store` replaces it.
pub trait BuildIdStore: Send + Sync {
    fn load(&self) -> Option<CacheEntry>;
    fn store(&self, entry: &CacheEntry);
}

/// Process-local store. The default.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entry: RwLock<Option<CacheEntry>>,
}

impl BuildIdStore for MemoryStore {
    fn load(&self) -> Option<CacheEntry> {
        match self.entry.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn store(&self, entry: &CacheEntry) {
        let mut guard = match self.entry.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(entry.clone());
    }
}

/// JSON file store, e.g. `~/.cache/wvshop/buildid.json`.
///
/// A missing, unreadable or malformed file loads as empty. Write failures are
/// logged and otherwise ignored; the next run simply resolves again.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BuildIdStore for FileStore {
    fn load(&self) -> Option<CacheEntry> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str::<CacheEntry>(&content)
            .map_err(|e| {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring malformed build ID cache file"
                );
            })
            .ok()
    }

    fn store(&self, entry: &CacheEntry) {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(
                    path = %parent.display(),
                    error = %e,
                    "could not create build ID cache directory"
                );
                return;
            }
        }

        let json = match serde_json::to_string_pretty(entry) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "could not serialize build ID cache entry");
                return;
            }
        };

        if let Err(e) = std::fs::write(&self.path, json) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "could not write build ID cache file"
            );
        }
    }
}

/// Single-entry build ID cache with a fixed TTL.
pub struct BuildIdCache {
    store: Box<dyn BuildIdStore>,
    ttl: TimeDelta,
}

impl BuildIdCache {
    #[must_use]
    pub fn new(store: Box<dyn BuildIdStore>, ttl: TimeDelta) -> Self {
        Self { store, ttl }
    }

    /// In-memory cache with the default one-hour TTL.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::<MemoryStore>::default(), DEFAULT_TTL)
    }

    #[must_use]
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    #[must_use]
    pub fn read(&self) -> Option<CacheEntry> {
        self.store.load()
    }

    /// Replaces the cached entry with `build_id`, stamped with the current time.
    pub fn write(&self, build_id: &str) -> CacheEntry {
        self.write_at(build_id, Utc::now())
    }

    pub(crate) fn write_at(&self, build_id: &str, resolved_at: DateTime<Utc>) -> CacheEntry {
        let entry = CacheEntry {
            build_id: build_id.to_string(),
            resolved_at,
        };
        self.store.store(&entry);
        entry
    }

    /// `true` while `now - entry.resolved_at < ttl`.
    #[must_use]
    pub fn is_valid(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.resolved_at) < self.ttl
    }

    /// The cached entry, if one exists and is still within the TTL at `now`.
    #[must_use]
    pub fn fresh(&self, now: DateTime<Utc>) -> Option<CacheEntry> {
        self.read().filter(|entry| self.is_valid(entry, now))
    }
}

impl Default for BuildIdCache {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for BuildIdCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildIdCache")
            .field("ttl", &self.ttl)
            .field("entry", &self.read())
            .finish()
    }
}
