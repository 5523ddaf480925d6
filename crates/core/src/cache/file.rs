//! JSON file cache provider.
//!
//! Entries carry absolute expiry timestamps so they stay meaningful across
//! processes. The file is read on every lookup and rewritten whole on save.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use super::CacheProvider;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileEntry {
    value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<Timestamp>,
}

impl FileEntry {
    fn is_live(&self, now: Timestamp) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// Provider persisting entries to a JSON file.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<HashMap<String, FileEntry>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, entries: &HashMap<String, FileEntry>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn try_save(&self, key: &str, value: bool, lifetime: Option<Duration>) -> Result<()> {
        let now = Timestamp::now();
        let mut entries = match self.read() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Discarding unreadable cache file: {e}");
                HashMap::new()
            }
        };
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(
            key.to_string(),
            FileEntry {
                value,
                expires_at: lifetime.and_then(|l| expiry(now, l)),
            },
        );
        self.write(&entries)
    }
}

/// Absolute expiry; lifetimes too large to represent never expire
fn expiry(now: Timestamp, lifetime: Duration) -> Option<Timestamp> {
    let lifetime = SignedDuration::try_from(lifetime).ok()?;
    now.checked_add(lifetime).ok()
}

impl CacheProvider for FileCache {
    fn contains(&self, key: &str) -> bool {
        match self.read() {
            Ok(entries) => entries
                .get(key)
                .is_some_and(|entry| entry.is_live(Timestamp::now())),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to read cache file: {e}");
                false
            }
        }
    }

    fn save(&self, key: &str, value: bool, lifetime: Option<Duration>) {
        if let Err(e) = self.try_save(key, value, lifetime) {
            tracing::warn!(path = %self.path.display(), "Failed to write cache file: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_cache() -> (FileCache, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileCache::new(temp_dir.path().join("nested").join("cache.json"));
        (cache, temp_dir)
    }

    #[test]
    fn test_missing_file_is_a_miss() {
        let (cache, _temp_dir) = temp_cache();
        assert!(!cache.contains("bucket:assets"));
        assert!(!cache.path().exists());
    }

    #[test]
    fn test_save_creates_file() {
        let (cache, _temp_dir) = temp_cache();
        cache.save("bucket:assets", true, None);

        assert!(cache.path().exists());
        assert!(cache.contains("bucket:assets"));
        assert!(!cache.contains("bucket:other"));
    }

    #[test]
    fn test_entries_survive_new_instance() {
        let (cache, _temp_dir) = temp_cache();
        cache.save("bucket:assets", true, Some(Duration::from_secs(3600)));

        let reopened = FileCache::new(cache.path());
        assert!(reopened.contains("bucket:assets"));
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let (cache, _temp_dir) = temp_cache();
        cache.save("bucket:assets", true, Some(Duration::ZERO));
        assert!(!cache.contains("bucket:assets"));
    }

    #[test]
    fn test_save_prunes_expired_entries() {
        let (cache, _temp_dir) = temp_cache();
        cache.save("bucket:old", true, Some(Duration::ZERO));
        cache.save("bucket:new", true, None);

        let content = std::fs::read_to_string(cache.path()).unwrap();
        assert!(!content.contains("bucket:old"));
        assert!(content.contains("bucket:new"));
    }

    #[test]
    fn test_corrupt_file_degrades_to_miss() {
        let (cache, _temp_dir) = temp_cache();
        std::fs::create_dir_all(cache.path().parent().unwrap()).unwrap();
        std::fs::write(cache.path(), "{ not json").unwrap();

        assert!(!cache.contains("bucket:assets"));

        // Saving replaces the corrupt file
        cache.save("bucket:assets", true, None);
        assert!(cache.contains("bucket:assets"));
    }

    #[test]
    fn test_huge_lifetime_never_expires() {
        let (cache, _temp_dir) = temp_cache();
        cache.save("bucket:assets", true, Some(Duration::MAX));
        assert!(cache.contains("bucket:assets"));
    }
}
