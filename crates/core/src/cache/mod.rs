//! Bucket existence cache
//!
//! Remembers that a bucket was confirmed reachable so repeated validation
//! does not hit the remote service. Only positive results are stored.
//!
//! Providers are pluggable. They handle their own I/O failures: a provider
//! that cannot read reports a miss, one that cannot write logs and moves on.

mod file;
mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

use std::path::Path;
use std::time::Duration;

use crate::config::{CacheBackend, CacheSettings};

/// File name of the persistent cache inside the settings directory
pub const CACHE_FILE: &str = "cache.json";

/// Key/value store backing the existence cache.
pub trait CacheProvider: Send + Sync {
    /// Whether a live entry exists for `key`.
    fn contains(&self, key: &str) -> bool;

    /// Store `value` under `key`. `None` lifetime means no expiry.
    fn save(&self, key: &str, value: bool, lifetime: Option<Duration>);
}

/// Provider used when caching is disabled: never holds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

impl CacheProvider for NullCache {
    fn contains(&self, _key: &str) -> bool {
        false
    }

    fn save(&self, _key: &str, _value: bool, _lifetime: Option<Duration>) {}
}

/// Several providers consulted in order, fastest first.
#[derive(Default)]
pub struct LayeredCache {
    layers: Vec<Box<dyn CacheProvider>>,
}

impl LayeredCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer behind the existing ones
    pub fn with_layer(mut self, layer: impl CacheProvider + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl CacheProvider for LayeredCache {
    fn contains(&self, key: &str) -> bool {
        self.layers.iter().any(|layer| layer.contains(key))
    }

    fn save(&self, key: &str, value: bool, lifetime: Option<Duration>) {
        for layer in &self.layers {
            layer.save(key, value, lifetime);
        }
    }
}

/// Existence cache: a provider plus the lifetime given to new entries.
pub struct ExistenceCache {
    provider: Box<dyn CacheProvider>,
    lifetime: Option<Duration>,
}

impl ExistenceCache {
    /// Create a cache over `provider`; `None` lifetime keeps entries forever.
    pub fn new(provider: impl CacheProvider + 'static, lifetime: Option<Duration>) -> Self {
        Self {
            provider: Box::new(provider),
            lifetime,
        }
    }

    /// A cache that never remembers anything.
    pub fn disabled() -> Self {
        Self::new(NullCache, None)
    }

    /// Build the cache described by `settings`.
    ///
    /// `dir` is where the file-backed provider keeps its data.
    pub fn from_settings(settings: &CacheSettings, dir: &Path) -> Self {
        if !settings.enabled {
            return Self::disabled();
        }

        let lifetime = match settings.lifetime_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        let path = dir.join(CACHE_FILE);

        match settings.backend {
            CacheBackend::Memory => Self::new(MemoryCache::new(), lifetime),
            CacheBackend::File => Self::new(FileCache::new(path), lifetime),
            CacheBackend::Layered => Self::new(
                LayeredCache::new()
                    .with_layer(MemoryCache::new())
                    .with_layer(FileCache::new(path)),
                lifetime,
            ),
        }
    }

    /// Cache key for a bucket
    pub fn key(bucket: &str) -> String {
        format!("bucket:{bucket}")
    }

    /// Lifetime given to new entries
    pub fn lifetime(&self) -> Option<Duration> {
        self.lifetime
    }

    /// Whether `bucket` was previously confirmed
    pub fn is_confirmed(&self, bucket: &str) -> bool {
        self.provider.contains(&Self::key(bucket))
    }

    /// Record that `bucket` exists and is reachable
    pub fn confirm(&self, bucket: &str) {
        self.provider.save(&Self::key(bucket), true, self.lifetime);
    }
}

impl Default for ExistenceCache {
    fn default() -> Self {
        Self::disabled()
    }
}
