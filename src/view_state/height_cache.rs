//! Content-addressed caches for measured item sizes.
//!
//! Markup and images are measured asynchronously by external renderers.
//! Until a measurement arrives, [`HeightCache::lookup`] answers with a fixed
//! fallback height. Recording a new or changed size produces an
//! [`Invalidation`] so the host relayouts; recording an unchanged size
//! produces nothing.
//!
//! Two independent instances exist per controller: one keyed by raw markup
//! ([`MarkupKey`]) and one keyed by image URL and rendering width
//! ([`ImageKey`]). They have different fallbacks and are fed by different
//! measurement sources.

use super::context::{ContextHandle, RenderContexts};
use super::types::Size;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::trace;

/// Cache key for markup measurements: the raw markup string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkupKey(pub String);

/// Cache key for image measurements: URL plus the width it was laid out at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey {
    /// Image location.
    pub url: String,
    /// Width the image was rendered at.
    pub width: u32,
}

impl ImageKey {
    /// Create a new key.
    pub fn new(url: impl Into<String>, width: u32) -> Self {
        Self {
            url: url.into(),
            width,
        }
    }
}

/// Request that the host relayout the item whose measurement changed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Invalidation<K> {
    /// Key whose stored size changed.
    pub key: K,
    /// Newly stored size.
    pub size: Size,
}

/// Running counters, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from a stored measurement.
    pub hits: u64,
    /// Lookups answered with the fallback.
    pub misses: u64,
    /// Records that changed the stored size.
    pub invalidations: u64,
    /// Records dropped because their context was gone.
    pub stale: u64,
}

/// Memoized sizes keyed by content.
#[derive(Debug, Clone)]
pub struct HeightCache<K> {
    name: &'static str,
    sizes: HashMap<K, Size>,
    fallback_height: u32,
    stats: CacheStats,
}

/// Cache of markup measurements.
pub type MarkupHeightCache = HeightCache<MarkupKey>;

/// Cache of image measurements.
pub type ImageHeightCache = HeightCache<ImageKey>;

impl<K> HeightCache<K>
where
    K: Clone + Debug + Eq + Hash,
{
    /// Empty cache answering `fallback_height` until measured.
    pub fn new(name: &'static str, fallback_height: u32) -> Self {
        Self {
            name,
            sizes: HashMap::new(),
            fallback_height,
            stats: CacheStats::default(),
        }
    }

    /// Measured height for `key`, or the fallback. Never blocks.
    pub fn lookup(&mut self, key: &K) -> u32 {
        match self.sizes.get(key) {
            Some(size) => {
                self.stats.hits += 1;
                size.height
            }
            None => {
                self.stats.misses += 1;
                self.fallback_height
            }
        }
    }

    /// Stored size for `key`, without touching the counters.
    pub fn get(&self, key: &K) -> Option<Size> {
        self.sizes.get(key).copied()
    }

    /// Store a measurement.
    ///
    /// Returns an invalidation when `key` was absent or its size changed;
    /// `None` when the stored size is already `size`.
    pub fn record(&mut self, key: K, size: Size) -> Option<Invalidation<K>> {
        if self.sizes.get(&key) == Some(&size) {
            trace!(cache = self.name, ?key, "measurement unchanged");
            return None;
        }
        self.sizes.insert(key.clone(), size);
        self.stats.invalidations += 1;
        trace!(cache = self.name, ?key, height = size.height, "measurement stored");
        Some(Invalidation { key, size })
    }

    /// Store a measurement that an asynchronous renderer reported through
    /// `context`.
    ///
    /// If the context was recycled or detached in the meantime the result is
    /// discarded silently: nothing is stored and nothing is emitted.
    pub fn record_from(
        &mut self,
        contexts: &RenderContexts,
        context: ContextHandle,
        key: K,
        size: Size,
    ) -> Option<Invalidation<K>> {
        if !contexts.is_attached(context) {
            self.stats.stale += 1;
            trace!(cache = self.name, ?key, cell = ?context.cell(), "stale measurement dropped");
            return None;
        }
        self.record(key, size)
    }

    /// Height answered for keys never measured.
    pub fn fallback_height(&self) -> u32 {
        self.fallback_height
    }

    /// Diagnostic counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of stored measurements.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether nothing has been measured yet.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Drop every stored measurement.
    pub fn clear(&mut self) {
        self.sizes.clear();
    }
}
