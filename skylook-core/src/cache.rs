//! Short-lived memoization of upstream responses.
//!
//! The cache is a plain value owned by whoever drives the lookups (see
//! [`crate::session::Session`]); nothing here is global. Entries expire a
//! fixed time after insertion and each map is capacity bounded, so a long
//! session never accumulates stale responses.

use std::time::Duration;

use moka::sync::Cache;

use crate::{
    config::CACHE_CAPACITY,
    model::{CurrentWeather, ForecastResponse, ResolvedLocation, Units},
};

/// Cache key for the coordinate-based calls. Floats are keyed by their bit
/// pattern, so only identical coordinates share an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    lat_bits: u64,
    lon_bits: u64,
    units: Units,
}

impl CoordKey {
    pub fn new(lat: f64, lon: f64, units: Units) -> Self {
        Self { lat_bits: lat.to_bits(), lon_bits: lon.to_bits(), units }
    }
}

fn ttl_cache<K, V>(ttl: Duration) -> Cache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    Cache::builder()
        .max_capacity(CACHE_CAPACITY)
        .time_to_live(ttl)
        .build()
}

/// The three memoized lookups of a session.
#[derive(Debug)]
pub struct LookupCache {
    pub locations: Cache<String, ResolvedLocation>,
    pub current: Cache<CoordKey, CurrentWeather>,
    pub forecasts: Cache<CoordKey, ForecastResponse>,
}

impl LookupCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            locations: ttl_cache(ttl),
            current: ttl_cache(ttl),
            forecasts: ttl_cache(ttl),
        }
    }

    pub fn clear(&self) {
        tracing::debug!("invalidating lookup cache");
        self.locations.invalidate_all();
        self.current.invalidate_all();
        self.forecasts.invalidate_all();
        self.run_pending_tasks();
    }

    /// Apply pending evictions so counts reflect expired and invalidated entries.
    pub fn run_pending_tasks(&self) {
        self.locations.run_pending_tasks();
        self.current.run_pending_tasks();
        self.forecasts.run_pending_tasks();
    }

    /// Live entries across the three maps.
    pub fn entry_count(&self) -> u64 {
        self.run_pending_tasks();
        self.locations.entry_count() + self.current.entry_count() + self.forecasts.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}
