//! In-memory response cache with a freshness window and stale fallback.

use std::{
    collections::HashMap,
    hash::Hash,
    time::{Duration, SystemTime},
};

use crate::domain::{Cargo, CargoId, Terminal, TrackingDetail, VesselBoard};

/// How long a response is served without asking the backend again.
pub const RESPONSE_TTL: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: SystemTime,
    pub status: CacheStatus,
}

impl<T> CachedPayload<T> {
    pub fn new(data: T, fetched_at: SystemTime, status: CacheStatus) -> Self {
        Self {
            data,
            fetched_at,
            status,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CachedPayload<U> {
        CachedPayload::new(f(self.data), self.fetched_at, self.status)
    }
}

struct Cached<T> {
    value: T,
    fetched_at: SystemTime,
}

impl<T: Clone> Cached<T> {
    fn if_fresh(&self, ttl: Duration) -> Option<CachedPayload<T>> {
        let fresh = self
            .fetched_at
            .elapsed()
            .map(|elapsed| elapsed < ttl)
            .unwrap_or(false);
        fresh.then(|| CachedPayload::new(self.value.clone(), self.fetched_at, CacheStatus::Cached))
    }

    fn stale(&self) -> CachedPayload<T> {
        CachedPayload::new(self.value.clone(), self.fetched_at, CacheStatus::Stale)
    }
}

/// Cached responses of one endpoint, keyed by request parameters.
pub struct CacheMap<K, T> {
    entries: HashMap<K, Cached<T>>,
}

impl<K, T> Default for CacheMap<K, T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, T: Clone> CacheMap<K, T> {
    pub fn fresh(&self, key: &K, ttl: Duration) -> Option<CachedPayload<T>> {
        self.entries.get(key).and_then(|entry| entry.if_fresh(ttl))
    }

    pub fn stale(&self, key: &K) -> Option<CachedPayload<T>> {
        self.entries.get(key).map(Cached::stale)
    }

    pub fn store(&mut self, key: K, value: T, fetched_at: SystemTime) {
        self.entries.insert(key, Cached { value, fetched_at });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Per-endpoint caches of the tracking client.
#[derive(Default)]
pub struct TrackingCache {
    terminals: CacheMap<(), Vec<Terminal>>,
    vessels: CacheMap<String, VesselBoard>,
    cargo: CacheMap<String, Vec<Cargo>>,
    tracking: CacheMap<CargoId, TrackingDetail>,
}

impl TrackingCache {
    pub fn terminals(&mut self) -> &mut CacheMap<(), Vec<Terminal>> {
        &mut self.terminals
    }

    pub fn vessels(&mut self) -> &mut CacheMap<String, VesselBoard> {
        &mut self.vessels
    }

    pub fn cargo(&mut self) -> &mut CacheMap<String, Vec<Cargo>> {
        &mut self.cargo
    }

    pub fn tracking(&mut self) -> &mut CacheMap<CargoId, TrackingDetail> {
        &mut self.tracking
    }

    pub fn clear(&mut self) {
        self.terminals.clear();
        self.vessels.clear();
        self.cargo.clear();
        self.tracking.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entries_are_served_as_cached() {
        let mut map: CacheMap<String, u32> = CacheMap::default();
        map.store("a".to_string(), 7, SystemTime::now());

        let hit = map.fresh(&"a".to_string(), RESPONSE_TTL).unwrap();
        assert_eq!(hit.data, 7);
        assert_eq!(hit.status, CacheStatus::Cached);
        assert!(map.fresh(&"b".to_string(), RESPONSE_TTL).is_none());
    }

    #[test]
    fn expired_entries_remain_available_as_stale() {
        let mut map: CacheMap<u8, &str> = CacheMap::default();
        map.store(1, "old", SystemTime::now() - Duration::from_secs(300));

        assert!(map.fresh(&1, RESPONSE_TTL).is_none());
        let stale = map.stale(&1).unwrap();
        assert_eq!(stale.data, "old");
        assert_eq!(stale.status, CacheStatus::Stale);
    }

    #[test]
    fn clearing_drops_every_endpoint() {
        let mut cache = TrackingCache::default();
        cache.terminals().store((), Vec::new(), SystemTime::now());
        cache.tracking().store(5, TrackingDetail::default(), SystemTime::now());
        cache.clear();
        assert!(cache.terminals().stale(&()).is_none());
        assert!(cache.tracking().stale(&5).is_none());
    }

    #[test]
    fn payload_map_keeps_metadata() {
        let at = SystemTime::now();
        let payload = CachedPayload::new(vec![1, 2, 3], at, CacheStatus::Stale).map(|v| v.len());
        assert_eq!(payload.data, 3);
        assert_eq!(payload.status, CacheStatus::Stale);
        assert_eq!(payload.fetched_at, at);
    }
}
