use std::{
    collections::HashMap,
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};

use super::entities::{CargoId, Terminal};
use super::terminals::default_terminal_code;

/// Dashboard state shared by the pages through context.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub terminals: Vec<Terminal>,
    /// Vessel page selection; `None` until defaulted or chosen.
    pub vessel_terminal: Option<String>,
    /// Cargo page selection, independent of the vessel page.
    pub cargo_terminal: Option<String>,
    pub cargo_search: String,
    pub selected_cargo: Option<CargoId>,
    /// User override of the API base URL.
    pub api_base_url: Option<String>,
    pub cache: CacheTimestamps,
}

impl AppState {
    pub fn vessel_terminal_code(&self) -> String {
        self.vessel_terminal.clone().unwrap_or_default()
    }

    pub fn cargo_terminal_code(&self) -> String {
        self.cargo_terminal.clone().unwrap_or_default()
    }

    /// Stores the terminal list and fills in page selections nobody made yet.
    pub fn set_terminals(&mut self, terminals: Vec<Terminal>) {
        let default_code = default_terminal_code(&terminals);
        self.vessel_terminal.get_or_insert_with(|| default_code.clone());
        self.cargo_terminal.get_or_insert(default_code);
        self.terminals = terminals;
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.vessel_terminal = persisted.vessel_terminal;
        self.cargo_terminal = persisted.cargo_terminal;
        self.api_base_url = persisted.api_base_url;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            vessel_terminal: self.vessel_terminal.clone(),
            cargo_terminal: self.cargo_terminal.clone(),
            api_base_url: self.api_base_url.clone(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CacheTimestamps {
    entries: HashMap<CacheResource, SystemTime>,
}

impl CacheTimestamps {
    pub fn record_fetch(&mut self, resource: CacheResource, fetched_at: SystemTime) {
        self.entries.insert(resource, fetched_at);
    }

    pub fn fetched_at(&self, resource: &CacheResource) -> Option<SystemTime> {
        self.entries.get(resource).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CacheResource, &SystemTime)> {
        self.entries.iter()
    }

    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.fetched_at(resource)
            .map(|time| time.elapsed().map(|elapsed| elapsed > ttl).unwrap_or(true))
            .unwrap_or(true)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheResource {
    Terminals,
    Vessels(String),
    Cargo(String),
    Tracking(CargoId),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub vessel_terminal: Option<String>,
    #[serde(default)]
    pub cargo_terminal: Option<String>,
    #[serde(default)]
    pub api_base_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(code: &str) -> Terminal {
        Terminal {
            id: None,
            code: Some(code.to_string()),
            name: Some(code.to_string()),
        }
    }

    #[test]
    fn terminals_default_only_unset_selections() {
        let mut state = AppState {
            cargo_terminal: Some("SQ".to_string()),
            ..AppState::default()
        };
        state.set_terminals(vec![terminal("ALL"), terminal("SQ")]);
        assert_eq!(state.vessel_terminal_code(), "ALL");
        assert_eq!(state.cargo_terminal_code(), "SQ");
        assert_eq!(state.terminals.len(), 2);
    }

    #[test]
    fn persisted_round_trip_through_state() {
        let persisted = PersistedState {
            vessel_terminal: Some("NQ".to_string()),
            cargo_terminal: None,
            api_base_url: Some("https://tracking.example.com".to_string()),
        };
        let mut state = AppState::default();
        state.apply_persisted(persisted.clone());
        assert_eq!(state.to_persisted(), persisted);
    }

    #[test]
    fn missing_persisted_fields_default() {
        let parsed: PersistedState = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, PersistedState::default());
    }

    #[test]
    fn cache_staleness() {
        let mut cache = CacheTimestamps::default();
        let ttl = Duration::from_secs(30);
        assert!(cache.is_stale(&CacheResource::Terminals, ttl));

        cache.record_fetch(CacheResource::Terminals, SystemTime::now());
        assert!(!cache.is_stale(&CacheResource::Terminals, ttl));

        let old = SystemTime::now() - Duration::from_secs(120);
        cache.record_fetch(CacheResource::Tracking(4), old);
        assert!(cache.is_stale(&CacheResource::Tracking(4), ttl));

        cache.clear();
        assert_eq!(cache.iter().count(), 0);
    }
}
