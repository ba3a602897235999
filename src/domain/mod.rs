//! Tracking domain: entities, dashboard state and the timeline classifier.

pub mod app_state;
pub mod entities;
pub mod search;
pub mod terminals;
pub mod timeline;

pub use app_state::{AppState, CacheResource, PersistedState};
pub use entities::{
    Cargo, CargoId, Terminal, TrackingDetail, TrackingEvent, VesselBoard, VesselCall,
    VesselCategory,
};
pub use search::{filter_cargo, reconcile_selection, CargoQuery};
pub use terminals::{terminal_filter, terminal_options, TerminalOption};
pub use timeline::{build_timeline, DisplayStep, TransportMode};
