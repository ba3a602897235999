pub mod cache;
pub mod config;
pub mod tracking_api;

pub use cache::{CacheStatus, CachedPayload, RESPONSE_TTL};
pub use config::ApiConfig;
pub use tracking_api::{TrackingClient, TrackingClientError};
