//! Thin asynchronous client for the terminal tracking REST API.
//!
//! - Every endpoint answers with a `{ success, message, data, statusCode }`
//!   envelope; the client validates it and the shape of `data`.
//! - Responses are kept for [`RESPONSE_TTL`] and served stale when a later
//!   request fails.

use std::{future::Future, hash::Hash, sync::Arc, time::SystemTime};

use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::{
    filter_cargo, Cargo, CargoId, CargoQuery, Terminal, TrackingDetail, TrackingEvent,
    VesselBoard, VesselCall, VesselCategory,
};
use crate::infra::cache::{
    CacheMap, CacheStatus, CachedPayload, TrackingCache, RESPONSE_TTL,
};
use crate::infra::config::{ApiConfig, ConfigError};
use crate::util::version::version_label;

const TERMINALS_PATH: &str = "api/Tracking/getAllTerminalInformation";
const VESSEL_TRACKING_PATH: &str = "api/Tracking/getVesselTrackingByTerminal";
const ALL_CARGO_PATH: &str = "api/Tracking/getAllCargoTracking";
const SEARCH_CARGO_PATH: &str = "api/Tracking/searchCargoTracking";
const CARGO_DETAIL_PATH: &str = "api/Tracking/getCargoTrackingDetail";

/// Operator used when a numeric search is sent as a cargo id lookup.
const CARGO_ID_OPERATOR: &str = "Equals";

#[derive(Debug, Error)]
pub enum TrackingClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct TrackingClient {
    http: Client,
    base_url: Url,
    cache: Arc<Mutex<TrackingCache>>,
    ttl: std::time::Duration,
}

impl TrackingClient {
    pub fn new(config: &ApiConfig) -> Result<Self, TrackingClientError> {
        let builder = Client::builder().user_agent(format!("port-tracker/{}", version_label()));
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout);
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
            cache: Arc::new(Mutex::new(TrackingCache::default())),
            ttl: RESPONSE_TTL,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    pub async fn terminals(&self) -> Result<CachedPayload<Vec<Terminal>>, TrackingClientError> {
        let url = self.endpoint(TERMINALS_PATH, &[])?;
        self.load(TrackingCache::terminals, (), async {
            let dtos: Vec<TerminalDto> = self.fetch_data(url).await?;
            Ok::<_, TrackingClientError>(dtos.into_iter().map(Terminal::from).collect())
        })
        .await
    }

    /// Vessel calls grouped by category; `None` loads every terminal.
    pub async fn vessel_board(
        &self,
        terminal: Option<&str>,
    ) -> Result<CachedPayload<VesselBoard>, TrackingClientError> {
        let params = terminal_params(terminal);
        let url = self.endpoint(VESSEL_TRACKING_PATH, &params)?;
        self.load(TrackingCache::vessels, cache_key(terminal), async {
            let dto: VesselTrackingDto = self.fetch_data(url).await?;
            Ok::<_, TrackingClientError>(VesselBoard::from(dto))
        })
        .await
    }

    pub async fn cargo_by_terminal(
        &self,
        terminal: Option<&str>,
    ) -> Result<CachedPayload<Vec<Cargo>>, TrackingClientError> {
        let params = terminal_params(terminal);
        let url = self.endpoint(ALL_CARGO_PATH, &params)?;
        self.load(TrackingCache::cargo, cache_key(terminal), async {
            let dto: CargoListDto = self.fetch_data(url).await?;
            Ok::<_, TrackingClientError>(dto.into_cargo())
        })
        .await
    }

    /// Server-side cargo lookup by exact search string.
    pub async fn search_cargo(
        &self,
        search: &str,
        terminal: Option<&str>,
    ) -> Result<CachedPayload<Vec<Cargo>>, TrackingClientError> {
        let mut params = vec![
            ("searchString", search.to_string()),
            ("operator", CARGO_ID_OPERATOR.to_string()),
        ];
        params.extend(terminal_params(terminal));
        let url = self.endpoint(SEARCH_CARGO_PATH, &params)?;
        let key = format!("search:{search}@{}", cache_key(terminal));
        self.load(TrackingCache::cargo, key, async {
            let dto: CargoListDto = self.fetch_data(url).await?;
            Ok::<_, TrackingClientError>(dto.into_cargo())
        })
        .await
    }

    /// Cargo rows for the grid.
    ///
    /// Numeric searches try the id lookup first; anything else, or an id
    /// lookup that fails or finds nothing, filters the terminal's full list.
    pub async fn find_cargo(
        &self,
        query: &CargoQuery,
    ) -> Result<CachedPayload<Vec<Cargo>>, TrackingClientError> {
        let terminal = query.terminal_filter();
        let Some(term) = query.search_term() else {
            return self.cargo_by_terminal(terminal).await;
        };

        if query.is_cargo_id_search() {
            match self.search_cargo(term, terminal).await {
                Ok(payload) if !payload.data.is_empty() => return Ok(payload),
                Ok(_) => info!("no cargo with id {term}; filtering the full list"),
                Err(err) => warn!("cargo id search for {term} failed: {err}; filtering the full list"),
            }
        }

        let payload = self.cargo_by_terminal(terminal).await?;
        Ok(payload.map(|rows| filter_cargo(rows, term)))
    }

    pub async fn cargo_tracking(
        &self,
        cargo_id: CargoId,
    ) -> Result<CachedPayload<TrackingDetail>, TrackingClientError> {
        let url = self.endpoint(&format!("{CARGO_DETAIL_PATH}/{cargo_id}"), &[])?;
        self.load(TrackingCache::tracking, cargo_id, async {
            let dto: TrackingDetailDto = self.fetch_data(url).await?;
            Ok::<_, TrackingClientError>(TrackingDetail::from(dto))
        })
        .await
    }

    async fn load<K, T, F>(
        &self,
        slot: fn(&mut TrackingCache) -> &mut CacheMap<K, T>,
        key: K,
        fetch: F,
    ) -> Result<CachedPayload<T>, TrackingClientError>
    where
        K: Eq + Hash,
        T: Clone,
        F: Future<Output = Result<T, TrackingClientError>>,
    {
        if let Some(hit) = slot(&mut *self.cache.lock().await).fresh(&key, self.ttl) {
            return Ok(hit);
        }

        match fetch.await {
            Ok(value) => {
                let fetched_at = SystemTime::now();
                slot(&mut *self.cache.lock().await).store(key, value.clone(), fetched_at);
                Ok(CachedPayload::new(value, fetched_at, CacheStatus::Fresh))
            }
            Err(error) => {
                if let Some(stale) = slot(&mut *self.cache.lock().await).stale(&key) {
                    warn!("request failed ({error}); serving cached response");
                    return Ok(stale);
                }
                Err(error)
            }
        }
    }

    async fn fetch_data<T>(&self, url: Url) -> Result<T, TrackingClientError>
    where
        T: DeserializeOwned,
    {
        info!("GET {url}");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        info!("{status} from {url}");
        let decoded = unwrap_envelope(&body);
        if !status.is_success() {
            let message = match decoded {
                Err(TrackingClientError::Api(message)) => message,
                _ => format!("request failed with status {status}"),
            };
            warn!("{url} answered {status}: {message}");
            return Err(TrackingClientError::Api(message));
        }
        decoded.inspect_err(|err| warn!("rejected response from {url}: {err}"))
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, url::ParseError> {
        build_url(&self.base_url, path, params)
    }
}

fn build_url(base: &Url, path: &str, params: &[(&str, String)]) -> Result<Url, url::ParseError> {
    let mut url = base.join(path)?;
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())));
    }
    Ok(url)
}

fn terminal_params(terminal: Option<&str>) -> Vec<(&'static str, String)> {
    terminal
        .map(|code| vec![("terminalCode", code.to_string())])
        .unwrap_or_default()
}

fn cache_key(terminal: Option<&str>) -> String {
    terminal.unwrap_or("*").to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    status_code: Option<i64>,
}

/// Validates the response envelope and decodes its `data` member.
fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> Result<T, TrackingClientError> {
    let envelope: ApiEnvelope = serde_json::from_str(body)?;
    if !envelope.success {
        let message = envelope.message.unwrap_or_else(|| match envelope.status_code {
            Some(code) => format!("request failed with status {code}"),
            None => "request failed".to_string(),
        });
        return Err(TrackingClientError::Api(message));
    }
    let data = envelope
        .data
        .ok_or_else(|| TrackingClientError::Api("response missing data".into()))?;
    Ok(serde_json::from_value(data)?)
}

#[derive(Debug, Deserialize)]
struct TerminalDto {
    #[serde(default, rename = "terminalID")]
    terminal_id: Option<String>,
    #[serde(default, rename = "terminalCode")]
    terminal_code: Option<String>,
    #[serde(default, rename = "terminalName")]
    terminal_name: Option<String>,
}

impl From<TerminalDto> for Terminal {
    fn from(dto: TerminalDto) -> Self {
        Self {
            id: dto.terminal_id,
            code: dto.terminal_code,
            name: dto.terminal_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VesselTrackingDto {
    #[serde(default)]
    tile_categories: Option<Vec<TileCategoryDto>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TileCategoryDto {
    #[serde(default)]
    tile_category: Option<String>,
    #[serde(default)]
    vessels: Option<Vec<VesselCallDto>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VesselCallDto {
    #[serde(default, deserialize_with = "optional_text")]
    vessel_name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    imo: Option<String>,
    #[serde(default, rename = "calluid", deserialize_with = "optional_text")]
    call_uid: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    terminal: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    voyage_in: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    voyage_out: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    berth: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    call_status: Option<String>,
    #[serde(default)]
    eta: Option<String>,
    #[serde(default)]
    etd: Option<String>,
    #[serde(default)]
    ata: Option<String>,
    #[serde(default)]
    atd: Option<String>,
}

impl From<VesselCallDto> for VesselCall {
    fn from(dto: VesselCallDto) -> Self {
        Self {
            vessel_name: dto.vessel_name,
            imo: dto.imo,
            call_uid: dto.call_uid,
            terminal: dto.terminal,
            voyage_in: dto.voyage_in,
            voyage_out: dto.voyage_out,
            berth: dto.berth,
            call_status: dto.call_status,
            eta: dto.eta,
            etd: dto.etd,
            ata: dto.ata,
            atd: dto.atd,
        }
    }
}

impl From<VesselTrackingDto> for VesselBoard {
    fn from(dto: VesselTrackingDto) -> Self {
        let categories = dto
            .tile_categories
            .unwrap_or_default()
            .into_iter()
            .map(|tile| VesselCategory {
                name: tile.tile_category.unwrap_or_default(),
                vessels: tile
                    .vessels
                    .unwrap_or_default()
                    .into_iter()
                    .map(VesselCall::from)
                    .collect(),
            })
            .collect();
        Self { categories }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CargoListDto {
    #[serde(default)]
    cargo_list: Option<Vec<CargoDto>>,
}

impl CargoListDto {
    fn into_cargo(self) -> Vec<Cargo> {
        self.cargo_list
            .unwrap_or_default()
            .into_iter()
            .map(Cargo::from)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CargoDto {
    #[serde(rename = "cargoID")]
    cargo_id: i64,
    #[serde(default)]
    bl_id: i64,
    #[serde(default)]
    bl_number: Option<String>,
    #[serde(default)]
    bl_type: Option<String>,
    #[serde(default)]
    terminal: Option<String>,
    #[serde(default)]
    qty_ordered: f64,
    #[serde(default)]
    total_qty_handled: f64,
    #[serde(default)]
    total_qty_handled_out: f64,
    #[serde(default)]
    cargo_type: Option<String>,
    #[serde(default, rename = "containerID")]
    container_id: Option<String>,
    #[serde(default, rename = "mvvin")]
    mv_vin: Option<String>,
    #[serde(default, rename = "gcmarks")]
    gc_marks: Option<String>,
}

impl From<CargoDto> for Cargo {
    fn from(dto: CargoDto) -> Self {
        Self {
            cargo_id: dto.cargo_id,
            bl_id: dto.bl_id,
            bl_number: dto.bl_number,
            bl_type: dto.bl_type,
            terminal: dto.terminal,
            qty_ordered: dto.qty_ordered,
            total_qty_handled: dto.total_qty_handled,
            total_qty_handled_out: dto.total_qty_handled_out,
            cargo_type: dto.cargo_type,
            container_id: dto.container_id,
            mv_vin: dto.mv_vin,
            gc_marks: dto.gc_marks,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackingDetailDto {
    #[serde(default)]
    tracking_details: Option<Vec<TrackingEventDto>>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackingEventDto {
    event_no: i64,
    #[serde(default)]
    event_description: Option<String>,
    #[serde(default)]
    event_date: Option<String>,
}

impl From<TrackingDetailDto> for TrackingDetail {
    fn from(dto: TrackingDetailDto) -> Self {
        Self {
            events: dto
                .tracking_details
                .unwrap_or_default()
                .into_iter()
                .map(|event| {
                    TrackingEvent::new(
                        event.event_no,
                        event.event_description.as_deref(),
                        event.event_date.as_deref(),
                    )
                })
                .collect(),
            message: dto.message,
        }
    }
}

/// Accepts text, numbers or null for identifier-like columns.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct TextOrNumber;

    impl<'de> serde::de::Visitor<'de> for TextOrNumber {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string, number or null")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }
    }

    deserializer.deserialize_any(TextOrNumber)
}
