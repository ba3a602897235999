use dioxus::{prelude::*, signals::Signal};
use tracing::{error, info};

use crate::{
    domain::{AppState, CacheResource},
    infra::{ApiConfig, CacheStatus, TrackingClient, TrackingClientError},
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{CargoPage, SettingsPage, VesselsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

/// Shown wherever a request cannot be made because no client could be built.
pub const CLIENT_UNAVAILABLE: &str =
    "Tracking API is not configured. Check the API URL in Settings.";

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/vessels")]
    Vessels {},
    #[route("/cargo")]
    Cargo {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state.clone();
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    // Rebuilt by the settings page when the API URL changes.
    let client = use_signal(|| {
        let base_url = state.with(|st| st.api_base_url.clone());
        connect(base_url.as_deref())
            .inspect_err(|err| error!("failed to initialise tracking client: {err}"))
            .ok()
    });
    use_context_provider(|| client.clone());

    let _terminals = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        move || async move { fetch_terminals(state.clone(), toasts.clone(), client()).await }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Builds a tracking client for the given base URL override.
pub fn connect(base_url: Option<&str>) -> Result<TrackingClient, TrackingClientError> {
    let config = ApiConfig::resolve(base_url)?;
    info!("tracking API at {}", config.base_url);
    TrackingClient::new(&config)
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        error!("failed to persist user state: {err}");
    }
}

/// Warns when a response came from an expired cache entry.
pub fn report_cache_status(toasts: Signal<Vec<ToastMessage>>, status: CacheStatus, what: &str) {
    if status == CacheStatus::Stale {
        push_toast(
            toasts,
            ToastKind::Warning,
            format!("Loaded cached {what}; data might be stale."),
        );
    }
}

async fn fetch_terminals(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    client: Option<TrackingClient>,
) -> Option<CacheStatus> {
    let Some(client) = client else {
        push_toast(toasts, ToastKind::Error, CLIENT_UNAVAILABLE);
        return None;
    };

    match client.terminals().await {
        Ok(payload) => {
            info!("loaded {} terminals", payload.data.len());
            state.with_mut(|st| {
                st.set_terminals(payload.data.clone());
                st.cache
                    .record_fetch(CacheResource::Terminals, payload.fetched_at);
            });
            persist_user_state(&state);
            report_cache_status(toasts, payload.status, "terminals");
            Some(payload.status)
        }
        Err(err) => {
            push_toast(
                toasts,
                ToastKind::Error,
                format!("Failed to load terminals: {err}"),
            );
            None
        }
    }
}

#[component]
pub fn Vessels() -> Element {
    rsx! { Shell { VesselsPage {} } }
}

#[component]
pub fn Cargo() -> Element {
    rsx! { Shell { CargoPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
