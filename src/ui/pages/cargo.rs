use std::time::Duration;

use dioxus::prelude::*;
use tracing::warn;

use crate::{
    app::{persist_user_state, report_cache_status, CLIENT_UNAVAILABLE},
    domain::{
        build_timeline, reconcile_selection, terminals::ALL_TERMINALS_CODE, AppState,
        CacheResource, Cargo, CargoId, CargoQuery, DisplayStep,
    },
    infra::TrackingClient,
    ui::{
        components::{
            cargo_table::{CargoRow, CargoTable},
            shipment_timeline::ShipmentTimeline,
            terminal_select::TerminalSelect,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[component]
pub fn CargoPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let client = use_context::<Signal<Option<TrackingClient>>>();

    let mut search_input = use_signal(|| state.with(|st| st.cargo_search.clone()));

    // Typing only reaches the query once input has been idle for the debounce window.
    let _debounce = use_resource(move || async move {
        let text = search_input();
        tokio::time::sleep(SEARCH_DEBOUNCE).await;
        if state.peek().cargo_search != text {
            state.with_mut(|st| st.cargo_search = text);
        }
    });

    let query = use_memo(move || {
        state.with(|st| CargoQuery::new(st.cargo_terminal_code(), st.cargo_search.clone()))
    });
    let selected = use_memo(move || state.with(|st| st.selected_cargo));

    let cargo = use_resource(move || async move {
        let query = query();
        load_cargo(state, toasts, client(), query).await
    });

    let tracking = use_resource(move || async move {
        let cargo_id = selected()?;
        Some(load_tracking(state, client(), cargo_id).await)
    });

    let terminals = state.with(|st| st.terminals.clone());
    let terminal_code = query().terminal_code;
    let searching = search_input() != query().search;

    let (rows, loading, failure) = match &*cargo.read() {
        None => (Vec::new(), true, None),
        Some(Ok(list)) => (list.iter().map(CargoRow::from).collect::<Vec<_>>(), false, None),
        Some(Err(message)) => (Vec::new(), false, Some(message.clone())),
    };
    let selected_id = selected();
    let selected_bl = selected_id.and_then(|id| {
        rows.iter()
            .find(|row| row.id == id)
            .map(|row| row.bl_number.clone())
    });

    let on_terminal_change = move |code: String| {
        state.with_mut(|st| st.cargo_terminal = Some(code));
        persist_user_state(&state);
    };

    let on_select = move |id: CargoId| {
        state.with_mut(|st| st.selected_cargo = Some(id));
    };

    let on_clear = move |_| {
        search_input.set(String::new());
        state.with_mut(|st| st.cargo_search.clear());
    };

    rsx! {
        div { class: "page",
            div { class: "page-toolbar",
                h2 { class: "page-title", "Cargo Tracking" }
                TerminalSelect {
                    terminals,
                    value: terminal_code,
                    on_change: on_terminal_change,
                }
                div { class: "field field-grow",
                    label { class: "{theme::label_class()}", "Search" }
                    div { class: "search-box",
                        input {
                            class: "{theme::input_class()}",
                            r#type: "search",
                            value: search_input(),
                            oninput: move |evt| search_input.set(evt.value()),
                            placeholder: "Search by BL Number, Cargo ID, Container ID, VIN, Terminal",
                        }
                        if !search_input().is_empty() {
                            button {
                                class: "{theme::btn_icon()}",
                                title: "Clear search",
                                onclick: on_clear,
                                "✕"
                            }
                        }
                    }
                }
            }

            if let Some(message) = failure {
                p { class: "inline-error", "{message}" }
            }
            if searching {
                p { class: "search-hint {theme::text_muted()}", "Searching..." }
            }

            CargoTable {
                rows,
                selected_id,
                loading: loading || searching,
                on_select,
            }

            if selected_id.is_some() {
                section { class: "{theme::panel()} progress-panel",
                    div { class: "panel-header",
                        h3 { class: "{theme::panel_title()}", "Shipment Progress" }
                        if let Some(bl) = selected_bl {
                            span { class: "{theme::text_muted()}", "BL {bl}" }
                        }
                    }
                    match &*tracking.read() {
                        None => rsx! {
                            p { class: "panel-message {theme::text_muted()}", "Loading tracking data..." }
                        },
                        Some(None) => rsx! {
                            p { class: "panel-message {theme::text_muted()}", "Select a cargo to see tracking" }
                        },
                        Some(Some(Err(_))) => rsx! {
                            p { class: "panel-message inline-error", "Error loading tracking data. Please try selecting another cargo." }
                        },
                        Some(Some(Ok(steps))) if steps.is_empty() => rsx! {
                            p { class: "panel-message {theme::text_muted()}", "No tracking data available for this cargo." }
                        },
                        Some(Some(Ok(steps))) => rsx! {
                            ShipmentTimeline { steps: steps.clone() }
                        },
                    }
                }
            }
        }
    }
}

async fn load_cargo(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    client: Option<TrackingClient>,
    query: CargoQuery,
) -> Result<Vec<Cargo>, String> {
    let Some(client) = client else {
        state.with_mut(|st| st.selected_cargo = None);
        return Err(CLIENT_UNAVAILABLE.to_string());
    };

    match client.find_cargo(&query).await {
        Ok(payload) => {
            let key = query
                .terminal_filter()
                .unwrap_or(ALL_TERMINALS_CODE)
                .to_string();
            state.with_mut(|st| {
                st.selected_cargo = reconcile_selection(st.selected_cargo, &payload.data);
                st.cache
                    .record_fetch(CacheResource::Cargo(key), payload.fetched_at);
            });
            report_cache_status(toasts, payload.status, "cargo");
            Ok(payload.data)
        }
        Err(err) => {
            state.with_mut(|st| st.selected_cargo = None);
            let message = format!("Failed to load cargo: {err}");
            push_toast(toasts, ToastKind::Error, message.clone());
            Err(message)
        }
    }
}

async fn load_tracking(
    mut state: Signal<AppState>,
    client: Option<TrackingClient>,
    cargo_id: CargoId,
) -> Result<Vec<DisplayStep>, String> {
    let client = client.ok_or_else(|| CLIENT_UNAVAILABLE.to_string())?;
    match client.cargo_tracking(cargo_id).await {
        Ok(payload) => {
            state.with_mut(|st| {
                st.cache
                    .record_fetch(CacheResource::Tracking(cargo_id), payload.fetched_at)
            });
            if let Some(message) = payload.data.message.as_deref() {
                warn!("tracking detail for cargo {cargo_id}: {message}");
            }
            Ok(build_timeline(&payload.data.events))
        }
        Err(err) => {
            warn!("failed to load tracking for cargo {cargo_id}: {err}");
            Err(err.to_string())
        }
    }
}
