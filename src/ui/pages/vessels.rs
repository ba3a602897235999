use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, report_cache_status, CLIENT_UNAVAILABLE},
    domain::{
        terminal_filter, terminals::ALL_TERMINALS_CODE, AppState, CacheResource, VesselBoard,
        VesselCall,
    },
    infra::TrackingClient,
    ui::{
        components::{
            terminal_select::TerminalSelect,
            toast::{push_toast, ToastKind, ToastMessage},
            vessel_table::VesselTable,
        },
        theme,
    },
};

const PANELS: [&str; 4] = [
    "Expected Arrivals",
    "Expected Departures",
    "Ships in Port",
    "Ships in Anchorage",
];

#[component]
pub fn VesselsPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let client = use_context::<Signal<Option<TrackingClient>>>();
    let mut maximized = use_signal(|| None::<&'static str>);

    let terminals = state.with(|st| st.terminals.clone());
    let selected = use_memo(move || state.with(|st| st.vessel_terminal_code()));

    let board = use_resource(move || async move {
        let code = selected();
        load_board(state, toasts, client(), code).await
    });

    let (current, loading, failure) = match &*board.read() {
        None => (VesselBoard::default(), true, None),
        Some(Ok(loaded)) => (loaded.clone(), false, None),
        Some(Err(message)) => (VesselBoard::default(), false, Some(message.clone())),
    };

    let on_terminal_change = move |code: String| {
        state.with_mut(|st| st.vessel_terminal = Some(code));
        persist_user_state(&state);
    };

    rsx! {
        div { class: "page",
            div { class: "page-toolbar",
                h2 { class: "page-title", "Vessel Tracking" }
                TerminalSelect {
                    terminals,
                    value: selected(),
                    on_change: on_terminal_change,
                }
            }
            if let Some(message) = failure {
                p { class: "inline-error", "{message}" }
            }
            div { class: "panel-grid",
                for title in PANELS {
                    VesselPanel {
                        key: "{title}",
                        title,
                        vessels: current.vessels(title).to_vec(),
                        loading,
                        on_maximize: move |_| maximized.set(Some(title)),
                    }
                }
            }
            if let Some(title) = maximized() {
                div { class: "dialog-backdrop",
                    div { class: "dialog",
                        div { class: "dialog-header",
                            h3 { class: "{theme::panel_title()}", "{title}" }
                            button {
                                class: "{theme::btn_icon()}",
                                title: "Close",
                                onclick: move |_| maximized.set(None),
                                "✕"
                            }
                        }
                        VesselTable { vessels: current.vessels(title).to_vec(), loading }
                    }
                }
            }
        }
    }
}

#[component]
fn VesselPanel(
    title: &'static str,
    vessels: Vec<VesselCall>,
    loading: bool,
    on_maximize: EventHandler<()>,
) -> Element {
    rsx! {
        section { class: "{theme::panel()}",
            div { class: "panel-header",
                h3 { class: "{theme::panel_title()}", "{title}" }
                button {
                    class: "{theme::btn_icon()}",
                    title: "Maximize",
                    onclick: move |_| on_maximize.call(()),
                    "⤢"
                }
            }
            VesselTable { vessels, loading }
        }
    }
}

async fn load_board(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    client: Option<TrackingClient>,
    code: String,
) -> Result<VesselBoard, String> {
    let client = client.ok_or_else(|| CLIENT_UNAVAILABLE.to_string())?;
    let terminal = terminal_filter(&code);

    match client.vessel_board(terminal).await {
        Ok(payload) => {
            let key = terminal.unwrap_or(ALL_TERMINALS_CODE).to_string();
            state.with_mut(|st| {
                st.cache
                    .record_fetch(CacheResource::Vessels(key), payload.fetched_at)
            });
            report_cache_status(toasts, payload.status, "vessel calls");
            Ok(payload.data)
        }
        Err(err) => {
            let message = format!("Failed to load vessel tracking: {err}");
            push_toast(toasts, ToastKind::Error, message.clone());
            Err(message)
        }
    }
}
