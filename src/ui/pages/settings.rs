use std::time::SystemTime;

use dioxus::prelude::*;

use crate::{
    app::{connect, persist_user_state},
    domain::{AppState, CacheResource},
    infra::{config::parse_base_url, TrackingClient, RESPONSE_TTL},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::version::{version_label, APP_NAME},
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let client = use_context::<Signal<Option<TrackingClient>>>();

    let current_url = client.with(|c| c.as_ref().map(|c| c.base_url().to_string()));
    let mut url_input = use_signal(|| current_url.clone().unwrap_or_default());

    let mut cache_entries = state.with(|st| {
        st.cache
            .iter()
            .map(|(resource, time)| {
                (
                    cache_label(resource),
                    humanize_age(*time),
                    st.cache.is_stale(resource, RESPONSE_TTL),
                )
            })
            .collect::<Vec<_>>()
    });
    cache_entries.sort_by(|a, b| a.0.cmp(&b.0));

    let on_apply = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let mut client = client.clone();
        move |_| {
            let raw = url_input().trim().to_string();
            if let Err(err) = parse_base_url(&raw) {
                push_toast(toasts.clone(), ToastKind::Error, format!("Invalid API URL: {err}"));
                return;
            }

            match connect(Some(&raw)) {
                Ok(rebuilt) => {
                    url_input.set(rebuilt.base_url().to_string());
                    client.set(Some(rebuilt));
                    state.with_mut(|st| st.api_base_url = Some(raw.clone()));
                    persist_user_state(&state);
                    push_toast(toasts.clone(), ToastKind::Success, "Updated the API URL.");
                }
                Err(err) => {
                    push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        format!("Failed to connect to {raw}: {err}"),
                    );
                }
            }
        }
    };

    let on_reset = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let mut client = client.clone();
        move |_| {
            state.with_mut(|st| st.api_base_url = None);
            persist_user_state(&state);
            match connect(None) {
                Ok(rebuilt) => {
                    url_input.set(rebuilt.base_url().to_string());
                    client.set(Some(rebuilt));
                    push_toast(toasts.clone(), ToastKind::Info, "Restored the default API URL.");
                }
                Err(err) => {
                    client.set(None);
                    push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        format!("Failed to restore the default API URL: {err}"),
                    );
                }
            }
        }
    };

    let on_clear_cache = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let client = client.clone();
        move |_| {
            state.with_mut(|st| st.cache.clear());
            if let Some(active) = client.peek().clone() {
                spawn(async move { active.clear_cache().await });
            }
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Cleared cached responses. Data will refresh on next fetch.",
            );
        }
    };

    rsx! {
        div { class: "page settings",
            section {
                class: "{theme::panel()}",
                h2 { class: "{theme::panel_title()}", "API Connection" }
                div { class: "field",
                    label { class: "{theme::label_class()}", "Base URL" }
                    input {
                        class: "{theme::input_class()}",
                        value: url_input(),
                        oninput: move |evt| url_input.set(evt.value()),
                        placeholder: "https://localhost:7115",
                    }
                }
                if current_url.is_none() {
                    p { class: "inline-error", "No API client is active." }
                }
                div { class: "button-row",
                    button { class: "{theme::btn_primary()}", onclick: on_apply, "Apply" }
                    button { class: "{theme::btn_secondary()}", onclick: on_reset, "Reset" }
                }
            }

            section {
                class: "{theme::panel()}",
                h2 { class: "{theme::panel_title()}", "Cache Status" }
                if cache_entries.is_empty() {
                    p { class: "{theme::text_muted()}", "No cached fetches yet." }
                } else {
                    ul {
                        class: "cache-list",
                        for (label, age, stale) in cache_entries {
                            li { class: "cache-entry",
                                span { "{label}" }
                                span {
                                    class: "{theme::text_muted()}",
                                    if stale { "{age} (stale)" } else { "{age}" }
                                }
                            }
                        }
                    }
                }
                button { class: "{theme::btn_secondary()}", onclick: on_clear_cache, "Clear Cache" }
            }

            section {
                class: "{theme::panel()} about",
                h2 { class: "{theme::panel_title()}", "About" }
                p { "{APP_NAME} {version_label()}" }
            }
        }
    }
}

fn cache_label(resource: &CacheResource) -> String {
    match resource {
        CacheResource::Terminals => "Terminals".to_string(),
        CacheResource::Vessels(code) => format!("Vessels ({code})"),
        CacheResource::Cargo(code) => format!("Cargo ({code})"),
        CacheResource::Tracking(id) => format!("Tracking (cargo {id})"),
    }
}

fn humanize_age(updated_at: SystemTime) -> String {
    let age = SystemTime::now()
        .duration_since(updated_at)
        .unwrap_or_default()
        .as_secs();
    if age < 60 {
        format!("{age}s ago")
    } else if age < 3_600 {
        format!("{}m ago", age / 60)
    } else if age < 86_400 {
        format!("{}h ago", age / 3_600)
    } else {
        format!("{}d ago", age / 86_400)
    }
}
