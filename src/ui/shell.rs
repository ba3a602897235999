use dioxus::prelude::*;

use crate::app::Route;
use crate::ui::theme;
use crate::util::{assets, version::APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    rsx! {
        div { class: "app-root",
            header { class: "app-header",
                div { class: "app-header-inner",
                    div { class: "brand",
                        img { class: "brand-icon", src: assets::favicon_data_uri(), alt: "" }
                        span { class: "brand-badge", "PT" }
                        h1 { class: "brand-title", "{APP_NAME}" }
                    }
                    nav { class: "nav-tabs",
                        NavButton {
                            active: matches!(current_route, Route::Vessels {}),
                            onclick: move |_| { nav.push(Route::Vessels {}); },
                            label: "Vessel Tracking",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Cargo {}),
                            onclick: move |_| { nav.push(Route::Cargo {}); },
                            label: "Cargo Tracking",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Settings {}),
                            onclick: move |_| { nav.push(Route::Settings {}); },
                            label: "Settings",
                        }
                    }
                }
            }
            main { class: "app-main",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: "{theme::tab_class(active)}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
