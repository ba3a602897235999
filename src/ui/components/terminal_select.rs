use dioxus::prelude::*;

use crate::domain::{terminal_options, Terminal};
use crate::ui::theme;

#[component]
pub fn TerminalSelect(
    terminals: Vec<Terminal>,
    value: String,
    on_change: EventHandler<String>,
) -> Element {
    let options = terminal_options(&terminals);
    rsx! {
        div { class: "field",
            label { class: "{theme::label_class()}", "Terminal" }
            select {
                class: "{theme::input_class()}",
                value: "{value}",
                onchange: move |evt| on_change.call(evt.value()),
                for entry in options {
                    option {
                        key: "{entry.value}",
                        value: "{entry.value}",
                        selected: entry.value == value,
                        "{entry.label}"
                    }
                }
            }
        }
    }
}
