use dioxus::prelude::*;

use crate::domain::DisplayStep;
use crate::ui::theme;

/// Horizontal stepper of a cargo's classified tracking events.
#[component]
pub fn ShipmentTimeline(steps: Vec<DisplayStep>) -> Element {
    if steps.is_empty() {
        return rsx! {
            p { class: "panel-message {theme::text_muted()}", "No tracking events available" }
        };
    }

    rsx! {
        ol { class: "timeline",
            for step in steps {
                TimelineStep { key: "{step.ordinal}", step }
            }
        }
    }
}

#[component]
fn TimelineStep(step: DisplayStep) -> Element {
    let when = step_when(&step);
    let tooltip = step.raw_description.clone().unwrap_or_default();
    rsx! {
        li { class: "timeline-step", title: "{tooltip}",
            span {
                class: "{theme::step_marker(step.transport_mode, step.has_no_data)}",
                "{theme::step_icon(step.transport_mode)}"
            }
            div { class: "timeline-body",
                p { class: "timeline-label", "{step.label}" }
                if let Some(vessel) = step.vessel_name.as_ref() {
                    p { class: "timeline-vessel", "Vessel: {vessel}" }
                }
                if let Some(order) = step.order_number.as_ref() {
                    p { class: "timeline-order", "Order: {order}" }
                }
                if let Some(when) = when {
                    p { class: "timeline-when", "{when}" }
                }
                p { class: "timeline-ordinal", "Event #{step.ordinal}" }
            }
        }
    }
}

fn step_when(step: &DisplayStep) -> Option<String> {
    match (&step.formatted_date, &step.formatted_time) {
        (Some(date), Some(time)) => Some(format!("{date} • {time}")),
        (Some(date), None) => Some(date.clone()),
        _ => None,
    }
}
