//! Shipment timeline derivation.
//!
//! Tracking events carry free-text descriptions such as
//! `"MV EVERGREEN arrived at berth"`. Each event is reduced to a short step
//! label by ordered rule tables: transport type, action, order type, then
//! label synthesis. Within each table the first matching rule wins, so the
//! order of the entries is the precedence.

use crate::domain::entities::TrackingEvent;
use crate::util::time::{format_date, format_time, parse_timestamp};

pub const NO_DETAILS_LABEL: &str = "No Details Found";

/// Coarse transport category used for step styling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportMode {
    Vessel,
    Truck,
    #[default]
    None,
}

/// One rendered node of the shipment timeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayStep {
    pub label: String,
    pub transport_mode: TransportMode,
    pub formatted_date: Option<String>,
    pub formatted_time: Option<String>,
    pub raw_description: Option<String>,
    pub ordinal: i64,
    pub has_no_data: bool,
    /// Vessel named in a `[MV <name>]` segment.
    pub vessel_name: Option<String>,
    /// First bracketed document reference, e.g. `[RO/2024/17]`.
    pub order_number: Option<String>,
}

/// Steps for a cargo's events, ascending by ordinal.
pub fn build_timeline(events: &[TrackingEvent]) -> Vec<DisplayStep> {
    let mut ordered: Vec<&TrackingEvent> = events.iter().collect();
    ordered.sort_by_key(|event| event.ordinal);
    ordered.into_iter().map(classify).collect()
}

pub fn classify(event: &TrackingEvent) -> DisplayStep {
    let Some(description) = event
        .description
        .as_deref()
        .filter(|text| !is_missing_description(text))
    else {
        return DisplayStep {
            label: NO_DETAILS_LABEL.to_string(),
            ordinal: event.ordinal,
            has_no_data: true,
            ..DisplayStep::default()
        };
    };

    let transport_type = transport_type(description);
    let transport_mode = transport_type
        .as_deref()
        .map(transport_mode)
        .unwrap_or_default();
    let signals = Signals {
        description,
        transport_type,
        action: action(description),
        order_type: order_type(description),
    };
    let timestamp = event.timestamp.as_deref().and_then(parse_timestamp);

    DisplayStep {
        label: synthesize_label(&signals),
        transport_mode,
        formatted_date: timestamp.map(format_date),
        formatted_time: timestamp.map(format_time),
        raw_description: Some(description.to_string()),
        ordinal: event.ordinal,
        has_no_data: false,
        vessel_name: vessel_name(description),
        order_number: order_number(description),
    }
}

fn is_missing_description(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null")
}

// ---------------------------------------------------------------------------
// Transport type
// ---------------------------------------------------------------------------

type TransportRule = fn(&str) -> Option<String>;

const TRANSPORT_RULES: &[(&str, TransportRule)] = &[
    ("word before `call`", word_before_call),
    ("MV/SPIL vessel prefix", vessel_prefix),
    ("road transport word", road_word),
    ("water transport word", water_word),
    ("capitalized first word", capitalized_first_word),
];

const ROAD_WORDS: &[&str] = &["Truck", "Trailer", "Vehicle", "Transport"];
const WATER_WORDS: &[&str] = &["Ship", "Boat", "Vessel"];

fn transport_type(description: &str) -> Option<String> {
    TRANSPORT_RULES
        .iter()
        .find_map(|(_, rule)| rule(description))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `Vessel call ...` -> `Vessel`.
fn word_before_call(description: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets identical to `description`.
    let lower = description.to_ascii_lowercase();
    let mut search_from = 0;
    while let Some(found) = lower[search_from..].find("call") {
        let start = search_from + found;
        let end = start + "call".len();
        search_from = end;

        if lower[end..].chars().next().is_some_and(is_word_char) {
            continue;
        }
        let before = &description[..start];
        let gap = before.trim_end();
        if gap.len() == before.len() {
            continue;
        }
        let word_start = gap
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_word_char(*c))
            .last()
            .map(|(idx, _)| idx);
        if let Some(idx) = word_start {
            return Some(gap[idx..].to_string());
        }
    }
    None
}

/// `MV <name>` / `SPIL <name>` -> `Vessel`.
fn vessel_prefix(description: &str) -> Option<String> {
    let tokens: Vec<&str> = description.split_whitespace().collect();
    tokens
        .windows(2)
        .any(|pair| {
            let head = pair[0].trim_start_matches(|c: char| !is_word_char(c));
            matches!(head, "MV" | "SPIL")
        })
        .then(|| "Vessel".to_string())
}

fn road_word(description: &str) -> Option<String> {
    first_whole_word(description, ROAD_WORDS)
}

fn water_word(description: &str) -> Option<String> {
    first_whole_word(description, WATER_WORDS)
}

/// First word of `description` equal (ignoring case) to a candidate, in the
/// candidate's spelling.
fn first_whole_word(description: &str, candidates: &[&str]) -> Option<String> {
    description
        .split(|c: char| !is_word_char(c))
        .find_map(|word| {
            candidates
                .iter()
                .find(|candidate| candidate.eq_ignore_ascii_case(word))
                .map(|candidate| candidate.to_string())
        })
}

fn capitalized_first_word(description: &str) -> Option<String> {
    let first = description.split_whitespace().next()?;
    let mut chars = first.chars();
    let head = chars.next()?;
    let rest = chars.as_str();
    let matches = head.is_ascii_uppercase()
        && !rest.is_empty()
        && rest.chars().all(|c| c.is_ascii_lowercase());
    matches.then(|| first.to_string())
}

// ---------------------------------------------------------------------------
// Transport mode
// ---------------------------------------------------------------------------

const VESSEL_MARKERS: &[&str] = &["vessel", "ship", "boat", "mv", "spil", "maritime"];
const TRUCK_MARKERS: &[&str] = &["truck", "trailer", "owndrive", "vehicle", "transport", "drive"];

fn transport_mode(transport_type: &str) -> TransportMode {
    let lower = transport_type.to_lowercase();
    if VESSEL_MARKERS.iter().any(|marker| lower.contains(marker)) {
        TransportMode::Vessel
    } else if TRUCK_MARKERS.iter().any(|marker| lower.contains(marker)) {
        TransportMode::Truck
    } else {
        TransportMode::None
    }
}

// ---------------------------------------------------------------------------
// Action and order type
// ---------------------------------------------------------------------------

/// Lower-case needle and the action it maps to.
const ACTION_RULES: &[(&str, &str)] = &[
    ("expected to arrive", "Expected to Arrive"),
    ("expected to depart", "Expected to Depart"),
    ("was created", "Call Created"),
    ("arrived", "Arrived"),
    ("departed", "Departed"),
    ("was received", "Received"),
    ("loaded", "Loaded"),
    ("discharged", "Discharged"),
    ("delivered", "Delivered"),
    ("customs", "Customs Processing"),
];

const ORDER_TYPES: &[&str] = &[
    "Inward Transfer Order",
    "Outward Transfer Order",
    "Reception Order",
    "Loading Order",
    "Discharge Order",
    "Delivery Order",
];

fn action(description: &str) -> Option<&'static str> {
    let lower = description.to_lowercase();
    ACTION_RULES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, action)| *action)
}

fn order_type(description: &str) -> Option<&'static str> {
    ORDER_TYPES
        .iter()
        .find(|phrase| description.contains(*phrase))
        .copied()
}

// ---------------------------------------------------------------------------
// Label synthesis
// ---------------------------------------------------------------------------

struct Signals<'a> {
    description: &'a str,
    transport_type: Option<String>,
    action: Option<&'static str>,
    order_type: Option<&'static str>,
}

type LabelRule = fn(&Signals<'_>) -> Option<String>;

const LABEL_RULES: &[(&str, LabelRule)] = &[
    ("created order", created_order_label),
    ("transport and action", transport_action_label),
    ("action only", action_label),
    ("leading words", leading_words_label),
];

fn synthesize_label(signals: &Signals<'_>) -> String {
    LABEL_RULES
        .iter()
        .find_map(|(_, rule)| rule(signals))
        .unwrap_or_else(|| signals.description.trim().to_string())
}

fn created_order_label(signals: &Signals<'_>) -> Option<String> {
    let order = signals.order_type?;
    signals
        .description
        .to_lowercase()
        .contains("was created")
        .then(|| format!("{order} Created"))
}

fn transport_action_label(signals: &Signals<'_>) -> Option<String> {
    let transport = signals.transport_type.as_deref()?;
    let action = signals.action?;
    Some(format!("{transport} {action}"))
}

fn action_label(signals: &Signals<'_>) -> Option<String> {
    signals.action.map(str::to_string)
}

fn leading_words_label(signals: &Signals<'_>) -> Option<String> {
    let words: Vec<&str> = signals.description.split_whitespace().collect();
    if words.len() < 2 {
        return Some(signals.description.trim().to_string());
    }
    Some(words.iter().take(3).copied().collect::<Vec<_>>().join(" "))
}

// ---------------------------------------------------------------------------
// Supplementary details
// ---------------------------------------------------------------------------

fn vessel_name(description: &str) -> Option<String> {
    let mut rest = description;
    while let Some(pos) = rest.find("[MV") {
        let after = &rest[pos + "[MV".len()..];
        let trimmed = after.trim_start();
        if trimmed.len() < after.len() {
            if let Some(close) = trimmed.find(']') {
                let name = trimmed[..close].split(':').next().unwrap_or_default().trim();
                if !name.is_empty() {
                    return Some(name.to_string());
                }
            }
        }
        rest = after;
    }
    None
}

fn order_number(description: &str) -> Option<String> {
    description.split('[').skip(1).find_map(|segment| {
        let (inner, _) = segment.split_once(']')?;
        let valid = !inner.is_empty()
            && inner
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '/');
        valid.then(|| inner.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(ordinal: i64, description: Option<&str>, timestamp: Option<&str>) -> DisplayStep {
        classify(&TrackingEvent::new(ordinal, description, timestamp))
    }

    fn label(description: &str) -> String {
        step(1, Some(description), None).label
    }

    #[test]
    fn missing_description_yields_sentinel() {
        let result = step(5, None, Some("2024-01-01"));
        assert!(result.has_no_data);
        assert_eq!(result.label, NO_DETAILS_LABEL);
        assert_eq!(result.ordinal, 5);
        assert_eq!(result.transport_mode, TransportMode::None);
        assert!(result.formatted_date.is_none());
        assert!(result.formatted_time.is_none());
        assert!(result.raw_description.is_none());
        assert!(result.vessel_name.is_none());
        assert!(result.order_number.is_none());
    }

    #[test]
    fn literal_null_and_blank_descriptions_are_missing() {
        for text in ["null", "NULL", "Null", "", "   "] {
            let result = step(2, Some(text), Some("2024-01-01"));
            assert!(result.has_no_data, "{text:?} should be missing");
            assert_eq!(result.label, NO_DETAILS_LABEL);
        }
    }

    #[test]
    fn vessel_call_creation() {
        let result = step(1, Some("Vessel call [ABC] was created"), None);
        assert_eq!(result.label, "Vessel Call Created");
        assert_eq!(result.transport_mode, TransportMode::Vessel);
        assert!(!result.has_no_data);
    }

    #[test]
    fn order_creation_wins_over_transport() {
        assert_eq!(
            label("Reception Order [XYZ] was created"),
            "Reception Order Created"
        );
        assert_eq!(
            label("Truck call for Delivery Order [DO/77] was created"),
            "Delivery Order Created"
        );
        assert_eq!(
            label("Inward Transfer Order [IT1] was created"),
            "Inward Transfer Order Created"
        );
    }

    #[test]
    fn order_phrase_without_creation_uses_later_rules() {
        assert_eq!(label("Loading Order [LO1] loaded"), "Loading Loaded");
    }

    #[test]
    fn mv_prefix_arrival() {
        let result = step(
            3,
            Some("MV EVERGREEN arrived at berth"),
            Some("2025-08-18T09:00:00Z"),
        );
        assert_eq!(result.transport_mode, TransportMode::Vessel);
        assert_eq!(result.label, "Vessel Arrived");
        assert_eq!(result.formatted_date.as_deref(), Some("18/08/2025"));
        assert_eq!(result.formatted_time.as_deref(), Some("09:00 am"));
        assert_eq!(
            result.raw_description.as_deref(),
            Some("MV EVERGREEN arrived at berth")
        );
    }

    #[test]
    fn unrecognized_text_falls_back_to_leading_words() {
        assert_eq!(
            label("Some unrecognized free text here"),
            "Some unrecognized free"
        );
        assert_eq!(label("lowercase  two"), "lowercase two");
        assert_eq!(label("Standalone"), "Standalone");
    }

    #[test]
    fn sentinel_timestamp_is_dropped() {
        let result = step(4, Some("Cargo loaded"), Some("0001-01-01T00:00:00"));
        assert!(result.formatted_date.is_none());
        assert!(result.formatted_time.is_none());
        assert!(!result.has_no_data);
    }

    #[test]
    fn invalid_timestamp_is_dropped() {
        let result = step(4, Some("Cargo loaded"), Some("yesterday"));
        assert!(result.formatted_date.is_none());
    }

    #[test]
    fn word_before_call_rule() {
        assert_eq!(word_before_call("Vessel call [ABC]").as_deref(), Some("Vessel"));
        assert_eq!(word_before_call("truck CALL done").as_deref(), Some("truck"));
        assert_eq!(word_before_call("Vessel recall issued"), None);
        assert_eq!(word_before_call("Vessel callsign"), None);
        assert_eq!(word_before_call("call first"), None);
    }

    #[test]
    fn vessel_prefix_rule() {
        assert_eq!(vessel_prefix("MV EVERGREEN arrived").as_deref(), Some("Vessel"));
        assert_eq!(vessel_prefix("Loaded on [SPIL NIKEN]").as_deref(), Some("Vessel"));
        assert_eq!(vessel_prefix("ends with MV"), None);
        assert_eq!(vessel_prefix("mv lowercase"), None);
    }

    #[test]
    fn whole_word_rules() {
        assert_eq!(road_word("Loaded on trailer 7").as_deref(), Some("Trailer"));
        assert_eq!(road_word("Transporter ready"), None);
        assert_eq!(water_word("cargo on the ship.").as_deref(), Some("Ship"));
        assert_eq!(water_word("Shipment"), None);
    }

    #[test]
    fn road_words_outrank_water_words() {
        assert_eq!(
            transport_type("Moved from ship to truck").as_deref(),
            Some("Truck")
        );
    }

    #[test]
    fn capitalized_first_word_rule() {
        assert_eq!(capitalized_first_word("Cargo received").as_deref(), Some("Cargo"));
        assert_eq!(capitalized_first_word("CARGO received"), None);
        assert_eq!(capitalized_first_word("A b"), None);
        assert_eq!(capitalized_first_word("cargo"), None);
    }

    #[test]
    fn transport_mode_markers() {
        assert_eq!(transport_mode("Vessel"), TransportMode::Vessel);
        assert_eq!(transport_mode("Maritime"), TransportMode::Vessel);
        assert_eq!(transport_mode("Owndrive"), TransportMode::Truck);
        assert_eq!(transport_mode("Trailer"), TransportMode::Truck);
        assert_eq!(transport_mode("Cargo"), TransportMode::None);
    }

    #[test]
    fn action_rules_respect_order() {
        assert_eq!(action("Vessel is EXPECTED TO ARRIVE"), Some("Expected to Arrive"));
        assert_eq!(action("Cargo was received and loaded"), Some("Received"));
        assert_eq!(action("Arrived after customs"), Some("Arrived"));
        assert_eq!(action("held at customs"), Some("Customs Processing"));
        assert_eq!(action("nothing happened"), None);
    }

    #[test]
    fn action_without_transport() {
        assert_eq!(label("cargo delivered to consignee"), "Delivered");
    }

    #[test]
    fn capitalized_word_combines_with_action() {
        assert_eq!(label("Cargo discharged from hold"), "Cargo Discharged");
    }

    #[test]
    fn order_type_is_case_sensitive() {
        assert_eq!(order_type("reception order created"), None);
        assert_eq!(order_type("New Discharge Order"), Some("Discharge Order"));
    }

    #[test]
    fn extracts_vessel_name_and_order_number() {
        let result = step(
            1,
            Some("Vessel call [MV EVER GIVEN:0421] for [RO/2024/17] was created"),
            None,
        );
        assert_eq!(result.vessel_name.as_deref(), Some("EVER GIVEN"));
        assert_eq!(result.order_number.as_deref(), Some("RO/2024/17"));
    }

    #[test]
    fn order_number_requires_upper_alphanumerics() {
        assert_eq!(order_number("see [abc] and [X-1]"), None);
        assert_eq!(order_number("[[ABC123]"), Some("ABC123".to_string()));
    }

    #[test]
    fn timeline_is_sorted_and_complete() {
        let events = vec![
            TrackingEvent::new(3, Some("MV EVERGREEN departed"), None),
            TrackingEvent::new(1, Some("Vessel call [ABC] was created"), None),
            TrackingEvent::new(2, None, None),
        ];
        let steps = build_timeline(&events);
        assert_eq!(steps.len(), events.len());
        let ordinals: Vec<i64> = steps.iter().map(|step| step.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
        assert_eq!(steps[0].label, "Vessel Call Created");
        assert!(steps[1].has_no_data);
        assert_eq!(steps[2].label, "Vessel Departed");
    }

    #[test]
    fn classification_is_deterministic() {
        let event = TrackingEvent::new(
            9,
            Some("Truck [TR12] arrived at gate"),
            Some("2024-02-02T08:00:00Z"),
        );
        assert_eq!(classify(&event), classify(&event));
        assert_eq!(build_timeline(&[event.clone()]), build_timeline(&[event]));
    }

    #[test]
    fn empty_input_gives_empty_timeline() {
        assert!(build_timeline(&[]).is_empty());
    }
}
