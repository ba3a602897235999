//! Class helpers so pages share one visual vocabulary with `assets/main.css`.

use crate::domain::TransportMode;
use crate::ui::components::toast::ToastKind;

// ============================================
// BUTTON STYLES
// ============================================

pub fn btn_primary() -> &'static str {
    "btn btn-primary"
}

pub fn btn_secondary() -> &'static str {
    "btn btn-secondary"
}

pub fn btn_icon() -> &'static str {
    "btn-icon"
}

pub fn tab_class(active: bool) -> &'static str {
    if active {
        "nav-tab nav-tab-active"
    } else {
        "nav-tab"
    }
}

// ============================================
// INPUT STYLES
// ============================================

pub fn input_class() -> &'static str {
    "field-input"
}

pub fn label_class() -> &'static str {
    "field-label"
}

// ============================================
// PANEL / TABLE STYLES
// ============================================

pub fn panel() -> &'static str {
    "panel"
}

pub fn panel_title() -> &'static str {
    "panel-title"
}

pub fn table_container() -> &'static str {
    "table-wrap"
}

pub fn row_class(selected: bool) -> &'static str {
    if selected {
        "data-row data-row-selected"
    } else {
        "data-row"
    }
}

pub fn text_muted() -> &'static str {
    "text-muted"
}

// ============================================
// TIMELINE STYLES
// ============================================

/// Marker colour of a timeline node.
pub fn step_marker(mode: TransportMode, has_no_data: bool) -> &'static str {
    if has_no_data {
        return "step-marker step-marker-empty";
    }
    match mode {
        TransportMode::Vessel => "step-marker step-marker-vessel",
        TransportMode::Truck => "step-marker step-marker-truck",
        TransportMode::None => "step-marker",
    }
}

pub fn step_icon(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Vessel => "🚢",
        TransportMode::Truck => "🚚",
        TransportMode::None => "•",
    }
}

// ============================================
// TOASTS
// ============================================

pub fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Info => "toast toast-info",
        ToastKind::Success => "toast toast-success",
        ToastKind::Warning => "toast toast-warning",
        ToastKind::Error => "toast toast-error",
    }
}
