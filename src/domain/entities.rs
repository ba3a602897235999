/// Numeric cargo identifier assigned by the tracking backend.
pub type CargoId = i64;

/// Terminal as listed by the tracking backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Terminal {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
}

impl Terminal {
    /// Label used in the terminal selector.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Terminal")
    }

    /// Value used as the selector option; terminals without a code map to "All".
    pub fn option_value(&self) -> &str {
        self.code.as_deref().unwrap_or("")
    }
}

/// One vessel call shown in the vessel tracking panels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VesselCall {
    pub vessel_name: Option<String>,
    pub imo: Option<String>,
    pub call_uid: Option<String>,
    pub terminal: Option<String>,
    pub voyage_in: Option<String>,
    pub voyage_out: Option<String>,
    pub berth: Option<String>,
    pub call_status: Option<String>,
    pub eta: Option<String>,
    pub etd: Option<String>,
    pub ata: Option<String>,
    pub atd: Option<String>,
}

/// Vessel calls grouped by the backend's tile categories.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VesselBoard {
    pub categories: Vec<VesselCategory>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VesselCategory {
    pub name: String,
    pub vessels: Vec<VesselCall>,
}

impl VesselBoard {
    /// Vessels of the named category, matched case-insensitively.
    pub fn vessels(&self, category: &str) -> &[VesselCall] {
        self.categories
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(category))
            .map(|entry| entry.vessels.as_slice())
            .unwrap_or(&[])
    }
}

/// Cargo line as returned by the cargo listing and search endpoints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cargo {
    pub cargo_id: CargoId,
    pub bl_id: i64,
    pub bl_number: Option<String>,
    pub bl_type: Option<String>,
    pub terminal: Option<String>,
    pub qty_ordered: f64,
    pub total_qty_handled: f64,
    pub total_qty_handled_out: f64,
    pub cargo_type: Option<String>,
    pub container_id: Option<String>,
    pub mv_vin: Option<String>,
    pub gc_marks: Option<String>,
}

/// Raw tracking event for one cargo.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackingEvent {
    /// Sequence number that defines chronological order.
    pub ordinal: i64,
    pub description: Option<String>,
    pub timestamp: Option<String>,
}

impl TrackingEvent {
    pub fn new(ordinal: i64, description: Option<&str>, timestamp: Option<&str>) -> Self {
        Self {
            ordinal,
            description: description.map(str::to_string),
            timestamp: timestamp.map(str::to_string),
        }
    }
}

/// Tracking detail payload for one cargo.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingDetail {
    pub events: Vec<TrackingEvent>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vessel_board_lookup_ignores_case() {
        let board = VesselBoard {
            categories: vec![VesselCategory {
                name: "Ships in Port".to_string(),
                vessels: vec![VesselCall {
                    vessel_name: Some("EVERGREEN".to_string()),
                    ..VesselCall::default()
                }],
            }],
        };

        assert_eq!(board.vessels("ships in port").len(), 1);
        assert!(board.vessels("Ships in Anchorage").is_empty());
    }

    #[test]
    fn terminal_fallbacks() {
        let terminal = Terminal::default();
        assert_eq!(terminal.display_name(), "Unknown Terminal");
        assert_eq!(terminal.option_value(), "");
    }
}
