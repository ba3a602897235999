use dioxus::prelude::*;

use crate::domain::VesselCall;
use crate::ui::theme;
use crate::util::time::format_date_time;

const COLUMNS: [&str; 12] = [
    "Vessel Name",
    "IMO",
    "Call UID",
    "Terminal",
    "Voy-In",
    "Voy-Out",
    "Berth",
    "Status",
    "ETA",
    "ETD",
    "ATA",
    "ATD",
];

/// One vessel panel's grid.
#[component]
pub fn VesselTable(vessels: Vec<VesselCall>, loading: bool) -> Element {
    let rows = vessels.iter().map(VesselRow::from).collect::<Vec<_>>();
    let colspan = COLUMNS.len().to_string();

    rsx! {
        div {
            class: "{theme::table_container()}",
            table {
                class: "data-table",
                thead {
                    tr {
                        for column in COLUMNS {
                            th { "{column}" }
                        }
                    }
                }
                tbody {
                    if loading {
                        tr {
                            td { class: "table-message {theme::text_muted()}", colspan: "{colspan}", "Loading..." }
                        }
                    } else if rows.is_empty() {
                        tr {
                            td { class: "table-message {theme::text_muted()}", colspan: "{colspan}", "No records found" }
                        }
                    } else {
                        for row in rows {
                            tr {
                                class: "{theme::row_class(false)}",
                                for cell in row.cells {
                                    td { "{cell}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

struct VesselRow {
    cells: [String; 12],
}

impl From<&VesselCall> for VesselRow {
    fn from(call: &VesselCall) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let date = |value: &Option<String>| format_date_time(value.as_deref());
        Self {
            cells: [
                text(&call.vessel_name),
                text(&call.imo),
                text(&call.call_uid),
                text(&call.terminal),
                text(&call.voyage_in),
                text(&call.voyage_out),
                text(&call.berth),
                text(&call.call_status),
                date(&call.eta),
                date(&call.etd),
                date(&call.ata),
                date(&call.atd),
            ],
        }
    }
}
