use dioxus::prelude::*;

use crate::domain::{Cargo, CargoId};
use crate::ui::theme;

#[derive(Clone, PartialEq)]
pub struct CargoRow {
    pub id: CargoId,
    pub bl_number: String,
    pub cargo_type: String,
    pub terminal: String,
    pub qty_ordered: String,
    pub qty_handled: String,
    pub container_id: String,
    pub mv_vin: String,
    pub gc_marks: String,
}

impl From<&Cargo> for CargoRow {
    fn from(cargo: &Cargo) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            id: cargo.cargo_id,
            bl_number: text(&cargo.bl_number),
            cargo_type: text(&cargo.cargo_type),
            terminal: text(&cargo.terminal),
            qty_ordered: format_quantity(cargo.qty_ordered),
            qty_handled: format_quantity(cargo.total_qty_handled),
            container_id: text(&cargo.container_id),
            mv_vin: text(&cargo.mv_vin),
            gc_marks: text(&cargo.gc_marks),
        }
    }
}

/// Whole quantities without decimals, fractional ones to two places.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[component]
pub fn CargoTable(
    rows: Vec<CargoRow>,
    selected_id: Option<CargoId>,
    loading: bool,
    on_select: EventHandler<CargoId>,
) -> Element {
    let is_empty = rows.is_empty();
    let rendered_rows = rows
        .into_iter()
        .map(|row| {
            let selected = selected_id == Some(row.id);
            (row, selected)
        })
        .collect::<Vec<_>>();
    rsx! {
        div {
            class: "{theme::table_container()}",
            table {
                class: "data-table",
                thead {
                    tr {
                        th { "BL Number" }
                        th { "Type" }
                        th { "Terminal" }
                        th { class: "numeric", "Qty Ordered" }
                        th { class: "numeric", "Qty Handled" }
                        th { "Container ID" }
                        th { "MV VIN" }
                        th { "GC Marks" }
                    }
                }
                tbody {
                    if loading {
                        tr {
                            td { class: "table-message {theme::text_muted()}", colspan: "8", "Loading..." }
                        }
                    } else {
                        for (row, selected) in rendered_rows {
                            CargoRowView {
                                key: "{row.id}",
                                row,
                                selected,
                                on_select: on_select.clone(),
                            }
                        }
                        if is_empty {
                            tr {
                                td { class: "table-message {theme::text_muted()}", colspan: "8", "No records found" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct CargoRowViewProps {
    row: CargoRow,
    selected: bool,
    on_select: EventHandler<CargoId>,
}

#[component]
fn CargoRowView(props: CargoRowViewProps) -> Element {
    let row = props.row;
    let select_id = row.id;
    rsx! {
        tr {
            class: "{theme::row_class(props.selected)}",
            onclick: move |_| props.on_select.call(select_id),
            td { class: "strong", "{row.bl_number}" }
            td { "{row.cargo_type}" }
            td { "{row.terminal}" }
            td { class: "numeric", "{row.qty_ordered}" }
            td { class: "numeric", "{row.qty_handled}" }
            td { "{row.container_id}" }
            td { "{row.mv_vin}" }
            td { "{row.gc_marks}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_drop_trailing_zeros_only_when_whole() {
        assert_eq!(format_quantity(12.0), "12");
        assert_eq!(format_quantity(3.5), "3.50");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn row_uses_blank_for_missing_text() {
        let cargo = Cargo {
            cargo_id: 9,
            bl_number: Some("BL-9".to_string()),
            qty_ordered: 4.0,
            ..Cargo::default()
        };
        let row = CargoRow::from(&cargo);
        assert_eq!(row.id, 9);
        assert_eq!(row.bl_number, "BL-9");
        assert_eq!(row.container_id, "");
        assert_eq!(row.qty_ordered, "4");
    }
}
