use crate::domain::entities::{Cargo, CargoId};
use crate::domain::terminals::terminal_filter;

/// Inputs of one cargo grid load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CargoQuery {
    /// Selector value; `""` and `ALL` mean every terminal.
    pub terminal_code: String,
    pub search: String,
}

impl CargoQuery {
    pub fn new(terminal_code: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            terminal_code: terminal_code.into(),
            search: search.into(),
        }
    }

    pub fn terminal_filter(&self) -> Option<&str> {
        terminal_filter(&self.terminal_code)
    }

    /// Trimmed search text, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        Some(self.search.trim()).filter(|term| !term.is_empty())
    }

    /// Purely numeric searches are tried as cargo ids on the server first.
    pub fn is_cargo_id_search(&self) -> bool {
        self.search_term()
            .is_some_and(|term| term.chars().all(|c| c.is_ascii_digit()))
    }
}

/// Client-side match over the identifying cargo fields.
pub fn matches_cargo(cargo: &Cargo, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(&needle))
    };
    contains(&cargo.bl_number)
        || cargo.cargo_id.to_string().contains(&needle)
        || contains(&cargo.container_id)
        || contains(&cargo.mv_vin)
        || contains(&cargo.terminal)
        || contains(&cargo.cargo_type)
}

pub fn filter_cargo(cargo: Vec<Cargo>, term: &str) -> Vec<Cargo> {
    cargo
        .into_iter()
        .filter(|entry| matches_cargo(entry, term))
        .collect()
}

/// Keeps the current selection while it is still listed, otherwise falls
/// back to the first row.
pub fn reconcile_selection(current: Option<CargoId>, rows: &[Cargo]) -> Option<CargoId> {
    match current {
        Some(id) if rows.iter().any(|cargo| cargo.cargo_id == id) => Some(id),
        _ => rows.first().map(|cargo| cargo.cargo_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cargo(id: CargoId, bl: &str, container: Option<&str>) -> Cargo {
        Cargo {
            cargo_id: id,
            bl_number: Some(bl.to_string()),
            container_id: container.map(str::to_string),
            terminal: Some("North Quay".to_string()),
            cargo_type: Some("Container".to_string()),
            ..Cargo::default()
        }
    }

    #[test]
    fn numeric_search_detection() {
        assert!(CargoQuery::new("", " 12345 ").is_cargo_id_search());
        assert!(!CargoQuery::new("", "600BRG40").is_cargo_id_search());
        assert!(!CargoQuery::new("", "   ").is_cargo_id_search());
        assert_eq!(CargoQuery::new("", "   ").search_term(), None);
    }

    #[test]
    fn query_terminal_filter() {
        assert_eq!(CargoQuery::new("ALL", "").terminal_filter(), None);
        assert_eq!(CargoQuery::new("", "").terminal_filter(), None);
        assert_eq!(CargoQuery::new("NQ", "").terminal_filter(), Some("NQ"));
    }

    #[test]
    fn matches_identifying_fields() {
        let entry = cargo(4411, "600BRG40-001", Some("MSCU1234567"));
        assert!(matches_cargo(&entry, "brg40"));
        assert!(matches_cargo(&entry, "441"));
        assert!(matches_cargo(&entry, "mscu"));
        assert!(matches_cargo(&entry, "north"));
        assert!(matches_cargo(&entry, "CONTAINER"));
        assert!(!matches_cargo(&entry, "bulk"));
    }

    #[test]
    fn filter_keeps_matching_rows_in_order() {
        let rows = vec![
            cargo(1, "ABCD1234", None),
            cargo(2, "EFGH5678", None),
            cargo(3, "ABCD9999", None),
        ];
        let filtered = filter_cargo(rows, " abcd ");
        let ids: Vec<CargoId> = filtered.iter().map(|c| c.cargo_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn selection_reconciliation() {
        let rows = vec![cargo(7, "A", None), cargo(8, "B", None)];
        assert_eq!(reconcile_selection(None, &rows), Some(7));
        assert_eq!(reconcile_selection(Some(8), &rows), Some(8));
        assert_eq!(reconcile_selection(Some(99), &rows), Some(7));
        assert_eq!(reconcile_selection(Some(8), &[]), None);
    }
}
