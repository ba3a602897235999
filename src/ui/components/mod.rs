pub mod cargo_table;
pub mod shipment_timeline;
pub mod terminal_select;
pub mod toast;
pub mod vessel_table;
