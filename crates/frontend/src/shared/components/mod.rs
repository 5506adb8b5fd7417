pub mod date_input;
pub mod fetch_status;
pub mod filter_panel;
pub mod stat_card;
