use contracts::domain::a002_inventory::Lot;
use contracts::shared::list_filter::{FetchState, FilterCriteria};
use leptos::prelude::*;

use crate::shared::date_utils::parse_date_input;

#[derive(Clone, Debug, Default)]
pub struct InventoryListState {
    pub lots: FetchState<Lot>,
}

pub fn create_state() -> RwSignal<InventoryListState> {
    RwSignal::new(InventoryListState::default())
}

/// Filter form of the inventory browser
#[derive(Clone, Copy)]
pub struct InventoryFilterInputs {
    pub name: RwSignal<String>,
    pub code: RwSignal<String>,
    pub status: RwSignal<String>,
    pub location: RwSignal<String>,
    pub expires_from: RwSignal<String>,
    pub expires_to: RwSignal<String>,
}

impl InventoryFilterInputs {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            code: RwSignal::new(String::new()),
            status: RwSignal::new(String::new()),
            location: RwSignal::new(String::new()),
            expires_from: RwSignal::new(String::new()),
            expires_to: RwSignal::new(String::new()),
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        build_criteria(
            &self.name.get(),
            &self.code.get(),
            &self.status.get(),
            &self.location.get(),
            &self.expires_from.get(),
            &self.expires_to.get(),
        )
    }

    pub fn reset(&self) {
        for input in [
            self.name,
            self.code,
            self.status,
            self.location,
            self.expires_from,
            self.expires_to,
        ] {
            input.set(String::new());
        }
    }
}

pub fn build_criteria(
    name: &str,
    code: &str,
    status: &str,
    location: &str,
    expires_from: &str,
    expires_to: &str,
) -> FilterCriteria {
    FilterCriteria::default()
        .contains("name", name.trim())
        .contains("code", code.trim())
        .exact("status", status.trim())
        .exact("location", location.trim())
        .date_range(parse_date_input(expires_from), parse_date_input(expires_to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_inventory::{InventoryProduct, StockStatus};
    use chrono::NaiveDate;

    fn product(location: &str, expires: Option<NaiveDate>) -> InventoryProduct {
        InventoryProduct {
            id: "p1".into(),
            lot_id: "l1".into(),
            name: "Frozen peas".into(),
            code: "FP-01".into(),
            category: None,
            quantity: 10.0,
            status: StockStatus::Available,
            location: location.into(),
            expiration_date: expires,
        }
    }

    #[test]
    fn test_location_is_exact() {
        let c = build_criteria("", "", "", "A-1", "", "");
        assert!(c.matches(&product("A-1", None)));
        assert!(!c.matches(&product("A-10", None)));
    }

    #[test]
    fn test_expiration_range() {
        let c = build_criteria("peas", "", "AVAILABLE", "", "2024-05-01", "2024-05-31");
        assert!(c.matches(&product("A-1", NaiveDate::from_ymd_opt(2024, 5, 31))));
        assert!(!c.matches(&product("A-1", NaiveDate::from_ymd_opt(2024, 6, 1))));
        assert!(!c.matches(&product("A-1", None)));
    }
}
