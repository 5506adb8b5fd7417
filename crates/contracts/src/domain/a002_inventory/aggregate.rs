use crate::shared::list_filter::{Filterable, Summarizable, UNASSIGNED_LOCATION};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Available,
    Reserved,
    Dispatched,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [
        StockStatus::Available,
        StockStatus::Reserved,
        StockStatus::Dispatched,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Available => "AVAILABLE",
            StockStatus::Reserved => "RESERVED",
            StockStatus::Dispatched => "DISPATCHED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StockStatus::Available => "Available",
            StockStatus::Reserved => "Reserved",
            StockStatus::Dispatched => "Dispatched",
        }
    }
}

/// Single product line stored in the warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryProduct {
    pub id: String,
    pub lot_id: String,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub category: Option<String>,
    pub quantity: f64,
    pub status: StockStatus,
    /// Section name, or `"pending"` while the product is not placed yet
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
}

fn default_location() -> String {
    UNASSIGNED_LOCATION.to_string()
}

impl InventoryProduct {
    pub fn is_placed(&self) -> bool {
        !self.location.trim().eq_ignore_ascii_case(UNASSIGNED_LOCATION)
    }
}

impl Filterable for InventoryProduct {
    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "id" => Some(Cow::Borrowed(self.id.as_str())),
            "lot_id" => Some(Cow::Borrowed(self.lot_id.as_str())),
            "name" => Some(Cow::Borrowed(self.name.as_str())),
            "code" => Some(Cow::Borrowed(self.code.as_str())),
            "category" => self.category.as_deref().map(Cow::Borrowed),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "location" => Some(Cow::Borrowed(self.location.as_str())),
            _ => None,
        }
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        self.expiration_date
    }
}

impl Summarizable for InventoryProduct {
    fn status_key(&self) -> String {
        self.status.as_str().to_string()
    }

    fn proximity_date(&self) -> Option<NaiveDate> {
        self.expiration_date
    }

    fn group_key(&self) -> Option<&str> {
        Some(self.location.as_str())
    }
}

/// Batch of products imported together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: String,
    pub code: String,
    pub import_date: NaiveDate,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub products: Vec<InventoryProduct>,
}

impl Lot {
    pub fn total_quantity(&self) -> f64 {
        self.products.iter().map(|p| p.quantity).sum()
    }
}

/// Flatten lots into product rows, attaching the owning lot to each row.
pub fn products_by_lot(lots: &[Lot]) -> Vec<(Lot, InventoryProduct)> {
    lots.iter()
        .flat_map(|lot| {
            let header = Lot {
                products: Vec::new(),
                ..lot.clone()
            };
            lot.products
                .iter()
                .cloned()
                .map(move |p| (header.clone(), p))
        })
        .collect()
}

/// Product rows of all lots, in lot order.
pub fn all_products(lots: &[Lot]) -> Vec<InventoryProduct> {
    lots.iter().flat_map(|l| l.products.iter().cloned()).collect()
}

/// Physical subdivision of the warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub maintenance_cost: f64,
    pub capacity: f64,
    pub occupied: f64,
}

impl Section {
    /// Occupancy in percent, 0 for sections without capacity.
    pub fn occupancy_percent(&self) -> f64 {
        if self.capacity <= 0.0 {
            return 0.0;
        }
        (self.occupied / self.capacity * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_filter::{filter_records, summarize, FilterCriteria, SummaryOptions};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn product(id: &str, location: &str, expires_in: Option<i64>) -> InventoryProduct {
        InventoryProduct {
            id: id.to_string(),
            lot_id: "lot-1".to_string(),
            name: format!("Item {id}"),
            code: id.to_uppercase(),
            category: None,
            quantity: 5.0,
            status: StockStatus::Available,
            location: location.to_string(),
            expiration_date: expires_in.map(|d| today() + Duration::days(d)),
        }
    }

    fn lots() -> Vec<Lot> {
        vec![
            Lot {
                id: "lot-1".to_string(),
                code: "L-001".to_string(),
                import_date: today() - Duration::days(10),
                supplier_name: Some("North Farms".to_string()),
                products: vec![product("p1", "A-1", Some(5)), product("p2", "pending", Some(-2))],
            },
            Lot {
                id: "lot-2".to_string(),
                code: "L-002".to_string(),
                import_date: today(),
                supplier_name: None,
                products: vec![product("p3", "B-4", Some(90))],
            },
        ]
    }

    #[test]
    fn test_inventory_summary() {
        let products = all_products(&lots());
        let stats = summarize(&products, today(), &SummaryOptions::default());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.expiring_soon, 1);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.distinct_groups, 2);
        assert_eq!(stats.unassigned, 1);
    }

    #[test]
    fn test_products_by_lot_keeps_lot_header() {
        let rows = products_by_lot(&lots());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].0.code, "L-002");
        assert!(rows.iter().all(|(lot, _)| lot.products.is_empty()));
    }

    #[test]
    fn test_location_filter() {
        let products = all_products(&lots());
        let c = FilterCriteria::default().exact("location", "pending");
        let pending = filter_records(&products, &c);
        assert_eq!(pending.len(), 1);
        assert!(!pending[0].is_placed());
    }

    #[test]
    fn test_missing_location_defaults_to_pending() {
        let json =
            r#"{"id":"p","lot_id":"l","name":"n","code":"c","quantity":1.0,"status":"RESERVED"}"#;
        let p: InventoryProduct = serde_json::from_str(json).unwrap();
        assert_eq!(p.location, "pending");
        assert_eq!(p.status, StockStatus::Reserved);
    }

    #[test]
    fn test_section_occupancy() {
        let section = Section {
            id: "s".into(),
            name: "Cold room".into(),
            maintenance_cost: 1200.0,
            capacity: 200.0,
            occupied: 50.0,
        };
        assert_eq!(section.occupancy_percent(), 25.0);
        let empty = Section {
            capacity: 0.0,
            ..section
        };
        assert_eq!(empty.occupancy_percent(), 0.0);
    }
}
