use crate::shared::list_filter::{Filterable, Summarizable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Lifecycle of a dispatch request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchStatus {
    Pending,
    Accepted,
    Rejected,
}

impl DispatchStatus {
    pub const ALL: [DispatchStatus; 3] = [
        DispatchStatus::Pending,
        DispatchStatus::Accepted,
        DispatchStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchStatus::Pending => "PENDING",
            DispatchStatus::Accepted => "ACCEPTED",
            DispatchStatus::Rejected => "REJECTED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DispatchStatus::Pending => "Pending",
            DispatchStatus::Accepted => "Accepted",
            DispatchStatus::Rejected => "Rejected",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == code)
    }

    /// Only pending requests can still be accepted or rejected.
    pub fn is_open(&self) -> bool {
        matches!(self, DispatchStatus::Pending)
    }
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product data embedded in a dispatch item. Every field may be missing in
/// what the server sends; see `normalize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchItem {
    pub id: String,
    pub quantity: f64,
    #[serde(default)]
    pub product: Option<ProductInfo>,
}

/// A buyer's request to withdraw products from the warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dispatch {
    pub id: String,
    pub status: DispatchStatus,
    pub supplier_id: String,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub warehouse_location: Option<String>,
    pub requested_at: NaiveDate,
    #[serde(default)]
    pub decided_at: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<DispatchItem>,
}

impl Dispatch {
    pub fn total_quantity(&self) -> f64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Earliest expiration date among the products of this dispatch.
    pub fn earliest_expiration(&self) -> Option<NaiveDate> {
        self.items
            .iter()
            .filter_map(|i| i.product.as_ref()?.expiration_date)
            .min()
    }
}

impl Filterable for Dispatch {
    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "id" => Some(Cow::Borrowed(self.id.as_str())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "supplier_id" => Some(Cow::Borrowed(self.supplier_id.as_str())),
            "supplier_name" => self.supplier_name.as_deref().map(Cow::Borrowed),
            "buyer_name" => self.buyer_name.as_deref().map(Cow::Borrowed),
            "warehouse_location" => self.warehouse_location.as_deref().map(Cow::Borrowed),
            "notes" => self.notes.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.requested_at)
    }
}

impl Summarizable for Dispatch {
    fn status_key(&self) -> String {
        self.status.as_str().to_string()
    }

    fn proximity_date(&self) -> Option<NaiveDate> {
        self.earliest_expiration()
    }

    fn group_key(&self) -> Option<&str> {
        self.warehouse_location.as_deref()
    }
}

/// Admin decision on a pending dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchDecisionDto {
    pub dispatch_id: String,
    pub accept: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_filter::{filter_records, summarize, FilterCriteria, SummaryOptions};
    use chrono::Duration;

    fn dispatch(id: &str, status: DispatchStatus, requested_at: NaiveDate) -> Dispatch {
        Dispatch {
            id: id.to_string(),
            status,
            supplier_id: "sup-1".to_string(),
            supplier_name: Some("North Farms".to_string()),
            buyer_name: None,
            warehouse_location: None,
            requested_at,
            decided_at: None,
            notes: None,
            items: Vec::new(),
        }
    }

    #[test]
    fn test_status_filter_and_summary_scenario() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let records = vec![
            dispatch("d-1", DispatchStatus::Pending, today),
            dispatch("d-2", DispatchStatus::Accepted, today - Duration::days(40)),
        ];

        let criteria = FilterCriteria::default().exact("status", "PENDING");
        let pending = filter_records(&records, &criteria);
        assert_eq!(pending, vec![records[0].clone()]);

        let stats = summarize(&records, today, &SummaryOptions::default());
        assert_eq!(stats.total, 2);
        assert_eq!(stats.count_for("PENDING"), 1);
        assert_eq!(stats.count_for("ACCEPTED"), 1);
        assert_eq!(stats.by_status.len(), 2);
    }

    #[test]
    fn test_summary_total_matches_filter_length() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let records: Vec<Dispatch> = (0..10)
            .map(|i| {
                let status = DispatchStatus::ALL[i % 3];
                dispatch(&format!("d-{i}"), status, today - Duration::days(i as i64))
            })
            .collect();
        let criteria = FilterCriteria::default()
            .exact("status", "REJECTED")
            .date_range(Some(today - Duration::days(6)), Some(today));
        let filtered = filter_records(&records, &criteria);
        let stats = summarize(&filtered, today, &SummaryOptions::default());
        assert_eq!(stats.total, filtered.len());
        assert_eq!(stats.total, 2);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&DispatchStatus::Accepted).unwrap();
        assert_eq!(json, "\"ACCEPTED\"");
        assert_eq!(DispatchStatus::from_code("REJECTED"), Some(DispatchStatus::Rejected));
        assert_eq!(DispatchStatus::from_code("rejected"), None);
    }

    #[test]
    fn test_deserialize_sparse_dispatch() {
        let json = r#"{
            "id": "abc",
            "status": "PENDING",
            "supplier_id": "s1",
            "requested_at": "2024-05-01",
            "items": [{"id": "item-1", "quantity": 2.0}]
        }"#;
        let d: Dispatch = serde_json::from_str(json).unwrap();
        assert_eq!(d.items.len(), 1);
        assert!(d.items[0].product.is_none());
        assert_eq!(d.total_quantity(), 2.0);
        assert_eq!(d.earliest_expiration(), None);
    }
}
