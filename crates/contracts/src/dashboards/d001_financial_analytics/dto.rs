use crate::domain::a002_inventory::Section;
use crate::shared::list_filter::{Filterable, Summarizable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// Request for the financial analytics dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialAnalyticsRequest {
    /// Start date in format "YYYY-MM-DD"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    /// End date in format "YYYY-MM-DD"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}

/// What was spent with one supplier in one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierSpendRow {
    pub supplier_id: String,
    pub supplier_name: String,
    /// First day of the billing period
    pub period: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    pub amount: f64,
}

impl Filterable for SupplierSpendRow {
    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "supplier_id" => Some(Cow::Borrowed(self.supplier_id.as_str())),
            "supplier_name" => Some(Cow::Borrowed(self.supplier_name.as_str())),
            "category" => self.category.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        Some(self.period)
    }
}

impl Summarizable for SupplierSpendRow {
    fn status_key(&self) -> String {
        self.category.clone().unwrap_or_else(|| "UNCATEGORIZED".to_string())
    }

    fn group_key(&self) -> Option<&str> {
        Some(self.supplier_id.as_str())
    }
}

/// Response for the financial analytics dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialAnalyticsResponse {
    #[serde(default)]
    pub spend: Vec<SupplierSpendRow>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Spend of one supplier summed over all periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierSpendTotal {
    pub supplier_id: String,
    pub supplier_name: String,
    pub total: f64,
    pub periods: usize,
}

/// Totals per supplier, largest first; ties ordered by name.
pub fn spend_by_supplier(rows: &[SupplierSpendRow]) -> Vec<SupplierSpendTotal> {
    let mut totals: HashMap<&str, SupplierSpendTotal> = HashMap::new();
    for row in rows {
        let entry = totals
            .entry(row.supplier_id.as_str())
            .or_insert_with(|| SupplierSpendTotal {
                supplier_id: row.supplier_id.clone(),
                supplier_name: row.supplier_name.clone(),
                total: 0.0,
                periods: 0,
            });
        entry.total += row.amount;
        entry.periods += 1;
    }

    let mut result: Vec<SupplierSpendTotal> = totals.into_values().collect();
    result.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.supplier_name.cmp(&b.supplier_name))
    });
    result
}

pub fn total_spend(rows: &[SupplierSpendRow]) -> f64 {
    rows.iter().map(|r| r.amount).sum()
}

/// Monthly maintenance cost of all sections
pub fn total_maintenance_cost(sections: &[Section]) -> f64 {
    sections.iter().map(|s| s.maintenance_cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_filter::{filter_records, summarize, FilterCriteria, SummaryOptions};

    fn row(id: &str, name: &str, month: u32, amount: f64) -> SupplierSpendRow {
        SupplierSpendRow {
            supplier_id: id.to_string(),
            supplier_name: name.to_string(),
            period: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
            category: Some("FOOD".to_string()),
            amount,
        }
    }

    #[test]
    fn test_spend_by_supplier() {
        let rows = vec![
            row("s1", "North Farms", 1, 100.0),
            row("s2", "Delta Dairy", 1, 250.0),
            row("s1", "North Farms", 2, 200.0),
            row("s3", "Alpha Mills", 2, 300.0),
        ];
        let totals = spend_by_supplier(&rows);
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].supplier_name, "Alpha Mills");
        assert_eq!(totals[1].supplier_name, "North Farms");
        assert_eq!(totals[1].total, 300.0);
        assert_eq!(totals[1].periods, 2);
        assert_eq!(totals[2].supplier_name, "Delta Dairy");
        assert_eq!(total_spend(&rows), 850.0);
    }

    #[test]
    fn test_period_filter_then_summary() {
        let rows = vec![
            row("s1", "North Farms", 1, 100.0),
            row("s2", "Delta Dairy", 2, 250.0),
            row("s1", "North Farms", 3, 200.0),
        ];
        let c = FilterCriteria::default().date_range(
            NaiveDate::from_ymd_opt(2024, 2, 1),
            NaiveDate::from_ymd_opt(2024, 3, 31),
        );
        let filtered = filter_records(&rows, &c);
        let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let stats = summarize(&filtered, today, &SummaryOptions::default());
        assert_eq!(stats.total, 2);
        assert_eq!(stats.distinct_groups, 2);
        assert_eq!(stats.count_for("FOOD"), 2);
    }

    #[test]
    fn test_request_compares_by_period() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 1);
        let a = FinancialAnalyticsRequest {
            date_from: jan,
            date_to: None,
        };
        assert_eq!(a, a.clone());
        assert_ne!(a, FinancialAnalyticsRequest::default());
        assert_eq!(serde_json::to_string(&a).unwrap(), r#"{"date_from":"2024-01-01"}"#);
    }
}
