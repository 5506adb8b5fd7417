use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Record that can be matched against [`FilterCriteria`].
///
/// Field names are the same snake_case keys the list pages use for sorting
/// and for the query string, e.g. `"status"` or `"buyer_name"`.
pub trait Filterable {
    /// Value of a named field, `None` when the record has no such field or
    /// the field is not filled.
    fn field_value(&self, field: &str) -> Option<Cow<'_, str>>;

    /// Date checked by the date-range criterion.
    fn filter_date(&self) -> Option<NaiveDate>;
}

/// How a single field is matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldMatch {
    /// Whole-value, case-sensitive equality (enum/status fields)
    Exact(String),
    /// Case-sensitive substring (free-text fields)
    Contains(String),
}

impl FieldMatch {
    fn pattern(&self) -> &str {
        match self {
            FieldMatch::Exact(v) | FieldMatch::Contains(v) => v,
        }
    }

    /// Empty pattern means the user cleared the input.
    pub fn is_set(&self) -> bool {
        !self.pattern().is_empty()
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        if !self.is_set() {
            return true;
        }
        match (self, value) {
            (_, None) => false,
            (FieldMatch::Exact(expected), Some(actual)) => actual == expected,
            (FieldMatch::Contains(needle), Some(actual)) => actual.contains(needle.as_str()),
        }
    }
}

/// Inclusive `[start, end]` date range. Applied only when both bounds are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_set(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => date.is_some_and(|d| start <= d && d <= end),
            _ => true,
        }
    }
}

/// Set of list filters. Every unset field imposes no constraint; set fields
/// are combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub fields: BTreeMap<String, FieldMatch>,
    #[serde(default)]
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn exact(mut self, field: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(field.to_string(), FieldMatch::Exact(value.into()));
        self
    }

    pub fn contains(mut self, field: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(field.to_string(), FieldMatch::Contains(value.into()));
        self
    }

    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_range = DateRange::new(start, end);
        self
    }

    /// Replace or clear a field criterion in place (used by filter inputs).
    pub fn set_field(&mut self, field: &str, criterion: Option<FieldMatch>) {
        match criterion {
            Some(c) if c.is_set() => {
                self.fields.insert(field.to_string(), c);
            }
            _ => {
                self.fields.remove(field);
            }
        }
    }

    /// True when no criterion constrains the result.
    pub fn is_empty(&self) -> bool {
        !self.date_range.is_set() && self.fields.values().all(|c| !c.is_set())
    }

    /// Number of active criteria, shown on the filter panel badge.
    pub fn active_count(&self) -> usize {
        let fields = self.fields.values().filter(|c| c.is_set()).count();
        fields + usize::from(self.date_range.is_set())
    }

    /// Flat `field=value` pairs for the list endpoint's query string.
    /// Dates go out as `date_from`/`date_to` only when the range is set.
    pub fn query_params(&self) -> BTreeMap<String, String> {
        let mut params: BTreeMap<String, String> = self
            .fields
            .iter()
            .filter(|(_, c)| c.is_set())
            .map(|(field, c)| (field.clone(), c.pattern().to_string()))
            .collect();
        if let (Some(start), Some(end)) = (self.date_range.start, self.date_range.end) {
            params.insert("date_from".to_string(), start.to_string());
            params.insert("date_to".to_string(), end.to_string());
        }
        params
    }

    pub fn matches<T: Filterable + ?Sized>(&self, record: &T) -> bool {
        if !self.date_range.contains(record.filter_date()) {
            return false;
        }
        self.fields
            .iter()
            .all(|(field, criterion)| criterion.matches(record.field_value(field).as_deref()))
    }
}

/// Records passing all set criteria, in source order.
///
/// The source slice is only borrowed; callers keep the full collection and
/// re-run this on every criteria change.
pub fn filter_records<T: Filterable + Clone>(records: &[T], criteria: &FilterCriteria) -> Vec<T> {
    if criteria.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| criteria.matches(*r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        status: &'static str,
        name: Option<&'static str>,
        date: Option<NaiveDate>,
    }

    impl Filterable for Row {
        fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
            match field {
                "status" => Some(Cow::Borrowed(self.status)),
                "name" => self.name.map(Cow::Borrowed),
                _ => None,
            }
        }

        fn filter_date(&self) -> Option<NaiveDate> {
            self.date
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                status: "PENDING",
                name: Some("Acme Foods"),
                date: Some(d(2024, 3, 1)),
            },
            Row {
                status: "ACCEPTED",
                name: Some("Beta Goods"),
                date: Some(d(2024, 3, 15)),
            },
            Row {
                status: "PENDING",
                name: None,
                date: None,
            },
        ]
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let data = rows();
        assert_eq!(filter_records(&data, &FilterCriteria::default()), data);
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let data = rows();
        let pending = FilterCriteria::default().exact("status", "PENDING");
        assert_eq!(filter_records(&data, &pending).len(), 2);

        let lower = FilterCriteria::default().exact("status", "pending");
        assert!(filter_records(&data, &lower).is_empty());

        let prefix = FilterCriteria::default().exact("status", "PEND");
        assert!(filter_records(&data, &prefix).is_empty());
    }

    #[test]
    fn test_contains_match() {
        let data = rows();
        let c = FilterCriteria::default().contains("name", "Foods");
        let result = filter_records(&data, &c);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, Some("Acme Foods"));

        let c = FilterCriteria::default().contains("name", "foods");
        assert!(filter_records(&data, &c).is_empty());
    }

    #[test]
    fn test_missing_field_does_not_match_set_criterion() {
        let data = rows();
        let c = FilterCriteria::default().contains("name", "a");
        assert!(filter_records(&data, &c).iter().all(|r| r.name.is_some()));

        let unknown = FilterCriteria::default().exact("warehouse", "A");
        assert!(filter_records(&data, &unknown).is_empty());
    }

    #[test]
    fn test_empty_value_is_unset() {
        let data = rows();
        let c = FilterCriteria::default().contains("name", "").exact("status", "");
        assert!(c.is_empty());
        assert_eq!(filter_records(&data, &c), data);
    }

    #[test]
    fn test_date_range_inclusive_bounds() {
        let data = rows();
        let c = FilterCriteria::default().date_range(Some(d(2024, 3, 1)), Some(d(2024, 3, 15)));
        assert_eq!(filter_records(&data, &c).len(), 2);

        let c = FilterCriteria::default().date_range(Some(d(2024, 3, 2)), Some(d(2024, 3, 14)));
        assert!(filter_records(&data, &c).is_empty());
    }

    #[test]
    fn test_half_open_date_range_is_unconstrained() {
        let data = rows();
        let c = FilterCriteria::default().date_range(Some(d(2024, 3, 10)), None);
        assert_eq!(filter_records(&data, &c), data);
        let c = FilterCriteria::default().date_range(None, Some(d(2024, 1, 1)));
        assert_eq!(filter_records(&data, &c), data);
    }

    #[test]
    fn test_all_criteria_are_combined() {
        let data = rows();
        let c = FilterCriteria::default()
            .exact("status", "PENDING")
            .date_range(Some(d(2024, 1, 1)), Some(d(2024, 12, 31)));
        let result = filter_records(&data, &c);
        assert_eq!(result, vec![data[0].clone()]);
    }

    #[test]
    fn test_filter_is_idempotent_and_pure() {
        let data = rows();
        let snapshot = data.clone();
        let c = FilterCriteria::default().exact("status", "PENDING").contains("name", "Ac");
        let once = filter_records(&data, &c);
        let twice = filter_records(&once, &c);
        assert_eq!(once, twice);
        assert_eq!(data, snapshot);
    }

    #[test]
    fn test_set_field_clears_on_empty() {
        let mut c = FilterCriteria::default().exact("status", "PENDING");
        assert_eq!(c.active_count(), 1);
        c.set_field("status", Some(FieldMatch::Exact(String::new())));
        assert!(c.fields.is_empty());
        c.set_field("name", Some(FieldMatch::Contains("x".into())));
        c.set_field("name", None);
        assert!(c.is_empty());
    }

    #[test]
    fn test_query_params_skip_unset() {
        let criteria = FilterCriteria::default()
            .exact("status", "PENDING")
            .contains("buyer_name", "")
            .date_range(NaiveDate::from_ymd_opt(2024, 1, 1), None);
        let params = criteria.query_params();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("status").map(String::as_str), Some("PENDING"));

        let ranged = criteria.date_range(
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 1, 31),
        );
        let params = ranged.query_params();
        assert_eq!(params.get("date_from").map(String::as_str), Some("2024-01-01"));
        assert_eq!(params.get("date_to").map(String::as_str), Some("2024-01-31"));
    }
}
