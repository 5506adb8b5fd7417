use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Default length of the "expiring soon" window, in days.
pub const DEFAULT_EXPIRING_WINDOW_DAYS: i64 = 30;

/// Group value for records that are not yet assigned (e.g. a product not
/// placed into a section).
pub const UNASSIGNED_LOCATION: &str = "pending";

/// Record that contributes to [`SummaryStats`].
pub trait Summarizable {
    /// Status/category bucket, e.g. `"PENDING"`.
    fn status_key(&self) -> String;

    /// Date checked by the proximity predicate (expiration date, due date).
    fn proximity_date(&self) -> Option<NaiveDate> {
        None
    }

    /// Grouping field used for the distinct-groups count (location, supplier).
    fn group_key(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    pub expiring_window_days: i64,
    /// Group values excluded from the distinct-groups count
    pub unassigned_groups: Vec<String>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            expiring_window_days: DEFAULT_EXPIRING_WINDOW_DAYS,
            unassigned_groups: vec![UNASSIGNED_LOCATION.to_string()],
        }
    }
}

impl SummaryOptions {
    fn is_unassigned(&self, group: &str) -> bool {
        let group = group.trim();
        group.is_empty()
            || self
                .unassigned_groups
                .iter()
                .any(|s| s.trim().eq_ignore_ascii_case(group))
    }
}

/// Where a date falls relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryWindow {
    Expired,
    ExpiringSoon,
    Later,
}

/// Whole days from `today` to `date` (negative when `date` is in the past).
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

pub fn classify_expiry(date: NaiveDate, today: NaiveDate, window_days: i64) -> ExpiryWindow {
    let days = days_until(date, today);
    if days < 0 {
        ExpiryWindow::Expired
    } else if days <= window_days {
        ExpiryWindow::ExpiringSoon
    } else {
        ExpiryWindow::Later
    }
}

/// Aggregates over the currently filtered list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub expiring_soon: usize,
    pub expired: usize,
    /// Distinct known groups; unassigned records are not counted here
    pub distinct_groups: usize,
    /// Records sitting in an unassigned group
    pub unassigned: usize,
}

impl SummaryStats {
    pub fn count_for(&self, status: &str) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }
}

/// Computes the summary from scratch. Nothing is cached between calls.
pub fn summarize<T: Summarizable>(
    records: &[T],
    today: NaiveDate,
    options: &SummaryOptions,
) -> SummaryStats {
    let mut stats = SummaryStats {
        total: records.len(),
        ..SummaryStats::default()
    };
    let mut groups: BTreeSet<&str> = BTreeSet::new();

    for record in records {
        *stats.by_status.entry(record.status_key()).or_insert(0) += 1;

        if let Some(date) = record.proximity_date() {
            match classify_expiry(date, today, options.expiring_window_days) {
                ExpiryWindow::Expired => stats.expired += 1,
                ExpiryWindow::ExpiringSoon => stats.expiring_soon += 1,
                ExpiryWindow::Later => {}
            }
        }

        match record.group_key() {
            Some(group) if !options.is_unassigned(group) => {
                groups.insert(group.trim());
            }
            Some(_) => stats.unassigned += 1,
            None => {}
        }
    }

    stats.distinct_groups = groups.len();
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    struct Item {
        status: &'static str,
        expires: Option<NaiveDate>,
        location: Option<&'static str>,
    }

    impl Summarizable for Item {
        fn status_key(&self) -> String {
            self.status.to_string()
        }

        fn proximity_date(&self) -> Option<NaiveDate> {
            self.expires
        }

        fn group_key(&self) -> Option<&str> {
            self.location
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn item(
        status: &'static str,
        offset_days: Option<i64>,
        location: Option<&'static str>,
    ) -> Item {
        Item {
            status,
            expires: offset_days.map(|o| today() + Duration::days(o)),
            location,
        }
    }

    #[test]
    fn test_expiry_window_boundaries() {
        let t = today();
        assert_eq!(classify_expiry(t + Duration::days(30), t, 30), ExpiryWindow::ExpiringSoon);
        assert_eq!(classify_expiry(t + Duration::days(31), t, 30), ExpiryWindow::Later);
        assert_eq!(classify_expiry(t, t, 30), ExpiryWindow::ExpiringSoon);
        assert_eq!(classify_expiry(t - Duration::days(1), t, 30), ExpiryWindow::Expired);
    }

    #[test]
    fn test_summarize_counts() {
        let records = vec![
            item("AVAILABLE", Some(30), Some("A-1")),
            item("AVAILABLE", Some(31), Some("A-1")),
            item("RESERVED", Some(-1), Some("B-2")),
            item("AVAILABLE", None, Some("pending")),
            item("RESERVED", Some(0), None),
        ];
        let stats = summarize(&records, today(), &SummaryOptions::default());
        assert_eq!(stats.total, 5);
        assert_eq!(stats.count_for("AVAILABLE"), 3);
        assert_eq!(stats.count_for("RESERVED"), 2);
        assert_eq!(stats.count_for("DISPATCHED"), 0);
        assert_eq!(stats.expiring_soon, 2);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.distinct_groups, 2);
        assert_eq!(stats.unassigned, 1);
    }

    #[test]
    fn test_sentinel_comparison_ignores_case_and_blanks() {
        let records = vec![
            item("AVAILABLE", None, Some("Pending")),
            item("AVAILABLE", None, Some("  ")),
            item("AVAILABLE", None, Some("C-3")),
        ];
        let stats = summarize(&records, today(), &SummaryOptions::default());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.distinct_groups, 1);
        assert_eq!(stats.unassigned, 2);
    }

    #[test]
    fn test_custom_window() {
        let records = vec![item("AVAILABLE", Some(10), None), item("AVAILABLE", Some(5), None)];
        let options = SummaryOptions {
            expiring_window_days: 7,
            ..SummaryOptions::default()
        };
        let stats = summarize(&records, today(), &options);
        assert_eq!(stats.expiring_soon, 1);
    }

    #[test]
    fn test_empty_input() {
        let stats = summarize::<Item>(&[], today(), &SummaryOptions::default());
        assert_eq!(stats, SummaryStats::default());
    }
}
