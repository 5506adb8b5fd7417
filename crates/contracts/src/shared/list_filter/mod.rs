//! Client-side list processing shared by every list page: filtering,
//! summary statistics and fetch-error classification.

pub mod criteria;
pub mod fetch_error;
pub mod fetch_state;
pub mod summary;

pub use criteria::{filter_records, DateRange, FieldMatch, FilterCriteria, Filterable};
pub use fetch_error::{
    classify, classify_at_boundary, classify_submission, classify_submission_at_boundary,
    server_message_from_body, ErrorCategory, FetchOutcome, PayloadShape, SessionInvalidator,
    TransientCause, MSG_FORBIDDEN, MSG_NETWORK_FAILURE, MSG_SERVER_FAILURE, MSG_SESSION_EXPIRED,
    MSG_VALIDATION_FAILURE,
};
pub use fetch_state::FetchState;
pub use summary::{
    classify_expiry, days_until, summarize, ExpiryWindow, Summarizable, SummaryOptions,
    SummaryStats, DEFAULT_EXPIRING_WINDOW_DAYS, UNASSIGNED_LOCATION,
};

/// Placeholder shown for missing optional values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Value or the "not available" placeholder; rows with missing values are
/// still rendered.
pub fn display_or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_or_na() {
        assert_eq!(display_or_na(Some("A-1")), "A-1");
        assert_eq!(display_or_na(Some(" ")), NOT_AVAILABLE);
        assert_eq!(display_or_na(None), NOT_AVAILABLE);
    }
}
