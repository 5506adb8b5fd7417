use contracts::shared::list_filter::ErrorCategory;

pub mod details;
pub mod filters;
pub mod list;
pub mod requests;
pub mod summary;
pub mod table;

/// Tab key prefix of the dispatch detail view; the id follows it
pub const DETAIL_TAB_PREFIX: &str = "a001_dispatch_detail_";

const MSG_DISPATCH_GONE: &str = "This dispatch no longer exists.";

pub fn detail_tab_key(id: &str) -> String {
    format!("{}{}", DETAIL_TAB_PREFIX, id)
}

/// Message for a failed accept/reject. A 404 means the dispatch was removed.
pub fn decision_error_message(category: &ErrorCategory) -> String {
    category.user_message().unwrap_or(MSG_DISPATCH_GONE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::list_filter::{TransientCause, MSG_FORBIDDEN};

    #[test]
    fn test_decision_error_message() {
        assert_eq!(decision_error_message(&ErrorCategory::NotFoundOrEmpty), MSG_DISPATCH_GONE);
        assert_eq!(decision_error_message(&ErrorCategory::Forbidden), MSG_FORBIDDEN);
        let rejected = ErrorCategory::ValidationFailure("Already decided".into());
        assert_eq!(decision_error_message(&rejected), "Already decided");
        let network = ErrorCategory::TransientFailure(TransientCause::Network);
        assert!(decision_error_message(&network).contains("connectivity"));
    }

    #[test]
    fn test_detail_tab_key() {
        assert_eq!(detail_tab_key("d-1"), "a001_dispatch_detail_d-1");
    }
}
