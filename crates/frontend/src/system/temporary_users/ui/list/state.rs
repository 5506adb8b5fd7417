use contracts::shared::list_filter::{FetchState, FilterCriteria};
use contracts::system::temporary_users::TemporaryUser;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct TemporaryUsersListState {
    pub fetch: FetchState<TemporaryUser>,
    pub sort_field: String,
    pub sort_ascending: bool,
}

impl Default for TemporaryUsersListState {
    fn default() -> Self {
        Self {
            fetch: FetchState::default(),
            sort_field: "created_at".to_string(),
            sort_ascending: false,
        }
    }
}

/// Username substring plus an optional "active only" switch
pub fn build_criteria(username_query: &str, active_only: bool) -> FilterCriteria {
    let criteria = FilterCriteria::default().contains("username", username_query.trim());
    if active_only {
        criteria.exact("is_active", "true")
    } else {
        criteria
    }
}

pub fn create_state() -> RwSignal<TemporaryUsersListState> {
    RwSignal::new(TemporaryUsersListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_criteria() {
        assert!(build_criteria("  ", false).is_empty());
        let c = build_criteria("tmp", true);
        assert_eq!(c.active_count(), 2);
    }
}
