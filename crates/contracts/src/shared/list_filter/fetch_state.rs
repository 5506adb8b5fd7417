use super::fetch_error::ErrorCategory;

/// Display state of a fetched collection.
///
/// Pages own one of these per list and feed every classified fetch result
/// through [`FetchState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub items: Vec<T>,
    pub error: Option<ErrorCategory>,
    pub loading: bool,
    pub is_loaded: bool,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
            loading: false,
            is_loaded: false,
        }
    }
}

impl<T> FetchState<T> {
    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    pub fn apply(&mut self, result: Result<Vec<T>, ErrorCategory>) {
        self.loading = false;
        self.is_loaded = true;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(ErrorCategory::NotFoundOrEmpty) => {
                self.items = Vec::new();
                self.error = None;
            }
            Err(category) => {
                self.items = Vec::new();
                self.error = Some(category);
            }
        }
    }

    /// Loaded without error and nothing to show.
    pub fn is_empty_state(&self) -> bool {
        self.is_loaded && !self.loading && self.error.is_none() && self.items.is_empty()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().and_then(ErrorCategory::user_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_filter::fetch_error::{TransientCause, MSG_FORBIDDEN};

    #[test]
    fn test_not_found_clears_previous_error() {
        let mut state: FetchState<u32> = FetchState::default();
        state.start_loading();
        state.apply(Err(ErrorCategory::TransientFailure(TransientCause::Server)));
        assert!(state.error_message().is_some());
        assert!(!state.loading);

        state.apply(Err(ErrorCategory::NotFoundOrEmpty));
        assert_eq!(state.error, None);
        assert!(state.items.is_empty());
        assert!(state.is_empty_state());
    }

    #[test]
    fn test_success_replaces_items() {
        let mut state = FetchState::default();
        state.apply(Ok(vec![1, 2, 3]));
        assert_eq!(state.items, vec![1, 2, 3]);
        state.apply(Err(ErrorCategory::NotFoundOrEmpty));
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_error_hides_stale_items() {
        let mut state = FetchState::default();
        state.apply(Ok(vec!["a"]));
        state.apply(Err(ErrorCategory::Forbidden));
        assert!(state.items.is_empty());
        assert_eq!(state.error_message(), Some(MSG_FORBIDDEN));
        assert!(!state.is_empty_state());
    }
}
