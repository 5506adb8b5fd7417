//! Classification of failed (or empty) fetches into displayable categories.
//!
//! Classification happens once, at the fetch boundary. Everything above the
//! boundary only sees [`ErrorCategory`], never transport errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const MSG_SESSION_EXPIRED: &str = "Session expired, please sign in again.";
pub const MSG_FORBIDDEN: &str = "No permission to access this resource.";
pub const MSG_SERVER_FAILURE: &str = "Something went wrong. Please try again later.";
pub const MSG_NETWORK_FAILURE: &str =
    "Could not reach the server. Please check your connectivity and try again.";
pub const MSG_VALIDATION_FAILURE: &str = "The submitted data was rejected.";

/// Shape of a response body, as far as classification cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// JSON array with no elements
    EmptyCollection,
    /// JSON array with `n > 0` elements
    Collection(usize),
    /// Any other JSON value
    Object,
    /// No body at all
    Empty,
    /// Body present but not JSON
    Unparseable,
}

impl PayloadShape {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) if items.is_empty() => PayloadShape::EmptyCollection,
            Value::Array(items) => PayloadShape::Collection(items.len()),
            Value::Null => PayloadShape::Empty,
            _ => PayloadShape::Object,
        }
    }

    pub fn from_body(body: &str) -> Self {
        if body.trim().is_empty() {
            return PayloadShape::Empty;
        }
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_json(&value),
            Err(_) => PayloadShape::Unparseable,
        }
    }
}

/// What came back from a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Response { status: u16, payload: PayloadShape },
    /// Request was sent but no response arrived
    NoResponse,
}

impl FetchOutcome {
    pub fn response(status: u16, payload: PayloadShape) -> Self {
        FetchOutcome::Response { status, payload }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchOutcome::Response { status, .. } => Some(*status),
            FetchOutcome::NoResponse => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransientCause {
    /// No response received
    Network,
    /// Response received with an unexpected status
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ErrorCategory {
    #[error("{}", MSG_SESSION_EXPIRED)]
    SessionExpired,
    #[error("{}", MSG_FORBIDDEN)]
    Forbidden,
    /// Valid empty state, not an error
    #[error("no records")]
    NotFoundOrEmpty,
    #[error("{}", transient_message(.0))]
    TransientFailure(TransientCause),
    #[error("{0}")]
    ValidationFailure(String),
}

fn transient_message(cause: &TransientCause) -> &'static str {
    match cause {
        TransientCause::Network => MSG_NETWORK_FAILURE,
        TransientCause::Server => MSG_SERVER_FAILURE,
    }
}

impl ErrorCategory {
    /// False only for [`ErrorCategory::NotFoundOrEmpty`].
    pub fn is_error(&self) -> bool {
        !matches!(self, ErrorCategory::NotFoundOrEmpty)
    }

    /// Message to show the user. `None` means render the empty state instead.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ErrorCategory::SessionExpired => Some(MSG_SESSION_EXPIRED),
            ErrorCategory::Forbidden => Some(MSG_FORBIDDEN),
            ErrorCategory::NotFoundOrEmpty => None,
            ErrorCategory::TransientFailure(cause) => Some(transient_message(cause)),
            ErrorCategory::ValidationFailure(message) => Some(message.as_str()),
        }
    }

    pub fn requires_sign_in(&self) -> bool {
        matches!(self, ErrorCategory::SessionExpired)
    }
}

/// Pure mapping from a fetch outcome to a category. `None` means success.
///
/// 404 and a 2xx with an empty array, `null` or no body at all map to
/// `NotFoundOrEmpty`: some endpoints answer 404 or 204 when a role
/// legitimately has no records.
pub fn classify(outcome: &FetchOutcome) -> Option<ErrorCategory> {
    let (status, payload) = match outcome {
        FetchOutcome::NoResponse => {
            return Some(ErrorCategory::TransientFailure(TransientCause::Network))
        }
        FetchOutcome::Response { status, payload } => (*status, *payload),
    };

    match status {
        401 => Some(ErrorCategory::SessionExpired),
        403 => Some(ErrorCategory::Forbidden),
        404 => Some(ErrorCategory::NotFoundOrEmpty),
        200..=299 if matches!(payload, PayloadShape::EmptyCollection | PayloadShape::Empty) => {
            Some(ErrorCategory::NotFoundOrEmpty)
        }
        200..=299 => None,
        _ => Some(ErrorCategory::TransientFailure(TransientCause::Server)),
    }
}

/// Classification for create/update calls. Rejected payloads surface the
/// server's own message when it sent one.
pub fn classify_submission(
    outcome: &FetchOutcome,
    server_message: Option<&str>,
) -> Option<ErrorCategory> {
    match outcome.status() {
        Some(400 | 409 | 422) => {
            let message = server_message
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(MSG_VALIDATION_FAILURE);
            Some(ErrorCategory::ValidationFailure(message.to_string()))
        }
        Some(200..=299) => None,
        _ => classify(outcome),
    }
}

/// Local session state that must be dropped when the server reports 401.
pub trait SessionInvalidator {
    /// Clear stored credentials and send the user to the sign-in entry point.
    fn invalidate_session(&self);
}

/// Classify and apply the only side effect classification has: a 401
/// invalidates the session, once per call.
pub fn classify_at_boundary(
    outcome: &FetchOutcome,
    session: &dyn SessionInvalidator,
) -> Option<ErrorCategory> {
    let category = classify(outcome);
    if category.as_ref().is_some_and(ErrorCategory::requires_sign_in) {
        session.invalidate_session();
    }
    category
}

/// Same as [`classify_at_boundary`] for create/update calls.
pub fn classify_submission_at_boundary(
    outcome: &FetchOutcome,
    server_message: Option<&str>,
    session: &dyn SessionInvalidator,
) -> Option<ErrorCategory> {
    let category = classify_submission(outcome, server_message);
    if category.as_ref().is_some_and(ErrorCategory::requires_sign_in) {
        session.invalidate_session();
    }
    category
}

/// Extract a human message from an error body such as
/// `{"message": "..."}` or `{"error": "..."}`.
pub fn server_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingSession {
        calls: Cell<usize>,
    }

    impl SessionInvalidator for CountingSession {
        fn invalidate_session(&self) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn test_not_found_and_empty_are_not_errors() {
        let not_found = classify(&FetchOutcome::response(404, PayloadShape::Empty));
        let empty = classify(&FetchOutcome::response(200, PayloadShape::EmptyCollection));
        for category in [not_found, empty] {
            let category = category.unwrap();
            assert_eq!(category, ErrorCategory::NotFoundOrEmpty);
            assert!(!category.is_error());
            assert_eq!(category.user_message(), None);
        }
    }

    #[test]
    fn test_empty_success_body_is_empty_state() {
        for outcome in [
            FetchOutcome::response(204, PayloadShape::from_body("")),
            FetchOutcome::response(200, PayloadShape::from_body("null")),
        ] {
            let category = classify(&outcome).unwrap();
            assert_eq!(category, ErrorCategory::NotFoundOrEmpty);
            assert_eq!(category.user_message(), None);
        }
        let no_content = FetchOutcome::response(204, PayloadShape::Empty);
        assert_eq!(classify_submission(&no_content, None), None);
    }

    #[test]
    fn test_success_is_none() {
        assert_eq!(classify(&FetchOutcome::response(200, PayloadShape::Collection(3))), None);
        assert_eq!(classify(&FetchOutcome::response(201, PayloadShape::Object)), None);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            classify(&FetchOutcome::response(403, PayloadShape::Object)),
            Some(ErrorCategory::Forbidden)
        );
        assert_eq!(
            classify(&FetchOutcome::response(500, PayloadShape::Unparseable)),
            Some(ErrorCategory::TransientFailure(TransientCause::Server))
        );
        assert_eq!(
            classify(&FetchOutcome::response(400, PayloadShape::Object)),
            Some(ErrorCategory::TransientFailure(TransientCause::Server))
        );
    }

    #[test]
    fn test_network_failure_has_distinct_message() {
        let network = classify(&FetchOutcome::NoResponse).unwrap();
        let server = classify(&FetchOutcome::response(502, PayloadShape::Empty)).unwrap();
        assert_eq!(network, ErrorCategory::TransientFailure(TransientCause::Network));
        assert_ne!(network.user_message(), server.user_message());
        assert!(network.user_message().unwrap().contains("connectivity"));
    }

    #[test]
    fn test_unauthorized_invalidates_session_once() {
        let session = CountingSession::default();
        let outcome = FetchOutcome::response(401, PayloadShape::Empty);
        let category = classify_at_boundary(&outcome, &session);
        assert_eq!(category, Some(ErrorCategory::SessionExpired));
        assert_eq!(session.calls.get(), 1);
        assert_eq!(category.unwrap().to_string(), MSG_SESSION_EXPIRED);
    }

    #[test]
    fn test_other_outcomes_leave_session_alone() {
        let session = CountingSession::default();
        for outcome in [
            FetchOutcome::response(403, PayloadShape::Object),
            FetchOutcome::response(404, PayloadShape::Empty),
            FetchOutcome::response(200, PayloadShape::Collection(1)),
            FetchOutcome::NoResponse,
        ] {
            classify_at_boundary(&outcome, &session);
        }
        assert_eq!(session.calls.get(), 0);
    }

    #[test]
    fn test_submission_validation_message() {
        let outcome = FetchOutcome::response(422, PayloadShape::Object);
        assert_eq!(
            classify_submission(&outcome, Some("Username already taken")),
            Some(ErrorCategory::ValidationFailure("Username already taken".into()))
        );
        assert_eq!(
            classify_submission(&outcome, Some("  ")),
            Some(ErrorCategory::ValidationFailure(MSG_VALIDATION_FAILURE.into()))
        );
        let created = FetchOutcome::response(201, PayloadShape::Object);
        assert_eq!(classify_submission(&created, None), None);
        assert_eq!(
            classify_submission(&FetchOutcome::NoResponse, None),
            Some(ErrorCategory::TransientFailure(TransientCause::Network))
        );
    }

    #[test]
    fn test_submission_unauthorized_invalidates_session() {
        let session = CountingSession::default();
        let category = classify_submission_at_boundary(
            &FetchOutcome::response(401, PayloadShape::Empty),
            None,
            &session,
        );
        assert_eq!(category, Some(ErrorCategory::SessionExpired));
        assert_eq!(session.calls.get(), 1);
    }

    #[test]
    fn test_payload_shape() {
        assert_eq!(PayloadShape::from_json(&json!([])), PayloadShape::EmptyCollection);
        assert_eq!(PayloadShape::from_json(&json!([1, 2])), PayloadShape::Collection(2));
        assert_eq!(PayloadShape::from_json(&json!({"a": 1})), PayloadShape::Object);
        assert_eq!(PayloadShape::from_body(""), PayloadShape::Empty);
        assert_eq!(PayloadShape::from_body("<html>"), PayloadShape::Unparseable);
    }

    #[test]
    fn test_server_message_from_body() {
        assert_eq!(
            server_message_from_body(r#"{"message":"Password too short"}"#).as_deref(),
            Some("Password too short")
        );
        assert_eq!(server_message_from_body("oops"), None);
    }
}
