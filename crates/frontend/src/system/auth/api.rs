use contracts::shared::list_filter::{
    classify, classify_submission, server_message_from_body, ErrorCategory, TransientCause,
    MSG_VALIDATION_FAILURE,
};
use contracts::system::auth::{LoginRequest, LoginResponse, UserInfo};
use gloo_net::http::Request;

use crate::shared::api_client::{read_outcome, with_auth};
use crate::shared::api_utils::api_url;

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username or password.";

// Session endpoints are classified without the session-expired side effect:
// a 401 here means bad credentials or a stale token, not a lost session.

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, ErrorCategory> {
    let url = api_url("/auth/login");
    let request = LoginRequest { username, password };

    let sent = match Request::post(&url).json(&request) {
        Ok(request) => request.send().await,
        Err(e) => {
            log::error!("Failed to serialize login request: {}", e);
            return Err(ErrorCategory::ValidationFailure(
                MSG_VALIDATION_FAILURE.to_string(),
            ));
        }
    };
    let (outcome, body) = read_outcome(&url, sent).await;

    if matches!(outcome.status(), Some(401 | 403)) {
        return Err(ErrorCategory::ValidationFailure(
            MSG_INVALID_CREDENTIALS.to_string(),
        ));
    }
    let server_message = server_message_from_body(&body);
    if let Some(category) = classify_submission(&outcome, server_message.as_deref()) {
        log::warn!("Login failed: {:?}", category);
        return Err(category);
    }

    serde_json::from_str(&body).map_err(|e| {
        log::warn!("Failed to parse login response: {}", e);
        ErrorCategory::TransientFailure(TransientCause::Server)
    })
}

/// Revoke the current token; failures are only logged
pub async fn logout() {
    let url = api_url("/auth/logout");
    let sent = with_auth(Request::post(&url)).send().await;
    let (outcome, _) = read_outcome(&url, sent).await;
    if let Some(category) = classify(&outcome).filter(ErrorCategory::is_error) {
        log::warn!("Logout request failed: {:?}", category);
    }
}

/// Get current user info
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, ErrorCategory> {
    let url = api_url("/auth/me");
    let sent = Request::get(&url)
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await;
    let (outcome, body) = read_outcome(&url, sent).await;

    if let Some(category) = classify(&outcome) {
        return Err(category);
    }

    serde_json::from_str(&body).map_err(|e| {
        log::warn!("Failed to parse current user: {}", e);
        ErrorCategory::TransientFailure(TransientCause::Server)
    })
}
