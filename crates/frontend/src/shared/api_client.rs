//! The single fetch boundary.
//!
//! Every request goes through here. Transport results are turned into a
//! [`FetchOutcome`], classified once, and pages only ever see
//! `Result<_, ErrorCategory>`. Raw transport errors are logged, never shown.

use contracts::shared::list_filter::{
    classify_at_boundary, classify_submission_at_boundary, server_message_from_body,
    ErrorCategory, FetchOutcome, PayloadShape, TransientCause,
};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::system::auth::session::BrowserSession;
use crate::system::auth::storage;

/// Attach the bearer token when a session exists
pub fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Turn a transport result into an outcome plus the raw body.
pub async fn read_outcome(
    url: &str,
    sent: Result<Response, gloo_net::Error>,
) -> (FetchOutcome, String) {
    let response = match sent {
        Ok(response) => response,
        Err(e) => {
            log::warn!("No response from {}: {}", url, e);
            return (FetchOutcome::NoResponse, String::new());
        }
    };

    let status = response.status();
    match response.text().await {
        Ok(body) => {
            let payload = PayloadShape::from_body(&body);
            (FetchOutcome::response(status, payload), body)
        }
        Err(e) => {
            log::warn!("Failed to read response body from {}: {}", url, e);
            (
                FetchOutcome::response(status, PayloadShape::Unparseable),
                String::new(),
            )
        }
    }
}

fn parse_body<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ErrorCategory> {
    serde_json::from_str::<T>(body).map_err(|e| {
        log::warn!("Failed to parse response from {}: {}", url, e);
        ErrorCategory::TransientFailure(TransientCause::Server)
    })
}

async fn get_classified(url: &str) -> Result<String, ErrorCategory> {
    log::debug!("GET {}", url);
    let sent = with_auth(Request::get(url)).send().await;
    let (outcome, body) = read_outcome(url, sent).await;
    match classify_at_boundary(&outcome, &BrowserSession) {
        None => Ok(body),
        Some(category) => {
            if category.is_error() {
                log::warn!("GET {} failed: {:?} ({:?})", url, category, outcome);
            }
            Err(category)
        }
    }
}

/// `fetchRecords`: a JSON array. An empty array or 404 comes back as
/// `Err(ErrorCategory::NotFoundOrEmpty)`, which pages treat as empty state.
pub async fn fetch_list<T: DeserializeOwned>(url: &str) -> Result<Vec<T>, ErrorCategory> {
    let body = get_classified(url).await?;
    parse_body(url, &body)
}

/// `fetchDetail`: a single JSON object
pub async fn fetch_one<T: DeserializeOwned>(url: &str) -> Result<T, ErrorCategory> {
    let body = get_classified(url).await?;
    parse_body(url, &body)
}

/// POST a JSON body. Rejected payloads come back as
/// `ErrorCategory::ValidationFailure` carrying the server's message.
pub async fn post_json<B: Serialize>(url: &str, body: &B) -> Result<String, ErrorCategory> {
    log::debug!("POST {}", url);
    let request = match with_auth(Request::post(url)).json(body) {
        Ok(request) => request,
        Err(e) => {
            log::error!("Failed to serialize request for {}: {}", url, e);
            return Err(ErrorCategory::ValidationFailure(
                "Request could not be prepared.".to_string(),
            ));
        }
    };
    let sent = request.send().await;
    let (outcome, text) = read_outcome(url, sent).await;
    let server_message = server_message_from_body(&text);
    match classify_submission_at_boundary(&outcome, server_message.as_deref(), &BrowserSession) {
        None => Ok(text),
        Some(category) => {
            log::warn!("POST {} failed: {:?} ({:?})", url, category, outcome);
            Err(category)
        }
    }
}

/// `createEntity`: POST and parse the created entity from the response.
pub async fn create<B: Serialize, R: DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<R, ErrorCategory> {
    let text = post_json(url, body).await?;
    parse_body(url, &text)
}
