//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use serde::Serialize;

use super::config::config;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using the configured port for the API server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, config().api.port)
}

/// Build a full API URL from a path relative to the API prefix
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/dispatches/123");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), join_path(&config().api.prefix, path))
}

/// Same as [`api_url`] with `params` encoded as the query string.
/// Unset (`None`) parameters are left out.
pub fn api_url_with_query<Q: Serialize>(path: &str, params: &Q) -> String {
    let url = api_url(path);
    match serde_qs::to_string(params) {
        Ok(query) if !query.is_empty() => format!("{}?{}", url, query),
        Ok(_) => url,
        Err(e) => {
            log::warn!("Failed to encode query for {}: {}", path, e);
            url
        }
    }
}

/// Path segment with reserved characters escaped
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn join_path(prefix: &str, path: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/api", "/dispatches"), "/api/dispatches");
        assert_eq!(join_path("/api/", "dispatches"), "/api/dispatches");
    }

    #[test]
    fn test_path_segment() {
        assert_eq!(path_segment("a b/c"), "a%20b%2Fc");
    }
}
