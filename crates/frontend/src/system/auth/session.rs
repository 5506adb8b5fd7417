use contracts::shared::list_filter::{SessionInvalidator, MSG_SESSION_EXPIRED};
use web_sys::window;

use super::storage;

/// Entry point the app starts from; with no token it renders the sign-in page.
pub const SIGN_IN_PATH: &str = "/";

const NOTICE_KEY: &str = "auth_notice";

/// Browser side of session invalidation: drop the stored token, remember
/// why, and reload at the sign-in entry point.
pub struct BrowserSession;

impl SessionInvalidator for BrowserSession {
    fn invalidate_session(&self) {
        log::info!("Session expired, returning to sign-in");
        storage::clear_tokens();
        set_notice(MSG_SESSION_EXPIRED);
        if let Some(w) = window() {
            let _ = w.location().replace(SIGN_IN_PATH);
        }
    }
}

fn set_notice(message: &str) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(NOTICE_KEY, message);
    }
}

/// Message left by the last invalidation, removed once read.
pub fn take_notice() -> Option<String> {
    let storage = window()?.local_storage().ok()??;
    let notice = storage.get_item(NOTICE_KEY).ok()?;
    let _ = storage.remove_item(NOTICE_KEY);
    notice
}
