//! Tab titles for every tab key.

use crate::domain::a001_dispatch::ui::DETAIL_TAB_PREFIX as DISPATCH_DETAIL_PREFIX;

pub const TAB_DISPATCHES: &str = "a001_dispatch";
pub const TAB_DISPATCH_REQUESTS: &str = "a001_dispatch_requests";
pub const TAB_INVENTORY: &str = "a002_inventory";
pub const TAB_FINANCIAL_ANALYTICS: &str = "d001_financial_analytics";
pub const TAB_TEMPORARY_USERS: &str = "sys_temporary_users";

/// Title of a list or dashboard tab, empty for unknown keys.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        TAB_DISPATCHES => "Dispatches",
        TAB_DISPATCH_REQUESTS => "Dispatch requests",
        TAB_INVENTORY => "Inventory",
        TAB_FINANCIAL_ANALYTICS => "Financial analytics",
        TAB_TEMPORARY_USERS => "Temporary users",
        _ => "",
    }
}

/// Title of a detail tab: `<entity> · <identifier>`.
pub fn detail_tab_label(entity: &str, identifier: &str) -> String {
    format!("{} · {}", entity, identifier)
}

/// Title for any key, including detail tabs restored from the URL.
pub fn title_for_key(key: &str) -> String {
    if let Some(id) = key.strip_prefix(DISPATCH_DETAIL_PREFIX) {
        return detail_tab_label("Dispatch", id);
    }
    match tab_label_for_key(key) {
        "" => key.to_string(),
        label => label.to_string(),
    }
}
