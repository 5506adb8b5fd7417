//! Tab key to view mapping. Every tab key is handled here.

use super::tab_labels::{
    TAB_DISPATCHES, TAB_DISPATCH_REQUESTS, TAB_FINANCIAL_ANALYTICS, TAB_INVENTORY,
    TAB_TEMPORARY_USERS,
};
use crate::dashboards::FinancialAnalyticsDashboard;
use crate::domain::a001_dispatch::ui::details::DispatchDetail;
use crate::domain::a001_dispatch::ui::list::DispatchListPage;
use crate::domain::a001_dispatch::ui::requests::DispatchRequestsPage;
use crate::domain::a001_dispatch::ui::DETAIL_TAB_PREFIX as DISPATCH_DETAIL_PREFIX;
use crate::domain::a002_inventory::ui::list::InventoryListPage;
use crate::layout::global_context::AppGlobalContext;
use crate::system::temporary_users::ui::list::TemporaryUsersPage;
use leptos::prelude::*;

/// View for a tab key, or a placeholder for keys nothing handles.
///
/// `tabs_store` lets detail views close their own tab.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();

    match key {
        TAB_DISPATCHES => view! { <DispatchListPage /> }.into_any(),
        TAB_DISPATCH_REQUESTS => view! { <DispatchRequestsPage /> }.into_any(),
        k if k.starts_with(DISPATCH_DETAIL_PREFIX) => {
            let id = k[DISPATCH_DETAIL_PREFIX.len()..].to_string();
            view! {
                <DispatchDetail
                    id=id
                    on_close=Callback::new(move |_| tabs_store.close_tab(&key_for_close))
                />
            }
            .into_any()
        }
        TAB_INVENTORY => view! { <InventoryListPage /> }.into_any(),
        TAB_FINANCIAL_ANALYTICS => view! { <FinancialAnalyticsDashboard /> }.into_any(),
        TAB_TEMPORARY_USERS => view! { <TemporaryUsersPage /> }.into_any(),
        _ => {
            log::warn!("No view registered for tab key '{}'", key);
            view! { <div class="page__empty">{format!("Unknown page: {}", key)}</div> }.into_any()
        }
    }
}
