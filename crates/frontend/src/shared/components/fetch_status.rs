//! Loading / error / empty-state rendering shared by list pages.

use contracts::shared::list_filter::ErrorCategory;
use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;

/// Renders nothing when there is data to show. Errors get their fixed
/// user message; `NotFoundOrEmpty` never reaches here as an error.
#[component]
pub fn FetchStatus(
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<ErrorCategory>>,
    #[prop(into)] is_empty: Signal<bool>,
    #[prop(optional)] empty_text: Option<&'static str>,
) -> impl IntoView {
    let empty_text = empty_text.unwrap_or("No records found.");

    move || {
        if let Some(message) = error
            .get()
            .as_ref()
            .and_then(|e| e.user_message().map(str::to_string))
        {
            view! {
                <div class="alert alert--error">
                    {icon("alert-triangle")}
                    <span>{message}</span>
                </div>
            }
            .into_any()
        } else if loading.get() {
            view! {
                <div class="page__loading">
                    <Spinner label="Loading..." />
                </div>
            }
            .into_any()
        } else if is_empty.get() {
            view! { <div class="page__empty">{empty_text}</div> }.into_any()
        } else {
            ().into_any()
        }
    }
}

/// Status pill for enum-like values
#[component]
pub fn StatusBadge(#[prop(into)] label: String, tone: &'static str) -> impl IntoView {
    view! { <span class=format!("badge badge--{}", tone)>{label}</span> }
}
