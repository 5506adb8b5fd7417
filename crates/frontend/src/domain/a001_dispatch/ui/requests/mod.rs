use contracts::domain::a001_dispatch::{DispatchDecisionDto, DispatchStatus};
use contracts::shared::list_filter::{filter_records, summarize, FilterCriteria};
use contracts::shared::request_seq::RequestSequencer;
use contracts::system::roles::Capability;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::filters::{DispatchFilterInputs, DispatchFilterPanel};
use super::decision_error_message;
use super::list::create_state;
use super::summary::DispatchSummaryCards;
use super::table::DispatchTable;
use crate::domain::a001_dispatch::api;
use crate::shared::components::fetch_status::FetchStatus;
use crate::shared::config::config;
use crate::shared::date_utils::today;
use crate::shared::fetch_guard::debounced;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::guard::RequireCapability;

#[component]
pub fn DispatchRequestsPage() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ReviewDispatchRequests>
            <DispatchRequests />
        </RequireCapability>
    }
}

#[component]
fn DispatchRequests() -> impl IntoView {
    let state = create_state();
    let sequencer = StoredValue::new(RequestSequencer::new());
    let inputs = DispatchFilterInputs::new(Some(DispatchStatus::Pending));
    let criteria = Memo::new(move |_| inputs.criteria());

    let busy_id = RwSignal::new(None::<String>);
    let decision_error = RwSignal::new(None::<String>);

    let load = move |criteria: FilterCriteria, delay_ms: u32| {
        state.update(|s| s.fetch.start_loading());
        let seq = sequencer.get_value();
        spawn_local(async move {
            let fetch = move || api::fetch_dispatch_requests(criteria);
            if let Some(result) = debounced(&seq, delay_ms, fetch).await {
                state.update(|s| s.fetch.apply(result));
            }
        });
    };

    Effect::new(move |prev: Option<()>| {
        let delay_ms = if prev.is_none() { 0 } else { config().lists.debounce_ms };
        load(criteria.get(), delay_ms);
    });

    let reload = move || load(criteria.get_untracked(), 0);

    let on_decide = Callback::new(move |(dispatch_id, accept): (String, bool)| {
        busy_id.set(Some(dispatch_id.clone()));
        decision_error.set(None);
        let dto = DispatchDecisionDto {
            dispatch_id,
            accept,
            reason: None,
        };
        spawn_local(async move {
            let id = dto.dispatch_id.clone();
            match api::decide_dispatch(dto).await {
                Ok(()) => {
                    log::info!("Dispatch {} {}", id, if accept { "accepted" } else { "rejected" });
                    reload();
                }
                Err(category) => decision_error.set(Some(decision_error_message(&category))),
            }
            busy_id.set(None);
        });
    });

    let visible = Memo::new(move |_| {
        let criteria = criteria.get();
        state.with(|s| filter_records(&s.fetch.items, &criteria))
    });
    let stats = Memo::new(move |_| {
        visible.with(|rows| summarize(rows, today(), &config().lists.summary_options()))
    });

    let loading = Signal::derive(move || state.with(|s| s.fetch.loading));

    view! {
        <PageFrame page_id="a001_dispatch_requests--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Dispatch requests"</h1>
                    <Badge>{move || stats.with(|s| s.total).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| reload()
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <DispatchFilterPanel inputs=inputs />
                <DispatchSummaryCards stats=stats />

                {move || decision_error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <FetchStatus
                    loading=loading
                    error=Signal::derive(move || state.with(|s| s.fetch.error.clone()))
                    is_empty=Signal::derive(move || {
                        state.with(|s| s.fetch.is_loaded && !s.fetch.loading && s.fetch.error.is_none())
                            && visible.with(|v| v.is_empty())
                    })
                    empty_text="No dispatch requests to review."
                />

                <Show when=move || visible.with(|v| !v.is_empty())>
                    <DispatchTable rows=visible on_decide=on_decide busy_id=busy_id />
                </Show>
            </div>
        </PageFrame>
    }
}
