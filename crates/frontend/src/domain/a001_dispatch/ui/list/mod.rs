mod state;

pub(crate) use state::create_state;

use contracts::shared::list_filter::{filter_records, summarize, FilterCriteria};
use contracts::shared::request_seq::RequestSequencer;
use contracts::system::roles::Capability;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::filters::{DispatchFilterInputs, DispatchFilterPanel};
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
use crate::system::auth::guard::RequireAnyCapability;

const OWN_DISPATCH_CAPABILITIES: &[Capability] =
    &[Capability::ViewOwnDispatches, Capability::WithdrawProducts];

/// Own dispatches: suppliers see what was requested from them, buyers and
/// temporary users see their own withdrawals.
#[component]
pub fn DispatchListPage() -> impl IntoView {
    view! {
        <RequireAnyCapability any_of=OWN_DISPATCH_CAPABILITIES>
            <DispatchList />
        </RequireAnyCapability>
    }
}

#[component]
fn DispatchList() -> impl IntoView {
    let state = create_state();
    let sequencer = StoredValue::new(RequestSequencer::new());
    let inputs = DispatchFilterInputs::new(None);
    let criteria = Memo::new(move |_| inputs.criteria());

    let load = move |criteria: FilterCriteria, delay_ms: u32| {
        state.update(|s| s.fetch.start_loading());
        let seq = sequencer.get_value();
        spawn_local(async move {
            let fetch = move || api::fetch_dispatches(criteria);
            if let Some(result) = debounced(&seq, delay_ms, fetch).await {
                state.update(|s| s.fetch.apply(result));
            }
        });
    };

    // First run loads immediately, later criteria changes are debounced
    Effect::new(move |prev: Option<()>| {
        let delay_ms = if prev.is_none() { 0 } else { config().lists.debounce_ms };
        load(criteria.get(), delay_ms);
    });

    let reload = move || load(criteria.get_untracked(), 0);

    // The server may ignore some parameters, so the criteria are applied
    // again locally; filtering is idempotent.
    let visible = Memo::new(move |_| {
        let criteria = criteria.get();
        state.with(|s| filter_records(&s.fetch.items, &criteria))
    });
    let stats = Memo::new(move |_| {
        visible.with(|rows| summarize(rows, today(), &config().lists.summary_options()))
    });

    let loading = Signal::derive(move || state.with(|s| s.fetch.loading));

    view! {
        <PageFrame page_id="a001_dispatch--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Dispatches"</h1>
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

                <FetchStatus
                    loading=loading
                    error=Signal::derive(move || state.with(|s| s.fetch.error.clone()))
                    is_empty=Signal::derive(move || {
                        state.with(|s| s.fetch.is_loaded && !s.fetch.loading && s.fetch.error.is_none())
                            && visible.with(|v| v.is_empty())
                    })
                    empty_text="No dispatches match the current filters."
                />

                <Show when=move || visible.with(|v| !v.is_empty())>
                    <DispatchTable rows=visible />
                </Show>
            </div>
        </PageFrame>
    }
}
