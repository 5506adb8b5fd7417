use contracts::domain::a001_dispatch::{
    normalize_dispatch, Dispatch, DispatchDecisionDto, DispatchItem,
};
use contracts::shared::list_filter::{classify_expiry, days_until, display_or_na, FetchState};
use contracts::shared::request_seq::RequestSequencer;
use contracts::system::roles::Capability;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::decision_error_message;
use super::table::{expiry_class, status_tone};
use crate::domain::a001_dispatch::api;
use crate::shared::components::fetch_status::{FetchStatus, StatusBadge};
use crate::shared::config::config;
use crate::shared::date_utils::{format_naive_date, format_optional_date, today};
use crate::shared::fetch_guard::latest_only;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::system::auth::context::use_auth;

fn expiry_text(item: &DispatchItem) -> String {
    match item.product.as_ref().and_then(|p| p.expiration_date) {
        Some(date) => {
            let days = days_until(date, today());
            if days < 0 {
                format!("{} (expired)", format_naive_date(date))
            } else {
                format!("{} (in {} days)", format_naive_date(date), days)
            }
        }
        None => format_optional_date(None),
    }
}

/// Single dispatch. Items are normalized before display so partially
/// filled products still render with placeholder names and codes.
#[component]
pub fn DispatchDetail(id: String, on_close: Callback<()>) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let state = RwSignal::new(FetchState::<Dispatch>::default());
    let sequencer = StoredValue::new(RequestSequencer::new());
    let dispatch_id = StoredValue::new(id);
    let deciding = RwSignal::new(false);
    let decision_error = RwSignal::new(None::<String>);

    let load = move || {
        state.update(|s| s.start_loading());
        let seq = sequencer.get_value();
        let id = dispatch_id.get_value();
        spawn_local(async move {
            if let Some(result) = latest_only(&seq, move || api::fetch_dispatch(id)).await {
                let today = today();
                state.update(|s| s.apply(result.map(|d| vec![normalize_dispatch(&d, today)])));
            }
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load();
        }
    });

    let dispatch = Memo::new(move |_| state.with(|s| s.items.first().cloned()));

    let can_decide = move || {
        auth_state.with(|s| s.can(Capability::ReviewDispatchRequests))
            && dispatch.with(|d| d.as_ref().is_some_and(|d| d.status.is_open()))
    };

    let decide = move |accept: bool| {
        deciding.set(true);
        decision_error.set(None);
        let dto = DispatchDecisionDto {
            dispatch_id: dispatch_id.get_value(),
            accept,
            reason: None,
        };
        spawn_local(async move {
            match api::decide_dispatch(dto).await {
                Ok(()) => load(),
                Err(category) => decision_error.set(Some(decision_error_message(&category))),
            }
            deciding.set(false);
        });
    };

    let window_days = config().lists.expiring_window_days;

    view! {
        <PageFrame page_id="a001_dispatch--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || format!("Dispatch {}", dispatch_id.get_value())}
                    </h1>
                    {move || dispatch.get().map(|d| view! {
                        <StatusBadge label=d.status.display_name() tone=status_tone(d.status) />
                    })}
                </div>
                <div class="page__header-right">
                    <Show when=can_decide>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| decide(true)
                            disabled=Signal::derive(move || deciding.get())
                        >
                            {icon("check")}
                            " Accept"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| decide(false)
                            disabled=Signal::derive(move || deciding.get())
                        >
                            {icon("x")}
                            " Reject"
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        "Close"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || decision_error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <FetchStatus
                    loading=Signal::derive(move || state.with(|s| s.loading))
                    error=Signal::derive(move || state.with(|s| s.error.clone()))
                    is_empty=Signal::derive(move || state.with(|s| s.is_empty_state()))
                    empty_text="Dispatch not found."
                />

                {move || dispatch.get().map(|d| {
                    let items = d.items.clone();
                    view! {
                        <div class="detail-grid">
                            <div class="detail-grid__label">"Supplier"</div>
                            <div>{display_or_na(d.supplier_name.as_deref()).to_string()}</div>
                            <div class="detail-grid__label">"Buyer"</div>
                            <div>{display_or_na(d.buyer_name.as_deref()).to_string()}</div>
                            <div class="detail-grid__label">"Location"</div>
                            <div>{display_or_na(d.warehouse_location.as_deref()).to_string()}</div>
                            <div class="detail-grid__label">"Requested"</div>
                            <div>{format_naive_date(d.requested_at)}</div>
                            <div class="detail-grid__label">"Decided"</div>
                            <div>{format_optional_date(d.decided_at)}</div>
                            <div class="detail-grid__label">"Notes"</div>
                            <div>{display_or_na(d.notes.as_deref()).to_string()}</div>
                            <div class="detail-grid__label">"Total quantity"</div>
                            <div>{d.total_quantity().to_string()}</div>
                        </div>

                        <h2 class="page__subtitle">"Items"</h2>
                        <div class="table-wrapper">
                            <Table attr:style="width: 100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell min_width=120.0>"Code"</TableHeaderCell>
                                        <TableHeaderCell min_width=200.0>"Product"</TableHeaderCell>
                                        <TableHeaderCell min_width=90.0>"Quantity"</TableHeaderCell>
                                        <TableHeaderCell min_width=160.0>"Expires"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {items.into_iter().map(|item| {
                                        let product = item.product.clone().unwrap_or_default();
                                        let window = product
                                            .expiration_date
                                            .map(|date| classify_expiry(date, today(), window_days));
                                        view! {
                                            <TableRow>
                                                <TableCell>
                                                    <TableCellLayout>{display_or_na(product.code.as_deref()).to_string()}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{display_or_na(product.name.as_deref()).to_string()}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{item.quantity.to_string()}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <span class=expiry_class(window)>{expiry_text(&item)}</span>
                                                    </TableCellLayout>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }).collect_view()}
                                </TableBody>
                            </Table>
                        </div>
                    }
                })}
            </div>
        </PageFrame>
    }
}
