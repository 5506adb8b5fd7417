use contracts::domain::a001_dispatch::{Dispatch, DispatchStatus};
use contracts::shared::list_filter::{classify_expiry, display_or_na, ExpiryWindow};
use leptos::prelude::*;
use std::cmp::Ordering;
use thaw::*;

use super::detail_tab_key;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::fetch_status::StatusBadge;
use crate::shared::config::config;
use crate::shared::date_utils::{format_naive_date, format_optional_date, today};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_opt_text, get_sort_class, get_sort_indicator, sort_list, Sortable,
};

impl Sortable for Dispatch {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "status" => self.status.cmp(&other.status),
            "supplier_name" => {
                cmp_opt_text(self.supplier_name.as_deref(), other.supplier_name.as_deref())
            }
            "buyer_name" => cmp_opt_text(self.buyer_name.as_deref(), other.buyer_name.as_deref()),
            "warehouse_location" => cmp_opt_text(
                self.warehouse_location.as_deref(),
                other.warehouse_location.as_deref(),
            ),
            "quantity" => self
                .total_quantity()
                .partial_cmp(&other.total_quantity())
                .unwrap_or(Ordering::Equal),
            "expiration" => self.earliest_expiration().cmp(&other.earliest_expiration()),
            _ => self.requested_at.cmp(&other.requested_at),
        }
    }
}

pub fn status_tone(status: DispatchStatus) -> &'static str {
    match status {
        DispatchStatus::Pending => "warning",
        DispatchStatus::Accepted => "success",
        DispatchStatus::Rejected => "error",
    }
}

/// Total quantity with the number of item lines, e.g. `12 (3 items)`
pub fn quantity_label(dispatch: &Dispatch) -> String {
    format!("{} ({} items)", dispatch.total_quantity(), dispatch.items.len())
}

pub fn expiry_class(window: Option<ExpiryWindow>) -> &'static str {
    match window {
        Some(ExpiryWindow::Expired) => "expiry expiry--expired",
        Some(ExpiryWindow::ExpiringSoon) => "expiry expiry--soon",
        _ => "expiry",
    }
}

/// Dispatch rows with client-side sorting. Clicking a row opens its detail
/// tab; `on_decide` adds accept/reject buttons to pending rows.
#[component]
pub fn DispatchTable(
    #[prop(into)] rows: Signal<Vec<Dispatch>>,
    #[prop(optional)] on_decide: Option<Callback<(String, bool)>>,
    /// Row currently being decided; its buttons are disabled
    #[prop(into, optional)]
    busy_id: Signal<Option<String>>,
) -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let sort_field = RwSignal::new("requested_at".to_string());
    let sort_ascending = RwSignal::new(false);

    let sorted = Memo::new(move |_| {
        let mut data = rows.get();
        sort_list(&mut data, &sort_field.get(), sort_ascending.get());
        data
    });

    let toggle_sort = move |field: &'static str| {
        move |_| {
            if sort_field.get_untracked() == field {
                sort_ascending.update(|a| *a = !*a);
            } else {
                sort_field.set(field.to_string());
                sort_ascending.set(true);
            }
        }
    };

    let sort_header = move |field: &'static str, label: &'static str| {
        view! {
            <div class="table__sortable-header" style="cursor:pointer;" on:click=toggle_sort(field)>
                {label}
                <span class=move || get_sort_class(&sort_field.get(), field)>
                    {move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}
                </span>
            </div>
        }
    };

    let window_days = config().lists.expiring_window_days;

    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=110.0>{sort_header("requested_at", "Requested")}</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>{sort_header("status", "Status")}</TableHeaderCell>
                        <TableHeaderCell min_width=150.0>{sort_header("supplier_name", "Supplier")}</TableHeaderCell>
                        <TableHeaderCell min_width=150.0>{sort_header("buyer_name", "Buyer")}</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>{sort_header("warehouse_location", "Location")}</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>{sort_header("quantity", "Quantity")}</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>{sort_header("expiration", "Earliest expiry")}</TableHeaderCell>
                        {on_decide.is_some().then(|| view! { <TableHeaderCell min_width=180.0>""</TableHeaderCell> })}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || sorted.get()
                        key=|d| (d.id.clone(), d.status)
                        children=move |dispatch| {
                            let id = dispatch.id.clone();
                            let tab_title = detail_tab_label("Dispatch", &id);
                            let open_id = id.clone();
                            let earliest = dispatch.earliest_expiration();
                            let window = earliest.map(|d| classify_expiry(d, today(), window_days));
                            let status = dispatch.status;
                            let is_open = status.is_open();
                            let requested = format_naive_date(dispatch.requested_at);
                            let text = |v: &Option<String>| display_or_na(v.as_deref()).to_string();
                            let supplier = text(&dispatch.supplier_name);
                            let buyer = text(&dispatch.buyer_name);
                            let location = text(&dispatch.warehouse_location);
                            let quantity = quantity_label(&dispatch);
                            view! {
                                <TableRow
                                    class="table__row--clickable"
                                    on:click=move |_| tabs_store.open_tab(&detail_tab_key(&open_id), &tab_title)
                                >
                                    <TableCell>
                                        <TableCellLayout>{requested}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <StatusBadge
                                                label=status.display_name()
                                                tone=status_tone(status)
                                            />
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            {supplier}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            {buyer}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            {location}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            {quantity}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <span class=expiry_class(window)>{format_optional_date(earliest)}</span>
                                        </TableCellLayout>
                                    </TableCell>
                                    {on_decide.map(|decide| {
                                        let accept_id = id.clone();
                                        let reject_id = id.clone();
                                        let busy_for = id.clone();
                                        let busy = Signal::derive(move || busy_id.get().as_deref() == Some(busy_for.as_str()));
                                        view! {
                                            <TableCell>
                                                <Show when=move || is_open fallback=|| view! { <span>"-"</span> }>
                                                    <div class="table__actions" on:click=|ev| ev.stop_propagation()>
                                                        <Button
                                                            appearance=ButtonAppearance::Primary
                                                            size=ButtonSize::Small
                                                            disabled=busy
                                                            on_click={
                                                                let accept_id = accept_id.clone();
                                                                move |_| decide.run((accept_id.clone(), true))
                                                            }
                                                        >
                                                            {icon("check")}
                                                            " Accept"
                                                        </Button>
                                                        <Button
                                                            appearance=ButtonAppearance::Secondary
                                                            size=ButtonSize::Small
                                                            disabled=busy
                                                            on_click={
                                                                let reject_id = reject_id.clone();
                                                                move |_| decide.run((reject_id.clone(), false))
                                                            }
                                                        >
                                                            {icon("x")}
                                                            " Reject"
                                                        </Button>
                                                    </div>
                                                </Show>
                                            </TableCell>
                                        }
                                    })}
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a001_dispatch::DispatchItem;

    #[test]
    fn test_quantity_label() {
        let item = |id: &str, quantity: f64| DispatchItem {
            id: id.to_string(),
            quantity,
            product: None,
        };
        let mut dispatch = Dispatch {
            id: "d-1".to_string(),
            status: DispatchStatus::Pending,
            supplier_id: "sup-1".to_string(),
            supplier_name: None,
            buyer_name: None,
            warehouse_location: None,
            requested_at: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            decided_at: None,
            notes: None,
            items: Vec::new(),
        };
        assert_eq!(quantity_label(&dispatch), "0 (0 items)");

        dispatch.items = vec![item("i-1", 5.0), item("i-2", 7.0)];
        assert_eq!(quantity_label(&dispatch), "12 (2 items)");
    }

    #[test]
    fn test_status_tone() {
        assert_eq!(status_tone(DispatchStatus::Pending), "warning");
        assert_eq!(status_tone(DispatchStatus::Rejected), "error");
    }
}
