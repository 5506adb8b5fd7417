mod state;

pub(crate) use state::create_state;

use contracts::domain::a002_inventory::{products_by_lot, InventoryProduct, StockStatus};
use contracts::shared::list_filter::{
    classify_expiry, display_or_na, summarize, FilterCriteria, SummaryStats,
};
use contracts::shared::request_seq::RequestSequencer;
use contracts::system::roles::Capability;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use self::state::InventoryFilterInputs;
use super::sections::SectionsOverview;
use crate::domain::a001_dispatch::ui::table::expiry_class;
use crate::domain::a002_inventory::api;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::fetch_status::{FetchStatus, StatusBadge};
use crate::shared::components::filter_panel::{FilterField, FilterPanel};
use crate::shared::components::stat_card::{format_thousands, StatCard, StatTone};
use crate::shared::config::config;
use crate::shared::date_utils::{format_optional_date, today};
use crate::shared::fetch_guard::debounced;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_opt_text, get_sort_class, get_sort_indicator, sort_list, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::guard::RequireCapability;

/// Product line together with the lot it came in
#[derive(Clone, Debug, PartialEq)]
pub struct ProductRow {
    pub lot_code: String,
    pub supplier_name: Option<String>,
    pub product: InventoryProduct,
}

impl Sortable for ProductRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        let (a, b) = (&self.product, &other.product);
        match field {
            "name" => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            "code" => a.code.cmp(&b.code),
            "lot" => self.lot_code.cmp(&other.lot_code),
            "supplier_name" => {
                cmp_opt_text(self.supplier_name.as_deref(), other.supplier_name.as_deref())
            }
            "status" => a.status.as_str().cmp(b.status.as_str()),
            "location" => a.location.cmp(&b.location),
            "quantity" => a.quantity.partial_cmp(&b.quantity).unwrap_or(Ordering::Equal),
            _ => a.expiration_date.cmp(&b.expiration_date),
        }
    }
}

fn stock_tone(status: StockStatus) -> &'static str {
    match status {
        StockStatus::Available => "success",
        StockStatus::Reserved => "warning",
        StockStatus::Dispatched => "neutral",
    }
}

/// Inventory browser: every product of every lot, filterable, with summary
/// cards and section occupancy below.
#[component]
pub fn InventoryListPage() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::BrowseInventory>
            <InventoryList />
        </RequireCapability>
    }
}

#[component]
fn InventoryList() -> impl IntoView {
    let state = create_state();
    let sequencer = StoredValue::new(RequestSequencer::new());
    let inputs = InventoryFilterInputs::new();
    let criteria = Memo::new(move |_| inputs.criteria());

    let load = move |criteria: FilterCriteria, delay_ms: u32| {
        state.update(|s| s.lots.start_loading());
        let seq = sequencer.get_value();
        spawn_local(async move {
            let fetch = move || api::fetch_lots(criteria);
            if let Some(result) = debounced(&seq, delay_ms, fetch).await {
                state.update(|s| s.lots.apply(result));
            }
        });
    };

    Effect::new(move |prev: Option<()>| {
        let delay_ms = if prev.is_none() { 0 } else { config().lists.debounce_ms };
        load(criteria.get(), delay_ms);
    });

    let reload = move || load(criteria.get_untracked(), 0);

    let visible = Memo::new(move |_| {
        let criteria = criteria.get();
        state.with(|s| {
            products_by_lot(&s.lots.items)
                .into_iter()
                .filter(|(_, product)| criteria.matches(product))
                .map(|(lot, product)| ProductRow {
                    lot_code: lot.code,
                    supplier_name: lot.supplier_name,
                    product,
                })
                .collect::<Vec<_>>()
        })
    });
    let stats = Memo::new(move |_| {
        visible.with(|rows| {
            let products: Vec<InventoryProduct> = rows.iter().map(|r| r.product.clone()).collect();
            summarize(&products, today(), &config().lists.summary_options())
        })
    });

    let loading = Signal::derive(move || state.with(|s| s.lots.loading));

    view! {
        <PageFrame page_id="a002_inventory--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Inventory"</h1>
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
                <InventoryFilterPanel inputs=inputs />
                <InventorySummaryCards stats=stats />

                <FetchStatus
                    loading=loading
                    error=Signal::derive(move || state.with(|s| s.lots.error.clone()))
                    is_empty=Signal::derive(move || {
                        state.with(|s| s.lots.is_loaded && !s.lots.loading && s.lots.error.is_none())
                            && visible.with(|v| v.is_empty())
                    })
                    empty_text="No products match the current filters."
                />

                <Show when=move || visible.with(|v| !v.is_empty())>
                    <ProductTable rows=visible />
                </Show>

                <SectionsOverview />
            </div>
        </PageFrame>
    }
}

#[component]
fn InventoryFilterPanel(inputs: InventoryFilterInputs) -> impl IntoView {
    let is_expanded = RwSignal::new(false);
    let active_count = Signal::derive(move || inputs.criteria().active_count());

    view! {
        <FilterPanel
            is_expanded=is_expanded
            active_filters_count=active_count
            on_reset=Callback::new(move |_| inputs.reset())
        >
            <FilterField label="Name">
                <Input value=inputs.name placeholder="Product name..." />
            </FilterField>
            <FilterField label="Code">
                <Input value=inputs.code placeholder="Product code..." />
            </FilterField>
            <FilterField label="Status">
                <Select value=inputs.status>
                    <option value="">"All"</option>
                    {StockStatus::ALL
                        .into_iter()
                        .map(|s| view! { <option value=s.as_str()>{s.display_name()}</option> })
                        .collect_view()}
                </Select>
            </FilterField>
            <FilterField label="Location">
                <Input value=inputs.location placeholder="Section name or pending" />
            </FilterField>
            <FilterField label="Expires from">
                <DateInput value=inputs.expires_from />
            </FilterField>
            <FilterField label="Expires to">
                <DateInput value=inputs.expires_to />
            </FilterField>
        </FilterPanel>
    }
}

#[component]
fn InventorySummaryCards(#[prop(into)] stats: Signal<SummaryStats>) -> impl IntoView {
    let count = move |f: fn(&SummaryStats) -> usize| {
        Signal::derive(move || format_thousands(stats.with(f) as i64))
    };
    let warn_if_any = move |f: fn(&SummaryStats) -> usize, tone: StatTone| {
        Signal::derive(move || if stats.with(f) > 0 { tone } else { StatTone::Neutral })
    };

    view! {
        <div class="stat-cards">
            <StatCard label="Products" icon_name="package" value=count(|s| s.total) />
            <StatCard
                label="Available"
                icon_name="check"
                value=count(|s| s.count_for(StockStatus::Available.as_str()))
                tone=StatTone::Success
            />
            <StatCard
                label="Expiring soon"
                icon_name="clock"
                value=count(|s| s.expiring_soon)
                tone=warn_if_any(|s| s.expiring_soon, StatTone::Warning)
            />
            <StatCard
                label="Expired"
                icon_name="alert-triangle"
                value=count(|s| s.expired)
                tone=warn_if_any(|s| s.expired, StatTone::Error)
            />
            <StatCard label="Locations" icon_name="map-pin" value=count(|s| s.distinct_groups) />
            <StatCard
                label="Awaiting placement"
                icon_name="package"
                value=count(|s| s.unassigned)
                subtitle="Products without a section"
            />
        </div>
    }
}

#[component]
fn ProductTable(#[prop(into)] rows: Signal<Vec<ProductRow>>) -> impl IntoView {
    let sort_field = RwSignal::new("expiration".to_string());
    let sort_ascending = RwSignal::new(true);

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
                        <TableHeaderCell min_width=180.0>{sort_header("name", "Product")}</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>{sort_header("code", "Code")}</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>{sort_header("lot", "Lot")}</TableHeaderCell>
                        <TableHeaderCell min_width=150.0>{sort_header("supplier_name", "Supplier")}</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>{sort_header("status", "Status")}</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>{sort_header("location", "Location")}</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>{sort_header("quantity", "Qty")}</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>{sort_header("expiration", "Expires")}</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || sorted.get()
                        key=|row| row.product.id.clone()
                        children=move |row| {
                            let product = row.product;
                            let window = product
                                .expiration_date
                                .map(|d| classify_expiry(d, today(), window_days));
                            let location_class = if product.is_placed() { "" } else { "text--muted" };
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{product.name.clone()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{product.code.clone()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{row.lot_code}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            {display_or_na(row.supplier_name.as_deref()).to_string()}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <StatusBadge
                                                label=product.status.display_name()
                                                tone=stock_tone(product.status)
                                            />
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <span class=location_class>{product.location.clone()}</span>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{product.quantity.to_string()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <span class=expiry_class(window)>
                                                {format_optional_date(product.expiration_date)}
                                            </span>
                                        </TableCellLayout>
                                    </TableCell>
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

    fn row(name: &str, lot: &str, quantity: f64) -> ProductRow {
        ProductRow {
            lot_code: lot.into(),
            supplier_name: None,
            product: InventoryProduct {
                id: name.into(),
                lot_id: lot.into(),
                name: name.into(),
                code: name.to_uppercase(),
                category: None,
                quantity,
                status: StockStatus::Available,
                location: "A-1".into(),
                expiration_date: None,
            },
        }
    }

    #[test]
    fn test_sort_rows() {
        let mut rows = vec![row("beans", "L-2", 3.0), row("Apples", "L-1", 10.0)];
        sort_list(&mut rows, "name", true);
        assert_eq!(rows[0].product.name, "Apples");
        sort_list(&mut rows, "quantity", false);
        assert_eq!(rows[0].product.quantity, 10.0);
        sort_list(&mut rows, "lot", false);
        assert_eq!(rows[0].lot_code, "L-2");
    }
}
