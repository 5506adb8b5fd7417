use chrono::NaiveDate;
use contracts::dashboards::d001_financial_analytics::{
    spend_by_supplier, total_maintenance_cost, total_spend, FinancialAnalyticsRequest,
    FinancialAnalyticsResponse, SupplierSpendRow,
};
use contracts::shared::list_filter::{
    filter_records, summarize, ErrorCategory, FilterCriteria, SummaryStats,
};
use contracts::shared::request_seq::RequestSequencer;
use contracts::system::roles::Capability;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d001_financial_analytics::api;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::fetch_status::FetchStatus;
use crate::shared::components::filter_panel::{FilterField, FilterPanel};
use crate::shared::components::stat_card::{format_money, format_thousands, StatCard};
use crate::shared::config::{config, ListsConfig};
use crate::shared::date_utils::{parse_date_input, today};
use crate::shared::fetch_guard::debounced;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::system::auth::guard::RequireCapability;

/// Request for the selected period. Bounds are sent even when only one is
/// filled; the server decides how to treat an open range.
pub fn build_request(date_from: &str, date_to: &str) -> FinancialAnalyticsRequest {
    FinancialAnalyticsRequest {
        date_from: parse_date_input(date_from),
        date_to: parse_date_input(date_to),
    }
}

/// Local criteria over the spend rows
pub fn build_criteria(
    supplier: &str,
    category: &str,
    date_from: &str,
    date_to: &str,
) -> FilterCriteria {
    FilterCriteria::default()
        .contains("supplier_name", supplier.trim())
        .exact("category", category.trim())
        .date_range(parse_date_input(date_from), parse_date_input(date_to))
}

/// Share of `part` in `total`, in percent
pub fn share_percent(part: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        part / total * 100.0
    }
}

/// Record counts per category and distinct suppliers
pub fn spend_stats(
    rows: &[SupplierSpendRow],
    today: NaiveDate,
    lists: &ListsConfig,
) -> SummaryStats {
    summarize(rows, today, &lists.summary_options())
}

fn categories(rows: &[SupplierSpendRow]) -> Vec<String> {
    let mut result: Vec<String> = rows.iter().filter_map(|r| r.category.clone()).collect();
    result.sort();
    result.dedup();
    result
}

#[component]
pub fn FinancialAnalyticsDashboard() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ViewFinancialAnalytics>
            <Dashboard />
        </RequireCapability>
    }
}

#[component]
fn Dashboard() -> impl IntoView {
    let date_from = RwSignal::new(String::new());
    let date_to = RwSignal::new(String::new());
    let supplier = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());

    let (data, set_data) = signal(FinancialAnalyticsResponse::default());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<ErrorCategory>);
    let sequencer = StoredValue::new(RequestSequencer::new());

    let request = Memo::new(move |_| build_request(&date_from.get(), &date_to.get()));

    let load = move |request: FinancialAnalyticsRequest, delay_ms: u32| {
        set_loading.set(true);
        let seq = sequencer.get_value();
        spawn_local(async move {
            let fetch = move || api::fetch_financial_analytics(request);
            let Some(result) = debounced(&seq, delay_ms, fetch).await else {
                return;
            };
            match result {
                Ok(response) => {
                    set_data.set(response);
                    set_error.set(None);
                }
                Err(category) => {
                    log::warn!("Financial analytics failed: {:?}", category);
                    set_data.set(FinancialAnalyticsResponse::default());
                    set_error.set(Some(category));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |prev: Option<()>| {
        let delay_ms = if prev.is_none() { 0 } else { config().lists.debounce_ms };
        load(request.get(), delay_ms);
    });

    let criteria = Memo::new(move |_| {
        build_criteria(&supplier.get(), &category.get(), &date_from.get(), &date_to.get())
    });
    let rows = Memo::new(move |_| {
        let criteria = criteria.get();
        data.with(|d| filter_records(&d.spend, &criteria))
    });
    let supplier_totals = Memo::new(move |_| rows.with(|r| spend_by_supplier(r)));
    let spend = Memo::new(move |_| rows.with(|r| total_spend(r)));
    let maintenance = Memo::new(move |_| data.with(|d| total_maintenance_cost(&d.sections)));
    let stats = Memo::new(move |_| {
        rows.with(|r| spend_stats(r, today(), &config().lists))
    });
    let category_options = Memo::new(move |_| data.with(|d| categories(&d.spend)));

    let filter_expanded = RwSignal::new(true);
    let active_count = Signal::derive(move || criteria.with(|c| c.active_count()));
    let reset = Callback::new(move |_| {
        for input in [date_from, date_to, supplier, category] {
            input.set(String::new());
        }
    });

    view! {
        <PageFrame page_id="d001_financial_analytics--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Financial analytics"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load(request.get_untracked(), 0)
                        disabled=loading
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=filter_expanded
                    active_filters_count=active_count
                    on_reset=reset
                >
                    <FilterField label="Period from">
                        <DateInput value=date_from />
                    </FilterField>
                    <FilterField label="Period to">
                        <DateInput value=date_to />
                    </FilterField>
                    <FilterField label="Supplier">
                        <Input value=supplier placeholder="Supplier name..." />
                    </FilterField>
                    <FilterField label="Category">
                        <Select value=category>
                            <option value="">"All"</option>
                            <For
                                each=move || category_options.get()
                                key=|c| c.clone()
                                children=move |c| {
                                    let label = c.clone();
                                    view! { <option value=c>{label}</option> }
                                }
                            />
                        </Select>
                    </FilterField>
                </FilterPanel>

                <div class="stat-cards">
                    <StatCard
                        label="Supplier spend"
                        icon_name="dollar-sign"
                        value=Signal::derive(move || format_money(spend.get()))
                    />
                    <StatCard
                        label="Suppliers"
                        icon_name="users"
                        value=Signal::derive(move || stats.with(|s| s.distinct_groups).to_string())
                    />
                    <StatCard
                        label="Billing records"
                        icon_name="clipboard-check"
                        value=Signal::derive(move || format_thousands(stats.with(|s| s.total) as i64))
                    />
                    <StatCard
                        label="Section maintenance"
                        icon_name="package"
                        value=Signal::derive(move || format_money(maintenance.get()))
                        subtitle="Monthly cost of all sections"
                    />
                </div>

                <FetchStatus
                    loading=loading
                    error=error
                    is_empty=Signal::derive(move || {
                        !loading.get() && error.with(|e| e.is_none()) && rows.with(|r| r.is_empty())
                    })
                    empty_text="No spend recorded for the selected period."
                />

                <Show when=move || rows.with(|r| !r.is_empty())>
                    <h2 class="page__subtitle">"Spend by supplier"</h2>
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=200.0>"Supplier"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Periods"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Total"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Share"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || supplier_totals.get()
                                key=|t| t.supplier_id.clone()
                                children=move |t| {
                                    let share = share_percent(t.total, spend.get_untracked());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{t.supplier_name}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{t.periods}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_money(t.total)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format!("{:.1}%", share)}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <h2 class="page__subtitle">"Records by category"</h2>
                    <div class="category-list">
                        {move || {
                            stats
                                .get()
                                .by_status
                                .into_iter()
                                .map(|(category, count)| {
                                    view! {
                                        <div class="category-list__item">
                                            <span>{category}</span>
                                            <Badge>{count.to_string()}</Badge>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::parse_config;

    #[test]
    fn test_build_request_skips_blank_dates() {
        let req = build_request("2024-01-01", " ");
        assert_eq!(req.date_from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(req.date_to, None);
    }

    #[test]
    fn test_share_percent() {
        assert_eq!(share_percent(25.0, 100.0), 25.0);
        assert_eq!(share_percent(10.0, 0.0), 0.0);
    }

    fn row(supplier_id: &str, category: Option<&str>) -> SupplierSpendRow {
        SupplierSpendRow {
            supplier_id: supplier_id.into(),
            supplier_name: "North Farms".into(),
            period: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category: category.map(str::to_string),
            amount: 1.0,
        }
    }

    #[test]
    fn test_spend_stats_use_list_settings() {
        let lists = parse_config(None).unwrap().lists;
        let rows = vec![
            row("s1", Some("FOOD")),
            row("s2", Some("FOOD")),
            row("s1", None),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let stats = spend_stats(&rows, today, &lists);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.distinct_groups, 2);
        assert_eq!(stats.count_for("FOOD"), 2);
        assert_eq!(stats.count_for("UNCATEGORIZED"), 1);
    }

    #[test]
    fn test_categories_are_unique_and_sorted() {
        let rows = vec![
            row("s1", Some("FOOD")),
            row("s1", None),
            row("s1", Some("COLD")),
            row("s1", Some("FOOD")),
        ];
        assert_eq!(categories(&rows), vec!["COLD".to_string(), "FOOD".to_string()]);
    }

    #[test]
    fn test_supplier_criteria() {
        let c = build_criteria("Farms", "", "", "");
        assert_eq!(c.active_count(), 1);
    }
}
