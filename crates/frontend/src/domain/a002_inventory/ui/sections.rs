use contracts::domain::a002_inventory::Section;
use contracts::shared::list_filter::FetchState;
use contracts::shared::request_seq::RequestSequencer;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_inventory::api;
use crate::shared::components::fetch_status::FetchStatus;
use crate::shared::components::stat_card::format_money;
use crate::shared::fetch_guard::latest_only;

fn occupancy_class(percent: f64) -> &'static str {
    if percent >= 90.0 {
        "occupancy occupancy--full"
    } else if percent >= 70.0 {
        "occupancy occupancy--high"
    } else {
        "occupancy"
    }
}

/// Warehouse sections with occupancy and maintenance cost
#[component]
pub fn SectionsOverview() -> impl IntoView {
    let state = RwSignal::new(FetchState::<Section>::default());
    let sequencer = StoredValue::new(RequestSequencer::new());

    let load = move || {
        state.update(|s| s.start_loading());
        let seq = sequencer.get_value();
        spawn_local(async move {
            if let Some(result) = latest_only(&seq, api::fetch_sections).await {
                state.update(|s| s.apply(result));
            }
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load();
        }
    });

    view! {
        <div class="page__section">
            <h2 class="page__subtitle">"Sections"</h2>
            <FetchStatus
                loading=Signal::derive(move || state.with(|s| s.loading))
                error=Signal::derive(move || state.with(|s| s.error.clone()))
                is_empty=Signal::derive(move || state.with(|s| s.is_empty_state()))
                empty_text="No sections configured."
            />
            <Show when=move || state.with(|s| !s.items.is_empty())>
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=160.0>"Section"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Capacity"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Occupied"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Occupancy"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Maintenance cost"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || state.with(|s| s.items.clone())
                            key=|section| section.id.clone()
                            children=move |section| {
                                let percent = section.occupancy_percent();
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{section.name.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{section.capacity.to_string()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{section.occupied.to_string()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <span class=occupancy_class(percent)>{format!("{:.1}%", percent)}</span>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_money(section.maintenance_cost)}</TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupancy_class() {
        assert_eq!(occupancy_class(95.0), "occupancy occupancy--full");
        assert_eq!(occupancy_class(75.0), "occupancy occupancy--high");
        assert_eq!(occupancy_class(10.0), "occupancy");
    }
}
