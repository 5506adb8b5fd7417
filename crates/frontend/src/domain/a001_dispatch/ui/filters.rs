use contracts::domain::a001_dispatch::DispatchStatus;
use contracts::shared::list_filter::FilterCriteria;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::date_input::DateInput;
use crate::shared::components::filter_panel::{FilterField, FilterPanel};
use crate::shared::date_utils::parse_date_input;

/// Filter inputs of a dispatch list, one signal per form field
#[derive(Clone, Copy)]
pub struct DispatchFilterInputs {
    pub status: RwSignal<String>,
    pub buyer_name: RwSignal<String>,
    pub warehouse_location: RwSignal<String>,
    pub date_from: RwSignal<String>,
    pub date_to: RwSignal<String>,
    initial_status: Option<DispatchStatus>,
}

impl DispatchFilterInputs {
    pub fn new(initial_status: Option<DispatchStatus>) -> Self {
        Self {
            status: RwSignal::new(status_code(initial_status)),
            buyer_name: RwSignal::new(String::new()),
            warehouse_location: RwSignal::new(String::new()),
            date_from: RwSignal::new(String::new()),
            date_to: RwSignal::new(String::new()),
            initial_status,
        }
    }

    /// Current criteria; tracks every input when called reactively
    pub fn criteria(&self) -> FilterCriteria {
        build_criteria(
            &self.status.get(),
            &self.buyer_name.get(),
            &self.warehouse_location.get(),
            &self.date_from.get(),
            &self.date_to.get(),
        )
    }

    pub fn reset(&self) {
        self.status.set(status_code(self.initial_status));
        self.buyer_name.set(String::new());
        self.warehouse_location.set(String::new());
        self.date_from.set(String::new());
        self.date_to.set(String::new());
    }
}

fn status_code(status: Option<DispatchStatus>) -> String {
    status.map(|s| s.as_str().to_string()).unwrap_or_default()
}

/// Status is matched exactly, names and locations by substring. The date
/// range applies to the request date once both ends are filled in.
pub fn build_criteria(
    status: &str,
    buyer_name: &str,
    warehouse_location: &str,
    date_from: &str,
    date_to: &str,
) -> FilterCriteria {
    FilterCriteria::default()
        .exact("status", status.trim())
        .contains("buyer_name", buyer_name.trim())
        .contains("warehouse_location", warehouse_location.trim())
        .date_range(parse_date_input(date_from), parse_date_input(date_to))
}

#[component]
pub fn DispatchFilterPanel(inputs: DispatchFilterInputs) -> impl IntoView {
    let is_expanded = RwSignal::new(true);
    let active_count = Signal::derive(move || inputs.criteria().active_count());

    view! {
        <FilterPanel
            is_expanded=is_expanded
            active_filters_count=active_count
            on_reset=Callback::new(move |_| inputs.reset())
        >
            <FilterField label="Status">
                <Select value=inputs.status>
                    <option value="">"All"</option>
                    {DispatchStatus::ALL
                        .into_iter()
                        .map(|s| view! { <option value=s.as_str()>{s.display_name()}</option> })
                        .collect_view()}
                </Select>
            </FilterField>
            <FilterField label="Buyer">
                <Input value=inputs.buyer_name placeholder="Buyer name..." />
            </FilterField>
            <FilterField label="Location">
                <Input value=inputs.warehouse_location placeholder="Section or location..." />
            </FilterField>
            <FilterField label="Requested from">
                <DateInput value=inputs.date_from />
            </FilterField>
            <FilterField label="Requested to">
                <DateInput value=inputs.date_to />
            </FilterField>
        </FilterPanel>
    }
}
