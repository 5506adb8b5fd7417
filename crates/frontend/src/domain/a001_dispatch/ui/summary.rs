use contracts::domain::a001_dispatch::DispatchStatus;
use contracts::shared::list_filter::SummaryStats;
use leptos::prelude::*;

use crate::shared::components::stat_card::{StatCard, StatTone};

/// Summary cards over the currently filtered dispatches
#[component]
pub fn DispatchSummaryCards(#[prop(into)] stats: Signal<SummaryStats>) -> impl IntoView {
    let count =
        move |f: fn(&SummaryStats) -> usize| Signal::derive(move || stats.with(f).to_string());
    let status_count = move |status: DispatchStatus| {
        Signal::derive(move || stats.with(|s| s.count_for(status.as_str())).to_string())
    };

    view! {
        <div class="stat-cards">
            <StatCard label="Total" icon_name="truck" value=count(|s| s.total) />
            <StatCard
                label="Pending"
                icon_name="clock"
                value=status_count(DispatchStatus::Pending)
                tone=Signal::derive(move || {
                    if stats.with(|s| s.count_for(DispatchStatus::Pending.as_str())) > 0 {
                        StatTone::Warning
                    } else {
                        StatTone::Neutral
                    }
                })
            />
            <StatCard
                label="Accepted"
                icon_name="check"
                value=status_count(DispatchStatus::Accepted)
                tone=StatTone::Success
            />
            <StatCard label="Rejected" icon_name="x" value=status_count(DispatchStatus::Rejected) />
            <StatCard
                label="Expiring soon"
                icon_name="alert-triangle"
                value=count(|s| s.expiring_soon)
                subtitle="Products expiring within the window"
            />
            <StatCard label="Locations" icon_name="map-pin" value=count(|s| s.distinct_groups) />
        </div>
    }
}
