use contracts::domain::a001_dispatch::Dispatch;
use contracts::shared::list_filter::FetchState;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct DispatchListState {
    pub fetch: FetchState<Dispatch>,
}

pub fn create_state() -> RwSignal<DispatchListState> {
    RwSignal::new(DispatchListState::default())
}
