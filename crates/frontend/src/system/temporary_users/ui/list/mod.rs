mod state;

use contracts::shared::list_filter::filter_records;
use contracts::shared::request_seq::RequestSequencer;
use contracts::system::roles::Capability;
use contracts::system::temporary_users::TemporaryUser;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use super::create::CreateTemporaryUserForm;
use crate::shared::components::fetch_status::{FetchStatus, StatusBadge};
use crate::shared::components::filter_panel::{FilterField, FilterPanel};
use crate::shared::date_utils::{format_datetime, format_optional_date, today};
use crate::shared::fetch_guard::latest_only;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator, sort_list, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::guard::RequireCapability;
use crate::system::temporary_users::api;
use state::{build_criteria, create_state};

impl Sortable for TemporaryUser {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "username" => self
                .username
                .to_lowercase()
                .cmp(&other.username.to_lowercase()),
            "expires_at" => self.expires_at.cmp(&other.expires_at),
            "is_active" => self.is_active.cmp(&other.is_active),
            _ => self.created_at.cmp(&other.created_at),
        }
    }
}

#[component]
pub fn TemporaryUsersPage() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ManageTemporaryUsers>
            <TemporaryUsersList />
        </RequireCapability>
    }
}

#[component]
fn TemporaryUsersList() -> impl IntoView {
    let state = create_state();
    let sequencer = StoredValue::new(RequestSequencer::new());
    let (show_create_form, set_show_create_form) = signal(false);

    let username_query = RwSignal::new(String::new());
    let active_only = RwSignal::new(false);
    let filters_expanded = RwSignal::new(true);

    let load_data = move || {
        state.update(|s| s.fetch.start_loading());
        let seq = sequencer.get_value();
        spawn_local(async move {
            if let Some(result) = latest_only(&seq, api::fetch_temporary_users).await {
                state.update(|s| s.fetch.apply(result));
            }
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.fetch.is_loaded) {
            load_data();
        }
    });

    let criteria = Memo::new(move |_| build_criteria(&username_query.get(), active_only.get()));

    let visible = Memo::new(move |_| {
        let criteria = criteria.get();
        state.with(|s| {
            let mut rows = filter_records(&s.fetch.items, &criteria);
            sort_list(&mut rows, &s.sort_field, s.sort_ascending);
            rows
        })
    });

    let toggle_sort = move |field: &'static str| {
        move |_| {
            state.update(|s| {
                if s.sort_field == field {
                    s.sort_ascending = !s.sort_ascending;
                } else {
                    s.sort_field = field.to_string();
                    s.sort_ascending = true;
                }
            });
        }
    };

    let sort_header = move |field: &'static str, label: &'static str| {
        view! {
            <div class="table__sortable-header" style="cursor:pointer;" on:click=toggle_sort(field)>
                {label}
                <span class=move || state.with(|s| get_sort_class(&s.sort_field, field))>
                    {move || state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))}
                </span>
            </div>
        }
    };

    let loading = Signal::derive(move || state.with(|s| s.fetch.loading));

    view! {
        <PageFrame page_id="sys_temporary_users--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Temporary users"</h1>
                    <Badge>{move || visible.with(|v| v.len()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_show_create_form.set(true)
                    >
                        {icon("plus")}
                        " New"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=filters_expanded
                    active_filters_count=Signal::derive(move || criteria.with(|c| c.active_count()))
                    on_reset=Callback::new(move |_| {
                        username_query.set(String::new());
                        active_only.set(false);
                    })
                >
                    <FilterField label="Username">
                        <Input value=username_query placeholder="Part of the username..." />
                    </FilterField>
                    <FilterField label="Status">
                        <Checkbox checked=active_only label="Active only" />
                    </FilterField>
                </FilterPanel>

                <FetchStatus
                    loading=loading
                    error=Signal::derive(move || state.with(|s| s.fetch.error.clone()))
                    is_empty=Signal::derive(move || {
                        state.with(|s| s.fetch.is_loaded && s.fetch.error.is_none() && !s.fetch.loading)
                            && visible.with(|v| v.is_empty())
                    })
                    empty_text="No temporary users yet."
                />

                <Show when=move || visible.with(|v| !v.is_empty())>
                    <div class="table-wrapper">
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell min_width=160.0>{sort_header("username", "Username")}</TableHeaderCell>
                                    <TableHeaderCell min_width=140.0>"Created by"</TableHeaderCell>
                                    <TableHeaderCell min_width=140.0>{sort_header("created_at", "Created")}</TableHeaderCell>
                                    <TableHeaderCell min_width=110.0>{sort_header("expires_at", "Expires")}</TableHeaderCell>
                                    <TableHeaderCell min_width=90.0>{sort_header("is_active", "Status")}</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || visible.get()
                                    key=|u| u.id.clone()
                                    children=move |user| {
                                        let status = if !user.is_active {
                                            view! { <StatusBadge label="Disabled" tone="error" /> }.into_any()
                                        } else if user.is_expired(today()) {
                                            view! { <StatusBadge label="Expired" tone="warning" /> }.into_any()
                                        } else {
                                            view! { <StatusBadge label="Active" tone="success" /> }.into_any()
                                        };
                                        view! {
                                            <TableRow>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>
                                                        <span style="font-weight: 500;">{user.username.clone()}</span>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{user.created_by.clone()}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{format_datetime(&user.created_at)}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{format_optional_date(user.expires_at)}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{status}</TableCellLayout>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }
                                />
                            </TableBody>
                        </Table>
                    </div>
                </Show>

                {move || show_create_form.get().then(|| view! {
                    <CreateTemporaryUserForm
                        on_close=move || set_show_create_form.set(false)
                        on_created=move || {
                            set_show_create_form.set(false);
                            load_data();
                        }
                    />
                })}
            </div>
        </PageFrame>
    }
}
