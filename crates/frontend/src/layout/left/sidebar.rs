//! Sidebar with collapsible menu groups. Items the signed-in role cannot
//! use are not shown at all.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{
    TAB_DISPATCHES, TAB_DISPATCH_REQUESTS, TAB_FINANCIAL_ANALYTICS, TAB_INVENTORY,
    TAB_TEMPORARY_USERS,
};
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use crate::system::auth::context::current_role;
use contracts::system::roles::{role_can, Capability, UserRole};
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuItem {
    key: &'static str,
    icon: &'static str,
    /// Shown when the role has any of these
    any_of: &'static [Capability],
}

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<MenuItem>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "dispatches",
            label: "Dispatches",
            icon: "truck",
            items: vec![
                MenuItem {
                    key: TAB_DISPATCHES,
                    icon: "truck",
                    any_of: &[Capability::ViewOwnDispatches, Capability::WithdrawProducts],
                },
                MenuItem {
                    key: TAB_DISPATCH_REQUESTS,
                    icon: "clipboard-check",
                    any_of: &[Capability::ReviewDispatchRequests],
                },
            ],
        },
        MenuGroup {
            id: "warehouse",
            label: "Warehouse",
            icon: "package",
            items: vec![MenuItem {
                key: TAB_INVENTORY,
                icon: "package",
                any_of: &[Capability::BrowseInventory],
            }],
        },
        MenuGroup {
            id: "analytics",
            label: "Analytics",
            icon: "bar-chart",
            items: vec![MenuItem {
                key: TAB_FINANCIAL_ANALYTICS,
                icon: "dollar-sign",
                any_of: &[Capability::ViewFinancialAnalytics],
            }],
        },
        MenuGroup {
            id: "settings",
            label: "Settings",
            icon: "users",
            items: vec![MenuItem {
                key: TAB_TEMPORARY_USERS,
                icon: "users",
                any_of: &[Capability::ManageTemporaryUsers],
            }],
        },
    ]
}

/// Menu groups trimmed to what `role` may open; empty groups are dropped.
fn menu_for_role(role: Option<UserRole>) -> Vec<MenuGroup> {
    get_menu_groups()
        .into_iter()
        .filter_map(|mut group| {
            group
                .items
                .retain(|item| item.any_of.iter().any(|c| role_can(role, *c)));
            (!group.items.is_empty()).then_some(group)
        })
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let role = current_role();
    let expanded_groups = RwSignal::new(vec![
        "dispatches".to_string(),
        "warehouse".to_string(),
        "analytics".to_string(),
        "settings".to_string(),
    ]);

    view! {
        <div class="app-sidebar__content">
            {move || {
                menu_for_role(role.get())
                    .into_iter()
                    .map(|group| {
                        let gid_click = group.id.to_string();
                        let gid_chevron = group.id.to_string();
                        let gid_show = group.id.to_string();
                        let items = StoredValue::new(group.items);
                        view! {
                            <div>
                                <div
                                    class="app-sidebar__item"
                                    style:padding-left="12px"
                                    on:click=move |_| {
                                        let gid = gid_click.clone();
                                        expanded_groups.update(move |groups| {
                                            if let Some(pos) = groups.iter().position(|x| x == &gid) {
                                                groups.remove(pos);
                                            } else {
                                                groups.push(gid);
                                            }
                                        });
                                    }
                                >
                                    <div class="app-sidebar__item-content">
                                        {icon(group.icon)}
                                        <span>{group.label}</span>
                                    </div>
                                    <div
                                        class="app-sidebar__chevron"
                                        class:app-sidebar__chevron--expanded=move || {
                                            expanded_groups.with(|g| g.contains(&gid_chevron))
                                        }
                                    >
                                        {icon("chevron-right")}
                                    </div>
                                </div>
                                <Show when=move || expanded_groups.with(|g| g.contains(&gid_show))>
                                    <div class="app-sidebar__children">
                                        {items
                                            .get_value()
                                            .into_iter()
                                            .map(|item| {
                                                let key = item.key;
                                                view! {
                                                    <div
                                                        class="app-sidebar__item"
                                                        class:app-sidebar__item--active=move || {
                                                            ctx.active.get().as_deref() == Some(key)
                                                        }
                                                        style:padding-left="10px"
                                                        on:click=move |_| ctx.open_tab(key, tab_label_for_key(key))
                                                    >
                                                        <div class="app-sidebar__item-content">
                                                            {icon(item.icon)}
                                                            <span>{tab_label_for_key(key)}</span>
                                                        </div>
                                                    </div>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </Show>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(role: Option<UserRole>) -> Vec<&'static str> {
        menu_for_role(role)
            .into_iter()
            .flat_map(|g| g.items.into_iter().map(|i| i.key))
            .collect()
    }

    #[test]
    fn test_admin_menu() {
        assert_eq!(
            keys(Some(UserRole::Admin)),
            vec![TAB_DISPATCH_REQUESTS, TAB_INVENTORY, TAB_FINANCIAL_ANALYTICS]
        );
    }

    #[test]
    fn test_supplier_menu() {
        assert_eq!(
            keys(Some(UserRole::Supplier)),
            vec![TAB_DISPATCHES, TAB_INVENTORY, TAB_TEMPORARY_USERS]
        );
    }

    #[test]
    fn test_buyer_and_unknown_menu() {
        assert_eq!(keys(Some(UserRole::Buyer)), vec![TAB_DISPATCHES]);
        assert!(menu_for_role(Some(UserRole::Unknown)).is_empty());
        assert!(menu_for_role(None).is_empty());
    }
}
