use contracts::shared::list_filter::MSG_FORBIDDEN;
use contracts::system::roles::Capability;
use leptos::prelude::*;
use thaw::*;

use super::context::{use_auth, AuthState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
    SignedOut,
    Restoring,
    Denied,
    Granted,
}

fn access_for(state: &AuthState, any_of: &[Capability]) -> Access {
    if state.access_token.is_none() {
        Access::SignedOut
    } else if state.is_restoring() {
        Access::Restoring
    } else if state.can_any(any_of) {
        Access::Granted
    } else {
        Access::Denied
    }
}

fn guarded(any_of: Vec<Capability>, children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let access = Memo::new(move |_| auth_state.with(|s| access_for(s, &any_of)));

    move || match access.get() {
        Access::SignedOut => {
            view! { <div class="alert alert--error">"Not authenticated. Please sign in."</div> }
                .into_any()
        }
        Access::Restoring => view! { <Spinner label="Loading session..." /> }.into_any(),
        Access::Denied => {
            view! { <div class="alert alert--error">{MSG_FORBIDDEN}</div> }.into_any()
        }
        Access::Granted => children().into_any(),
    }
}

/// Renders children only when the current role grants `capability`
#[component]
pub fn RequireCapability(capability: Capability, children: ChildrenFn) -> impl IntoView {
    guarded(vec![capability], children)
}

/// Renders children when the current role grants at least one of `any_of`
#[component]
pub fn RequireAnyCapability(
    any_of: &'static [Capability],
    children: ChildrenFn,
) -> impl IntoView {
    guarded(any_of.to_vec(), children)
}
