use contracts::shared::list_filter::ErrorCategory;
use contracts::system::auth::UserInfo;
use contracts::system::roles::{role_can, role_can_any, Capability, UserRole};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn role(&self) -> Option<UserRole> {
        self.user_info.as_ref().map(|u| u.role)
    }

    pub fn can(&self, capability: Capability) -> bool {
        role_can(self.role(), capability)
    }

    pub fn can_any(&self, any_of: &[Capability]) -> bool {
        role_can_any(self.role(), any_of)
    }

    /// Token present but the user has not been fetched yet
    pub fn is_restoring(&self) -> bool {
        self.access_token.is_some() && self.user_info.is_none()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState {
        access_token: storage::get_access_token(),
        user_info: None,
    });

    // Restore the session from localStorage on mount
    Effect::new(move |_| {
        let Some(access_token) = storage::get_access_token() else {
            return;
        };
        spawn_local(async move {
            match api::get_current_user(&access_token).await {
                Ok(user_info) => {
                    log::info!("Session restored for {}", user_info.username);
                    set_auth_state.set(AuthState {
                        access_token: Some(access_token),
                        user_info: Some(user_info),
                    });
                }
                Err(category) => {
                    log::info!("Stored session rejected: {:?}", category);
                    storage::clear_tokens();
                    set_auth_state.set(AuthState::default());
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in context");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in context");
    (auth_state, set_auth_state)
}

/// Current user's role, `None` while signed out or restoring
pub fn current_role() -> Signal<Option<UserRole>> {
    let (auth_state, _) = use_auth();
    Signal::derive(move || auth_state.with(AuthState::role))
}

/// Helper: Perform login
pub async fn do_login(
    username: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ErrorCategory> {
    let response = api::login(username, password).await?;

    storage::save_access_token(&response.access_token);
    log::info!(
        "Signed in as {} ({})",
        response.user.username,
        response.user.role.display_name()
    );

    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
    });

    Ok(())
}

/// Helper: Perform logout
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    api::logout().await;
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}
