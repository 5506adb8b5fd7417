use contracts::system::temporary_users::CreateTemporaryUserDto;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::date_input::DateInput;
use crate::shared::date_utils::{parse_date_input, today};
use crate::shared::icons::icon;
use crate::system::temporary_users::api;

/// Modal form issuing a new temporary credential.
///
/// Local checks run first; a payload the server still rejects shows the
/// server's own message.
#[component]
pub fn CreateTemporaryUserForm<F1, F2>(on_close: F1, on_created: F2) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn() + 'static + Copy + Send + Sync,
{
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let expires_at = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let on_save = move |_| {
        let dto = CreateTemporaryUserDto {
            username: username.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            expires_at: parse_date_input(&expires_at.get_untracked()),
        };
        if let Err(message) = dto.validate(today()) {
            set_error.set(Some(message));
            return;
        }

        set_saving.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::create_temporary_user(&dto).await {
                Ok(user) => {
                    log::info!("Temporary user {} created", user.username);
                    on_created();
                }
                Err(category) => {
                    set_error.set(category.user_message().map(str::to_string));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">"New temporary user"</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close()>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Username"</Label>
                        <Input value=username disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Label>"Password"</Label>
                        <Input
                            value=password
                            input_type=InputType::Password
                            disabled=Signal::derive(move || saving.get())
                        />
                    </div>

                    <div class="form__group">
                        <Label>"Expires on (optional)"</Label>
                        <DateInput value=expires_at />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close()
                        disabled=Signal::derive(move || saving.get())
                    >
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Creating..." } else { "Create" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
