use leptos::prelude::*;

/// Native date picker bound to a `yyyy-mm-dd` string; empty means unset
#[component]
pub fn DateInput(value: RwSignal<String>) -> impl IntoView {
    view! {
        <input
            type="date"
            class="date-input"
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}
