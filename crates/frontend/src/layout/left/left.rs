use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

/// Navigation column; collapsed from the top header toggle
#[component]
pub fn Left(children: Children) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let collapsed = move || !ctx.left_open.get();

    view! {
        <aside data-zone="left" class="app-sidebar" class:app-sidebar--collapsed=collapsed>
            <nav aria-label="Main navigation">{children()}</nav>
        </aside>
    }
}
