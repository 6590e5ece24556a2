use leptos::prelude::*;
use leptos_router::components::A;

use super::context::use_auth;

/// Renders `children` only for signed-in users
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated()
            fallback=|| view! {
                <p class="login-message">
                    "このページを見るには "<A href="/login">"ログイン"</A>" してください。"
                </p>
            }
        >
            {children()}
        </Show>
    }
}

/// Renders `children` only for administrators
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_admin()
            fallback=|| view! { <p class="login-message">"管理者のみ利用できます。"</p> }
        >
            {children()}
        </Show>
    }
}
