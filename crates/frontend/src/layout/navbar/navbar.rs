use leptos::prelude::*;
use leptos_router::components::A;

use crate::system::auth::context::use_auth;

#[component]
pub fn Navbar() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <header class="navbar">
            <div class="navbar-inner">
                <h1 class="navbar-title">
                    <A href="/" attr:class="navbar-home-link">"Near Gourmet"</A>
                </h1>
                <nav class="navbar-link">
                    <A href="/ranking">"ランキング"</A>
                    <Show
                        when=move || auth_state.get().is_authenticated()
                        fallback=|| view! { <A href="/login">"ログイン"</A> }
                    >
                        <A href="/mypage">"マイページへ"</A>
                    </Show>
                </nav>
            </div>
        </header>
    }
}
