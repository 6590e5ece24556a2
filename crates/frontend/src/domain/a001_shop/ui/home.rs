use contracts::domain::a001_shop::ShopCatalog;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::domain::a001_shop::api;
use crate::shared::api_utils::encode_segment;
use crate::system::auth::context::use_auth;

#[component]
pub fn HomePage() -> impl IntoView {
    let (catalog, set_catalog) = signal(ShopCatalog::default());
    let (auth_state, _) = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        spawn_local(async move {
            match api::fetch_catalog().await {
                Ok(c) => set_catalog.set(c),
                Err(e) => log::error!("Failed to load shop catalog: {}", e),
            }
        });
    });

    let go = move |path: String| {
        let navigate = navigate.clone();
        move |_| navigate(&path, Default::default())
    };
    let go_genre = go.clone();
    let go_station = go.clone();

    view! {
        <div class="home-container">
            <header class="header">
                <h2 class="title">"ジャンルを選択"</h2>
            </header>

            <div class="genre-buttons">
                <For
                    each=move || catalog.get().genres
                    key=|genre| genre.clone()
                    children=move |genre| {
                        let path = format!("/genre/{}", encode_segment(&genre));
                        view! { <button on:click=go_genre(path)>{genre}</button> }
                    }
                />
            </div>

            <h2 class="station-title">"最寄り駅を選択"</h2>
            <div class="station-buttons">
                <For
                    each=move || catalog.get().stations
                    key=|station| station.clone()
                    children=move |station| {
                        let path = format!("/station/{}", encode_segment(&station));
                        view! { <button on:click=go_station(path)>{station}</button> }
                    }
                />
            </div>

            <div class="ranking-link-container">
                <button class="ranking-link-btn" on:click=go("/ranking".to_string())>
                    "🏆 今月の訪問ランキングを見る"
                </button>
            </div>

            <Show
                when=move || auth_state.get().is_admin()
                fallback=move || view! {
                    <Show when=move || !auth_state.get().is_authenticated()>
                        <p class="login-message">
                            "ブックマークや訪問記録には "<A href="/login">"ログイン"</A>" してください。"
                        </p>
                    </Show>
                }
            >
                <div class="admin-link-container">
                    <A href="/admin" attr:class="admin-link-btn">"店舗登録ページへ"</A>
                </div>
            </Show>
        </div>
    }
}
