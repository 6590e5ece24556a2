use contracts::domain::a002_visit::VisitRecord;
use contracts::domain::a003_bookmark::Bookmark;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::domain::{a002_visit, a003_bookmark};
use crate::shared::date_utils::format_datetime_jst;
use crate::system::auth::context::{sign_out, use_auth};
use crate::system::auth::guard::RequireAuth;

/// `/mypage`: bookmarks and visit history of the signed-in user
#[component]
pub fn MyPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <MyPageContent />
        </RequireAuth>
    }
}

#[component]
fn MyPageContent() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let (bookmarks, set_bookmarks) = signal(Vec::<Bookmark>::new());
    let (visits, set_visits) = signal(Vec::<VisitRecord>::new());
    let navigate = use_navigate();

    Effect::new(move |_| {
        spawn_local(async move {
            match a003_bookmark::api::fetch_my_bookmarks().await {
                Ok(list) => set_bookmarks.set(list),
                Err(e) => log::error!("Failed to load bookmarks: {}", e),
            }
            match a002_visit::api::fetch_my_visits().await {
                Ok(list) => set_visits.set(list),
                Err(e) => log::error!("Failed to load visits: {}", e),
            }
        });
    });

    let display_name = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| u.display_name.clone().unwrap_or_else(|| u.username.clone()))
                .unwrap_or_default()
        })
    };

    let on_logout = move |_| {
        sign_out(set_auth_state);
        navigate("/", Default::default());
    };

    view! {
        <div class="mypage-container">
            <h2>{move || format!("{} さんのマイページ", display_name())}</h2>
            <div class="mypage-actions">
                <A href="/profile-edit">"プロフィール編集"</A>
                <button class="logout-btn" on:click=on_logout>"ログアウト"</button>
            </div>

            <section class="mypage-section">
                <h3>"ブックマーク"</h3>
                {move || {
                    let list = bookmarks.get();
                    if list.is_empty() {
                        view! { <p>"ブックマークはまだありません。"</p> }.into_any()
                    } else {
                        view! {
                            <ul class="bookmark-list">
                                {list.into_iter().map(|b| view! { <li>{b.shop_name}</li> }).collect_view()}
                            </ul>
                        }.into_any()
                    }
                }}
            </section>

            <section class="mypage-section">
                <h3>{move || format!("訪問済み ({} 店舗)", visits.with(|v| v.len()))}</h3>
                {move || {
                    let list = visits.get();
                    if list.is_empty() {
                        view! { <p>"訪問記録はまだありません。"</p> }.into_any()
                    } else {
                        view! {
                            <ul class="visited-list">
                                {list.into_iter().map(|v| view! {
                                    <li>
                                        <span class="shop-name">{v.shop_name}</span>
                                        <span class="visited-at">{format_datetime_jst(v.visited_at)}</span>
                                    </li>
                                }).collect_view()}
                            </ul>
                        }.into_any()
                    }
                }}
            </section>
        </div>
    }
}
