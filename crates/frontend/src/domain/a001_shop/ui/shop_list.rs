use contracts::domain::a001_shop::Shop;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use super::shop_card::ShopCard;
use crate::domain::a001_shop::api;
use crate::domain::{a002_visit, a003_bookmark};
use crate::system::auth::context::use_auth;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShopFilter {
    Genre,
    Station,
}

impl ShopFilter {
    fn param(self) -> &'static str {
        match self {
            ShopFilter::Genre => "genre",
            ShopFilter::Station => "station",
        }
    }

    fn heading(self, value: &str) -> String {
        match self {
            ShopFilter::Genre => format!("{} のお店", value),
            ShopFilter::Station => format!("{} 駅周辺のお店", value),
        }
    }
}

/// Insert or remove `id` so that membership equals `present`
fn set_membership(ids: &mut Vec<String>, id: &str, present: bool) {
    ids.retain(|existing| existing != id);
    if present {
        ids.push(id.to_string());
    }
}

/// `/genre/:genre`
#[component]
pub fn GenrePage() -> impl IntoView {
    view! { <ShopListPage filter=ShopFilter::Genre /> }
}

/// `/station/:station`, with the landmark shop on top
#[component]
pub fn StationPage() -> impl IntoView {
    view! { <ShopListPage filter=ShopFilter::Station /> }
}

#[component]
fn ShopListPage(filter: ShopFilter) -> impl IntoView {
    let params = use_params_map();
    let value = Memo::new(move |_| {
        params.with(|p| p.get(filter.param())).unwrap_or_default()
    });

    let (shops, set_shops) = signal(Vec::<Shop>::new());
    let (landmark, set_landmark) = signal(None::<Shop>);
    let (loading, set_loading) = signal(true);
    let (notice, set_notice) = signal(None::<String>);
    let bookmarked_ids = RwSignal::new(Vec::<String>::new());
    let visited_ids = RwSignal::new(Vec::<String>::new());
    let (auth_state, _) = use_auth();

    Effect::new(move |_| {
        let value = value.get();
        set_loading.set(true);
        spawn_local(async move {
            let result = match filter {
                ShopFilter::Genre => api::fetch_by_genre(&value).await,
                ShopFilter::Station => api::fetch_by_station(&value).await,
            };
            match result {
                Ok(list) => set_shops.set(list),
                Err(e) => log::error!("Failed to load shops for '{}': {}", value, e),
            }
            set_loading.set(false);
        });
    });

    Effect::new(move |_| {
        if filter != ShopFilter::Station {
            return;
        }
        spawn_local(async move {
            match api::fetch_landmark().await {
                Ok(shop) => set_landmark.set(shop),
                Err(e) => log::warn!("Failed to load landmark: {}", e),
            }
        });
    });

    // Marks of the signed-in user
    Effect::new(move |_| {
        if !auth_state.get().is_authenticated() {
            bookmarked_ids.set(Vec::new());
            visited_ids.set(Vec::new());
            return;
        }
        spawn_local(async move {
            match a003_bookmark::api::fetch_bookmarked_ids().await {
                Ok(ids) => bookmarked_ids.set(ids),
                Err(e) => log::warn!("Failed to load bookmarks: {}", e),
            }
            match a002_visit::api::fetch_visited_ids().await {
                Ok(ids) => visited_ids.set(ids),
                Err(e) => log::warn!("Failed to load visits: {}", e),
            }
        });
    });

    let on_bookmark = Callback::new(move |shop: Shop| {
        if !auth_state.get_untracked().is_authenticated() {
            set_notice.set(Some("ブックマークするにはログインが必要です。".to_string()));
            return;
        }
        spawn_local(async move {
            match a003_bookmark::api::toggle_bookmark(&shop.to_string_id()).await {
                Ok(r) => bookmarked_ids.update(|ids| set_membership(ids, &r.shop_id, r.bookmarked)),
                Err(e) => set_notice.set(Some(format!("ブックマークに失敗しました: {}", e))),
            }
        });
    });

    let on_visit = Callback::new(move |shop: Shop| {
        if !auth_state.get_untracked().is_authenticated() {
            set_notice.set(Some("訪問記録にはログインが必要です。".to_string()));
            return;
        }
        spawn_local(async move {
            match a002_visit::api::toggle_visit(&shop.to_string_id()).await {
                Ok(r) => visited_ids.update(|ids| set_membership(ids, &r.shop_id, r.visited)),
                Err(e) => set_notice.set(Some(format!("訪問記録に失敗しました: {}", e))),
            }
        });
    });

    let card = move |shop: Shop| {
        let id = shop.to_string_id();
        let id_for_visit = id.clone();
        view! {
            <ShopCard
                shop=shop
                bookmarked=Signal::derive(move || bookmarked_ids.with(|ids| ids.contains(&id)))
                visited=Signal::derive(move || visited_ids.with(|ids| ids.contains(&id_for_visit)))
                on_bookmark=on_bookmark
                on_visit=on_visit
            />
        }
    };

    view! {
        <div class="genre-page">
            <h2 class="genre-title">{move || filter.heading(&value.get())}</h2>

            {move || notice.get().map(|text| view! {
                <div class="notice" on:click=move |_| set_notice.set(None)>{text}</div>
            })}

            {move || landmark.get().map(card)}

            <div class="genre-list">
                {move || {
                    if loading.get() {
                        view! { <p>"読み込み中..."</p> }.into_any()
                    } else if shops.with(|s| s.is_empty()) {
                        view! { <p>"お店が見つかりませんでした。"</p> }.into_any()
                    } else {
                        shops.get().into_iter().map(card).collect_view().into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_membership() {
        let mut ids = vec!["a".to_string()];
        set_membership(&mut ids, "b", true);
        set_membership(&mut ids, "b", true);
        assert_eq!(ids, vec!["a", "b"]);
        set_membership(&mut ids, "a", false);
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_headings() {
        assert_eq!(ShopFilter::Genre.heading("ラーメン"), "ラーメン のお店");
        assert_eq!(ShopFilter::Station.heading("梅田"), "梅田 駅周辺のお店");
    }
}
