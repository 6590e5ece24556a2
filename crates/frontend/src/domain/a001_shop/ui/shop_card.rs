use contracts::domain::a001_shop::Shop;
use leptos::prelude::*;

/// One shop in a list: name, price, station, hours, map link and the two toggles.
/// Landmark shops get no toggles.
#[component]
pub fn ShopCard(
    shop: Shop,
    #[prop(into)] bookmarked: Signal<bool>,
    #[prop(into)] visited: Signal<bool>,
    on_bookmark: Callback<Shop>,
    on_visit: Callback<Shop>,
) -> impl IntoView {
    let osm_link = shop.osm_link();
    let hours: Vec<String> = shop.business_hours.iter().map(|h| h.display()).collect();
    let is_landmark = shop.is_landmark;
    let for_bookmark = shop.clone();
    let for_visit = shop.clone();

    view! {
        <div class="genre-shop-item" class:landmark=is_landmark>
            <div class="shop-name">{shop.name.clone()}</div>
            <div class="shop-meta">
                <span class="price">{format!("¥{}", shop.price_range)}</span>
                <span class="station">{format!(" / {}", shop.station)}</span>
            </div>
            <div class="shop-address">{shop.address.clone()}</div>

            {(!hours.is_empty()).then(|| view! {
                <div class="shop-hours">
                    {hours.into_iter().map(|h| view! { <div>{h}</div> }).collect_view()}
                </div>
            })}

            {osm_link.map(|href| view! {
                <a class="map-link" href=href target="_blank" rel="noopener">"地図で見る"</a>
            })}

            {(!is_landmark).then(|| view! {
                <div class="shop-actions">
                    <button
                        class="bookmark-btn"
                        class:active=move || bookmarked.get()
                        on:click=move |_| on_bookmark.run(for_bookmark.clone())
                    >
                        {move || if bookmarked.get() { "❤️ 解除" } else { "🤍 ブックマーク" }}
                    </button>
                    <button
                        class="visited-btn"
                        class:active=move || visited.get()
                        on:click=move |_| on_visit.run(for_visit.clone())
                    >
                        {move || if visited.get() { "★ 訪問済み" } else { "☆ 行った！" }}
                    </button>
                </div>
            })}
        </div>
    }
}
