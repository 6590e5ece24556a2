use contracts::dashboards::d400_monthly_ranking::RankedEntry;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d400_monthly_ranking::api;
use crate::dashboards::d400_monthly_ranking::state::{
    rank_label, LoadStatus, RankingEvent, RankingViewState,
};
use crate::shared::date_utils::{month_label, this_month};

/// Monthly visit ranking: ◀ / ▶ month header and an accordion per visitor
#[component]
pub fn MonthlyRankingPage() -> impl IntoView {
    let state = RwSignal::new(RankingViewState::new(this_month()));
    let dispatch = move |event: RankingEvent| {
        let next = state.get_untracked().apply(event);
        state.set(next);
    };

    // Server clock decides which month is "current"
    Effect::new(move |_| {
        spawn_local(async move {
            match api::get_current_month().await {
                Ok(month) => dispatch(RankingEvent::ThisMonthKnown(month)),
                Err(e) => log::warn!("D400: using browser clock, current month unavailable: {}", e),
            }
        });
    });

    // One fetch per (sequence, month); row toggles do not refetch
    let request = Memo::new(move |_| state.with(|s| (s.request_seq(), s.month())));
    Effect::new(move |_| {
        let (seq, month) = request.get();
        spawn_local(async move {
            let event = match api::get_monthly_ranking(month).await {
                Ok(response) => RankingEvent::DataFetched {
                    seq,
                    entries: response.entries,
                    is_current_month: response.is_current_month,
                },
                Err(error) => {
                    log::error!("D400: failed to load ranking for {}: {}", month, error);
                    RankingEvent::FetchFailed { seq, error }
                }
            };
            dispatch(event);
        });
    });

    view! {
        <div class="ranking-container">
            <h2 class="month-header">
                <button on:click=move |_| dispatch(RankingEvent::MonthChanged(-1))>"◀"</button>
                {move || format!("{} の訪問ランキング", month_label(state.with(|s| s.month())))}
                <button
                    on:click=move |_| dispatch(RankingEvent::MonthChanged(1))
                    disabled=move || !state.with(|s| s.can_go_next())
                >
                    "▶"
                </button>
            </h2>

            {move || match state.with(|s| s.status().clone()) {
                LoadStatus::Loading => view! {
                    <div class="ranking-loading">
                        <Spinner label="ランキングを読み込み中..." />
                    </div>
                }.into_any(),
                LoadStatus::Failed(error) => view! {
                    <div class="ranking-error">
                        <p>"ランキングを取得できませんでした。"</p>
                        <p class="error-detail">{error}</p>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| dispatch(RankingEvent::Retry)
                        >
                            "再読み込み"
                        </Button>
                    </div>
                }.into_any(),
                LoadStatus::Loaded(entries) if entries.is_empty() => view! {
                    <p class="ranking-empty">"この月の訪問データがありません。"</p>
                }.into_any(),
                LoadStatus::Loaded(entries) => view! {
                    <ol class="ranking-list">
                        {entries
                            .into_iter()
                            .map(|entry| view! { <RankingRow entry=entry state=state dispatch=dispatch /> })
                            .collect_view()}
                    </ol>
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn RankingRow<F>(entry: RankedEntry, state: RwSignal<RankingViewState>, dispatch: F) -> impl IntoView
where
    F: Fn(RankingEvent) + Copy + Send + Sync + 'static,
{
    let visitor_id = entry.visitor_id.clone();
    let is_open = {
        let visitor_id = visitor_id.clone();
        move || state.with(|s| s.is_open(&visitor_id))
    };
    let is_open_list = is_open.clone();

    view! {
        <li class="ranking-item">
            <div class="main-row" on:click=move |_| dispatch(RankingEvent::RowToggled(visitor_id.clone()))>
                <span class="rank-num">{rank_label(entry.rank)}</span>
                <div class="name">{format!("{} さん", entry.display_name)}</div>
                <div class="right-box">
                    <div class="count">{format!("{} 店舗", entry.visit_count)}</div>
                    <div class="toggle-icon">{move || if is_open() { "▲" } else { "▼" }}</div>
                </div>
            </div>
            <ul class="shop-list" class:open=is_open_list>
                {entry
                    .shop_names
                    .into_iter()
                    .map(|shop| view! { <li>{shop}</li> })
                    .collect_view()}
            </ul>
        </li>
    }
}
