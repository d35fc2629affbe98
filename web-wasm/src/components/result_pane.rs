//! 結果ペインコンポーネント
//!
//! 定義タイプごとにグループ表示。行をクリックすると詳細ドロワーを開く。

use leptos::prelude::*;
use manifest_search_common::{DrawerState, ResultGroup, SearchConfig, SearchResultItem, SearchState};

#[component]
pub fn ResultPane(
    state: Memo<SearchState>,
    config: SearchConfig,
    drawer: RwSignal<DrawerState>,
) -> impl IntoView {
    view! {
        <section class="result-pane">
            {move || {
                let state = state.get();
                let headline = state.headline();
                match state {
                    SearchState::Idle => {
                        view! { <p class="text-muted">"Search by hash or name"</p> }.into_any()
                    }
                    SearchState::Loading { .. } => {
                        view! { <p class="text-muted loading">{headline}</p> }.into_any()
                    }
                    SearchState::Error { title, detail } => {
                        view! {
                            <div class="error-box">
                                <strong>{title}</strong>
                                <p>{detail}</p>
                            </div>
                        }
                            .into_any()
                    }
                    SearchState::Empty => {
                        view! { <p class="text-muted">{headline}</p> }.into_any()
                    }
                    SearchState::Results(set) => {
                        let config = config.clone();
                        view! {
                            <p class="result-count">{headline}</p>
                            {set
                                .groups
                                .into_iter()
                                .map(|group| {
                                    view! { <GroupList group=group config=config.clone() drawer=drawer /> }
                                })
                                .collect_view()}
                        }
                            .into_any()
                    }
                }
            }}
        </section>
    }
}

#[component]
fn GroupList(group: ResultGroup, config: SearchConfig, drawer: RwSignal<DrawerState>) -> impl IntoView {
    view! {
        <div class="result-group">
            <h2>{group.definition_type}</h2>
            <ul>
                {group
                    .items
                    .into_iter()
                    .map(|item| {
                        let icon = config.icon_url(item.display_icon.as_deref());
                        view! { <ResultRow item=item icon=icon drawer=drawer /> }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

#[component]
fn ResultRow(item: SearchResultItem, icon: String, drawer: RwSignal<DrawerState>) -> impl IntoView {
    let label = item.label().to_string();
    let payload = item.payload;

    view! {
        <li
            class="result-item"
            on:click=move |_| {
                let payload = payload.clone();
                drawer.update(|d| d.open(payload));
            }
        >
            <img class="result-icon" src=icon alt="" />
            <span class="result-name">{label}</span>
            <span class="result-hash">{item.hash}</span>
        </li>
    }
}
