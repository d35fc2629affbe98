//! メインアプリケーションコンポーネント

use crate::api::FetchTransport;
use crate::components::{
    detail_drawer::DetailDrawer, header::Header, result_pane::ResultPane, search_box::SearchBox,
};
use crate::route::current_route;
use leptos::prelude::*;
use leptos::task::spawn_local;
use manifest_search_common::{
    run_cycle, DrawerState, SearchConfig, SearchSession, SessionHandle,
};

/// シグナルに載せた検索セッション
///
/// 取り出し → 変更 → 書き戻し は同期的に行うので、
/// 並行するサイクル同士の更新が混ざることはない。
#[derive(Clone, Copy)]
struct SessionSignal(RwSignal<SearchSession>);

impl SessionHandle for SessionSignal {
    fn with_session<R>(&self, f: impl FnOnce(&mut SearchSession) -> R) -> R {
        let mut session = self.0.try_get_untracked().unwrap_or_default();
        let result = f(&mut session);
        self.0.set(session);
        result
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let route = current_route();
    let flow = route.flow;
    let config = SearchConfig::default();
    let debounce_ms = config.debounce_ms;

    let session = RwSignal::new(SearchSession::new());
    let drawer = RwSignal::new(DrawerState::default());
    let state = Memo::new(move |_| session.with(|s| s.state().clone()));

    // 検索ハンドラ（1回ごとに独立したサイクル）
    let on_search = {
        let config = config.clone();
        move |query: String| {
            let config = config.clone();
            spawn_local(async move {
                let transport = FetchTransport::new(&config);
                run_cycle(&transport, &SessionSignal(session), flow, &config, &query).await;
            });
        }
    };

    // パスにハッシュがあればデバウンスせずに検索
    let initial = route.initial_query.unwrap_or_default();
    if !initial.is_empty() {
        on_search(initial.clone());
    }

    view! {
        <div class="container">
            <Header flow=flow />

            <SearchBox initial=initial delay_ms=debounce_ms on_search=on_search />

            <ResultPane state=state config=config drawer=drawer />

            <DetailDrawer drawer=drawer />
        </div>
    }
}
