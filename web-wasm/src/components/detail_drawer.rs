//! 詳細ドロワーコンポーネント

use leptos::prelude::*;
use manifest_search_common::DrawerState;

#[component]
pub fn DetailDrawer(drawer: RwSignal<DrawerState>) -> impl IntoView {
    view! {
        <aside class="detail-drawer" class:open=move || drawer.with(DrawerState::is_open)>
            <button class="drawer-close" on:click=move |_| drawer.update(DrawerState::close)>
                "Close"
            </button>
            <pre class="drawer-payload">
                {move || drawer.with(|d| d.pretty_payload().unwrap_or_default())}
            </pre>
        </aside>
    }
}
