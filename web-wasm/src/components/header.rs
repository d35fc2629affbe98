//! ヘッダーコンポーネント

use leptos::prelude::*;
use manifest_search_common::Flow;

#[component]
pub fn Header(flow: Flow) -> impl IntoView {
    view! {
        <header class="header">
            <h1>{flow.title()}</h1>
            <nav class="flow-links">
                {[Flow::Destiny1, Flow::Destiny2]
                    .into_iter()
                    .map(|f| {
                        view! {
                            <a href={format!("/{}", f.route_name())} class:active={f == flow}>
                                {f.to_string()}
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>
        </header>
    }
}
