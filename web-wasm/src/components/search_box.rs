//! 検索ボックスコンポーネント
//!
//! 入力はデバウンスしてから検索、Enterは即時検索。

use crate::debounce::TimerDebouncer;
use leptos::prelude::*;

#[component]
pub fn SearchBox<FS>(initial: String, delay_ms: u64, on_search: FS) -> impl IntoView
where
    FS: Fn(String) + 'static + Clone,
{
    let debouncer = TimerDebouncer::new(delay_ms, on_search.clone());
    let on_enter = debouncer.clone();

    view! {
        <div class="search-box">
            <input
                type="search"
                id="search-input"
                placeholder="Hash or name..."
                autofocus=true
                value=initial
                on:input=move |ev| {
                    debouncer.schedule(event_target_value(&ev));
                }
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        on_enter.cancel();
                        on_search(event_target_value(&ev));
                    }
                }
            />
        </div>
    }
}
