//! 端末への結果表示
//!
//! ブラウザの結果ペインに相当。Loading中はスピナー、それ以外は状態をテキストで出す。

use indicatif::{ProgressBar, ProgressStyle};
use manifest_search_common::{
    DrawerState, ReconciledResultSet, SearchConfig, SearchSession, SearchState, SessionHandle,
};
use std::cell::RefCell;
use std::time::Duration;

/// 状態が変わるたびにスピナーを更新するセッション
pub struct SpinnerSession {
    session: RefCell<SearchSession>,
    spinner: RefCell<Option<ProgressBar>>,
}

impl SpinnerSession {
    pub fn new() -> Self {
        Self {
            session: RefCell::new(SearchSession::new()),
            spinner: RefCell::new(None),
        }
    }

    pub fn state(&self) -> SearchState {
        self.session.borrow().state().clone()
    }

    fn sync_spinner(&self, state: &SearchState) {
        let mut spinner = self.spinner.borrow_mut();
        if state.is_loading() {
            let bar = spinner.get_or_insert_with(new_spinner);
            bar.set_message(state.headline());
        } else if let Some(bar) = spinner.take() {
            bar.finish_and_clear();
        }
    }
}

fn new_spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

impl Default for SpinnerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHandle for SpinnerSession {
    fn with_session<R>(&self, f: impl FnOnce(&mut SearchSession) -> R) -> R {
        let (result, state) = {
            let mut session = self.session.borrow_mut();
            let result = f(&mut session);
            (result, session.state().clone())
        };
        self.sync_spinner(&state);
        result
    }
}

/// 状態をテキストに整形
pub fn format_state(state: &SearchState, config: &SearchConfig, show_icons: bool) -> String {
    match state {
        SearchState::Results(set) => format_results(set, config, show_icons),
        SearchState::Error { title, detail } => format!("✖ {}\n  {}", title, detail),
        other => other.headline(),
    }
}

/// 定義タイプごとに一覧表示
pub fn format_results(set: &ReconciledResultSet, config: &SearchConfig, show_icons: bool) -> String {
    let mut out = String::new();
    for group in &set.groups {
        out.push_str(&format!("{} ({})\n", group.definition_type, group.items.len()));
        for item in &group.items {
            out.push_str(&format!("  {:>12}  {}\n", item.hash, item.display_name.as_deref().unwrap_or("N/A")));
            if show_icons {
                out.push_str(&format!("                {}\n", config.icon_url(item.display_icon.as_deref())));
            }
        }
    }
    out.push_str(&format!("✔ {}", SearchState::Results(set.clone()).headline()));
    out
}

/// ドロワーの内容（レコード全体のJSON）
pub fn format_drawer(drawer: &DrawerState) -> String {
    drawer
        .pretty_payload()
        .unwrap_or_else(|| "(no record selected)".to_string())
}
