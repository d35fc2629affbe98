//! 対話式検索
//!
//! 入力ごとに検索サイクルを実行し、結果から1件選ぶとレコード全体を表示する。

use crate::error::Result;
use crate::render::{format_drawer, format_state, SpinnerSession};
use dialoguer::{Input, Select};
use manifest_search_common::{
    run_cycle, DrawerState, Flow, SearchConfig, SearchResultItem, SearchState, SearchTransport,
    SessionHandle,
};

/// 選択肢のラベル
pub fn item_choices(items: &[SearchResultItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| format!("[{}] {} ({})", item.definition_type, item.label(), item.hash))
        .collect()
}

/// 対話式で検索
pub async fn run_interactive<T: SearchTransport>(
    transport: &T,
    flow: Flow,
    config: &SearchConfig,
) -> Result<()> {
    println!("🔎 {}", flow.title());
    println!("---");
    println!("操作: クエリを入力して[Enter] / 空行で終了");
    println!("---\n");

    let session = SpinnerSession::new();
    let mut drawer = DrawerState::default();

    loop {
        let query: String = Input::new()
            .with_prompt("検索")
            .allow_empty(true)
            .interact_text()?;

        if query.is_empty() {
            break;
        }

        let Some(state) = run_cycle(transport, &session, flow, config, &query).await else {
            continue;
        };
        let searched = matches!(state, SearchState::Results(_) | SearchState::Empty);
        if let Some(last) = session.with_session(|s| s.last_query().map(str::to_string)).filter(|_| searched) {
            println!("「{}」の検索結果:", last);
        }
        println!("{}\n", format_state(&state, config, false));

        let SearchState::Results(set) = state else {
            continue;
        };

        let items = set.flatten();
        let mut choices = item_choices(&items);
        choices.push("(戻る)".to_string());

        let selection = Select::new()
            .with_prompt("詳細を表示")
            .items(&choices)
            .default(choices.len() - 1)
            .interact()?;

        if let Some(item) = items.get(selection) {
            drawer.open(item.payload.clone());
            println!("{}\n", format_drawer(&drawer));
            drawer.close();
        }
    }

    println!("✔ 終了");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_choices() {
        let items: Vec<SearchResultItem> = vec![
            serde_json::from_value(json!({"hash": "1", "definition": "Weapon", "name": "Thorn"})).unwrap(),
            serde_json::from_value(json!({"hash": "2", "definition": "Perk"})).unwrap(),
        ];
        let choices = item_choices(&items);
        assert_eq!(choices, vec!["[Weapon] Thorn (1)", "[Perk] 2 (2)"]);
    }
}
