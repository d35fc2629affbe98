//! 結果の統合
//!
//! ハッシュ検索と名前検索の結果をマージし、重複除去・グループ化・ソートする。
//! 入力だけで結果が決まる純粋関数。

use crate::types::{ReconciledResultSet, ResultGroup, SearchResultItem};
use std::collections::{BTreeMap, HashSet};

/// 統合結果
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
    Empty,
    Results(ReconciledResultSet),
}

/// 2ソースの結果を統合
///
/// # Arguments
/// * `hash_items` - ハッシュ検索が成功した場合の結果（該当なし / 未使用は None）
/// * `name_items` - 名前検索が成功した場合の結果
///
/// 同じハッシュが両方にある場合はハッシュ検索側を残す。
pub fn reconcile(
    hash_items: Option<&[SearchResultItem]>,
    name_items: Option<&[SearchResultItem]>,
) -> Reconciled {
    let combined: Vec<&SearchResultItem> = match (hash_items, name_items) {
        (Some(hash), Some(name)) => {
            let seen: HashSet<&str> = hash.iter().map(|item| item.hash.as_str()).collect();
            hash.iter()
                .chain(name.iter().filter(|item| !seen.contains(item.hash.as_str())))
                .collect()
        }
        (Some(only), None) | (None, Some(only)) => only.iter().collect(),
        (None, None) => Vec::new(),
    };

    if combined.is_empty() {
        return Reconciled::Empty;
    }

    Reconciled::Results(group_items(combined))
}

/// 定義タイプでグループ化（キー昇順、グループ内は到着順）
fn group_items(items: Vec<&SearchResultItem>) -> ReconciledResultSet {
    let total_count = items.len();
    let mut groups: BTreeMap<&str, Vec<SearchResultItem>> = BTreeMap::new();
    for item in items {
        groups
            .entry(item.definition_type.as_str())
            .or_default()
            .push(item.clone());
    }

    ReconciledResultSet {
        groups: groups
            .into_iter()
            .map(|(definition_type, items)| ResultGroup {
                definition_type: definition_type.to_string(),
                items,
            })
            .collect(),
        total_count,
    }
}
