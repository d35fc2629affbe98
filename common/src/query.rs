//! クエリ分類
//!
//! 入力文字列から発行すべき検索（ハッシュ / 名前）を決める。
//! 1. 全体が10進整数 → ハッシュ検索（長さに関係なく）
//! 2. 文字数が最小長以上 → 名前検索（1と独立）
//! 3. どちらでもない → 検索しない（検証エラー）

use crate::config::QueryPolicy;
use crate::error::ValidationError;
use crate::types::{SearchSource, SourceSet};

/// 全体が10進整数か（先頭の '-' を1つだけ許可）
pub fn is_numeric_hash(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// 有効な検索ソースを判定
pub fn classify(text: &str, policy: &QueryPolicy) -> SourceSet {
    let mut sources = SourceSet::default();

    if is_numeric_hash(text) {
        sources.insert(SearchSource::Hash);
    }

    if text.chars().count() >= policy.min_query_length.max(1) {
        // 名前検索の無いフローではハッシュ検索に任せる
        if policy.name_search {
            sources.insert(SearchSource::Name);
        } else {
            sources.insert(SearchSource::Hash);
        }
    }

    sources
}

/// 分類して、何も発行できなければ検証エラー
pub fn validate(text: &str, policy: &QueryPolicy) -> Result<SourceSet, ValidationError> {
    let sources = classify(text, policy);
    if !sources.is_empty() {
        return Ok(sources);
    }
    if policy.min_query_length <= 1 {
        Err(ValidationError::Empty)
    } else {
        Err(ValidationError::TooShort {
            min_length: policy.min_query_length,
        })
    }
}
