//! 検索結果ペインの状態機械
//!
//! 表示中の状態は常に1つだけ。新しい検索サイクルは前の状態を丸ごと置き換える。
//! サイクルには単調増加の番号を振り、最新でないサイクルの結果は捨てる
//! （遅い古いレスポンスが新しい結果を上書きしないように）。

use crate::error::{SourceFailure, ValidationError};
use crate::fetch::SourceOutcome;
use crate::reconcile::{reconcile, Reconciled};
use crate::types::{ReconciledResultSet, SearchSource, SourceSet};

/// 結果ペインの状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading {
        query: String,
        sources_in_flight: SourceSet,
    },
    Error {
        title: String,
        detail: String,
    },
    Results(ReconciledResultSet),
    Empty,
}

impl SearchState {
    /// 各ソースの結果から最終状態を決める
    ///
    /// どちらかが Failure ならもう一方の結果に関係なく Error。
    pub fn settle(hash: Option<&SourceOutcome>, name: Option<&SourceOutcome>) -> Self {
        if let Some(failure) = hash.and_then(SourceOutcome::failure).or_else(|| name.and_then(SourceOutcome::failure)) {
            return SearchState::from(failure.clone());
        }

        match reconcile(hash.and_then(SourceOutcome::found), name.and_then(SourceOutcome::found)) {
            Reconciled::Empty => SearchState::Empty,
            Reconciled::Results(set) => SearchState::Results(set),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    /// 状態の1行説明
    pub fn headline(&self) -> String {
        match self {
            SearchState::Idle => String::new(),
            SearchState::Loading {
                query,
                sources_in_flight,
            } => {
                let by: Vec<&str> = sources_in_flight.iter().map(|s| s.param()).collect();
                if by.is_empty() {
                    format!("Searching for {}...", query)
                } else {
                    format!("Searching by {} for {}...", by.join(" and "), query)
                }
            }
            SearchState::Error { title, .. } => title.clone(),
            SearchState::Results(set) => match set.total_count {
                1 => "1 result".to_string(),
                n => format!("{} results", n),
            },
            SearchState::Empty => "No results found.".to_string(),
        }
    }
}

impl From<SourceFailure> for SearchState {
    fn from(failure: SourceFailure) -> Self {
        SearchState::Error {
            title: failure.title,
            detail: failure.detail,
        }
    }
}

impl From<&ValidationError> for SearchState {
    fn from(err: &ValidationError) -> Self {
        SearchState::Error {
            title: err.to_string(),
            detail: err.hint().to_string(),
        }
    }
}

/// 検索サイクルの識別子
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleTicket {
    sequence: u64,
    query: String,
}

impl CycleTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// 結果ペインの状態と最新サイクル番号を持つ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    state: SearchState,
    latest: u64,
    last_query: Option<String>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// 最後に開始したクエリ（サイクル完了後も保持）
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn is_current(&self, ticket: &CycleTicket) -> bool {
        ticket.sequence == self.latest
    }

    /// 新しいサイクルを開始（どの状態からでも Loading）
    pub fn begin(&mut self, query: &str) -> CycleTicket {
        self.latest += 1;
        self.last_query = Some(query.to_string());
        self.state = SearchState::Loading {
            query: query.to_string(),
            sources_in_flight: SourceSet::default(),
        };
        tracing::debug!(sequence = self.latest, query, "search cycle started");
        CycleTicket {
            sequence: self.latest,
            query: query.to_string(),
        }
    }

    /// リクエスト発行直前に Loading 表示を更新
    pub fn mark_in_flight(&mut self, ticket: &CycleTicket, source: SearchSource) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match &mut self.state {
            SearchState::Loading {
                sources_in_flight, ..
            } => {
                sources_in_flight.insert(source);
                true
            }
            _ => false,
        }
    }

    /// サイクル完了。古いサイクルなら破棄して false
    pub fn finish(&mut self, ticket: &CycleTicket, state: SearchState) -> bool {
        if !self.is_current(ticket) || !self.state.is_loading() {
            tracing::warn!(
                sequence = ticket.sequence,
                latest = self.latest,
                query = %ticket.query,
                "discarding stale search result"
            );
            return false;
        }
        tracing::debug!(sequence = ticket.sequence, headline = %state.headline(), "search cycle finished");
        self.state = state;
        true
    }

    /// 検証エラーを表示（進行中のサイクルも無効になる）
    pub fn reject(&mut self, err: &ValidationError) {
        self.latest += 1;
        self.state = SearchState::from(err);
    }

    /// 初期状態に戻す（進行中のサイクルも無効になる）
    pub fn clear(&mut self) {
        self.latest += 1;
        self.last_query = None;
        self.state = SearchState::Idle;
    }
}
