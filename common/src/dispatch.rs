//! 検索サイクルの実行
//!
//! 分類 → 検索（ハッシュ・名前を並行）→ 統合 → 状態更新 を1回分行う。
//! 片方が失敗した時点で Error を反映し、もう片方の応答は待たない。

use crate::config::{Flow, SearchConfig};
use crate::fetch::{fetch_source, SearchRequest, SearchTransport, SourceOutcome};
use crate::query::validate;
use crate::state::{SearchSession, SearchState};
use crate::types::SearchSource;
use futures::future::{self, Either};
use std::cell::RefCell;

/// セッションへの可変アクセス
///
/// ブラウザではシグナル、CLIでは `RefCell` 越しにセッションを触る。
pub trait SessionHandle {
    fn with_session<R>(&self, f: impl FnOnce(&mut SearchSession) -> R) -> R;
}

impl SessionHandle for RefCell<SearchSession> {
    fn with_session<R>(&self, f: impl FnOnce(&mut SearchSession) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

impl<H: SessionHandle> SessionHandle for std::rc::Rc<H> {
    fn with_session<R>(&self, f: impl FnOnce(&mut SearchSession) -> R) -> R {
        (**self).with_session(f)
    }
}

/// 1サイクル実行
///
/// # Returns
/// 反映した状態。より新しいサイクルに追い越されていた場合は None
pub async fn run_cycle<T, S>(
    transport: &T,
    session: &S,
    flow: Flow,
    config: &SearchConfig,
    query: &str,
) -> Option<SearchState>
where
    T: SearchTransport,
    S: SessionHandle,
{
    let sources = match validate(query, &flow.policy()) {
        Ok(sources) => sources,
        Err(e) => {
            tracing::debug!(%flow, query, error = %e, "query rejected");
            return Some(session.with_session(|s| {
                s.reject(&e);
                s.state().clone()
            }));
        }
    };

    let ticket = session.with_session(|s| s.begin(query));

    // 発行順はハッシュ → 名前
    let hash_request = sources
        .contains(SearchSource::Hash)
        .then(|| SearchRequest::new(flow, config, SearchSource::Hash, query));
    if hash_request.is_some() {
        session.with_session(|s| s.mark_in_flight(&ticket, SearchSource::Hash));
    }
    let name_request = sources
        .contains(SearchSource::Name)
        .then(|| SearchRequest::new(flow, config, SearchSource::Name, query));
    if name_request.is_some() {
        session.with_session(|s| s.mark_in_flight(&ticket, SearchSource::Name));
    }

    let hash_call = Box::pin(issue(transport, hash_request));
    let name_call = Box::pin(issue(transport, name_request));

    let (hash_outcome, name_outcome) = match future::select(hash_call, name_call).await {
        Either::Left((hash, _)) if is_failure(&hash) => (hash, None),
        Either::Left((hash, name_call)) => (hash, name_call.await),
        Either::Right((name, _)) if is_failure(&name) => (None, name),
        Either::Right((name, hash_call)) => (hash_call.await, name),
    };

    let state = SearchState::settle(hash_outcome.as_ref(), name_outcome.as_ref());
    session.with_session(|s| s.finish(&ticket, state.clone()).then_some(state))
}

fn is_failure(outcome: &Option<SourceOutcome>) -> bool {
    matches!(outcome, Some(SourceOutcome::Failure(_)))
}

async fn issue<T: SearchTransport>(
    transport: &T,
    request: Option<crate::error::Result<SearchRequest>>,
) -> Option<SourceOutcome> {
    match request? {
        Ok(request) => Some(fetch_source(transport, &request).await),
        Err(e) => Some(SourceOutcome::Failure(e.into())),
    }
}
