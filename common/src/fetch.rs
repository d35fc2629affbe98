//! 検索サービス呼び出し（CLI/WASM共通）
//!
//! HTTP通信そのものは `SearchTransport` の実装（reqwest / fetch API）に任せ、
//! URL組み立てとステータスの解釈はここで共通化する。
//!
//! ステータスの扱い:
//! - 200: 成功（`data` 配列）
//! - 400 / 404: このソースは該当なし（エラー扱いしない）
//! - その他: 致命的エラー

use crate::config::{Flow, SearchConfig};
use crate::error::{Error, Result, SourceFailure, TransportError};
use crate::types::{ErrorBody, SearchResponse, SearchResultItem, SearchSource};

/// HTTPレスポンス（ステータス + 本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// 検索サービスへのGET
///
/// タイムアウトは実装側で `TransportError::Timeout` に変換すること。
#[allow(async_fn_in_trait)]
pub trait SearchTransport {
    async fn get(&self, url: &str) -> std::result::Result<HttpReply, TransportError>;
}

/// 1ソース分のリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub source: SearchSource,
    pub url: String,
}

impl SearchRequest {
    /// エンドポイントとクエリパラメータからURLを組み立てる
    pub fn new(flow: Flow, config: &SearchConfig, source: SearchSource, query: &str) -> Result<Self> {
        let endpoint = flow.endpoint(&config.base_url, source).ok_or_else(|| {
            Error::Config(format!("{} has no {} search endpoint", flow, source))
        })?;

        let limit = config.result_limit.to_string();
        let mut params = vec![(source.param(), query), ("limit", limit.as_str())];
        if flow.sends_include_data() {
            params.push(("includeData", if config.include_data { "true" } else { "false" }));
        }

        let url = url::Url::parse_with_params(&endpoint, &params)?;
        Ok(Self {
            source,
            url: url.into(),
        })
    }
}

/// 1ソースの結果
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Success(Vec<SearchResultItem>),
    /// 400 / 404: このソースからは結果なし
    NotApplicable { status: u16, reason: String },
    Failure(SourceFailure),
}

impl SourceOutcome {
    /// 成功したソースの結果
    pub fn found(&self) -> Option<&[SearchResultItem]> {
        match self {
            SourceOutcome::Success(items) => Some(items),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&SourceFailure> {
        match self {
            SourceOutcome::Failure(failure) => Some(failure),
            _ => None,
        }
    }
}

/// HTTPレスポンスを結果に変換
pub fn interpret_reply(source: SearchSource, reply: &HttpReply) -> SourceOutcome {
    match reply.status {
        200 => match serde_json::from_str::<SearchResponse>(&reply.body) {
            Ok(response) => SourceOutcome::Success(response.data),
            Err(e) => SourceOutcome::Failure(TransportError::Decode(e.to_string()).into()),
        },
        400 => {
            let body = parse_error_body(&reply.body);
            let mut reason = body
                .message
                .or(body.title)
                .unwrap_or_else(|| "The request was invalid.".to_string());
            if let Some(field_errors) = body.errors.get(source.param()) {
                reason = format!("{} {}", reason, field_errors.join(", "));
            }
            SourceOutcome::NotApplicable { status: 400, reason }
        }
        404 => SourceOutcome::NotApplicable {
            status: 404,
            reason: format!("The requested {} was not found.", source),
        },
        status => {
            let body = parse_error_body(&reply.body);
            let title = body.title.unwrap_or_else(|| "Error".to_string());
            let message = body.message.unwrap_or_else(|| "Unknown error".to_string());
            tracing::warn!(%source, status, %message, "search source failed");
            SourceOutcome::Failure(SourceFailure::new(
                title,
                format!("An error occurred: {}", message),
            ))
        }
    }
}

/// エラー本文（JSONでなければ空扱い）
fn parse_error_body(body: &str) -> ErrorBody {
    serde_json::from_str(body).unwrap_or_default()
}

/// 1ソースを検索
pub async fn fetch_source<T: SearchTransport>(transport: &T, request: &SearchRequest) -> SourceOutcome {
    tracing::debug!(source = %request.source, url = %request.url, "issuing search request");
    let outcome = match transport.get(&request.url).await {
        Ok(reply) => interpret_reply(request.source, &reply),
        Err(e) => {
            tracing::warn!(source = %request.source, error = %e, "search transport failed");
            SourceOutcome::Failure(e.into())
        }
    };
    if let SourceOutcome::NotApplicable { status, reason } = &outcome {
        tracing::debug!(source = %request.source, status, %reason, "source not applicable");
    }
    outcome
}
