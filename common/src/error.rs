//! エラー型定義
//!
//! - Error: クレート共通エラー
//! - ValidationError: クエリ入力の検証エラー（ネットワークに到達しない）
//! - SourceFailure: 検索ソースの致命的エラー（結果ペインにそのまま表示）
//! - TransportError: 通信層のエラー（SourceFailureに変換される）

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// クエリ入力の検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("query must be non-empty")]
    Empty,

    #[error("query must be at least {min_length} characters")]
    TooShort { min_length: usize },
}

impl ValidationError {
    /// 結果ペインに表示する補足文
    pub fn hint(&self) -> &'static str {
        match self {
            ValidationError::Empty => "Please enter a search query.",
            ValidationError::TooShort { .. } => {
                "Enter a numeric hash, or a longer part of a definition name."
            }
        }
    }
}

/// 検索ソースの致命的エラー（タイトル + 詳細）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{title}: {detail}")]
pub struct SourceFailure {
    pub title: String,
    pub detail: String,
}

impl SourceFailure {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// 通信層のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request could not be sent: {0}")]
    Unreachable(String),

    #[error("no response within {ms} ms")]
    Timeout { ms: u64 },

    #[error("response could not be read: {0}")]
    Decode(String),
}

impl From<TransportError> for SourceFailure {
    fn from(err: TransportError) -> Self {
        let title = match err {
            TransportError::Decode(_) => "Invalid Response",
            TransportError::Unreachable(_) | TransportError::Timeout { .. } => "Network Error",
        };
        SourceFailure::new(title, err.to_string())
    }
}

impl From<Error> for SourceFailure {
    fn from(err: Error) -> Self {
        SourceFailure::new("Error", err.to_string())
    }
}
