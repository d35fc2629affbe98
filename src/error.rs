use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestSearchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("HTTPクライアントの初期化に失敗: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("検索に失敗: {title}: {detail}")]
    Search { title: String, detail: String },

    #[error("結果が見つかりません: {0}")]
    NotFound(String),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] manifest_search_common::Error),
}

pub type Result<T> = std::result::Result<T, ManifestSearchError>;
