//! 設定ファイルテスト
//!
//! 読み込み・保存・環境変数による上書きを検証

use manifest_search::config::{Config, ENV_BASE_URL, ENV_TIMEOUT_MS};
use manifest_search::error::ManifestSearchError;
use manifest_search_common::Flow;
use tempfile::tempdir;

/// 設定ファイルが無ければデフォルト
#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).expect("読み込み失敗");

    assert_eq!(config, Config::default());
    assert_eq!(config.search.base_url, "https://manifest.report");
    assert_eq!(config.default_flow, Flow::Destiny2);
}

/// 保存と読み込み
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_base_url("http://localhost:5000".to_string()).expect("設定失敗");
    config.set_timeout_ms(2500).expect("設定失敗");
    config.default_flow = Flow::Destiny1;
    config.save_to(&path).expect("保存失敗");

    let loaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(loaded, config);

    // フラットなJSONで保存される
    let content = std::fs::read_to_string(&path).expect("読み込み失敗");
    assert!(content.contains("\"base_url\""));
    assert!(content.contains("\"default_flow\": \"destiny1\""));
}

/// 一部だけのJSONは残りをデフォルトで補う
#[test]
fn test_partial_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"timeout_ms": 1500}"#).unwrap();

    let config = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(config.search.timeout_ms, 1500);
    assert_eq!(config.search.result_limit, 1000);
}

/// 壊れたJSON
#[test]
fn test_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ invalid").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ManifestSearchError::JsonParse(_))));
}

/// 不正なURLは保存できない
#[test]
fn test_invalid_base_url_is_rejected() {
    let mut config = Config::default();
    let result = config.set_base_url("not a url".to_string());
    assert!(matches!(result, Err(ManifestSearchError::Common(_))));
}

/// 環境変数で上書き
#[test]
fn test_env_overrides() {
    let mut config = Config::default();
    config
        .apply_env_overrides(|key| match key {
            ENV_BASE_URL => Some("http://127.0.0.1:9000".to_string()),
            ENV_TIMEOUT_MS => Some("1200".to_string()),
            _ => None,
        })
        .expect("上書き失敗");

    assert_eq!(config.search.base_url, "http://127.0.0.1:9000");
    assert_eq!(config.search.timeout_ms, 1200);
}

/// 数値でないタイムアウト
#[test]
fn test_env_timeout_not_numeric() {
    let mut config = Config::default();
    let result = config.apply_env_overrides(|key| (key == ENV_TIMEOUT_MS).then(|| "soon".to_string()));
    assert!(matches!(result, Err(ManifestSearchError::Config(_))));
}

/// 設定変更の保存に環境変数の値は書き込まれない
#[test]
fn test_update_file_does_not_persist_env_overrides() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");

    let mut file_config = Config::default();
    file_config.set_base_url("http://localhost:5000".to_string()).expect("設定失敗");
    file_config.save_to(&path).expect("保存失敗");

    // 実行時の設定は環境変数で上書きされている
    let mut effective = Config::load_from(&path).expect("読み込み失敗");
    effective
        .apply_env_overrides(|key| match key {
            ENV_BASE_URL => Some("http://localhost:1".to_string()),
            ENV_TIMEOUT_MS => Some("300".to_string()),
            _ => None,
        })
        .expect("上書き失敗");
    assert_eq!(effective.search.base_url, "http://localhost:1");

    let saved = Config::update_file(&path, |config| config.set_timeout_ms(5000)).expect("保存失敗");
    assert_eq!(saved.search.base_url, "http://localhost:5000");

    let reloaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(reloaded.search.base_url, "http://localhost:5000");
    assert_eq!(reloaded.search.timeout_ms, 5000);
    let content = std::fs::read_to_string(&path).expect("読み込み失敗");
    assert!(!content.contains("localhost:1\""));
}
