use crate::error::{ManifestSearchError, Result};
use manifest_search_common::{Flow, SearchConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_BASE_URL: &str = "MANIFEST_SEARCH_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "MANIFEST_SEARCH_TIMEOUT_MS";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub search: SearchConfig,
    /// --flow 省略時のフロー
    pub default_flow: Flow,
}

impl Config {
    /// ファイル + 環境変数
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        tracing::debug!(path = %path.display(), base_url = %config.search.base_url, "config loaded");
        Ok(config)
    }

    /// ファイルが無ければデフォルト設定
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.search.validate()?;
        Ok(config)
    }

    /// ファイルの設定だけを変更して保存（環境変数の値は書き込まない）
    pub fn update_file(path: &Path, edit: impl FnOnce(&mut Config) -> Result<()>) -> Result<Self> {
        let mut config = Self::load_from(path)?;
        edit(&mut config)?;
        config.save_to(path)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.search.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ManifestSearchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("manifest-search").join("config.json"))
    }

    /// 環境変数を優先
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            tracing::debug!(%base_url, "base_url overridden by {}", ENV_BASE_URL);
            self.search.base_url = base_url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            tracing::debug!(%timeout, "timeout_ms overridden by {}", ENV_TIMEOUT_MS);
            self.search.timeout_ms = timeout.parse().map_err(|_| {
                ManifestSearchError::Config(format!("{} が数値ではありません: {}", ENV_TIMEOUT_MS, timeout))
            })?;
        }
        self.search.validate()?;
        Ok(())
    }

    pub fn set_base_url(&mut self, base_url: String) -> Result<()> {
        self.search.base_url = base_url;
        self.search.validate()?;
        Ok(())
    }

    pub fn set_timeout_ms(&mut self, timeout_ms: u64) -> Result<()> {
        self.search.timeout_ms = timeout_ms;
        self.search.validate()?;
        Ok(())
    }
}
