//! reqwestによる検索サービス呼び出し

use crate::error::Result;
use manifest_search_common::{HttpReply, SearchConfig, SearchTransport, TransportError};
use std::time::Duration;

const USER_AGENT: &str = concat!("manifest-search/", env!("CARGO_PKG_VERSION"));

pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// 設定済みのクライアントを使う
    pub fn with_client(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

impl SearchTransport for HttpTransport {
    async fn get(&self, url: &str) -> std::result::Result<HttpReply, TransportError> {
        let request = async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| TransportError::Unreachable(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Decode(e.to_string()))?;
            Ok(HttpReply::new(status, body))
        };

        // 応答が無いままのリクエストは失敗扱い
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| TransportError::Timeout {
                ms: self.timeout.as_millis() as u64,
            })?
    }
}
