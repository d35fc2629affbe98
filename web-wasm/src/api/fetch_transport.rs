//! fetch APIによるトランスポート
//!
//! 応答が `timeout_ms` 以内に来なければ Timeout として失敗させる。

use futures::future::{self, Either};
use gloo::timers::future::TimeoutFuture;
use manifest_search_common::{HttpReply, SearchConfig, SearchTransport, TransportError};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub struct FetchTransport {
    timeout_ms: u64,
}

impl FetchTransport {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            timeout_ms: config.timeout_ms,
        }
    }
}

impl SearchTransport for FetchTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
        let millis = u32::try_from(self.timeout_ms).unwrap_or(u32::MAX);
        let request = Box::pin(fetch_text(url));
        let timeout = Box::pin(TimeoutFuture::new(millis));

        let result = match future::select(request, timeout).await {
            Either::Left((reply, _)) => reply,
            Either::Right(_) => Err(TransportError::Timeout { ms: self.timeout_ms }),
        };

        if let Err(err) = &result {
            web_sys::console::warn_1(&format!("検索失敗 {}: {}", url, err).into());
        }
        result
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// GETしてステータスと本文を返す
async fn fetch_text(url: &str) -> Result<HttpReply, TransportError> {
    let window = web_sys::window()
        .ok_or_else(|| TransportError::Unreachable("window is not available".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| TransportError::Unreachable(js_message(&e)))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| TransportError::Unreachable(js_message(&e)))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| TransportError::Decode(js_message(&e)))?;

    let status = resp.status();
    let text = resp.text().map_err(|e| TransportError::Decode(js_message(&e)))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| TransportError::Decode(js_message(&e)))?;

    Ok(HttpReply::new(status, body.as_string().unwrap_or_default()))
}
