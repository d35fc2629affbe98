//! URLパスからフローと初期クエリを決める
//!
//! `/destiny1/:hash?` と `/destiny2/:hash?`。それ以外のパスは Destiny 2。

use manifest_search_common::Flow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub flow: Flow,
    /// パスに含まれていたクエリ（デコード前）
    pub initial_query: Option<String>,
}

pub fn parse_route(path: &str) -> Route {
    let mut segments = path.split('/').filter(|s| !s.is_empty());

    let flow = match segments.next() {
        Some("destiny1") => Flow::Destiny1,
        Some("destiny2") => Flow::Destiny2,
        _ => {
            return Route {
                flow: Flow::Destiny2,
                initial_query: None,
            }
        }
    };

    Route {
        flow,
        initial_query: segments.next().map(str::to_string),
    }
}

/// ブラウザの現在パスを解釈（パス上のクエリはURIデコードする）
pub fn current_route() -> Route {
    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default();
    let mut route = parse_route(&path);

    route.initial_query = route.initial_query.map(|raw| {
        js_sys::decode_uri_component(&raw)
            .ok()
            .and_then(|s| s.as_string())
            .unwrap_or(raw)
    });
    route
}
