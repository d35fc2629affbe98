//! 検索サイクルのシナリオテスト
//!
//! 固定応答を返すトランスポートで、分類 → 検索 → 統合 → 状態更新 を通しで検証

use manifest_search_common::{
    run_cycle, DrawerState, Flow, HttpReply, SearchConfig, SearchSession, SearchSource,
    SearchState, SearchTransport, TransportError,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// URLのパスで応答を決めるトランスポート（遅延指定可）
#[derive(Default)]
struct ScriptedTransport {
    routes: Vec<Route>,
    calls: RefCell<Vec<String>>,
}

struct Route {
    /// URLに含まれる文字列
    matches: &'static str,
    delay_ms: u64,
    reply: HttpReply,
}

impl ScriptedTransport {
    fn route(mut self, matches: &'static str, status: u16, body: serde_json::Value) -> Self {
        self.routes.push(Route {
            matches,
            delay_ms: 0,
            reply: HttpReply::new(status, body.to_string()),
        });
        self
    }

    fn delayed(mut self, matches: &'static str, delay_ms: u64, body: serde_json::Value) -> Self {
        self.routes.push(Route {
            matches,
            delay_ms,
            reply: HttpReply::new(200, body.to_string()),
        });
        self
    }

    fn calls_to(&self, source: SearchSource) -> usize {
        let path = format!("/search/{}", source);
        self.calls.borrow().iter().filter(|url| url.contains(&path)).count()
    }
}

impl SearchTransport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
        self.calls.borrow_mut().push(url.to_string());
        let route = self
            .routes
            .iter()
            .find(|r| url.contains(r.matches))
            .ok_or_else(|| TransportError::Unreachable(url.to_string()))?;
        if route.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(route.delay_ms)).await;
        }
        Ok(route.reply.clone())
    }
}

fn new_session() -> RefCell<SearchSession> {
    RefCell::new(SearchSession::new())
}

/// 2文字の非数値クエリは検証エラー、通信なし
#[tokio::test]
async fn test_short_text_query_is_validation_error() {
    let transport = ScriptedTransport::default();
    let session = new_session();

    let state = run_cycle(&transport, &session, Flow::Destiny2, &SearchConfig::default(), "ab").await;

    match state {
        Some(SearchState::Error { title, .. }) => {
            assert_eq!(title, "query must be at least 3 characters");
        }
        other => panic!("unexpected state: {:?}", other),
    }
    assert!(transport.calls.borrow().is_empty());
}

/// D1は空クエリのみ拒否
#[tokio::test]
async fn test_destiny1_empty_query_is_validation_error() {
    let transport = ScriptedTransport::default();
    let session = new_session();

    let state = run_cycle(&transport, &session, Flow::Destiny1, &SearchConfig::default(), "").await;

    match state {
        Some(SearchState::Error { title, .. }) => assert_eq!(title, "query must be non-empty"),
        other => panic!("unexpected state: {:?}", other),
    }
    assert!(transport.calls.borrow().is_empty());
}

/// "1234" はハッシュ検索と名前検索の両方
#[tokio::test]
async fn test_numeric_query_hash_result() {
    let transport = ScriptedTransport::default()
        .route(
            "/search/hash",
            200,
            json!({"data": [{"hash": "1234", "definitionType": "Weapon", "displayName": "Fusion Rifle"}]}),
        )
        .route("/search/name", 404, json!({"message": "no table"}));
    let session = new_session();

    let state = run_cycle(&transport, &session, Flow::Destiny2, &SearchConfig::default(), "1234")
        .await
        .expect("状態が返るはず");

    let SearchState::Results(set) = state else {
        panic!("Resultsになるはず: {:?}", state);
    };
    assert_eq!(set.total_count, 1);
    assert_eq!(set.groups.len(), 1);
    assert_eq!(set.groups[0].definition_type, "Weapon");
    assert_eq!(set.groups[0].items[0].display_name.as_deref(), Some("Fusion Rifle"));
    assert_eq!(transport.calls_to(SearchSource::Hash), 1);
    assert_eq!(transport.calls_to(SearchSource::Name), 1);
}

/// 2桁の数値はハッシュ検索のみ
#[tokio::test]
async fn test_short_numeric_query_skips_name_search() {
    let transport = ScriptedTransport::default().route(
        "/search/hash",
        200,
        json!({"data": [{"hash": "12", "definitionType": "Weapon"}]}),
    );
    let session = new_session();

    let state = run_cycle(&transport, &session, Flow::Destiny2, &SearchConfig::default(), "12")
        .await
        .expect("状態が返るはず");

    assert!(matches!(state, SearchState::Results(ref set) if set.total_count == 1));
    assert_eq!(transport.calls_to(SearchSource::Name), 0);
}

/// 両方に同じハッシュ → ハッシュ検索側を残す
#[tokio::test]
async fn test_overlapping_item_keeps_hash_copy() {
    let transport = ScriptedTransport::default()
        .route(
            "/search/hash",
            200,
            json!({"data": [{"hash": "555", "definitionType": "Weapon", "displayName": "hash copy"}]}),
        )
        .route(
            "/search/name",
            200,
            json!({"data": [
                {"hash": "555", "definitionType": "Weapon", "displayName": "name copy"},
                {"hash": "5550", "definitionType": "Perk", "displayName": "other"}
            ]}),
        );
    let session = new_session();

    let state = run_cycle(&transport, &session, Flow::Destiny2, &SearchConfig::default(), "555")
        .await
        .expect("状態が返るはず");

    let SearchState::Results(set) = state else {
        panic!("Resultsになるはず: {:?}", state);
    };
    assert_eq!(set.total_count, 2);
    let kept = set.find("555").expect("555が無い");
    assert_eq!(kept.display_name.as_deref(), Some("hash copy"));
}

/// ハッシュ404 + 名前200 → 名前検索の結果のみ、エラーにしない
#[tokio::test]
async fn test_hash_not_found_uses_name_results() {
    let transport = ScriptedTransport::default()
        .route("/search/hash", 404, json!({"title": "Not Found"}))
        .route(
            "/search/name",
            200,
            json!({"data": [
                {"hash": "1", "definition": "Activity", "name": "Vault of Glass"},
                {"hash": "2", "definition": "Activity", "name": "Glassway"}
            ]}),
        );
    let session = new_session();

    let state = run_cycle(&transport, &session, Flow::Destiny2, &SearchConfig::default(), "glass")
        .await
        .expect("状態が返るはず");

    let SearchState::Results(set) = state else {
        panic!("Resultsになるはず: {:?}", state);
    };
    assert_eq!(set.total_count, 2);
    assert_eq!(set.groups[0].items[0].label(), "Vault of Glass");
}

/// 片方が500ならもう片方が成功してもエラー
#[tokio::test]
async fn test_failure_overrides_sibling_success() {
    let transport = ScriptedTransport::default()
        .route("/search/hash", 200, json!({"data": [{"hash": "1234", "definition": "Weapon"}]}))
        .route("/search/name", 503, json!({"message": "maintenance"}));
    let session = new_session();

    let state = run_cycle(&transport, &session, Flow::Destiny2, &SearchConfig::default(), "1234")
        .await
        .expect("状態が返るはず");

    assert_eq!(
        state,
        SearchState::Error {
            title: "Error".into(),
            detail: "An error occurred: maintenance".into(),
        }
    );
}

/// 失敗したら遅いもう片方を待たずにエラー表示
#[tokio::test]
async fn test_failure_is_shown_before_slow_sibling_answers() {
    let transport = ScriptedTransport::default()
        .route("/search/hash", 500, json!({"title": "Server Error", "message": "boom"}))
        .delayed(
            "/search/name",
            60_000,
            json!({"data": [{"hash": "1234", "definition": "Weapon"}]}),
        );
    let session = new_session();
    let config = SearchConfig::default();

    let state = tokio::time::timeout(
        Duration::from_secs(2),
        run_cycle(&transport, &session, Flow::Destiny2, &config, "1234"),
    )
    .await
    .expect("名前検索の応答を待っている");

    assert_eq!(
        state,
        Some(SearchState::Error {
            title: "Server Error".into(),
            detail: "An error occurred: boom".into(),
        })
    );
    assert_eq!(session.borrow().state(), state.as_ref().expect("状態が返るはず"));
}

/// ハッシュの無いレコードは捨て、両ソースの正常な結果は残す
#[tokio::test]
async fn test_malformed_record_does_not_discard_results() {
    let transport = ScriptedTransport::default()
        .route(
            "/search/hash",
            200,
            json!({"data": [{"definition": "Weapon", "name": "no hash"}, {"hash": "1234", "definition": "Weapon"}]}),
        )
        .route(
            "/search/name",
            200,
            json!({"data": [{"hash": "91234", "definition": "Perk", "name": "Rampage 1234"}]}),
        );
    let session = new_session();

    let state = run_cycle(&transport, &session, Flow::Destiny2, &SearchConfig::default(), "1234")
        .await
        .expect("状態が返るはず");

    let SearchState::Results(set) = state else {
        panic!("Resultsになるはず: {:?}", state);
    };
    assert_eq!(set.total_count, 2);
    assert!(set.find("1234").is_some());
    assert!(set.find("91234").is_some());
}

/// 両方400 → 結果なし
#[tokio::test]
async fn test_all_sources_not_applicable_is_empty() {
    let transport = ScriptedTransport::default()
        .route("/search/hash", 400, json!({"title": "Bad Request", "errors": {"hash": ["too large"]}}))
        .route("/search/name", 404, json!({}));
    let session = new_session();

    let state = run_cycle(&transport, &session, Flow::Destiny2, &SearchConfig::default(), "99999999999999")
        .await;

    assert_eq!(state, Some(SearchState::Empty));
}

/// 遅い古いサイクルの結果は新しい結果を上書きしない
#[tokio::test]
async fn test_stale_cycle_does_not_overwrite_newer_results() {
    let transport = ScriptedTransport::default()
        .delayed(
            "name=gjal&",
            100,
            json!({"data": [{"hash": "1", "definition": "Weapon", "name": "stale"}]}),
        )
        .delayed(
            "name=gjallarhorn&",
            0,
            json!({"data": [{"hash": "2", "definition": "Weapon", "name": "Gjallarhorn"}]}),
        );
    let session = Rc::new(new_session());
    let config = SearchConfig::default();

    let (slow, fast) = tokio::join!(
        run_cycle(&transport, &session, Flow::Destiny2, &config, "gjal"),
        run_cycle(&transport, &session, Flow::Destiny2, &config, "gjallarhorn"),
    );

    assert_eq!(slow, None);
    assert!(fast.is_some());
    let state = session.borrow().state().clone();
    let SearchState::Results(set) = state else {
        panic!("Resultsになるはず: {:?}", state);
    };
    assert_eq!(set.flatten()[0].label(), "Gjallarhorn");
}

/// 結果一覧とドロワーは独立
#[tokio::test]
async fn test_drawer_does_not_touch_results() {
    let transport = ScriptedTransport::default().route(
        "/search/hash",
        200,
        json!({"data": [{"hash": "7", "definition": "Perk", "foo": 1}]}),
    );
    let session = new_session();
    run_cycle(&transport, &session, Flow::Destiny2, &SearchConfig::default(), "7").await;
    let before = session.borrow().state().clone();

    let SearchState::Results(set) = &before else {
        panic!("Resultsになるはず: {:?}", before);
    };
    let mut drawer = DrawerState::default();
    drawer.open(set.flatten()[0].payload.clone());
    drawer.close();

    assert!(!drawer.open);
    assert_eq!(drawer.payload.as_ref().and_then(|p| p.get("foo")), Some(&json!(1)));
    assert_eq!(session.borrow().state(), &before);
}
