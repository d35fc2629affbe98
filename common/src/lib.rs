//! Manifest Search Common Library
//!
//! CLIとWeb(WASM)で共有される検索集約エンジン:
//! キー入力 → デバウンス → クエリ分類 → ハッシュ/名前検索 → 統合 → 結果ペインの状態

pub mod config;
pub mod debounce;
pub mod dispatch;
pub mod drawer;
pub mod error;
pub mod fetch;
pub mod query;
pub mod reconcile;
pub mod state;
pub mod types;

pub use config::{Flow, QueryPolicy, SearchConfig};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_MS};
pub use dispatch::{run_cycle, SessionHandle};
pub use drawer::DrawerState;
pub use error::{Error, Result, SourceFailure, TransportError, ValidationError};
pub use fetch::{fetch_source, interpret_reply, HttpReply, SearchRequest, SearchTransport, SourceOutcome};
pub use query::{classify, is_numeric_hash, validate};
pub use reconcile::{reconcile, Reconciled};
pub use state::{CycleTicket, SearchSession, SearchState};
pub use types::{ReconciledResultSet, ResultGroup, SearchResultItem, SearchSource, SourceSet};
