//! 詳細ドロワーの状態
//!
//! 閉じても直前のペイロードは次に開くまで残す（閉じるアニメーション中も内容を参照するため）。

use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawerState {
    pub open: bool,
    pub payload: Option<Value>,
}

impl DrawerState {
    pub fn open(&mut self, payload: Value) {
        self.open = true;
        self.payload = Some(payload);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// 整形済みJSON（表示用）
    pub fn pretty_payload(&self) -> Option<String> {
        self.payload
            .as_ref()
            .and_then(|p| serde_json::to_string_pretty(p).ok())
    }
}
