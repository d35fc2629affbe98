//! デバウンス処理
//!
//! 時計を持たない状態機械。時刻（ミリ秒）は呼び出し側が渡すので、
//! タイマーなしでテストでき、ブラウザ側はタイマーで `fire` を呼ぶだけで済む。

/// 入力が静かになるまで待つ時間のデフォルト
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug)]
struct Pending<T> {
    generation: u64,
    deadline_ms: u64,
    value: T,
}

/// 最後に予約された値だけを、静止期間の後に1回だけ配送する
#[derive(Debug)]
pub struct Debouncer<T> {
    delay_ms: u64,
    generation: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// 予約済みの値を破棄して新しい値を予約
    ///
    /// # Returns
    /// 予約の世代番号（タイマー発火時に `fire` へ渡す）
    pub fn schedule(&mut self, value: T, now_ms: u64) -> u64 {
        self.generation += 1;
        self.pending = Some(Pending {
            generation: self.generation,
            deadline_ms: now_ms.saturating_add(self.delay_ms),
            value,
        });
        self.generation
    }

    /// 期限が来ていれば予約値を取り出す
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some(p) if now_ms >= p.deadline_ms => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// タイマー発火。世代が最新のときだけ配送する
    pub fn fire(&mut self, generation: u64) -> Option<T> {
        match &self.pending {
            Some(p) if p.generation == generation => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline_ms)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}
