//! タイマー付きデバウンサー
//!
//! 予約と世代管理は共通ライブラリの `Debouncer` が行い、
//! ここでは gloo のタイマーで `fire` を呼ぶだけ。

use gloo::timers::callback::Timeout;
use manifest_search_common::Debouncer;
use std::cell::RefCell;
use std::rc::Rc;

pub struct TimerDebouncer<T: 'static> {
    core: Rc<RefCell<Debouncer<T>>>,
    timer: Rc<RefCell<Option<Timeout>>>,
    deliver: Rc<dyn Fn(T)>,
}

impl<T: 'static> Clone for TimerDebouncer<T> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
            timer: Rc::clone(&self.timer),
            deliver: Rc::clone(&self.deliver),
        }
    }
}

impl<T: 'static> TimerDebouncer<T> {
    pub fn new(delay_ms: u64, deliver: impl Fn(T) + 'static) -> Self {
        Self {
            core: Rc::new(RefCell::new(Debouncer::new(delay_ms))),
            timer: Rc::new(RefCell::new(None)),
            deliver: Rc::new(deliver),
        }
    }

    /// 値を予約し直す（前のタイマーは破棄）
    pub fn schedule(&self, value: T) {
        let now_ms = js_sys::Date::now() as u64;
        let (generation, delay_ms) = {
            let mut core = self.core.borrow_mut();
            (core.schedule(value, now_ms), core.delay_ms())
        };

        let core = Rc::clone(&self.core);
        let deliver = Rc::clone(&self.deliver);
        let timeout = Timeout::new(u32::try_from(delay_ms).unwrap_or(u32::MAX), move || {
            let value = core.borrow_mut().fire(generation);
            if let Some(value) = value {
                deliver(value);
            }
        });

        // 古いTimeoutはdropでclearTimeoutされる
        *self.timer.borrow_mut() = Some(timeout);
    }

    /// 予約を取り消す
    pub fn cancel(&self) {
        self.core.borrow_mut().cancel();
        drop(self.timer.borrow_mut().take());
    }
}
