//! トースト通知

use gloo::timers::callback::Timeout;
use leptos::prelude::*;

/// 表示時間（ミリ秒）
const TOAST_MS: u32 = 3000;

/// トーストの表示ハンドル（コピーして各所から使う）
#[derive(Clone, Copy)]
pub struct Toaster {
    message: RwSignal<Option<String>>,
    seq: StoredValue<u64>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(None),
            seq: StoredValue::new(0),
        }
    }

    /// 表示して3秒後に消す。後から出したトーストは先のタイマーでは消えない
    pub fn show(&self, message: impl Into<String>) {
        self.seq.update_value(|n| *n += 1);
        let id = self.seq.get_value();
        self.message.set(Some(message.into()));

        let toaster = *self;
        Timeout::new(TOAST_MS, move || {
            if toaster.seq.get_value() == id {
                toaster.message.set(None);
            }
        })
        .forget();
    }

    pub fn message(&self) -> Option<String> {
        self.message.get()
    }
}

#[component]
pub fn Toast(toaster: Toaster) -> impl IntoView {
    view! {
        <div
            class=move || if toaster.message().is_some() { "toast" } else { "toast hidden" }
            role="status"
            aria-live="polite"
        >
            {move || toaster.message().unwrap_or_default()}
        </div>
    }
}
