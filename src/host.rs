//! Browser side of the diagnostics seam: localStorage, the developer console and `alert`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Storage};
use wirenet::DiagnosticsHost;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHost;

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl DiagnosticsHost for BrowserHost {
    fn persist(&mut self, key: &str, value: &str) {
        match storage() {
            Some(s) => {
                if let Err(e) = s.set_item(key, value) {
                    console::warn_2(&JsValue::from_str("failed to persist log:"), &e);
                }
            }
            None => console::warn_1(&JsValue::from_str("localStorage unavailable; log not persisted")),
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok().flatten()
    }

    fn console(&mut self, text: &str) {
        console::log_1(&JsValue::from_str(text));
    }

    fn alert(&mut self, message: &str, delay_ms: u32) {
        let Some(window) = web_sys::window() else {
            console::error_1(&JsValue::from_str(message));
            return;
        };
        // Deferred so the current frame and the console output land first
        let message = message.to_string();
        let shown = window.clone();
        let cb = Closure::once_into_js(move || {
            let _ = shown.alert_with_message(&message);
        });
        let delay = delay_ms.min(i32::MAX as u32) as i32;
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay)
            .is_err()
        {
            console::error_1(&JsValue::from_str("failed to schedule alert"));
        }
    }
}
