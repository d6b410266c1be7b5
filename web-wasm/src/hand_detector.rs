//! MediaPipe Hands による手のランドマーク検出（JSモジュール経由）

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use nail_studio_common::{AlignError, LandmarkDetector, LandmarkFrame, NormalizedPoint};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen(module = "/js/hand-detector.js")]
extern "C" {
    #[wasm_bindgen(js_name = "detectHand", catch)]
    async fn detect_hand_js(canvas: &HtmlCanvasElement) -> Result<JsValue, JsValue>;
}

pub struct HandDetector;

impl LandmarkDetector<HtmlCanvasElement> for HandDetector {
    fn detect(&self, frame: HtmlCanvasElement) -> LocalBoxFuture<'_, Result<Option<LandmarkFrame>, AlignError>> {
        async move {
            let value = detect_hand_js(&frame).await.map_err(|e| {
                web_sys::console::warn_2(&"Hand detection failed:".into(), &e);
                AlignError::Detector(format!("{:?}", e))
            })?;

            // 手が見つからない場合は null
            if value.is_null() || value.is_undefined() {
                return Ok(None);
            }

            let points: Vec<NormalizedPoint> = serde_wasm_bindgen::from_value(value)
                .map_err(|e| AlignError::Detector(format!("検出結果の変換に失敗: {}", e)))?;
            let frame = LandmarkFrame::from_dense(points);
            Ok((!frame.is_empty()).then_some(frame))
        }
        .boxed_local()
    }
}
