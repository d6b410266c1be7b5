//! 試着のDOM側実装
//!
//! 共通ライブラリの自動位置合わせに、写真要素（canvas への cover 描画）、
//! レイアウト（要素サイズの取得）、表示（シグナル更新とトースト）を渡す。

use crate::components::toast::Toaster;
use crate::hand_detector::HandDetector;
use crate::local_storage::LocalStore;
use leptos::prelude::*;
use nail_studio_common::{
    cover_crop, AlignError, AlignParams, AutoAligner, BaseLayout, DragController, LayoutProvider, NailId,
    PhotoSurface, PlacementSet, PlacementStore, PlacementView, Size,
};
use std::cell::RefCell;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlImageElement};

/// 試着の実行時状態（UIスレッドのみで使う）
pub struct TryOn {
    pub store: RefCell<PlacementStore<LocalStore>>,
    pub drag: RefCell<DragController>,
    pub aligner: AutoAligner<HandDetector>,
}

impl TryOn {
    pub fn new() -> Self {
        let mut store = PlacementStore::new(LocalStore::open(), BaseLayout::default_hand());
        store.restore();
        Self {
            store: RefCell::new(store),
            drag: RefCell::new(DragController::new()),
            aligner: AutoAligner::new(HandDetector, AlignParams::default()),
        }
    }

    /// 表示用の配置（初期レイアウト + 上書き）
    pub fn shown(&self) -> PlacementSet {
        self.store.borrow().effective_set()
    }
}

fn rasterize_error(e: JsValue) -> AlignError {
    AlignError::Rasterize(format!("{:?}", e))
}

/// 試着写真の `<img>`
pub struct DomPhoto {
    image: Option<HtmlImageElement>,
    visible: bool,
}

impl DomPhoto {
    pub fn new(image: Option<HtmlImageElement>, visible: bool) -> Self {
        Self { image, visible }
    }
}

impl PhotoSurface for DomPhoto {
    type Frame = HtmlCanvasElement;

    fn has_visible_photo(&self) -> bool {
        self.visible && self.image.as_ref().is_some_and(|img| !img.src().is_empty())
    }

    fn rasterize_cover(&self, width: u32, height: u32) -> Result<HtmlCanvasElement, AlignError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| AlignError::Rasterize("document is unavailable".into()))?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(rasterize_error)?
            .dyn_into()
            .map_err(|_| AlignError::Rasterize("not a canvas element".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(rasterize_error)?
            .ok_or_else(|| AlignError::Rasterize("2d context is unavailable".into()))?
            .dyn_into()
            .map_err(|_| AlignError::Rasterize("not a 2d context".into()))?;

        let (w, h) = (width as f64, height as f64);
        ctx.clear_rect(0.0, 0.0, w, h);

        // 未デコードの画像は描画しない（空のフレームで検出 → 手なし）
        if let Some(img) = &self.image {
            let iw = if img.natural_width() > 0 { img.natural_width() } else { img.width() };
            let ih = if img.natural_height() > 0 { img.natural_height() } else { img.height() };
            if let Some(crop) = cover_crop(iw as f64, ih as f64, w, h) {
                ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    img, crop.x, crop.y, crop.width, crop.height, 0.0, 0.0, w, h,
                )
                .map_err(rasterize_error)?;
            }
        }
        Ok(canvas)
    }
}

/// 試着エリアとネイル要素の描画サイズ
pub struct DomLayout {
    container: Option<HtmlElement>,
}

impl DomLayout {
    pub fn new(container: Option<HtmlElement>) -> Self {
        Self { container }
    }
}

impl LayoutProvider for DomLayout {
    fn container_size(&self) -> Option<Size> {
        let rect = self.container.as_ref()?.get_bounding_client_rect();
        Some(Size::new(rect.width(), rect.height()))
    }

    /// transform 前のレイアウトサイズ（回転・拡大の影響を受けない）
    fn nail_size(&self, id: NailId) -> Size {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&id.element_id()))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|el| Size::new(el.offset_width() as f64, el.offset_height() as f64))
            .unwrap_or_default()
    }
}

/// 配置シグナルとトーストへの反映
pub struct SignalView {
    placements: RwSignal<PlacementSet>,
    toaster: Toaster,
}

impl SignalView {
    pub fn new(placements: RwSignal<PlacementSet>, toaster: Toaster) -> Self {
        Self { placements, toaster }
    }
}

impl PlacementView for SignalView {
    fn apply_placements(&self, placements: &PlacementSet) {
        self.placements.set(placements.clone());
    }

    fn notify_user(&self, message: &str) {
        self.toaster.show(message);
    }
}
