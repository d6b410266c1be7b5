//! 自動位置合わせ
//!
//! 写真のオフスクリーン描画 → ランドマーク検出 → 配置計算 → ストア更新・保存
//! の流れを制御する。検出は非同期で、同時に実行できるのは1回だけ。

use crate::geometry::{map_placements, AlignParams};
use crate::landmarks::LandmarkFrame;
use crate::placement_store::PlacementStore;
use crate::storage::KeyValueStore;
use crate::types::{NailId, PlacementSet, Size};
use futures::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use thiserror::Error;

pub const MSG_ALIGNED: &str = "Auto-aligned nails. You can still fine-tune with drag.";

/// 自動位置合わせの失敗理由
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignError {
    #[error("try-on mode is disabled")]
    TryOnDisabled,

    #[error("no hand photo is loaded")]
    NoPhoto,

    #[error("render container is missing")]
    NoContainer,

    #[error("a detection is already in flight")]
    Busy,

    #[error("no hand detected")]
    NoHandDetected,

    #[error("detector error: {0}")]
    Detector(String),

    #[error("rasterize error: {0}")]
    Rasterize(String),
}

impl AlignError {
    /// ユーザー向けメッセージ（トースト表示用）
    pub fn user_message(&self) -> &'static str {
        match self {
            AlignError::TryOnDisabled => "Enable Try-on first.",
            AlignError::NoPhoto => "Upload a hand photo first.",
            AlignError::NoContainer => "Try-on view is not ready yet.",
            AlignError::Busy => "Auto-align is already running.",
            AlignError::NoHandDetected => {
                "No hand detected. Use a clear, straight-on photo with visible nails."
            }
            AlignError::Detector(_) => "Hand detection failed. Try again.",
            AlignError::Rasterize(_) => "Could not read the hand photo.",
        }
    }
}

/// 描画済みレイアウトの寸法（DOMから読む部分を差し替え可能にする）
pub trait LayoutProvider {
    /// 手コンテナのピクセルサイズ。コンテナがなければ None
    fn container_size(&self) -> Option<Size>;
    /// ネイル要素の現在の描画サイズ
    fn nail_size(&self, id: NailId) -> Size;
}

/// 試着写真（表示中の写真を cover でオフスクリーン描画する）
pub trait PhotoSurface {
    type Frame;

    fn has_visible_photo(&self) -> bool;
    fn rasterize_cover(&self, width: u32, height: u32) -> Result<Self::Frame, AlignError>;
}

/// 手のランドマーク検出器（外部のブラックボックス）
///
/// 手が見つからない場合は `Ok(None)`（エラーではない）。
pub trait LandmarkDetector<F> {
    fn detect(&self, frame: F) -> LocalBoxFuture<'_, Result<Option<LandmarkFrame>, AlignError>>;
}

/// 表示側への出力
pub trait PlacementView {
    fn apply_placements(&self, placements: &PlacementSet);
    fn notify_user(&self, message: &str);
}

/// 実行中フラグ。future が途中で破棄されても解放される
struct InFlightGuard<'a>(&'a Cell<bool>);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct AutoAligner<D> {
    detector: D,
    params: AlignParams,
    in_flight: Cell<bool>,
}

impl<D> AutoAligner<D> {
    pub fn new(detector: D, params: AlignParams) -> Self {
        Self {
            detector,
            params,
            in_flight: Cell::new(false),
        }
    }

    pub fn params(&self) -> &AlignParams {
        &self.params
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// 検出待ちの場合 true
    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// 自動位置合わせを実行
    ///
    /// 検出待ちの間に再度呼ばれた場合は `AlignError::Busy` を返し、
    /// 実行中の検出には影響しない。結果（成功・失敗）は view に通知する。
    /// ストアは await をまたいで借用しない。
    pub async fn invoke<P, L, S, V>(
        &self,
        try_on_enabled: bool,
        photo: &P,
        layout: &L,
        store: &RefCell<PlacementStore<S>>,
        view: &V,
    ) -> Result<PlacementSet, AlignError>
    where
        D: LandmarkDetector<P::Frame>,
        P: PhotoSurface,
        L: LayoutProvider,
        S: KeyValueStore,
        V: PlacementView,
    {
        let result = match InFlightGuard::acquire(&self.in_flight) {
            Some(_guard) => self.run(try_on_enabled, photo, layout, store, view).await,
            None => Err(AlignError::Busy),
        };

        match &result {
            Ok(set) => {
                tracing::debug!("Auto-aligned {} nails", set.len());
                view.notify_user(MSG_ALIGNED);
            }
            Err(e) => {
                tracing::debug!("Auto-align aborted: {}", e);
                view.notify_user(e.user_message());
            }
        }
        result
    }

    async fn run<P, L, S, V>(
        &self,
        try_on_enabled: bool,
        photo: &P,
        layout: &L,
        store: &RefCell<PlacementStore<S>>,
        view: &V,
    ) -> Result<PlacementSet, AlignError>
    where
        D: LandmarkDetector<P::Frame>,
        P: PhotoSurface,
        L: LayoutProvider,
        S: KeyValueStore,
        V: PlacementView,
    {
        if !try_on_enabled {
            return Err(AlignError::TryOnDisabled);
        }
        if !photo.has_visible_photo() {
            return Err(AlignError::NoPhoto);
        }
        let container = layout.container_size().ok_or(AlignError::NoContainer)?;

        let (width, height) = container.rounded_px();
        let frame = photo.rasterize_cover(width, height)?;

        let landmarks = self
            .detector
            .detect(frame)
            .await?
            .ok_or(AlignError::NoHandDetected)?;

        let container = Size::new(width as f64, height as f64);
        let placements = map_placements(&landmarks, container, |id| layout.nail_size(id), &self.params);
        if placements.is_empty() {
            return Err(AlignError::NoHandDetected);
        }

        let shown = {
            let mut store = store.borrow_mut();
            store.set_all(placements.clone());
            store.persist_active();
            store.effective_set()
        };
        view.apply_placements(&shown);

        Ok(placements)
    }
}
