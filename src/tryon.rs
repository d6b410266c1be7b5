//! 試着配置のCLI操作（自動位置合わせ・表示・リセット）

use crate::config::Config;
use crate::detector::LandmarkFileDetector;
use crate::error::{NailStudioError, Result};
use crate::photo::{HandPhoto, TryOnLayout};
use nail_studio_common::{
    AutoAligner, BaseLayout, KeyValueStore, PlacementSet, PlacementStore, PlacementView, Size,
};
use std::cell::RefCell;
use std::path::PathBuf;

/// 自動位置合わせの入力
#[derive(Debug, Clone)]
pub struct AlignRequest {
    pub photo: PathBuf,
    pub landmarks: PathBuf,
    pub container: Size,
    pub nail: Size,
    /// 検出器に渡したフレームの保存先
    pub frame_out: Option<PathBuf>,
}

impl AlignRequest {
    /// 設定の既定サイズで作成
    pub fn new(config: &Config, photo: PathBuf, landmarks: PathBuf) -> Self {
        Self {
            photo,
            landmarks,
            container: config.container_size(),
            nail: config.nail_size(),
            frame_out: None,
        }
    }
}

/// 保存済みの配置を読み込んだストア
pub fn open_store<S: KeyValueStore>(storage: S) -> PlacementStore<S> {
    let mut store = PlacementStore::new(storage, BaseLayout::default_hand());
    if store.restore() {
        tracing::debug!("Restored {} saved placements", store.active().len());
    }
    store
}

/// 写真とランドマークから5本のネイル配置を求めて保存する
///
/// 配置されなかった指は以前の配置ではなく初期レイアウトに戻る。
pub async fn align_photo<S, V>(config: &Config, request: &AlignRequest, storage: S, view: &V) -> Result<PlacementSet>
where
    S: KeyValueStore,
    V: PlacementView,
{
    let photo = HandPhoto::open(&request.photo)?;
    if !request.landmarks.exists() {
        return Err(NailStudioError::FileNotFound(request.landmarks.display().to_string()));
    }

    let layout = TryOnLayout::new(request.container, request.nail);
    let detector = LandmarkFileDetector::new(&request.landmarks).with_frame_out(request.frame_out.clone());
    let aligner = AutoAligner::new(detector, config.align);
    let store = RefCell::new(open_store(storage));

    let placements = aligner.invoke(true, &photo, &layout, &store, view).await?;
    Ok(placements)
}

/// 表示用の配置（初期レイアウト + 保存済みの上書き）と上書きの有無
pub fn show_placements<S: KeyValueStore>(storage: S) -> (PlacementSet, PlacementSet) {
    let store = open_store(storage);
    (store.effective_set(), store.active().clone())
}

/// 初期レイアウトに戻す
pub fn reset_placements<S: KeyValueStore>(storage: S) -> PlacementSet {
    let mut store = open_store(storage);
    store.reset_to_base()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nail_studio_common::{MemoryStore, NailId, Placement, PLACEMENTS_KEY};

    #[test]
    fn test_show_without_saved_is_base() {
        let (shown, active) = show_placements(MemoryStore::new());
        assert_eq!(&shown, BaseLayout::default_hand().placements());
        assert!(active.is_empty());
    }

    #[test]
    fn test_reset_removes_saved() {
        let storage = MemoryStore::new();
        let saved: PlacementSet = [(NailId::Index, Placement::new(1.0, 2.0, 3.0, 1.0))].into_iter().collect();
        storage.seed(PLACEMENTS_KEY, &serde_json::to_string(&saved).unwrap());

        let (shown, active) = show_placements(&storage);
        assert_eq!(active, saved);
        assert_eq!(shown.get(NailId::Index), saved.get(NailId::Index));

        let shown = reset_placements(&storage);
        assert_eq!(&shown, BaseLayout::default_hand().placements());
        assert!(storage.get(PLACEMENTS_KEY).is_none());
    }
}
