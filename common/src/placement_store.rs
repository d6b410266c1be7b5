//! 試着配置ストア
//!
//! 現在アクティブな配置（指ごとの上書き）を保持し、ストレージへ保存する。
//! 保存・読込はベストエフォートで、失敗してもメモリ上の状態で継続する。

use crate::storage::{read_json, write_json, KeyValueStore, PLACEMENTS_KEY};
use crate::types::{BaseLayout, NailId, Placement, PlacementSet};
use std::cell::Cell;

pub struct PlacementStore<S: KeyValueStore> {
    storage: S,
    active: PlacementSet,
    base: BaseLayout,
    /// reset 後、次に保存が成功するまで保存済みの値を読まない（削除に失敗した場合も）
    cleared: Cell<bool>,
}

impl<S: KeyValueStore> PlacementStore<S> {
    /// 空のアクティブ配置で作成（base は初期レイアウトから取得済みのもの）
    pub fn new(storage: S, base: BaseLayout) -> Self {
        Self {
            storage,
            active: PlacementSet::new(),
            base,
            cleared: Cell::new(false),
        }
    }

    /// 起動時に保存済みの配置を読み込む。読み込めた場合 true
    pub fn restore(&mut self) -> bool {
        match self.load_persisted() {
            Some(set) => {
                self.active = set;
                true
            }
            None => false,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn base(&self) -> &BaseLayout {
        &self.base
    }

    /// アクティブな上書き配置
    pub fn get(&self, id: NailId) -> Option<Placement> {
        self.active.get(id).copied()
    }

    /// 上書きがなければ初期レイアウトの配置
    pub fn effective(&self, id: NailId) -> Option<Placement> {
        self.get(id).or_else(|| self.base.get(id).copied())
    }

    pub fn active(&self) -> &PlacementSet {
        &self.active
    }

    /// 全指の表示用配置（初期レイアウト + 上書き）
    pub fn effective_set(&self) -> PlacementSet {
        let mut set = self.base.placements().clone();
        set.merge(&self.active);
        set
    }

    /// アクティブ配置をまるごと置き換える
    pub fn set_all(&mut self, set: PlacementSet) {
        self.active = set;
    }

    pub fn merge_one(&mut self, id: NailId, placement: Placement) {
        self.active.insert(id, placement);
    }

    /// 初期レイアウトに戻し、保存済みの上書きも削除する
    pub fn reset_to_base(&mut self) -> PlacementSet {
        self.active = PlacementSet::new();
        self.cleared.set(true);
        if let Err(e) = self.storage.remove(PLACEMENTS_KEY) {
            tracing::warn!("Failed to clear saved placements: {}", e);
        }
        self.effective_set()
    }

    /// 保存済みの配置。未保存・破損時は None
    pub fn load_persisted(&self) -> Option<PlacementSet> {
        if self.cleared.get() {
            return None;
        }
        read_json(&self.storage, PLACEMENTS_KEY)
    }

    /// 保存（失敗時は false を返してメモリ上のみで継続）
    pub fn persist(&self, set: &PlacementSet) -> bool {
        match write_json(&self.storage, PLACEMENTS_KEY, set) {
            Ok(()) => {
                self.cleared.set(false);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to save placements: {}", e);
                false
            }
        }
    }

    pub fn persist_active(&self) -> bool {
        self.persist(&self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn sample_set() -> PlacementSet {
        [
            (NailId::Thumb, Placement::new(70.25, 50.5, 33.3, 1.42)),
            (NailId::Index, Placement::new(60.0, 20.125, -4.0, 0.75)),
            (NailId::Pinky, Placement::new(0.0, 100.0, 180.0, 1.9)),
        ]
        .into_iter()
        .collect()
    }

    fn store() -> PlacementStore<MemoryStore> {
        PlacementStore::new(MemoryStore::new(), BaseLayout::default_hand())
    }

    #[test]
    fn test_persist_then_load() {
        let store = store();
        let set = sample_set();
        assert!(store.persist(&set));
        assert_eq!(store.load_persisted(), Some(set));
    }

    #[test]
    fn test_reset_clears_persisted() {
        let mut store = store();
        store.set_all(sample_set());
        store.persist_active();

        let shown = store.reset_to_base();
        assert!(store.load_persisted().is_none());
        assert!(store.active().is_empty());
        assert_eq!(&shown, store.base().placements());

        // 次の保存までは None のまま
        assert!(store.load_persisted().is_none());
        store.persist(&sample_set());
        assert!(store.load_persisted().is_some());
    }

    #[test]
    fn test_corrupt_value_is_absent() {
        let storage = MemoryStore::new();
        storage.seed(PLACEMENTS_KEY, "definitely not json");
        let mut store = PlacementStore::new(storage, BaseLayout::default_hand());

        assert!(store.load_persisted().is_none());
        assert!(!store.restore());
        assert!(store.active().is_empty());
    }

    #[test]
    fn test_wrong_shape_value_is_absent() {
        let storage = MemoryStore::new();
        storage.seed(PLACEMENTS_KEY, r#"{"thumb": {"left": 1, "top": 2, "transform": ""}}"#);
        let store = PlacementStore::new(storage, BaseLayout::default_hand());
        assert!(store.load_persisted().is_none());
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let mut store = PlacementStore::new(MemoryStore::read_only(), BaseLayout::default_hand());
        store.set_all(sample_set());

        assert!(!store.persist_active());
        assert_eq!(store.active(), &sample_set());
        assert!(store.load_persisted().is_none());

        // reset の削除失敗も致命的ではない
        store.reset_to_base();
        assert!(store.active().is_empty());
    }

    #[test]
    fn test_reset_hides_saved_when_remove_fails() {
        let storage = MemoryStore::read_only();
        let saved: PlacementSet = [(NailId::Thumb, Placement::new(1.0, 2.0, 0.0, 1.0))].into_iter().collect();
        storage.seed(PLACEMENTS_KEY, &serde_json::to_string(&saved).unwrap());

        let mut store = PlacementStore::new(storage, BaseLayout::default_hand());
        assert!(store.restore());
        assert_eq!(store.active(), &saved);

        let shown = store.reset_to_base();
        assert_eq!(&shown, store.base().placements());
        // 削除に失敗しても古い配置は戻らない
        assert!(store.storage().get(PLACEMENTS_KEY).is_some());
        assert!(store.load_persisted().is_none());
        assert!(!store.restore());
        assert!(store.active().is_empty());

        // 保存も失敗する間はメモリ上の状態のみ
        store.merge_one(NailId::Index, Placement::new(40.0, 30.0, 0.0, 1.0));
        assert!(!store.persist_active());
        assert!(store.load_persisted().is_none());
    }

    #[test]
    fn test_persist_after_reset_is_loaded() {
        let mut store = store();
        store.set_all(sample_set());
        store.persist_active();
        store.reset_to_base();

        let p = Placement::new(22.0, 44.0, 5.0, 1.2);
        store.merge_one(NailId::Middle, p);
        assert!(store.persist_active());
        let loaded = store.load_persisted().unwrap();
        assert_eq!(loaded.get(NailId::Middle), Some(&p));
    }

    #[test]
    fn test_restore_loads_saved() {
        let storage = MemoryStore::new();
        write_json(&storage, PLACEMENTS_KEY, &sample_set()).unwrap();

        let mut store = PlacementStore::new(storage, BaseLayout::default_hand());
        assert!(store.restore());
        assert_eq!(store.active(), &sample_set());
    }

    #[test]
    fn test_merge_one_and_effective() {
        let mut store = store();
        assert_eq!(store.get(NailId::Ring), None);
        assert_eq!(store.effective(NailId::Ring), store.base().get(NailId::Ring).copied());

        let p = Placement::new(12.0, 34.0, 0.0, 1.0);
        store.merge_one(NailId::Ring, p);
        assert_eq!(store.get(NailId::Ring), Some(p));
        assert_eq!(store.effective(NailId::Ring), Some(p));

        let shown = store.effective_set();
        assert_eq!(shown.len(), NailId::ALL.len());
        assert_eq!(shown.get(NailId::Ring), Some(&p));
    }
}
