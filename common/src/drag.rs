//! 手動位置調整（ドラッグ）
//!
//! `Idle → Dragging → Idle` の状態機械。移動中はストアの位置を直接更新し、
//! ドラッグ終了時に1回だけ保存する。同時にドラッグできるネイルは1枚。

use crate::placement_store::PlacementStore;
use crate::storage::KeyValueStore;
use crate::types::{NailId, Placement, Size};

/// ポインタイベントのサンプル（画面座標）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pointer_id: i32,
    pub screen_x: f64,
    pub screen_y: f64,
}

impl PointerSample {
    pub fn new(pointer_id: i32, screen_x: f64, screen_y: f64) -> Self {
        Self {
            pointer_id,
            screen_x,
            screen_y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    nail: NailId,
    pointer_id: i32,
    start_x: f64,
    start_y: f64,
    container: Size,
    start_left: f64,
    start_top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn dragging_nail(&self) -> Option<NailId> {
        match self.state {
            DragState::Dragging(session) => Some(session.nail),
            DragState::Idle => None,
        }
    }

    /// ドラッグ開始。試着＋編集モード中で、他のネイルをドラッグしていない場合のみ開始する
    pub fn pointer_down<S: KeyValueStore>(
        &mut self,
        nail: NailId,
        pointer: PointerSample,
        container: Size,
        editing: bool,
        store: &PlacementStore<S>,
    ) -> bool {
        if !editing || self.is_dragging() {
            return false;
        }

        let start = store.effective(nail).unwrap_or_default();
        self.state = DragState::Dragging(DragSession {
            nail,
            pointer_id: pointer.pointer_id,
            start_x: pointer.screen_x,
            start_y: pointer.screen_y,
            container: container.floored(),
            start_left: start.left_percent(),
            start_top: start.top_percent(),
        });
        true
    }

    /// 移動量をコンテナに対する%に換算して位置を更新（回転・拡大率は変えない）
    pub fn pointer_move<S: KeyValueStore>(
        &mut self,
        nail: NailId,
        pointer: PointerSample,
        store: &mut PlacementStore<S>,
    ) -> Option<Placement> {
        let session = self.session_for(nail, pointer)?;

        let dx = pointer.screen_x - session.start_x;
        let dy = pointer.screen_y - session.start_y;
        let left = session.start_left + dx / session.container.width * 100.0;
        let top = session.start_top + dy / session.container.height * 100.0;

        let current = store.effective(nail).unwrap_or_default();
        let moved = current.with_position(left, top);
        store.merge_one(nail, moved);
        Some(moved)
    }

    /// ドラッグ終了。配置全体を1回だけ保存する。終了した場合 true
    pub fn pointer_up<S: KeyValueStore>(
        &mut self,
        nail: NailId,
        pointer: PointerSample,
        store: &PlacementStore<S>,
    ) -> bool {
        if self.session_for(nail, pointer).is_none() {
            return false;
        }
        self.state = DragState::Idle;
        store.persist_active();
        tracing::debug!("Drag finished for {}", nail);
        true
    }

    /// pointercancel は pointerup と同じく確定扱い
    pub fn pointer_cancel<S: KeyValueStore>(
        &mut self,
        nail: NailId,
        pointer: PointerSample,
        store: &PlacementStore<S>,
    ) -> bool {
        self.pointer_up(nail, pointer, store)
    }

    fn session_for(&self, nail: NailId, pointer: PointerSample) -> Option<DragSession> {
        match self.state {
            DragState::Dragging(session)
                if session.nail == nail && session.pointer_id == pointer.pointer_id =>
            {
                Some(session)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, PLACEMENTS_KEY};
    use crate::types::{BaseLayout, PlacementSet};

    const EPS: f64 = 1e-9;

    fn store_with(nail: NailId, placement: Placement) -> PlacementStore<MemoryStore> {
        let mut store = PlacementStore::new(MemoryStore::new(), BaseLayout::default_hand());
        store.merge_one(nail, placement);
        store
    }

    fn container() -> Size {
        Size::new(400.0, 600.0)
    }

    #[test]
    fn test_drag_moves_by_container_percent() {
        let mut store = store_with(NailId::Index, Placement::new(50.0, 50.0, 12.0, 1.3));
        let mut drag = DragController::new();

        assert!(drag.pointer_down(NailId::Index, PointerSample::new(1, 100.0, 100.0), container(), true, &store));
        // 幅の10% = 40px
        let moved = drag
            .pointer_move(NailId::Index, PointerSample::new(1, 140.0, 100.0), &mut store)
            .unwrap();

        assert!((moved.left_percent() - 60.0).abs() < EPS);
        assert!((moved.top_percent() - 50.0).abs() < EPS);
        assert_eq!(moved.rotation_degrees(), 12.0);
        assert_eq!(moved.scale_factor(), 1.3);
        assert_eq!(store.get(NailId::Index), Some(moved));
    }

    #[test]
    fn test_drag_clamps_to_container() {
        let mut store = store_with(NailId::Index, Placement::new(50.0, 50.0, 0.0, 1.0));
        let mut drag = DragController::new();

        drag.pointer_down(NailId::Index, PointerSample::new(1, 0.0, 0.0), container(), true, &store);
        let moved = drag
            .pointer_move(NailId::Index, PointerSample::new(1, 1000.0, -1000.0), &mut store)
            .unwrap();

        assert_eq!(moved.left_percent(), 100.0);
        assert_eq!(moved.top_percent(), 0.0);
    }

    #[test]
    fn test_delta_is_measured_from_drag_start() {
        let mut store = store_with(NailId::Ring, Placement::new(20.0, 20.0, 0.0, 1.0));
        let mut drag = DragController::new();

        drag.pointer_down(NailId::Ring, PointerSample::new(1, 0.0, 0.0), container(), true, &store);
        drag.pointer_move(NailId::Ring, PointerSample::new(1, 40.0, 60.0), &mut store);
        let moved = drag
            .pointer_move(NailId::Ring, PointerSample::new(1, 80.0, 60.0), &mut store)
            .unwrap();

        assert!((moved.left_percent() - 40.0).abs() < EPS);
        assert!((moved.top_percent() - 30.0).abs() < EPS);
    }

    #[test]
    fn test_moves_do_not_persist_until_release() {
        let mut store = store_with(NailId::Thumb, Placement::new(10.0, 10.0, 0.0, 1.0));
        let mut drag = DragController::new();

        drag.pointer_down(NailId::Thumb, PointerSample::new(7, 0.0, 0.0), container(), true, &store);
        drag.pointer_move(NailId::Thumb, PointerSample::new(7, 10.0, 10.0), &mut store);
        drag.pointer_move(NailId::Thumb, PointerSample::new(7, 20.0, 20.0), &mut store);
        assert!(store.storage().get(PLACEMENTS_KEY).is_none());

        assert!(drag.pointer_up(NailId::Thumb, PointerSample::new(7, 20.0, 20.0), &store));
        assert!(!drag.is_dragging());

        let saved: PlacementSet = store.load_persisted().unwrap();
        assert_eq!(saved.get(NailId::Thumb), store.get(NailId::Thumb).as_ref());
    }

    #[test]
    fn test_cancel_finishes_drag() {
        let mut store = store_with(NailId::Thumb, Placement::new(10.0, 10.0, 0.0, 1.0));
        let mut drag = DragController::new();

        drag.pointer_down(NailId::Thumb, PointerSample::new(1, 0.0, 0.0), container(), true, &store);
        assert!(drag.pointer_cancel(NailId::Thumb, PointerSample::new(1, 0.0, 0.0), &store));
        assert!(!drag.is_dragging());
        assert!(store.load_persisted().is_some());
    }

    #[test]
    fn test_requires_edit_mode() {
        let store = store_with(NailId::Index, Placement::new(50.0, 50.0, 0.0, 1.0));
        let mut drag = DragController::new();

        assert!(!drag.pointer_down(NailId::Index, PointerSample::new(1, 0.0, 0.0), container(), false, &store));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_second_nail_is_ignored_while_dragging() {
        let mut store = store_with(NailId::Index, Placement::new(50.0, 50.0, 0.0, 1.0));
        let before_middle = store.effective(NailId::Middle);
        let mut drag = DragController::new();

        assert!(drag.pointer_down(NailId::Index, PointerSample::new(1, 0.0, 0.0), container(), true, &store));
        assert!(!drag.pointer_down(NailId::Middle, PointerSample::new(2, 0.0, 0.0), container(), true, &store));
        assert_eq!(drag.dragging_nail(), Some(NailId::Index));

        // 他のネイル・他のポインタの move/up は無視
        assert!(drag
            .pointer_move(NailId::Middle, PointerSample::new(2, 50.0, 50.0), &mut store)
            .is_none());
        assert!(drag
            .pointer_move(NailId::Index, PointerSample::new(2, 50.0, 50.0), &mut store)
            .is_none());
        assert!(!drag.pointer_up(NailId::Middle, PointerSample::new(2, 0.0, 0.0), &store));
        assert!(drag.is_dragging());
        assert_eq!(store.effective(NailId::Middle), before_middle);
    }

    #[test]
    fn test_drag_starts_from_base_layout() {
        let mut store = PlacementStore::new(MemoryStore::new(), BaseLayout::default_hand());
        let base = *store.base().get(NailId::Pinky).unwrap();
        let mut drag = DragController::new();

        drag.pointer_down(NailId::Pinky, PointerSample::new(1, 0.0, 0.0), container(), true, &store);
        let moved = drag
            .pointer_move(NailId::Pinky, PointerSample::new(1, 0.0, 60.0), &mut store)
            .unwrap();

        assert!((moved.left_percent() - base.left_percent()).abs() < EPS);
        assert!((moved.top_percent() - (base.top_percent() + 10.0)).abs() < EPS);
        assert_eq!(moved.rotation_degrees(), base.rotation_degrees());
    }
}
