//! Nail Studio Common Library
//!
//! CLIとWeb(WASM)で共有される型とロジック
//! - 試着（Try-on）: ランドマーク → 配置計算、配置ストア、ドラッグ調整、自動位置合わせ
//! - デザイン: 状態・プレビュー・料金・プリセット・ウィッシュリスト

pub mod types;
pub mod error;
pub mod landmarks;
pub mod geometry;
pub mod cover_fit;
pub mod storage;
pub mod placement_store;
pub mod drag;
pub mod auto_align;
pub mod design;
pub mod render;
pub mod pricing;
pub mod presets;
pub mod wishlist;

pub use types::{BaseLayout, NailId, Placement, PlacementSet, Point, Size};
pub use error::{Error, Result};
pub use landmarks::{landmark_pair, LandmarkFrame, NormalizedPoint, HAND_LANDMARK_COUNT};
pub use geometry::{map_placements, place_nail, AlignParams};
pub use cover_fit::{cover_crop, CropRect};
pub use storage::{KeyValueStore, MemoryStore, PLACEMENTS_KEY, WISHLIST_KEY};
pub use placement_store::PlacementStore;
pub use drag::{DragController, PointerSample};
pub use auto_align::{AlignError, AutoAligner, LandmarkDetector, LayoutProvider, PhotoSurface, PlacementView};
pub use design::{Addon, DesignState, DesignUpdate, ExtensionType, Finish, NailLength, Pattern, Shape};
pub use render::{render_nails, NailStyle};
pub use pricing::{quote, PriceLine, Quote};
pub use presets::{builtin_presets, find_preset, Preset, SWATCHES};
pub use wishlist::{CardAction, DesignCard, Wishlist, WishlistEntry};
