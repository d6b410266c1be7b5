//! ウィッシュリスト（保存したデザイン）とデザインカード
//!
//! カードの操作は文字列に埋め込んだコールバックではなく `CardAction` で表す。

use crate::design::{DesignState, DesignUpdate};
use crate::error::Result;
use crate::presets::{builtin_presets, Preset};
use crate::render::shape_style;
use crate::storage::{read_json, write_json, KeyValueStore, WISHLIST_KEY};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOOK_NAME: &str = "My Custom Look";

/// 保存済みデザイン
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    /// 保存時刻（エポックミリ秒）
    pub id: i64,
    pub name: String,
    pub config: DesignState,
    pub date: String,
}

pub struct Wishlist<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> Wishlist<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 保存済み一覧。未保存・破損時は空
    ///
    /// 壊れたエントリは1件単位で読み飛ばす。
    pub fn load(&self) -> Vec<WishlistEntry> {
        let raw: Vec<serde_json::Value> = read_json(&self.storage, WISHLIST_KEY).unwrap_or_default();
        raw.into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping malformed wishlist entry: {}", e);
                    None
                }
            })
            .collect()
    }

    /// デザインを保存する。名前が空なら既定の名前を使う
    ///
    /// 試着写真は容量が大きいため保存しない。
    pub fn save(&self, name: &str, design: &DesignState, id: i64, date: &str) -> Result<WishlistEntry> {
        let name = match name.trim() {
            "" => DEFAULT_LOOK_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        let entry = WishlistEntry {
            id,
            name,
            config: DesignState {
                try_on_photo: None,
                ..design.clone()
            },
            date: date.to_string(),
        };

        let mut entries = self.load();
        entries.push(entry.clone());
        write_json(&self.storage, WISHLIST_KEY, &entries)?;
        tracing::debug!("Saved look {} ({} entries)", entry.id, entries.len());
        Ok(entry)
    }

    /// 削除。該当があった場合 true
    pub fn remove(&self, id: i64) -> Result<bool> {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        write_json(&self.storage, WISHLIST_KEY, &entries)?;
        Ok(true)
    }
}

/// カードのボタン操作
#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    ApplyPreset(Preset),
    ApplySaved(Box<DesignState>),
    Remove(i64),
}

/// ライブラリ・ウィッシュリストのカード表示データ
#[derive(Debug, Clone, PartialEq)]
pub struct DesignCard {
    pub key: String,
    pub name: String,
    pub color: String,
    pub border_radius: &'static str,
    /// coffin のみ
    pub clip_path: Option<&'static str>,
    pub tags: Vec<String>,
    pub apply: CardAction,
    pub remove: Option<CardAction>,
}

fn card_shape(shape: crate::design::Shape) -> (&'static str, Option<&'static str>) {
    let (radius, clip) = shape_style(shape);
    (radius, (clip != "none").then_some(clip))
}

pub fn library_cards() -> Vec<DesignCard> {
    builtin_presets()
        .into_iter()
        .map(|preset| {
            let (border_radius, clip_path) = card_shape(preset.shape);
            DesignCard {
                key: format!("preset-{}", preset.name),
                name: preset.name.clone(),
                color: preset.color.clone(),
                border_radius,
                clip_path,
                tags: vec![preset.shape.as_str().to_string(), preset.length.label().to_string()],
                apply: CardAction::ApplyPreset(preset),
                remove: None,
            }
        })
        .collect()
}

pub fn wishlist_cards(entries: &[WishlistEntry]) -> Vec<DesignCard> {
    entries
        .iter()
        .map(|entry| {
            let (border_radius, clip_path) = card_shape(entry.config.shape);
            DesignCard {
                key: format!("look-{}", entry.id),
                name: entry.name.clone(),
                color: entry.config.color.clone(),
                border_radius,
                clip_path,
                tags: vec![
                    entry.config.shape.as_str().to_string(),
                    entry.config.length.label().to_string(),
                ],
                apply: CardAction::ApplySaved(Box::new(entry.config.clone())),
                remove: Some(CardAction::Remove(entry.id)),
            }
        })
        .collect()
}

/// カード操作の結果
#[derive(Debug, Clone, PartialEq)]
pub struct CardOutcome {
    pub design: DesignState,
    pub message: String,
    /// ウィッシュリストが変わった（再描画が必要）
    pub wishlist_changed: bool,
}

/// カード操作を処理する
pub fn dispatch_card_action<S: KeyValueStore>(
    action: CardAction,
    design: DesignState,
    wishlist: &Wishlist<S>,
) -> CardOutcome {
    match action {
        CardAction::ApplyPreset(preset) => CardOutcome {
            message: format!("Applied: {}", preset.name),
            design: design.apply(DesignUpdate::ApplyPreset(preset)),
            wishlist_changed: false,
        },
        CardAction::ApplySaved(saved) => CardOutcome {
            design: design.apply(DesignUpdate::Load(*saved)),
            message: "Applied saved look".to_string(),
            wishlist_changed: false,
        },
        CardAction::Remove(id) => {
            let removed = match wishlist.remove(id) {
                Ok(removed) => removed,
                Err(e) => {
                    tracing::warn!("Failed to update wishlist: {}", e);
                    false
                }
            };
            CardOutcome {
                design,
                message: if removed { "Look removed".to_string() } else { "Look not found".to_string() },
                wishlist_changed: removed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::Shape;
    use crate::storage::MemoryStore;

    #[test]
    fn test_empty_wishlist() {
        let wishlist = Wishlist::new(MemoryStore::new());
        assert!(wishlist.load().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let wishlist = Wishlist::new(MemoryStore::new());
        let design = DesignState::default().apply(DesignUpdate::Shape(Shape::Almond));

        let entry = wishlist.save("  Summer  ", &design, 1700000000000, "2026-10-18").unwrap();
        assert_eq!(entry.name, "Summer");

        let loaded = wishlist.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].config.shape, Shape::Almond);
        assert_eq!(loaded[0].date, "2026-10-18");
    }

    #[test]
    fn test_blank_name_uses_default() {
        let wishlist = Wishlist::new(MemoryStore::new());
        let entry = wishlist.save("   ", &DesignState::default(), 1, "2026-10-18").unwrap();
        assert_eq!(entry.name, DEFAULT_LOOK_NAME);
    }

    #[test]
    fn test_save_drops_try_on_photo() {
        let wishlist = Wishlist::new(MemoryStore::new());
        let design = DesignState::default().apply(DesignUpdate::TryOnPhoto(Some("data:image/jpeg;base64,AAAA".into())));
        let entry = wishlist.save("x", &design, 1, "d").unwrap();
        assert!(entry.config.try_on_photo.is_none());
    }

    #[test]
    fn test_malformed_wishlist_is_empty() {
        let storage = MemoryStore::new();
        storage.seed(WISHLIST_KEY, "[{broken");
        let wishlist = Wishlist::new(storage);
        assert!(wishlist.load().is_empty());

        // 壊れたデータは上書きされる
        wishlist.save("fresh", &DesignState::default(), 2, "d").unwrap();
        assert_eq!(wishlist.load().len(), 1);
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let storage = MemoryStore::new();
        let good = WishlistEntry {
            id: 7,
            name: "Kept".to_string(),
            config: DesignState::default(),
            date: "2026-10-18".to_string(),
        };
        let raw = format!(
            "[{}, {{\"id\": \"oops\", \"name\": 3}}]",
            serde_json::to_string(&good).unwrap()
        );
        storage.seed(WISHLIST_KEY, &raw);
        let wishlist = Wishlist::new(storage);

        assert_eq!(wishlist.load(), vec![good.clone()]);

        // 壊れたエントリ以外は保存後も残る
        wishlist.save("New", &DesignState::default(), 8, "2026-10-18").unwrap();
        let loaded = wishlist.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], good);
        assert_eq!(loaded[1].name, "New");
    }

    #[test]
    fn test_remove() {
        let wishlist = Wishlist::new(MemoryStore::new());
        wishlist.save("a", &DesignState::default(), 1, "d").unwrap();
        wishlist.save("b", &DesignState::default(), 2, "d").unwrap();

        assert!(wishlist.remove(1).unwrap());
        assert!(!wishlist.remove(99).unwrap());
        let loaded = wishlist.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "b");
    }

    #[test]
    fn test_save_failure_is_error() {
        let wishlist = Wishlist::new(MemoryStore::read_only());
        assert!(wishlist.save("a", &DesignState::default(), 1, "d").is_err());
    }

    #[test]
    fn test_library_cards() {
        let cards = library_cards();
        assert_eq!(cards.len(), 4);
        let bridal = cards.iter().find(|c| c.name == "Bridal French").unwrap();
        assert!(bridal.clip_path.is_some());
        assert_eq!(bridal.tags, vec!["coffin".to_string(), "Med".to_string()]);
        assert!(bridal.remove.is_none());
    }

    #[test]
    fn test_dispatch_card_actions() {
        let wishlist = Wishlist::new(MemoryStore::new());
        let saved = DesignState::default().apply(DesignUpdate::Shape(Shape::Stiletto));
        wishlist.save("mine", &saved, 42, "d").unwrap();

        let cards = wishlist_cards(&wishlist.load());
        assert_eq!(cards[0].tags[0], "stiletto");

        let outcome = dispatch_card_action(cards[0].apply.clone(), DesignState::default(), &wishlist);
        assert_eq!(outcome.design.shape, Shape::Stiletto);
        assert!(!outcome.wishlist_changed);

        let remove = cards[0].remove.clone().unwrap();
        let outcome = dispatch_card_action(remove, outcome.design, &wishlist);
        assert!(outcome.wishlist_changed);
        assert!(wishlist.load().is_empty());

        let preset = library_cards().remove(1);
        let outcome = dispatch_card_action(preset.apply, DesignState::default(), &wishlist);
        assert_eq!(outcome.message, "Applied: Vampy Red");
        assert_eq!(outcome.design.shape, Shape::Stiletto);
    }
}
