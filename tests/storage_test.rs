//! ファイルストレージ・設定テスト
//!
//! 保存ファイルと設定ファイルの読み書き、破損時の扱いを検証

use nail_studio::config::Config;
use nail_studio::design_file::{resolve_design, save_look};
use nail_studio::error::NailStudioError;
use nail_studio::file_store::FileStore;
use nail_studio_common::{
    DesignState, DesignUpdate, KeyValueStore, PlacementStore, BaseLayout, NailId, Placement, Wishlist,
    PLACEMENTS_KEY, WISHLIST_KEY,
};
use tempfile::tempdir;

// ============================================
// FileStore
// ============================================

/// 存在しないファイルは空
#[test]
fn test_missing_file_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::open(dir.path().join("storage.json"));
    assert!(store.get(PLACEMENTS_KEY).is_none());
    assert!(store.keys().is_empty());
}

/// 書き込んだ値は再オープン後も読める
#[test]
fn test_set_survives_reopen() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");

    let store = FileStore::open(&path);
    store.set("a", "1").unwrap();
    store.set("b", "two").unwrap();
    store.remove("a").unwrap();

    let reopened = FileStore::open(&path);
    assert!(reopened.get("a").is_none());
    assert_eq!(reopened.get("b").as_deref(), Some("two"));
}

/// 壊れたファイルは空として扱い、次の書き込みで修復される
#[test]
fn test_corrupt_file_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{{{ not json").unwrap();

    let store = FileStore::open(&path);
    assert!(store.keys().is_empty());

    store.set("k", "v").unwrap();
    assert_eq!(FileStore::open(&path).get("k").as_deref(), Some("v"));
}

/// 書き込めない場所では失敗を返し、メモリ上の内容も変えない
#[test]
fn test_write_failure_keeps_previous_state() {
    let dir = tempdir().expect("Failed to create temp dir");
    // ディレクトリをファイルとして書き込もうとして失敗させる
    let store = FileStore::open(dir.path());

    assert!(store.set("k", "v").is_err());
    assert!(store.get("k").is_none());
}

/// ドラッグ後の保存（配置ストア経由）
#[test]
fn test_placement_store_on_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");

    let mut store = PlacementStore::new(FileStore::open(&path), BaseLayout::default_hand());
    store.merge_one(NailId::Middle, Placement::new(44.0, 21.5, 2.0, 1.1));
    assert!(store.persist_active());

    let mut restored = PlacementStore::new(FileStore::open(&path), BaseLayout::default_hand());
    assert!(restored.restore());
    assert_eq!(restored.get(NailId::Middle), Some(Placement::new(44.0, 21.5, 2.0, 1.1)));
}

/// ウィッシュリストと配置は同じファイルの別キー
#[test]
fn test_wishlist_on_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("storage.json");

    let design = DesignState::default()
        .apply(DesignUpdate::TryOnPhoto(Some("data:image/png;base64,AAAA".into())));
    let wishlist = Wishlist::new(FileStore::open(&path));
    let entry = save_look(&wishlist, "Party", &design).unwrap();
    assert!(entry.config.try_on_photo.is_none());

    let reopened = FileStore::open(&path);
    assert!(reopened.get(WISHLIST_KEY).is_some());
    assert!(reopened.get(PLACEMENTS_KEY).is_none());

    let wishlist = Wishlist::new(reopened);
    assert_eq!(wishlist.load(), vec![entry.clone()]);
    assert!(wishlist.remove(entry.id).unwrap());
    assert!(wishlist.load().is_empty());
}

// ============================================
// Config
// ============================================

/// 設定ファイルがなければ既定値
#[test]
fn test_config_missing_is_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, Config::default());
}

/// 保存と読み込み
#[test]
fn test_config_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nail-studio").join("config.json");

    let mut config = Config::default();
    config.align.anchor_fraction = 0.5;
    config.nail_width = 36.0;
    config.storage_path = Some(dir.path().join("custom.json"));
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.storage_file().unwrap(), dir.path().join("custom.json"));
}

/// 壊れた設定ファイルはエラー
#[test]
fn test_config_corrupt_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(NailStudioError::JsonParse(_))));
}

// ============================================
// デザインファイル
// ============================================

/// ブラウザ版の状態JSONを読み込める
#[test]
fn test_resolve_design_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("design.json");
    std::fs::write(
        &path,
        r##"{"shape": "coffin", "length": 3, "color": "#000000", "addons": [{"name": "Crystals", "price": "15"}]}"##,
    )
    .unwrap();

    let design = resolve_design(Some(&path), None).unwrap();
    assert_eq!(design.color, "#000000");
    assert_eq!(design.addons.len(), 1);
    assert_eq!(design.addons[0].price, 15);

    let missing = resolve_design(Some(&dir.path().join("nope.json")), None);
    assert!(matches!(missing, Err(NailStudioError::FileNotFound(_))));
}
