//! localStorage によるキー/値ストレージ
//!
//! プライベートブラウズ等で localStorage が使えない場合は読み込みは空、
//! 書き込みはエラーになる（呼び出し側はメモリ上の状態で継続する）。

use nail_studio_common::{Error, KeyValueStore, Result};
use web_sys::Storage;

pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(&"localStorage is unavailable; changes will not be saved".into());
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| Error::Storage("localStorage is unavailable".into()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nail_studio_common::{BaseLayout, DesignState, NailId, Placement, PlacementStore, Wishlist, PLACEMENTS_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_set_get_remove() {
        let store = LocalStore::open();
        store.set("nailstudio_test_key", "value").unwrap();
        assert_eq!(store.get("nailstudio_test_key").as_deref(), Some("value"));

        store.remove("nailstudio_test_key").unwrap();
        assert_eq!(store.get("nailstudio_test_key"), None);
    }

    #[wasm_bindgen_test]
    fn test_placements_survive_reopen() {
        let mut store = PlacementStore::new(LocalStore::open(), BaseLayout::default_hand());
        store.reset_to_base();
        store.merge_one(NailId::Ring, Placement::new(61.0, 33.0, -4.0, 1.1));
        assert!(store.persist_active());

        let mut reopened = PlacementStore::new(LocalStore::open(), BaseLayout::default_hand());
        assert!(reopened.restore());
        assert_eq!(reopened.get(NailId::Ring), Some(Placement::new(61.0, 33.0, -4.0, 1.1)));

        reopened.reset_to_base();
        assert_eq!(LocalStore::open().get(PLACEMENTS_KEY), None);
    }

    #[wasm_bindgen_test]
    fn test_wishlist_roundtrip() {
        let wishlist = Wishlist::new(LocalStore::open());
        let entry = wishlist.save("Browser Look", &DesignState::default(), 4242, "2026-10-18").unwrap();
        assert!(wishlist.load().iter().any(|e| e.id == entry.id));

        assert!(wishlist.remove(4242).unwrap());
        assert!(!wishlist.load().iter().any(|e| e.id == 4242));
    }
}
