//! キー/値ストレージの抽象化
//!
//! ブラウザでは localStorage、CLI ではJSONファイル、テストではメモリ上のマップを使う。
//! 保存は失敗しても致命的ではない（呼び出し側でメモリ上の状態のみで継続する）。

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 試着配置の保存キー
pub const PLACEMENTS_KEY: &str = "nailstudio_tryon_positions";

/// ウィッシュリストの保存キー
pub const WISHLIST_KEY: &str = "nailStudioWishlist";

/// キー/値ストレージ
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// JSONとして読み込む。存在しない・壊れている値は None
pub fn read_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed value for {}: {}", key, e);
            None
        }
    }
}

/// JSONとして保存
pub fn write_json<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// メモリ上のストレージ
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 書き込みが常に失敗するストレージ（容量超過のブラウザを模擬）
    pub fn read_only() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            read_only: true,
        }
    }

    /// 値を直接書き込む（read_only でも書ける）
    pub fn seed(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(Error::Storage("QuotaExceededError".into()));
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.read_only {
            return Err(Error::Storage("storage is read-only".into()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
