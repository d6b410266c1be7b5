use crate::error::{NailStudioError, Result};
use nail_studio_common::{AlignParams, Size};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 自動位置合わせの調整値
    pub align: AlignParams,
    /// 試着表示領域（px）
    pub container_width: f64,
    pub container_height: f64,
    /// ネイル要素の描画サイズ（px）
    pub nail_width: f64,
    pub nail_height: f64,
    /// 保存先（省略時は設定ディレクトリの storage.json）
    pub storage_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| NailStudioError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("nail-studio"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// ストレージファイルのパス
    pub fn storage_file(&self) -> Result<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("storage.json")),
        }
    }

    pub fn container_size(&self) -> Size {
        Size::new(self.container_width, self.container_height)
    }

    pub fn nail_size(&self) -> Size {
        Size::new(self.nail_width, self.nail_height)
    }

    fn default_config() -> Self {
        Self {
            align: AlignParams::default(),
            // ブラウザ版の試着エリア（3:4）
            container_width: 420.0,
            container_height: 560.0,
            nail_width: 42.0,
            nail_height: 64.0,
            storage_path: None,
        }
    }
}

/// `42x64` 形式のサイズ指定を解析
pub fn parse_size(s: &str) -> Result<Size> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| NailStudioError::InvalidSize(s.to_string()))?;
    let width: f64 = w.trim().parse().map_err(|_| NailStudioError::InvalidSize(s.to_string()))?;
    let height: f64 = h.trim().parse().map_err(|_| NailStudioError::InvalidSize(s.to_string()))?;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(NailStudioError::InvalidSize(s.to_string()));
    }
    Ok(Size::new(width, height))
}
