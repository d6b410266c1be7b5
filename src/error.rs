use nail_studio_common::AlignError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NailStudioError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("サイズ指定が不正: {0}（例: 42x64）")]
    InvalidSize(String),

    #[error("プリセットが見つかりません: {0}")]
    PresetNotFound(String),

    #[error("自動位置合わせ失敗: {0}")]
    Align(#[from] AlignError),

    #[error("ストレージエラー: {0}")]
    Storage(#[from] nail_studio_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NailStudioError>;
