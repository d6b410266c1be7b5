use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nail-studio")]
#[command(about = "ネイルデザイン試着ツール（自動位置合わせ・見積もり・ウィッシュリスト）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 手の写真とランドマークからネイルを自動配置
    Align {
        /// 手の写真
        #[arg(required = true)]
        photo: PathBuf,

        /// ランドマークJSON（MediaPipe Hands の出力）
        #[arg(short, long, required = true)]
        landmarks: PathBuf,

        /// 試着エリアの幅（px）
        #[arg(long)]
        width: Option<f64>,

        /// 試着エリアの高さ（px）
        #[arg(long)]
        height: Option<f64>,

        /// ネイル要素のサイズ（例: 42x64）
        #[arg(long)]
        nail_size: Option<String>,

        /// 検出器に渡したフレームをPNGで保存
        #[arg(long)]
        frame_out: Option<PathBuf>,

        /// 配置をJSONで出力
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 見積もりを表示
    Price {
        /// デザインJSONファイル
        #[arg(short, long, conflicts_with = "preset")]
        design: Option<PathBuf>,

        /// プリセット名
        #[arg(short, long)]
        preset: Option<String>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// プリセット一覧
    Presets,

    /// ウィッシュリスト管理
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },

    /// 保存済みの試着配置
    Placements {
        #[command(subcommand)]
        action: PlacementsAction,
    },

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定値で設定ファイルを作成
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand)]
pub enum WishlistAction {
    /// 保存済みデザインを一覧表示
    List,

    /// デザインを保存
    Save {
        /// 名前（省略時は "My Custom Look"）
        #[arg(default_value = "")]
        name: String,

        /// デザインJSONファイル
        #[arg(short, long, conflicts_with = "preset")]
        design: Option<PathBuf>,

        /// プリセット名
        #[arg(short, long)]
        preset: Option<String>,
    },

    /// 保存済みデザインを削除
    Remove {
        /// ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum PlacementsAction {
    /// 現在の配置を表示
    Show,

    /// 初期レイアウトに戻す
    Reset,
}
