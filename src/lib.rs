//! Nail Studio CLI
//!
//! 共通ライブラリの試着・デザイン機能を、ファイルベースのストレージと
//! image クレートの写真処理で動かす。

pub mod cli;
pub mod config;
pub mod design_file;
pub mod detector;
pub mod error;
pub mod file_store;
pub mod logging;
pub mod photo;
pub mod tryon;
pub mod view;
