//! ランドマークファイルによる検出器
//!
//! ブラウザ版の MediaPipe Hands の出力をJSONで保存したものを読み込む。
//! 受け付ける形式:
//! - `{"multiHandLandmarks": [[{x,y}, ...]]}`（MediaPipe の results。先頭の手を使う）
//! - 21点の配列 / 番号をキーにしたマップ
//! - `null` や空配列（手が見つからなかった）

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use image::RgbaImage;
use nail_studio_common::{AlignError, LandmarkDetector, LandmarkFrame};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize)]
#[serde(untagged)]
enum DetectionFile {
    Results {
        #[serde(rename = "multiHandLandmarks")]
        multi_hand_landmarks: Vec<LandmarkFrame>,
    },
    Frame(LandmarkFrame),
}

/// 検出結果のJSONを解析。手が含まれていなければ None
pub fn parse_detection(content: &str) -> serde_json::Result<Option<LandmarkFrame>> {
    let file: Option<DetectionFile> = serde_json::from_str(content)?;
    let frame = match file {
        None => None,
        Some(DetectionFile::Results { multi_hand_landmarks }) => multi_hand_landmarks.into_iter().next(),
        Some(DetectionFile::Frame(frame)) => Some(frame),
    };
    Ok(frame.filter(|f| !f.is_empty()))
}

pub struct LandmarkFileDetector {
    path: PathBuf,
    /// 検出器に渡したフレームの保存先（写真と重なるか確認する用）
    frame_out: Option<PathBuf>,
}

impl LandmarkFileDetector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            frame_out: None,
        }
    }

    pub fn with_frame_out(mut self, path: Option<PathBuf>) -> Self {
        self.frame_out = path;
        self
    }
}

impl LandmarkDetector<RgbaImage> for LandmarkFileDetector {
    fn detect(&self, frame: RgbaImage) -> LocalBoxFuture<'_, Result<Option<LandmarkFrame>, AlignError>> {
        async move {
            tracing::debug!("Detecting on {}x{} frame", frame.width(), frame.height());
            if let Some(out) = &self.frame_out {
                match frame.save(out) {
                    Ok(()) => tracing::info!("Saved detector frame to {}", out.display()),
                    Err(e) => tracing::warn!("Failed to save detector frame {}: {}", out.display(), e),
                }
            }

            let content = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| AlignError::Detector(format!("{}: {}", self.path.display(), e)))?;
            parse_detection(&content).map_err(|e| AlignError::Detector(format!("{}: {}", self.path.display(), e)))
        }
        .boxed_local()
    }
}
