//! 手のランドマーク（検出器の出力）
//!
//! MediaPipe Hands の21点レイアウトに従う。座標は入力画像に対する
//! 正規化座標（0〜1）。

use crate::types::NailId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// MediaPipe Hands のランドマーク数
pub const HAND_LANDMARK_COUNT: usize = 21;

/// 正規化座標
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 指ごとの (指先, 第一関節) ランドマーク番号
pub fn landmark_pair(id: NailId) -> (usize, usize) {
    match id {
        NailId::Thumb => (4, 3),
        NailId::Index => (8, 7),
        NailId::Middle => (12, 11),
        NailId::Ring => (16, 15),
        NailId::Pinky => (20, 19),
    }
}

/// 1回の検出結果（ランドマーク番号 → 正規化座標）
///
/// JSONは21要素の配列（`[{x,y}, ...]`）と番号をキーにしたマップ
/// （`{"4": {x,y}, ...}`）のどちらも受け付ける。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "FrameRepr")]
pub struct LandmarkFrame {
    points: BTreeMap<usize, NormalizedPoint>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameRepr {
    Dense(Vec<NormalizedPoint>),
    Sparse(BTreeMap<String, NormalizedPoint>),
    Wrapped { points: BTreeMap<String, NormalizedPoint> },
}

impl TryFrom<FrameRepr> for LandmarkFrame {
    type Error = String;

    fn try_from(repr: FrameRepr) -> Result<Self, Self::Error> {
        match repr {
            FrameRepr::Dense(points) => Ok(LandmarkFrame::from_dense(points)),
            FrameRepr::Sparse(points) | FrameRepr::Wrapped { points } => {
                let mut frame = LandmarkFrame::default();
                for (key, point) in points {
                    let index: usize = key
                        .trim()
                        .parse()
                        .map_err(|_| format!("invalid landmark index: {}", key))?;
                    frame.insert(index, point);
                }
                Ok(frame)
            }
        }
    }
}

impl LandmarkFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// 検出器が返す配列（番号順）から作成
    pub fn from_dense(points: Vec<NormalizedPoint>) -> Self {
        Self {
            points: points.into_iter().enumerate().collect(),
        }
    }

    pub fn insert(&mut self, index: usize, point: NormalizedPoint) {
        self.points.insert(index, point);
    }

    pub fn get(&self, index: usize) -> Option<NormalizedPoint> {
        self.points.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 指先と第一関節の両方が揃っている場合のみ返す
    pub fn finger(&self, id: NailId) -> Option<(NormalizedPoint, NormalizedPoint)> {
        let (tip, joint) = landmark_pair(id);
        Some((self.get(tip)?, self.get(joint)?))
    }
}
