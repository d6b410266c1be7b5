//! ランドマーク → ネイル配置の変換
//!
//! 指先と第一関節の2点から、写真上のネイルの回転・拡大率・位置を求める。
//! 副作用のない純粋関数。

use crate::landmarks::{LandmarkFrame, NormalizedPoint};
use crate::types::{clamp_finite, NailId, Placement, PlacementSet, Point, Size, PERCENT_MAX, PERCENT_MIN};
use serde::{Deserialize, Serialize};

/// 位置合わせの調整パラメータ
///
/// 実写真で経験的に決めた値。写真によって較正できるよう設定ファイルから変更可能。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlignParams {
    /// 指先から第一関節へ向かう位置（0=指先, 1=関節）。甘皮寄りにアンカーを置く
    pub anchor_fraction: f64,
    /// 指の長さに対するネイル高さの比率
    pub length_factor: f64,
    /// atan2 の角度に加える回転（上向きの指で0°になる）
    pub rotation_offset_degrees: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            anchor_fraction: 0.62,
            length_factor: 0.95,
            rotation_offset_degrees: 90.0,
            min_scale: 0.75,
            max_scale: 1.90,
        }
    }
}

impl AlignParams {
    /// 設定値が壊れていても [0.75, 1.9] の不変条件は Placement 側で守られる
    fn scale_bounds(&self) -> (f64, f64) {
        let lo = self.min_scale.min(self.max_scale);
        let hi = self.min_scale.max(self.max_scale);
        (lo, hi)
    }
}

fn to_pixels(point: NormalizedPoint, container: Size) -> Point {
    Point::new(point.x * container.width, point.y * container.height)
}

/// 1本分の配置を計算
pub fn place_nail(
    tip: NormalizedPoint,
    joint: NormalizedPoint,
    container: Size,
    nail: Size,
    params: &AlignParams,
) -> Placement {
    let container = container.floored();
    let nail = nail.floored();

    let tip = to_pixels(tip, container);
    let joint = to_pixels(joint, container);

    let dx = tip.x - joint.x;
    let dy = tip.y - joint.y;
    let rotation = dy.atan2(dx).to_degrees() + params.rotation_offset_degrees;

    let finger_length = joint.distance(&tip);
    let anchor = tip.lerp(&joint, params.anchor_fraction);

    let (min_scale, max_scale) = params.scale_bounds();
    let scale = clamp_finite(finger_length * params.length_factor / nail.height, min_scale, max_scale);

    // ネイルの下端中央をアンカーに合わせる（transform-origin: bottom center）
    let left = clamp_finite(
        (anchor.x - nail.width / 2.0) / container.width * 100.0,
        PERCENT_MIN,
        PERCENT_MAX,
    );
    let top = clamp_finite(
        (anchor.y - nail.height) / container.height * 100.0,
        PERCENT_MIN,
        PERCENT_MAX,
    );

    Placement::new(left, top, rotation, scale)
}

/// 検出結果から全指の配置を計算
///
/// 指先・関節のどちらかが欠けている指は結果に含めない（部分結果の扱いは呼び出し側が決める）。
pub fn map_placements<F>(
    frame: &LandmarkFrame,
    container: Size,
    nail_size: F,
    params: &AlignParams,
) -> PlacementSet
where
    F: Fn(NailId) -> Size,
{
    NailId::ALL
        .iter()
        .filter_map(|&id| {
            let (tip, joint) = frame.finger(id)?;
            Some((id, place_nail(tip, joint, container, nail_size(id), params)))
        })
        .collect()
}
