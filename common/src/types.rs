//! 試着（Try-on）で扱う基本型
//!
//! - NailId: 指の識別子（配置データのキー）
//! - Placement: 写真上のネイル配置（位置・回転・拡大率）
//! - PlacementSet: 写真1枚分の配置マップ
//! - BaseLayout: 写真なしの初期配置（リセット先）

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 位置（%）の下限・上限
pub const PERCENT_MIN: f64 = 0.0;
pub const PERCENT_MAX: f64 = 100.0;

/// 拡大率の下限・上限
pub const SCALE_MIN: f64 = 0.75;
pub const SCALE_MAX: f64 = 1.90;

/// NaNは下限に寄せてからclampする
pub(crate) fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// 指の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NailId {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl NailId {
    /// 手のイラスト上の表示順（小指 → 親指）
    pub const ALL: [NailId; 5] = [
        NailId::Pinky,
        NailId::Ring,
        NailId::Middle,
        NailId::Index,
        NailId::Thumb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NailId::Thumb => "thumb",
            NailId::Index => "index",
            NailId::Middle => "middle",
            NailId::Ring => "ring",
            NailId::Pinky => "pinky",
        }
    }

    /// DOM要素のid（"nail-thumb" 等）
    pub fn element_id(&self) -> String {
        format!("nail-{}", self.as_str())
    }

    /// 表示順のインデックス（アクセントネイルの指定に使う）
    pub fn display_index(&self) -> usize {
        match self {
            NailId::Pinky => 0,
            NailId::Ring => 1,
            NailId::Middle => 2,
            NailId::Index => 3,
            NailId::Thumb => 4,
        }
    }

    pub fn from_display_index(index: usize) -> Option<NailId> {
        Self::ALL.get(index).copied()
    }

    pub fn parse(s: &str) -> Option<NailId> {
        let s = s.trim().to_lowercase();
        let s = s.strip_prefix("nail-").unwrap_or(&s);
        Self::ALL.iter().copied().find(|id| id.as_str() == s)
    }
}

impl fmt::Display for NailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ピクセル座標
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// self から other へ t の位置の点
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// ピクセルサイズ（コンテナ・ネイル要素）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 未レイアウト要素（0以下・NaN）でも割り算が破綻しないよう1pxを下限にする
    pub fn floored(&self) -> Size {
        let floor = |v: f64| if v.is_finite() && v > 1.0 { v } else { 1.0 };
        Size {
            width: floor(self.width),
            height: floor(self.height),
        }
    }

    /// 整数ピクセルに丸める（オフスクリーン描画用、下限1px）
    pub fn rounded_px(&self) -> (u32, u32) {
        let floored = self.floored();
        (
            floored.width.round().max(1.0) as u32,
            floored.height.round().max(1.0) as u32,
        )
    }
}

/// ネイル1枚の配置
///
/// `left_percent`/`top_percent` は常に [0,100]、`scale_factor` は常に
/// [0.75,1.9] に収まる。デシリアライズ時もclampされる。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PlacementRepr")]
pub struct Placement {
    left_percent: f64,
    top_percent: f64,
    rotation_degrees: f64,
    scale_factor: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacementRepr {
    left_percent: f64,
    top_percent: f64,
    #[serde(default)]
    rotation_degrees: f64,
    #[serde(default = "default_scale")]
    scale_factor: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl From<PlacementRepr> for Placement {
    fn from(repr: PlacementRepr) -> Self {
        Placement::new(
            repr.left_percent,
            repr.top_percent,
            repr.rotation_degrees,
            repr.scale_factor,
        )
    }
}

impl Placement {
    pub fn new(left_percent: f64, top_percent: f64, rotation_degrees: f64, scale_factor: f64) -> Self {
        Self {
            left_percent: clamp_finite(left_percent, PERCENT_MIN, PERCENT_MAX),
            top_percent: clamp_finite(top_percent, PERCENT_MIN, PERCENT_MAX),
            rotation_degrees: if rotation_degrees.is_finite() { rotation_degrees } else { 0.0 },
            scale_factor: clamp_finite(scale_factor, SCALE_MIN, SCALE_MAX),
        }
    }

    pub fn left_percent(&self) -> f64 {
        self.left_percent
    }

    pub fn top_percent(&self) -> f64 {
        self.top_percent
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// 位置だけ差し替える（回転・拡大率はそのまま）
    pub fn with_position(&self, left_percent: f64, top_percent: f64) -> Self {
        Placement::new(left_percent, top_percent, self.rotation_degrees, self.scale_factor)
    }

    /// CSS transform 文字列（transform-origin: bottom center 前提）
    pub fn css_transform(&self) -> String {
        format!(
            "rotate({:.1}deg) scale({:.2})",
            self.rotation_degrees, self.scale_factor
        )
    }
}

impl Default for Placement {
    fn default() -> Self {
        Placement::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// 写真1枚分の配置（NailId → Placement）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementSet(BTreeMap<NailId, Placement>);

impl PlacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NailId) -> Option<&Placement> {
        self.0.get(&id)
    }

    pub fn insert(&mut self, id: NailId, placement: Placement) -> Option<Placement> {
        self.0.insert(id, placement)
    }

    pub fn remove(&mut self, id: NailId) -> Option<Placement> {
        self.0.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: NailId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NailId, &Placement)> {
        self.0.iter().map(|(id, p)| (*id, p))
    }

    /// other の値で上書きする（other にない指は残す）
    pub fn merge(&mut self, other: &PlacementSet) {
        for (id, placement) in other.iter() {
            self.0.insert(id, *placement);
        }
    }
}

impl FromIterator<(NailId, Placement)> for PlacementSet {
    fn from_iter<I: IntoIterator<Item = (NailId, Placement)>>(iter: I) -> Self {
        PlacementSet(iter.into_iter().collect())
    }
}

/// 写真なしの初期配置（一度だけ取得し、以後不変）
#[derive(Debug, Clone, PartialEq)]
pub struct BaseLayout(PlacementSet);

impl BaseLayout {
    /// 標準の手イラスト用レイアウト
    pub fn default_hand() -> Self {
        Self(
            [
                (NailId::Pinky, Placement::new(17.0, 40.0, -14.0, 1.0)),
                (NailId::Ring, Placement::new(31.0, 25.0, -6.0, 1.0)),
                (NailId::Middle, Placement::new(46.0, 19.0, 0.0, 1.0)),
                (NailId::Index, Placement::new(61.0, 25.0, 7.0, 1.0)),
                (NailId::Thumb, Placement::new(79.0, 53.0, 38.0, 1.0)),
            ]
            .into_iter()
            .collect(),
        )
    }

    pub fn get(&self, id: NailId) -> Option<&Placement> {
        self.0.get(id)
    }

    pub fn placements(&self) -> &PlacementSet {
        &self.0
    }
}
