//! プレビュー描画用のスタイル計算
//!
//! DOMには触れず、ネイルごとのCSS値だけを求める。

use crate::design::{DesignState, Finish, NailLength, Pattern, Shape};
use crate::types::NailId;

/// 形ごとの角丸・クリップ
pub fn shape_style(shape: Shape) -> (&'static str, &'static str) {
    match shape {
        Shape::Square => ("2px", "none"),
        Shape::Almond => ("50% 50% 50% 50% / 90% 90% 40% 40%", "none"),
        Shape::Stiletto => ("50% 50% 50% 50% / 100% 100% 40% 40%", "none"),
        Shape::Coffin => ("0", "polygon(15% 0%, 85% 0%, 100% 100%, 0% 100%)"),
    }
}

/// 長さごとのネイル高さ（コンテナに対する%）
pub fn length_height(length: NailLength) -> &'static str {
    match length {
        NailLength::Short => "10%",
        NailLength::Medium => "13%",
        NailLength::Long => "17%",
    }
}

pub fn finish_overlay(finish: Finish) -> Option<&'static str> {
    match finish {
        Finish::Glossy => Some("linear-gradient(135deg, rgba(255,255,255,0.4) 0%, rgba(255,255,255,0) 50%)"),
        // マットは filter で表現
        Finish::Matte => None,
        Finish::Chrome => Some(
            "linear-gradient(45deg, rgba(255,255,255,0.6) 0%, rgba(255,255,255,0) 40%, rgba(255,255,255,0.4) 100%)",
        ),
    }
}

pub fn pattern_overlay(pattern: Pattern) -> Option<&'static str> {
    match pattern {
        Pattern::Solid => None,
        Pattern::French => Some("linear-gradient(to bottom, white 25%, transparent 25%)"),
        Pattern::Ombre => Some("linear-gradient(to top, white 0%, transparent 70%)"),
        Pattern::Marble => Some("radial-gradient(circle at 50% 50%, rgba(255,255,255,0.4), transparent)"),
    }
}

/// ネイル1枚分のスタイル
#[derive(Debug, Clone, PartialEq)]
pub struct NailStyle {
    pub nail: NailId,
    pub background_color: String,
    pub height: &'static str,
    pub border_radius: &'static str,
    pub clip_path: &'static str,
    /// 上から順のレイヤー（仕上げ → テクスチャまたは柄）
    pub background_layers: Vec<String>,
    pub background_size: &'static str,
    pub background_position: &'static str,
    pub background_repeat: &'static str,
    pub filter: &'static str,
    pub box_shadow: &'static str,
}

impl NailStyle {
    pub fn background_image(&self) -> String {
        self.background_layers.join(", ")
    }

    /// インラインstyle文字列（位置・transform は含まない）
    pub fn to_css(&self) -> String {
        let mut css = format!(
            "background-color: {}; height: {}; border-radius: {}; clip-path: {}; filter: {}; box-shadow: {};",
            self.background_color, self.height, self.border_radius, self.clip_path, self.filter, self.box_shadow
        );
        if !self.background_layers.is_empty() {
            css.push_str(&format!(" background-image: {};", self.background_image()));
        }
        if !self.background_size.is_empty() {
            css.push_str(&format!(
                " background-size: {}; background-position: {}; background-repeat: {};",
                self.background_size, self.background_position, self.background_repeat
            ));
        }
        css
    }
}

pub fn nail_style(design: &DesignState, nail: NailId) -> NailStyle {
    let (border_radius, clip_path) = shape_style(design.shape);

    let mut layers = Vec::new();
    if let Some(overlay) = finish_overlay(design.finish) {
        layers.push(overlay.to_string());
    }

    let (size, position, repeat) = match (&design.nail_texture, pattern_overlay(design.pattern)) {
        (Some(texture), _) => {
            layers.push(format!("url({})", texture));
            ("cover", "center", "no-repeat")
        }
        (None, Some(overlay)) => {
            layers.push(overlay.to_string());
            ("", "", "")
        }
        (None, None) => ("", "", ""),
    };

    let matte = design.finish == Finish::Matte;
    let color = if design.is_accent(nail) {
        &design.accent_color
    } else {
        &design.color
    };

    NailStyle {
        nail,
        background_color: color.clone(),
        height: length_height(design.length),
        border_radius,
        clip_path,
        background_layers: layers,
        background_size: size,
        background_position: position,
        background_repeat: repeat,
        filter: if matte { "contrast(0.9) brightness(1.05)" } else { "none" },
        box_shadow: if matte { "none" } else { "0 1px 2px rgba(0,0,0,0.2)" },
    }
}

/// 表示順（小指 → 親指）で全ネイルのスタイルを計算
pub fn render_nails(design: &DesignState) -> Vec<NailStyle> {
    NailId::ALL.iter().map(|&id| nail_style(design, id)).collect()
}
