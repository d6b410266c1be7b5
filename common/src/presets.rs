//! 定番デザイン（ライブラリ）とカラースウォッチ

use crate::design::{DesignState, Finish, NailLength, Pattern, Shape};
use serde::{Deserialize, Serialize};

/// カラースウォッチ
pub const SWATCHES: [&str; 12] = [
    "#eec4c4", "#dba39a", "#b07d62", "#8d5524", "#f0e68c", "#ff6f61",
    "#6b5b95", "#88b04b", "#92a8d1", "#955251", "#34568b", "#000000",
];

/// 定番デザイン
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub shape: Shape,
    pub length: NailLength,
    pub color: String,
    pub finish: Finish,
    pub pattern: Pattern,
    pub vibe: String,
}

impl Preset {
    fn new(name: &str, shape: Shape, length: NailLength, color: &str, finish: Finish, pattern: Pattern, vibe: &str) -> Self {
        Self {
            name: name.to_string(),
            shape,
            length,
            color: color.to_string(),
            finish,
            pattern,
            vibe: vibe.to_string(),
        }
    }

    /// 初期状態にプリセットの項目を重ねたデザイン
    pub fn to_design(&self) -> DesignState {
        DesignState {
            shape: self.shape,
            length: self.length,
            color: self.color.clone(),
            finish: self.finish,
            pattern: self.pattern,
            ..DesignState::default()
        }
    }
}

pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::new("Classic Nude", Shape::Almond, NailLength::Medium, "#eec4c4", Finish::Glossy, Pattern::Solid, "Minimal"),
        Preset::new("Vampy Red", Shape::Stiletto, NailLength::Long, "#955251", Finish::Glossy, Pattern::Solid, "Glam"),
        Preset::new("Bridal French", Shape::Coffin, NailLength::Medium, "#f0e68c", Finish::Matte, Pattern::French, "Minimal"),
        Preset::new("Chrome Future", Shape::Square, NailLength::Long, "#92a8d1", Finish::Chrome, Pattern::Solid, "Party"),
    ]
}

/// 名前で検索（大文字小文字は区別しない）
pub fn find_preset(name: &str) -> Option<Preset> {
    let name = name.trim();
    builtin_presets()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::DesignUpdate;

    #[test]
    fn test_builtin_presets() {
        let presets = builtin_presets();
        assert_eq!(presets.len(), 4);
        assert_eq!(presets[1].name, "Vampy Red");
        assert_eq!(presets[1].length, NailLength::Long);
    }

    #[test]
    fn test_find_preset_case_insensitive() {
        assert_eq!(find_preset("bridal french").unwrap().pattern, Pattern::French);
        assert!(find_preset("Neon Dream").is_none());
    }

    #[test]
    fn test_apply_preset_resets_other_fields() {
        let state = DesignState::default()
            .apply(DesignUpdate::AccentEnabled(true))
            .apply(DesignUpdate::ApplyPreset(find_preset("Chrome Future").unwrap()));

        assert_eq!(state.finish, Finish::Chrome);
        assert_eq!(state.color, "#92a8d1");
        assert!(!state.accent_enabled);
    }

    #[test]
    fn test_swatches_are_hex_colors() {
        for color in SWATCHES {
            assert!(color.starts_with('#'));
            assert_eq!(color.len(), 7);
        }
    }
}
