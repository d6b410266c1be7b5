//! デザイン状態（形・長さ・色・仕上げ・柄・オプション）
//!
//! 状態は値として扱い、`apply` で更新済みの新しい状態を返す。

use crate::types::NailId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Square,
    Almond,
    Stiletto,
    Coffin,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Square, Shape::Almond, Shape::Stiletto, Shape::Coffin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Square => "square",
            Shape::Almond => "almond",
            Shape::Stiletto => "stiletto",
            Shape::Coffin => "coffin",
        }
    }
}

/// 長さ（JSONでは 1/2/3）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NailLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl NailLength {
    pub fn level(&self) -> u8 {
        match self {
            NailLength::Short => 1,
            NailLength::Medium => 2,
            NailLength::Long => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NailLength::Short => "Short",
            NailLength::Medium => "Med",
            NailLength::Long => "Long",
        }
    }
}

impl TryFrom<u8> for NailLength {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(NailLength::Short),
            2 => Ok(NailLength::Medium),
            3 => Ok(NailLength::Long),
            other => Err(format!("invalid length level: {}", other)),
        }
    }
}

impl From<NailLength> for u8 {
    fn from(length: NailLength) -> u8 {
        length.level()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finish {
    #[default]
    Glossy,
    Matte,
    Chrome,
}

impl Finish {
    pub const ALL: [Finish; 3] = [Finish::Glossy, Finish::Matte, Finish::Chrome];

    pub fn as_str(&self) -> &'static str {
        match self {
            Finish::Glossy => "glossy",
            Finish::Matte => "matte",
            Finish::Chrome => "chrome",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    #[default]
    Solid,
    French,
    Ombre,
    Marble,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [Pattern::Solid, Pattern::French, Pattern::Ombre, Pattern::Marble];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Solid => "solid",
            Pattern::French => "french",
            Pattern::Ombre => "ombre",
            Pattern::Marble => "marble",
        }
    }
}

/// エクステンションの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionType {
    #[default]
    Gel,
    Acrylic,
    Polygel,
}

impl ExtensionType {
    pub const ALL: [ExtensionType; 3] = [ExtensionType::Gel, ExtensionType::Acrylic, ExtensionType::Polygel];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionType::Gel => "gel",
            ExtensionType::Acrylic => "acrylic",
            ExtensionType::Polygel => "polygel",
        }
    }
}

/// オプション（ネイルアート追加等）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    pub name: String,
    /// 価格（ドル）。古いデータでは文字列で保存されている
    #[serde(deserialize_with = "de_price")]
    pub price: u32,
}

fn de_price<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Number(u32),
        Text(String),
    }

    match Price::deserialize(deserializer)? {
        Price::Number(n) => Ok(n),
        Price::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl Addon {
    pub fn new(name: impl Into<String>, price: u32) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// 選択可能なオプション
pub fn available_addons() -> Vec<Addon> {
    vec![
        Addon::new("Rhinestones", 10),
        Addon::new("Hand-painted Art", 20),
        Addon::new("Cuticle Care", 5),
        Addon::new("Paraffin Treatment", 15),
    ]
}

pub const DEFAULT_COLOR: &str = "#eec4c4";
pub const DEFAULT_ACCENT_COLOR: &str = "#ffffff";

/// デザイン全体の状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignState {
    pub shape: Shape,
    pub length: NailLength,
    pub color: String,
    pub finish: Finish,
    pub pattern: Pattern,
    pub accent_enabled: bool,
    /// 表示順のインデックス（0=小指 … 4=親指）
    pub accent_index: usize,
    pub accent_color: String,
    /// アップロードされたネイル柄画像（Data URL）
    pub nail_texture: Option<String>,
    pub try_on_enabled: bool,
    /// 試着用の手の写真（Data URL）
    pub try_on_photo: Option<String>,
    pub try_on_edit: bool,
    pub ext_type: ExtensionType,
    pub addons: Vec<Addon>,
}

impl Default for DesignState {
    fn default() -> Self {
        Self {
            shape: Shape::Square,
            length: NailLength::Medium,
            color: DEFAULT_COLOR.to_string(),
            finish: Finish::Glossy,
            pattern: Pattern::Solid,
            accent_enabled: false,
            accent_index: NailId::Ring.display_index(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            nail_texture: None,
            try_on_enabled: false,
            try_on_photo: None,
            try_on_edit: true,
            ext_type: ExtensionType::Gel,
            addons: Vec::new(),
        }
    }
}

/// デザイン状態の更新操作
#[derive(Debug, Clone, PartialEq)]
pub enum DesignUpdate {
    Shape(Shape),
    Length(NailLength),
    Color(String),
    Finish(Finish),
    Pattern(Pattern),
    AccentEnabled(bool),
    AccentIndex(usize),
    AccentColor(String),
    NailTexture(Option<String>),
    TryOnEnabled(bool),
    /// 写真を設定すると試着も有効になり、クリアすると無効になる
    TryOnPhoto(Option<String>),
    TryOnEdit(bool),
    ExtType(ExtensionType),
    Addons(Vec<Addon>),
    Reset,
    ApplyPreset(crate::presets::Preset),
    /// 保存済みデザインを読み込む（試着の状態は引き継ぐ）
    Load(DesignState),
}

impl DesignState {
    /// 更新を適用した新しい状態を返す
    pub fn apply(self, update: DesignUpdate) -> DesignState {
        let mut next = self;
        match update {
            DesignUpdate::Shape(shape) => next.shape = shape,
            DesignUpdate::Length(length) => next.length = length,
            DesignUpdate::Color(color) => next.color = color,
            DesignUpdate::Finish(finish) => next.finish = finish,
            DesignUpdate::Pattern(pattern) => next.pattern = pattern,
            DesignUpdate::AccentEnabled(enabled) => next.accent_enabled = enabled,
            DesignUpdate::AccentIndex(index) => {
                if index < NailId::ALL.len() {
                    next.accent_index = index;
                }
            }
            DesignUpdate::AccentColor(color) => next.accent_color = color,
            DesignUpdate::NailTexture(texture) => next.nail_texture = texture,
            DesignUpdate::TryOnEnabled(enabled) => next.try_on_enabled = enabled,
            DesignUpdate::TryOnPhoto(photo) => {
                next.try_on_enabled = photo.is_some();
                next.try_on_photo = photo;
            }
            DesignUpdate::TryOnEdit(edit) => next.try_on_edit = edit,
            DesignUpdate::ExtType(ext_type) => next.ext_type = ext_type,
            DesignUpdate::Addons(addons) => next.addons = addons,
            DesignUpdate::Reset => next = DesignState::default(),
            DesignUpdate::ApplyPreset(preset) => next = preset.to_design(),
            DesignUpdate::Load(saved) => {
                next = DesignState {
                    try_on_enabled: next.try_on_enabled,
                    try_on_photo: next.try_on_photo,
                    try_on_edit: next.try_on_edit,
                    ..saved
                };
            }
        }
        next
    }

    /// ドラッグで位置調整できる状態か（試着中かつ編集モード）
    pub fn drag_enabled(&self) -> bool {
        self.try_on_enabled && self.try_on_edit
    }

    /// ネイルのクリックでアクセントを選べる状態か（位置調整とは排他）
    pub fn accent_selectable(&self) -> bool {
        self.accent_enabled && !self.drag_enabled()
    }

    /// 写真が表示される状態か
    pub fn photo_visible(&self) -> bool {
        self.try_on_enabled && self.try_on_photo.is_some()
    }

    pub fn is_accent(&self, nail: NailId) -> bool {
        self.accent_enabled && nail.display_index() == self.accent_index
    }

    /// ネイルのクリック（Enter/Spaceキー含む）によるアクセント選択
    ///
    /// 選択できない状態では None。
    pub fn select_accent(self, nail: NailId) -> Option<DesignState> {
        if !self.accent_selectable() {
            return None;
        }
        Some(self.apply(DesignUpdate::AccentIndex(nail.display_index())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = DesignState::default();
        assert_eq!(state.shape, Shape::Square);
        assert_eq!(state.length, NailLength::Medium);
        assert_eq!(state.color, "#eec4c4");
        assert_eq!(state.accent_index, 1);
        assert!(state.try_on_edit);
        assert!(!state.try_on_enabled);
    }

    #[test]
    fn test_apply_updates_single_field() {
        let state = DesignState::default().apply(DesignUpdate::Finish(Finish::Chrome));
        assert_eq!(state.finish, Finish::Chrome);
        assert_eq!(state.shape, Shape::Square);
    }

    #[test]
    fn test_try_on_photo_toggles_try_on() {
        let state = DesignState::default().apply(DesignUpdate::TryOnPhoto(Some("data:image/png;base64,AA".into())));
        assert!(state.try_on_enabled);
        assert!(state.photo_visible());

        let state = state.apply(DesignUpdate::TryOnPhoto(None));
        assert!(!state.try_on_enabled);
        assert!(!state.photo_visible());
    }

    #[test]
    fn test_accent_index_out_of_range_is_ignored() {
        let state = DesignState::default().apply(DesignUpdate::AccentIndex(9));
        assert_eq!(state.accent_index, 1);
    }

    #[test]
    fn test_accent_selection_exclusive_with_editing() {
        let state = DesignState::default().apply(DesignUpdate::AccentEnabled(true));
        let selected = state.clone().select_accent(NailId::Thumb).unwrap();
        assert_eq!(selected.accent_index, 4);
        assert!(selected.is_accent(NailId::Thumb));

        // 試着＋編集中はクリックで選択しない
        let editing = state.apply(DesignUpdate::TryOnEnabled(true));
        assert!(editing.drag_enabled());
        assert!(editing.clone().select_accent(NailId::Thumb).is_none());

        // 編集をロックすれば選択できる
        let locked = editing.apply(DesignUpdate::TryOnEdit(false));
        assert!(locked.select_accent(NailId::Pinky).is_some());
    }

    #[test]
    fn test_accent_requires_accent_enabled() {
        assert!(DesignState::default().select_accent(NailId::Index).is_none());
    }

    #[test]
    fn test_reset() {
        let state = DesignState::default()
            .apply(DesignUpdate::Shape(Shape::Coffin))
            .apply(DesignUpdate::Reset);
        assert_eq!(state, DesignState::default());
    }

    #[test]
    fn test_serialize_reference_format() {
        let json = serde_json::to_string(&DesignState::default()).unwrap();
        assert!(json.contains("\"shape\":\"square\""));
        assert!(json.contains("\"length\":2"));
        assert!(json.contains("\"accentEnabled\":false"));
        assert!(json.contains("\"extType\":\"gel\""));
    }

    #[test]
    fn test_deserialize_partial_with_string_prices() {
        let json = r#"{
            "shape": "stiletto",
            "length": 3,
            "addons": [{"name": "Rhinestones", "price": "10"}, {"name": "Cuticle Care", "price": 5}]
        }"#;
        let state: DesignState = serde_json::from_str(json).unwrap();
        assert_eq!(state.shape, Shape::Stiletto);
        assert_eq!(state.length, NailLength::Long);
        assert_eq!(state.color, DEFAULT_COLOR);
        assert_eq!(state.addons[0].price, 10);
        assert_eq!(state.addons[1].price, 5);
    }

    #[test]
    fn test_load_keeps_try_on_session() {
        let saved = DesignState {
            shape: Shape::Almond,
            try_on_enabled: false,
            try_on_photo: None,
            ..DesignState::default()
        };
        let state = DesignState::default()
            .apply(DesignUpdate::TryOnPhoto(Some("data:image/png;base64,AA".into())))
            .apply(DesignUpdate::Load(saved));

        assert_eq!(state.shape, Shape::Almond);
        assert!(state.try_on_enabled);
        assert!(state.try_on_photo.is_some());
    }

    #[test]
    fn test_invalid_length_rejected() {
        assert!(serde_json::from_str::<DesignState>(r#"{"length": 7}"#).is_err());
    }
}
