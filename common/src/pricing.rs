//! 料金・施術時間の計算

use crate::design::{DesignState, ExtensionType, Finish, NailLength, Pattern};
use serde::Serialize;

pub const BASE_PRICE: u32 = 40;
pub const BASE_MINUTES: u32 = 60;
pub const ACCENT_PRICE: u32 = 5;
/// オプション1件・柄あり・ロングそれぞれの追加時間
pub const EXTRA_MINUTES: u32 = 15;

pub fn length_price(length: NailLength) -> u32 {
    match length {
        NailLength::Short => 0,
        NailLength::Medium => 5,
        NailLength::Long => 10,
    }
}

pub fn ext_type_price(ext_type: ExtensionType) -> u32 {
    match ext_type {
        ExtensionType::Gel => 0,
        ExtensionType::Acrylic => 5,
        ExtensionType::Polygel => 10,
    }
}

pub fn finish_price(finish: Finish) -> u32 {
    match finish {
        Finish::Glossy => 0,
        Finish::Matte => 5,
        Finish::Chrome => 10,
    }
}

pub fn pattern_price(pattern: Pattern) -> u32 {
    match pattern {
        Pattern::Solid => 0,
        Pattern::French | Pattern::Ombre => 15,
        Pattern::Marble => 20,
    }
}

/// 明細1行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceLine {
    pub label: String,
    pub amount: u32,
    /// 基本料金以外は "+$" 表記
    pub additive: bool,
}

impl PriceLine {
    fn base(label: &str, amount: u32) -> Self {
        Self {
            label: label.to_string(),
            amount,
            additive: false,
        }
    }

    fn extra(label: impl Into<String>, amount: u32) -> Self {
        Self {
            label: label.into(),
            amount,
            additive: true,
        }
    }

    pub fn amount_text(&self) -> String {
        if self.additive {
            format!("+${}", self.amount)
        } else {
            format!("${}", self.amount)
        }
    }
}

/// 見積もり結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub total: u32,
    pub minutes: u32,
    pub breakdown: Vec<PriceLine>,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// デザインから料金・時間・明細を計算
pub fn quote(design: &DesignState) -> Quote {
    let addons_total: u32 = design.addons.iter().map(|a| a.price).sum();

    let mut total = BASE_PRICE
        + length_price(design.length)
        + ext_type_price(design.ext_type)
        + finish_price(design.finish)
        + pattern_price(design.pattern)
        + addons_total;
    if design.accent_enabled {
        total += ACCENT_PRICE;
    }

    let mut minutes = BASE_MINUTES + EXTRA_MINUTES * design.addons.len() as u32;
    if design.pattern != Pattern::Solid {
        minutes += EXTRA_MINUTES;
    }
    if design.length == NailLength::Long {
        minutes += EXTRA_MINUTES;
    }

    let mut breakdown = vec![
        PriceLine::base("Base Set", BASE_PRICE),
        PriceLine::extra("Length/Shape", length_price(design.length)),
    ];
    if design.finish != Finish::Glossy {
        breakdown.push(PriceLine::extra(
            format!("{} Finish", capitalize(design.finish.as_str())),
            finish_price(design.finish),
        ));
    }
    if design.pattern != Pattern::Solid {
        breakdown.push(PriceLine::extra("Art Design", pattern_price(design.pattern)));
    }
    if !design.addons.is_empty() {
        breakdown.push(PriceLine::extra("Add-ons", addons_total));
    }

    Quote {
        total,
        minutes,
        breakdown,
    }
}
