//! デザインの読み込みと見積もり・ウィッシュリストの表示

use crate::error::{NailStudioError, Result};
use nail_studio_common::{find_preset, quote, DesignState, KeyValueStore, Quote, Wishlist, WishlistEntry};
use std::path::Path;

/// デザインJSON（ブラウザ版の状態と同じ形式）、プリセット名、既定値の順で決める
pub fn resolve_design(design: Option<&Path>, preset: Option<&str>) -> Result<DesignState> {
    if let Some(path) = design {
        if !path.exists() {
            return Err(NailStudioError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&content)?);
    }
    if let Some(name) = preset {
        let preset = find_preset(name).ok_or_else(|| NailStudioError::PresetNotFound(name.to_string()))?;
        return Ok(preset.to_design());
    }
    Ok(DesignState::default())
}

/// 見積もりの表示行
pub fn quote_lines(quote: &Quote) -> Vec<String> {
    let mut lines: Vec<String> = quote
        .breakdown
        .iter()
        .map(|line| format!("  {:<28} {:>6}", line.label, line.amount_text()))
        .collect();
    lines.push(format!("  {:<28} {:>6}", "Total", format!("${}", quote.total)));
    lines.push(format!("  {:<28} {:>6}", "Estimated time", format!("{} min", quote.minutes)));
    lines
}

/// デザインの概要（カードのタグと同じ項目）
pub fn design_summary(design: &DesignState) -> String {
    format!(
        "{} / {} / {} / {} / {}",
        design.shape.as_str(),
        design.length.label(),
        design.finish.as_str(),
        design.pattern.as_str(),
        design.color
    )
}

/// 現在時刻をIDと日付にしてウィッシュリストへ保存
pub fn save_look<S: KeyValueStore>(wishlist: &Wishlist<S>, name: &str, design: &DesignState) -> Result<WishlistEntry> {
    let now = chrono::Local::now();
    let entry = wishlist.save(name, design, now.timestamp_millis(), &now.format("%Y-%m-%d").to_string())?;
    Ok(entry)
}

pub fn wishlist_lines(entries: &[WishlistEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| {
            let q = quote(&e.config);
            format!("  {}  {:<24} {}  ${}  ({})", e.id, e.name, e.date, q.total, design_summary(&e.config))
        })
        .collect()
}
