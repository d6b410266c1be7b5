//! CSS `object-fit: cover` と同じ切り抜き計算
//!
//! 検出器に渡すオフスクリーン画像は画面上の写真表示と完全に一致している
//! 必要がある（ずれるとランドマーク座標が写真と合わない）。

/// 元画像上の切り抜き矩形（ピクセル）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// 出力 `target_w`×`target_h` を埋めるための元画像の切り抜き範囲
///
/// 拡大して全面を覆い、はみ出した部分を中央で切り落とす。
/// 元画像サイズが0の場合は None（描画しない）。
pub fn cover_crop(image_w: f64, image_h: f64, target_w: f64, target_h: f64) -> Option<CropRect> {
    if !(image_w > 0.0 && image_h > 0.0 && target_w > 0.0 && target_h > 0.0) {
        return None;
    }

    let scale = (target_w / image_w).max(target_h / image_h);
    let width = target_w / scale;
    let height = target_h / scale;

    Some(CropRect {
        x: (image_w - width) / 2.0,
        y: (image_h - height) / 2.0,
        width,
        height,
    })
}
