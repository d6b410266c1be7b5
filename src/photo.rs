//! 手の写真（image クレート）と試着レイアウト
//!
//! 検出器に渡すフレームは `object-fit: cover` で表示した写真と同じ切り抜きにする。

use crate::error::{NailStudioError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};
use nail_studio_common::{cover_crop, AlignError, LayoutProvider, NailId, PhotoSurface, Size};
use std::path::Path;

pub struct HandPhoto {
    image: DynamicImage,
}

impl HandPhoto {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NailStudioError::FileNotFound(path.display().to_string()));
        }
        let image = image::open(path)
            .map_err(|e| NailStudioError::ImageLoad(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Loaded {} ({}x{})", path.display(), image.width(), image.height());
        Ok(Self { image })
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

impl PhotoSurface for HandPhoto {
    type Frame = RgbaImage;

    fn has_visible_photo(&self) -> bool {
        let (w, h) = self.image.dimensions();
        w > 0 && h > 0
    }

    fn rasterize_cover(&self, width: u32, height: u32) -> std::result::Result<RgbaImage, AlignError> {
        let (iw, ih) = self.image.dimensions();
        let crop = cover_crop(iw as f64, ih as f64, width as f64, height as f64)
            .ok_or_else(|| AlignError::Rasterize(format!("cannot cover {}x{} from {}x{}", width, height, iw, ih)))?;

        let x = (crop.x.round().max(0.0) as u32).min(iw.saturating_sub(1));
        let y = (crop.y.round().max(0.0) as u32).min(ih.saturating_sub(1));
        let cw = (crop.width.round() as u32).min(iw - x).max(1);
        let ch = (crop.height.round() as u32).min(ih - y).max(1);

        Ok(self
            .image
            .crop_imm(x, y, cw, ch)
            .resize_exact(width, height, FilterType::Triangle)
            .to_rgba8())
    }
}

/// 設定から決まる試着エリアとネイル要素のサイズ
pub struct TryOnLayout {
    container: Size,
    nail: Size,
}

impl TryOnLayout {
    pub fn new(container: Size, nail: Size) -> Self {
        Self { container, nail }
    }
}

impl LayoutProvider for TryOnLayout {
    fn container_size(&self) -> Option<Size> {
        let Size { width, height } = self.container;
        (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0).then_some(self.container)
    }

    fn nail_size(&self, _id: NailId) -> Size {
        self.nail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// 左半分が赤、右半分が青の横長画像
    fn split_image(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_rasterize_matches_target_size() {
        let photo = HandPhoto::from_image(split_image(400, 200));
        let frame = photo.rasterize_cover(100, 100).unwrap();
        assert_eq!(frame.dimensions(), (100, 100));
    }

    #[test]
    fn test_rasterize_crops_center() {
        // 400x200 → 正方形は中央200x200を切り抜くので左右の色が半分ずつ残る
        let photo = HandPhoto::from_image(split_image(400, 200));
        let frame = photo.rasterize_cover(50, 50).unwrap();
        let left = frame.get_pixel(2, 25);
        let right = frame.get_pixel(47, 25);
        assert!(left[0] > 200 && left[2] < 50);
        assert!(right[2] > 200 && right[0] < 50);
    }

    #[test]
    fn test_layout_without_size_has_no_container() {
        let layout = TryOnLayout::new(Size::new(0.0, 500.0), Size::new(10.0, 20.0));
        assert!(layout.container_size().is_none());

        let layout = TryOnLayout::new(Size::new(400.0, 500.0), Size::new(10.0, 20.0));
        assert_eq!(layout.container_size(), Some(Size::new(400.0, 500.0)));
        assert_eq!(layout.nail_size(NailId::Thumb), Size::new(10.0, 20.0));
    }

    #[test]
    fn test_open_missing_file() {
        let result = HandPhoto::open(Path::new("/nonexistent/hand.jpg"));
        assert!(matches!(result, Err(NailStudioError::FileNotFound(_))));
    }
}
