use super::label_font::draw_text;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

const SHADOW_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// 縮圖繪製設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// 長邊的最大像素
    pub max_size: u32,
    pub label_color: Rgb<u8>,
    /// 標籤左上角 (x, y)
    pub label_position: (u32, u32),
    pub label_scale: u32,
    pub label_shadow: bool,
}

/// 縮小並加上時間標籤的畫面
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub image: RgbImage,
    pub label: String,
}

impl Thumbnail {
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// 計算等比例縮小後的尺寸，長邊等於 `max_size`，不會放大
#[must_use]
pub fn fit_dimensions(width: u32, height: u32, max_size: u32) -> (u32, u32) {
    if width == 0 || height == 0 || width.max(height) <= max_size {
        return (width, height);
    }

    let scale_side = |side: u32, long_side: u32| -> u32 {
        let scaled = (u64::from(side) * u64::from(max_size) + u64::from(long_side) / 2)
            / u64::from(long_side);
        (scaled as u32).max(1)
    };

    if width >= height {
        (max_size, scale_side(height, width))
    } else {
        (scale_side(width, height), max_size)
    }
}

/// 將畫面縮小並直接在像素上繪製時間標籤
pub fn render_thumbnail(frame: RgbImage, label: &str, settings: &RenderSettings) -> Thumbnail {
    let (width, height) = frame.dimensions();
    let (target_width, target_height) = fit_dimensions(width, height, settings.max_size);

    let mut image = if (target_width, target_height) == (width, height) {
        frame
    } else {
        imageops::resize(&frame, target_width, target_height, FilterType::Triangle)
    };

    let (x, y) = settings.label_position;
    if settings.label_shadow {
        let offset = settings.label_scale.max(1);
        draw_text(
            &mut image,
            label,
            (x.saturating_add(offset), y.saturating_add(offset)),
            SHADOW_COLOR,
            settings.label_scale,
        );
    }
    draw_text(
        &mut image,
        label,
        (x, y),
        settings.label_color,
        settings.label_scale,
    );

    Thumbnail {
        image,
        label: label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(max_size: u32) -> RenderSettings {
        RenderSettings {
            max_size,
            label_color: Rgb([255, 0, 0]),
            label_position: (0, 0),
            label_scale: 1,
            label_shadow: false,
        }
    }

    #[test]
    fn test_fit_landscape() {
        assert_eq!(fit_dimensions(1920, 1080, 320), (320, 180));
    }

    #[test]
    fn test_fit_portrait() {
        assert_eq!(fit_dimensions(1080, 1920, 320), (180, 320));
    }

    #[test]
    fn test_fit_never_upscales() {
        assert_eq!(fit_dimensions(200, 100, 320), (200, 100));
        assert_eq!(fit_dimensions(320, 240, 320), (320, 240));
    }

    #[test]
    fn test_fit_keeps_short_side_positive() {
        assert_eq!(fit_dimensions(10_000, 1, 100), (100, 1));
    }

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        for (w, h) in [(640, 480), (1280, 536), (720, 1280), (333, 777)] {
            let (nw, nh) = fit_dimensions(w, h, 160);
            assert_eq!(nw.max(nh), 160);
            let original = f64::from(w) / f64::from(h);
            let scaled = f64::from(nw) / f64::from(nh);
            let tolerance = original / f64::from(nw.min(nh));
            assert!((original - scaled).abs() <= tolerance, "{w}x{h} -> {nw}x{nh}");
        }
    }

    #[test]
    fn test_render_resizes_and_labels() {
        let frame = RgbImage::from_pixel(640, 360, Rgb([0, 0, 255]));
        let thumbnail = render_thumbnail(frame, "0:00:01", &settings(160));

        assert_eq!(thumbnail.dimensions(), (160, 90));
        assert_eq!(thumbnail.label, "0:00:01");
        // '0' 第一列第二格有筆畫
        assert_eq!(*thumbnail.image.get_pixel(1, 0), Rgb([255, 0, 0]));
        // 標籤以外維持原色
        assert_eq!(*thumbnail.image.get_pixel(150, 80), Rgb([0, 0, 255]));
    }

    #[test]
    fn test_render_small_frame_not_upscaled() {
        let frame = RgbImage::from_pixel(100, 50, Rgb([10, 10, 10]));
        let thumbnail = render_thumbnail(frame, "", &settings(320));
        assert_eq!(thumbnail.dimensions(), (100, 50));
    }

    #[test]
    fn test_render_draws_shadow() {
        let mut settings = settings(320);
        settings.label_shadow = true;
        settings.label_color = Rgb([255, 255, 255]);
        let frame = RgbImage::from_pixel(50, 20, Rgb([128, 128, 128]));
        let thumbnail = render_thumbnail(frame, "-", &settings);

        // 橫線在 y=3，陰影向右下偏移 1
        assert_eq!(*thumbnail.image.get_pixel(0, 3), Rgb([255, 255, 255]));
        assert_eq!(*thumbnail.image.get_pixel(5, 4), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_render_huge_label_scale() {
        let mut settings = settings(320);
        settings.label_scale = 1_000_000_000;
        settings.label_shadow = true;
        let frame = RgbImage::from_pixel(64, 36, Rgb([10, 10, 10]));

        let thumbnail = render_thumbnail(frame, "0:00:00", &settings);

        assert_eq!(thumbnail.dimensions(), (64, 36));
    }
}
