//! 時間標籤用的 5x7 點陣字型
//!
//! 只收錄時間字串會用到的字元，其他字元只佔位不繪製。

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

const GLYPH_WIDTH: u32 = 5;
/// 字元間距（以未放大的像素計）
const GLYPH_SPACING: u32 = 1;

/// 每列以低 5 位元表示，最高位元在最左邊
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        _ => return None,
    };
    Some(rows)
}

/// 直接在影像上繪製文字，超出邊界的部分會被裁切
pub fn draw_text(image: &mut RgbImage, text: &str, origin: (u32, u32), color: Rgb<u8>, scale: u32) {
    let scale = scale.max(1);
    let advance = (GLYPH_WIDTH + GLYPH_SPACING).saturating_mul(scale);
    let (width, height) = image.dimensions();

    for (position, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let offset = u32::try_from(position).map_or(u32::MAX, |p| p.saturating_mul(advance));
        let glyph_x = origin.0.saturating_add(offset);
        if glyph_x >= width {
            break;
        }

        for (row, bits) in (0u32..).zip(rows) {
            let y0 = origin.1.saturating_add(row.saturating_mul(scale));
            if y0 >= height {
                break;
            }
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let x0 = glyph_x.saturating_add(col.saturating_mul(scale));
                fill_block(image, x0, y0, scale, color);
            }
        }
    }
}

/// 以 `size` x `size` 方塊繪製一個放大後的點，起點在影像外時略過
fn fill_block(image: &mut RgbImage, x0: u32, y0: u32, size: u32, color: Rgb<u8>) {
    let (width, height) = image.dimensions();
    if x0 >= width || y0 >= height {
        return;
    }
    let (Ok(x), Ok(y)) = (i32::try_from(x0), i32::try_from(y0)) else {
        return;
    };
    let block_width = size.min(width - x0);
    let block_height = size.min(height - y0);
    draw_filled_rect_mut(image, Rect::at(x, y).of_size(block_width, block_height), color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn test_all_timestamp_chars_have_glyphs() {
        for c in "0123456789:.-".chars() {
            assert!(glyph(c).is_some(), "missing glyph for {c}");
        }
        assert!(glyph('x').is_none());
    }

    #[test]
    fn test_draw_one_pixel_scale() {
        let mut image = RgbImage::new(10, 10);
        draw_text(&mut image, "1", (0, 0), WHITE, 1);

        // '1' 第一列只有中間一點
        assert_eq!(*image.get_pixel(2, 0), WHITE);
        assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 0]));
        // 底部整條橫線
        for x in 1..4 {
            assert_eq!(*image.get_pixel(x, 6), WHITE);
        }
    }

    #[test]
    fn test_draw_scaled_block() {
        let mut image = RgbImage::new(20, 20);
        draw_text(&mut image, "-", (1, 1), WHITE, 2);

        // '-' 在第 3 列，放大後位於 y = 1 + 6 .. 1 + 8
        assert_eq!(*image.get_pixel(1, 7), WHITE);
        assert_eq!(*image.get_pixel(10, 8), WHITE);
        assert_eq!(*image.get_pixel(1, 6), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_draw_clips_at_edges() {
        let mut image = RgbImage::new(4, 4);
        draw_text(&mut image, "8:88", (2, 2), WHITE, 3);
        assert_eq!(image.dimensions(), (4, 4));
    }

    #[test]
    fn test_huge_scale_is_clipped() {
        let mut image = RgbImage::new(8, 8);
        draw_text(&mut image, "7:00", (0, 0), WHITE, 1_000_000_000);

        // '7' 左上角的點放大後蓋滿整張影像，其餘筆畫都在影像外
        assert!(image.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_huge_origin_draws_nothing() {
        let mut image = RgbImage::new(8, 8);
        draw_text(&mut image, "88", (u32::MAX - 1, u32::MAX - 1), WHITE, 3);
        assert!(image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn test_unknown_chars_are_skipped() {
        let mut image = RgbImage::new(20, 10);
        draw_text(&mut image, "ab", (0, 0), WHITE, 1);
        assert!(image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
