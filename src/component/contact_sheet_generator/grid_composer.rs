use super::thumbnail_renderer::Thumbnail;
use image::RgbImage;
use image::imageops;
use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("沒有可合併的縮圖")]
    EmptyInput,
    #[error("每列縮圖數量必須大於 0")]
    InvalidRowSize,
    #[error("預覽圖尺寸過大: 格子 {cell_width}x{cell_height}, {columns} 欄 {rows} 列")]
    CanvasTooLarge {
        cell_width: u32,
        cell_height: u32,
        columns: usize,
        rows: usize,
    },
}

/// 預覽圖尺寸：寬 = 格寬 × 每列數量，高 = 格高 × 列數（無條件進位）
///
/// 畫布的位元組數必須能以 `usize` 表示
pub fn grid_dimensions(
    cell: (u32, u32),
    count: usize,
    row_size: usize,
) -> Result<(u32, u32), ComposeError> {
    if row_size == 0 {
        return Err(ComposeError::InvalidRowSize);
    }
    let rows = count.div_ceil(row_size);
    let too_large = || ComposeError::CanvasTooLarge {
        cell_width: cell.0,
        cell_height: cell.1,
        columns: row_size,
        rows,
    };

    let width = u32::try_from(row_size)
        .ok()
        .and_then(|columns| cell.0.checked_mul(columns))
        .ok_or_else(too_large)?;
    let height = u32::try_from(rows)
        .ok()
        .and_then(|rows| cell.1.checked_mul(rows))
        .ok_or_else(too_large)?;

    let bytes = usize::try_from(u64::from(width) * u64::from(height))
        .ok()
        .and_then(|pixels| pixels.checked_mul(3));
    if bytes.is_none() {
        return Err(too_large());
    }
    Ok((width, height))
}

/// 第 `index` 張縮圖的左上角座標，先填滿一列再換下一列
///
/// 座標超出 `u32` 時停在 `u32::MAX`
#[must_use]
pub fn cell_origin(index: usize, row_size: usize, cell: (u32, u32)) -> (u32, u32) {
    if row_size == 0 {
        return (0, 0);
    }
    let col = u32::try_from(index % row_size).unwrap_or(u32::MAX);
    let row = u32::try_from(index / row_size).unwrap_or(u32::MAX);
    (col.saturating_mul(cell.0), row.saturating_mul(cell.1))
}

/// 將縮圖依序排成網格
///
/// 格子大小以第一張縮圖為準，尺寸不同的縮圖不做調整，超出畫布的部分會被裁切
pub fn compose_grid(thumbnails: &[Thumbnail], row_size: usize) -> Result<RgbImage, ComposeError> {
    if row_size == 0 {
        return Err(ComposeError::InvalidRowSize);
    }
    let first = thumbnails.first().ok_or(ComposeError::EmptyInput)?;
    let cell = first.dimensions();
    let (width, height) = grid_dimensions(cell, thumbnails.len(), row_size)?;

    debug!(
        "合併 {} 張縮圖: 格子 {}x{}, 畫布 {width}x{height}",
        thumbnails.len(),
        cell.0,
        cell.1
    );

    let mut canvas = RgbImage::new(width, height);

    for (index, thumbnail) in thumbnails.iter().enumerate() {
        if thumbnail.dimensions() != cell {
            let (w, h) = thumbnail.dimensions();
            warn!(
                "縮圖 {index} 尺寸 {w}x{h} 與格子 {}x{} 不同",
                cell.0, cell.1
            );
        }
        let (x, y) = cell_origin(index, row_size, cell);
        imageops::replace(&mut canvas, &thumbnail.image, i64::from(x), i64::from(y));
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32, value: u8) -> Thumbnail {
        Thumbnail {
            image: RgbImage::from_pixel(width, height, Rgb([value, value, value])),
            label: String::new(),
        }
    }

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(grid_dimensions((100, 100), 5, 4), Ok((400, 200)));
        assert_eq!(grid_dimensions((100, 100), 4, 4), Ok((400, 100)));
        assert_eq!(grid_dimensions((320, 180), 32, 4), Ok((1280, 1440)));
        assert_eq!(
            grid_dimensions((10, 10), 3, 0),
            Err(ComposeError::InvalidRowSize)
        );
    }

    #[test]
    fn test_grid_dimensions_overflow() {
        // 寬度超出 u32
        assert!(matches!(
            grid_dimensions((320, 180), 1, 20_000_000),
            Err(ComposeError::CanvasTooLarge { .. })
        ));
        // 每列數量本身超出 u32，不可被截斷成小數字
        assert!(matches!(
            grid_dimensions((1, 1), 1, (1usize << 32) + 1),
            Err(ComposeError::CanvasTooLarge { .. })
        ));
        // 高度超出 u32
        assert!(matches!(
            grid_dimensions((1, u32::MAX), 2, 1),
            Err(ComposeError::CanvasTooLarge { .. })
        ));
    }

    #[test]
    fn test_compose_row_size_too_large() {
        let thumbnails = vec![solid(320, 180, 1)];
        assert!(matches!(
            compose_grid(&thumbnails, 20_000_000),
            Err(ComposeError::CanvasTooLarge { columns: 20_000_000, rows: 1, .. })
        ));
    }

    #[test]
    fn test_cell_origin() {
        assert_eq!(cell_origin(0, 4, (100, 100)), (0, 0));
        assert_eq!(cell_origin(3, 4, (100, 100)), (300, 0));
        assert_eq!(cell_origin(4, 4, (100, 100)), (0, 100));
        assert_eq!(cell_origin(6, 4, (100, 50)), (200, 50));
        assert_eq!(cell_origin(3, 0, (100, 50)), (0, 0));
        assert_eq!(cell_origin(5, 100, (u32::MAX, 1)), (u32::MAX, 0));
    }

    #[test]
    fn test_compose_five_thumbnails() {
        let thumbnails: Vec<Thumbnail> = (0..5).map(|i| solid(100, 100, (i + 1) * 40)).collect();
        let canvas = compose_grid(&thumbnails, 4).unwrap();

        assert_eq!(canvas.dimensions(), (400, 200));
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([40, 40, 40]));
        assert_eq!(*canvas.get_pixel(399, 99), Rgb([160, 160, 160]));
        // 第 5 張位於第二列開頭
        assert_eq!(*canvas.get_pixel(0, 100), Rgb([200, 200, 200]));
        assert_eq!(*canvas.get_pixel(99, 199), Rgb([200, 200, 200]));
        // 空格維持黑色
        assert_eq!(*canvas.get_pixel(100, 100), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_compose_empty_input() {
        assert_eq!(compose_grid(&[], 4), Err(ComposeError::EmptyInput));
    }

    #[test]
    fn test_compose_zero_row_size() {
        let thumbnails = vec![solid(10, 10, 1)];
        assert_eq!(compose_grid(&thumbnails, 0), Err(ComposeError::InvalidRowSize));
    }

    #[test]
    fn test_compose_mismatched_sizes_use_first_cell() {
        let thumbnails = vec![solid(100, 50, 10), solid(100, 80, 20)];
        let canvas = compose_grid(&thumbnails, 1).unwrap();

        // 畫布只依第一張計算
        assert_eq!(canvas.dimensions(), (100, 100));
        assert_eq!(*canvas.get_pixel(0, 49), Rgb([10, 10, 10]));
        assert_eq!(*canvas.get_pixel(0, 99), Rgb([20, 20, 20]));
    }

    #[test]
    fn test_compose_does_not_modify_inputs() {
        let thumbnails = vec![solid(4, 4, 7), solid(4, 4, 9)];
        let _ = compose_grid(&thumbnails, 2).unwrap();
        assert!(thumbnails[0].image.pixels().all(|p| *p == Rgb([7, 7, 7])));
    }
}
