use crate::component::contact_sheet_generator::RenderSettings;
use anyhow::{Result, bail};
use image::Rgb;
use serde::Deserialize;

/// 預設設定檔名稱（位於目前工作目錄）
pub const DEFAULT_SETTINGS_FILE: &str = "contact_sheet.json";

pub const DEFAULT_THUMBNAIL_COUNT: usize = 32;
pub const DEFAULT_ROW_SIZE: usize = 4;
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 320;

/// 時間標籤左上角位置（像素）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LabelPosition {
    pub x: u32,
    pub y: u32,
}

impl Default for LabelPosition {
    fn default() -> Self {
        Self { x: 8, y: 8 }
    }
}

/// 預覽圖設定
///
/// 所有欄位都有預設值，設定檔只需寫要覆寫的部分
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactSheetSettings {
    /// 要擷取的縮圖數量
    pub thumbnail_count: usize,
    /// 每列縮圖數量
    pub row_size: usize,
    /// 縮圖長邊的最大像素
    pub thumbnail_size: u32,
    /// 時間標籤顏色 (R, G, B)
    pub label_color: [u8; 3],
    pub label_position: LabelPosition,
    /// 字型放大倍率，1 代表 5x7 像素字形
    pub label_scale: u32,
    /// 是否在標籤下方繪製黑色陰影
    pub label_shadow: bool,
    /// 自動命名時使用的副檔名
    pub output_extension: String,
}

impl Default for ContactSheetSettings {
    fn default() -> Self {
        Self {
            thumbnail_count: DEFAULT_THUMBNAIL_COUNT,
            row_size: DEFAULT_ROW_SIZE,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            label_color: [255, 255, 255],
            label_position: LabelPosition::default(),
            label_scale: 2,
            label_shadow: true,
            output_extension: "jpg".to_string(),
        }
    }
}

impl ContactSheetSettings {
    /// 以命令列參數覆寫設定值（`None` 表示保留原值）
    pub fn apply_overrides(
        &mut self,
        thumbnail_count: Option<usize>,
        row_size: Option<usize>,
        thumbnail_size: Option<u32>,
    ) {
        if let Some(count) = thumbnail_count {
            self.thumbnail_count = count;
        }
        if let Some(row_size) = row_size {
            self.row_size = row_size;
        }
        if let Some(size) = thumbnail_size {
            self.thumbnail_size = size;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.thumbnail_count == 0 {
            bail!("縮圖數量必須大於 0");
        }
        if self.row_size == 0 {
            bail!("每列縮圖數量必須大於 0");
        }
        if self.thumbnail_size == 0 {
            bail!("縮圖尺寸必須大於 0");
        }
        if self.label_scale == 0 {
            bail!("標籤倍率必須大於 0");
        }
        if self.output_extension.trim_start_matches('.').is_empty() {
            bail!("輸出副檔名不可為空");
        }
        Ok(())
    }

    #[must_use]
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            max_size: self.thumbnail_size,
            label_color: Rgb(self.label_color),
            label_position: (self.label_position.x, self.label_position.y),
            label_scale: self.label_scale,
            label_shadow: self.label_shadow,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: ContactSheetSettings,
}
