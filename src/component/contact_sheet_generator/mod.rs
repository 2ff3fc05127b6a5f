//! 影片預覽圖生成元件
//!
//! 流程：
//! A. 取得影片資訊（ffprobe）
//! B. 依固定間隔取樣畫面（ffmpeg 原始畫面輸出）
//! C. 縮小畫面並加上時間標籤
//! D. 合併為網格預覽圖

mod grid_composer;
mod label_font;
mod main;
mod thumbnail_renderer;
mod video_sampler;
mod video_source;

pub use grid_composer::{ComposeError, cell_origin, compose_grid, grid_dimensions};
pub use label_font::draw_text;
pub use main::{ContactSheet, ContactSheetGenerator, GenerationResult};
pub use thumbnail_renderer::{RenderSettings, Thumbnail, fit_dimensions, render_thumbnail};
pub use video_sampler::{SampledFrame, compute_stride, planned_indices, sample_frames};
pub use video_source::{FfmpegVideoSource, FrameSource};
