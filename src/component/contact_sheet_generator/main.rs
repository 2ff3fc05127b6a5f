use super::grid_composer::compose_grid;
use super::thumbnail_renderer::{Thumbnail, render_thumbnail};
use super::video_sampler::{SampledFrame, sample_frames};
use super::video_source::{FfmpegVideoSource, FrameSource};
use crate::config::ContactSheetSettings;
use crate::tools::{ensure_parent_exists, validate_file_exists};
use anyhow::{Context, Result, bail};
use console::style;
use image::RgbImage;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 預覽圖生成結果
#[derive(Debug)]
pub struct GenerationResult {
    pub output_path: PathBuf,
    pub sampled: usize,
    pub width: u32,
    pub height: u32,
}

/// 合併完成的預覽圖
#[derive(Debug, Clone)]
pub struct ContactSheet {
    pub image: RgbImage,
    /// 實際取樣的幀索引（依順序）
    pub frame_indices: Vec<u64>,
}

/// 預覽圖生成器
///
/// 四階段流程：
/// A. 開啟影片（ffprobe）
/// B. 均勻取樣畫面
/// C. 繪製縮圖與時間標籤
/// D. 合併為網格預覽圖
pub struct ContactSheetGenerator {
    settings: ContactSheetSettings,
    quiet: bool,
}

impl ContactSheetGenerator {
    pub const fn new(settings: ContactSheetSettings, quiet: bool) -> Self {
        Self { settings, quiet }
    }

    /// 生成預覽圖並寫入檔案
    pub fn run(&self, video_path: &Path, output_path: &Path) -> Result<GenerationResult> {
        let sheet = self.generate(video_path)?;

        self.stage("E", "寫入預覽圖...");
        ensure_parent_exists(output_path)?;
        sheet
            .image
            .save(output_path)
            .with_context(|| format!("無法寫入預覽圖: {}", output_path.display()))?;
        self.done(&output_path.display().to_string());

        info!("預覽圖已建立: {}", output_path.display());

        let (width, height) = sheet.image.dimensions();
        Ok(GenerationResult {
            output_path: output_path.to_path_buf(),
            sampled: sheet.frame_indices.len(),
            width,
            height,
        })
    }

    /// 從影片檔案生成預覽圖
    pub fn generate(&self, video_path: &Path) -> Result<ContactSheet> {
        validate_file_exists(video_path)?;

        self.stage("A", "讀取影片資訊...");
        let source = FfmpegVideoSource::open(video_path)
            .with_context(|| format!("無法讀取影片資訊: {}", video_path.display()))?;
        let info = source.info();
        self.done(&format!(
            "{}x{}, {:.2} fps, {} 幀",
            info.width, info.height, info.frame_rate, info.frame_count
        ));

        self.generate_from_source(source)
            .with_context(|| format!("處理影片失敗: {}", video_path.display()))
    }

    /// 從任意畫面來源生成預覽圖，來源在取樣結束後即釋放
    pub fn generate_from_source<S: FrameSource>(&self, source: S) -> Result<ContactSheet> {
        self.stage("B", "擷取畫面...");
        let samples = sample_frames(source, self.settings.thumbnail_count);
        if samples.is_empty() {
            bail!("無法從影片讀取任何畫面");
        }
        self.done(&format!(
            "取得 {}/{} 張",
            samples.len(),
            self.settings.thumbnail_count
        ));

        let frame_indices: Vec<u64> = samples.iter().map(|sample| sample.index).collect();

        self.stage("C", "繪製縮圖...");
        let thumbnails = self.render_all(samples);
        self.done("完成");

        self.stage("D", "合併預覽圖...");
        let image = compose_grid(&thumbnails, self.settings.row_size).context("合併預覽圖失敗")?;
        self.done(&format!("{}x{}", image.width(), image.height()));

        Ok(ContactSheet {
            image,
            frame_indices,
        })
    }

    /// 平行繪製所有縮圖，輸出順序與取樣順序相同
    fn render_all(&self, samples: Vec<SampledFrame>) -> Vec<Thumbnail> {
        let render_settings = self.settings.render_settings();
        let progress_bar = self.progress_bar(samples.len() as u64);

        let thumbnails: Vec<Thumbnail> = samples
            .into_par_iter()
            .map(|sample| {
                let label = sample.timestamp.to_string();
                let thumbnail = render_thumbnail(sample.frame, &label, &render_settings);
                progress_bar.inc(1);
                thumbnail
            })
            .collect();

        progress_bar.finish_and_clear();
        thumbnails
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let progress_bar = ProgressBar::new(len);
        if let Ok(progress_style) = ProgressStyle::default_bar()
            .template("    [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            progress_bar.set_style(progress_style.progress_chars("#>-"));
        }
        progress_bar
    }

    fn stage(&self, label: &str, message: &str) {
        if !self.quiet {
            println!("  {} {}", style(label).dim(), message);
        }
    }

    fn done(&self, message: &str) {
        if !self.quiet {
            println!("    {} {}", style("✓").green(), message);
        }
    }
}
