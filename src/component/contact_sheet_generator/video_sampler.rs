use super::video_source::FrameSource;
use crate::tools::Timestamp;
use image::RgbImage;
use log::debug;

/// 取樣得到的單一畫面
#[derive(Debug, Clone)]
pub struct SampledFrame {
    pub index: u64,
    pub frame: RgbImage,
    pub timestamp: Timestamp,
}

/// 計算取樣間隔（整數除法）
///
/// `count` 大於總幀數時間隔為 0，會重複取到第 0 幀
#[must_use]
pub const fn compute_stride(total_frames: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    total_frames / count as u64
}

/// 預計取樣的幀索引，數量不超過 `count` 與總幀數
#[must_use]
pub fn planned_indices(total_frames: u64, count: usize) -> Vec<u64> {
    let stride = compute_stride(total_frames, count);
    let limit = (count as u64).min(total_frames);
    (0..limit).map(|i| i * stride).collect()
}

/// 從影片來源均勻取樣 `count` 張畫面
///
/// 任何一次讀取失敗就停止並回傳已取得的部分。
/// 來源在函式結束時一律釋放。
pub fn sample_frames<S: FrameSource>(mut source: S, count: usize) -> Vec<SampledFrame> {
    let total_frames = source.frame_count();
    let frame_rate = source.frame_rate();
    let indices = planned_indices(total_frames, count);

    debug!(
        "取樣設定: total={total_frames}, count={count}, stride={}",
        compute_stride(total_frames, count)
    );

    let mut samples = Vec::with_capacity(indices.len());

    for index in indices {
        source.seek(index);
        match source.read_frame() {
            Ok(frame) => samples.push(SampledFrame {
                index,
                frame,
                timestamp: Timestamp::from_frame_index(index, frame_rate),
            }),
            Err(e) => {
                debug!("第 {index} 幀讀取失敗，停止取樣: {e:#}");
                break;
            }
        }
    }

    debug!("取樣完成: {} 張", samples.len());

    samples
}
