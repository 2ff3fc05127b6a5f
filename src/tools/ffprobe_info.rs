use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// 無法取得幀率時使用的預設值
const FALLBACK_FRAME_RATE: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct VideoInfo {
    pub duration_seconds: f64,
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
    pub frame_count: u64,
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
    duration: Option<String>,
    nb_frames: Option<String>,
}

/// 使用 ffprobe 取得影片資訊
pub fn get_video_info(path: &Path) -> Result<VideoInfo> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .with_context(|| format!("無法執行 ffprobe: {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe 執行失敗: {}", stderr.trim());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_probe_output(&stdout).with_context(|| format!("無法解析影片資訊: {}", path.display()))
}

fn parse_probe_output(json: &str) -> Result<VideoInfo> {
    let probe: FfprobeOutput = serde_json::from_str(json).context("無法解析 ffprobe 輸出")?;

    // 找到視訊串流
    let video_stream = probe
        .streams
        .as_ref()
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some("video"))
        })
        .ok_or_else(|| anyhow::anyhow!("找不到視訊串流"))?;

    let width = video_stream
        .width
        .filter(|&w| w > 0)
        .ok_or_else(|| anyhow::anyhow!("無法取得影片寬度"))?;
    let height = video_stream
        .height
        .filter(|&h| h > 0)
        .ok_or_else(|| anyhow::anyhow!("無法取得影片高度"))?;

    // 影片長度優先從 format 取得，其次從 stream
    let duration_seconds = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .or(video_stream.duration.as_ref())
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    let frame_rate = video_stream
        .r_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .or_else(|| {
            video_stream
                .avg_frame_rate
                .as_deref()
                .and_then(parse_frame_rate)
        })
        .unwrap_or(FALLBACK_FRAME_RATE);

    // 容器沒有記錄幀數（例如 mkv）時以長度估算
    let frame_count = video_stream
        .nb_frames
        .as_deref()
        .and_then(|n| n.parse::<u64>().ok())
        .filter(|&n| n > 0)
        .unwrap_or_else(|| estimate_frame_count(duration_seconds, frame_rate));

    Ok(VideoInfo {
        duration_seconds,
        width,
        height,
        frame_rate,
        frame_count,
    })
}

/// 解析幀率字串（例如 "30/1" 或 "30000/1001"）
fn parse_frame_rate(rate: &str) -> Option<f64> {
    if let Some((num_str, den_str)) = rate.split_once('/') {
        let num: f64 = num_str.parse().ok()?;
        let den: f64 = den_str.parse().ok()?;
        if den > 0.0 && num > 0.0 {
            return Some(num / den);
        }
        return None;
    }
    rate.parse().ok().filter(|&r: &f64| r > 0.0)
}

fn estimate_frame_count(duration_seconds: f64, frame_rate: f64) -> u64 {
    if duration_seconds <= 0.0 || frame_rate <= 0.0 {
        return 0;
    }
    (duration_seconds * frame_rate).round() as u64
}
