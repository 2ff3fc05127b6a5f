use crate::tools::{VideoInfo, get_video_info};
use anyhow::{Context, Result, anyhow, bail};
use image::RgbImage;
use log::debug;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

/// 可依幀索引讀取畫面的影片來源
///
/// 擁有者負責釋放底層資源（實作端在 `Drop` 中關閉）
pub trait FrameSource {
    /// 影片總幀數，無法得知時為 0
    fn frame_count(&self) -> u64;

    fn frame_rate(&self) -> f64;

    /// 將讀取位置移到指定幀
    fn seek(&mut self, index: u64);

    /// 讀取目前位置的畫面並前進一幀
    fn read_frame(&mut self) -> Result<RgbImage>;
}

/// 正在輸出 rgb24 原始畫面的 ffmpeg 程序
struct DecoderStream {
    child: Child,
    stdout: ChildStdout,
    next_index: u64,
}

impl DecoderStream {
    fn shutdown(mut self) {
        // 程序可能已自行結束，錯誤可忽略
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// 以 ffprobe 取得資訊、ffmpeg 解碼畫面的影片來源
pub struct FfmpegVideoSource {
    path: PathBuf,
    info: VideoInfo,
    position: u64,
    decoder: Option<DecoderStream>,
}

impl FfmpegVideoSource {
    pub fn open(path: &Path) -> Result<Self> {
        let info = get_video_info(path)?;

        debug!(
            "開啟影片 {}: {}x{}, {:.3} fps, {} 幀",
            path.display(),
            info.width,
            info.height,
            info.frame_rate,
            info.frame_count
        );

        Ok(Self {
            path: path.to_path_buf(),
            info,
            position: 0,
            decoder: None,
        })
    }

    #[must_use]
    pub const fn info(&self) -> &VideoInfo {
        &self.info
    }

    const fn frame_len(&self) -> usize {
        self.info.width as usize * self.info.height as usize * 3
    }

    /// 從目前位置啟動 ffmpeg 解碼程序
    fn spawn_decoder(&self) -> Result<DecoderStream> {
        let seek_seconds = seek_time(self.position, self.info.frame_rate);

        debug!(
            "啟動解碼程序: frame={}, seek={seek_seconds:.6}s",
            self.position
        );

        let mut command = Command::new("ffmpeg");
        command.args(["-hide_banner", "-loglevel", "error", "-noautorotate"]);
        if seek_seconds > 0.0 {
            command.arg("-ss").arg(format!("{seek_seconds:.6}"));
        }
        command
            .arg("-i")
            .arg(&self.path)
            .args([
                "-an",
                "-sn",
                "-dn",
                "-map",
                "0:v:0",
                "-fps_mode",
                "passthrough",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgb24",
                "-",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        let mut child = command
            .spawn()
            .with_context(|| format!("無法執行 ffmpeg 解碼: {}", self.path.display()))?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            bail!("無法取得 ffmpeg 輸出管線");
        };

        Ok(DecoderStream {
            child,
            stdout,
            next_index: self.position,
        })
    }

    fn close_decoder(&mut self) {
        if let Some(decoder) = self.decoder.take() {
            decoder.shutdown();
        }
    }
}

impl FrameSource for FfmpegVideoSource {
    fn frame_count(&self) -> u64 {
        self.info.frame_count
    }

    fn frame_rate(&self) -> f64 {
        self.info.frame_rate
    }

    fn seek(&mut self, index: u64) {
        // 解碼程序剛好停在目標位置時繼續使用
        if self
            .decoder
            .as_ref()
            .is_some_and(|decoder| decoder.next_index == index)
        {
            return;
        }
        self.close_decoder();
        self.position = index;
    }

    fn read_frame(&mut self) -> Result<RgbImage> {
        if self.decoder.is_none() {
            self.decoder = Some(self.spawn_decoder()?);
        }

        let frame_len = self.frame_len();
        let position = self.position;
        let mut buffer = vec![0u8; frame_len];
        let Some(decoder) = self.decoder.as_mut() else {
            bail!("解碼程序不存在");
        };

        if let Err(e) = decoder.stdout.read_exact(&mut buffer) {
            self.close_decoder();
            return Err(e).with_context(|| format!("無法讀取第 {position} 幀"));
        }

        let image = RgbImage::from_raw(self.info.width, self.info.height, buffer)
            .ok_or_else(|| anyhow!("畫面資料大小不符: {frame_len} bytes"))?;

        self.position += 1;
        if let Some(decoder) = self.decoder.as_mut() {
            decoder.next_index = self.position;
        }

        Ok(image)
    }
}

impl Drop for FfmpegVideoSource {
    fn drop(&mut self) {
        if self.decoder.is_some() {
            debug!("釋放影片來源: {}", self.path.display());
        }
        self.close_decoder();
    }
}

/// 計算 seek 時間（秒）
///
/// 提前半幀，避免浮點誤差跳過目標幀
fn seek_time(index: u64, frame_rate: f64) -> f64 {
    if index == 0 || frame_rate <= 0.0 {
        return 0.0;
    }
    ((index as f64 - 0.5) / frame_rate).max(0.0)
}
