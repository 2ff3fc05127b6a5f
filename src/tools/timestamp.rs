use std::fmt;

/// 影片中的時間位置（毫秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    millis: u64,
}

impl Timestamp {
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// 由幀索引與幀率換算時間，幀率無效時視為 0
    #[must_use]
    pub fn from_frame_index(index: u64, frame_rate: f64) -> Self {
        if frame_rate <= 0.0 || !frame_rate.is_finite() {
            return Self::default();
        }
        let millis = (index as f64 * 1000.0 / frame_rate).round() as u64;
        Self { millis }
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.millis
    }
}

/// 以 `H:MM:SS` 顯示，不足一秒的部分直接捨去
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_seconds = self.millis / 1000;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        write!(f, "{hours}:{minutes:02}:{seconds:02}")
    }
}
