use std::path::{Path, PathBuf};

const FALLBACK_STEM: &str = "contact_sheet";

/// 決定預覽圖輸出路徑
///
/// 有指定輸出名稱就直接使用，否則取影片檔名（不含路徑）並替換副檔名
#[must_use]
pub fn derive_output_path(video_path: &Path, explicit: Option<&Path>, extension: &str) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let stem = video_path
        .file_stem()
        .map_or_else(|| FALLBACK_STEM.to_string(), |s| s.to_string_lossy().to_string());
    let extension = extension.trim_start_matches('.');

    PathBuf::from(format!("{stem}.{extension}"))
}
