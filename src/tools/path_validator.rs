use anyhow::{Context, Result, bail};
use std::path::Path;

pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_file() {
        bail!("路徑不是檔案: {}", path.display());
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("無法建立資料夾: {}", path.display()))?;
    }
    Ok(())
}

/// 確保輸出檔案所在的資料夾存在
pub fn ensure_parent_exists(file_path: &Path) -> Result<()> {
    match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory_exists(parent),
        _ => Ok(()),
    }
}
