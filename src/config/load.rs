use crate::config::types::{Config, ContactSheetSettings, DEFAULT_SETTINGS_FILE};
use anyhow::{Context, Result, bail};
use log::debug;
use std::fs;
use std::path::Path;

impl Config {
    /// 載入設定
    ///
    /// 指定路徑時檔案必須存在；否則讀取工作目錄下的預設設定檔，
    /// 不存在就使用內建預設值
    pub fn new(explicit_path: Option<&Path>) -> Result<Self> {
        let settings = match explicit_path {
            Some(path) => {
                if !path.is_file() {
                    bail!("設定檔不存在: {}", path.display());
                }
                Self::load_settings(path)?
            }
            None => {
                let path = Path::new(DEFAULT_SETTINGS_FILE);
                if path.is_file() {
                    Self::load_settings(path)?
                } else {
                    ContactSheetSettings::default()
                }
            }
        };

        Ok(Self { settings })
    }

    fn load_settings(path: &Path) -> Result<ContactSheetSettings> {
        debug!("讀取設定檔: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}
