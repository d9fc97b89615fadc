/// 設定模組
///
/// 核心參數設定與依副檔名載入的共用工具
pub mod kernel_config;

pub use kernel_config::*;

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{Result, VisionError};

/// 依副檔名選擇解析器（.toml / .yaml / .yml / .json）
pub fn load_by_extension<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| VisionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("toml") => Ok(toml::from_str(&content)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        _ => Err(VisionError::UnsupportedFormat(path.to_path_buf())),
    }
}
