/// 視野核心錯誤類型
///
/// 只有邊界操作（讀檔、解析、建表）會失敗，核心計算本身永不回傳錯誤
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("無法讀取檔案 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("不支援的檔案格式: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("TOML 解析失敗: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML 解析失敗: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON 解析失敗: {0}")]
    Json(#[from] serde_json::Error),

    #[error("設定無效: {0}")]
    InvalidConfig(String),

    #[error("障礙物數量 {count} 超過容量上限 {capacity}")]
    ColliderCapacityExceeded { count: usize, capacity: usize },

    #[error("樓層索引 {index} 超出範圍（共 {count} 層）")]
    FloorOutOfRange { index: usize, count: usize },

    #[error("建立執行緒池失敗: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, VisionError>;
