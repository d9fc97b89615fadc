use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VisionError};

/// 單次派發可掃描的障礙物上限
pub const MAX_COLLIDERS: usize = 512;
/// 代理人參數表預設容量
pub const MAX_AGENTS: usize = 1024;
/// 每個代理人預設射線數
pub const DEFAULT_RAY_COUNT: usize = 64;

/// 輸出網格每列的步距
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrideMode {
    /// 每個代理人 `ray_count` 格
    Packed,
    /// 每個代理人 `ray_count + 1` 格，最後一格為填充值 1.0
    Padded,
}

impl StrideMode {
    pub fn stride(self, ray_count: usize) -> usize {
        match self {
            StrideMode::Packed => ray_count,
            StrideMode::Padded => ray_count + 1,
        }
    }
}

impl Default for StrideMode {
    fn default() -> Self {
        StrideMode::Packed
    }
}

/// 退化輸入（錐長 <= 0、單射線、非有限數值）的處理方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// 輸出一律落在 [0, 1]
    Clamp,
    /// 保留原始算術結果（可能為 NaN）
    Passthrough,
}

impl Default for DegeneratePolicy {
    fn default() -> Self {
        DegeneratePolicy::Clamp
    }
}

/// 視野核心設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KernelConfig {
    /// 每個代理人的射線數
    pub ray_count: usize,
    /// 障礙物掃描上限，超出部分會被截斷
    pub collider_capacity: usize,
    /// 代理人表容量，超出部分會被截斷
    pub agent_capacity: usize,
    /// 輸出步距
    pub stride: StrideMode,
    /// 退化輸入處理
    pub degenerate: DegeneratePolicy,
    /// 執行緒數，0 代表使用 CPU 核心數
    pub num_threads: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            ray_count: DEFAULT_RAY_COUNT,
            collider_capacity: MAX_COLLIDERS,
            agent_capacity: MAX_AGENTS,
            stride: StrideMode::Packed,
            degenerate: DegeneratePolicy::Clamp,
            num_threads: 0,
        }
    }
}

impl KernelConfig {
    /// 以射線數建立預設設定
    pub fn with_ray_count(ray_count: usize) -> Self {
        Self {
            ray_count,
            ..Self::default()
        }
    }

    pub fn with_stride(mut self, stride: StrideMode) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_degenerate(mut self, degenerate: DegeneratePolicy) -> Self {
        self.degenerate = degenerate;
        self
    }

    pub fn with_collider_capacity(mut self, capacity: usize) -> Self {
        self.collider_capacity = capacity;
        self
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// 從檔案載入並驗證
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config: KernelConfig = super::load_by_extension(path)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構時檢查，派發期間不再做任何驗證
    pub fn validate(&self) -> Result<()> {
        if self.ray_count < 2 {
            return Err(VisionError::InvalidConfig(format!(
                "ray_count 必須 >= 2，目前為 {}",
                self.ray_count
            )));
        }
        if self.collider_capacity == 0 {
            return Err(VisionError::InvalidConfig("collider_capacity 不可為 0".to_string()));
        }
        if self.agent_capacity == 0 {
            return Err(VisionError::InvalidConfig("agent_capacity 不可為 0".to_string()));
        }
        Ok(())
    }

    /// 輸出網格每列格數
    pub fn stride(&self) -> usize {
        self.stride.stride(self.ray_count)
    }

    /// 實際使用的執行緒數
    pub fn thread_count(&self) -> usize {
        if self.num_threads == 0 {
            num_cpus::get()
        } else {
            self.num_threads
        }
    }
}
