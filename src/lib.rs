/// Open MOBA 視錐視野核心
///
/// 為多個代理人沿視錐內固定數量的射線計算可視距離，
/// 障礙物為軸對齊矩形，輸出為正規化距離網格。

pub mod config;
pub mod error;
pub mod level;
pub mod vision;

pub use crate::config::{DegeneratePolicy, KernelConfig, StrideMode, MAX_AGENTS, MAX_COLLIDERS};
pub use crate::error::{Result, VisionError};
pub use crate::level::LevelData;
pub use crate::vision::*;
