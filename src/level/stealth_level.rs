/// 潛行關卡檔案格式
///
/// 牆壁為 `[x, y, w, h]`，巡邏代理人以 `a`、`b` 兩端點描述，
/// 可以是單層（頂層 walls/agents）或多層（floors 陣列）。
use serde::{Deserialize, Serialize};
use std::path::Path;
use vek::Vec2;

use crate::config::load_by_extension;
use crate::error::{Result, VisionError};
use crate::vision::{Agent, AgentTable, ColliderTable, Rect};

fn default_speed() -> f32 {
    80.0
}

fn default_fov_deg() -> f32 {
    60.0
}

fn default_cone_len() -> f32 {
    260.0
}

/// 世界大小
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorldSize {
    pub w: f32,
    pub h: f32,
}

impl Default for WorldSize {
    fn default() -> Self {
        Self { w: 1400.0, h: 2200.0 }
    }
}

/// 關卡中的巡邏代理人
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelAgent {
    /// 巡邏起點
    pub a: [f32; 2],
    /// 巡邏終點
    pub b: [f32; 2],
    /// 巡邏速度（核心不使用）
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// 完整視角（度）
    #[serde(default = "default_fov_deg")]
    pub fov_deg: f32,
    /// 視錐長度
    #[serde(default = "default_cone_len")]
    pub cone_len: f32,
}

impl LevelAgent {
    /// 站在起點、看向終點
    pub fn to_agent(&self) -> Agent {
        Agent::looking_at(
            Vec2::new(self.a[0], self.a[1]),
            Vec2::new(self.b[0], self.b[1]),
            self.fov_deg,
            self.cone_len,
        )
    }
}

/// 單一樓層
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FloorData {
    #[serde(default)]
    pub walls: Vec<[f32; 4]>,
    #[serde(default)]
    pub colliders: Vec<[f32; 4]>,
    #[serde(default)]
    pub agents: Vec<LevelAgent>,
}

impl FloorData {
    /// 牆壁在前、額外碰撞體在後
    pub fn rects(&self) -> Vec<Rect> {
        self.walls
            .iter()
            .chain(self.colliders.iter())
            .map(|&r| Rect::from(r))
            .collect()
    }

    pub fn agents(&self) -> Vec<Agent> {
        self.agents.iter().map(LevelAgent::to_agent).collect()
    }

    pub fn collider_table(&self, capacity: usize) -> ColliderTable {
        ColliderTable::from_rects(&self.rects(), capacity)
    }

    pub fn agent_table(&self, capacity: usize) -> AgentTable {
        AgentTable::from_agents(self.agents(), capacity)
    }
}

/// 關卡資料
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LevelData {
    #[serde(default)]
    pub world: WorldSize,
    /// 初始樓層
    #[serde(default)]
    pub start_floor: usize,
    #[serde(default)]
    pub walls: Vec<[f32; 4]>,
    #[serde(default)]
    pub agents: Vec<LevelAgent>,
    #[serde(default)]
    pub floors: Vec<FloorData>,
}

impl LevelData {
    /// 依副檔名載入（.json / .yaml / .yml）
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let level: LevelData = load_by_extension(path)?;
        log::info!(
            "載入關卡 {}：{} 層",
            path.display(),
            level.floor_count()
        );
        Ok(level)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// 沒有 floors 時頂層內容即為唯一一層
    pub fn floor_count(&self) -> usize {
        if self.floors.is_empty() {
            1
        } else {
            self.floors.len()
        }
    }

    /// 初始樓層，超出範圍時夾到最後一層
    pub fn start_floor_index(&self) -> usize {
        self.start_floor.min(self.floor_count() - 1)
    }

    pub fn floor(&self, index: usize) -> Result<FloorData> {
        if self.floors.is_empty() {
            if index == 0 {
                return Ok(FloorData {
                    walls: self.walls.clone(),
                    colliders: Vec::new(),
                    agents: self.agents.clone(),
                });
            }
        } else if let Some(floor) = self.floors.get(index) {
            return Ok(floor.clone());
        }
        Err(VisionError::FloorOutOfRange {
            index,
            count: self.floor_count(),
        })
    }
}
