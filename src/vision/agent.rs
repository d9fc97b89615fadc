/// 代理人參數表
///
/// 每個代理人提供原點、朝向、半視角與視錐長度，派發期間唯讀
use serde::{Deserialize, Serialize};
use vek::Vec2;

use super::intersect::Ray;
use crate::config::{DegeneratePolicy, MAX_AGENTS};

/// 視錐代理人
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    /// 原點
    pub origin: Vec2<f32>,
    /// 朝向（弧度）
    pub facing_angle: f32,
    /// 半視角（弧度）
    pub half_fov: f32,
    /// 視錐長度，需 > 0
    pub cone_length: f32,
}

impl Agent {
    pub fn new(origin: Vec2<f32>, facing_angle: f32, half_fov: f32, cone_length: f32) -> Self {
        Self {
            origin,
            facing_angle,
            half_fov,
            cone_length,
        }
    }

    /// 以完整視角（度）建立
    pub fn from_fov_degrees(origin: Vec2<f32>, facing_angle: f32, fov_deg: f32, cone_length: f32) -> Self {
        Self::new(origin, facing_angle, (fov_deg * 0.5).to_radians(), cone_length)
    }

    /// 站在 `origin` 看向 `target`；兩點重合時朝向 +X
    pub fn looking_at(origin: Vec2<f32>, target: Vec2<f32>, fov_deg: f32, cone_length: f32) -> Self {
        let look = target - origin;
        let facing = if look.magnitude_squared() == 0.0 {
            0.0
        } else {
            look.y.atan2(look.x)
        };
        Self::from_fov_degrees(origin, facing, fov_deg, cone_length)
    }

    /// 視錐長度不是正有限值時無法正規化
    pub fn is_degenerate(&self) -> bool {
        !(self.cone_length.is_finite() && self.cone_length > 0.0)
    }

    /// 第 `slot` 條射線的角度
    ///
    /// 第 0 條為 `facing + half_fov`（左緣），最後一條為 `facing - half_fov`（右緣）。
    /// 單射線時 Clamp 取朝向本身，Passthrough 保留 0/0 的結果。
    pub fn ray_angle(&self, slot: usize, ray_count: usize, policy: DegeneratePolicy) -> f32 {
        let start = self.facing_angle + self.half_fov;
        let end = self.facing_angle - self.half_fov;

        if ray_count <= 1 && policy == DegeneratePolicy::Clamp {
            return self.facing_angle;
        }

        let frac = slot as f32 / (ray_count as f32 - 1.0);
        start * (1.0 - frac) + end * frac
    }

    pub fn ray(&self, slot: usize, ray_count: usize, policy: DegeneratePolicy) -> Ray {
        Ray::from_angle(self.origin, self.ray_angle(slot, ray_count, policy))
    }
}

/// 代理人表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentTable {
    agents: Vec<Agent>,
    capacity: usize,
}

impl AgentTable {
    pub fn new() -> Self {
        Self::with_capacity(MAX_AGENTS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            agents: Vec::new(),
            capacity,
        }
    }

    /// 超出容量的代理人會被截斷
    pub fn from_agents(agents: Vec<Agent>, capacity: usize) -> Self {
        let mut agents = agents;
        if agents.len() > capacity {
            log::warn!(
                "代理人數量 {} 超過容量 {}，多餘的將被忽略",
                agents.len(),
                capacity
            );
            agents.truncate(capacity);
        }
        Self { agents, capacity }
    }

    /// 單一代理人（單代理人版本等同長度為 1 的表）
    pub fn single(agent: Agent) -> Self {
        Self {
            agents: vec![agent],
            capacity: 1,
        }
    }

    pub fn push(&mut self, agent: Agent) -> bool {
        if self.agents.len() >= self.capacity {
            return false;
        }
        self.agents.push(agent);
        true
    }

    /// 宿主在兩次派發之間更新代理人
    pub fn set(&mut self, index: usize, agent: Agent) -> bool {
        match self.agents.get_mut(index) {
            Some(slot) => {
                *slot = agent;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}
