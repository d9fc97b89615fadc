/// 視野核心
///
/// 每個 (代理人, 射線) 格子是兩個唯讀表與兩個索引的純函數：
/// 推導射線、暴力掃描所有障礙物、取最近命中、除以視錐長度。
/// 沒有空間加速結構，也不配置記憶體。
use super::agent::{Agent, AgentTable};
use super::collider::{ColliderTable, Rect};
use super::intersect::{ray_rect_intersection, Ray};
use crate::config::{DegeneratePolicy, KernelConfig};

/// 單次派發的核心快照
#[derive(Debug, Clone, Copy)]
pub struct VisibilityKernel<'a> {
    agents: &'a [Agent],
    colliders: &'a [Rect],
    ray_count: usize,
    policy: DegeneratePolicy,
}

impl<'a> VisibilityKernel<'a> {
    /// 套用設定中的容量上限，超出部分直接截斷
    pub fn new(agents: &'a AgentTable, colliders: &'a ColliderTable, config: &KernelConfig) -> Self {
        let agents = agents.as_slice();
        let agent_count = agents.len().min(config.agent_capacity);
        Self {
            agents: &agents[..agent_count],
            colliders: colliders.active_up_to(config.collider_capacity),
            ray_count: config.ray_count,
            policy: config.degenerate,
        }
    }

    /// 直接以切片建立（不套用容量）
    pub fn from_slices(
        agents: &'a [Agent],
        colliders: &'a [Rect],
        ray_count: usize,
        policy: DegeneratePolicy,
    ) -> Self {
        Self {
            agents,
            colliders,
            ray_count,
            policy,
        }
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    /// 計算一格的正規化距離
    ///
    /// 超出代理人表的索引視為無代理人，回傳 1.0。
    #[inline]
    pub fn evaluate(&self, agent_index: usize, ray_index: usize) -> f32 {
        match self.agents.get(agent_index) {
            Some(agent) => evaluate_agent_ray(agent, ray_index, self.ray_count, self.colliders, self.policy),
            None => 1.0,
        }
    }

    /// 未正規化的命中距離
    pub fn hit_distance(&self, agent_index: usize, ray_index: usize) -> Option<f32> {
        let agent = self.agents.get(agent_index)?;
        let ray = agent.ray(ray_index, self.ray_count, self.policy);
        Some(nearest_hit(&ray, self.colliders, agent.cone_length))
    }
}

/// 沿射線取最近的有效命中；無命中時回傳 `max_t`
#[inline]
pub fn nearest_hit(ray: &Ray, colliders: &[Rect], max_t: f32) -> f32 {
    let mut best = max_t;
    for rect in colliders {
        if let Some(t) = ray_rect_intersection(ray.origin, ray.direction, rect, max_t) {
            if t < best {
                best = t;
            }
        }
    }
    best
}

/// 單一代理人、單一射線的正規化結果
#[inline]
pub fn evaluate_agent_ray(
    agent: &Agent,
    ray_index: usize,
    ray_count: usize,
    colliders: &[Rect],
    policy: DegeneratePolicy,
) -> f32 {
    match policy {
        DegeneratePolicy::Passthrough => {
            let ray = agent.ray(ray_index, ray_count, policy);
            nearest_hit(&ray, colliders, agent.cone_length) / agent.cone_length
        }
        DegeneratePolicy::Clamp => {
            if agent.is_degenerate() {
                return 1.0;
            }
            let ray = agent.ray(ray_index, ray_count, policy);
            let ratio = nearest_hit(&ray, colliders, agent.cone_length) / agent.cone_length;
            if ratio.is_finite() {
                ratio.clamp(0.0, 1.0)
            } else {
                1.0
            }
        }
    }
}
