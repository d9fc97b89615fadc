/// 視野輸出網格
///
/// 邏輯索引為 `[agent][ray]`，每個代理人佔一段連續的 `stride` 格。
/// Padded 模式下每段最後一格為填充值 1.0，不對應任何射線。
use serde::{Deserialize, Serialize};
use vek::Vec2;

use super::agent::Agent;
use crate::config::{DegeneratePolicy, StrideMode};

/// 填充格的值（視為無遮擋）
pub const PADDING_VALUE: f32 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputGrid {
    agent_count: usize,
    ray_count: usize,
    stride_mode: StrideMode,
    cells: Vec<f32>,
}

impl OutputGrid {
    /// 建立全部為 1.0 的網格
    pub fn new(agent_count: usize, ray_count: usize, stride_mode: StrideMode) -> Self {
        let stride = stride_mode.stride(ray_count);
        Self {
            agent_count,
            ray_count,
            stride_mode,
            cells: vec![PADDING_VALUE; agent_count * stride],
        }
    }

    pub fn agent_count(&self) -> usize {
        self.agent_count
    }

    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    pub fn stride_mode(&self) -> StrideMode {
        self.stride_mode
    }

    pub fn stride(&self) -> usize {
        self.stride_mode.stride(self.ray_count)
    }

    /// 宿主讀回的原始緩衝區（含填充格）
    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.cells
    }

    pub fn get(&self, agent_index: usize, ray_index: usize) -> Option<f32> {
        if agent_index >= self.agent_count || ray_index >= self.ray_count {
            return None;
        }
        self.cells.get(agent_index * self.stride() + ray_index).copied()
    }

    /// 某代理人的所有射線結果（不含填充格）
    pub fn row(&self, agent_index: usize) -> Option<&[f32]> {
        if agent_index >= self.agent_count {
            return None;
        }
        let start = agent_index * self.stride();
        self.cells.get(start..start + self.ray_count)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.agent_count).filter_map(move |a| self.row(a))
    }

    /// 被遮擋（< 1.0）的射線數
    pub fn blocked_count(&self) -> usize {
        self.rows()
            .map(|row| row.iter().filter(|&&v| v < 1.0).count())
            .sum()
    }

    /// 依射線順序重建世界座標命中點（手電筒多邊形的外緣）
    pub fn hit_points(&self, agent_index: usize, agent: &Agent, policy: DegeneratePolicy) -> Vec<Vec2<f32>> {
        let row = match self.row(agent_index) {
            Some(row) => row,
            None => return Vec::new(),
        };

        row.iter()
            .enumerate()
            .map(|(t, &value)| {
                let ray = agent.ray(t, self.ray_count, policy);
                ray.at(value * agent.cone_length)
            })
            .collect()
    }

    /// 可見扇形：原點 + 依序的命中點
    pub fn visibility_polygon(&self, agent_index: usize, agent: &Agent, policy: DegeneratePolicy) -> Vec<Vec2<f32>> {
        let hits = self.hit_points(agent_index, agent, policy);
        if hits.is_empty() {
            return hits;
        }
        let mut polygon = Vec::with_capacity(hits.len() + 1);
        polygon.push(agent.origin);
        polygon.extend(hits);
        polygon
    }
}

/// 多邊形面積（鞋帶公式）
pub fn polygon_area(vertices: &[Vec2<f32>]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = vertices.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i].x * vertices[j].y;
        area -= vertices[j].x * vertices[i].y;
    }

    area.abs() / 2.0
}
