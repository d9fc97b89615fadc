/// 視野派發器
///
/// 在攤平的 (代理人, 射線) 索引空間上平行執行核心。
/// 每格只寫自己的輸出，輸入表在派發期間以不可變借用鎖定。
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::agent::{Agent, AgentTable};
use super::collider::ColliderTable;
use super::kernel::VisibilityKernel;
use super::output::{OutputGrid, PADDING_VALUE};
use crate::config::KernelConfig;
use crate::error::Result;

pub struct VisionDispatcher {
    config: KernelConfig,
    thread_pool: Arc<ThreadPool>,
}

impl VisionDispatcher {
    /// 驗證設定並建立專用執行緒池
    pub fn new(config: KernelConfig) -> Result<Self> {
        config.validate()?;
        let thread_pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(config.thread_count())
                .thread_name(move |i| format!("rayon-{}", i))
                .build()?,
        );
        log::info!(
            "視野派發器已建立：{} 條射線，{} 個執行緒，障礙物上限 {}",
            config.ray_count,
            thread_pool.current_num_threads(),
            config.collider_capacity
        );
        Ok(Self { config, thread_pool })
    }

    /// 共用既有的執行緒池
    pub fn with_thread_pool(config: KernelConfig, thread_pool: Arc<ThreadPool>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, thread_pool })
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    /// 批次派發：所有代理人 × 所有射線
    pub fn dispatch(&self, agents: &AgentTable, colliders: &ColliderTable) -> OutputGrid {
        let kernel = VisibilityKernel::new(agents, colliders, &self.config);
        let mut grid = OutputGrid::new(kernel.agent_count(), self.config.ray_count, self.config.stride);
        let stride = grid.stride();
        let ray_count = self.config.ray_count;

        let started = Instant::now();
        self.thread_pool.install(|| {
            grid.cells_mut()
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, cell)| {
                    let (agent_index, ray_index) = (i / stride, i % stride);
                    *cell = if ray_index < ray_count {
                        kernel.evaluate(agent_index, ray_index)
                    } else {
                        PADDING_VALUE
                    };
                });
        });

        log::debug!(
            "派發完成：{} 代理人 × {} 射線 × {} 障礙物，耗時 {:?}",
            kernel.agent_count(),
            ray_count,
            kernel.collider_count(),
            started.elapsed()
        );
        grid
    }

    /// 單一代理人版本，等同長度為 1 的代理人表
    pub fn dispatch_single(&self, agent: &Agent, colliders: &ColliderTable) -> Vec<f32> {
        let agents = AgentTable::single(*agent);
        self.dispatch(&agents, colliders).into_inner()
    }

    /// 單執行緒參考實作，結果必須與 `dispatch` 逐位元相同
    pub fn dispatch_serial(&self, agents: &AgentTable, colliders: &ColliderTable) -> OutputGrid {
        dispatch_serial(agents, colliders, &self.config)
    }
}

/// 不需要執行緒池的循序派發
pub fn dispatch_serial(agents: &AgentTable, colliders: &ColliderTable, config: &KernelConfig) -> OutputGrid {
    let kernel = VisibilityKernel::new(agents, colliders, config);
    let mut grid = OutputGrid::new(kernel.agent_count(), config.ray_count, config.stride);
    let stride = grid.stride();

    for (i, cell) in grid.cells_mut().iter_mut().enumerate() {
        let (agent_index, ray_index) = (i / stride, i % stride);
        if ray_index < config.ray_count {
            *cell = kernel.evaluate(agent_index, ray_index);
        }
    }
    grid
}
