/// 障礙物表
///
/// 固定容量的軸對齊矩形陣列，以索引定址。`count` 為權威長度，
/// 可小於底層儲存容量；掃描範圍永遠是 `min(count, capacity)`。
use serde::{Deserialize, Serialize};
use vek::Vec2;

use crate::config::MAX_COLLIDERS;
use crate::error::{Result, VisionError};

/// 軸對齊矩形，`(x, y)` 為左下角
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn min(&self) -> Vec2<f32> {
        Vec2::new(self.x.min(self.x + self.w), self.y.min(self.y + self.h))
    }

    pub fn max(&self) -> Vec2<f32> {
        Vec2::new(self.x.max(self.x + self.w), self.y.max(self.y + self.h))
    }

    /// 含邊界
    pub fn contains_point(&self, point: Vec2<f32>) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

impl From<[f32; 4]> for Rect {
    fn from(r: [f32; 4]) -> Self {
        Rect::new(r[0], r[1], r[2], r[3])
    }
}

/// 障礙物表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColliderTable {
    /// 固定長度儲存，長度即容量
    slots: Vec<Rect>,
    /// 有效障礙物數量
    count: usize,
}

impl ColliderTable {
    /// 以預設容量（512）建立空表
    pub fn new() -> Self {
        Self::with_capacity(MAX_COLLIDERS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Rect::default(); capacity],
            count: 0,
        }
    }

    /// 寬鬆建表：超出容量的部分截斷並記錄警告
    pub fn from_rects(rects: &[Rect], capacity: usize) -> Self {
        let mut table = Self::with_capacity(capacity);
        let kept = rects.len().min(capacity);
        if kept < rects.len() {
            log::warn!(
                "障礙物數量 {} 超過容量 {}，後 {} 個將被忽略",
                rects.len(),
                capacity,
                rects.len() - kept
            );
        }
        table.slots[..kept].copy_from_slice(&rects[..kept]);
        table.count = kept;
        table
    }

    /// 嚴格建表：超出容量直接回傳錯誤
    pub fn try_from_rects(rects: &[Rect], capacity: usize) -> Result<Self> {
        if rects.len() > capacity {
            return Err(VisionError::ColliderCapacityExceeded {
                count: rects.len(),
                capacity,
            });
        }
        Ok(Self::from_rects(rects, capacity))
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 權威長度（可能大於容量，掃描時會截斷）
    pub fn count(&self) -> usize {
        self.count
    }

    /// 直接設定權威長度，對應宿主端另外上傳的 `collider_count`
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    /// 追加一個障礙物；表已滿時回傳 false
    pub fn push(&mut self, rect: Rect) -> bool {
        if self.count >= self.capacity() {
            return false;
        }
        self.slots[self.count] = rect;
        self.count += 1;
        true
    }

    /// 覆寫指定槽位（不改變 count）
    pub fn set(&mut self, index: usize, rect: Rect) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = rect;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Rect> {
        self.active().get(index)
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// 本次派發實際掃描的障礙物
    pub fn active(&self) -> &[Rect] {
        self.active_up_to(self.capacity())
    }

    /// 額外套用掃描上限（設定檔中的 collider_capacity）
    pub fn active_up_to(&self, ceiling: usize) -> &[Rect] {
        let n = self.count.min(self.capacity()).min(ceiling);
        &self.slots[..n]
    }
}

impl Default for ColliderTable {
    fn default() -> Self {
        Self::new()
    }
}
