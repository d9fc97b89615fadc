/// 兩點間視線檢測
use vek::Vec2;

use super::collider::Rect;
use super::intersect::ray_rect_span;

/// 終點前的容許誤差（相對於線段長度）
const END_TOLERANCE: f32 = 1e-6;

/// 從 `from` 到 `to` 的視線是否未被遮擋
///
/// 穿越點必須嚴格在起點之後、終點之前才算遮擋；
/// 因此貼著障礙物表面的目標仍然可見。起點在表面上時改看離開點。
pub fn line_of_sight_clear(from: Vec2<f32>, to: Vec2<f32>, colliders: &[Rect]) -> bool {
    first_blocker(from, to, colliders).is_none()
}

/// 回傳第一個遮擋視線的障礙物索引與距離
pub fn first_blocker(from: Vec2<f32>, to: Vec2<f32>, colliders: &[Rect]) -> Option<(usize, f32)> {
    let delta = to - from;
    let distance = delta.magnitude();
    if distance == 0.0 {
        return None;
    }
    let direction = delta / distance;
    let limit = distance * (1.0 - END_TOLERANCE);

    colliders
        .iter()
        .enumerate()
        .filter_map(|(i, rect)| {
            let (t_near, t_far) = ray_rect_span(from, direction, rect)?;
            let inside = |t: f32| t > 0.0 && t < limit;
            if inside(t_near) {
                Some((i, t_near))
            } else if inside(t_far) {
                Some((i, t_far))
            } else {
                None
            }
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
