/// 射線與矩形相交（slab 法）
use vek::Vec2;

use super::collider::Rect;

/// 射線
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2<f32>,
    /// 單位向量
    pub direction: Vec2<f32>,
}

impl Ray {
    pub fn new(origin: Vec2<f32>, direction: Vec2<f32>) -> Self {
        Self { origin, direction }
    }

    /// 以角度（弧度）建立射線
    pub fn from_angle(origin: Vec2<f32>, angle: f32) -> Self {
        Self {
            origin,
            direction: Vec2::new(angle.cos(), angle.sin()),
        }
    }

    pub fn at(&self, t: f32) -> Vec2<f32> {
        self.origin + self.direction * t
    }

    pub fn intersect(&self, rect: &Rect, max_t: f32) -> Option<f32> {
        ray_rect_intersection(self.origin, self.direction, rect, max_t)
    }
}

/// 單軸 slab 區間
///
/// 方向分量為 0 時等同 IEEE 極限行為：原點在 slab 內（含邊界）則為 (-inf, inf)，
/// 否則不相交。這裡顯式分支是為了避開 `0 * inf = NaN`。
#[inline]
fn axis_slab(origin: f32, dir: f32, lo: f32, hi: f32) -> Option<(f32, f32)> {
    if dir == 0.0 {
        if origin >= lo && origin <= hi {
            Some((f32::NEG_INFINITY, f32::INFINITY))
        } else {
            None
        }
    } else {
        let inv = 1.0 / dir;
        let t1 = (lo - origin) * inv;
        let t2 = (hi - origin) * inv;
        Some((t1.min(t2), t1.max(t2)))
    }
}

/// 射線穿過矩形的參數區間 `(t_near, t_far)`
///
/// 矩形完全在原點後方或射線未穿過時回傳 None；`t_near` 可能為負（原點在矩形內）。
#[inline]
pub fn ray_rect_span(origin: Vec2<f32>, direction: Vec2<f32>, rect: &Rect) -> Option<(f32, f32)> {
    let (min, max) = (rect.min(), rect.max());
    let (min_x, max_x) = axis_slab(origin.x, direction.x, min.x, max.x)?;
    let (min_y, max_y) = axis_slab(origin.y, direction.y, min.y, max.y)?;

    let t_near = min_x.max(min_y);
    let t_far = max_x.min(max_y);

    if t_far < 0.0 || t_near > t_far {
        return None;
    }
    Some((t_near, t_far))
}

/// 計算射線進入矩形的距離
///
/// 原點在矩形內時回傳離開點距離。只接受 `0 <= t <= max_t`（含邊界）。
/// 任何 NaN 輸入都視為不相交。
#[inline]
pub fn ray_rect_intersection(
    origin: Vec2<f32>,
    direction: Vec2<f32>,
    rect: &Rect,
    max_t: f32,
) -> Option<f32> {
    let (t_near, t_far) = ray_rect_span(origin, direction, rect)?;

    let t_hit = if t_near >= 0.0 { t_near } else { t_far };

    if t_hit >= 0.0 && t_hit <= max_t {
        Some(t_hit)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn east() -> Vec2<f32> {
        Vec2::new(1.0, 0.0)
    }

    #[test]
    fn test_hit_directly_ahead() {
        let rect = Rect::new(5.0, -1.0, 1.0, 2.0);
        let t = ray_rect_intersection(Vec2::zero(), east(), &rect, 10.0);
        assert_eq!(t, Some(5.0));
    }

    #[test]
    fn test_behind_origin_misses() {
        let rect = Rect::new(-6.0, -1.0, 1.0, 2.0);
        assert_eq!(ray_rect_intersection(Vec2::zero(), east(), &rect, 10.0), None);
    }

    #[test]
    fn test_origin_inside_reports_exit() {
        let rect = Rect::new(-1.0, -1.0, 4.0, 2.0);
        let t = ray_rect_intersection(Vec2::zero(), east(), &rect, 10.0);
        assert_eq!(t, Some(3.0));
    }

    #[test]
    fn test_max_range_is_inclusive() {
        let rect = Rect::new(10.0, -1.0, 1.0, 2.0);
        assert_eq!(ray_rect_intersection(Vec2::zero(), east(), &rect, 10.0), Some(10.0));
        assert_eq!(ray_rect_intersection(Vec2::zero(), east(), &rect, 9.999), None);
    }

    #[test]
    fn test_zero_width_rect_still_blocks() {
        let wall = Rect::new(4.0, -2.0, 0.0, 4.0);
        assert_eq!(ray_rect_intersection(Vec2::zero(), east(), &wall, 10.0), Some(4.0));
    }

    #[test]
    fn test_axis_aligned_ray_grazing_edge() {
        // 原點剛好在矩形下緣所在直線上
        let rect = Rect::new(3.0, 0.0, 2.0, 2.0);
        assert_eq!(ray_rect_intersection(Vec2::zero(), east(), &rect, 10.0), Some(3.0));

        // 稍微偏離則不相交
        let origin = Vec2::new(0.0, -0.001);
        assert_eq!(ray_rect_intersection(origin, east(), &rect, 10.0), None);
    }

    #[test]
    fn test_origin_on_boundary_counts() {
        let rect = Rect::new(0.0, -1.0, 2.0, 2.0);
        // 位於左邊界、朝內
        assert_eq!(ray_rect_intersection(Vec2::zero(), east(), &rect, 10.0), Some(0.0));
        // 位於右邊界、朝外：離開點即原點
        let origin = Vec2::new(2.0, 0.0);
        assert_eq!(ray_rect_intersection(origin, east(), &rect, 10.0), Some(0.0));
    }

    #[test]
    fn test_span_from_near_face() {
        let rect = Rect::new(2.0, -1.0, 1.0, 2.0);
        let span = ray_rect_span(Vec2::new(2.0, 0.0), east(), &rect);
        assert_eq!(span, Some((0.0, 1.0)));
        assert_eq!(ray_rect_span(Vec2::new(4.0, 0.0), east(), &rect), None);
    }

    #[test]
    fn test_diagonal_ray() {
        let dir = Vec2::new(1.0, 1.0).normalized();
        let rect = Rect::new(3.0, 3.0, 1.0, 1.0);
        let t = ray_rect_intersection(Vec2::zero(), dir, &rect, 100.0).unwrap();
        assert!((t - 3.0 * 2f32.sqrt()).abs() < EPSILON);
    }

    #[test]
    fn test_nan_direction_never_hits() {
        let rect = Rect::new(-1.0, -1.0, 2.0, 2.0);
        let dir = Vec2::new(f32::NAN, f32::NAN);
        assert_eq!(ray_rect_intersection(Vec2::zero(), dir, &rect, 10.0), None);
    }

    #[test]
    fn test_ray_helper_point() {
        let ray = Ray::from_angle(Vec2::new(1.0, 1.0), std::f32::consts::FRAC_PI_2);
        let p = ray.at(2.0);
        assert!((p.x - 1.0).abs() < EPSILON);
        assert!((p.y - 3.0).abs() < EPSILON);
    }
}
