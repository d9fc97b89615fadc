/// 視錐視野核心模組
///
/// 障礙物表、射線相交、代理人表、核心計算、輸出網格與平行派發
pub mod collider;
pub mod intersect;
pub mod agent;
pub mod kernel;
pub mod output;
pub mod dispatch;
pub mod line_of_sight;

pub use self::{
    collider::{ColliderTable, Rect},
    intersect::{ray_rect_intersection, ray_rect_span, Ray},
    agent::{Agent, AgentTable},
    kernel::{evaluate_agent_ray, nearest_hit, VisibilityKernel},
    output::{polygon_area, OutputGrid, PADDING_VALUE},
    dispatch::{dispatch_serial, VisionDispatcher},
    line_of_sight::{first_blocker, line_of_sight_clear},
};
