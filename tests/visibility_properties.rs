/// 視錐核心整合測試
///
/// 以公開 API 驗證範圍不變量、邊界行為、射線順序與決定性
use omb_vision::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::f32::consts::FRAC_PI_4;
use vek::Vec2;

const EPSILON: f32 = 1e-6;

fn dispatcher(ray_count: usize) -> VisionDispatcher {
    VisionDispatcher::new(KernelConfig::with_ray_count(ray_count).with_num_threads(4)).unwrap()
}

fn forward_agent(cone_length: f32) -> Agent {
    Agent::new(Vec2::zero(), 0.0, 0.0, cone_length)
}

fn random_scene(seed: u64, agent_count: usize, collider_count: usize) -> (AgentTable, ColliderTable) {
    let mut rng = Pcg64::seed_from_u64(seed);
    let rects: Vec<Rect> = (0..collider_count)
        .map(|_| {
            Rect::new(
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
                rng.random_range(0.0..30.0),
                rng.random_range(0.0..30.0),
            )
        })
        .collect();
    let agents: Vec<Agent> = (0..agent_count)
        .map(|_| {
            Agent::new(
                Vec2::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0)),
                rng.random_range(-3.2..3.2),
                rng.random_range(0.0..1.6),
                rng.random_range(1.0..250.0),
            )
        })
        .collect();
    (
        AgentTable::from_agents(agents, MAX_AGENTS),
        ColliderTable::from_rects(&rects, MAX_COLLIDERS),
    )
}

#[test]
fn test_every_cell_within_unit_range() {
    let (agents, colliders) = random_scene(7, 40, 200);
    let grid = dispatcher(33).dispatch(&agents, &colliders);
    assert_eq!(grid.as_slice().len(), 40 * 33);
    for &value in grid.as_slice() {
        assert!((0.0..=1.0).contains(&value), "輸出超出範圍: {}", value);
    }
    assert!(grid.blocked_count() > 0, "隨機場景應該有被遮擋的射線");
}

#[test]
fn test_empty_collider_table_is_fully_visible() {
    let (agents, _) = random_scene(11, 12, 0);
    let grid = dispatcher(16).dispatch(&agents, &ColliderTable::new());
    assert!(grid.as_slice().iter().all(|&v| v == 1.0));
}

#[test]
fn test_single_block_ahead_reads_half() {
    let mut colliders = ColliderTable::new();
    colliders.push(Rect::new(5.0, -1.0, 1.0, 2.0));
    let row = dispatcher(2).dispatch_single(&forward_agent(10.0), &colliders);
    assert_eq!(row, vec![0.5, 0.5]);
}

#[test]
fn test_block_exactly_at_range_is_unobstructed() {
    let mut colliders = ColliderTable::new();
    colliders.push(Rect::new(10.0, -1.0, 1.0, 2.0));
    let row = dispatcher(2).dispatch_single(&forward_agent(10.0), &colliders);
    assert_eq!(row, vec![1.0, 1.0]);
}

#[test]
fn test_block_beyond_range_is_ignored() {
    let mut colliders = ColliderTable::new();
    colliders.push(Rect::new(10.5, -1.0, 1.0, 2.0));
    let row = dispatcher(2).dispatch_single(&forward_agent(10.0), &colliders);
    assert_eq!(row, vec![1.0, 1.0]);
}

#[test]
fn test_nearest_wins_regardless_of_order() {
    let near = Rect::new(2.0, -1.0, 1.0, 2.0);
    let far = Rect::new(6.0, -1.0, 1.0, 2.0);
    let d = dispatcher(2);
    let a = d.dispatch_single(&forward_agent(10.0), &ColliderTable::from_rects(&[near, far], 8));
    let b = d.dispatch_single(&forward_agent(10.0), &ColliderTable::from_rects(&[far, near], 8));
    assert_eq!(a, b);
    assert_eq!(a[0], 0.2);
}

#[test]
fn test_ray_zero_is_left_edge() {
    let agent = Agent::new(Vec2::zero(), 0.25, FRAC_PI_4, 10.0);
    let policy = DegeneratePolicy::Clamp;
    assert!((agent.ray_angle(0, 3, policy) - (0.25 + FRAC_PI_4)).abs() < EPSILON);
    assert!((agent.ray_angle(2, 3, policy) - (0.25 - FRAC_PI_4)).abs() < EPSILON);

    // 只有上方有牆：只有第 0 條射線被擋
    let mut colliders = ColliderTable::new();
    colliders.push(Rect::new(-10.0, 3.0, 20.0, 1.0));
    let flat = Agent::new(Vec2::zero(), 0.0, FRAC_PI_4, 10.0);
    let row = dispatcher(3).dispatch_single(&flat, &colliders);
    assert!(row[0] < 1.0);
    assert_eq!(row[1], 1.0);
    assert_eq!(row[2], 1.0);
    assert!((row[0] - 3.0 * 2f32.sqrt() / 10.0).abs() < 1e-4);
}

#[test]
fn test_repeated_dispatch_is_bit_identical() {
    let (agents, colliders) = random_scene(99, 25, 120);
    let d = dispatcher(20);
    let first = d.dispatch(&agents, &colliders);
    let second = d.dispatch(&agents, &colliders);
    let serial = dispatch_serial(&agents, &colliders, d.config());
    let bits = |g: &OutputGrid| g.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&first), bits(&second));
    assert_eq!(bits(&first), bits(&serial));
}

#[test]
fn test_capacity_ceiling_truncates_scan() {
    // 第 513 個障礙物擋在正前方，但超出掃描上限
    let mut rects = vec![Rect::new(1000.0, 1000.0, 1.0, 1.0); MAX_COLLIDERS];
    rects.push(Rect::new(5.0, -1.0, 1.0, 2.0));
    assert!(ColliderTable::try_from_rects(&rects, MAX_COLLIDERS).is_err());

    let colliders = ColliderTable::from_rects(&rects, MAX_COLLIDERS);
    assert_eq!(colliders.count(), MAX_COLLIDERS);
    let row = dispatcher(2).dispatch_single(&forward_agent(10.0), &colliders);
    assert_eq!(row, vec![1.0, 1.0]);
}

#[test]
fn test_malformed_agent_does_not_spoil_others() {
    let mut colliders = ColliderTable::new();
    colliders.push(Rect::new(5.0, -1.0, 1.0, 2.0));
    let agents = AgentTable::from_agents(
        vec![forward_agent(0.0), forward_agent(10.0), forward_agent(-4.0)],
        MAX_AGENTS,
    );
    let grid = dispatcher(2).dispatch(&agents, &colliders);
    assert_eq!(grid.row(0).unwrap(), &[1.0, 1.0]);
    assert_eq!(grid.row(1).unwrap(), &[0.5, 0.5]);
    assert_eq!(grid.row(2).unwrap(), &[1.0, 1.0]);
}

#[test]
fn test_level_to_grid_and_polygon() {
    let level = LevelData::from_json_str(
        r#"{"walls": [[150, -100, 20, 200]], "agents": [{"a": [0, 0], "b": [10, 0], "fov_deg": 40, "cone_len": 200}]}"#,
    )
    .unwrap();
    let floor = level.floor(0).unwrap();
    let agents = floor.agent_table(MAX_AGENTS);
    let colliders = floor.collider_table(MAX_COLLIDERS);
    let grid = dispatcher(9).dispatch(&agents, &colliders);

    // 中央射線撞到 x = 150 的牆
    assert!((grid.get(0, 4).unwrap() - 0.75).abs() < 1e-5);

    let agent = agents.get(0).unwrap();
    let polygon = grid.visibility_polygon(0, agent, DegeneratePolicy::Clamp);
    assert_eq!(polygon.len(), 10);
    assert!(polygon[1..].iter().all(|p| p.x <= 150.0 + 1e-3));
    assert!(polygon_area(&polygon) > 0.0);
    assert!(!line_of_sight_clear(agent.origin, Vec2::new(190.0, 0.0), colliders.active()));
}
