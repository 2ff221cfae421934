use std::collections::HashSet;

use unidot_sim::collision::{move_and_slide, Axes, BroadPhase, Grid, Proxy, Quadtree};
use unidot_sim::math::{BoundingBox, Vector2};
use unidot_sim::{Body, BodyHandle};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_proxies(rng: &mut StdRng, count: u32, world: f32) -> Vec<Proxy> {
    (1..=count)
        .map(|id| {
            let w = rng.gen_range(1.0..60.0);
            let h = rng.gen_range(1.0..60.0);
            let x = rng.gen_range(0.0..world - w);
            let y = rng.gen_range(0.0..world - h);
            Proxy::new(BodyHandle::from_raw(id), BoundingBox::new(x, y, w, h))
        })
        .collect()
}

fn brute_force(proxies: &[Proxy], range: &BoundingBox) -> Vec<BodyHandle> {
    let mut handles: Vec<_> = proxies
        .iter()
        .filter(|p| range.overlaps(&p.bounds))
        .map(|p| p.handle)
        .collect();
    handles.sort();
    handles
}

fn handles_of(found: &[Proxy]) -> Vec<BodyHandle> {
    let mut handles: Vec<_> = found.iter().map(|p| p.handle).collect();
    handles.sort();
    handles
}

#[test]
fn test_grid_query_always_finds_inserted_body() {
    let mut rng = StdRng::seed_from_u64(11);
    let proxies = random_proxies(&mut rng, 300, 1000.0);

    let mut grid = Grid::new(1000.0, 1000.0, 32.0).unwrap();
    for proxy in &proxies {
        assert!(grid.insert(*proxy));
    }

    for proxy in &proxies {
        let found = grid.query(&proxy.bounds);
        assert!(found.iter().any(|p| p.handle == proxy.handle), "{:?} missing", proxy.handle);
    }
}

#[test]
fn test_grid_returns_spanning_body_once() {
    let mut grid = Grid::new(100.0, 100.0, 10.0).unwrap();
    let handle = BodyHandle::from_raw(1);

    // Spans 4 x 4 cells
    grid.insert(Proxy::new(handle, BoundingBox::new(5.0, 5.0, 30.0, 30.0)));
    assert_eq!(grid.cell_count(), 16);

    let found = grid.query(&BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].handle, handle);
}

#[test]
fn test_quadtree_contains_every_inserted_body() {
    let mut rng = StdRng::seed_from_u64(23);
    let root = BoundingBox::new(0.0, 0.0, 1024.0, 1024.0);
    let proxies = random_proxies(&mut rng, 250, 1024.0);

    let mut tree = Quadtree::with_defaults(root).unwrap();
    for proxy in &proxies {
        assert!(tree.insert(*proxy));
    }
    assert_eq!(tree.len(), proxies.len());

    let found = tree.query(&root);
    let distinct: HashSet<_> = found.iter().map(|p| p.handle).collect();
    assert_eq!(distinct.len(), proxies.len());
    // Straddling entries stay at one node, so nothing is reported twice
    assert_eq!(found.len(), proxies.len());
}

#[test]
fn test_indices_agree_with_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    let world = BoundingBox::new(0.0, 0.0, 512.0, 512.0);
    let proxies = random_proxies(&mut rng, 200, 512.0);

    let mut grid = Grid::with_bounds(world, 24.0).unwrap();
    let mut tree = Quadtree::new(world, 3, 6).unwrap();
    assert!(grid.rebuild(&proxies).is_empty());
    assert!(tree.rebuild(&proxies).is_empty());

    for _ in 0..200 {
        let range = BoundingBox::new(
            rng.gen_range(-20.0..500.0),
            rng.gen_range(-20.0..500.0),
            rng.gen_range(1.0..120.0),
            rng.gen_range(1.0..120.0),
        );
        let expected = brute_force(&proxies, &range);
        assert_eq!(handles_of(&grid.query(&range)), expected);
        assert_eq!(handles_of(&tree.query(&range)), expected);
    }
}

#[test]
fn test_invalid_index_configuration() {
    assert!(Grid::new(100.0, 100.0, 0.0).is_err());
    assert!(Grid::new(100.0, 100.0, -4.0).is_err());
    assert!(Grid::new(0.0, 100.0, 4.0).is_err());
    assert!(Quadtree::new(BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0, 5).is_err());
    assert!(Quadtree::with_defaults(BoundingBox::new(0.0, 0.0, 10.0, 0.0)).is_err());
}

#[test]
fn test_resolver_slides_to_neighbor_edge() {
    // Integrated from x=0 with vx=5 over dt=1
    let mut body = Body::new_kinematic(Vector2::new(5.0, 0.0), Vector2::new(10.0, 10.0))
        .with_velocity(Vector2::new(5.0, 0.0));
    let wall = Proxy::new(BodyHandle::from_raw(9), BoundingBox::new(8.0, 0.0, 10.0, 10.0));

    let hits = move_and_slide(&mut body, &[wall], false);

    assert_eq!(body.get_position().x, -2.0);
    assert_eq!(body.get_position().y, 0.0);
    assert_eq!(body.get_velocity(), Vector2::new(0.0, 0.0));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].axes, Axes::X);
}

#[test]
fn test_resolver_bounce_inverts_velocity() {
    let mut body = Body::new_kinematic(Vector2::new(5.0, 0.0), Vector2::new(10.0, 10.0))
        .with_velocity(Vector2::new(5.0, 0.0));
    let wall = Proxy::new(BodyHandle::from_raw(9), BoundingBox::new(8.0, 0.0, 10.0, 10.0));

    move_and_slide(&mut body, &[wall], true);

    assert_eq!(body.get_position().x, -2.0);
    assert_eq!(body.get_velocity(), Vector2::new(-5.0, 0.0));
}

#[test]
fn test_resolver_ignores_disjoint_neighbors() {
    let start = Body::new_kinematic(Vector2::new(0.0, 0.0), Vector2::new(10.0, 10.0))
        .with_velocity(Vector2::new(3.0, -2.0));
    let mut body = start.clone();
    let far = Proxy::new(BodyHandle::from_raw(2), BoundingBox::new(50.0, 50.0, 10.0, 10.0));
    let touching = Proxy::new(BodyHandle::from_raw(3), BoundingBox::new(10.0, 0.0, 10.0, 10.0));

    let hits = move_and_slide(&mut body, &[far, touching], true);

    assert!(hits.is_empty());
    assert_eq!(body, start);
}

#[test]
fn test_resolver_leaves_resting_axis_alone() {
    // Overlapping on y but not moving vertically: only x is corrected
    let mut body = Body::new_kinematic(Vector2::new(5.0, 5.0), Vector2::new(10.0, 10.0))
        .with_velocity(Vector2::new(-4.0, 0.0));
    let wall = Proxy::new(BodyHandle::from_raw(2), BoundingBox::new(0.0, 0.0, 8.0, 20.0));

    move_and_slide(&mut body, &[wall], false);

    assert_eq!(body.get_position(), Vector2::new(8.0, 5.0));
    assert_eq!(body.get_velocity(), Vector2::zero());
}
