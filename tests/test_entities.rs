use archery::entities::*;

fn zone_area(target: &Target, zone: Zone) -> Rect {
    let (_, area) = target.zones().iter().find(|(z, _)| *z == zone).expect("zone present");
    *area
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rects_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 10.0, 10.0);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn touching_edges_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let right = Rect::new(10.0, 0.0, 5.0, 5.0);
    let below = Rect::new(0.0, 10.0, 5.0, 5.0);
    assert!(!a.intersects(&right));
    assert!(!a.intersects(&below));
}

#[test]
fn translate_keeps_size() {
    let r = Rect::new(1.0, 2.0, 3.0, 4.0).translate(10.0, -2.0);
    assert_eq!(r, Rect::new(11.0, 0.0, 3.0, 4.0));
    assert_eq!(r.right(), 14.0);
    assert_eq!(r.bottom(), 4.0);
}

// ── Zone / Target ─────────────────────────────────────────────────────────────

#[test]
fn zone_points() {
    assert_eq!(Zone::Inner.points(), 3);
    assert_eq!(Zone::Middle.points(), 2);
    assert_eq!(Zone::Outer.points(), 1);
}

#[test]
fn target_zones_are_nested() {
    let t = Target::in_corner();
    let inner = zone_area(&t, Zone::Inner);
    let middle = zone_area(&t, Zone::Middle);
    let outer = zone_area(&t, Zone::Outer);
    assert!(middle.contains(&inner));
    assert!(outer.contains(&middle));
    assert!(t.bounds().contains(&outer));
}

#[test]
fn target_sits_in_bottom_right_corner() {
    let b = Target::in_corner().bounds();
    assert_eq!(b.right(), WORLD_WIDTH);
    assert_eq!(b.bottom(), WORLD_HEIGHT);
}

#[test]
fn zones_listed_innermost_first() {
    let t = Target::new(0.0, 0.0);
    let order: Vec<Zone> = t.zones().iter().map(|(zone, _)| *zone).collect();
    assert_eq!(order, Zone::ALL.to_vec());
}

#[test]
fn zone_hit_prefers_innermost() {
    let t = Target::new(0.0, 0.0);
    let centre = zone_area(&t, Zone::Inner);
    let hitbox = Rect::new(centre.x, centre.y + 10.0, 4.0, 4.0);
    assert_eq!(t.zone_hit(&hitbox), Some(Zone::Inner));
}

#[test]
fn zone_hit_between_rings() {
    let t = Target::new(0.0, 0.0);
    let middle = zone_area(&t, Zone::Middle);
    let outer = zone_area(&t, Zone::Outer);
    let in_middle = Rect::new(middle.x, middle.y + 1.0, 2.0, 2.0);
    let in_outer = Rect::new(outer.x, outer.y + 1.0, 2.0, 2.0);
    assert_eq!(t.zone_hit(&in_middle), Some(Zone::Middle));
    assert_eq!(t.zone_hit(&in_outer), Some(Zone::Outer));
}

#[test]
fn zone_hit_ignores_target_edge_left_of_rings() {
    // Inside the target's bounds but left of the shared ring edge
    let t = Target::in_corner();
    let b = t.bounds();
    let hitbox = Rect::new(b.x + 10.0, b.y + 200.0, 26.0, 17.0);
    assert!(b.contains(&hitbox));
    assert_eq!(t.zone_hit(&hitbox), None);
}

#[test]
fn zone_hit_misses_outside() {
    let t = Target::in_corner();
    assert_eq!(t.zone_hit(&Rect::new(0.0, 0.0, 20.0, 20.0)), None);
}

// ── Score ─────────────────────────────────────────────────────────────────────

#[test]
fn score_starts_at_zero_and_accumulates() {
    let mut score = Score::default();
    assert_eq!(score.total(), 0);
    score.report_hit(Zone::Inner);
    score.report_hit(Zone::Outer);
    score.report_hit(Zone::Middle);
    assert_eq!(score.total(), 6);
}

#[test]
fn score_copy_is_independent() {
    let mut a = Score::default();
    let b = a;
    a.report_hit(Zone::Inner);
    assert_eq!(a.total(), 3);
    assert_eq!(b.total(), 0);
}
