use bevy::math::Vec2;
use bevy::render::color::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use starfall_vanguard::boss_part::{
    pattern_velocities, BobConfig, BossPart, FirePattern, OrbitConfig, PartConfig, PartRole,
    WeaponConfig,
};

fn test_part_config(role: PartRole, health: i32, destroyable: bool) -> PartConfig {
    PartConfig {
        role,
        sprite_key: "boss_core",
        tint: Color::WHITE,
        destroyable,
        offset: Vec2::new(50.0, 0.0),
        size: Vec2::new(40.0, 20.0),
        health,
        score: 100,
        orbit: None,
        bob: None,
        spin_speed: 0.0,
        weapon: None,
    }
}

#[test]
fn damage_reduces_health_and_clamps_at_zero() {
    let config = test_part_config(PartRole::Turret, 50, true);
    let mut part = BossPart::new(&config, 1.0, 1.0, 1.0);
    assert!(!part.take_damage(20));
    assert_eq!(part.health, 30);
    assert!(part.active);
    assert!(part.take_damage(100));
    assert_eq!(part.health, 0);
    assert!(!part.active);
}

#[test]
fn destroyed_part_stays_destroyed() {
    let config = test_part_config(PartRole::Turret, 10, true);
    let mut part = BossPart::new(&config, 1.0, 1.0, 1.0);
    assert!(part.take_damage(10));
    assert!(!part.take_damage(10));
    assert_eq!(part.health, 0);
    assert!(!part.active);
}

#[test]
fn non_destroyable_part_ignores_damage() {
    let config = test_part_config(PartRole::Armor, 1, false);
    let mut part = BossPart::new(&config, 1.0, 1.0, 1.0);
    assert!(!part.take_damage(9999));
    assert_eq!(part.health, 1);
    assert!(part.active);
}

#[test]
fn negative_damage_does_not_heal() {
    let config = test_part_config(PartRole::Turret, 50, true);
    let mut part = BossPart::new(&config, 1.0, 1.0, 1.0);
    part.take_damage(-30);
    assert_eq!(part.health, 50);
}

#[test]
fn health_scale_applies_at_build_time() {
    let config = test_part_config(PartRole::Core, 100, true);
    let part = BossPart::new(&config, 1.5, 1.0, 1.0);
    assert_eq!(part.health, 150);
    assert_eq!(part.max_health, 150);
}

#[test]
fn static_offset_scales_with_spread() {
    let config = test_part_config(PartRole::Turret, 50, true);
    let mut part = BossPart::new(&config, 1.0, 1.0, 1.0);
    let center = Vec2::new(100.0, 200.0);
    part.update_position(center, 0.0, 0.0);
    assert!(part.position.distance(center) < 1e-4);
    part.update_position(center, 0.0, 1.0);
    assert!(part.position.distance(center + Vec2::new(50.0, 0.0)) < 1e-4);
    part.update_position(center, 0.0, 0.5);
    assert!(part.position.distance(center + Vec2::new(25.0, 0.0)) < 1e-4);
}

#[test]
fn orbit_overrides_static_offset() {
    let mut config = test_part_config(PartRole::Arm, 50, true);
    config.orbit = Some(OrbitConfig {
        radius: 80.0,
        start_angle: 0.0,
        angular_speed: 1.0,
    });
    let mut part = BossPart::new(&config, 1.0, 1.0, 1.0);
    let center = Vec2::ZERO;
    part.update_position(center, 0.0, 1.0);
    assert!((part.position.distance(center) - 80.0).abs() < 1e-3);
    let first = part.position;
    part.update_position(center, 1.0, 1.0);
    assert!((part.position.distance(center) - 80.0).abs() < 1e-3);
    assert!(part.position.distance(first) > 1.0);
}

#[test]
fn bob_moves_only_the_y_axis() {
    let mut config = test_part_config(PartRole::Shield, 50, true);
    config.offset = Vec2::new(0.0, 30.0);
    config.bob = Some(BobConfig {
        amplitude: 10.0,
        speed: 1.0,
    });
    let mut part = BossPart::new(&config, 1.0, 1.0, 1.0);
    part.update_position(Vec2::ZERO, std::f32::consts::FRAC_PI_2, 1.0);
    assert!(part.position.x.abs() < 1e-4);
    assert!((part.position.y - 40.0).abs() < 1e-3);
}

#[test]
fn contains_uses_part_rect_and_activity() {
    let config = test_part_config(PartRole::Turret, 50, true);
    let mut part = BossPart::new(&config, 1.0, 1.0, 1.0);
    part.update_position(Vec2::ZERO, 0.0, 1.0);
    assert!(part.contains(Vec2::new(50.0, 0.0)));
    assert!(part.contains(Vec2::new(69.0, 9.0)));
    assert!(!part.contains(Vec2::new(71.0, 0.0)));
    assert!(!part.contains(Vec2::new(50.0, 11.0)));
    part.take_damage(50);
    assert!(!part.contains(Vec2::new(50.0, 0.0)));
}

#[test]
fn aimed_pattern_points_at_the_player() {
    let mut rng = StdRng::seed_from_u64(7);
    let origin = Vec2::new(0.0, 100.0);
    let player = Vec2::new(100.0, 0.0);
    let shots = pattern_velocities(
        FirePattern::Aimed,
        origin,
        Some(player),
        0.0,
        200.0,
        1,
        &mut rng,
    );
    assert_eq!(shots.len(), 1);
    let expected = (player - origin).normalize() * 200.0;
    assert!(shots[0].distance(expected) < 1e-3);
}

#[test]
fn aimed_pattern_falls_back_to_straight_down() {
    let mut rng = StdRng::seed_from_u64(7);
    let shots = pattern_velocities(FirePattern::Aimed, Vec2::ZERO, None, 0.0, 200.0, 1, &mut rng);
    assert!(shots[0].distance(Vec2::new(0.0, -200.0)) < 1e-3);
}

#[test]
fn spread_pattern_fans_around_straight_down() {
    let mut rng = StdRng::seed_from_u64(7);
    let shots = pattern_velocities(FirePattern::Spread, Vec2::ZERO, None, 0.0, 150.0, 3, &mut rng);
    assert_eq!(shots.len(), 3);
    // Middle shot goes straight down, wings mirror each other.
    assert!(shots[1].distance(Vec2::new(0.0, -150.0)) < 1e-3);
    assert!((shots[0].x + shots[2].x).abs() < 1e-3);
    assert!((shots[0].y - shots[2].y).abs() < 1e-3);
    for shot in &shots {
        assert!((shot.length() - 150.0).abs() < 1e-2);
        assert!(shot.y < 0.0);
    }
}

#[test]
fn radial_pattern_spaces_shots_evenly_and_drifts() {
    let mut rng = StdRng::seed_from_u64(7);
    let early = pattern_velocities(FirePattern::Radial, Vec2::ZERO, None, 0.0, 120.0, 8, &mut rng);
    let late = pattern_velocities(FirePattern::Radial, Vec2::ZERO, None, 1.0, 120.0, 8, &mut rng);
    assert_eq!(early.len(), 8);
    for shot in &early {
        assert!((shot.length() - 120.0).abs() < 1e-2);
    }
    let step = early[0].angle_between(early[1]).abs();
    assert!((step - std::f32::consts::TAU / 8.0).abs() < 1e-3);
    // A later volley is rotated relative to the first one.
    assert!(early[0].angle_between(late[0]).abs() > 0.1);
}

#[test]
fn rapid_pattern_fires_a_burst_with_staggered_speeds() {
    let mut rng = StdRng::seed_from_u64(7);
    let shots = pattern_velocities(
        FirePattern::Rapid,
        Vec2::new(0.0, 100.0),
        Some(Vec2::new(0.0, -100.0)),
        0.0,
        200.0,
        3,
        &mut rng,
    );
    assert_eq!(shots.len(), 3);
    assert!(shots[0].length() < shots[1].length());
    assert!(shots[1].length() < shots[2].length());
    for shot in &shots {
        // Jitter stays within a narrow cone around the aim line.
        assert!(shot.y < 0.0);
        assert!((shot.x / shot.length()).abs() < 0.2);
    }
}

#[test]
fn spiral_pattern_rotates_between_volleys() {
    let mut rng = StdRng::seed_from_u64(7);
    let first = pattern_velocities(FirePattern::Spiral, Vec2::ZERO, None, 0.0, 100.0, 6, &mut rng);
    let second =
        pattern_velocities(FirePattern::Spiral, Vec2::ZERO, None, 0.5, 100.0, 6, &mut rng);
    assert_eq!(first.len(), 6);
    assert!(first[0].angle_between(second[0]).abs() > 0.5);
}

#[test]
fn fire_rate_scale_shortens_the_interval() {
    let mut config = test_part_config(PartRole::Turret, 50, true);
    config.weapon = Some(WeaponConfig {
        pattern: FirePattern::Aimed,
        fire_interval_secs: 2.0,
        projectile_speed: 100.0,
        shot_count: 1,
    });
    let normal = BossPart::new(&config, 1.0, 1.0, 1.0);
    let fast = BossPart::new(&config, 1.0, 2.0, 1.0);
    let normal_interval = normal.weapon.as_ref().map(|w| w.fire_timer.duration());
    let fast_interval = fast.weapon.as_ref().map(|w| w.fire_timer.duration());
    assert!(fast_interval < normal_interval);
}
