use bevy::math::Vec2;
use bevy::render::color::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use starfall_vanguard::boss::{
    ease_out_elastic, Boss, EntryPhase, Shot, BOSS_DEPLOY_SECS, BOSS_DESCEND_SECS,
    BOSS_WARNING_SECS, MOVEMENT_MARGIN,
};
use starfall_vanguard::boss_defs::{BossDefinition, MovementPattern};
use starfall_vanguard::boss_factory::{build_boss, DifficultyProfile};
use starfall_vanguard::boss_part::{FirePattern, PartConfig, PartRole, WeaponConfig};

const HALF_WIDTH: f32 = 640.0;
const STEP: f32 = 1.0 / 60.0;

fn part(role: PartRole, offset: Vec2, size: Vec2, health: i32, destroyable: bool) -> PartConfig {
    PartConfig {
        role,
        sprite_key: "boss_core",
        tint: Color::WHITE,
        destroyable,
        offset,
        size,
        health,
        score: 100,
        orbit: None,
        bob: None,
        spin_speed: 0.0,
        weapon: None,
    }
}

fn armed(mut config: PartConfig, interval: f32) -> PartConfig {
    config.weapon = Some(WeaponConfig {
        pattern: FirePattern::Aimed,
        fire_interval_secs: interval,
        projectile_speed: 200.0,
        shot_count: 1,
    });
    config
}

fn test_definition(parts: Vec<PartConfig>) -> BossDefinition {
    BossDefinition {
        id: "test_rig",
        name: "Test Rig",
        score: 1000,
        size: Vec2::new(200.0, 100.0),
        speed: 80.0,
        movement: MovementPattern::Sweep,
        parts,
    }
}

fn standard_rig() -> Boss {
    let def = test_definition(vec![
        part(PartRole::Core, Vec2::ZERO, Vec2::new(60.0, 60.0), 100, true),
        armed(
            part(
                PartRole::Turret,
                Vec2::new(-80.0, 0.0),
                Vec2::new(40.0, 40.0),
                100,
                true,
            ),
            2.0,
        ),
        part(
            PartRole::Shield,
            Vec2::new(0.0, -10.0),
            Vec2::new(100.0, 30.0),
            100,
            true,
        ),
    ]);
    build_boss(&def, Vec2::new(0.0, 200.0), DifficultyProfile::NORMAL, 1, false)
}

fn advance_for(boss: &mut Boss, seconds: f32) {
    let steps = (seconds / STEP).ceil() as usize;
    for _ in 0..steps {
        boss.advance(STEP, None, HALF_WIDTH);
    }
}

fn make_active(boss: &mut Boss) {
    advance_for(
        boss,
        BOSS_WARNING_SECS + BOSS_DESCEND_SECS + BOSS_DEPLOY_SECS + 0.5,
    );
    assert_eq!(boss.phase, EntryPhase::Active);
}

#[test]
fn entry_runs_warning_descend_deploy_active_in_order() {
    let mut boss = standard_rig();
    assert_eq!(boss.phase, EntryPhase::Warning);
    advance_for(&mut boss, BOSS_WARNING_SECS + 0.1);
    assert_eq!(boss.phase, EntryPhase::Descend);
    advance_for(&mut boss, BOSS_DESCEND_SECS + 0.1);
    assert_eq!(boss.phase, EntryPhase::Deploy);
    assert!((boss.center.y - boss.target_y).abs() < 1e-3);
    advance_for(&mut boss, BOSS_DEPLOY_SECS + 0.1);
    assert_eq!(boss.phase, EntryPhase::Active);
}

#[test]
fn descend_moves_down_monotonically_to_the_hold_point() {
    let mut boss = standard_rig();
    advance_for(&mut boss, BOSS_WARNING_SECS + 0.01);
    let mut last_y = boss.center.y;
    while boss.phase == EntryPhase::Descend {
        boss.advance(STEP, None, HALF_WIDTH);
        assert!(boss.center.y <= last_y + 1e-4);
        last_y = boss.center.y;
    }
    assert!((boss.center.y - boss.target_y).abs() < 1e-3);
}

#[test]
fn deploy_spread_overshoots_then_settles_at_exactly_one() {
    let mut boss = standard_rig();
    advance_for(&mut boss, BOSS_WARNING_SECS + BOSS_DESCEND_SECS + 0.1);
    let mut max_spread: f32 = 0.0;
    while boss.phase == EntryPhase::Deploy {
        boss.advance(STEP, None, HALF_WIDTH);
        max_spread = max_spread.max(boss.spread);
    }
    assert!(max_spread > 1.0);
    assert!(max_spread < 1.37);
    assert_eq!(boss.spread, 1.0);
}

#[test]
fn elastic_easing_is_pinned_at_its_endpoints() {
    assert_eq!(ease_out_elastic(0.0), 0.0);
    assert_eq!(ease_out_elastic(1.0), 1.0);
    assert_eq!(ease_out_elastic(2.0), 1.0);
}

#[test]
fn mini_skips_the_warning_phase_only() {
    let def = test_definition(vec![part(
        PartRole::Core,
        Vec2::ZERO,
        Vec2::new(60.0, 60.0),
        100,
        true,
    )]);
    let mini = build_boss(&def, Vec2::new(0.0, 200.0), DifficultyProfile::NORMAL, 1, true);
    assert_eq!(mini.phase, EntryPhase::Descend);
    let full = build_boss(&def, Vec2::new(0.0, 200.0), DifficultyProfile::NORMAL, 1, false);
    assert_eq!(full.phase, EntryPhase::Warning);
    let mut mini = mini;
    advance_for(&mut mini, BOSS_DESCEND_SECS + 0.1);
    assert_eq!(mini.phase, EntryPhase::Deploy);
}

#[test]
fn no_shots_before_the_entry_sequence_finishes() {
    let mut boss = standard_rig();
    let mut rng = StdRng::seed_from_u64(3);
    let mut shots: Vec<Shot> = Vec::new();
    let entry_secs = BOSS_WARNING_SECS + BOSS_DESCEND_SECS + BOSS_DEPLOY_SECS;
    let steps = (entry_secs / STEP) as usize;
    for _ in 0..steps {
        boss.advance(STEP, None, HALF_WIDTH);
        boss.collect_shots(STEP, None, &mut rng, &mut shots);
    }
    assert!(shots.is_empty());
    advance_for(&mut boss, 0.5);
    assert_eq!(boss.phase, EntryPhase::Active);
    for _ in 0..(3.0 / STEP) as usize {
        boss.advance(STEP, None, HALF_WIDTH);
        boss.collect_shots(STEP, None, &mut rng, &mut shots);
    }
    assert!(!shots.is_empty());
}

#[test]
fn hits_land_on_non_core_parts_before_the_core() {
    let mut boss = standard_rig();
    make_active(&mut boss);
    // The shield rect overlaps the core at the boss center.
    let center = boss.center;
    let hit = boss.part_hit(center).unwrap();
    assert_eq!(boss.parts[hit].role, PartRole::Shield);
    let shield_index = hit;
    let shield_health = boss.parts[shield_index].health;
    boss.damage_part(shield_index, shield_health);
    let hit = boss.part_hit(center).unwrap();
    assert_eq!(boss.parts[hit].role, PartRole::Core);
}

#[test]
fn no_hits_register_during_entry() {
    let boss = standard_rig();
    assert_eq!(boss.part_hit(boss.center), None);
    assert_eq!(boss.part_overlapping_circle(boss.center, 50.0), None);
}

#[test]
fn untargeted_damage_follows_role_priority() {
    let mut boss = standard_rig();
    make_active(&mut boss);
    let mut rng = StdRng::seed_from_u64(11);
    let report = boss.route_damage(10, &mut rng).unwrap();
    assert_eq!(boss.parts[report.part_index].role, PartRole::Shield);
    // Kill the shield, then the turret takes priority, then the core.
    let shield = report.part_index;
    boss.damage_part(shield, 1000);
    let report = boss.route_damage(10, &mut rng).unwrap();
    assert_eq!(boss.parts[report.part_index].role, PartRole::Turret);
    boss.damage_part(report.part_index, 1000);
    let report = boss.route_damage(10, &mut rng).unwrap();
    assert_eq!(boss.parts[report.part_index].role, PartRole::Core);
}

#[test]
fn untargeted_damage_picks_randomly_among_equal_parts() {
    let def = test_definition(vec![
        part(PartRole::Core, Vec2::ZERO, Vec2::new(60.0, 60.0), 100, true),
        part(
            PartRole::Turret,
            Vec2::new(-80.0, 0.0),
            Vec2::new(40.0, 40.0),
            1000,
            true,
        ),
        part(
            PartRole::Turret,
            Vec2::new(80.0, 0.0),
            Vec2::new(40.0, 40.0),
            1000,
            true,
        ),
    ]);
    let mut chosen = std::collections::HashSet::new();
    for seed in 0..32 {
        let mut boss = build_boss(
            &def,
            Vec2::new(0.0, 200.0),
            DifficultyProfile::NORMAL,
            1,
            false,
        );
        make_active(&mut boss);
        let mut rng = StdRng::seed_from_u64(seed);
        let report = boss.route_damage(5, &mut rng).unwrap();
        chosen.insert(report.part_index);
    }
    assert_eq!(chosen.len(), 2);
}

#[test]
fn armor_never_takes_routed_damage() {
    let def = test_definition(vec![
        part(PartRole::Core, Vec2::ZERO, Vec2::new(60.0, 60.0), 100, true),
        part(
            PartRole::Armor,
            Vec2::new(0.0, 40.0),
            Vec2::new(120.0, 30.0),
            1,
            false,
        ),
    ]);
    let mut boss = build_boss(
        &def,
        Vec2::new(0.0, 200.0),
        DifficultyProfile::NORMAL,
        1,
        false,
    );
    make_active(&mut boss);
    let mut rng = StdRng::seed_from_u64(5);
    let report = boss.route_damage(10, &mut rng).unwrap();
    assert_eq!(boss.parts[report.part_index].role, PartRole::Core);
}

#[test]
fn boss_dies_when_the_last_core_dies_and_reports_it_once() {
    let def = test_definition(vec![
        part(
            PartRole::Core,
            Vec2::new(-60.0, 0.0),
            Vec2::new(50.0, 50.0),
            100,
            true,
        ),
        part(
            PartRole::Core,
            Vec2::new(60.0, 0.0),
            Vec2::new(50.0, 50.0),
            100,
            true,
        ),
        part(
            PartRole::Turret,
            Vec2::new(0.0, -40.0),
            Vec2::new(40.0, 40.0),
            100,
            true,
        ),
    ]);
    let mut boss = build_boss(
        &def,
        Vec2::new(0.0, 200.0),
        DifficultyProfile::NORMAL,
        1,
        false,
    );
    make_active(&mut boss);
    // Losing the turret and one core leaves the boss alive.
    let report = boss.damage_part(2, 1000);
    assert!(report.part_destroyed);
    assert!(!report.boss_destroyed);
    let report = boss.damage_part(0, 1000);
    assert!(report.part_destroyed);
    assert!(!report.boss_destroyed);
    assert!(!boss.destroyed);
    let report = boss.damage_part(1, 1000);
    assert!(report.boss_destroyed);
    assert!(boss.destroyed);
    assert!(report.score_awarded >= boss.score);
    // Further damage never re-reports destruction.
    let report = boss.damage_part(1, 1000);
    assert!(!report.boss_destroyed);
    assert_eq!(report.score_awarded, 0);
}

#[test]
fn core_death_ends_the_encounter_even_with_turrets_alive() {
    let def = test_definition(vec![
        part(PartRole::Core, Vec2::ZERO, Vec2::new(60.0, 60.0), 40, true),
        part(
            PartRole::Turret,
            Vec2::new(-80.0, 0.0),
            Vec2::new(40.0, 40.0),
            12,
            true,
        ),
        part(
            PartRole::Turret,
            Vec2::new(80.0, 0.0),
            Vec2::new(40.0, 40.0),
            12,
            true,
        ),
    ]);
    let mut boss = build_boss(
        &def,
        Vec2::new(0.0, 200.0),
        DifficultyProfile::NORMAL,
        1,
        false,
    );
    make_active(&mut boss);
    let report = boss.damage_part(0, 40);
    assert!(report.boss_destroyed);
    assert!(boss.parts[1].active);
    assert!(boss.parts[2].active);
}

#[test]
fn enrage_fires_once_below_the_health_threshold() {
    let def = test_definition(vec![
        part(PartRole::Core, Vec2::ZERO, Vec2::new(60.0, 60.0), 100, true),
        armed(
            part(
                PartRole::Turret,
                Vec2::new(-80.0, 0.0),
                Vec2::new(40.0, 40.0),
                100,
                true,
            ),
            2.0,
        ),
    ]);
    let mut boss = build_boss(
        &def,
        Vec2::new(0.0, 200.0),
        DifficultyProfile::NORMAL,
        1,
        false,
    );
    make_active(&mut boss);
    let interval_before = boss.parts[1]
        .weapon
        .as_ref()
        .map(|w| w.fire_timer.duration())
        .unwrap();
    // 200 aggregate health; drop to 65 (32.5%), still calm.
    boss.damage_part(1, 40);
    boss.damage_part(0, 95);
    assert!(!boss.enraged);
    // One more hit crosses 30%.
    boss.damage_part(1, 10);
    assert!(boss.enraged);
    let interval_after = boss.parts[1]
        .weapon
        .as_ref()
        .map(|w| w.fire_timer.duration())
        .unwrap();
    assert!(interval_after < interval_before);
    // Enrage never stacks.
    boss.damage_part(1, 10);
    let interval_final = boss.parts[1]
        .weapon
        .as_ref()
        .map(|w| w.fire_timer.duration())
        .unwrap();
    assert_eq!(interval_after, interval_final);
}

#[test]
fn every_movement_pattern_respects_the_horizontal_bound() {
    let patterns = [
        MovementPattern::Sweep,
        MovementPattern::SlowSweep,
        MovementPattern::Weave,
        MovementPattern::FigureEight,
        MovementPattern::Chase,
        MovementPattern::Erratic,
        MovementPattern::ZigZag,
    ];
    for pattern in patterns {
        let mut def = test_definition(vec![part(
            PartRole::Core,
            Vec2::ZERO,
            Vec2::new(60.0, 60.0),
            100,
            true,
        )]);
        def.movement = pattern;
        def.speed = 400.0;
        let mut boss = build_boss(
            &def,
            Vec2::new(0.0, 200.0),
            DifficultyProfile::NORMAL,
            1,
            false,
        );
        make_active(&mut boss);
        let limit = HALF_WIDTH - boss.size.x / 2.0 + MOVEMENT_MARGIN;
        let far_player = Some(Vec2::new(10_000.0, -300.0));
        for _ in 0..(20.0 / STEP) as usize {
            boss.advance(STEP, far_player, HALF_WIDTH);
            assert!(
                boss.center.x.abs() <= limit + 1e-3,
                "{:?} escaped the bound",
                pattern
            );
        }
    }
}

#[test]
fn health_ratio_ignores_non_destroyable_parts() {
    let def = test_definition(vec![
        part(PartRole::Core, Vec2::ZERO, Vec2::new(60.0, 60.0), 100, true),
        part(
            PartRole::Armor,
            Vec2::new(0.0, 40.0),
            Vec2::new(120.0, 30.0),
            999,
            false,
        ),
    ]);
    let mut boss = build_boss(
        &def,
        Vec2::new(0.0, 200.0),
        DifficultyProfile::NORMAL,
        1,
        false,
    );
    assert_eq!(boss.total_max_health, 100);
    assert!((boss.health_ratio() - 1.0).abs() < 1e-6);
    make_active(&mut boss);
    boss.damage_part(0, 50);
    assert!((boss.health_ratio() - 0.5).abs() < 1e-6);
}
