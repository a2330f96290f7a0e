use bevy::prelude::*;
use crate::boss_part::{
    BobConfig, FirePattern, OrbitConfig, PartConfig, PartRole, WeaponConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementPattern {
    Sweep,
    SlowSweep,
    Weave,
    FigureEight,
    Chase,
    Erratic,
    ZigZag,
}

#[derive(Debug, Clone)]
pub struct BossDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub score: u32,
    pub size: Vec2,
    pub speed: f32,
    pub movement: MovementPattern,
    pub parts: Vec<PartConfig>,
}

/// Lookup tables for full bosses and mini-bosses. Both lookups fall back to
/// the first entry on an unknown id so a bad table reference still spawns
/// something fightable.
#[derive(Resource)]
pub struct BossLibrary {
    pub bosses: Vec<BossDefinition>,
    pub minis: Vec<BossDefinition>,
}

impl BossLibrary {
    pub fn get_boss_definition(&self, id: &str) -> &BossDefinition {
        self.bosses
            .iter()
            .find(|def| def.id == id)
            .unwrap_or(&self.bosses[0])
    }

    pub fn get_mini_definition(&self, id: &str) -> &BossDefinition {
        self.minis
            .iter()
            .find(|def| def.id == id)
            .unwrap_or(&self.minis[0])
    }

    pub fn boss_id_for_level(&self, level: u32) -> &'static str {
        self.bosses[((level.max(1) - 1) as usize) % self.bosses.len()].id
    }

    pub fn mini_id_for_level(&self, level: u32) -> &'static str {
        self.minis[((level.max(1) - 1) as usize) % self.minis.len()].id
    }

    pub fn standard() -> Self {
        Self {
            bosses: vec![dreadnought_vigil(), lattice_warden(), maw_of_kessler()],
            minis: vec![picket_sentry(), razor_skiff()],
        }
    }
}

fn core_part(offset: Vec2, size: Vec2, health: i32, score: u32) -> PartConfig {
    PartConfig {
        role: PartRole::Core,
        sprite_key: "boss_core",
        tint: Color::rgb(0.95, 0.35, 0.45),
        destroyable: true,
        offset,
        size,
        health,
        score,
        orbit: None,
        bob: None,
        spin_speed: 0.0,
        weapon: None,
    }
}

fn dreadnought_vigil() -> BossDefinition {
    BossDefinition {
        id: "dreadnought_vigil",
        name: "Dreadnought Vigil",
        score: 5000,
        size: Vec2::new(300.0, 140.0),
        speed: 70.0,
        movement: MovementPattern::Sweep,
        parts: vec![
            core_part(Vec2::ZERO, Vec2::new(90.0, 90.0), 400, 1500),
            PartConfig {
                role: PartRole::Turret,
                sprite_key: "boss_turret",
                tint: Color::rgb(0.75, 0.75, 0.85),
                destroyable: true,
                offset: Vec2::new(-110.0, -20.0),
                size: Vec2::new(52.0, 52.0),
                health: 140,
                score: 400,
                orbit: None,
                bob: None,
                spin_speed: 0.6,
                weapon: Some(WeaponConfig {
                    pattern: FirePattern::Aimed,
                    fire_interval_secs: 1.6,
                    projectile_speed: 260.0,
                    shot_count: 1,
                }),
            },
            PartConfig {
                role: PartRole::Turret,
                sprite_key: "boss_turret",
                tint: Color::rgb(0.75, 0.75, 0.85),
                destroyable: true,
                offset: Vec2::new(110.0, -20.0),
                size: Vec2::new(52.0, 52.0),
                health: 140,
                score: 400,
                orbit: None,
                bob: None,
                spin_speed: -0.6,
                weapon: Some(WeaponConfig {
                    pattern: FirePattern::Spread,
                    fire_interval_secs: 2.2,
                    projectile_speed: 230.0,
                    shot_count: 3,
                }),
            },
            PartConfig {
                role: PartRole::Shield,
                sprite_key: "boss_shield",
                tint: Color::rgba(0.45, 0.75, 1.0, 0.8),
                destroyable: true,
                offset: Vec2::new(0.0, -55.0),
                size: Vec2::new(130.0, 36.0),
                health: 220,
                score: 250,
                orbit: None,
                bob: Some(BobConfig {
                    amplitude: 6.0,
                    speed: 1.4,
                }),
                spin_speed: 0.0,
                weapon: None,
            },
            PartConfig {
                role: PartRole::Armor,
                sprite_key: "boss_armor",
                tint: Color::rgb(0.4, 0.42, 0.5),
                destroyable: false,
                offset: Vec2::new(0.0, 45.0),
                size: Vec2::new(200.0, 40.0),
                health: 1,
                score: 0,
                orbit: None,
                bob: None,
                spin_speed: 0.0,
                weapon: None,
            },
        ],
    }
}

fn lattice_warden() -> BossDefinition {
    BossDefinition {
        id: "lattice_warden",
        name: "Lattice Warden",
        score: 6500,
        size: Vec2::new(260.0, 200.0),
        speed: 55.0,
        movement: MovementPattern::FigureEight,
        parts: vec![
            core_part(Vec2::ZERO, Vec2::new(80.0, 80.0), 520, 2000),
            PartConfig {
                role: PartRole::Weakpoint,
                sprite_key: "boss_weakpoint",
                tint: Color::rgb(1.0, 0.9, 0.3),
                destroyable: true,
                offset: Vec2::new(0.0, -70.0),
                size: Vec2::new(34.0, 34.0),
                health: 90,
                score: 800,
                orbit: None,
                bob: Some(BobConfig {
                    amplitude: 10.0,
                    speed: 2.1,
                }),
                spin_speed: 2.0,
                weapon: None,
            },
            PartConfig {
                role: PartRole::Arm,
                sprite_key: "boss_arm",
                tint: Color::rgb(0.6, 0.55, 0.8),
                destroyable: true,
                offset: Vec2::ZERO,
                size: Vec2::new(48.0, 48.0),
                health: 180,
                score: 500,
                orbit: Some(OrbitConfig {
                    radius: 105.0,
                    start_angle: 0.0,
                    angular_speed: 1.1,
                }),
                bob: None,
                spin_speed: 1.1,
                weapon: Some(WeaponConfig {
                    pattern: FirePattern::Radial,
                    fire_interval_secs: 2.8,
                    projectile_speed: 190.0,
                    shot_count: 8,
                }),
            },
            PartConfig {
                role: PartRole::Arm,
                sprite_key: "boss_arm",
                tint: Color::rgb(0.6, 0.55, 0.8),
                destroyable: true,
                offset: Vec2::ZERO,
                size: Vec2::new(48.0, 48.0),
                health: 180,
                score: 500,
                orbit: Some(OrbitConfig {
                    radius: 105.0,
                    start_angle: std::f32::consts::PI,
                    angular_speed: 1.1,
                }),
                bob: None,
                spin_speed: 1.1,
                weapon: Some(WeaponConfig {
                    pattern: FirePattern::Spiral,
                    fire_interval_secs: 3.4,
                    projectile_speed: 170.0,
                    shot_count: 6,
                }),
            },
        ],
    }
}

fn maw_of_kessler() -> BossDefinition {
    BossDefinition {
        id: "maw_of_kessler",
        name: "Maw of Kessler",
        score: 8000,
        size: Vec2::new(340.0, 170.0),
        speed: 95.0,
        movement: MovementPattern::Chase,
        parts: vec![
            core_part(Vec2::new(-70.0, 0.0), Vec2::new(70.0, 70.0), 320, 1200),
            core_part(Vec2::new(70.0, 0.0), Vec2::new(70.0, 70.0), 320, 1200),
            PartConfig {
                role: PartRole::Turret,
                sprite_key: "boss_turret",
                tint: Color::rgb(0.9, 0.6, 0.3),
                destroyable: true,
                offset: Vec2::new(0.0, -50.0),
                size: Vec2::new(56.0, 56.0),
                health: 160,
                score: 450,
                orbit: None,
                bob: None,
                spin_speed: 0.8,
                weapon: Some(WeaponConfig {
                    pattern: FirePattern::Rapid,
                    fire_interval_secs: 2.6,
                    projectile_speed: 280.0,
                    shot_count: 3,
                }),
            },
            PartConfig {
                role: PartRole::Shield,
                sprite_key: "boss_shield",
                tint: Color::rgba(0.45, 0.75, 1.0, 0.8),
                destroyable: true,
                offset: Vec2::new(-70.0, -48.0),
                size: Vec2::new(84.0, 30.0),
                health: 170,
                score: 220,
                orbit: None,
                bob: None,
                spin_speed: 0.0,
                weapon: None,
            },
            PartConfig {
                role: PartRole::Shield,
                sprite_key: "boss_shield",
                tint: Color::rgba(0.45, 0.75, 1.0, 0.8),
                destroyable: true,
                offset: Vec2::new(70.0, -48.0),
                size: Vec2::new(84.0, 30.0),
                health: 170,
                score: 220,
                orbit: None,
                bob: None,
                spin_speed: 0.0,
                weapon: None,
            },
        ],
    }
}

fn picket_sentry() -> BossDefinition {
    BossDefinition {
        id: "picket_sentry",
        name: "Picket Sentry",
        score: 1800,
        size: Vec2::new(150.0, 90.0),
        speed: 110.0,
        movement: MovementPattern::ZigZag,
        parts: vec![
            core_part(Vec2::ZERO, Vec2::new(56.0, 56.0), 180, 700),
            PartConfig {
                role: PartRole::Turret,
                sprite_key: "boss_turret",
                tint: Color::rgb(0.75, 0.75, 0.85),
                destroyable: true,
                offset: Vec2::new(0.0, -40.0),
                size: Vec2::new(40.0, 40.0),
                health: 80,
                score: 250,
                orbit: None,
                bob: None,
                spin_speed: 1.2,
                weapon: Some(WeaponConfig {
                    pattern: FirePattern::Aimed,
                    fire_interval_secs: 1.9,
                    projectile_speed: 250.0,
                    shot_count: 1,
                }),
            },
        ],
    }
}

fn razor_skiff() -> BossDefinition {
    BossDefinition {
        id: "razor_skiff",
        name: "Razor Skiff",
        score: 2200,
        size: Vec2::new(170.0, 80.0),
        speed: 130.0,
        movement: MovementPattern::Erratic,
        parts: vec![
            core_part(Vec2::ZERO, Vec2::new(60.0, 60.0), 210, 850),
            PartConfig {
                role: PartRole::Weakpoint,
                sprite_key: "boss_weakpoint",
                tint: Color::rgb(1.0, 0.9, 0.3),
                destroyable: true,
                offset: Vec2::new(0.0, 42.0),
                size: Vec2::new(28.0, 28.0),
                health: 60,
                score: 500,
                orbit: None,
                bob: Some(BobConfig {
                    amplitude: 7.0,
                    speed: 2.6,
                }),
                spin_speed: 1.8,
                weapon: Some(WeaponConfig {
                    pattern: FirePattern::Spread,
                    fire_interval_secs: 2.4,
                    projectile_speed: 210.0,
                    shot_count: 3,
                }),
            },
        ],
    }
}
