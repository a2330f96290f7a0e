use bevy::prelude::*;
use crate::{
    boss::{Boss, EntryPhase, PartVisual, BOSS_STAGING_OFFSET},
    boss_defs::BossDefinition,
    boss_part::BossPart,
    enemy::spawn_escort,
    game::RenderConfig,
    sprite_bank::SpriteBank,
};

/// Level scaling wraps after this many levels so an endless run keeps its
/// difficulty curve instead of growing without bound.
pub const WORLD_LEVELS: u32 = 30;
const EARLY_LEVEL_STEP: f32 = 0.12;
const LATE_LEVEL_STEP: f32 = 0.04;
const EARLY_LEVEL_SPAN: u32 = 10;
const BOSS_Z_POS: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct DifficultyProfile {
    pub health: f32,
    pub speed: f32,
    pub fire_rate: f32,
    pub projectile_speed: f32,
}

impl DifficultyProfile {
    pub const EASY: Self = Self {
        health: 0.75,
        speed: 0.85,
        fire_rate: 0.8,
        projectile_speed: 0.85,
    };
    pub const NORMAL: Self = Self {
        health: 1.0,
        speed: 1.0,
        fire_rate: 1.0,
        projectile_speed: 1.0,
    };
    pub const HARD: Self = Self {
        health: 1.4,
        speed: 1.15,
        fire_rate: 1.3,
        projectile_speed: 1.2,
    };
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::NORMAL
    }
}

pub fn wrapped_level(level: u32) -> u32 {
    (level.max(1) - 1) % WORLD_LEVELS + 1
}

/// Per-level multiplier. Grows fast over the first few levels and then by a
/// smaller step so late wraps stay playable.
pub fn level_scale(level: u32) -> f32 {
    let wrapped = wrapped_level(level);
    let early = (wrapped - 1).min(EARLY_LEVEL_SPAN);
    let late = (wrapped - 1).saturating_sub(EARLY_LEVEL_SPAN);
    1.0 + early as f32 * EARLY_LEVEL_STEP + late as f32 * LATE_LEVEL_STEP
}

/// Pure assembly step: template plus difficulty and level into a ready boss.
/// Minis skip the warning and begin descending immediately.
pub fn build_boss(
    def: &BossDefinition,
    position: Vec2,
    profile: DifficultyProfile,
    level: u32,
    mini: bool,
) -> Boss {
    let scale = level_scale(level);
    let health_scale = profile.health * scale;
    let pressure_scale = 1.0 + (scale - 1.0) * 0.5;
    let fire_rate_scale = profile.fire_rate * pressure_scale;
    let projectile_speed_scale = profile.projectile_speed * pressure_scale;
    let parts: Vec<BossPart> = def
        .parts
        .iter()
        .map(|cfg| BossPart::new(cfg, health_scale, fire_rate_scale, projectile_speed_scale))
        .collect();
    let total_max_health = parts
        .iter()
        .filter(|p| p.destroyable)
        .map(|p| p.max_health)
        .sum();
    let staging_y = position.y + BOSS_STAGING_OFFSET;
    Boss {
        name: def.name,
        score: def.score,
        size: def.size,
        speed: def.speed * profile.speed,
        movement: def.movement,
        mini,
        center: Vec2::new(position.x, staging_y),
        anchor_x: position.x,
        target_y: position.y,
        staging_y,
        direction: 1.0,
        phase: if mini {
            EntryPhase::Descend
        } else {
            EntryPhase::Warning
        },
        phase_time: 0.0,
        active_time: 0.0,
        spread: 0.0,
        enraged: false,
        destroyed: false,
        total_max_health,
        parts,
    }
}

pub fn spawn_boss(
    commands: &mut Commands,
    sprite_bank: &SpriteBank,
    def: &BossDefinition,
    position: Vec2,
    profile: DifficultyProfile,
    level: u32,
    mini: bool,
) {
    let boss = build_boss(def, position, profile, level, mini);
    let center = boss.center;
    commands
        .spawn((
            SpatialBundle {
                transform: Transform::from_translation(center.extend(BOSS_Z_POS)),
                visibility: Visibility::Hidden,
                ..default()
            },
            Name::new(boss.name),
            boss,
        ))
        .with_children(|parent| {
            for (index, part) in def.parts.iter().enumerate() {
                parent.spawn((
                    SpriteBundle {
                        texture: sprite_bank.get_or_fallback(part.sprite_key),
                        sprite: Sprite {
                            custom_size: Some(part.size),
                            color: part.tint,
                            ..default()
                        },
                        ..default()
                    },
                    PartVisual { index },
                    Name::new("BossPart"),
                ));
            }
        });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formation {
    Line,
    Vee,
    Circle,
    Grid,
    Diamond,
}

/// Escort spawn positions for a named formation, centered on `origin`.
pub fn formation_positions(
    formation: Formation,
    count: usize,
    origin: Vec2,
    spacing: f32,
) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    match formation {
        Formation::Line => (0..count)
            .map(|i| {
                let x = (i as f32 - (count - 1) as f32 / 2.0) * spacing;
                origin + Vec2::new(x, 0.0)
            })
            .collect(),
        Formation::Vee => (0..count)
            .map(|i| {
                // Lead ship at the tip, wings alternating left and right.
                let rank = ((i + 1) / 2) as f32;
                let side = if i % 2 == 1 { -1.0 } else { 1.0 };
                origin + Vec2::new(side * rank * spacing, -rank * spacing * 0.6)
            })
            .collect(),
        Formation::Circle => (0..count)
            .map(|i| {
                let angle = i as f32 * std::f32::consts::TAU / count as f32;
                origin + Vec2::from_angle(angle) * spacing
            })
            .collect(),
        Formation::Grid => {
            let columns = (count as f32).sqrt().ceil() as usize;
            (0..count)
                .map(|i| {
                    let col = i % columns;
                    let row = i / columns;
                    let rows = (count + columns - 1) / columns;
                    let x = (col as f32 - (columns - 1) as f32 / 2.0) * spacing;
                    let y = ((rows - 1) as f32 / 2.0 - row as f32) * spacing;
                    origin + Vec2::new(x, y)
                })
                .collect()
        }
        Formation::Diamond => (0..count)
            .map(|i| {
                // Points on the L1 ring, so every ship sits on the diamond edge.
                let angle = i as f32 * std::f32::consts::TAU / count as f32;
                let dir = Vec2::from_angle(angle);
                let l1 = dir.x.abs() + dir.y.abs();
                origin + dir / l1 * spacing
            })
            .collect(),
    }
}

pub fn spawn_escort_wave(
    commands: &mut Commands,
    sprite_bank: &SpriteBank,
    render_config: &RenderConfig,
    formation: Formation,
    count: usize,
    origin: Vec2,
    spacing: f32,
    level: u32,
) {
    for position in formation_positions(formation, count, origin, spacing) {
        spawn_escort(commands, sprite_bank, render_config, position, level);
    }
}
