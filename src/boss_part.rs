use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

pub const RAPID_BURST_SHOTS: u32 = 3;
const RAPID_JITTER_RADIANS: f32 = 0.12;
const RAPID_SPEED_STEP: f32 = 45.0;
const SPREAD_STEP_RADIANS: f32 = 18.0 * std::f32::consts::PI / 180.0;
const RADIAL_DRIFT_RADIANS_PER_SEC: f32 = 0.9;
const SPIRAL_SPIN_RADIANS_PER_SEC: f32 = 2.4;
const MIN_FIRE_INTERVAL_SECS: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartRole {
    Core,
    Turret,
    Arm,
    Shield,
    Weakpoint,
    Armor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirePattern {
    Aimed,
    Spread,
    Radial,
    Rapid,
    Spiral,
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitConfig {
    pub radius: f32,
    pub start_angle: f32,
    pub angular_speed: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct BobConfig {
    pub amplitude: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct WeaponConfig {
    pub pattern: FirePattern,
    pub fire_interval_secs: f32,
    pub projectile_speed: f32,
    pub shot_count: u32,
}

/// Designer-authored template for one part of a composite boss.
#[derive(Debug, Clone)]
pub struct PartConfig {
    pub role: PartRole,
    pub sprite_key: &'static str,
    pub tint: Color,
    pub destroyable: bool,
    pub offset: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub score: u32,
    pub orbit: Option<OrbitConfig>,
    pub bob: Option<BobConfig>,
    pub spin_speed: f32,
    pub weapon: Option<WeaponConfig>,
}

#[derive(Debug, Clone)]
pub struct PartWeapon {
    pub pattern: FirePattern,
    pub fire_timer: Timer,
    pub projectile_speed: f32,
    pub shot_count: u32,
}

/// Runtime state of one part. World position is always recomputed from the
/// owning boss's center, never advanced independently.
#[derive(Debug, Clone)]
pub struct BossPart {
    pub role: PartRole,
    pub sprite_key: &'static str,
    pub tint: Color,
    pub destroyable: bool,
    pub offset: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub score: u32,
    pub orbit: Option<OrbitConfig>,
    pub bob: Option<BobConfig>,
    pub spin_speed: f32,
    pub weapon: Option<PartWeapon>,
    pub active: bool,
    pub position: Vec2,
    pub angle: f32,
}

impl BossPart {
    /// Builds a part from its template, applying the factory's combined
    /// difficulty-and-level multipliers.
    pub fn new(
        config: &PartConfig,
        health_scale: f32,
        fire_rate_scale: f32,
        projectile_speed_scale: f32,
    ) -> Self {
        let health = (config.health as f32 * health_scale).round().max(1.0) as i32;
        let weapon = config.weapon.map(|w| PartWeapon {
            pattern: w.pattern,
            fire_timer: Timer::from_seconds(
                (w.fire_interval_secs / fire_rate_scale.max(0.01)).max(MIN_FIRE_INTERVAL_SECS),
                TimerMode::Repeating,
            ),
            projectile_speed: w.projectile_speed * projectile_speed_scale,
            shot_count: w.shot_count,
        });
        Self {
            role: config.role,
            sprite_key: config.sprite_key,
            tint: config.tint,
            destroyable: config.destroyable,
            offset: config.offset,
            size: config.size,
            health,
            max_health: health,
            score: config.score,
            orbit: config.orbit,
            bob: config.bob,
            spin_speed: config.spin_speed,
            weapon,
            active: true,
            position: Vec2::ZERO,
            angle: 0.0,
        }
    }

    /// Recomputes world position from the parent's center plus this part's
    /// offset, orbit and bob terms, scaled by the deploy spread factor.
    pub fn update_position(&mut self, center: Vec2, time: f32, spread: f32) {
        let mut offset = match self.orbit {
            Some(orbit) => {
                let angle = orbit.start_angle + time * orbit.angular_speed;
                Vec2::from_angle(angle) * orbit.radius
            }
            None => self.offset,
        };
        if let Some(bob) = self.bob {
            offset.y += (time * bob.speed).sin() * bob.amplitude;
        }
        self.position = center + offset * spread;
        self.angle = time * self.spin_speed;
    }

    /// Returns whether this call crossed health <= 0. Deactivation is
    /// permanent; hitting an inactive or non-destroyable part is a no-op.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.active || !self.destroyable {
            return false;
        }
        self.health -= amount.max(0);
        if self.health <= 0 {
            self.health = 0;
            self.active = false;
            return true;
        }
        false
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.active
            && (point.x - self.position.x).abs() <= self.size.x / 2.0
            && (point.y - self.position.y).abs() <= self.size.y / 2.0
    }

    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        self.active && self.position.distance(center) < self.bounding_radius() + radius
    }

    pub fn bounding_radius(&self) -> f32 {
        self.size.x.max(self.size.y) / 2.0
    }

    /// One-time enrage hook: permanently shortens the fire interval.
    pub fn shorten_fire_interval(&mut self, factor: f32) {
        if let Some(weapon) = &mut self.weapon {
            let shortened = weapon.fire_timer.duration().as_secs_f32() * factor;
            weapon
                .fire_timer
                .set_duration(Duration::from_secs_f32(shortened.max(MIN_FIRE_INTERVAL_SECS)));
        }
    }
}

/// Pure fire-pattern math: (world position, player position, elapsed time)
/// to a set of velocity vectors. The only side effect a caller performs with
/// these is requesting projectile spawns.
pub fn pattern_velocities(
    pattern: FirePattern,
    origin: Vec2,
    player: Option<Vec2>,
    elapsed: f32,
    speed: f32,
    count: u32,
    rng: &mut impl Rng,
) -> Vec<Vec2> {
    let down = Vec2::NEG_Y;
    let toward_player = player
        .map(|p| (p - origin).normalize_or_zero())
        .filter(|d| *d != Vec2::ZERO)
        .unwrap_or(down);
    match pattern {
        FirePattern::Aimed => vec![toward_player * speed],
        FirePattern::Spread => {
            let n = count.max(1);
            let base = down.to_angle();
            (0..n)
                .map(|i| {
                    let angle = base + (i as f32 - (n - 1) as f32 / 2.0) * SPREAD_STEP_RADIANS;
                    Vec2::from_angle(angle) * speed
                })
                .collect()
        }
        FirePattern::Radial => {
            // Phase drifts with elapsed time so successive volleys rotate.
            let n = count.max(1);
            let phase = elapsed * RADIAL_DRIFT_RADIANS_PER_SEC;
            (0..n)
                .map(|i| {
                    let angle = phase + i as f32 * std::f32::consts::TAU / n as f32;
                    Vec2::from_angle(angle) * speed
                })
                .collect()
        }
        FirePattern::Rapid => {
            let base = toward_player.to_angle();
            (0..RAPID_BURST_SHOTS)
                .map(|i| {
                    let jitter = rng.gen_range(-RAPID_JITTER_RADIANS..RAPID_JITTER_RADIANS);
                    Vec2::from_angle(base + jitter) * (speed + i as f32 * RAPID_SPEED_STEP)
                })
                .collect()
        }
        FirePattern::Spiral => {
            // Unlike Radial, the pattern itself spins continuously.
            let n = count.max(1);
            let phase = elapsed * SPIRAL_SPIN_RADIANS_PER_SEC;
            (0..n)
                .map(|i| {
                    let angle = phase + i as f32 * std::f32::consts::TAU / n as f32;
                    Vec2::from_angle(angle) * speed
                })
                .collect()
        }
    }
}
