use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use crate::{
    audio::{PlaySoundEvent, SoundEffect},
    boss_defs::{BossLibrary, MovementPattern},
    boss_part::{pattern_velocities, BossPart, PartRole},
    components::{Damage, Health},
    game::{AppState, GameState, SCREEN_HEIGHT, SCREEN_WIDTH},
    player::{PlayerShip, PLAYER_SIZE},
    projectiles::{spawn_projectile, Faction, Projectile},
    sprite_bank::SpriteBank,
    visual_effects::{spawn_damage_text, spawn_explosion_burst},
};

pub const BOSS_WARNING_SECS: f32 = 2.5;
pub const BOSS_DESCEND_SECS: f32 = 1.8;
pub const BOSS_DEPLOY_SECS: f32 = 1.2;
pub const BOSS_STAGING_OFFSET: f32 = 260.0;
pub const MOVEMENT_MARGIN: f32 = 24.0;
pub const ENRAGE_HEALTH_RATIO: f32 = 0.3;
pub const ENRAGE_FIRE_INTERVAL_FACTOR: f32 = 0.55;
const BOSS_CONTACT_DAMAGE: i32 = 15;
const BOSS_Z_POS: f32 = 0.5;
const PART_Z_STEP: f32 = 0.01;
const CHASE_TRACKING_RATE: f32 = 1.6;

/// Untargeted damage picks the highest-priority role that still has a live
/// part, with random choice among parts of that role. Armor is deliberately
/// absent from the list.
const ROUTE_PRIORITY: [PartRole; 5] = [
    PartRole::Shield,
    PartRole::Turret,
    PartRole::Arm,
    PartRole::Weakpoint,
    PartRole::Core,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPhase {
    Warning,
    Descend,
    Deploy,
    Active,
}

/// A projectile the boss wants spawned this frame.
#[derive(Debug, Clone, Copy)]
pub struct Shot {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Copy)]
pub struct DamageReport {
    pub part_index: usize,
    pub part_destroyed: bool,
    pub boss_destroyed: bool,
    pub score_awarded: u32,
}

#[derive(Event)]
pub struct BossDefeated {
    pub score: u32,
    pub position: Vec2,
}

/// Marker on a child sprite entity mirroring `Boss::parts[index]`.
#[derive(Component)]
pub struct PartVisual {
    pub index: usize,
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

pub fn ease_out_elastic(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        let c = std::f32::consts::TAU / 3.0;
        2.0_f32.powf(-10.0 * t) * ((10.0 * t - 0.75) * c).sin() + 1.0
    }
}

#[derive(Component)]
pub struct Boss {
    pub name: &'static str,
    pub score: u32,
    pub size: Vec2,
    pub speed: f32,
    pub movement: MovementPattern,
    pub mini: bool,
    pub center: Vec2,
    pub anchor_x: f32,
    pub target_y: f32,
    pub staging_y: f32,
    pub direction: f32,
    pub phase: EntryPhase,
    pub phase_time: f32,
    pub active_time: f32,
    pub spread: f32,
    pub enraged: bool,
    pub destroyed: bool,
    pub total_max_health: i32,
    pub parts: Vec<BossPart>,
}

impl Boss {
    pub fn aggregate_health(&self) -> i32 {
        self.parts
            .iter()
            .filter(|p| p.destroyable)
            .map(|p| p.health)
            .sum()
    }

    pub fn health_ratio(&self) -> f32 {
        if self.total_max_health <= 0 {
            return 0.0;
        }
        self.aggregate_health() as f32 / self.total_max_health as f32
    }

    /// Combat gate: nothing fires, routes damage or deals contact damage
    /// before the entry sequence finishes.
    pub fn is_active(&self) -> bool {
        self.phase == EntryPhase::Active && !self.destroyed
    }

    /// Drives the entry state machine and, once active, the movement
    /// pattern. Part positions are refreshed at the end regardless of phase
    /// so the deploy spread animates.
    pub fn advance(&mut self, dt: f32, player: Option<Vec2>, half_width: f32) {
        self.phase_time += dt;
        match self.phase {
            EntryPhase::Warning => {
                self.center.y = self.staging_y;
                self.spread = 0.0;
                if self.phase_time >= BOSS_WARNING_SECS {
                    self.phase = EntryPhase::Descend;
                    self.phase_time = 0.0;
                }
            }
            EntryPhase::Descend => {
                let t = self.phase_time / BOSS_DESCEND_SECS;
                self.center.y =
                    self.staging_y + (self.target_y - self.staging_y) * ease_out_cubic(t);
                self.spread = 0.0;
                if t >= 1.0 {
                    self.center.y = self.target_y;
                    self.phase = EntryPhase::Deploy;
                    self.phase_time = 0.0;
                }
            }
            EntryPhase::Deploy => {
                let t = self.phase_time / BOSS_DEPLOY_SECS;
                self.spread = ease_out_elastic(t);
                if t >= 1.0 {
                    self.spread = 1.0;
                    self.phase = EntryPhase::Active;
                    self.phase_time = 0.0;
                }
            }
            EntryPhase::Active => {
                self.active_time += dt;
                self.apply_movement(dt, player, half_width);
                self.clamp_center(half_width);
            }
        }
        let time = self.active_time;
        let (center, spread) = (self.center, self.spread);
        for part in &mut self.parts {
            part.update_position(center, time, spread);
        }
    }

    fn apply_movement(&mut self, dt: f32, player: Option<Vec2>, half_width: f32) {
        let t = self.active_time;
        let bound = half_width - self.size.x / 2.0;
        match self.movement {
            MovementPattern::Sweep | MovementPattern::SlowSweep => {
                let speed = match self.movement {
                    MovementPattern::SlowSweep => self.speed * 0.5,
                    _ => self.speed,
                };
                self.center.x += self.direction * speed * dt;
                if self.center.x.abs() >= bound {
                    self.direction = -self.direction;
                }
                self.center.y = self.target_y;
            }
            MovementPattern::Weave => {
                self.center.x = self.anchor_x + (t * 1.1).sin() * half_width * 0.55;
                self.center.y = self.target_y + (t * 0.35).sin() * 36.0;
            }
            MovementPattern::FigureEight => {
                self.center.x = self.anchor_x + (t * 0.9).sin() * half_width * 0.5;
                self.center.y = self.target_y + (t * 1.8).sin() * 48.0;
            }
            MovementPattern::Chase => {
                if let Some(player) = player {
                    let step = (CHASE_TRACKING_RATE * dt).min(1.0);
                    self.center.x += (player.x - self.center.x) * step;
                }
                self.center.y = self.target_y + (t * 1.3).sin() * 30.0;
            }
            MovementPattern::Erratic => {
                self.center.x =
                    self.anchor_x + ((t * 1.7).sin() + 0.6 * (t * 0.9).sin()) * half_width * 0.45;
                self.center.y = self.target_y + (t * 2.3).sin() * 18.0;
            }
            MovementPattern::ZigZag => {
                self.center.x += self.direction * self.speed * dt;
                if self.center.x.abs() >= bound {
                    self.direction = -self.direction;
                }
                self.center.y = self.target_y + (t * 6.0).sin() * 22.0;
            }
        }
    }

    /// Hard bound applied after every movement step, whatever the pattern
    /// computed.
    fn clamp_center(&mut self, half_width: f32) {
        let limit = half_width - self.size.x / 2.0 + MOVEMENT_MARGIN;
        self.center.x = self.center.x.clamp(-limit, limit);
    }

    /// Ticks every live weapon and appends the shots due this frame. Timers
    /// only run while the boss is active, so entry phases stay quiet.
    pub fn collect_shots(
        &mut self,
        dt: f32,
        player: Option<Vec2>,
        rng: &mut impl Rng,
        out: &mut Vec<Shot>,
    ) {
        if !self.is_active() {
            return;
        }
        let elapsed = self.active_time;
        for part in &mut self.parts {
            if !part.active {
                continue;
            }
            let origin = part.position;
            let Some(weapon) = &mut part.weapon else {
                continue;
            };
            weapon.fire_timer.tick(std::time::Duration::from_secs_f32(dt));
            if !weapon.fire_timer.just_finished() {
                continue;
            }
            let velocities = pattern_velocities(
                weapon.pattern,
                origin,
                player,
                elapsed,
                weapon.projectile_speed,
                weapon.shot_count,
                rng,
            );
            out.extend(velocities.into_iter().map(|velocity| Shot {
                position: origin,
                velocity,
            }));
        }
    }

    /// Point hit test for targeted damage. Non-core parts are checked before
    /// cores so a shield overlapping the core soaks the hit.
    pub fn part_hit(&self, point: Vec2) -> Option<usize> {
        if !self.is_active() {
            return None;
        }
        let non_core = self
            .parts
            .iter()
            .position(|p| p.role != PartRole::Core && p.contains(point));
        non_core.or_else(|| {
            self.parts
                .iter()
                .position(|p| p.role == PartRole::Core && p.contains(point))
        })
    }

    /// Circle overlap variant used for contact damage and area blasts, with
    /// the same non-core-first ordering.
    pub fn part_overlapping_circle(&self, center: Vec2, radius: f32) -> Option<usize> {
        if !self.is_active() {
            return None;
        }
        let non_core = self
            .parts
            .iter()
            .position(|p| p.role != PartRole::Core && p.overlaps_circle(center, radius));
        non_core.or_else(|| {
            self.parts
                .iter()
                .position(|p| p.role == PartRole::Core && p.overlaps_circle(center, radius))
        })
    }

    pub fn damage_part(&mut self, index: usize, amount: i32) -> DamageReport {
        let part_destroyed = self.parts[index].take_damage(amount);
        let mut score_awarded = if part_destroyed {
            self.parts[index].score
        } else {
            0
        };
        let boss_destroyed = self.settle_after_damage();
        if boss_destroyed {
            score_awarded += self.score;
        }
        DamageReport {
            part_index: index,
            part_destroyed,
            boss_destroyed,
            score_awarded,
        }
    }

    /// Untargeted damage entry point. Walks the role priority list and picks
    /// a random live part from the first role that has one.
    pub fn route_damage(&mut self, amount: i32, rng: &mut impl Rng) -> Option<DamageReport> {
        if !self.is_active() {
            return None;
        }
        for role in ROUTE_PRIORITY {
            let candidates: Vec<usize> = self
                .parts
                .iter()
                .enumerate()
                .filter(|(_, p)| p.role == role && p.active && p.destroyable)
                .map(|(i, _)| i)
                .collect();
            if let Some(&index) = candidates.choose(rng) {
                return Some(self.damage_part(index, amount));
            }
        }
        None
    }

    /// Returns true exactly once, on the damage call that deactivates the
    /// last core. Also trips the one-time enrage.
    fn settle_after_damage(&mut self) -> bool {
        let mut boss_destroyed = false;
        if !self.destroyed
            && self
                .parts
                .iter()
                .filter(|p| p.role == PartRole::Core)
                .all(|p| !p.active)
        {
            self.destroyed = true;
            boss_destroyed = true;
        }
        if !self.enraged && !self.destroyed && self.health_ratio() < ENRAGE_HEALTH_RATIO {
            self.enraged = true;
            for part in &mut self.parts {
                part.shorten_fire_interval(ENRAGE_FIRE_INTERVAL_FACTOR);
            }
        }
        boss_destroyed
    }
}

pub struct BossPlugin;

fn should_despawn_all_entities_on_session_end(next_state: Res<NextState<AppState>>) -> bool {
    matches!(
        next_state.0,
        Some(AppState::MainMenu) | Some(AppState::GameOver)
    )
}

impl Plugin for BossPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(BossLibrary::standard())
            .add_event::<BossDefeated>()
            .add_systems(
                Update,
                (
                    boss_update_system,
                    boss_fire_system,
                    boss_hit_system,
                    boss_contact_damage_system,
                    part_visual_sync_system,
                    boss_warning_telegraph_system,
                )
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                OnExit(AppState::InGame),
                despawn_all_bosses.run_if(should_despawn_all_entities_on_session_end),
            );
    }
}

pub fn despawn_all_bosses(mut commands: Commands, boss_query: Query<Entity, With<Boss>>) {
    for entity in boss_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

fn boss_update_system(
    time: Res<Time>,
    player_query: Query<&Transform, (With<PlayerShip>, Without<Boss>)>,
    mut boss_query: Query<(&mut Boss, &mut Transform)>,
) {
    let player_position = player_query
        .get_single()
        .ok()
        .map(|t| t.translation.truncate());
    for (mut boss, mut transform) in boss_query.iter_mut() {
        boss.advance(time.delta_seconds(), player_position, SCREEN_WIDTH / 2.0);
        transform.translation = boss.center.extend(BOSS_Z_POS);
    }
}

fn boss_fire_system(
    mut commands: Commands,
    time: Res<Time>,
    sprite_bank: Res<SpriteBank>,
    player_query: Query<&Transform, (With<PlayerShip>, Without<Boss>)>,
    mut boss_query: Query<&mut Boss>,
    mut sound_event_writer: EventWriter<PlaySoundEvent>,
) {
    let player_position = player_query
        .get_single()
        .ok()
        .map(|t| t.translation.truncate());
    let mut rng = rand::thread_rng();
    let mut shots = Vec::new();
    for mut boss in boss_query.iter_mut() {
        boss.collect_shots(time.delta_seconds(), player_position, &mut rng, &mut shots);
    }
    if shots.is_empty() {
        return;
    }
    sound_event_writer.send(PlaySoundEvent(SoundEffect::BossShoot));
    for shot in shots {
        spawn_projectile(
            &mut commands,
            &sprite_bank,
            shot.position,
            shot.velocity,
            Faction::Boss,
        );
    }
}

fn boss_hit_system(
    mut commands: Commands,
    time: Res<Time>,
    asset_server: Res<AssetServer>,
    sprite_bank: Res<SpriteBank>,
    mut game_state: ResMut<GameState>,
    projectile_query: Query<(Entity, &GlobalTransform, &Damage, &Projectile)>,
    mut boss_query: Query<(Entity, &mut Boss)>,
    mut sound_event_writer: EventWriter<PlaySoundEvent>,
    mut boss_defeated_writer: EventWriter<BossDefeated>,
) {
    for (projectile_entity, projectile_gtransform, projectile_damage, projectile) in
        projectile_query.iter()
    {
        if projectile.faction != Faction::Player {
            continue;
        }
        let hit_point = projectile_gtransform.translation().truncate();
        for (boss_entity, mut boss) in boss_query.iter_mut() {
            let Some(part_index) = boss.part_hit(hit_point) else {
                continue;
            };
            commands.entity(projectile_entity).despawn_recursive();
            let report = boss.damage_part(part_index, projectile_damage.0);
            game_state.score += report.score_awarded;
            spawn_damage_text(
                &mut commands,
                &asset_server,
                hit_point.extend(0.9),
                projectile_damage.0,
                &time,
            );
            if report.part_destroyed {
                let part = &boss.parts[report.part_index];
                sound_event_writer.send(PlaySoundEvent(SoundEffect::PartDestroyed));
                spawn_explosion_burst(
                    &mut commands,
                    &sprite_bank,
                    part.position,
                    part.tint,
                    18,
                    &time,
                );
            }
            if report.boss_destroyed {
                sound_event_writer.send(PlaySoundEvent(SoundEffect::BossDown));
                spawn_explosion_burst(
                    &mut commands,
                    &sprite_bank,
                    boss.center,
                    Color::rgb(1.0, 0.75, 0.4),
                    60,
                    &time,
                );
                boss_defeated_writer.send(BossDefeated {
                    score: boss.score,
                    position: boss.center,
                });
                commands.entity(boss_entity).despawn_recursive();
            }
            break;
        }
    }
}

fn boss_contact_damage_system(
    boss_query: Query<&Boss>,
    mut player_query: Query<(&Transform, &mut Health, &mut PlayerShip)>,
    mut sound_event_writer: EventWriter<PlaySoundEvent>,
) {
    let Ok((player_transform, mut player_health, mut player)) = player_query.get_single_mut()
    else {
        return;
    };
    if !player.invincibility_timer.finished() {
        return;
    }
    let player_position = player_transform.translation.truncate();
    for boss in boss_query.iter() {
        if boss
            .part_overlapping_circle(player_position, PLAYER_SIZE.x / 2.0)
            .is_some()
        {
            sound_event_writer.send(PlaySoundEvent(SoundEffect::PlayerHit));
            player_health.0 -= BOSS_CONTACT_DAMAGE;
            player.invincibility_timer.reset();
            return;
        }
    }
}

fn part_visual_sync_system(
    mut boss_query: Query<(&Boss, &Children, &mut Visibility), Without<PartVisual>>,
    mut part_query: Query<(&PartVisual, &mut Transform, &mut Visibility), Without<Boss>>,
) {
    for (boss, children, mut root_visibility) in boss_query.iter_mut() {
        // The hull stays offscreen and invisible until the warning ends.
        *root_visibility = if boss.phase == EntryPhase::Warning {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
        for child in children.iter() {
            let Ok((visual, mut transform, mut visibility)) = part_query.get_mut(*child) else {
                continue;
            };
            let Some(part) = boss.parts.get(visual.index) else {
                continue;
            };
            let local = part.position - boss.center;
            transform.translation = local.extend(visual.index as f32 * PART_Z_STEP);
            transform.rotation = Quat::from_rotation_z(part.angle);
            *visibility = if part.active {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }
}

#[derive(Component)]
struct BossWarningText;

fn boss_warning_telegraph_system(
    mut commands: Commands,
    time: Res<Time>,
    asset_server: Res<AssetServer>,
    boss_query: Query<&Boss>,
    mut warning_text_query: Query<(Entity, &mut Text), With<BossWarningText>>,
) {
    let any_warning = boss_query
        .iter()
        .any(|boss| boss.phase == EntryPhase::Warning);
    match warning_text_query.get_single_mut() {
        Ok((entity, mut text)) => {
            if !any_warning {
                commands.entity(entity).despawn_recursive();
                return;
            }
            if let Some(section) = text.sections.get_mut(0) {
                let blink = ((time.elapsed_seconds() * 8.0).sin() * 0.5 + 0.5).clamp(0.2, 1.0);
                section.style.color.set_a(blink);
            }
        }
        Err(_) => {
            if any_warning {
                commands.spawn((
                    Text2dBundle {
                        text: Text::from_section(
                            "!! WARNING !!",
                            TextStyle {
                                font: asset_server.load("fonts/FiraSans-Bold.ttf"),
                                font_size: 52.0,
                                color: Color::rgb(1.0, 0.25, 0.25),
                            },
                        ),
                        transform: Transform::from_xyz(0.0, SCREEN_HEIGHT / 4.0, 0.95),
                        ..default()
                    },
                    BossWarningText,
                    Name::new("BossWarningText"),
                ));
            }
        }
    }
}
