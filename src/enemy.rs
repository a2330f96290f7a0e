use bevy::prelude::*;
use crate::{
    audio::{PlaySoundEvent, SoundEffect},
    components::{Damage, Health},
    game::{AppState, GameState, RenderConfig, SCREEN_HEIGHT},
    projectiles::{Faction, Projectile},
    sprite_bank::SpriteBank,
};

const ESCORT_SIZE: Vec2 = Vec2::new(40.0, 40.0);
const ESCORT_BASE_HEALTH: i32 = 30;
const ESCORT_BASE_SCORE: u32 = 100;
const ESCORT_SPEED: f32 = 90.0;
const ESCORT_WEAVE_AMPLITUDE: f32 = 28.0;
const ESCORT_Z_POS: f32 = 0.4;
const GLOW_SCALE: f32 = 1.5;

/// Escort drones that fly in ahead of a boss. Deliberately simple next to
/// the boss itself: straight drift down with a small weave.
#[derive(Component)]
pub struct Enemy {
    pub score: u32,
    pub weave_phase: f32,
}

pub fn spawn_escort(
    commands: &mut Commands,
    sprite_bank: &SpriteBank,
    render_config: &RenderConfig,
    position: Vec2,
    level: u32,
) {
    let health = ESCORT_BASE_HEALTH + (level.saturating_sub(1) as i32) * 4;
    let score = ESCORT_BASE_SCORE + level.saturating_sub(1) * 10;
    let mut entity = commands.spawn((
        SpriteBundle {
            texture: sprite_bank.get_or_fallback("escort_drone"),
            sprite: Sprite {
                custom_size: Some(ESCORT_SIZE),
                color: Color::rgb(0.6, 0.9, 0.7),
                ..default()
            },
            transform: Transform::from_translation(position.extend(ESCORT_Z_POS)),
            ..default()
        },
        Enemy {
            score,
            weave_phase: position.x * 0.05,
        },
        Health(health),
        Name::new("EscortDrone"),
    ));
    // Glow quad is skipped in performance mode.
    if render_config.enemy_glow {
        entity.with_children(|parent| {
            parent.spawn((
                SpriteBundle {
                    texture: sprite_bank.fallback(),
                    sprite: Sprite {
                        custom_size: Some(ESCORT_SIZE * GLOW_SCALE),
                        color: Color::rgba(0.4, 1.0, 0.6, 0.18),
                        ..default()
                    },
                    transform: Transform::from_xyz(0.0, 0.0, -0.05),
                    ..default()
                },
                Name::new("EscortGlow"),
            ));
        });
    }
}

pub struct EnemyPlugin;

fn should_despawn_all_entities_on_session_end(next_state: Res<NextState<AppState>>) -> bool {
    matches!(
        next_state.0,
        Some(AppState::MainMenu) | Some(AppState::GameOver)
    )
}

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                escort_movement_system,
                player_projectile_escort_collision_system,
                escort_offscreen_despawn_system,
            )
                .chain()
                .run_if(in_state(AppState::InGame)),
        )
        .add_systems(
            OnExit(AppState::InGame),
            despawn_all_enemies.run_if(should_despawn_all_entities_on_session_end),
        );
    }
}

pub fn despawn_all_enemies(mut commands: Commands, enemy_query: Query<Entity, With<Enemy>>) {
    for entity in enemy_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

fn escort_movement_system(time: Res<Time>, mut query: Query<(&Enemy, &mut Transform)>) {
    for (enemy, mut transform) in query.iter_mut() {
        transform.translation.y -= ESCORT_SPEED * time.delta_seconds();
        transform.translation.x +=
            (time.elapsed_seconds() * 2.0 + enemy.weave_phase).cos() * ESCORT_WEAVE_AMPLITUDE
                * time.delta_seconds();
    }
}

fn player_projectile_escort_collision_system(
    mut commands: Commands,
    time: Res<Time>,
    sprite_bank: Res<SpriteBank>,
    mut game_state: ResMut<GameState>,
    projectile_query: Query<(Entity, &GlobalTransform, &Damage, &Projectile)>,
    mut enemy_query: Query<(Entity, &GlobalTransform, &mut Health, &Enemy)>,
    mut sound_event_writer: EventWriter<PlaySoundEvent>,
) {
    for (projectile_entity, projectile_gtransform, projectile_damage, projectile) in
        projectile_query.iter()
    {
        if projectile.faction != Faction::Player {
            continue;
        }
        let hit_point = projectile_gtransform.translation().truncate();
        for (enemy_entity, enemy_gtransform, mut enemy_health, enemy) in enemy_query.iter_mut() {
            let enemy_position = enemy_gtransform.translation().truncate();
            if hit_point.distance(enemy_position) > ESCORT_SIZE.x / 2.0 {
                continue;
            }
            commands.entity(projectile_entity).despawn_recursive();
            enemy_health.0 -= projectile_damage.0;
            if enemy_health.0 <= 0 {
                game_state.score += enemy.score;
                sound_event_writer.send(PlaySoundEvent(SoundEffect::EnemyDown));
                crate::visual_effects::spawn_explosion_burst(
                    &mut commands,
                    &sprite_bank,
                    enemy_position,
                    Color::rgb(0.6, 0.9, 0.7),
                    10,
                    &time,
                );
                commands.entity(enemy_entity).despawn_recursive();
            }
            break;
        }
    }
}

fn escort_offscreen_despawn_system(
    mut commands: Commands,
    query: Query<(Entity, &Transform), With<Enemy>>,
) {
    for (entity, transform) in query.iter() {
        if transform.translation.y < -SCREEN_HEIGHT / 2.0 - ESCORT_SIZE.y {
            commands.entity(entity).despawn_recursive();
        }
    }
}
