use bevy::prelude::*;
use crate::{
    audio::{PlaySoundEvent, SoundEffect},
    components::{Damage, Lifetime, Velocity},
    game::AppState,
    player::{PlayerShip, PLAYER_SIZE},
    sprite_bank::SpriteBank,
};

pub const PLAYER_BOLT_DAMAGE: i32 = 12;
pub const BOSS_BOLT_DAMAGE: i32 = 10;
pub const PROJECTILE_SPRITE_SIZE: Vec2 = Vec2::new(14.0, 14.0);
const PLAYER_BOLT_COLOR: Color = Color::rgb(0.5, 0.9, 1.0);
const BOSS_BOLT_COLOR: Color = Color::rgb(1.0, 0.45, 0.3);
const PROJECTILE_LIFETIME: f32 = 3.5;
const PROJECTILE_Z_POS: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Player,
    Boss,
}

#[derive(Component)]
pub struct Projectile {
    pub faction: Faction,
}

/// The `spawnProjectile(x, y, vx, vy, faction)` boundary: fire-and-forget,
/// no return value consumed by callers.
pub fn spawn_projectile(
    commands: &mut Commands,
    sprite_bank: &SpriteBank,
    position: Vec2,
    velocity: Vec2,
    faction: Faction,
) {
    let (sprite_key, color, damage) = match faction {
        Faction::Player => ("bolt_player", PLAYER_BOLT_COLOR, PLAYER_BOLT_DAMAGE),
        Faction::Boss => ("bolt_boss", BOSS_BOLT_COLOR, BOSS_BOLT_DAMAGE),
    };
    commands.spawn((
        SpriteBundle {
            texture: sprite_bank.get_or_fallback(sprite_key),
            sprite: Sprite {
                custom_size: Some(PROJECTILE_SPRITE_SIZE),
                color,
                ..default()
            },
            transform: Transform::from_translation(position.extend(PROJECTILE_Z_POS))
                .with_rotation(Quat::from_rotation_z(velocity.y.atan2(velocity.x))),
            ..default()
        },
        Projectile { faction },
        Velocity(velocity),
        Damage(damage),
        Lifetime {
            timer: Timer::from_seconds(PROJECTILE_LIFETIME, TimerMode::Once),
        },
        Name::new("Projectile"),
    ));
}

pub struct ProjectilesPlugin;

fn should_despawn_all_entities_on_session_end(next_state: Res<NextState<AppState>>) -> bool {
    matches!(
        next_state.0,
        Some(AppState::MainMenu) | Some(AppState::GameOver)
    )
}

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                projectile_movement_system,
                boss_projectile_player_collision_system,
                projectile_lifetime_system,
            )
                .chain()
                .run_if(in_state(AppState::InGame)),
        )
        .add_systems(
            OnExit(AppState::InGame),
            despawn_all_projectiles.run_if(should_despawn_all_entities_on_session_end),
        );
    }
}

pub fn despawn_all_projectiles(
    mut commands: Commands,
    projectile_query: Query<Entity, With<Projectile>>,
) {
    for entity in projectile_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

fn projectile_movement_system(
    mut query: Query<(&mut Transform, &Velocity), With<Projectile>>,
    time: Res<Time>,
) {
    for (mut transform, velocity) in query.iter_mut() {
        transform.translation.x += velocity.0.x * time.delta_seconds();
        transform.translation.y += velocity.0.y * time.delta_seconds();
    }
}

fn boss_projectile_player_collision_system(
    mut commands: Commands,
    projectile_query: Query<(Entity, &GlobalTransform, &Damage, &Projectile)>,
    mut player_query: Query<(&GlobalTransform, &mut crate::components::Health, &mut PlayerShip)>,
    mut sound_event_writer: EventWriter<PlaySoundEvent>,
) {
    let Ok((player_gtransform, mut player_health, mut player)) = player_query.get_single_mut()
    else {
        return;
    };
    for (projectile_entity, projectile_gtransform, projectile_damage, projectile) in
        projectile_query.iter()
    {
        if projectile.faction != Faction::Boss {
            continue;
        }
        let distance = projectile_gtransform
            .translation()
            .truncate()
            .distance(player_gtransform.translation().truncate());
        let projectile_radius = PROJECTILE_SPRITE_SIZE.x / 2.0;
        let player_radius = PLAYER_SIZE.x / 2.0;
        if distance < projectile_radius + player_radius {
            if player.invincibility_timer.finished() {
                sound_event_writer.send(PlaySoundEvent(SoundEffect::PlayerHit));
                player_health.0 -= projectile_damage.0;
                player.invincibility_timer.reset();
            }
            commands.entity(projectile_entity).despawn_recursive();
        }
    }
}

fn projectile_lifetime_system(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Lifetime), With<Projectile>>,
) {
    for (entity, mut lifetime) in query.iter_mut() {
        lifetime.timer.tick(time.delta());
        if lifetime.timer.just_finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
