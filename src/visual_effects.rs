use bevy::prelude::*;
use rand::Rng;
use crate::game::AppState;
use crate::sprite_bank::SpriteBank;

const DAMAGE_TEXT_LIFETIME_SECONDS: f32 = 0.75;
const DAMAGE_TEXT_SPEED: f32 = 60.0;
const PARTICLE_MIN_SPEED: f32 = 40.0;
const PARTICLE_MAX_SPEED: f32 = 190.0;
const PARTICLE_MIN_LIFE: f32 = 0.25;
const PARTICLE_MAX_LIFE: f32 = 0.7;
const PARTICLE_SIZE: Vec2 = Vec2::new(6.0, 6.0);
const PARTICLE_Z: f32 = 0.85;

pub struct VisualEffectsPlugin;

impl Plugin for VisualEffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (animate_damage_text_system, animate_explosion_particles_system)
                .run_if(in_state(AppState::InGame).or_else(in_state(AppState::GameOver))),
        );
    }
}

#[derive(Component)]
pub struct DamageTextEffect {
    pub spawn_time: f32,
    pub velocity: Vec2,
}

#[derive(Component)]
pub struct ExplosionParticle {
    pub spawn_time: f32,
    pub lifetime: f32,
    pub velocity: Vec2,
}

pub fn spawn_damage_text(
    commands: &mut Commands,
    asset_server: &Res<AssetServer>,
    position: Vec3,
    damage_amount: i32,
    time: &Res<Time>,
) {
    let random_offset_x = (rand::random::<f32>() - 0.5) * 20.0;

    commands.spawn((
        Text2dBundle {
            text: Text::from_section(
                damage_amount.to_string(),
                TextStyle {
                    font: asset_server.load("fonts/FiraSans-Bold.ttf"),
                    font_size: 20.0,
                    color: Color::rgb(1.0, 0.85, 0.7),
                },
            ),
            transform: Transform::from_translation(position + Vec3::new(random_offset_x, 10.0, 5.0)),
            ..default()
        },
        DamageTextEffect {
            spawn_time: time.elapsed_seconds(),
            velocity: Vec2::new(random_offset_x * 0.5, DAMAGE_TEXT_SPEED),
        },
        Name::new("DamageText"),
    ));
}

/// Sprite-burst explosion used for part destruction and enemy deaths.
/// Fire-and-forget: each particle carries its own velocity and lifetime.
pub fn spawn_explosion_burst(
    commands: &mut Commands,
    sprite_bank: &SpriteBank,
    position: Vec2,
    color: Color,
    count: usize,
    time: &Res<Time>,
) {
    let mut rng = rand::thread_rng();
    let texture = sprite_bank
        .get("spark")
        .unwrap_or_else(|| sprite_bank.fallback());
    for _ in 0..count {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
        commands.spawn((
            SpriteBundle {
                texture: texture.clone(),
                sprite: Sprite {
                    custom_size: Some(PARTICLE_SIZE),
                    color,
                    ..default()
                },
                transform: Transform::from_translation(position.extend(PARTICLE_Z)),
                ..default()
            },
            ExplosionParticle {
                spawn_time: time.elapsed_seconds(),
                lifetime: rng.gen_range(PARTICLE_MIN_LIFE..PARTICLE_MAX_LIFE),
                velocity: Vec2::from_angle(angle) * speed,
            },
            Name::new("ExplosionParticle"),
        ));
    }
}

fn animate_damage_text_system(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &DamageTextEffect, &mut Transform, &mut Text)>,
) {
    let current_time = time.elapsed_seconds();
    for (entity, effect_data, mut transform, mut text_component) in query.iter_mut() {
        let time_alive = current_time - effect_data.spawn_time;
        if time_alive > DAMAGE_TEXT_LIFETIME_SECONDS {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        transform.translation.x += effect_data.velocity.x * time.delta_seconds();
        transform.translation.y += effect_data.velocity.y * time.delta_seconds();
        if let Some(section) = text_component.sections.get_mut(0) {
            let alpha_progress = (time_alive / DAMAGE_TEXT_LIFETIME_SECONDS).powf(2.0);
            section.style.color.set_a((1.0 - alpha_progress).max(0.0));
        }
    }
}

fn animate_explosion_particles_system(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &ExplosionParticle, &mut Transform, &mut Sprite)>,
) {
    let current_time = time.elapsed_seconds();
    for (entity, particle, mut transform, mut sprite) in query.iter_mut() {
        let time_alive = current_time - particle.spawn_time;
        if time_alive > particle.lifetime {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        transform.translation.x += particle.velocity.x * time.delta_seconds();
        transform.translation.y += particle.velocity.y * time.delta_seconds();
        let fade = 1.0 - (time_alive / particle.lifetime);
        sprite.color.set_a(fade.clamp(0.0, 1.0));
    }
}
