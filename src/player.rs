use bevy::prelude::*;
use crate::{
    audio::{PlaySoundEvent, SoundEffect},
    boss::Boss,
    components::Health,
    game::{AppState, GameState, SCREEN_HEIGHT, SCREEN_WIDTH},
    projectiles::{spawn_projectile, Faction},
    sprite_bank::SpriteBank,
    visual_effects::spawn_explosion_burst,
};

pub const PLAYER_SIZE: Vec2 = Vec2::new(46.0, 46.0);
const PLAYER_SPEED: f32 = 340.0;
const PLAYER_MAX_HEALTH: i32 = 100;
const PLAYER_SPAWN_Y_OFFSET: f32 = 80.0;
const PLAYER_FIRE_INTERVAL: f32 = 0.22;
const PLAYER_BOLT_SPEED: f32 = 520.0;
const PLAYER_INVINCIBILITY_SECS: f32 = 1.2;
const SCATTER_BLAST_DAMAGE: i32 = 40;
const SCATTER_BLAST_COOLDOWN: f32 = 6.0;
const PLAYER_Z_POS: f32 = 0.6;

#[derive(Component)]
pub struct PlayerShip {
    pub speed: f32,
    pub fire_timer: Timer,
    pub invincibility_timer: Timer,
    pub scatter_timer: Timer,
    pub max_health: i32,
}

pub struct PlayerPlugin;

fn should_despawn_all_entities_on_session_end(next_state: Res<NextState<AppState>>) -> bool {
    matches!(
        next_state.0,
        Some(AppState::MainMenu) | Some(AppState::GameOver)
    )
}

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::InGame), spawn_player)
            .add_systems(
                Update,
                (
                    player_movement_system,
                    player_fire_system,
                    scatter_blast_system,
                    player_invincibility_system,
                    player_death_system,
                )
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                OnExit(AppState::InGame),
                despawn_player.run_if(should_despawn_all_entities_on_session_end),
            );
    }
}

fn spawn_player(
    mut commands: Commands,
    sprite_bank: Res<SpriteBank>,
    player_query: Query<Entity, With<PlayerShip>>,
) {
    if !player_query.is_empty() {
        return;
    }
    // Both one-shot timers start expired so the ship can act immediately.
    let mut invincibility_timer = Timer::from_seconds(PLAYER_INVINCIBILITY_SECS, TimerMode::Once);
    let elapsed = invincibility_timer.duration();
    invincibility_timer.tick(elapsed);
    let mut scatter_timer = Timer::from_seconds(SCATTER_BLAST_COOLDOWN, TimerMode::Once);
    let elapsed = scatter_timer.duration();
    scatter_timer.tick(elapsed);
    commands.spawn((
        SpriteBundle {
            texture: sprite_bank.get_or_fallback("player_ship"),
            sprite: Sprite {
                custom_size: Some(PLAYER_SIZE),
                color: Color::rgb(0.8, 0.95, 1.0),
                ..default()
            },
            transform: Transform::from_xyz(
                0.0,
                -SCREEN_HEIGHT / 2.0 + PLAYER_SPAWN_Y_OFFSET,
                PLAYER_Z_POS,
            ),
            ..default()
        },
        PlayerShip {
            speed: PLAYER_SPEED,
            fire_timer: Timer::from_seconds(PLAYER_FIRE_INTERVAL, TimerMode::Repeating),
            invincibility_timer,
            scatter_timer,
            max_health: PLAYER_MAX_HEALTH,
        },
        Health(PLAYER_MAX_HEALTH),
        Name::new("PlayerShip"),
    ));
}

pub fn despawn_player(mut commands: Commands, player_query: Query<Entity, With<PlayerShip>>) {
    for entity in player_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

fn player_movement_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut query: Query<(&PlayerShip, &mut Transform)>,
) {
    let Ok((player, mut transform)) = query.get_single_mut() else {
        return;
    };
    let mut direction = Vec2::ZERO;
    if keyboard_input.pressed(KeyCode::ArrowLeft) || keyboard_input.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if keyboard_input.pressed(KeyCode::ArrowRight) || keyboard_input.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }
    if keyboard_input.pressed(KeyCode::ArrowUp) || keyboard_input.pressed(KeyCode::KeyW) {
        direction.y += 1.0;
    }
    if keyboard_input.pressed(KeyCode::ArrowDown) || keyboard_input.pressed(KeyCode::KeyS) {
        direction.y -= 1.0;
    }
    let step = direction.normalize_or_zero() * player.speed * time.delta_seconds();
    let half_size = PLAYER_SIZE / 2.0;
    transform.translation.x = (transform.translation.x + step.x)
        .clamp(-SCREEN_WIDTH / 2.0 + half_size.x, SCREEN_WIDTH / 2.0 - half_size.x);
    transform.translation.y = (transform.translation.y + step.y)
        .clamp(-SCREEN_HEIGHT / 2.0 + half_size.y, SCREEN_HEIGHT / 2.0 - half_size.y);
}

fn player_fire_system(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    sprite_bank: Res<SpriteBank>,
    mut query: Query<(&mut PlayerShip, &Transform)>,
    mut sound_event_writer: EventWriter<PlaySoundEvent>,
) {
    let Ok((mut player, transform)) = query.get_single_mut() else {
        return;
    };
    player.fire_timer.tick(time.delta());
    if !keyboard_input.pressed(KeyCode::Space) || !player.fire_timer.just_finished() {
        return;
    }
    sound_event_writer.send(PlaySoundEvent(SoundEffect::PlayerShoot));
    let muzzle = transform.translation.truncate() + Vec2::new(0.0, PLAYER_SIZE.y / 2.0);
    spawn_projectile(
        &mut commands,
        &sprite_bank,
        muzzle,
        Vec2::Y * PLAYER_BOLT_SPEED,
        Faction::Player,
    );
}

/// Screen-clearing blast on a long cooldown. Damage to bosses is untargeted,
/// so it lands wherever the routing priority sends it.
fn scatter_blast_system(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    sprite_bank: Res<SpriteBank>,
    mut game_state: ResMut<GameState>,
    mut player_query: Query<(&mut PlayerShip, &Transform)>,
    mut boss_query: Query<&mut Boss>,
    mut sound_event_writer: EventWriter<PlaySoundEvent>,
) {
    let Ok((mut player, transform)) = player_query.get_single_mut() else {
        return;
    };
    player.scatter_timer.tick(time.delta());
    if !keyboard_input.just_pressed(KeyCode::KeyB) || !player.scatter_timer.finished() {
        return;
    }
    player.scatter_timer.reset();
    sound_event_writer.send(PlaySoundEvent(SoundEffect::ScatterBlast));
    spawn_explosion_burst(
        &mut commands,
        &sprite_bank,
        transform.translation.truncate(),
        Color::rgb(1.0, 0.95, 0.6),
        40,
        &time,
    );
    let mut rng = rand::thread_rng();
    for mut boss in boss_query.iter_mut() {
        if let Some(report) = boss.route_damage(SCATTER_BLAST_DAMAGE, &mut rng) {
            game_state.score += report.score_awarded;
        }
    }
}

fn player_invincibility_system(
    time: Res<Time>,
    mut query: Query<(&mut PlayerShip, &mut Sprite)>,
) {
    let Ok((mut player, mut sprite)) = query.get_single_mut() else {
        return;
    };
    player.invincibility_timer.tick(time.delta());
    if player.invincibility_timer.finished() {
        sprite.color.set_a(1.0);
    } else {
        let flicker = (time.elapsed_seconds() * 24.0).sin() * 0.4 + 0.6;
        sprite.color.set_a(flicker);
    }
}

fn player_death_system(
    query: Query<&Health, (With<PlayerShip>, Changed<Health>)>,
    mut next_state: ResMut<NextState<AppState>>,
    mut sound_event_writer: EventWriter<PlaySoundEvent>,
) {
    let Ok(health) = query.get_single() else {
        return;
    };
    if health.0 <= 0 {
        sound_event_writer.send(PlaySoundEvent(SoundEffect::GameOver));
        next_state.set(AppState::GameOver);
    }
}
