use bevy::prelude::*;
use crate::{
    audio::{PlaySoundEvent, SoundEffect},
    boss::{Boss, BossDefeated, EntryPhase},
    boss_defs::BossLibrary,
    boss_factory::{spawn_boss, spawn_escort_wave, DifficultyProfile, Formation},
    sprite_bank::SpriteBank,
};

pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

const BOSS_HOLD_Y: f32 = SCREEN_HEIGHT / 2.0 - 160.0;
const ESCORT_ENTRY_Y: f32 = SCREEN_HEIGHT / 2.0 + 60.0;
const FIRST_ENCOUNTER_DELAY: f32 = 2.0;
const BETWEEN_LEVEL_DELAY: f32 = 4.0;
const MINI_BOSS_EVERY: u32 = 3;
const ESCORT_COUNT: usize = 6;
const ESCORT_SPACING: f32 = 70.0;

#[derive(States, Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum AppState {
    #[default]
    MainMenu,
    InGame,
    GameOver,
}

#[derive(Resource, Default)]
pub struct GameState {
    pub score: u32,
    pub level: u32,
}

/// Render toggles that survive across sessions. `enemy_glow` drops the
/// additive glow quads for low-end machines.
#[derive(Resource)]
pub struct RenderConfig {
    pub enemy_glow: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { enemy_glow: true }
    }
}

/// Paces the level loop: waits out the inter-level delay, then spawns an
/// escort wave and the level's boss.
#[derive(Resource)]
pub struct EncounterDirector {
    pub spawn_timer: Timer,
    pub difficulty: DifficultyProfile,
}

impl Default for EncounterDirector {
    fn default() -> Self {
        Self {
            spawn_timer: Timer::from_seconds(FIRST_ENCOUNTER_DELAY, TimerMode::Once),
            difficulty: DifficultyProfile::NORMAL,
        }
    }
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .init_resource::<GameState>()
            .init_resource::<RenderConfig>()
            .init_resource::<EncounterDirector>()
            .add_systems(OnEnter(AppState::MainMenu), spawn_main_menu_ui)
            .add_systems(OnExit(AppState::MainMenu), despawn_screen::<MainMenuUi>)
            .add_systems(
                Update,
                main_menu_input_system.run_if(in_state(AppState::MainMenu)),
            )
            .add_systems(OnEnter(AppState::InGame), (reset_session, spawn_hud))
            .add_systems(OnExit(AppState::InGame), despawn_screen::<HudUi>)
            .add_systems(
                Update,
                (
                    encounter_director_system,
                    boss_defeated_system,
                    hud_update_system,
                    render_config_toggle_system,
                )
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(OnEnter(AppState::GameOver), spawn_game_over_ui)
            .add_systems(OnExit(AppState::GameOver), despawn_screen::<GameOverUi>)
            .add_systems(
                Update,
                game_over_input_system.run_if(in_state(AppState::GameOver)),
            );
    }
}

fn reset_session(mut game_state: ResMut<GameState>, mut director: ResMut<EncounterDirector>) {
    game_state.score = 0;
    game_state.level = 1;
    director.spawn_timer = Timer::from_seconds(FIRST_ENCOUNTER_DELAY, TimerMode::Once);
}

fn encounter_director_system(
    mut commands: Commands,
    time: Res<Time>,
    sprite_bank: Res<SpriteBank>,
    library: Res<BossLibrary>,
    render_config: Res<RenderConfig>,
    game_state: Res<GameState>,
    mut director: ResMut<EncounterDirector>,
    boss_query: Query<(), With<Boss>>,
    mut sound_event_writer: EventWriter<PlaySoundEvent>,
) {
    if !boss_query.is_empty() {
        return;
    }
    director.spawn_timer.tick(time.delta());
    if !director.spawn_timer.just_finished() {
        return;
    }
    let level = game_state.level;
    let mini = level % MINI_BOSS_EVERY == 0;
    let def = if mini {
        library.get_mini_definition(library.mini_id_for_level(level))
    } else {
        library.get_boss_definition(library.boss_id_for_level(level))
    };
    let formation = match (level - 1) % 5 {
        0 => Formation::Line,
        1 => Formation::Vee,
        2 => Formation::Circle,
        3 => Formation::Grid,
        _ => Formation::Diamond,
    };
    spawn_escort_wave(
        &mut commands,
        &sprite_bank,
        &render_config,
        formation,
        ESCORT_COUNT,
        Vec2::new(0.0, ESCORT_ENTRY_Y),
        ESCORT_SPACING,
        level,
    );
    if !mini {
        sound_event_writer.send(PlaySoundEvent(SoundEffect::BossWarning));
    }
    spawn_boss(
        &mut commands,
        &sprite_bank,
        def,
        Vec2::new(0.0, BOSS_HOLD_Y),
        director.difficulty,
        level,
        mini,
    );
}

fn boss_defeated_system(
    mut defeated_events: EventReader<BossDefeated>,
    mut game_state: ResMut<GameState>,
    mut director: ResMut<EncounterDirector>,
) {
    for _ in defeated_events.read() {
        game_state.level += 1;
        director.spawn_timer = Timer::from_seconds(BETWEEN_LEVEL_DELAY, TimerMode::Once);
    }
}

fn render_config_toggle_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut render_config: ResMut<RenderConfig>,
) {
    if keyboard_input.just_pressed(KeyCode::F2) {
        render_config.enemy_glow = !render_config.enemy_glow;
    }
}

#[derive(Component)]
struct MainMenuUi;

#[derive(Component)]
struct HudUi;

#[derive(Component)]
struct GameOverUi;

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct LevelText;

#[derive(Component)]
struct BossHealthText;

fn text_style(asset_server: &AssetServer, size: f32, color: Color) -> TextStyle {
    TextStyle {
        font: asset_server.load("fonts/FiraSans-Bold.ttf"),
        font_size: size,
        color,
    }
}

fn spawn_main_menu_ui(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        TextBundle::from_section(
            "STARFALL VANGUARD\n\npress SPACE to launch",
            text_style(&asset_server, 44.0, Color::rgb(0.85, 0.9, 1.0)),
        )
        .with_text_justify(JustifyText::Center)
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Percent(32.0),
            left: Val::Percent(28.0),
            ..default()
        }),
        MainMenuUi,
        Name::new("MainMenuText"),
    ));
}

fn main_menu_input_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if keyboard_input.just_pressed(KeyCode::Space) {
        next_state.set(AppState::InGame);
    }
}

fn spawn_hud(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        TextBundle::from_section("Score: 0", text_style(&asset_server, 24.0, Color::WHITE))
            .with_style(Style {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                left: Val::Px(12.0),
                ..default()
            }),
        ScoreText,
        HudUi,
        Name::new("ScoreText"),
    ));
    commands.spawn((
        TextBundle::from_section("Level: 1", text_style(&asset_server, 24.0, Color::WHITE))
            .with_style(Style {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                right: Val::Px(12.0),
                ..default()
            }),
        LevelText,
        HudUi,
        Name::new("LevelText"),
    ));
    commands.spawn((
        TextBundle::from_section(
            "",
            text_style(&asset_server, 24.0, Color::rgb(1.0, 0.5, 0.5)),
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(36.0),
            left: Val::Percent(42.0),
            ..default()
        }),
        BossHealthText,
        HudUi,
        Name::new("BossHealthText"),
    ));
}

fn hud_update_system(
    game_state: Res<GameState>,
    boss_query: Query<&Boss>,
    mut score_query: Query<&mut Text, (With<ScoreText>, Without<LevelText>, Without<BossHealthText>)>,
    mut level_query: Query<&mut Text, (With<LevelText>, Without<ScoreText>, Without<BossHealthText>)>,
    mut boss_health_query: Query<
        &mut Text,
        (With<BossHealthText>, Without<ScoreText>, Without<LevelText>),
    >,
) {
    if let Ok(mut text) = score_query.get_single_mut() {
        text.sections[0].value = format!("Score: {}", game_state.score);
    }
    if let Ok(mut text) = level_query.get_single_mut() {
        text.sections[0].value = format!("Level: {}", game_state.level);
    }
    if let Ok(mut text) = boss_health_query.get_single_mut() {
        text.sections[0].value = match boss_query.iter().next() {
            Some(boss) if boss.phase != EntryPhase::Warning => {
                format!("{}  {:.0}%", boss.name, boss.health_ratio() * 100.0)
            }
            _ => String::new(),
        };
    }
}

fn spawn_game_over_ui(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    game_state: Res<GameState>,
) {
    commands.spawn((
        TextBundle::from_section(
            format!(
                "GAME OVER\n\nscore {}  level {}\n\npress R to retry",
                game_state.score, game_state.level
            ),
            text_style(&asset_server, 40.0, Color::rgb(1.0, 0.6, 0.6)),
        )
        .with_text_justify(JustifyText::Center)
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Percent(30.0),
            left: Val::Percent(32.0),
            ..default()
        }),
        GameOverUi,
        Name::new("GameOverText"),
    ));
}

fn game_over_input_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if keyboard_input.just_pressed(KeyCode::KeyR) {
        next_state.set(AppState::InGame);
    }
}

fn despawn_screen<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
