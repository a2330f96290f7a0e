use bevy::prelude::*;

use starfall_vanguard::audio::GameAudioPlugin;
use starfall_vanguard::boss::BossPlugin;
use starfall_vanguard::enemy::EnemyPlugin;
use starfall_vanguard::game::{GamePlugin, SCREEN_HEIGHT, SCREEN_WIDTH};
use starfall_vanguard::player::PlayerPlugin;
use starfall_vanguard::projectiles::ProjectilesPlugin;
use starfall_vanguard::sprite_bank::SpriteBankPlugin;
use starfall_vanguard::visual_effects::VisualEffectsPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Starfall Vanguard".into(),
                resolution: (SCREEN_WIDTH, SCREEN_HEIGHT).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((
            GamePlugin,
            SpriteBankPlugin,
            PlayerPlugin,
            BossPlugin,
            EnemyPlugin,
            ProjectilesPlugin,
            VisualEffectsPlugin,
            GameAudioPlugin,
        ))
        .add_systems(Startup, setup_global_camera)
        .run();
}

fn setup_global_camera(mut commands: Commands) {
    let mut camera_bundle = Camera2dBundle::default();
    camera_bundle.transform.translation.z = 999.0;
    commands.spawn(camera_bundle);
}
