use bevy::prelude::*;

#[derive(Event)]
pub struct PlaySoundEvent(pub SoundEffect);

#[derive(Debug, Clone, Copy)]
pub enum SoundEffect {
    PlayerHit,
    PlayerShoot,
    BossWarning,
    BossShoot,
    PartDestroyed,
    BossDown,
    EnemyDown,
    ScatterBlast,
    GameOver,
}

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlaySoundEvent>()
            .add_systems(Update, play_sound_system);
    }
}

fn play_sound_system(
    mut sound_events: EventReader<PlaySoundEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
) {
    for event in sound_events.read() {
        let sound_effect = match event.0 {
            SoundEffect::PlayerHit => "audio/player_hit_placeholder.ogg",
            SoundEffect::PlayerShoot => "audio/player_shoot_placeholder.ogg",
            SoundEffect::BossWarning => "audio/boss_warning_placeholder.ogg",
            SoundEffect::BossShoot => "audio/boss_shoot_placeholder.ogg",
            SoundEffect::PartDestroyed => "audio/part_destroyed_placeholder.ogg",
            SoundEffect::BossDown => "audio/boss_down_placeholder.ogg",
            SoundEffect::EnemyDown => "audio/enemy_down_placeholder.ogg",
            SoundEffect::ScatterBlast => "audio/scatter_blast_placeholder.ogg",
            SoundEffect::GameOver => "audio/game_over_placeholder.ogg",
        };
        commands.spawn(AudioBundle {
            source: asset_server.load(sound_effect),
            settings: PlaybackSettings::DESPAWN,
        });
    }
}
