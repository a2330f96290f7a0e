use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use std::collections::HashMap;

/// Every sprite key the game may ask for, with the asset path backing it.
/// Anything not listed here renders as a flat tinted quad instead.
const SPRITE_PATHS: &[(&str, &str)] = &[
    ("player_ship", "sprites/player_ship_placeholder.png"),
    ("bolt_player", "sprites/bolt_player_placeholder.png"),
    ("bolt_boss", "sprites/bolt_boss_placeholder.png"),
    ("escort_drone", "sprites/escort_drone_placeholder.png"),
    ("boss_core", "sprites/boss_core_placeholder.png"),
    ("boss_turret", "sprites/boss_turret_placeholder.png"),
    ("boss_arm", "sprites/boss_arm_placeholder.png"),
    ("boss_shield", "sprites/boss_shield_placeholder.png"),
    ("boss_weakpoint", "sprites/boss_weakpoint_placeholder.png"),
    ("boss_armor", "sprites/boss_armor_placeholder.png"),
    ("spark", "sprites/spark_placeholder.png"),
];

#[derive(Resource)]
pub struct SpriteBank {
    entries: HashMap<&'static str, Handle<Image>>,
    fallback: Handle<Image>,
}

impl SpriteBank {
    pub fn get(&self, key: &str) -> Option<Handle<Image>> {
        self.entries.get(key).cloned()
    }

    /// Lookup with the mandatory flat-color fallback: unknown keys get a
    /// 1x1 white image so the sprite's tint shows as a solid quad.
    pub fn get_or_fallback(&self, key: &str) -> Handle<Image> {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn fallback(&self) -> Handle<Image> {
        self.fallback.clone()
    }
}

pub struct SpriteBankPlugin;

impl Plugin for SpriteBankPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_sprite_bank);
    }
}

fn load_sprite_bank(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
) {
    let fallback = images.add(Image::new_fill(
        Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[255, 255, 255, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    ));
    let mut entries = HashMap::new();
    for (key, path) in SPRITE_PATHS {
        entries.insert(*key, asset_server.load(*path));
    }
    commands.insert_resource(SpriteBank { entries, fallback });
}
