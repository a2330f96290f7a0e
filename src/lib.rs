pub mod audio;
pub mod boss;
pub mod boss_defs;
pub mod boss_factory;
pub mod boss_part;
pub mod components;
pub mod enemy;
pub mod game;
pub mod player;
pub mod projectiles;
pub mod sprite_bank;
pub mod visual_effects;
