use crate::components::{
    BoundingBox, CollisionShape, Obstacle, Player, PlayerIntent, PlayerState, Velocity,
};
use crate::level::{LevelData, SpawnPoint};
use crate::plugins::animation::PlayerAnimations;
use crate::plugins::camera::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::sprites::{AssetError, AssetProvider, ProceduralAssets, SpriteFrame};
use bevy::prelude::*;
use std::fs;
use std::path::Path;

/// Level file loaded at startup when present
const LEVEL_PATH: &str = "assets/level.json";

/// Initial player footprint; the first animation tick replaces it with
/// the actual frame size.
const SPAWN_WIDTH: u32 = 50;
const SPAWN_HEIGHT: u32 = 50;

/// Player sprite-sheet frame dimensions
const FRAME_WIDTH: u32 = 32;
const FRAME_HEIGHT: u32 = 64;

/// Plugin for level loading and entity setup
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_level);
    }
}

/// Load level from JSON file
pub fn load_level_from_file(path: &str) -> Result<LevelData, LevelLoadError> {
    if !Path::new(path).exists() {
        return Err(LevelLoadError::FileNotFound(path.to_string()));
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| LevelLoadError::IoError(path.to_string(), e.to_string()))?;

    let level_data: LevelData = serde_json::from_str(&contents)
        .map_err(|e| LevelLoadError::ParseError(path.to_string(), e.to_string()))?;

    validate_level_data(&level_data)?;

    Ok(level_data)
}

/// Validate level data for required fields and valid values
fn validate_level_data(level: &LevelData) -> Result<(), LevelLoadError> {
    if level.name.is_empty() {
        return Err(LevelLoadError::ValidationError(
            "Level name cannot be empty".to_string(),
        ));
    }

    if level.block_size == 0 {
        return Err(LevelLoadError::ValidationError(
            "Block size must be positive".to_string(),
        ));
    }

    Ok(())
}

/// Spawn one static block per level entry, every one sharing the
/// ground tile's mask.
pub fn spawn_level_entities(commands: &mut Commands, level: &LevelData, tile: &SpriteFrame) {
    for block in &level.blocks {
        commands.spawn((
            Obstacle {
                name: block.name.clone(),
            },
            CollisionShape::new(
                BoundingBox::new(block.x, block.y, tile.width(), tile.height()),
                tile.mask().clone(),
            ),
            SpriteBundle {
                sprite: Sprite {
                    color: Color::rgb(0.65, 0.5, 0.3),
                    custom_size: Some(Vec2::new(tile.width() as f32, tile.height() as f32)),
                    ..Default::default()
                },
                ..Default::default()
            },
        ));
    }
}

/// Spawn the player at the level's spawn point.
pub fn spawn_player(commands: &mut Commands, spawn: SpawnPoint) {
    commands.spawn((
        Player,
        PlayerState::default(),
        PlayerIntent::default(),
        Velocity::default(),
        CollisionShape::solid(spawn.x, spawn.y, SPAWN_WIDTH, SPAWN_HEIGHT),
        SpriteBundle {
            sprite: Sprite {
                color: Color::rgb(0.2, 0.4, 0.9),
                custom_size: Some(Vec2::new(FRAME_WIDTH as f32, FRAME_HEIGHT as f32)),
                ..Default::default()
            },
            ..Default::default()
        },
    ));
}

/// Build the animation set and ground tile, then spawn the level and
/// the player. Provider failures here mean a broken asset contract;
/// the session cannot meaningfully start without frames.
fn setup_level(mut commands: Commands) {
    let provider = ProceduralAssets::default();

    let (animations, tile) = match load_assets(&provider) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("asset provider contract broken: {}", e);
            return;
        }
    };

    let level = match load_level_from_file(LEVEL_PATH) {
        Ok(level) => {
            info!("loaded level {:?} from {}", level.name, LEVEL_PATH);
            level
        }
        Err(LevelLoadError::FileNotFound(_)) => {
            info!("no level file, using built-in layout");
            LevelData::desert_run(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
        }
        Err(e) => {
            error!("failed to load {}: {}", LEVEL_PATH, e);
            return;
        }
    };

    info!(
        "spawning level {:?}: {} blocks, spawn at ({}, {})",
        level.name,
        level.blocks.len(),
        level.spawn_point.x,
        level.spawn_point.y
    );

    commands.insert_resource(PlayerAnimations(animations));
    spawn_level_entities(&mut commands, &level, &tile);
    spawn_player(&mut commands, level.spawn_point);
}

fn load_assets(
    provider: &impl AssetProvider,
) -> Result<(crate::sprites::AnimationSet, SpriteFrame), AssetError> {
    let animations =
        provider.load_animation_set("Players", "Blue", FRAME_WIDTH, FRAME_HEIGHT, true)?;
    let tile = provider.load_ground_tile(64)?;
    Ok((animations, tile))
}

/// Level loading errors
#[derive(Debug, Clone, PartialEq)]
pub enum LevelLoadError {
    FileNotFound(String),
    IoError(String, String),
    ParseError(String, String),
    ValidationError(String),
}

impl std::fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelLoadError::FileNotFound(path) => write!(f, "Level file not found: {}", path),
            LevelLoadError::IoError(path, err) => {
                write!(f, "IO error reading level file {}: {}", path, err)
            }
            LevelLoadError::ParseError(path, err) => {
                write!(f, "Failed to parse level file {}: {}", path, err)
            }
            LevelLoadError::ValidationError(msg) => write!(f, "Level validation error: {}", msg),
        }
    }
}

impl std::error::Error for LevelLoadError {}
