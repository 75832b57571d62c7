//! Bean Hopper - a side-scrolling multi-jump platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation)
//! - `renderer`: Canvas-2D draw pass over an abstract `Surface`
//! - `assets`: Sprite preloading with a fan-in ready barrier (wasm)
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod assets;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game tuning constants
pub mod consts {
    /// Downward acceleration per frame
    pub const GRAVITY: f32 = 0.8;
    /// Fraction of horizontal velocity kept each frame
    pub const FRICTION: f32 = 0.8;
    /// Horizontal acceleration per frame while a direction is held
    pub const RUN_ACCEL: f32 = 1.0;
    /// Horizontal speed cap, either direction
    pub const MAX_RUN_SPEED: f32 = 8.0;

    /// World tile size in pixels
    pub const TILE_SIZE: f32 = 64.0;
    /// Level width in ground tiles
    pub const LEVEL_TILES: u32 = 100;
    /// Total level width in pixels
    pub const LEVEL_WIDTH: f32 = LEVEL_TILES as f32 * TILE_SIZE;
    /// Every Nth ground tile is a pit the player must jump over
    pub const PIT_PERIOD: u32 = 5;

    /// Jump power while grounded (and after landing)
    pub const BASE_JUMP_POWER: f32 = 10.0;
    /// Power gained per consecutive airborne jump
    pub const JUMP_POWER_STEP: f32 = 10.0;

    /// Entity dimensions (square sprites except platforms and the goal)
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const MONSTER_SIZE: f32 = 40.0;
    pub const BEAN_SIZE: f32 = 30.0;
    pub const MILK_SIZE: f32 = 35.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const GOAL_WIDTH: f32 = 50.0;
    pub const GOAL_HEIGHT: f32 = 100.0;

    /// Score awarded per pickup
    pub const BEAN_SCORE: u32 = 10;
    pub const MILK_SCORE: u32 = 50;

    pub const STARTING_LIVES: u32 = 3;

    /// Player spawn point: x fixed, y measured up from the viewport bottom
    pub const SPAWN_X: f32 = 100.0;
    pub const SPAWN_Y_OFFSET: f32 = 200.0;
    /// How far below the viewport the player may fall before dying
    pub const FALL_MARGIN: f32 = 200.0;

    /// Collectible bob: triangle wave, render-only
    pub const FLOAT_STEP: f32 = 0.5;
    pub const FLOAT_AMPLITUDE: f32 = 5.0;

    /// Background scroll speed relative to the camera
    pub const PARALLAX_FACTOR: f32 = 0.5;
}

/// Strongest jump that still keeps the player on screen.
///
/// From v² = 2gh, with h at 90% of the viewport height. Recomputed whenever
/// the viewport resizes.
#[inline]
pub fn max_jump_power(viewport_h: f32) -> f32 {
    (2.0 * consts::GRAVITY * 0.9 * viewport_h).sqrt()
}
