//! Rock Runner - a browser endless runner
//!
//! Core modules:
//! - `sim`: Deterministic game core (pools, spawning, motion, collisions, loop)
//! - `renderer`: Presentation adapter (frame snapshots, DOM presenter)
//! - `platform`: Host abstraction (play-area layout, character bounds)
//! - `assets`: Asset manifest and load tracking
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use assets::AssetTracker;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Scroll speed at session start (px per tick)
    pub const INITIAL_GAME_SPEED: f32 = 6.0;
    /// Minimum time between obstacle spawns at session start
    pub const INITIAL_OBSTACLE_INTERVAL_MS: f64 = 2600.0;
    /// Minimum time between coin spawns at session start
    pub const INITIAL_COIN_INTERVAL_MS: f64 = 3000.0;

    /// Difficulty ramp cadence and step sizes
    pub const RAMP_INTERVAL_MS: f64 = 15_000.0;
    pub const RAMP_SPEED_STEP: f32 = 0.3;
    pub const RAMP_INTERVAL_STEP_MS: f64 = 50.0;
    pub const OBSTACLE_INTERVAL_FLOOR_MS: f64 = 1600.0;
    pub const COIN_INTERVAL_FLOOR_MS: f64 = 2000.0;

    /// One point per second survived
    pub const SCORE_INTERVAL_MS: f64 = 1000.0;
    /// Points for clearing a rock
    pub const JUMP_BONUS: u32 = 2;
    /// Points for grabbing a coin
    pub const COIN_VALUE: u32 = 1;

    /// Jump state lasts this long regardless of the visual arc
    pub const JUMP_DURATION_MS: f64 = 500.0;

    /// Preallocated pool sizes
    pub const OBSTACLE_POOL_SIZE: usize = 10;
    pub const COIN_POOL_SIZE: usize = 8;
    pub const EFFECT_POOL_SIZE: usize = 6;

    /// Obstacles may not spawn while another sits in the rightmost 40%
    pub const OBSTACLE_SPACING_FRACTION: f32 = 0.4;
    /// Rocks sit this far above the play-area bottom
    pub const OBSTACLE_BOTTOM_OFFSET: f32 = 35.0;
    pub const OBSTACLE_MIN_BASE_SIZE: f32 = 32.0;
    pub const OBSTACLE_BASE_SIZE_FRACTION: f32 = 0.045;
    /// Rocks are 25% smaller until the score reaches this
    pub const EARLY_GAME_SCORE: u32 = 20;
    pub const EARLY_GAME_SIZE_MULTIPLIER: f32 = 0.75;

    pub const COIN_MIN_SIZE: f32 = 20.0;
    pub const COIN_SIZE_FRACTION: f32 = 0.04;
    /// Coin bottom offset range, as fractions of play-area height
    pub const COIN_MIN_HEIGHT_FRACTION: f32 = 0.12;
    pub const COIN_MAX_HEIGHT_FRACTION: f32 = 0.40;

    /// Floating text fades by this much per tick
    pub const EFFECT_FADE_STEP: f32 = 0.05;
    /// Floating text font size, also its box edge
    pub const EFFECT_FONT_SIZE: f32 = 16.0;
    pub const COIN_EFFECT_RISE_SPEED: f32 = 2.0;
    pub const JUMP_EFFECT_RISE_SPEED: f32 = 1.0;
    /// "+2 Jump!" anchor, as fractions of the play area
    pub const JUMP_EFFECT_X_FRACTION: f32 = 0.10;
    pub const JUMP_EFFECT_Y_FRACTION: f32 = 0.20;

    /// Rock hit-box: 35% wide, 45% tall, base at 85% of the sprite height
    pub const ROCK_HITBOX_WIDTH: f32 = 0.35;
    pub const ROCK_HITBOX_HEIGHT: f32 = 0.45;
    pub const ROCK_HITBOX_BASE: f32 = 0.85;

    /// Character edge insets (normal / high jump)
    pub const CHARACTER_BUFFER: f32 = 8.0;
    pub const CHARACTER_BUFFER_HIGH: f32 = 12.0;
    pub const JUMP_FORGIVENESS: f32 = 3.0;
    pub const JUMP_FORGIVENESS_HIGH: f32 = 8.0;
    /// Character bottom above this fraction of the height counts as a high jump
    pub const HIGH_JUMP_FRACTION: f32 = 0.65;
}

/// Format the running score for the HUD
pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

/// Format the final score for the game-over panel
pub fn final_score_text(score: u32) -> String {
    format!("Your score: {}", score)
}
