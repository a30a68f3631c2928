//! Data-driven game balance
//!
//! Every balance knob the simulation reads lives here. Defaults match
//! `crate::consts`; a JSON document can override any subset of fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON, or fields of the wrong type
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {}", e),
            TuningError::Invalid(msg) => write!(f, "invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Balance parameters for a play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    pub initial_game_speed: f32,
    pub initial_obstacle_interval_ms: f64,
    pub initial_coin_interval_ms: f64,

    pub ramp_interval_ms: f64,
    pub ramp_speed_step: f32,
    pub ramp_interval_step_ms: f64,
    pub obstacle_interval_floor_ms: f64,
    pub coin_interval_floor_ms: f64,

    pub score_interval_ms: f64,
    pub jump_bonus: u32,
    pub coin_value: u32,
    pub jump_duration_ms: f64,

    pub obstacle_pool_size: usize,
    pub coin_pool_size: usize,
    pub effect_pool_size: usize,

    /// Fraction of the play width (from the right) that must be clear of rocks
    pub obstacle_spacing_fraction: f32,
    pub early_game_score: u32,
    pub early_game_size_multiplier: f32,

    /// Rock placement and sizing
    pub obstacle_bottom_offset: f32,
    pub obstacle_min_base_size: f32,
    pub obstacle_base_size_fraction: f32,

    /// Coin sizing and height range (fractions of play height)
    pub coin_min_size: f32,
    pub coin_size_fraction: f32,
    pub coin_min_height_fraction: f32,
    pub coin_max_height_fraction: f32,

    /// Floating text
    pub effect_fade_step: f32,
    pub effect_font_size: f32,
    pub coin_effect_rise_speed: f32,
    pub jump_effect_rise_speed: f32,
    pub jump_effect_x_fraction: f32,
    pub jump_effect_y_fraction: f32,

    /// Rock hit-box, as fractions of the sprite
    pub rock_hitbox_width: f32,
    pub rock_hitbox_height: f32,
    pub rock_hitbox_base: f32,

    /// Runner hit-box insets, normal and high jump
    pub character_buffer: f32,
    pub character_buffer_high: f32,
    pub jump_forgiveness: f32,
    pub jump_forgiveness_high: f32,
    pub high_jump_fraction: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_game_speed: INITIAL_GAME_SPEED,
            initial_obstacle_interval_ms: INITIAL_OBSTACLE_INTERVAL_MS,
            initial_coin_interval_ms: INITIAL_COIN_INTERVAL_MS,

            ramp_interval_ms: RAMP_INTERVAL_MS,
            ramp_speed_step: RAMP_SPEED_STEP,
            ramp_interval_step_ms: RAMP_INTERVAL_STEP_MS,
            obstacle_interval_floor_ms: OBSTACLE_INTERVAL_FLOOR_MS,
            coin_interval_floor_ms: COIN_INTERVAL_FLOOR_MS,

            score_interval_ms: SCORE_INTERVAL_MS,
            jump_bonus: JUMP_BONUS,
            coin_value: COIN_VALUE,
            jump_duration_ms: JUMP_DURATION_MS,

            obstacle_pool_size: OBSTACLE_POOL_SIZE,
            coin_pool_size: COIN_POOL_SIZE,
            effect_pool_size: EFFECT_POOL_SIZE,

            obstacle_spacing_fraction: OBSTACLE_SPACING_FRACTION,
            early_game_score: EARLY_GAME_SCORE,
            early_game_size_multiplier: EARLY_GAME_SIZE_MULTIPLIER,

            obstacle_bottom_offset: OBSTACLE_BOTTOM_OFFSET,
            obstacle_min_base_size: OBSTACLE_MIN_BASE_SIZE,
            obstacle_base_size_fraction: OBSTACLE_BASE_SIZE_FRACTION,

            coin_min_size: COIN_MIN_SIZE,
            coin_size_fraction: COIN_SIZE_FRACTION,
            coin_min_height_fraction: COIN_MIN_HEIGHT_FRACTION,
            coin_max_height_fraction: COIN_MAX_HEIGHT_FRACTION,

            effect_fade_step: EFFECT_FADE_STEP,
            effect_font_size: EFFECT_FONT_SIZE,
            coin_effect_rise_speed: COIN_EFFECT_RISE_SPEED,
            jump_effect_rise_speed: JUMP_EFFECT_RISE_SPEED,
            jump_effect_x_fraction: JUMP_EFFECT_X_FRACTION,
            jump_effect_y_fraction: JUMP_EFFECT_Y_FRACTION,

            rock_hitbox_width: ROCK_HITBOX_WIDTH,
            rock_hitbox_height: ROCK_HITBOX_HEIGHT,
            rock_hitbox_base: ROCK_HITBOX_BASE,

            character_buffer: CHARACTER_BUFFER,
            character_buffer_high: CHARACTER_BUFFER_HIGH,
            jump_forgiveness: JUMP_FORGIVENESS,
            jump_forgiveness_high: JUMP_FORGIVENESS_HIGH,
            high_jump_fraction: HIGH_JUMP_FRACTION,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value keeps the game playable
    pub fn validate(&self) -> Result<(), TuningError> {
        let unit = 0.0..=1.0;
        if self.initial_game_speed <= 0.0 {
            return Err(TuningError::Invalid("initial_game_speed must be positive"));
        }
        if self.initial_obstacle_interval_ms <= 0.0 || self.initial_coin_interval_ms <= 0.0 {
            return Err(TuningError::Invalid("initial spawn intervals must be positive"));
        }
        // Speed may only rise and intervals only shrink as the game ramps
        if self.ramp_speed_step < 0.0 || self.ramp_interval_step_ms < 0.0 {
            return Err(TuningError::Invalid("ramp steps must not be negative"));
        }
        if self.jump_duration_ms <= 0.0 {
            return Err(TuningError::Invalid("jump_duration_ms must be positive"));
        }
        if self.early_game_size_multiplier <= 0.0 {
            return Err(TuningError::Invalid("early_game_size_multiplier must be positive"));
        }
        if self.ramp_interval_ms <= 0.0 || self.score_interval_ms <= 0.0 {
            return Err(TuningError::Invalid("ramp and score intervals must be positive"));
        }
        if self.obstacle_interval_floor_ms <= 0.0 || self.coin_interval_floor_ms <= 0.0 {
            return Err(TuningError::Invalid("spawn interval floors must be positive"));
        }
        if self.obstacle_interval_floor_ms > self.initial_obstacle_interval_ms {
            return Err(TuningError::Invalid(
                "obstacle interval floor exceeds its initial value",
            ));
        }
        if self.coin_interval_floor_ms > self.initial_coin_interval_ms {
            return Err(TuningError::Invalid("coin interval floor exceeds its initial value"));
        }
        if self.obstacle_pool_size == 0 || self.coin_pool_size == 0 || self.effect_pool_size == 0 {
            return Err(TuningError::Invalid("pool sizes must be non-zero"));
        }
        if !(0.0..=1.0).contains(&self.obstacle_spacing_fraction) {
            return Err(TuningError::Invalid("obstacle_spacing_fraction must be within 0..=1"));
        }
        if self.obstacle_bottom_offset < 0.0 {
            return Err(TuningError::Invalid("obstacle_bottom_offset must not be negative"));
        }
        if self.obstacle_min_base_size <= 0.0
            || self.obstacle_base_size_fraction < 0.0
            || self.coin_min_size <= 0.0
            || self.coin_size_fraction < 0.0
            || self.effect_font_size <= 0.0
        {
            return Err(TuningError::Invalid("entity sizes must be positive"));
        }
        if !unit.contains(&self.coin_min_height_fraction)
            || !unit.contains(&self.coin_max_height_fraction)
            || self.coin_min_height_fraction > self.coin_max_height_fraction
        {
            return Err(TuningError::Invalid(
                "coin height range must be an ordered pair within 0..=1",
            ));
        }
        if self.effect_fade_step <= 0.0 {
            return Err(TuningError::Invalid("effect_fade_step must be positive"));
        }
        let anchor = [self.jump_effect_x_fraction, self.jump_effect_y_fraction];
        if anchor.iter().any(|f| !unit.contains(f)) {
            return Err(TuningError::Invalid("jump effect anchor must be within 0..=1"));
        }
        let hitbox = [self.rock_hitbox_width, self.rock_hitbox_height, self.rock_hitbox_base];
        if hitbox.iter().any(|f| *f <= 0.0 || *f > 1.0) {
            return Err(TuningError::Invalid("rock hit-box fractions must be within (0, 1]"));
        }
        if self.rock_hitbox_height > self.rock_hitbox_base {
            return Err(TuningError::Invalid("rock hit-box would extend above the sprite"));
        }
        let insets = [
            self.character_buffer,
            self.character_buffer_high,
            self.jump_forgiveness,
            self.jump_forgiveness_high,
        ];
        if insets.iter().any(|i| *i < 0.0) {
            return Err(TuningError::Invalid("character insets must not be negative"));
        }
        if !unit.contains(&self.high_jump_fraction) {
            return Err(TuningError::Invalid("high_jump_fraction must be within 0..=1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.initial_game_speed, 6.0);
        assert_eq!(tuning.initial_obstacle_interval_ms, 2600.0);
        assert_eq!(tuning.initial_coin_interval_ms, 3000.0);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "initial_game_speed": 8.5, "jump_bonus": 5 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.initial_game_speed, 8.5);
        assert_eq!(tuning.jump_bonus, 5);
        assert_eq!(tuning.coin_pool_size, COIN_POOL_SIZE);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "initial_game_speed": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "obstacle_interval_floor_ms": 9000.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        for bad in [
            r#"{ "ramp_speed_step": -10.0 }"#,
            r#"{ "ramp_interval_step_ms": -50.0 }"#,
            r#"{ "jump_duration_ms": 0.0 }"#,
            r#"{ "early_game_size_multiplier": 0.0 }"#,
            r#"{ "rock_hitbox_width": 1.5 }"#,
            r#"{ "character_buffer": -1.0 }"#,
            r#"{ "coin_min_height_fraction": 0.5, "coin_max_height_fraction": 0.2 }"#,
        ] {
            let err = Tuning::from_json(bad).unwrap_err();
            assert!(matches!(err, TuningError::Invalid(_)), "{} accepted", bad);
        }

        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("tuning parse error"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Tuning::from_json(r#"{ "rock_hitbox_wdith": 0.1 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_geometry_override() {
        let tuning =
            Tuning::from_json(r#"{ "rock_hitbox_width": 0.1, "character_buffer": 30.0 }"#)
                .expect("valid tuning");
        assert_eq!(tuning.rock_hitbox_width, 0.1);
        assert_eq!(tuning.character_buffer, 30.0);
        assert_eq!(tuning.rock_hitbox_height, ROCK_HITBOX_HEIGHT);
    }
}
