//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Play-area size (queried every frame, the page may resize)
//! - The runner's rendered bounds (the jump arc is animated by the host)

#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::sim::{PlayArea, Rect};
use crate::tuning::Tuning;

/// Where things are on screen right now
pub trait Layout {
    /// Current play-area size in pixels
    fn play_area(&self) -> PlayArea;
    /// Runner bounds in play-area coordinates
    fn character_rect(&self) -> Rect;
}

/// Peak height of the jump arc, in pixels
pub const JUMP_HEIGHT: f32 = 220.0;

/// A stand-in for the browser's jump animation, for headless hosts and tests
///
/// Follows a half-sine arc from the platform up to `JUMP_HEIGHT` and back
/// over the tuned jump duration.
#[derive(Debug, Clone)]
pub struct SimulatedCharacter {
    pub area: PlayArea,
    /// Left edge of the runner
    pub x: f32,
    pub size: Vec2,
    /// Platform surface, measured up from the play-area bottom
    ground_offset: f32,
    jump_duration_ms: f64,
    jump_started: Option<f64>,
    /// `is_jumping` as of the previous update
    was_jumping: bool,
    lift: f32,
}

impl SimulatedCharacter {
    pub fn new(area: PlayArea, tuning: &Tuning) -> Self {
        Self {
            area,
            x: area.width * 0.1,
            size: Vec2::new(60.0, 80.0),
            ground_offset: tuning.obstacle_bottom_offset,
            jump_duration_ms: tuning.jump_duration_ms,
            jump_started: None,
            was_jumping: false,
            lift: 0.0,
        }
    }

    /// Advance the arc. A new arc starts only when the game enters a jump.
    pub fn update(&mut self, now: f64, is_jumping: bool) {
        if is_jumping && !self.was_jumping {
            self.jump_started = Some(now);
        }
        self.was_jumping = is_jumping;
        self.lift = match self.jump_started {
            Some(start) => {
                let t = ((now - start) / self.jump_duration_ms) as f32;
                if t >= 1.0 {
                    self.jump_started = None;
                    0.0
                } else {
                    JUMP_HEIGHT * (t * std::f32::consts::PI).sin()
                }
            }
            None => 0.0,
        };
    }

    pub fn is_airborne(&self) -> bool {
        self.jump_started.is_some()
    }
}

impl Layout for SimulatedCharacter {
    fn play_area(&self) -> PlayArea {
        self.area
    }

    fn character_rect(&self) -> Rect {
        let bottom = self.area.height - self.ground_offset - self.lift;
        Rect::from_pos_size(Vec2::new(self.x, bottom - self.size.y), self.size)
    }
}
