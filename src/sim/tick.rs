//! Per-frame game loop
//!
//! The host calls [`tick`] once per display frame with a monotonic clock;
//! nothing here assumes a particular scheduler.

use std::fmt;

use super::geometry::{PlayArea, Rect};
use super::kinematics::{
    ObstacleOutcome, scroll_platform, update_coins, update_effects, update_obstacles,
};
use super::spawn::{award_time_score, ramp_difficulty, try_spawn_coin, try_spawn_obstacle};
use super::state::{Game, GameEvent, GamePhase, GameState};

/// Inputs for a single frame
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Monotonic time in milliseconds
    pub now: f64,
    /// Play-area size this frame
    pub area: PlayArea,
    /// Runner's rendered bounds in play-area coordinates
    pub character: Rect,
    /// A jump was requested since the last frame
    pub jump: bool,
}

/// Why a start or restart request was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    /// Assets are still loading
    AssetsPending,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::AssetsPending => write!(f, "assets still loading, please wait"),
        }
    }
}

impl std::error::Error for StartError {}

impl Game {
    /// Every asset finished loading or failed; the game may start
    pub fn assets_settled(&mut self) {
        if self.phase == GamePhase::NotReady {
            self.phase = GamePhase::Ready;
            log::info!("All assets settled, game ready");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase != GamePhase::NotReady
    }

    /// Begin a fresh session at `now`
    ///
    /// Resets score, speed and spawn intervals, returns every active entity
    /// to its pool and starts the clocks. Rejected until assets settle.
    pub fn start(&mut self, now: f64) -> Result<(), StartError> {
        if !self.is_ready() {
            log::info!("Game not ready yet, assets still loading...");
            return Err(StartError::AssetsPending);
        }

        self.state = GameState::new(&self.tuning, now);
        self.registry.release_all();
        self.platform_offset = 0.0;
        self.jump_timer.cancel();
        self.phase = GamePhase::Running;

        self.events.push(GameEvent::Started);
        self.events.push(GameEvent::ScoreChanged(0));
        log::info!("Session started (seed {})", self.seed());
        Ok(())
    }

    /// Restart after game over; same path and guard as [`Game::start`]
    pub fn restart(&mut self, now: f64) -> Result<(), StartError> {
        if !self.is_ready() {
            log::info!("Assets still loading, please wait...");
            return Err(StartError::AssetsPending);
        }
        log::info!("Restarting after score {}", self.state.score);
        self.start(now)
    }

    /// Start a jump if running and not already airborne. Returns whether a
    /// jump began.
    pub fn jump(&mut self, now: f64) -> bool {
        if self.phase != GamePhase::Running || self.state.is_jumping {
            return false;
        }
        self.state.is_jumping = true;
        self.jump_timer.schedule(now, self.tuning.jump_duration_ms);
        true
    }

    /// Freeze the session and clear the field
    pub fn end_game(&mut self) {
        self.state.is_game_over = true;
        self.state.is_jumping = false;
        self.jump_timer.cancel();
        self.registry.release_all();
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver(self.state.score));
        log::info!("Game over, final score {}", self.state.score);
    }
}

/// Advance the game by one frame
pub fn tick(game: &mut Game, input: &TickInput) {
    if game.phase != GamePhase::Running || game.state.is_game_over {
        return;
    }

    let now = input.now;
    let area = input.area;

    if game.jump_timer.poll(now) {
        game.state.is_jumping = false;
    }
    if input.jump {
        game.jump(now);
    }

    scroll_platform(game, area);
    ramp_difficulty(game, now);

    try_spawn_obstacle(game, now, area);
    try_spawn_coin(game, now, area);
    award_time_score(game, now);

    if update_obstacles(game, area, &input.character) == ObstacleOutcome::Collided {
        game.end_game();
        return;
    }
    update_coins(game, area, &input.character);
    update_effects(game);
}
