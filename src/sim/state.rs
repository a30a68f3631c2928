//! Game state and core session types

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::registry::Registry;
use super::timer::Deferred;
use crate::tuning::Tuning;

/// Lifecycle of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for assets to settle
    NotReady,
    /// Assets settled, waiting for start
    Ready,
    /// Active gameplay
    Running,
    /// Runner hit a rock
    GameOver,
}

/// Things the host may want to react to (HUD text, sounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A session began (fresh or restart)
    Started,
    /// Score moved; carries the new total
    ScoreChanged(u32),
    /// A coin was grabbed
    CoinCollected,
    /// A rock scrolled off the left edge untouched
    ObstacleCleared,
    /// The run ended; carries the final score
    GameOver(u32),
}

/// Per-session scalars: score, speed, spawn clocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    /// Pixels every rock, coin and the platform move per tick
    pub game_speed: f32,
    pub is_jumping: bool,
    pub is_game_over: bool,

    pub game_start_time: f64,
    pub last_obstacle_time: f64,
    pub last_coin_time: f64,
    pub last_score_time: f64,
    pub last_speed_increase_time: f64,

    pub obstacle_interval_ms: f64,
    pub coin_interval_ms: f64,
}

impl GameState {
    /// Fresh state for a session starting at `now`
    pub fn new(tuning: &Tuning, now: f64) -> Self {
        Self {
            score: 0,
            game_speed: tuning.initial_game_speed,
            is_jumping: false,
            is_game_over: false,
            game_start_time: now,
            last_obstacle_time: now,
            last_coin_time: now,
            last_score_time: now,
            last_speed_increase_time: now,
            obstacle_interval_ms: tuning.initial_obstacle_interval_ms,
            coin_interval_ms: tuning.initial_coin_interval_ms,
        }
    }

    /// Milliseconds since the session started
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.game_start_time
    }
}

/// Everything one game instance owns
///
/// Single-threaded: the host drives it from one frame callback, so nothing
/// here needs interior mutability or locking.
#[derive(Debug, Clone)]
pub struct Game {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub state: GameState,
    pub registry: Registry,
    /// Scrolling platform translation, in (-width, 0]
    pub platform_offset: f32,
    /// Clears `is_jumping` when it fires
    pub jump_timer: Deferred,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    seed: u64,
}

impl Game {
    /// Create a game that is waiting on its assets
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let registry = Registry::new(&tuning);
        let state = GameState::new(&tuning, 0.0);
        Self {
            tuning,
            phase: GamePhase::NotReady,
            state,
            registry,
            platform_offset: 0.0,
            jump_timer: Deferred::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn add_score(&mut self, points: u32) {
        self.state.score += points;
        self.events.push(GameEvent::ScoreChanged(self.state.score));
    }
}
