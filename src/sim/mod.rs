//! Deterministic game core
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - Time comes in through `TickInput::now`
//! - Seeded RNG only
//! - Spawn-ordered entity lists
//! - No DOM, rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod geometry;
pub mod kinematics;
pub mod pool;
pub mod registry;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{character_hitbox, hits_obstacle, is_high_jump, obstacle_hitbox};
pub use entity::{Coin, Effect, EffectKind, Obstacle, PoolKind, Poolable, RockVariant};
pub use geometry::{PlayArea, Rect};
pub use pool::Pool;
pub use registry::Registry;
pub use state::{Game, GameEvent, GamePhase, GameState};
pub use tick::{StartError, TickInput, tick};
pub use timer::Deferred;
