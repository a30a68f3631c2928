//! Active entity registry
//!
//! Three spawn-ordered lists of entities currently in play, each backed by
//! its own pool.

use serde::{Deserialize, Serialize};

use super::entity::{Coin, Effect, Obstacle};
use super::pool::Pool;
use crate::tuning::Tuning;

/// Pools plus the entities currently checked out of them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub obstacle_pool: Pool<Obstacle>,
    pub coin_pool: Pool<Coin>,
    pub effect_pool: Pool<Effect>,
    /// Active rocks, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Active coins, oldest first
    pub coins: Vec<Coin>,
    /// Active floating text, oldest first
    pub effects: Vec<Effect>,
}

impl Registry {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacle_pool: Pool::new(tuning.obstacle_pool_size),
            coin_pool: Pool::new(tuning.coin_pool_size),
            effect_pool: Pool::new(tuning.effect_pool_size),
            obstacles: Vec::with_capacity(tuning.obstacle_pool_size),
            coins: Vec::with_capacity(tuning.coin_pool_size),
            effects: Vec::with_capacity(tuning.effect_pool_size),
        }
    }

    /// Retire the obstacle at `index`, returning it to its pool
    pub fn retire_obstacle(&mut self, index: usize) {
        let obstacle = self.obstacles.remove(index);
        self.obstacle_pool.release(obstacle);
    }

    /// Retire the coin at `index`, returning it to its pool
    pub fn retire_coin(&mut self, index: usize) {
        let coin = self.coins.remove(index);
        self.coin_pool.release(coin);
    }

    /// Retire the effect at `index`, returning it to its pool
    pub fn retire_effect(&mut self, index: usize) {
        let effect = self.effects.remove(index);
        self.effect_pool.release(effect);
    }

    /// Send every active entity back to its pool
    pub fn release_all(&mut self) {
        for obstacle in self.obstacles.drain(..) {
            self.obstacle_pool.release(obstacle);
        }
        for coin in self.coins.drain(..) {
            self.coin_pool.release(coin);
        }
        for effect in self.effects.drain(..) {
            self.effect_pool.release(effect);
        }
    }

    /// True when nothing is in play
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty() && self.coins.is_empty() && self.effects.is_empty()
    }

    /// Number of entities in play across all three lists
    pub fn active_count(&self) -> usize {
        self.obstacles.len() + self.coins.len() + self.effects.len()
    }
}
