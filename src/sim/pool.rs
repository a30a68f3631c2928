//! Fixed-size entity pools
//!
//! An entity is owned either by its pool (idle) or by an active list in the
//! [`Registry`](super::registry::Registry), never both: `acquire` moves it
//! out, `release` moves it back.

use serde::{Deserialize, Serialize};

use super::entity::Poolable;

/// A recycling store of idle entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    idle: Vec<T>,
    /// Number of entities this pool was sized for
    capacity: usize,
    /// Total entities ever created by this pool
    created: usize,
}

impl<T: Poolable> Pool<T> {
    /// Preallocate `capacity` idle entities
    pub fn new(capacity: usize) -> Self {
        let idle = (0..capacity as u32).map(T::create).collect();
        Self {
            idle,
            capacity,
            created: capacity,
        }
    }

    /// Take an idle entity, creating one if the pool is empty.
    ///
    /// Never fails; growth past the preallocated size is logged once per
    /// extra entity.
    pub fn acquire(&mut self) -> T {
        let mut entity = match self.idle.pop() {
            Some(entity) => entity,
            None => {
                let id = self.created as u32;
                self.created += 1;
                log::warn!(
                    "{:?} pool exhausted, growing to {} (sized for {})",
                    T::KIND,
                    self.created,
                    self.capacity
                );
                T::create(id)
            }
        };
        entity.on_acquire();
        entity
    }

    /// Return an active entity to the tail of the pool
    pub fn release(&mut self, mut entity: T) {
        debug_assert!(
            entity.body().active,
            "{:?} #{} released twice",
            T::KIND,
            entity.body().id
        );
        entity.on_release();
        self.idle.push(entity);
    }

    /// Idle entities ready for reuse
    pub fn available(&self) -> usize {
        self.idle.len()
    }

    /// Entities created beyond the preallocated size
    pub fn grown(&self) -> usize {
        self.created - self.capacity
    }

    /// Total entities this pool has handed out or holds
    pub fn created(&self) -> usize {
        self.created
    }

    /// Iterate idle entities (for presenters that hide them)
    pub fn idle(&self) -> impl Iterator<Item = &T> {
        self.idle.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Coin, Effect, Obstacle};

    #[test]
    fn test_preallocates() {
        let pool: Pool<Obstacle> = Pool::new(10);
        assert_eq!(pool.available(), 10);
        assert_eq!(pool.grown(), 0);
        assert!(pool.idle().all(|o| !o.body.active && !o.body.visible));
    }

    #[test]
    fn test_acquire_resets_transient_fields() {
        let mut pool: Pool<Coin> = Pool::new(2);
        let mut coin = pool.acquire();
        assert!(coin.body.active);
        assert!(coin.body.visible);
        assert_eq!(coin.body.x, 0.0);

        coin.body.x = 123.0;
        pool.release(coin);

        let coin = pool.acquire();
        assert_eq!(coin.body.x, 0.0);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_release_goes_to_tail() {
        let mut pool: Pool<Obstacle> = Pool::new(3);
        let a = pool.acquire();
        let id = a.body.id;
        pool.release(a);
        // Acquire pops the tail, so the just-released rock comes back first
        assert_eq!(pool.acquire().body.id, id);
    }

    #[test]
    fn test_grows_when_exhausted() {
        let mut pool: Pool<Effect> = Pool::new(1);
        let first = pool.acquire();
        let second = pool.acquire();
        assert_ne!(first.body.id, second.body.id);
        assert_eq!(pool.grown(), 1);
        assert_eq!(second.opacity, 1.0);

        pool.release(first);
        pool.release(second);
        assert_eq!(pool.available(), 2);
        assert_eq!(pool.created(), 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "released twice")]
    fn test_double_release_is_caught() {
        let mut pool: Pool<Coin> = Pool::new(1);
        let coin = pool.acquire();
        pool.release(coin);

        let already_idle = pool.idle().next().cloned().expect("coin back in pool");
        pool.release(already_idle);
    }
}
