//! Time-driven spawning, difficulty ramp and survival scoring

use rand::Rng;

use super::entity::{Obstacle, RockVariant};
use super::geometry::PlayArea;
use super::state::Game;
use crate::tuning::Tuning;

/// Every ramp interval: faster scroll, shorter spawn intervals (floored).
///
/// This is the only place speed and spawn intervals change mid-session.
pub fn ramp_difficulty(game: &mut Game, now: f64) -> bool {
    let tuning = &game.tuning;
    let state = &mut game.state;
    if now - state.last_speed_increase_time < tuning.ramp_interval_ms {
        return false;
    }

    state.game_speed += tuning.ramp_speed_step;
    state.obstacle_interval_ms = (state.obstacle_interval_ms - tuning.ramp_interval_step_ms)
        .max(tuning.obstacle_interval_floor_ms);
    state.coin_interval_ms =
        (state.coin_interval_ms - tuning.ramp_interval_step_ms).max(tuning.coin_interval_floor_ms);
    state.last_speed_increase_time = now;

    log::debug!(
        "Difficulty up: speed={:.1} obstacle={}ms coin={}ms",
        state.game_speed,
        state.obstacle_interval_ms,
        state.coin_interval_ms
    );
    true
}

/// One point per score interval survived
pub fn award_time_score(game: &mut Game, now: f64) -> bool {
    if now - game.state.last_score_time < game.tuning.score_interval_ms {
        return false;
    }
    game.state.last_score_time = now;
    game.add_score(1);
    true
}

/// Spacing guard: no active rock may still be in the rightmost slice of the
/// play area
pub fn can_spawn_obstacle(obstacles: &[Obstacle], area: PlayArea, spacing_fraction: f32) -> bool {
    let threshold = area.width - area.width * spacing_fraction;
    obstacles.iter().all(|o| o.body.x <= threshold)
}

/// Rock edge length for the current play width and score
pub fn obstacle_size(variant: RockVariant, area: PlayArea, score: u32, tuning: &Tuning) -> f32 {
    let base =
        (area.width * tuning.obstacle_base_size_fraction).max(tuning.obstacle_min_base_size);
    let early = if score < tuning.early_game_score {
        tuning.early_game_size_multiplier
    } else {
        1.0
    };
    (base * variant.size_multiplier() * early).min(variant.max_size())
}

/// Coin edge length for the current play height
pub fn coin_size(area: PlayArea, tuning: &Tuning) -> f32 {
    (area.height * tuning.coin_size_fraction).max(tuning.coin_min_size)
}

/// Spawn a rock at the right edge if its interval elapsed and spacing allows
pub fn try_spawn_obstacle(game: &mut Game, now: f64, area: PlayArea) -> bool {
    if now - game.state.last_obstacle_time < game.state.obstacle_interval_ms {
        return false;
    }
    if !can_spawn_obstacle(
        &game.registry.obstacles,
        area,
        game.tuning.obstacle_spacing_fraction,
    ) {
        return false;
    }

    let variant = RockVariant::ALL[game.rng.random_range(0..RockVariant::ALL.len())];
    let size = obstacle_size(variant, area, game.state.score, &game.tuning);

    let mut rock = game.registry.obstacle_pool.acquire();
    rock.variant = variant;
    rock.body.size = size;
    rock.body.x = area.width;
    log::debug!("Spawned {:?} rock #{} size={:.1}", variant, rock.body.id, size);
    game.registry.obstacles.push(rock);

    game.state.last_obstacle_time = now;
    true
}

/// Spawn a coin at the right edge once its interval elapsed
pub fn try_spawn_coin(game: &mut Game, now: f64, area: PlayArea) -> bool {
    if now - game.state.last_coin_time < game.state.coin_interval_ms {
        return false;
    }

    let min = area.height * game.tuning.coin_min_height_fraction;
    let max = area.height * game.tuning.coin_max_height_fraction;
    let bottom = (game.rng.random::<f32>() * (max - min)).floor() + min;

    let mut coin = game.registry.coin_pool.acquire();
    coin.body.size = coin_size(area, &game.tuning);
    coin.body.x = area.width;
    coin.bottom = bottom;
    log::debug!("Spawned coin #{} at height {:.0}", coin.body.id, bottom);
    game.registry.coins.push(coin);

    game.state.last_coin_time = now;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Poolable;
    use crate::sim::state::GameState;
    use proptest::prelude::*;

    const AREA: PlayArea = PlayArea {
        width: 1000.0,
        height: 500.0,
    };

    fn running_game() -> Game {
        let mut game = Game::new(Tuning::default(), 42);
        game.state = GameState::new(&game.tuning, 0.0);
        game
    }

    fn rock_at(x: f32) -> Obstacle {
        let mut rock = Obstacle::create(99);
        rock.on_acquire();
        rock.body.x = x;
        rock.body.size = 40.0;
        rock
    }

    #[test]
    fn test_ramp_after_15_seconds() {
        let mut game = running_game();
        assert!(!ramp_difficulty(&mut game, 14_999.0));
        assert!(ramp_difficulty(&mut game, 15_000.0));
        assert!((game.state.game_speed - 6.3).abs() < 1e-5);
        assert_eq!(game.state.obstacle_interval_ms, 2550.0);
        assert_eq!(game.state.coin_interval_ms, 2950.0);
        // Next ramp is measured from this one
        assert!(!ramp_difficulty(&mut game, 29_999.0));
        assert!(ramp_difficulty(&mut game, 30_000.0));
    }

    #[test]
    fn test_ramp_floors() {
        let mut game = running_game();
        for step in 1..=40 {
            ramp_difficulty(&mut game, step as f64 * 15_000.0);
        }
        assert_eq!(game.state.obstacle_interval_ms, 1600.0);
        assert_eq!(game.state.coin_interval_ms, 2000.0);
        assert!((game.state.game_speed - (6.0 + 40.0 * 0.3)).abs() < 1e-3);
    }

    #[test]
    fn test_time_score() {
        let mut game = running_game();
        assert!(!award_time_score(&mut game, 999.0));
        assert!(award_time_score(&mut game, 1000.0));
        assert_eq!(game.state.score, 1);
        assert_eq!(game.drain_events(), vec![crate::sim::GameEvent::ScoreChanged(1)]);
    }

    #[test]
    fn test_spacing_guard() {
        // Threshold is 600 for a 1000px area
        assert!(can_spawn_obstacle(&[], AREA, 0.4));
        assert!(can_spawn_obstacle(&[rock_at(600.0)], AREA, 0.4));
        assert!(!can_spawn_obstacle(&[rock_at(600.5)], AREA, 0.4));
        assert!(!can_spawn_obstacle(&[rock_at(100.0), rock_at(900.0)], AREA, 0.4));
    }

    #[test]
    fn test_obstacle_size() {
        let tuning = Tuning::default();
        // base = max(32, 45) = 45
        assert!((obstacle_size(RockVariant::Large, AREA, 50, &tuning) - 67.5).abs() < 1e-4);
        assert!((obstacle_size(RockVariant::Large, AREA, 0, &tuning) - 50.625).abs() < 1e-4);
        assert!((obstacle_size(RockVariant::Small, AREA, 50, &tuning) - 40.5).abs() < 1e-4);

        // Wide screens hit the per-variant caps
        let wide = PlayArea::new(4000.0, 800.0);
        assert_eq!(obstacle_size(RockVariant::Large, wide, 50, &tuning), 100.0);
        assert_eq!(obstacle_size(RockVariant::Medium, wide, 50, &tuning), 80.0);
        assert_eq!(obstacle_size(RockVariant::Small, wide, 50, &tuning), 60.0);

        // Tiny screens use the minimum base
        let tiny = PlayArea::new(300.0, 200.0);
        assert!((obstacle_size(RockVariant::Medium, tiny, 50, &tuning) - 38.4).abs() < 1e-4);
    }

    #[test]
    fn test_coin_size() {
        let tuning = Tuning::default();
        assert_eq!(coin_size(AREA, &tuning), 20.0);
        assert_eq!(coin_size(PlayArea::new(1000.0, 1000.0), &tuning), 40.0);

        let big = Tuning {
            coin_size_fraction: 0.1,
            ..Tuning::default()
        };
        assert_eq!(coin_size(AREA, &big), 50.0);
    }

    #[test]
    fn test_obstacle_spawns_at_right_edge() {
        let mut game = running_game();
        assert!(!try_spawn_obstacle(&mut game, 2599.0, AREA));
        assert!(try_spawn_obstacle(&mut game, 2600.0, AREA));
        let rock = &game.registry.obstacles[0];
        assert_eq!(rock.body.x, AREA.width);
        assert!(rock.body.active);
        assert_eq!(game.state.last_obstacle_time, 2600.0);
    }

    #[test]
    fn test_blocked_spawn_retries_next_frame() {
        let mut game = running_game();
        game.registry.obstacles.push(rock_at(700.0));
        assert!(!try_spawn_obstacle(&mut game, 3000.0, AREA));
        // Clock was not reset, so the spawn fires as soon as spacing clears
        assert_eq!(game.state.last_obstacle_time, 0.0);
        game.registry.obstacles[0].body.x = 500.0;
        assert!(try_spawn_obstacle(&mut game, 3016.0, AREA));
        assert_eq!(game.registry.obstacles.len(), 2);
    }

    #[test]
    fn test_coin_spawns_without_spacing_guard() {
        let mut game = running_game();
        assert!(try_spawn_coin(&mut game, 3000.0, AREA));
        assert!(try_spawn_coin(&mut game, 6000.0, AREA));
        assert_eq!(game.registry.coins.len(), 2);
        for coin in &game.registry.coins {
            assert_eq!(coin.body.x, AREA.width);
            assert!(coin.bottom >= 60.0 && coin.bottom <= 200.0);
        }
    }

    proptest! {
        #[test]
        fn prop_spawned_rock_never_crowds_another(
            positions in proptest::collection::vec(-100.0f32..1100.0, 0..6),
        ) {
            let mut game = running_game();
            for x in &positions {
                game.registry.obstacles.push(rock_at(*x));
            }
            let crowded = positions.iter().any(|x| *x > 600.0);
            let spawned = try_spawn_obstacle(&mut game, 10_000.0, AREA);
            prop_assert_eq!(spawned, !crowded);
        }

        #[test]
        fn prop_ramp_respects_floors(steps in 0u32..200) {
            let mut game = running_game();
            for step in 1..=steps {
                ramp_difficulty(&mut game, step as f64 * 15_000.0);
            }
            prop_assert!(game.state.obstacle_interval_ms >= 1600.0);
            prop_assert!(game.state.coin_interval_ms >= 2000.0);
            prop_assert!(game.state.obstacle_interval_ms <= 2600.0);
        }

        #[test]
        fn prop_rock_size_within_cap(width in 100.0f32..5000.0, score in 0u32..100) {
            let tuning = Tuning::default();
            let area = PlayArea::new(width, 600.0);
            for variant in RockVariant::ALL {
                let size = obstacle_size(variant, area, score, &tuning);
                prop_assert!(size > 0.0 && size <= variant.max_size());
            }
        }
    }
}
