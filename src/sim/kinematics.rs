//! Per-tick motion, retirement and contact checks
//!
//! Lists are walked tail-to-head so retiring an entry never skips the next
//! one.

use super::collision::{coin_rect, collects_coin, hits_obstacle};
use super::entity::EffectKind;
use super::geometry::{PlayArea, Rect};
use super::state::{Game, GameEvent};

/// Outcome of moving the rocks for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleOutcome {
    /// Every rock moved; carries how many scrolled off untouched
    Moved { cleared: u32 },
    /// The runner hit a rock; remaining rocks were not processed
    Collided,
}

/// Scroll the platform, wrapping once a full play width has passed
pub fn scroll_platform(game: &mut Game, area: PlayArea) {
    game.platform_offset -= game.state.game_speed;
    if game.platform_offset <= -area.width {
        game.platform_offset = 0.0;
    }
}

/// Show floating score text
pub fn spawn_effect(game: &mut Game, kind: EffectKind, x: f32, y: f32, rise_speed: f32) {
    let mut effect = game.registry.effect_pool.acquire();
    effect.kind = kind;
    effect.body.x = x;
    effect.body.size = game.tuning.effect_font_size;
    effect.y = y;
    effect.fade_speed = rise_speed;
    game.registry.effects.push(effect);
}

/// Move rocks left, retire the ones fully off-screen and check the runner
/// against the rest.
///
/// A rock that leaves the screen was jumped: it pays the jump bonus and
/// shows "+2 Jump!".
pub fn update_obstacles(game: &mut Game, area: PlayArea, character: &Rect) -> ObstacleOutcome {
    let speed = game.state.game_speed;
    let mut cleared = 0;

    for i in (0..game.registry.obstacles.len()).rev() {
        let rock = &mut game.registry.obstacles[i];
        rock.body.x -= speed;

        if rock.body.x <= -rock.body.size {
            log::debug!("Rock #{} cleared", rock.body.id);
            game.registry.retire_obstacle(i);
            cleared += 1;

            if !game.state.is_game_over {
                game.add_score(game.tuning.jump_bonus);
                game.events.push(GameEvent::ObstacleCleared);
                let tuning = &game.tuning;
                let x = area.width * tuning.jump_effect_x_fraction;
                let y = area.height * tuning.jump_effect_y_fraction;
                let rise = tuning.jump_effect_rise_speed;
                spawn_effect(game, EffectKind::JumpCleared, x, y, rise);
            }
        } else if hits_obstacle(character, rock, area, &game.tuning) {
            log::debug!("Runner hit rock #{} at x={:.1}", rock.body.id, rock.body.x);
            return ObstacleOutcome::Collided;
        }
    }

    ObstacleOutcome::Moved { cleared }
}

/// Move coins left, retire the ones off-screen and collect the ones the
/// runner touches. Returns how many were collected.
pub fn update_coins(game: &mut Game, area: PlayArea, character: &Rect) -> u32 {
    let speed = game.state.game_speed;
    let mut collected = 0;

    for i in (0..game.registry.coins.len()).rev() {
        let coin = &mut game.registry.coins[i];
        coin.body.x -= speed;

        if coin.body.x <= -coin.body.size {
            game.registry.retire_coin(i);
        } else if collects_coin(character, coin, area) {
            let at = coin_rect(coin, area);
            game.registry.retire_coin(i);
            collected += 1;

            game.add_score(game.tuning.coin_value);
            game.events.push(GameEvent::CoinCollected);
            let rise = game.tuning.coin_effect_rise_speed;
            spawn_effect(game, EffectKind::CoinCollected, at.left(), at.top(), rise);
        }
    }

    collected
}

/// Fade and lift floating text, retiring it once invisible
pub fn update_effects(game: &mut Game) {
    let fade_step = game.tuning.effect_fade_step;
    for i in (0..game.registry.effects.len()).rev() {
        let effect = &mut game.registry.effects[i];
        effect.opacity -= fade_step;
        effect.y -= effect.fade_speed;

        if effect.opacity <= 0.0 {
            game.registry.retire_effect(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{EFFECT_FONT_SIZE, OBSTACLE_BOTTOM_OFFSET};
    use crate::sim::entity::{Coin, Obstacle};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const AREA: PlayArea = PlayArea {
        width: 800.0,
        height: 400.0,
    };

    /// Runner parked far above everything so nothing collides
    fn out_of_reach() -> Rect {
        Rect::new(-1000.0, -1000.0, -900.0, -900.0)
    }

    fn add_rock(game: &mut Game, x: f32, size: f32) {
        let mut rock: Obstacle = game.registry.obstacle_pool.acquire();
        rock.body.x = x;
        rock.body.size = size;
        game.registry.obstacles.push(rock);
    }

    fn add_coin(game: &mut Game, x: f32, bottom: f32) {
        let mut coin: Coin = game.registry.coin_pool.acquire();
        coin.body.x = x;
        coin.body.size = 20.0;
        coin.bottom = bottom;
        game.registry.coins.push(coin);
    }

    #[test]
    fn test_platform_wraps() {
        let mut game = Game::new(Tuning::default(), 1);
        let area = PlayArea::new(30.0, 100.0);
        scroll_platform(&mut game, area);
        assert_eq!(game.platform_offset, -6.0);
        for _ in 0..4 {
            scroll_platform(&mut game, area);
        }
        // -30 reached on the fifth step
        assert_eq!(game.platform_offset, 0.0);
    }

    #[test]
    fn test_rock_retires_at_negative_size() {
        let mut game = Game::new(Tuning::default(), 1);
        add_rock(&mut game, -34.0, 40.0);

        // -34 - 6 = -40 <= -40: retired and paid
        let outcome = update_obstacles(&mut game, AREA, &out_of_reach());
        assert_eq!(outcome, ObstacleOutcome::Moved { cleared: 1 });
        assert!(game.registry.obstacles.is_empty());
        assert_eq!(game.state.score, 2);
        assert_eq!(game.registry.effects.len(), 1);
        assert_eq!(game.registry.effects[0].kind, EffectKind::JumpCleared);
        assert_eq!(game.registry.effects[0].body.x, 80.0);
        assert_eq!(game.registry.effects[0].y, 80.0);
        assert_eq!(game.registry.effects[0].body.size, EFFECT_FONT_SIZE);
        assert_eq!(
            game.registry.obstacle_pool.available(),
            Tuning::default().obstacle_pool_size
        );
    }

    #[test]
    fn test_rock_just_visible_stays() {
        let mut game = Game::new(Tuning::default(), 1);
        add_rock(&mut game, -33.0, 40.0);
        update_obstacles(&mut game, AREA, &out_of_reach());
        assert_eq!(game.registry.obstacles.len(), 1);
        assert_eq!(game.state.score, 0);
    }

    #[test]
    fn test_collision_stops_processing() {
        let mut game = Game::new(Tuning::default(), 1);
        add_rock(&mut game, 700.0, 60.0);
        add_rock(&mut game, 116.0, 60.0);
        let bottom = AREA.height - OBSTACLE_BOTTOM_OFFSET;
        let runner = Rect::new(100.0, bottom - 80.0, 160.0, bottom);

        let outcome = update_obstacles(&mut game, AREA, &runner);
        assert_eq!(outcome, ObstacleOutcome::Collided);
        // The newest rock (tail) hit first, the older one never moved
        assert_eq!(game.registry.obstacles[0].body.x, 700.0);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut game = Game::new(Tuning::default(), 1);
        add_coin(&mut game, 120.0, 100.0);
        // Coin spans y 280..300
        let runner = Rect::new(100.0, 250.0, 160.0, 330.0);

        assert_eq!(update_coins(&mut game, AREA, &runner), 1);
        assert!(game.registry.coins.is_empty());
        assert_eq!(game.state.score, 1);
        assert_eq!(game.registry.effects.len(), 1);
        assert_eq!(game.registry.effects[0].body.x, 114.0);
        assert_eq!(game.registry.effects[0].y, 280.0);

        // Nothing left to collect on the next tick
        assert_eq!(update_coins(&mut game, AREA, &runner), 0);
        assert_eq!(game.state.score, 1);
    }

    #[test]
    fn test_coin_retires_offscreen_without_points() {
        let mut game = Game::new(Tuning::default(), 1);
        add_coin(&mut game, -15.0, 100.0);
        update_coins(&mut game, AREA, &out_of_reach());
        assert!(game.registry.coins.is_empty());
        assert_eq!(game.state.score, 0);
        assert!(game.registry.effects.is_empty());
    }

    #[test]
    fn test_effect_fades_out() {
        let mut game = Game::new(Tuning::default(), 1);
        spawn_effect(&mut game, EffectKind::CoinCollected, 10.0, 100.0, 2.0);

        update_effects(&mut game);
        assert!((game.registry.effects[0].opacity - 0.95).abs() < 1e-6);
        assert_eq!(game.registry.effects[0].y, 98.0);

        let mut ticks = 1;
        while !game.registry.effects.is_empty() {
            update_effects(&mut game);
            ticks += 1;
            assert!(ticks <= 21, "effect never faded");
        }
        assert!(ticks >= 20);
        assert_eq!(game.registry.effect_pool.available(), Tuning::default().effect_pool_size);
    }

    #[test]
    fn test_tuned_effects() {
        let tuning = Tuning {
            effect_fade_step: 0.5,
            jump_effect_x_fraction: 0.5,
            jump_effect_rise_speed: 4.0,
            ..Tuning::default()
        };
        let mut game = Game::new(tuning, 1);
        add_rock(&mut game, -34.0, 40.0);
        update_obstacles(&mut game, AREA, &out_of_reach());
        assert_eq!(game.registry.effects[0].body.x, 400.0);

        update_effects(&mut game);
        assert_eq!(game.registry.effects[0].opacity, 0.5);
        assert_eq!(game.registry.effects[0].y, 76.0);
        update_effects(&mut game);
        assert!(game.registry.effects.is_empty());
    }

    proptest! {
        #[test]
        fn prop_rocks_move_by_speed_until_retired(
            start in 0.0f32..800.0,
            size in 20.0f32..100.0,
            speed in 1.0f32..20.0,
        ) {
            let mut game = Game::new(Tuning::default(), 3);
            game.state.game_speed = speed;
            add_rock(&mut game, start, size);

            let mut expected = start;
            loop {
                update_obstacles(&mut game, AREA, &out_of_reach());
                expected -= speed;
                if expected <= -size {
                    prop_assert!(game.registry.obstacles.is_empty());
                    prop_assert_eq!(game.state.score, 2);
                    break;
                }
                prop_assert_eq!(game.registry.obstacles.len(), 1);
                prop_assert_eq!(game.registry.obstacles[0].body.x, expected);
            }
        }
    }
}
