//! Forgiving hit-box collision between the runner and rocks/coins
//!
//! Rock sprites carry a lot of transparent padding, so a rock only collides
//! through a small box around its visual base. The runner's box is inset on
//! every edge, more so while high in the air.

use glam::Vec2;

use super::entity::{Coin, Obstacle};
use super::geometry::{PlayArea, Rect};
use crate::tuning::Tuning;

/// Drawn bounds of a rock
pub fn obstacle_rect(obstacle: &Obstacle, area: PlayArea, tuning: &Tuning) -> Rect {
    let size = obstacle.body.size;
    let top = area.height - tuning.obstacle_bottom_offset - size;
    Rect::from_pos_size(Vec2::new(obstacle.body.x, top), Vec2::splat(size))
}

/// Drawn bounds of a coin
pub fn coin_rect(coin: &Coin, area: PlayArea) -> Rect {
    let size = coin.body.size;
    let top = area.height - coin.bottom - size;
    Rect::from_pos_size(Vec2::new(coin.body.x, top), Vec2::splat(size))
}

/// The solid part of a rock sprite
pub fn obstacle_hitbox(sprite: &Rect, tuning: &Tuning) -> Rect {
    let width = sprite.width() * tuning.rock_hitbox_width;
    let height = sprite.height() * tuning.rock_hitbox_height;
    let center_x = sprite.left() + sprite.width() / 2.0;
    let base_y = sprite.top() + sprite.height() * tuning.rock_hitbox_base;
    Rect::new(center_x - width / 2.0, base_y - height, center_x + width / 2.0, base_y)
}

/// Runner's bottom edge is above the high-jump line (upper 35% by default)
pub fn is_high_jump(character: &Rect, area: PlayArea, tuning: &Tuning) -> bool {
    character.bottom() < area.height * tuning.high_jump_fraction
}

/// The runner's forgiving collision box
pub fn character_hitbox(character: &Rect, high_jump: bool, tuning: &Tuning) -> Rect {
    let (buffer, forgiveness) = if high_jump {
        (tuning.character_buffer_high, tuning.jump_forgiveness_high)
    } else {
        (tuning.character_buffer, tuning.jump_forgiveness)
    };
    character.inset(buffer + forgiveness)
}

/// Does the runner hit this rock?
pub fn hits_obstacle(
    character: &Rect,
    obstacle: &Obstacle,
    area: PlayArea,
    tuning: &Tuning,
) -> bool {
    let high_jump = is_high_jump(character, area, tuning);
    let runner = character_hitbox(character, high_jump, tuning);
    let rock = obstacle_hitbox(&obstacle_rect(obstacle, area, tuning), tuning);
    runner.overlaps(&rock)
}

/// Does the runner touch this coin? Coins use full bounds on both sides.
pub fn collects_coin(character: &Rect, coin: &Coin, area: PlayArea) -> bool {
    character.overlaps(&coin_rect(coin, area))
}
