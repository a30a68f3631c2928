//! Frame snapshot handed to presenters
//!
//! The simulation only knows positions, sizes and opacity. This maps them
//! onto what a presenter needs to draw: a sprite or style, screen bounds,
//! visibility and label text.

use serde::Serialize;

use crate::sim::collision::{
    character_hitbox, coin_rect, is_high_jump, obstacle_hitbox, obstacle_rect,
};
use crate::sim::{EffectKind, Game, GamePhase, PlayArea, PoolKind, Rect, RockVariant};
use crate::{final_score_text, score_text};

/// Tagged entity kind driving sprite/style selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Obstacle(RockVariant),
    Coin,
    Effect(EffectKind),
}

impl EntityKind {
    pub fn pool(&self) -> PoolKind {
        match self {
            EntityKind::Obstacle(_) => PoolKind::Obstacle,
            EntityKind::Coin => PoolKind::Coin,
            EntityKind::Effect(_) => PoolKind::Effect,
        }
    }
}

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    /// Unique within `kind.pool()`
    pub id: u32,
    pub kind: EntityKind,
    /// Screen bounds in play-area pixels
    pub bounds: Rect,
    pub opacity: f32,
}

impl EntityView {
    /// Image path for rocks, label text for effects
    pub fn sprite(&self) -> Option<&'static str> {
        match self.kind {
            EntityKind::Obstacle(variant) => Some(variant.asset()),
            EntityKind::Coin => None,
            EntityKind::Effect(kind) => Some(kind.label()),
        }
    }
}

/// Hit-boxes for the debug overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugBoxes {
    pub character: Rect,
    pub obstacles: Vec<Rect>,
}

/// Everything a presenter needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub platform_offset: f32,
    pub character_jumping: bool,
    pub score_text: String,
    /// Set while the game-over panel should show
    pub final_score_text: Option<String>,
    /// Active entities in draw order: rocks, coins, then effects
    pub entities: Vec<EntityView>,
    pub debug: Option<DebugBoxes>,
}

impl FrameView {
    /// Snapshot the game. `character` is only needed for the debug overlay.
    pub fn capture(game: &Game, area: PlayArea, character: Option<&Rect>) -> Self {
        let registry = &game.registry;
        let tuning = &game.tuning;
        let mut entities = Vec::with_capacity(registry.active_count());

        entities.extend(registry.obstacles.iter().map(|o| EntityView {
            id: o.body.id,
            kind: EntityKind::Obstacle(o.variant),
            bounds: obstacle_rect(o, area, tuning),
            opacity: 1.0,
        }));
        entities.extend(registry.coins.iter().map(|c| EntityView {
            id: c.body.id,
            kind: EntityKind::Coin,
            bounds: coin_rect(c, area),
            opacity: 1.0,
        }));
        entities.extend(registry.effects.iter().map(|e| EntityView {
            id: e.body.id,
            kind: EntityKind::Effect(e.kind),
            bounds: Rect::new(e.body.x, e.y, e.body.x + e.body.size, e.y + e.body.size),
            opacity: e.opacity.max(0.0),
        }));

        let debug = character.map(|character| DebugBoxes {
            character: character_hitbox(
                character,
                is_high_jump(character, area, tuning),
                tuning,
            ),
            obstacles: registry
                .obstacles
                .iter()
                .map(|o| obstacle_hitbox(&obstacle_rect(o, area, tuning), tuning))
                .collect(),
        });

        Self {
            phase: game.phase,
            platform_offset: game.platform_offset,
            character_jumping: game.state.is_jumping,
            score_text: score_text(game.state.score),
            final_score_text: (game.phase == GamePhase::GameOver)
                .then(|| final_score_text(game.state.score)),
            entities,
            debug,
        }
    }
}

/// Render adapter: maps frame snapshots onto a concrete display
pub trait Presenter {
    /// Draw one frame
    fn present(&mut self, frame: &FrameView);
    /// Update the loading bar (0.0 to 1.0)
    fn loading_progress(&mut self, _fraction: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::kinematics::spawn_effect;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_running_game() {
        let mut game = Game::new(Tuning::default(), 5);
        game.assets_settled();
        game.start(0.0).expect("ready");
        let area = PlayArea::new(800.0, 400.0);

        let mut rock = game.registry.obstacle_pool.acquire();
        rock.variant = RockVariant::Medium;
        rock.body.x = 300.0;
        rock.body.size = 50.0;
        game.registry.obstacles.push(rock);
        spawn_effect(&mut game, EffectKind::JumpCleared, 80.0, 80.0, 1.0);
        game.state.score = 3;

        let frame = FrameView::capture(&game, area, None);
        assert_eq!(frame.score_text, "Score: 3");
        assert_eq!(frame.final_score_text, None);
        assert_eq!(frame.entities.len(), 2);
        assert_eq!(frame.entities[0].kind, EntityKind::Obstacle(RockVariant::Medium));
        assert_eq!(frame.entities[0].bounds, Rect::new(300.0, 315.0, 350.0, 365.0));
        assert_eq!(frame.entities[0].sprite(), Some("Assets/Rock 2.png"));
        assert_eq!(frame.entities[1].sprite(), Some("+2 Jump!"));
        assert!(frame.debug.is_none());
    }

    #[test]
    fn test_capture_game_over() {
        let mut game = Game::new(Tuning::default(), 5);
        game.assets_settled();
        game.start(0.0).expect("ready");
        game.state.score = 12;
        game.end_game();

        let runner = Rect::new(40.0, 285.0, 100.0, 365.0);
        let frame = FrameView::capture(&game, PlayArea::new(800.0, 400.0), Some(&runner));
        assert_eq!(frame.final_score_text.as_deref(), Some("Your score: 12"));
        assert!(frame.entities.is_empty());
        let debug = frame.debug.expect("debug boxes");
        assert_eq!(debug.character, runner.inset(11.0));
        assert!(debug.obstacles.is_empty());
    }
}
