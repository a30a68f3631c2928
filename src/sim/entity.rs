//! Poolable game entities: rocks, coins and floating score text

use serde::{Deserialize, Serialize};

/// Which pool an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolKind {
    Obstacle,
    Coin,
    Effect,
}

/// Fields every pooled entity carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Stable within its pool for the life of the session
    pub id: u32,
    pub active: bool,
    /// Left edge, in play-area pixels
    pub x: f32,
    /// Square edge length in pixels
    pub size: f32,
    /// Whether the presenter should draw it
    pub visible: bool,
}

impl Body {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            active: false,
            x: 0.0,
            size: 0.0,
            visible: false,
        }
    }
}

/// Something a [`Pool`](super::pool::Pool) can recycle
pub trait Poolable {
    const KIND: PoolKind;

    fn create(id: u32) -> Self;
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Called when leaving the pool
    fn on_acquire(&mut self) {
        let body = self.body_mut();
        body.active = true;
        body.x = 0.0;
        body.visible = true;
    }

    /// Called when returning to the pool
    fn on_release(&mut self) {
        let body = self.body_mut();
        body.active = false;
        body.x = 0.0;
        body.visible = false;
    }
}

/// The three rock sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RockVariant {
    #[default]
    Large,
    Medium,
    Small,
}

impl RockVariant {
    pub const ALL: [RockVariant; 3] = [RockVariant::Large, RockVariant::Medium, RockVariant::Small];

    /// Size multiplier applied to the width-derived base size
    pub fn size_multiplier(&self) -> f32 {
        match self {
            RockVariant::Large => 1.5,
            RockVariant::Medium => 1.2,
            RockVariant::Small => 0.9,
        }
    }

    /// Largest this rock may ever be drawn, in pixels
    pub fn max_size(&self) -> f32 {
        match self {
            RockVariant::Large => 100.0,
            RockVariant::Medium => 80.0,
            RockVariant::Small => 60.0,
        }
    }

    /// Sprite path
    pub fn asset(&self) -> &'static str {
        match self {
            RockVariant::Large => "Assets/Rock 1.png",
            RockVariant::Medium => "Assets/Rock 2.png",
            RockVariant::Small => "Assets/Rock 3.png",
        }
    }
}

/// A rock the runner has to jump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Body,
    pub variant: RockVariant,
}

impl Poolable for Obstacle {
    const KIND: PoolKind = PoolKind::Obstacle;

    fn create(id: u32) -> Self {
        Self {
            body: Body::new(id),
            variant: RockVariant::default(),
        }
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// A floating coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub body: Body,
    /// Distance from the play-area bottom to the coin's bottom edge
    pub bottom: f32,
}

impl Poolable for Coin {
    const KIND: PoolKind = PoolKind::Coin;

    fn create(id: u32) -> Self {
        Self {
            body: Body::new(id),
            bottom: 0.0,
        }
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// What a floating text effect is celebrating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EffectKind {
    /// "+1" over a collected coin
    #[default]
    CoinCollected,
    /// "+2 Jump!" after clearing a rock
    JumpCleared,
}

impl EffectKind {
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::CoinCollected => "+1",
            EffectKind::JumpCleared => "+2 Jump!",
        }
    }
}

/// Rising, fading score text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub body: Body,
    pub kind: EffectKind,
    /// Top edge, in play-area pixels
    pub y: f32,
    pub opacity: f32,
    /// Pixels risen per tick
    pub fade_speed: f32,
}

impl Poolable for Effect {
    const KIND: PoolKind = PoolKind::Effect;

    fn create(id: u32) -> Self {
        Self {
            body: Body::new(id),
            kind: EffectKind::default(),
            y: 0.0,
            opacity: 0.0,
            fade_speed: 0.0,
        }
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn on_acquire(&mut self) {
        self.body.active = true;
        self.body.x = 0.0;
        self.body.visible = true;
        self.opacity = 1.0;
    }

    fn on_release(&mut self) {
        self.body.active = false;
        self.body.x = 0.0;
        self.body.visible = false;
        self.y = 0.0;
        self.opacity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_release_resets_position() {
        let mut effect = Effect::create(3);
        effect.on_acquire();
        effect.body.x = 120.0;
        effect.y = 64.0;
        effect.opacity = 0.4;

        effect.on_release();
        assert!(!effect.body.active);
        assert!(!effect.body.visible);
        assert_eq!(effect.body.x, 0.0);
        assert_eq!(effect.y, 0.0);
        assert_eq!(effect.opacity, 0.0);

        effect.on_acquire();
        assert_eq!(effect.opacity, 1.0);
        assert_eq!(effect.body.id, 3);
    }
}
