//! Browser layout provider

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::Layout;
use crate::sim::{PlayArea, Rect};

/// Reads sizes straight from the page each frame
pub struct DomLayout {
    game_area: HtmlElement,
    character: Element,
}

impl DomLayout {
    pub fn new(document: &Document) -> Option<Self> {
        let game_area = document
            .query_selector(".game-area")
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let character = document.get_element_by_id("character")?;
        Some(Self {
            game_area,
            character,
        })
    }
}

impl Layout for DomLayout {
    fn play_area(&self) -> PlayArea {
        PlayArea::new(
            self.game_area.offset_width() as f32,
            self.game_area.offset_height() as f32,
        )
    }

    fn character_rect(&self) -> Rect {
        let area = self.game_area.get_bounding_client_rect();
        let rect = self.character.get_bounding_client_rect();
        let origin = Vec2::new(area.left() as f32, area.top() as f32);
        Rect {
            min: Vec2::new(rect.left() as f32, rect.top() as f32) - origin,
            max: Vec2::new(rect.right() as f32, rect.bottom() as f32) - origin,
        }
    }
}
