//! DOM presenter
//!
//! Each pooled entity gets one absolutely positioned `div`, created the first
//! time its id is drawn and hidden whenever it is back in the pool. Since ids
//! recycle with the pools, the element count stays at the pool sizes.

use std::collections::{HashMap, HashSet};

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::view::{EntityKind, EntityView, FrameView, Presenter};
use crate::sim::{EffectKind, PoolKind, Rect};

pub struct DomPresenter {
    document: Document,
    game_area: HtmlElement,
    platform: Option<HtmlElement>,
    character: Option<Element>,
    score: Option<Element>,
    game_over: Option<Element>,
    final_score: Option<Element>,
    loading_bar: Option<HtmlElement>,
    elements: HashMap<(PoolKind, u32), HtmlElement>,
    debug_boxes: Vec<HtmlElement>,
    last_score_text: String,
    debug_overlay: bool,
}

fn html(el: Option<Element>) -> Option<HtmlElement> {
    el.and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

fn set_px(el: &HtmlElement, prop: &str, value: f32) {
    let _ = el.style().set_property(prop, &format!("{}px", value));
}

fn place(el: &HtmlElement, bounds: &Rect) {
    set_px(el, "left", bounds.left());
    set_px(el, "top", bounds.top());
    set_px(el, "width", bounds.width());
    set_px(el, "height", bounds.height());
}

impl DomPresenter {
    /// Bind to the page; `None` if there is no `.game-area`
    pub fn new(document: Document, debug_overlay: bool) -> Option<Self> {
        let game_area = html(document.query_selector(".game-area").ok().flatten())?;
        Some(Self {
            platform: html(document.query_selector(".platform").ok().flatten()),
            character: document.get_element_by_id("character"),
            score: document.get_element_by_id("score"),
            game_over: document.get_element_by_id("game-over"),
            final_score: document.get_element_by_id("final-score"),
            loading_bar: html(document.get_element_by_id("loading-progress")),
            document,
            game_area,
            elements: HashMap::new(),
            debug_boxes: Vec::new(),
            last_score_text: String::new(),
            debug_overlay,
        })
    }

    /// Turn the collision box overlay on or off
    pub fn set_debug_overlay(&mut self, on: bool) {
        self.debug_overlay = on;
        if !on {
            for el in self.debug_boxes.drain(..) {
                el.remove();
            }
        }
    }

    /// Hide the loading screen
    pub fn hide_loading(&self) {
        if let Some(el) = html(self.document.get_element_by_id("loading-screen")) {
            let _ = el.style().set_property("display", "none");
        }
    }

    fn create_element(&self, kind: EntityKind) -> Option<HtmlElement> {
        let el = html(self.document.create_element("div").ok())?;
        let style = el.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("display", "none");
        let _ = style.set_property("transform", "translateZ(0)");
        let _ = style.set_property("backface-visibility", "hidden");
        match kind {
            EntityKind::Obstacle(_) => {
                let _ = el.class_list().add_1("obstacle");
                let _ = style.set_property("background-size", "contain");
                let _ = style.set_property("background-position", "center bottom");
                let _ = style.set_property("background-repeat", "no-repeat");
                let _ = style.set_property("z-index", "5");
            }
            EntityKind::Coin => {
                let _ = el.class_list().add_1("coin");
                let _ = style.set_property("z-index", "5");
            }
            EntityKind::Effect(_) => {
                let _ = style.set_property("font-weight", "bold");
                let _ = style.set_property("font-size", "16px");
                let _ = style.set_property("z-index", "15");
                let _ = style.set_property("pointer-events", "none");
            }
        }
        let _ = self.game_area.append_child(&el);
        Some(el)
    }

    fn draw_entity(&mut self, view: &EntityView) {
        let key = (view.kind.pool(), view.id);
        if !self.elements.contains_key(&key) {
            match self.create_element(view.kind) {
                Some(el) => {
                    self.elements.insert(key, el);
                }
                None => return,
            }
        }
        let Some(el) = self.elements.get(&key) else {
            return;
        };

        let style = el.style();
        match view.kind {
            EntityKind::Obstacle(variant) => {
                place(el, &view.bounds);
                let image = format!("url('{}')", variant.asset());
                let _ = style.set_property("background-image", &image);
            }
            EntityKind::Coin => place(el, &view.bounds),
            EntityKind::Effect(kind) => {
                set_px(el, "left", view.bounds.left());
                set_px(el, "top", view.bounds.top());
                el.set_text_content(view.sprite());
                let (color, shadow) = match kind {
                    EffectKind::CoinCollected => ("#ffd700", "0 0 3px rgba(0, 0, 0, 0.8)"),
                    EffectKind::JumpCleared => ("#4CAF50", "0 0 5px white"),
                };
                let _ = style.set_property("color", color);
                let _ = style.set_property("text-shadow", shadow);
                let _ = style.set_property("opacity", &view.opacity.to_string());
            }
        }
        let _ = style.set_property("display", "block");
    }

    fn draw_debug(&mut self, frame: &FrameView) {
        for el in self.debug_boxes.drain(..) {
            el.remove();
        }
        let Some(debug) = &frame.debug else {
            return;
        };
        let boxes = std::iter::once((&debug.character, "blue"))
            .chain(debug.obstacles.iter().map(|r| (r, "red")));
        for (rect, color) in boxes {
            let Some(el) = html(self.document.create_element("div").ok()) else {
                continue;
            };
            let style = el.style();
            let _ = el.class_list().add_1("debug-collision");
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("border", &format!("2px solid {}", color));
            let _ = style.set_property("z-index", "20");
            let _ = style.set_property("pointer-events", "none");
            place(&el, rect);
            let _ = self.game_area.append_child(&el);
            self.debug_boxes.push(el);
        }
    }
}

impl Presenter for DomPresenter {
    fn present(&mut self, frame: &FrameView) {
        if let Some(platform) = &self.platform {
            let _ = platform
                .style()
                .set_property("transform", &format!("translateX({}px)", frame.platform_offset));
        }

        if let Some(character) = &self.character {
            let classes = character.class_list();
            let _ = if frame.character_jumping {
                classes.add_1("jump")
            } else {
                classes.remove_1("jump")
            };
        }

        let mut seen = HashSet::with_capacity(frame.entities.len());
        for view in &frame.entities {
            seen.insert((view.kind.pool(), view.id));
            self.draw_entity(view);
        }
        for (key, el) in &self.elements {
            if !seen.contains(key) {
                let _ = el.style().set_property("display", "none");
            }
        }

        if self.debug_overlay {
            self.draw_debug(frame);
        }

        if frame.score_text != self.last_score_text {
            if let Some(score) = &self.score {
                score.set_text_content(Some(&frame.score_text));
            }
            self.last_score_text = frame.score_text.clone();
        }

        if let Some(panel) = &self.game_over {
            let classes = panel.class_list();
            match &frame.final_score_text {
                Some(text) => {
                    if let Some(final_score) = &self.final_score {
                        final_score.set_text_content(Some(text));
                    }
                    let _ = classes.remove_1("hidden");
                }
                None => {
                    let _ = classes.add_1("hidden");
                }
            }
        }
    }

    fn loading_progress(&mut self, fraction: f32) {
        if let Some(bar) = &self.loading_bar {
            let _ = bar
                .style()
                .set_property("width", &format!("{}%", fraction * 100.0));
        }
    }
}
