//! Presentation module
//!
//! The simulation is drawn through the [`Presenter`] trait from a per-frame
//! [`FrameView`] snapshot. On the web, [`dom::DomPresenter`] writes it into
//! absolutely positioned page elements.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub use dom::DomPresenter;
pub use view::{DebugBoxes, EntityKind, EntityView, FrameView, Presenter};
