// ui/mod.rs

pub mod character_editor;
mod component;
pub mod draw;
pub mod roster;
pub mod spinner;

pub use character_editor::CharacterEditor;
pub use component::{Component, ComponentEnum};
pub use draw::{MIN_HEIGHT, MIN_WIDTH};
pub use roster::RosterView;
