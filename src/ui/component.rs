use crossterm::event::KeyEvent;
use enum_dispatch::enum_dispatch;
use ratatui::{buffer::Buffer, layout::Rect};

use crate::{
    app::Action,
    context::Context,
    ui::{character_editor::CharacterEditor, roster::RosterView},
};

#[enum_dispatch]
pub trait Component {
    fn on_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action>;
    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context);
}

#[enum_dispatch(Component)]
#[derive(Debug)]
pub enum ComponentEnum {
    RosterView,
    CharacterEditor,
}
