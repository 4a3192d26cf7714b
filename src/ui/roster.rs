// ui/roster.rs

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::{
    Component, ComponentEnum,
    character_editor::CharacterEditor,
    draw::{ensure_minimum_size, render_header, render_status},
};
use crate::{
    app::Action,
    character::Character,
    context::Context,
    store::{CharacterId, Store},
};

const HINTS: &str =
    "a add | Enter edit | Backspace twice delete | s save | r reload | q quit";

#[derive(Debug, Default)]
pub struct RosterView {
    state: ListState,
    backspace_counter: bool,
}

impl Component for RosterView {
    fn on_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action> {
        if key.code != KeyCode::Backspace {
            self.backspace_counter = false;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('a') => {
                context.store.add();
                self.state.select(Some(context.store.len() - 1));
                None
            }
            KeyCode::Char('s') => Some(Action::Save),
            KeyCode::Char('r') => Some(Action::Load),
            KeyCode::Enter | KeyCode::Char('l') => self
                .selected_id(context.store)
                .map(|id| Action::SwitchComponent(ComponentEnum::from(CharacterEditor::new(id)))),
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.selected().is_none_or(|index| index + 1 < context.store.len()) {
                    self.state.select_next();
                }
                None
            }
            KeyCode::Backspace => {
                if self.backspace_counter {
                    self.backspace_counter = false;
                    if let Some(id) = self.selected_id(context.store) {
                        if let Err(e) = context.store.remove(id) {
                            log::error!("Failed to remove character: {e}");
                        }
                        self.clamp(context.store);
                    }
                } else {
                    self.backspace_counter = true;
                }
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        if !ensure_minimum_size(buffer, area) {
            return;
        }
        self.clamp(context.store);

        let [header, list, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .areas(area);

        render_header(buffer, header, "Roster");
        self.render_roster(buffer, context, list);
        render_status(buffer, status, context, HINTS);
    }
}

impl RosterView {
    pub fn new() -> Self {
        Self::default()
    }

    // Re-selects the given character when coming back from the editor.
    pub fn selecting(store: &Store, id: CharacterId) -> Self {
        let mut view = Self::default();
        view.state.select(store.position(id));
        view
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn is_deleting(&self) -> bool {
        self.backspace_counter
    }

    fn selected_id(&self, store: &Store) -> Option<CharacterId> {
        self.state
            .selected()
            .and_then(|index| store.get_at(index))
            .map(|entry| entry.id)
    }

    fn clamp(&mut self, store: &Store) {
        let selected = match (self.state.selected(), store.len()) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(index), len) => Some(index.min(len - 1)),
        };
        self.state.select(selected);
    }

    fn render_roster(&mut self, buffer: &mut Buffer, context: &Context, area: Rect) {
        let block = Block::default()
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .title(format!(" Characters ({}) ", context.store.len()));

        if context.store.is_empty() {
            Paragraph::new("No characters available. Press a to add one.")
                .style(Style::default().fg(Color::Yellow))
                .centered()
                .block(block)
                .render(area, buffer);
            return;
        }

        let ruleset = context.store.ruleset();
        let items: Vec<ListItem> = context
            .store
            .characters()
            .enumerate()
            .map(|(index, character)| {
                ListItem::new(summary_line(index, character, ruleset.max_points))
            })
            .collect();

        let highlight = if self.backspace_counter {
            Style::default().fg(Color::Red).rapid_blink()
        } else {
            Style::default().fg(Color::Yellow)
        };

        let list = List::new(items)
            .block(block)
            .highlight_style(highlight.add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        StatefulWidget::render(list, area, buffer, &mut self.state);
    }
}

fn summary_line(index: usize, character: &Character, max_points: i64) -> Line<'static> {
    let class = character
        .selected_class
        .clone()
        .unwrap_or_else(|| "No class".to_string());
    let check = &character.skill_check;
    let outcome = match check.result {
        Some(result) if result.success => format!("rolled {}, success", result.roll),
        Some(result) => format!("rolled {}, failure", result.roll),
        None => "not rolled".to_string(),
    };

    Line::from(vec![
        Span::styled(format!("{}. ", index + 1), Style::default().fg(Color::Gray)),
        Span::raw(format!("{class:<12}")),
        Span::raw(" | "),
        Span::raw(format!(
            "Points {}/{}",
            character.total_points(),
            max_points
        )),
        Span::raw(" | "),
        Span::raw(format!("{} DC {} ({outcome})", check.skill, check.dc)),
    ])
}
