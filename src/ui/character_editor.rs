// ui/character_editor.rs

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use strum::IntoEnumIterator;

use super::{
    Component, ComponentEnum,
    draw::{ensure_minimum_size, render_header, render_status},
    roster::RosterView,
};
use crate::{
    app::Action,
    character::{Character, CheckField, Delta, modifier},
    context::Context,
    ruleset::Ruleset,
    store::CharacterId,
};

const HINTS: &str = "↑↓ select | ←→ or -/+ adjust | c clear result | s save | Esc back";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Attribute(usize),
    Class,
    Check(CheckField),
    Skill(usize),
}

// Editable rows in navigation order.
pub fn rows(ruleset: &Ruleset) -> Vec<Row> {
    let mut rows: Vec<Row> = (0..ruleset.attributes.len()).map(Row::Attribute).collect();
    rows.push(Row::Class);
    rows.extend(CheckField::iter().map(Row::Check));
    rows.extend((0..ruleset.skills.len()).map(Row::Skill));
    rows
}

#[derive(Debug)]
pub struct CharacterEditor {
    id: CharacterId,
    selected: usize,
}

impl Component for CharacterEditor {
    fn on_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action> {
        if context.store.get(self.id).is_none() {
            log::warn!("Character {} vanished from the roster", self.id);
            return Some(self.back(context));
        }
        let row_count = rows(context.store.ruleset()).len();

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(self.back(context)),
            KeyCode::Char('s') => Some(Action::Save),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + row_count - 1) % row_count;
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % row_count;
                None
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => {
                self.adjust(context, Delta::Decrement);
                None
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Char('=') => {
                self.adjust(context, Delta::Increment);
                None
            }
            KeyCode::Char('c') => {
                self.clear_result(context);
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        if !ensure_minimum_size(buffer, area) {
            return;
        }
        let [header, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .areas(area);

        let index = context.store.position(self.id).map_or(0, |index| index + 1);
        render_header(buffer, header, &format!("Character {index}"));
        render_status(buffer, status, context, HINTS);

        let Some(character) = context.store.get(self.id) else {
            Paragraph::new("This character is no longer in the roster. Press Esc.")
                .style(Style::default().fg(Color::Red))
                .centered()
                .render(body, buffer);
            return;
        };
        let ruleset = context.store.ruleset();
        let selected = rows(ruleset).get(self.selected).copied();

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(body);
        let [attributes, class, check] = Layout::vertical([
            Constraint::Length(ruleset.attributes.len() as u16 + 2),
            Constraint::Length(3),
            Constraint::Length(CheckField::iter().count() as u16 + 2),
        ])
        .areas(left);

        self.render_attributes(buffer, character, ruleset, selected, attributes);
        self.render_class(buffer, character, selected, class);
        self.render_check(buffer, character, selected, check);
        self.render_skills(buffer, character, ruleset, selected, right);
    }
}

impl CharacterEditor {
    pub fn new(id: CharacterId) -> Self {
        Self { id, selected: 0 }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn selected_row(&self, ruleset: &Ruleset) -> Option<Row> {
        rows(ruleset).get(self.selected).copied()
    }

    fn back(&self, context: &Context) -> Action {
        Action::SwitchComponent(ComponentEnum::from(RosterView::selecting(
            context.store,
            self.id,
        )))
    }

    fn adjust(&self, context: &mut Context, delta: Delta) {
        let Some(row) = self.selected_row(context.store.ruleset()) else {
            return;
        };

        if let Row::Attribute(index) = row {
            let attribute = context.store.ruleset().attributes[index].clone();
            if let Err(e) = context.store.modify_attribute(self.id, &attribute, delta) {
                log::error!("Failed to modify {attribute}: {e}");
            }
            return;
        }

        let Some(character) = context.store.get(self.id) else {
            return;
        };
        let ruleset = context.store.ruleset();
        let updated = match row {
            Row::Class => Some(character.cycle_class(ruleset, delta)),
            Row::Skill(index) => character.adjust_skill(ruleset, &ruleset.skills[index].name, delta),
            Row::Check(CheckField::Skill) => {
                let mut updated = character.clone();
                updated.skill_check.cycle_skill(ruleset, delta);
                Some(updated)
            }
            Row::Check(CheckField::Dc) => {
                let mut updated = character.clone();
                updated.skill_check.adjust_dc(delta).then_some(updated)
            }
            Row::Check(CheckField::Result) | Row::Attribute(_) => None,
        };

        if let Some(updated) = updated {
            if let Err(e) = context.store.update(self.id, updated) {
                log::error!("Failed to update character: {e}");
            }
        }
    }

    fn clear_result(&self, context: &mut Context) {
        let Some(character) = context.store.get(self.id) else {
            return;
        };
        if character.skill_check.result.is_none() {
            return;
        }
        let mut updated = character.clone();
        updated.skill_check.clear_result();
        if let Err(e) = context.store.update(self.id, updated) {
            log::error!("Failed to clear skill check result: {e}");
        }
    }

    fn render_attributes(
        &self,
        buffer: &mut Buffer,
        character: &Character,
        ruleset: &Ruleset,
        selected: Option<Row>,
        area: Rect,
    ) {
        let lines: Vec<Line> = ruleset
            .attributes
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let value = character.attribute(name).unwrap_or_default();
                row_line(
                    selected == Some(Row::Attribute(index)),
                    format!("{name:<14}{value:>4}   (Modifier: {:+})", modifier(value)),
                )
            })
            .collect();

        let remaining = character.remaining_points(ruleset);
        let title = format!(
            " Attributes | {} / {} points, {remaining} left ",
            character.total_points(),
            ruleset.max_points
        );
        Paragraph::new(lines)
            .block(section_block(title))
            .render(area, buffer);
    }

    fn render_class(
        &self,
        buffer: &mut Buffer,
        character: &Character,
        selected: Option<Row>,
        area: Rect,
    ) {
        let class = character.selected_class.as_deref().unwrap_or("Unselected");
        let line = row_line(selected == Some(Row::Class), format!("‹ {class} ›"));
        Paragraph::new(line)
            .block(section_block(" Class ".to_string()))
            .render(area, buffer);
    }

    fn render_check(
        &self,
        buffer: &mut Buffer,
        character: &Character,
        selected: Option<Row>,
        area: Rect,
    ) {
        let check = &character.skill_check;
        let lines: Vec<Line> = CheckField::iter()
            .map(|field| {
                let value = match field {
                    CheckField::Skill => check.skill.clone(),
                    CheckField::Dc => check.dc.to_string(),
                    CheckField::Result => match check.result {
                        Some(result) if result.success => format!("{} (success)", result.roll),
                        Some(result) => format!("{} (failure)", result.roll),
                        None => "none".to_string(),
                    },
                };
                row_line(
                    selected == Some(Row::Check(field)),
                    format!("{:<14}{value}", field.to_string()),
                )
            })
            .collect();

        Paragraph::new(lines)
            .block(section_block(" Skill Check ".to_string()))
            .render(area, buffer);
    }

    fn render_skills(
        &self,
        buffer: &mut Buffer,
        character: &Character,
        ruleset: &Ruleset,
        selected: Option<Row>,
        area: Rect,
    ) {
        let lines: Vec<Line> = ruleset
            .skills
            .iter()
            .enumerate()
            .map(|(index, skill)| {
                let rank = character.skill_rank(&skill.name).unwrap_or_default();
                let total = character.skill_total(ruleset, &skill.name).unwrap_or(rank);
                let governing: String = skill.attribute.chars().take(3).collect();
                row_line(
                    selected == Some(Row::Skill(index)),
                    format!("{:<16}{rank:>3}   total {total:+} ({governing})", skill.name),
                )
            })
            .collect();

        Paragraph::new(lines)
            .block(section_block(" Skills ".to_string()))
            .render(area, buffer);
    }
}

fn section_block(title: String) -> Block<'static> {
    Block::default()
        .border_type(BorderType::Rounded)
        .borders(Borders::ALL)
        .title(title)
}

fn row_line(is_selected: bool, content: String) -> Line<'static> {
    if is_selected {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::styled(
                content,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![Span::raw("  "), Span::raw(content)])
    }
}
