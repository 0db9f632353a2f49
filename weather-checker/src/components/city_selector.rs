//! City dropdown
//!
//! Collapsed it is a single field showing the chosen city. Expanded it renders
//! a scrollable list over whatever lies below it.

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::event::EventKind;

/// Max list rows shown when expanded
const MAX_VISIBLE_ROWS: u16 = 8;

pub struct CitySelectorProps<'a> {
    pub cities: &'a [String],
    pub selected: usize,
    pub is_open: bool,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct CitySelector {
    /// Scroll offset of the expanded list
    scroll_offset: usize,
}

impl CitySelector {
    /// Height of the collapsed field
    pub const HEIGHT: u16 = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Area the expanded list would cover below `field`, clipped to `bounds`.
    pub fn list_area(field: Rect, bounds: Rect, len: usize) -> Rect {
        let rows = (len as u16).min(MAX_VISIBLE_ROWS);
        let top = field.y + field.height;
        let available = bounds.y.saturating_add(bounds.height).saturating_sub(top);
        Rect {
            x: field.x,
            y: top,
            width: field.width,
            height: (rows + 2).min(available),
        }
    }

    /// Keep the selected index inside the viewport
    fn ensure_visible(&mut self, selected: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }

        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + viewport_height {
            self.scroll_offset = selected.saturating_sub(viewport_height - 1);
        }
    }

    fn handle_open(&self, code: KeyCode, props: &CitySelectorProps<'_>) -> Option<Action> {
        let len = props.cities.len();
        let last = len.saturating_sub(1);
        let target = match code {
            KeyCode::Char('j') | KeyCode::Down => (props.selected + 1).min(last),
            KeyCode::Char('k') | KeyCode::Up => props.selected.saturating_sub(1),
            KeyCode::Char('g') | KeyCode::Home => 0,
            KeyCode::Char('G') | KeyCode::End => last,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc => {
                return Some(Action::CityDropdownClose);
            }
            _ => return None,
        };

        (target != props.selected).then_some(Action::CitySelect(target))
    }

    /// Draw the expanded list. Called by the screen after everything else so
    /// the list sits on top.
    pub fn render_list(&mut self, frame: &mut Frame, area: Rect, props: &CitySelectorProps<'_>) {
        if area.height < 3 || props.cities.is_empty() {
            return;
        }

        let viewport_height = area.height.saturating_sub(2) as usize;
        self.ensure_visible(props.selected, viewport_height);

        let items: Vec<ListItem> = props
            .cities
            .iter()
            .map(|city| ListItem::new(Line::raw(city.as_str())))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().bg(Color::Rgb(35, 35, 45)))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");

        let mut list_state = ListState::default()
            .with_offset(self.scroll_offset)
            .with_selected(Some(props.selected));

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

impl Component for CitySelector {
    type Props<'a> = CitySelectorProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.cities.is_empty() {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };

        if props.is_open {
            return self.handle_open(key.code, &props);
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::CityDropdownToggle),
            _ => None,
        }
    }

    /// Render the collapsed field
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let city = props
            .cities
            .get(props.selected)
            .map(String::as_str)
            .unwrap_or("-");
        let arrow = if props.is_open { "▴" } else { "▾" };

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" City ");

        let inner_width = block.inner(area).width as usize;
        let pad = inner_width.saturating_sub(city.chars().count() + 3);

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(city.to_string(), Style::default().fg(Color::White).bold()),
            Span::raw(" ".repeat(pad)),
            Span::styled(arrow, Style::default().fg(Color::Cyan)),
        ]);

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
