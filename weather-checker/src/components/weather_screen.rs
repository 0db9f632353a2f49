//! The single screen: city dropdown, fetch button, two labels, status, help
//!
//! Pattern: Component Trait
//! - Props<'a>: Read-only data for rendering (borrowed from state)
//! - handle_event: Receives EventKind, returns actions
//! - render: Pure function of props - no side effects
//! - Focus handled via props, not event context

use crossterm::event::KeyCode;
use ratatui::prelude::{Frame, Rect};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{
    CitySelector, CitySelectorProps, Component, HelpBar, HelpBarProps, WeatherLabelsProps,
    WeatherLabelsView,
};
use crate::action::Action;
use crate::event::EventKind;
use crate::state::AppState;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct WeatherScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct WeatherScreen {
    selector: CitySelector,
}

impl WeatherScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn selector_props<'a>(state: &'a AppState, is_focused: bool) -> CitySelectorProps<'a> {
        CitySelectorProps {
            cities: &state.cities,
            selected: state.selected,
            is_open: state.dropdown_open,
            is_focused,
        }
    }

    fn render_button(frame: &mut Frame, area: Rect, state: &AppState) {
        let label = if state.is_loading() {
            let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
            format!(" {spinner} Fetching… ")
        } else {
            " Get weather ".to_string()
        };

        let button = Line::from(vec![
            Span::styled("[", Style::default().fg(Color::DarkGray)),
            Span::styled(" f ", Style::default().fg(Color::Cyan).bold()),
            Span::styled(label, Style::default().fg(Color::White).bold()),
            Span::styled("]", Style::default().fg(Color::DarkGray)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(button), area);
    }

    fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(status) = state.status.as_deref() else {
            return;
        };
        let line = Line::from(vec![Span::styled(
            format!(" {status}"),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        )]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for WeatherScreen {
    type Props<'a> = WeatherScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if event.is_interrupt() {
            return vec![Action::Quit];
        }
        if !props.is_focused {
            return vec![];
        }

        let EventKind::Key(key) = event else {
            return vec![];
        };
        let state = props.state;

        if state.dropdown_open {
            let actions: Vec<Action> = self
                .selector
                .handle_event(event, Self::selector_props(state, true))
                .into_iter()
                .collect();
            if !actions.is_empty() {
                return actions;
            }
        }

        match key.code {
            KeyCode::Char('f') | KeyCode::F(5) => vec![Action::WeatherFetch],
            KeyCode::Char('q') | KeyCode::Esc if !state.dropdown_open => vec![Action::Quit],
            _ if !state.dropdown_open => self
                .selector
                .handle_event(event, Self::selector_props(state, true))
                .into_iter()
                .collect(),
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherScreenProps<'_>) {
        let state = props.state;

        let outer_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" ☁ Weather Checker ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);

        frame.render_widget(outer_block.clone(), area);
        let inner = outer_block.inner(area);

        let chunks = Layout::vertical([
            Constraint::Length(CitySelector::HEIGHT), // Dropdown
            Constraint::Length(1),                    // Spacer
            Constraint::Length(1),                    // Button
            Constraint::Length(1),                    // Spacer
            Constraint::Length(WeatherLabelsView::HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

        let selector_props = Self::selector_props(state, props.is_focused);
        self.selector.render(
            frame,
            chunks[0],
            Self::selector_props(state, props.is_focused),
        );

        Self::render_button(frame, chunks[2], state);

        let mut labels = WeatherLabelsView;
        labels.render(
            frame,
            chunks[4],
            WeatherLabelsProps {
                labels: &state.labels,
            },
        );

        Self::render_status(frame, chunks[6], state);

        let mut help = HelpBar;
        help.render(
            frame,
            chunks[7],
            HelpBarProps {
                dropdown_open: state.dropdown_open,
            },
        );

        // Expanded list goes last so it covers the widgets below the field
        if state.dropdown_open {
            let list_area = CitySelector::list_area(chunks[0], inner, state.cities.len());
            self.selector.render_list(frame, list_area, &selector_props);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WeatherLabels;
    use crate::testing::*;

    fn press(screen: &mut WeatherScreen, keys: &str, props: WeatherScreenProps<'_>) -> Vec<Action> {
        screen
            .handle_event(&EventKind::Key(key(keys)), props)
            .into_iter()
            .collect()
    }

    fn props(state: &AppState) -> WeatherScreenProps<'_> {
        WeatherScreenProps {
            state,
            is_focused: true,
        }
    }

    #[test]
    fn test_handle_event_fetch() {
        let mut screen = WeatherScreen::new();
        let state = AppState::default();

        let actions = press(&mut screen, "f", props(&state));
        actions.assert_count(1);
        actions.assert_first(Action::WeatherFetch);

        let actions = press(&mut screen, "f5", props(&state));
        actions.assert_first(Action::WeatherFetch);
    }

    #[test]
    fn test_handle_event_fetch_while_dropdown_open() {
        let mut screen = WeatherScreen::new();
        let state = AppState {
            dropdown_open: true,
            ..Default::default()
        };

        let actions = press(&mut screen, "f", props(&state));
        actions.assert_first(Action::WeatherFetch);
    }

    #[test]
    fn test_handle_event_quit() {
        let mut screen = WeatherScreen::new();
        let state = AppState::default();

        press(&mut screen, "q", props(&state)).assert_first(Action::Quit);
        press(&mut screen, "ctrl+c", props(&state)).assert_first(Action::Quit);
    }

    #[test]
    fn test_esc_closes_dropdown_instead_of_quitting() {
        let mut screen = WeatherScreen::new();
        let state = AppState {
            dropdown_open: true,
            ..Default::default()
        };

        let actions = press(&mut screen, "esc", props(&state));
        actions.assert_first(Action::CityDropdownClose);

        let actions = press(&mut screen, "q", props(&state));
        actions.assert_empty();
    }

    #[test]
    fn test_enter_opens_dropdown() {
        let mut screen = WeatherScreen::new();
        let state = AppState::default();

        press(&mut screen, "enter", props(&state)).assert_first(Action::CityDropdownToggle);
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut screen = WeatherScreen::new();
        let state = AppState::default();
        let props = WeatherScreenProps {
            state: &state,
            is_focused: false,
        };

        press(&mut screen, "f", props).assert_empty();
    }

    #[test]
    fn test_render_labels() {
        let mut render = RenderHarness::new(60, 20);
        let mut screen = WeatherScreen::new();

        let state = AppState {
            labels: WeatherLabels {
                city: Some("Nishinomiya".into()),
                description: Some("晴天".into()),
            },
            ..Default::default()
        };

        let output = render.render_to_string_plain(|frame| {
            screen.render(frame, frame.area(), props(&state));
        });

        assert!(output.contains("Weather Checker"));
        assert!(output.contains("Nishinomiya"));
        assert!(output.contains("晴"));
    }

    #[test]
    fn test_render_loading() {
        let mut render = RenderHarness::new(60, 20);
        let mut screen = WeatherScreen::new();

        let mut state = AppState::default();
        state.begin_request();

        let output = render.render_to_string_plain(|frame| {
            screen.render(frame, frame.area(), props(&state));
        });

        assert!(output.contains("Fetching"));
    }

    #[test]
    fn test_open_dropdown_gets_navigation_keys() {
        let mut screen = WeatherScreen::new();
        let state = AppState {
            dropdown_open: true,
            ..Default::default()
        };

        press(&mut screen, "down", props(&state)).assert_first(Action::CitySelect(1));
        press(&mut screen, "enter", props(&state)).assert_first(Action::CityDropdownClose);
    }

    #[test]
    fn test_status_line_is_dim() {
        let mut render = RenderHarness::new(60, 20);
        let mut screen = WeatherScreen::new();

        let state = AppState {
            status: Some("request timed out".into()),
            ..Default::default()
        };

        let buffer = render
            .render(|frame| screen.render(frame, frame.area(), props(&state)))
            .clone();
        let text = buffer_to_string_plain(&buffer);

        let (row, line) = text
            .lines()
            .enumerate()
            .find(|(_, line)| line.contains("request timed out"))
            .expect("status line rendered");
        let col = line[..line.find("request").unwrap()].chars().count();

        let cell = &buffer[(col as u16, row as u16)];
        assert_eq!(cell.symbol(), "r");
        assert!(cell.modifier.contains(Modifier::DIM));
        assert_eq!(cell.fg, Color::DarkGray);
    }
}
