use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;

pub struct HelpBar;

pub struct HelpBarProps {
    /// The dropdown is expanded, so navigation hints apply
    pub dropdown_open: bool,
}

impl Component for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let key = Style::default().fg(Color::Cyan).bold();
        let hint = Style::default().fg(Color::DarkGray);

        let help = if props.dropdown_open {
            Line::from(vec![
                Span::styled(" ↑↓", key),
                Span::styled(" choose  ", hint),
                Span::styled("enter", key),
                Span::styled(" done  ", hint),
                Span::styled("f", key),
                Span::styled(" fetch ", hint),
            ])
        } else {
            Line::from(vec![
                Span::styled(" enter", key),
                Span::styled(" city  ", hint),
                Span::styled("f", key),
                Span::styled(" fetch  ", hint),
                Span::styled("q", key),
                Span::styled(" quit ", hint),
            ])
        }
        .centered();
        frame.render_widget(Paragraph::new(help), area);
    }
}
