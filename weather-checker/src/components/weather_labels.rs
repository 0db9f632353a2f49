use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::state::WeatherLabels;

/// Shown while a label has never been filled
const PLACEHOLDER: &str = "—";

const CAPTION_WIDTH: usize = 10;

/// The presenter's two output fields: resolved city name and description
pub struct WeatherLabelsView;

pub struct WeatherLabelsProps<'a> {
    pub labels: &'a WeatherLabels,
}

impl WeatherLabelsView {
    pub const HEIGHT: u16 = 2;
}

fn label_line<'a>(caption: &'a str, value: Option<&'a str>) -> Line<'a> {
    let value = match value {
        Some(text) => Span::styled(text, Style::default().fg(Color::White).bold()),
        None => Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
    };

    Line::from(vec![
        Span::styled(
            format!(" {caption:<CAPTION_WIDTH$}"),
            Style::default().fg(Color::Gray),
        ),
        value,
    ])
}

impl Component for WeatherLabelsView {
    type Props<'a> = WeatherLabelsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

        frame.render_widget(
            Paragraph::new(label_line("City", props.labels.city.as_deref())),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(label_line("Weather", props.labels.description.as_deref())),
            chunks[1],
        );
    }
}
