pub mod city_selector;
pub mod help_bar;
pub mod weather_labels;
pub mod weather_screen;

use ratatui::{Frame, layout::Rect};

use crate::action::Action;
use crate::event::EventKind;

pub use city_selector::{CitySelector, CitySelectorProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use weather_labels::{WeatherLabelsView, WeatherLabelsProps};
pub use weather_screen::{SPINNERS, WeatherScreen, WeatherScreenProps};

/// A UI element that renders from props and emits actions
///
/// Rules:
/// 1. Props carry all read-only data needed for rendering
/// 2. `handle_event` returns actions, never mutates app state
/// 3. `render` is a function of props plus internal UI state (scroll offset)
///
/// Focus is passed through props.
pub trait Component {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch.
    ///
    /// Default implementation returns no actions (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None::<Action>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
