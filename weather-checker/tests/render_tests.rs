//! Render tests using RenderHarness
//!
//! - Create harness with terminal dimensions
//! - Render the screen to a test buffer
//! - Convert to plain text and check what the user would see

use weather_checker::{
    components::{Component, WeatherScreen, WeatherScreenProps},
    state::{AppState, WeatherLabels},
    testing::*,
};

fn render_screen(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut screen = WeatherScreen::new();

    render.render_to_string_plain(|frame| {
        let props = WeatherScreenProps {
            state,
            is_focused: true,
        };
        screen.render(frame, frame.area(), props);
    })
}

#[test]
fn test_render_initial_state() {
    let state = AppState::default();
    let output = render_screen(&state, 60, 20);

    assert!(output.contains("Nishinomiya"), "Should show selected city");
    assert!(output.contains("Get weather"), "Should show fetch button");
    assert!(output.contains("City"), "Should show city label");
    assert!(output.contains("Weather"), "Should show weather label");
    assert!(output.contains("—"), "Unfilled labels show a placeholder");
}

#[test]
fn test_render_labels_after_fetch() {
    let state = AppState {
        labels: WeatherLabels {
            city: Some("Kobe".into()),
            description: Some("light rain".into()),
        },
        ..Default::default()
    };
    let output = render_screen(&state, 60, 20);

    assert!(output.contains("Kobe"), "Should show resolved city");
    assert!(output.contains("light rain"), "Should show description");
}

#[test]
fn test_render_loading_state() {
    let mut state = AppState::default();
    state.begin_request();

    let output = render_screen(&state, 60, 20);

    assert!(output.contains("Fetching"), "Should show loading button");
    assert!(!output.contains("Get weather"));
}

#[test]
fn test_render_failure_keeps_labels() {
    let state = AppState {
        labels: WeatherLabels {
            city: Some("Kobe".into()),
            description: Some("clear sky".into()),
        },
        status: Some("request timed out".into()),
        ..Default::default()
    };
    let output = render_screen(&state, 60, 20);

    assert!(output.contains("clear sky"), "Previous labels stay visible");
    assert!(output.contains("request timed out"), "Should show status");
}

#[test]
fn test_render_dropdown_open() {
    let state = AppState {
        cities: vec!["Tokyo".into(), "Osaka".into(), "Kobe".into()],
        selected: 2,
        dropdown_open: true,
        ..AppState::default()
    };
    let output = render_screen(&state, 60, 20);

    assert!(output.contains("Tokyo"));
    assert!(output.contains("Osaka"));
    assert!(output.contains("▸ Kobe"), "Selected city is highlighted");
    assert!(output.contains("choose"), "Help bar switches to list hints");
}

#[test]
fn test_render_help_bar() {
    let state = AppState::default();
    let output = render_screen(&state, 80, 24);

    assert!(output.contains("city"), "Should show city hint");
    assert!(output.contains("fetch"), "Should show fetch hint");
    assert!(output.contains("quit"), "Should show quit hint");
}

#[test]
fn test_render_tiny_terminal_does_not_panic() {
    let state = AppState {
        dropdown_open: true,
        ..Default::default()
    };
    let _ = render_screen(&state, 10, 4);
}
