//! Weather checker TUI
//!
//! # Usage
//!
//! ```sh
//! # API key from the environment
//! OPENWEATHER_API_KEY=... weather-checker
//!
//! # Preselect a city, English descriptions
//! weather-checker --city Kobe --lang en
//! ```

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{info, warn};

use weather_checker::api::WeatherClient;
use weather_checker::cities;
use weather_checker::components::{Component, WeatherScreen, WeatherScreenProps};
use weather_checker::config::{Config, Overrides};
use weather_checker::effect::EffectHandler;
use weather_checker::event::EventKind;
use weather_checker::logging;
use weather_checker::permission::check_location_permission;
use weather_checker::runtime::{EventOutcome, Runtime};
use weather_checker::state::AppState;

/// Current weather for a city, from OpenWeatherMap
#[derive(Parser, Debug)]
#[command(name = "weather-checker", version)]
#[command(about = "Pick a city and check its current weather")]
struct Args {
    /// Config file (default: platform config dir / weather-checker / config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// City to preselect in the dropdown
    #[arg(long)]
    city: Option<String>,

    /// Language of weather descriptions
    #[arg(long, short)]
    lang: Option<String>,

    /// Weather endpoint (for testing against a local server)
    #[arg(long, hide = true)]
    base_url: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Everything that can fail with a readable message happens before TUI mode
    let mut config = Config::load(args.config.as_deref())?;
    config.apply(Overrides {
        api_key: args.api_key,
        lang: args.lang,
        base_url: args.base_url,
        log_file: args.log_file,
    });
    config.validate()?;

    let _log_guard = logging::init(&config.log)?;

    let client = WeatherClient::new(&config.api).context("failed to build HTTP client")?;

    let mut state = AppState::new(cities::from_config(&config.cities));
    state.permission = check_location_permission(&config.location);
    if let Some(city) = args.city.as_deref() {
        if !state.preselect(city) {
            warn!(city, "requested city is not in the list, ignoring");
        }
    }
    info!(cities = state.cities.len(), selected = ?state.selected_city(), "starting");

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, state, EffectHandler::new(client)).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("UI loop failed")
}

struct WeatherUi {
    screen: WeatherScreen,
}

impl WeatherUi {
    fn new() -> Self {
        Self {
            screen: WeatherScreen::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let props = WeatherScreenProps {
            state,
            is_focused: true,
        };
        self.screen.render(frame, area, props);
    }

    fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome {
        if let EventKind::Resize(..) = event {
            return EventOutcome::ignored().with_render();
        }

        let props = WeatherScreenProps {
            state,
            is_focused: true,
        };
        EventOutcome::from_actions(self.screen.handle_event(event, props))
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: AppState,
    effects: EffectHandler,
) -> io::Result<()> {
    let mut runtime = Runtime::new(state, effects);
    let ui = RefCell::new(WeatherUi::new());

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
        )
        .await
}
