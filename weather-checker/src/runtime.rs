//! The UI loop
//!
//! Owns the state, the action queue and the task manager. Everything that
//! touches state runs here; background tasks only post actions into the queue.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::action::Action;
use crate::effect::EffectHandler;
use crate::event::{EventKind, PollerConfig, spawn_event_poller};
use crate::reducer::reducer;
use crate::state::{AppState, LOADING_ANIM_TICK_MS};
use crate::tasks::TaskManager;

/// Result of mapping an event into actions plus an optional render hint.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    /// Actions to enqueue.
    pub actions: Vec<Action>,
    /// Whether to force a re-render.
    pub needs_render: bool,
}

impl EventOutcome {
    /// No actions and no render.
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// Useful for converting `Component::handle_event` results.
    pub fn from_actions(iter: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    /// Mark that a render is needed.
    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

pub struct Runtime {
    state: AppState,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    tasks: TaskManager,
    effects: EffectHandler,
    tick_interval: Duration,
    should_render: bool,
}

impl Runtime {
    pub fn new(state: AppState, effects: EffectHandler) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());

        Self {
            state,
            action_tx,
            action_rx,
            tasks,
            effects,
            tick_interval: Duration::from_millis(LOADING_ANIM_TICK_MS),
            should_render: true,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    /// Reduce one action and hand its effects to the effect handler.
    /// Returns whether the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        if matches!(action, Action::Tick) {
            trace!(action = action.name(), "dispatch");
        } else {
            debug!(action = %action.summary(), "dispatch");
        }

        let result = reducer(&mut self.state, action);
        if result.has_effects() {
            for effect in result.effects {
                self.effects.handle(effect, &mut self.tasks);
            }
        }
        result.changed
    }

    /// Wait for the next queued action.
    pub async fn next_action(&mut self) -> Option<Action> {
        self.action_rx.recv().await
    }

    /// Run the event/action loop until `Action::Quit`.
    pub async fn run<B, FRender, FEvent>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &AppState),
        FEvent: FnMut(&EventKind, &AppState) -> EventOutcome,
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<EventKind>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());

        let mut tick = tokio::time::interval(self.tick_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("UI loop started");

        loop {
            if self.should_render {
                let state = &self.state;
                terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(event) = event_rx.recv() => {
                    let outcome = map_event(&event, &self.state);
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if matches!(action, Action::Quit) {
                        break;
                    }
                    if self.dispatch(action) {
                        self.should_render = true;
                    }
                }

                _ = tick.tick() => {
                    if self.dispatch(Action::Tick) {
                        self.should_render = true;
                    }
                }
            }
        }

        info!("UI loop stopped");
        cancel_token.cancel();
        self.tasks.cancel_all();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WeatherClient;
    use crate::config::ApiConfig;

    fn runtime() -> Runtime {
        let client = WeatherClient::new(&ApiConfig::default()).expect("client");
        Runtime::new(AppState::default(), EffectHandler::new(client))
    }

    #[test]
    fn test_event_outcome_from_component_actions() {
        let outcome = EventOutcome::from_actions(Some(Action::WeatherFetch));
        assert_eq!(outcome.actions, vec![Action::WeatherFetch]);
        assert!(!outcome.needs_render);

        let outcome = EventOutcome::from_actions(None::<Action>);
        assert_eq!(outcome, EventOutcome::ignored());
    }

    #[test]
    fn test_event_outcome_with_render() {
        let outcome = EventOutcome::ignored().with_render();
        assert!(outcome.actions.is_empty());
        assert!(outcome.needs_render);
    }

    #[test]
    fn test_dispatch_without_effects() {
        let mut runtime = runtime();

        assert!(runtime.dispatch(Action::CityDropdownToggle));
        assert!(runtime.state().dropdown_open);
        assert!(runtime.tasks().is_empty());

        assert!(!runtime.dispatch(Action::Tick));
    }
}
