//! Terminal events and the background poller that reads them

use std::time::Duration;

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Event delivered to components
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Key(KeyEvent),
    Resize(u16, u16),
}

impl EventKind {
    /// Ctrl+C quits from anywhere
    pub fn is_interrupt(&self) -> bool {
        matches!(
            self,
            EventKind::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
        )
    }
}

/// Configuration for the event poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Map a crossterm event. Key releases and unrelated events are dropped.
pub fn process_raw_event(raw: event::Event) -> Option<EventKind> {
    match raw {
        event::Event::Key(key) if key.kind != KeyEventKind::Release => Some(EventKind::Key(key)),
        event::Event::Resize(w, h) => Some(EventKind::Resize(w, h)),
        _ => None,
    }
}

/// Spawn the event polling task with cancellation support
///
/// Crossterm polling is blocking, so it runs in short bursts between sleeps.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<EventKind>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(config.loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(config.poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let Ok(raw) = event::read() else {
                            continue;
                        };
                        if let Some(kind) = process_raw_event(raw) {
                            if tx.send(kind).is_err() {
                                debug!("Event channel closed, stopping poller");
                                return;
                            }
                        }
                    }
                }
            }
        }
    })
}
