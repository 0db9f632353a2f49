//! Weather checker: pick a city, fetch its current weather, show two labels.
//!
//! Architecture follows a Redux/Elm-style loop:
//! 1. Event (keyboard) -> `Component::handle_event()` -> Actions
//! 2. Actions queued on the runtime's action channel
//! 3. Reducer updates state and declares effects
//! 4. Effects spawn tasks in the `TaskManager`; their results come back as actions
//! 5. If state changed, re-render

pub mod action;
pub mod api;
pub mod cities;
pub mod components;
pub mod config;
pub mod effect;
pub mod event;
pub mod logging;
pub mod permission;
pub mod reducer;
pub mod report;
pub mod runtime;
pub mod state;
pub mod tasks;
pub mod testing;
