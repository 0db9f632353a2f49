//! Test utilities
//!
//! - [`key`]: Create a `KeyEvent` from a string (e.g., `key("ctrl+c")`)
//! - [`RenderHarness`]: Render into an in-memory terminal and read it back as text
//! - [`ActionAssertions`]: Assertions on emitted actions
//!
//! # Example
//!
//! ```ignore
//! let mut render = RenderHarness::new(60, 20);
//! let output = render.render_to_string_plain(|frame| {
//!     screen.render(frame, frame.area(), props);
//! });
//! assert!(output.contains("Get weather"));
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Frame, Terminal, backend::TestBackend, buffer::Buffer};

use crate::action::Action;

/// Parse a key string such as `"q"`, `"enter"`, `"f5"` or `"ctrl+c"`.
pub fn parse_key_string(s: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = s.split('+').collect();
    let name = parts.pop()?;

    for modifier in parts {
        modifiers |= match modifier.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return None,
        };
    }

    let code = match name.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        lower => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => {
                    let n = lower.strip_prefix('f')?.parse::<u8>().ok()?;
                    KeyCode::F(n)
                }
            }
        }
    };

    Some(KeyEvent::new(code, modifiers))
}

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Renders into a `TestBackend` and converts the buffer to text.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("failed to create test terminal");
        Self { terminal }
    }

    /// Render with `f` and return the resulting buffer.
    pub fn render(&mut self, f: impl FnOnce(&mut Frame)) -> &Buffer {
        self.terminal.draw(f).expect("failed to draw");
        self.terminal.backend().buffer()
    }

    /// Render with `f` and return the screen as lines of plain text.
    pub fn render_to_string_plain(&mut self, f: impl FnOnce(&mut Frame)) -> String {
        buffer_to_string_plain(self.render(f))
    }
}

/// Buffer contents without styling, one line per row.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::with_capacity((area.width as usize + 1) * area.height as usize);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// Assertions for the actions a component emits
pub trait ActionAssertions {
    fn assert_empty(&self);
    fn assert_count(&self, n: usize);
    fn assert_first(&self, expected: Action);
}

impl ActionAssertions for [Action] {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "Expected no actions, got: {:?}", self);
    }

    fn assert_count(&self, n: usize) {
        assert_eq!(
            self.len(),
            n,
            "Expected {} actions, got {}: {:?}",
            n,
            self.len(),
            self
        );
    }

    fn assert_first(&self, expected: Action) {
        match self.first() {
            Some(first) => assert_eq!(first, &expected, "Unexpected first action"),
            None => panic!("Expected first action {:?}, got none", expected),
        }
    }
}

impl ActionAssertions for Vec<Action> {
    fn assert_empty(&self) {
        self.as_slice().assert_empty();
    }

    fn assert_count(&self, n: usize) {
        self.as_slice().assert_count(n);
    }

    fn assert_first(&self, expected: Action) {
        self.as_slice().assert_first(expected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_simple() {
        assert_eq!(key("q").code, KeyCode::Char('q'));
        assert_eq!(key("G").code, KeyCode::Char('G'));
        assert_eq!(key("enter").code, KeyCode::Enter);
        assert_eq!(key("space").code, KeyCode::Char(' '));
        assert_eq!(key("f5").code, KeyCode::F(5));
        assert_eq!(key("f").code, KeyCode::Char('f'));
    }

    #[test]
    fn test_key_modifiers() {
        let k = key("ctrl+c");
        assert_eq!(k.code, KeyCode::Char('c'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_invalid_key() {
        assert!(parse_key_string("hyper+x").is_none());
        assert!(parse_key_string("nonsense").is_none());
    }
}
