/// Terminal input adapter: crossterm events in, held-key state out
use std::collections::HashSet;

use crossterm::event::{self as ct, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use meshlite_core::{InputSource, Key, MouseButton};

/// Held keys and mouse buttons for the current frame.
///
/// Many terminals only report key presses. Until a release event has been
/// seen, keys count as held for the frame they were pressed in and are
/// cleared by [`TerminalInput::end_frame`].
#[derive(Debug, Default)]
pub struct TerminalInput {
    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,
    releases_reported: bool,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        let Some(key) = map_key(event.code) else {
            return;
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.keys_down.insert(key);
            }
            KeyEventKind::Release => {
                self.releases_reported = true;
                self.keys_down.remove(&key);
            }
        }
    }

    /// Track buttons and return the cursor cell for every pointer event
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<(f32, f32)> {
        match event.kind {
            MouseEventKind::Down(button) => {
                self.buttons_down.insert(map_button(button));
            }
            MouseEventKind::Up(button) => {
                self.buttons_down.remove(&map_button(button));
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {}
            _ => return None,
        }
        Some((event.column as f32, event.row as f32))
    }

    pub fn end_frame(&mut self) {
        if !self.releases_reported {
            self.keys_down.clear();
        }
    }

    /// Focus loss drops everything so nothing stays stuck down
    pub fn clear(&mut self) {
        self.keys_down.clear();
        self.buttons_down.clear();
    }
}

impl InputSource for TerminalInput {
    fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Key::W,
            'a' => Key::A,
            's' => Key::S,
            'd' => Key::D,
            'q' => Key::Q,
            'e' => Key::E,
            _ => return None,
        },
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };
    Some(key)
}

fn map_button(button: ct::MouseButton) -> MouseButton {
    match button {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Right => MouseButton::Right,
        ct::MouseButton::Middle => MouseButton::Middle,
    }
}
