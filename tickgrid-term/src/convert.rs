//! Translation from crossterm input to the events the widgets consume.
//!
//! `Key`, `Modifiers`, and `MouseButton` live in `tickgrid`, so the
//! conversions are free functions rather than `From` impls.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton as CtButton,
    MouseEventKind,
};
use tickgrid::{Key, Modifiers, MouseButton};

/// A terminal input event, ready to feed to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key {
        key: Key,
        modifiers: Modifiers,
    },
    MousePress {
        x: u16,
        y: u16,
        button: MouseButton,
        modifiers: Modifiers,
    },
    MouseRelease {
        x: u16,
        y: u16,
        button: MouseButton,
    },
    MouseMove {
        x: u16,
        y: u16,
    },
    /// Vertical scroll; positive is down.
    Scroll {
        delta: i16,
    },
    Resize {
        width: u16,
        height: u16,
    },
}

/// Convert a raw crossterm event. Returns `None` for events the widgets
/// have no use for, such as key releases or focus changes.
pub fn convert_event(event: &CrosstermEvent) -> Option<InputEvent> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(InputEvent::Key {
            key: convert_key(key.code),
            modifiers: convert_modifiers(key.modifiers),
        }),
        CrosstermEvent::Mouse(mouse) => {
            let (x, y) = (mouse.column, mouse.row);
            match mouse.kind {
                MouseEventKind::Down(button) => Some(InputEvent::MousePress {
                    x,
                    y,
                    button: convert_button(button),
                    modifiers: convert_modifiers(mouse.modifiers),
                }),
                MouseEventKind::Up(button) => Some(InputEvent::MouseRelease {
                    x,
                    y,
                    button: convert_button(button),
                }),
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    Some(InputEvent::MouseMove { x, y })
                }
                MouseEventKind::ScrollUp => Some(InputEvent::Scroll { delta: -1 }),
                MouseEventKind::ScrollDown => Some(InputEvent::Scroll { delta: 1 }),
                _ => None,
            }
        }
        CrosstermEvent::Resize(width, height) => Some(InputEvent::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

pub fn convert_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Insert => Key::Insert,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Char('\0'), // Placeholder for unsupported keys
    }
}

pub fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: mods.contains(KeyModifiers::SHIFT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

pub fn convert_button(button: CtButton) -> MouseButton {
    match button {
        CtButton::Left => MouseButton::Left,
        CtButton::Right => MouseButton::Right,
        CtButton::Middle => MouseButton::Middle,
    }
}
