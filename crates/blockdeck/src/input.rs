//! Maps raw key events to presentation commands.

/// Physical key identity, as reported by the host input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Space,
    PageDown,
    PageUp,
    Home,
    End,
    Escape,
    Tab,
    Digit(u8),
    KeyF,
    KeyN,
    KeyP,
    KeyR,
    KeyT,
    Other,
}

#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    pub key: Key,
    pub repeat: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            repeat: false,
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    fn unmodified(&self) -> bool {
        !self.ctrl && !self.alt && !self.meta
    }
}

/// A state-machine transition requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    First,
    Last,
    /// 0-based target index; ignored downstream when out of bounds.
    Jump(usize),
    Exit,
    Rescan,
    TogglePanel,
    CycleTheme,
    ToggleNotes,
    ToggleFullscreen,
}

/// Resolve a key event against the overlay bindings. `None` means the event
/// is not ours and must pass through to the host page untouched.
pub fn route(event: &KeyEvent) -> Option<Command> {
    if event.repeat {
        return None;
    }
    match event.key {
        Key::ArrowRight | Key::Space | Key::PageDown => Some(Command::Next),
        Key::ArrowLeft | Key::PageUp => Some(Command::Prev),
        Key::Home => Some(Command::First),
        Key::End => Some(Command::Last),
        Key::Escape => Some(Command::Exit),
        Key::Tab => Some(Command::TogglePanel),
        Key::Digit(n) if (1..=9).contains(&n) && event.unmodified() => {
            Some(Command::Jump(n as usize - 1))
        }
        Key::KeyR if event.unmodified() => Some(Command::Rescan),
        Key::KeyT if event.unmodified() => Some(Command::CycleTheme),
        Key::KeyN if event.unmodified() => Some(Command::ToggleNotes),
        Key::KeyF if event.unmodified() => Some(Command::ToggleFullscreen),
        _ => None,
    }
}

/// The page-wide activation chord: Alt+Shift+P, independent of overlay focus.
pub fn is_toggle_shortcut(event: &KeyEvent) -> bool {
    event.key == Key::KeyP && event.alt && event.shift && !event.repeat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_keys() {
        assert_eq!(route(&KeyEvent::plain(Key::ArrowRight)), Some(Command::Next));
        assert_eq!(route(&KeyEvent::plain(Key::Space)), Some(Command::Next));
        assert_eq!(route(&KeyEvent::plain(Key::PageUp)), Some(Command::Prev));
        assert_eq!(route(&KeyEvent::plain(Key::Home)), Some(Command::First));
        assert_eq!(route(&KeyEvent::plain(Key::End)), Some(Command::Last));
    }

    #[test]
    fn test_repeats_are_ignored() {
        let mut ev = KeyEvent::plain(Key::ArrowRight);
        ev.repeat = true;
        assert_eq!(route(&ev), None);
    }

    #[test]
    fn test_digit_jump_is_zero_based() {
        assert_eq!(route(&KeyEvent::plain(Key::Digit(1))), Some(Command::Jump(0)));
        assert_eq!(route(&KeyEvent::plain(Key::Digit(9))), Some(Command::Jump(8)));
        assert_eq!(route(&KeyEvent::plain(Key::Digit(0))), None);
    }

    #[test]
    fn test_rescan_requires_no_modifiers() {
        assert_eq!(route(&KeyEvent::plain(Key::KeyR)), Some(Command::Rescan));
        let mut ev = KeyEvent::plain(Key::KeyR);
        ev.ctrl = true;
        assert_eq!(route(&ev), None);
        let mut ev = KeyEvent::plain(Key::KeyR);
        ev.meta = true;
        assert_eq!(route(&ev), None);
    }

    #[test]
    fn test_toggle_shortcut_chord() {
        let mut ev = KeyEvent::plain(Key::KeyP);
        assert!(!is_toggle_shortcut(&ev));
        ev.alt = true;
        ev.shift = true;
        assert!(is_toggle_shortcut(&ev));
        ev.repeat = true;
        assert!(!is_toggle_shortcut(&ev));
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        assert_eq!(route(&KeyEvent::plain(Key::Other)), None);
    }
}
