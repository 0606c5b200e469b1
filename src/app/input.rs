//! Keyboard input mapping.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move to the next Bell state.
    Next,
    /// Move to the previous Bell state.
    Previous,
    /// Leave the explorer.
    Quit,
}

impl Command {
    /// Step this command moves the selector by; 0 for `Quit`.
    pub fn delta(self) -> i32 {
        match self {
            Command::Next => 1,
            Command::Previous => -1,
            Command::Quit => 0,
        }
    }
}

/// Maps a key press to a command. Releases and repeats are ignored so a
/// single press never moves the selector twice.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('n') | KeyCode::Char(' ') => Some(Command::Next),
        KeyCode::Left | KeyCode::Up | KeyCode::Char('p') => Some(Command::Previous),
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

/// Maps any terminal event; only key events produce commands.
pub fn map_event(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) => map_key(*key),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_letters_cycle() {
        for code in [KeyCode::Right, KeyCode::Down, KeyCode::Char('n'), KeyCode::Char(' ')] {
            assert_eq!(map_key(press(code)), Some(Command::Next), "{:?}", code);
        }
        for code in [KeyCode::Left, KeyCode::Up, KeyCode::Char('p')] {
            assert_eq!(map_key(press(code)), Some(Command::Previous), "{:?}", code);
        }
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn release_events_are_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Right,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(release), None);
        assert_eq!(map_event(&Event::Key(release)), None);
        assert_eq!(map_event(&Event::FocusGained), None);
    }

    #[test]
    fn deltas() {
        assert_eq!(Command::Next.delta(), 1);
        assert_eq!(Command::Previous.delta(), -1);
        assert_eq!(Command::Quit.delta(), 0);
    }
}
