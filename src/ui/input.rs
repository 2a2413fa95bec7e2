//! Key press to intent mapping

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{engine::SELECTABLE_DURATIONS, state::ViewState};

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectDuration(u32),
    TogglePause,
    Reset,
    Interact,
    Quit,
}

/// Translate a key event given the frame currently on screen.
/// Key releases and repeats are ignored.
pub fn map_key(key: KeyEvent, view: &ViewState) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let command = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char(c @ '1'..='9') if view.time_left.is_none() => {
            let index = c as usize - '1' as usize;
            match SELECTABLE_DURATIONS.get(index) {
                Some(&minutes) => Command::SelectDuration(minutes),
                None => Command::Interact,
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') if view.time_left.is_some() => Command::TogglePause,
        KeyCode::Char('r') if view.time_left.is_some() => Command::Reset,
        _ => Command::Interact,
    };

    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn counting() -> ViewState {
        ViewState {
            time_left: Some(90),
            is_running: true,
            ..ViewState::idle()
        }
    }

    #[test]
    fn test_digits_pick_presets_on_selection_screen() {
        let idle = ViewState::idle();
        assert_eq!(map_key(press(KeyCode::Char('1')), &idle), Some(Command::SelectDuration(1)));
        assert_eq!(map_key(press(KeyCode::Char('4')), &idle), Some(Command::SelectDuration(10)));
        assert_eq!(map_key(press(KeyCode::Char('9')), &idle), Some(Command::SelectDuration(60)));
        assert_eq!(map_key(press(KeyCode::Char('4')), &counting()), Some(Command::Interact));
    }

    #[test]
    fn test_countdown_controls() {
        let view = counting();
        assert_eq!(map_key(press(KeyCode::Char(' ')), &view), Some(Command::TogglePause));
        assert_eq!(map_key(press(KeyCode::Char('p')), &view), Some(Command::TogglePause));
        assert_eq!(map_key(press(KeyCode::Char('r')), &view), Some(Command::Reset));
        assert_eq!(map_key(press(KeyCode::Char('r')), &ViewState::idle()), Some(Command::Interact));
        assert_eq!(map_key(press(KeyCode::Left), &view), Some(Command::Interact));
    }

    #[test]
    fn test_quit_keys() {
        let view = counting();
        assert_eq!(map_key(press(KeyCode::Char('q')), &view), Some(Command::Quit));
        assert_eq!(map_key(press(KeyCode::Esc), &view), Some(Command::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, &view), Some(Command::Quit));
    }

    #[test]
    fn test_release_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('r'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(release, &counting()), None);
    }
}
