use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// Whether a key name reported by the global hook counts as a letter.
///
/// Only names made of exactly one alphabetic character qualify; function keys,
/// digits, punctuation and control characters are dropped.
pub fn is_countable(name: Option<&str>) -> bool {
    let Some(name) = name else {
        return false;
    };
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_alphabetic(),
        _ => false,
    }
}

/// User intents coming from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Start,
    Stop,
    Reset,
    Quit,
}

pub fn handle_key(key: KeyEvent) -> Action {
    // some terminals report releases and repeats too
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    match key.code {
        KeyCode::F(1) => Action::Start,
        KeyCode::F(2) => Action::Stop,
        KeyCode::F(3) => Action::Reset,
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        _ => Action::None,
    }
}

/// Map a left click onto whichever button it landed on.
/// `buttons` is ordered start, stop, reset.
pub fn handle_mouse(mouse: MouseEvent, buttons: [Rect; 3]) -> Action {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Action::None;
    }

    let pos = Position::new(mouse.column, mouse.row);
    let actions = [Action::Start, Action::Stop, Action::Reset];
    buttons
        .iter()
        .zip(actions)
        .find(|(area, _)| area.contains(pos))
        .map(|(_, action)| action)
        .unwrap_or(Action::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_is_countable_letters() {
        assert!(is_countable(Some("a")));
        assert!(is_countable(Some("Z")));
        assert!(is_countable(Some("é")));
    }

    #[test]
    fn test_is_countable_rejects_everything_else() {
        assert!(!is_countable(None));
        assert!(!is_countable(Some("")));
        assert!(!is_countable(Some("7")));
        assert!(!is_countable(Some(" ")));
        assert!(!is_countable(Some(";")));
        assert!(!is_countable(Some("F1")));
        assert!(!is_countable(Some("ab")));
        assert!(!is_countable(Some("\u{13}")));
    }

    #[test]
    fn test_function_keys_map_to_controls() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(handle_key(key(KeyCode::F(1))), Action::Start);
        assert_eq!(handle_key(key(KeyCode::F(2))), Action::Stop);
        assert_eq!(handle_key(key(KeyCode::F(3))), Action::Reset);
        assert_eq!(handle_key(key(KeyCode::Esc)), Action::Quit);
        // letters typed here are counted by the hook, so none of them quit
        assert_eq!(handle_key(key(KeyCode::Char('q'))), Action::None);
        assert_eq!(handle_key(key(KeyCode::Char('a'))), Action::None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ev), Action::Quit);
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(handle_key(ev), Action::None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut ev = KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;
        assert_eq!(handle_key(ev), Action::None);
    }

    #[test]
    fn test_mouse_click_hits_buttons() {
        let buttons = [
            Rect::new(0, 5, 10, 3),
            Rect::new(10, 5, 10, 3),
            Rect::new(20, 5, 10, 3),
        ];
        let down = MouseEventKind::Down(MouseButton::Left);

        assert_eq!(handle_mouse(mouse(down, 2, 6), buttons), Action::Start);
        assert_eq!(handle_mouse(mouse(down, 12, 5), buttons), Action::Stop);
        assert_eq!(handle_mouse(mouse(down, 29, 7), buttons), Action::Reset);
        assert_eq!(handle_mouse(mouse(down, 40, 6), buttons), Action::None);
        assert_eq!(
            handle_mouse(mouse(MouseEventKind::Moved, 2, 6), buttons),
            Action::None
        );
    }
}
