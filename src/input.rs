use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::game::{Action, Screen};
use crate::game_mode::GameMode;
use crate::layout::{cell_to_arena, ScreenLayout};
use crate::runtime::GameEvent;

/// What the event loop should do with one raw event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Quit,
    Act(Action),
}

/// Resolve a raw terminal event against the current screen.
/// `None` means the event has no meaning here.
pub fn translate(screen: Screen, event: &GameEvent, layout: &ScreenLayout) -> Option<Command> {
    match event {
        GameEvent::Key(key) => translate_key(screen, key),
        GameEvent::Mouse(mouse) => translate_mouse(screen, mouse, layout).map(Command::Act),
        GameEvent::Resize(..) | GameEvent::Tick => None,
    }
}

pub fn translate_key(screen: Screen, key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
    {
        return Some(Command::Quit);
    }

    let action = match (screen, key.code) {
        (Screen::ModeSelect, KeyCode::Char(c @ '1'..='4')) => {
            let idx = c as usize - '1' as usize;
            Action::SelectMode(GameMode::ALL[idx])
        }
        (Screen::ModeSelect, KeyCode::Char('c')) => Action::ClearScores,
        (Screen::ConfirmClear, KeyCode::Char('y')) => Action::ConfirmClear,
        (Screen::ConfirmClear, KeyCode::Char('n')) => Action::CancelClear,
        (Screen::Ended, KeyCode::Enter | KeyCode::Char(' ')) => Action::Continue,
        (Screen::NameInput, KeyCode::Enter) => Action::Submit,
        (Screen::NameInput, KeyCode::Backspace) => Action::Backspace,
        (Screen::NameInput, KeyCode::Char(c))
            if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() =>
        {
            Action::Char(c)
        }
        _ => return None,
    };

    Some(Command::Act(action))
}

pub fn translate_mouse(screen: Screen, mouse: &MouseEvent, layout: &ScreenLayout) -> Option<Action> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let (col, row) = (mouse.column, mouse.row);

    match screen {
        Screen::ModeSelect => layout.mode_at(col, row).map(Action::SelectMode).or_else(|| {
            layout
                .clear_clicked(col, row)
                .then_some(Action::ClearScores)
        }),
        Screen::ConfirmClear => {
            if layout.confirm_yes_clicked(col, row) {
                Some(Action::ConfirmClear)
            } else if layout.confirm_no_clicked(col, row) {
                Some(Action::CancelClear)
            } else {
                None
            }
        }
        Screen::Ended => layout.continue_clicked(col, row).then_some(Action::Continue),
        Screen::Playing => {
            let (x, y) = cell_to_arena(layout.area, col, row);
            Some(Action::Shoot { x, y })
        }
        Screen::Countdown | Screen::NameInput => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn layout() -> ScreenLayout {
        ScreenLayout::new(Rect::new(0, 0, 120, 40))
    }

    fn key(code: KeyCode) -> GameEvent {
        GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> GameEvent {
        GameEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_escape_and_ctrl_c_quit_everywhere() {
        let l = layout();
        let ctrl_c = GameEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        for screen in [Screen::ModeSelect, Screen::Playing, Screen::NameInput] {
            assert_eq!(translate(screen, &key(KeyCode::Esc), &l), Some(Command::Quit));
            assert_eq!(translate(screen, &ctrl_c, &l), Some(Command::Quit));
        }
    }

    #[test]
    fn test_number_keys_pick_modes() {
        let l = layout();
        assert_eq!(
            translate(Screen::ModeSelect, &key(KeyCode::Char('3')), &l),
            Some(Command::Act(Action::SelectMode(GameMode::Burst)))
        );
        assert_eq!(translate(Screen::ModeSelect, &key(KeyCode::Char('5')), &l), None);
        assert_eq!(translate(Screen::Playing, &key(KeyCode::Char('1')), &l), None);
    }

    #[test]
    fn test_name_input_keys() {
        let l = layout();
        assert_eq!(
            translate(Screen::NameInput, &key(KeyCode::Char('c')), &l),
            Some(Command::Act(Action::Char('c')))
        );
        assert_eq!(
            translate(Screen::NameInput, &key(KeyCode::Enter), &l),
            Some(Command::Act(Action::Submit))
        );
        assert_eq!(
            translate(Screen::NameInput, &key(KeyCode::Backspace), &l),
            Some(Command::Act(Action::Backspace))
        );
    }

    #[test]
    fn test_name_input_ignores_chords() {
        let l = layout();
        let shifted = GameEvent::Key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(
            translate(Screen::NameInput, &shifted, &l),
            Some(Command::Act(Action::Char('A')))
        );

        for chord in [KeyModifiers::CONTROL, KeyModifiers::ALT] {
            let event = GameEvent::Key(KeyEvent::new(KeyCode::Char('a'), chord));
            assert_eq!(translate(Screen::NameInput, &event, &l), None);
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let mut release = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate_key(Screen::ModeSelect, &release), None);
    }

    #[test]
    fn test_click_mode_button() {
        let l = layout();
        let (mode, rect) = l.mode_buttons[1];
        assert_eq!(
            translate(Screen::ModeSelect, &click(rect.x + 2, rect.y + 1), &l),
            Some(Command::Act(Action::SelectMode(mode)))
        );
        assert_eq!(
            translate(
                Screen::ModeSelect,
                &click(l.clear_button.x, l.clear_button.y),
                &l
            ),
            Some(Command::Act(Action::ClearScores))
        );
        assert_eq!(translate(Screen::ModeSelect, &click(0, 39), &l), None);
    }

    #[test]
    fn test_click_confirm_buttons() {
        let l = layout();
        assert_eq!(
            translate(Screen::ConfirmClear, &click(l.confirm_yes.x, l.confirm_yes.y), &l),
            Some(Command::Act(Action::ConfirmClear))
        );
        assert_eq!(
            translate(Screen::ConfirmClear, &click(l.confirm_no.x, l.confirm_no.y), &l),
            Some(Command::Act(Action::CancelClear))
        );
    }

    #[test]
    fn test_click_while_playing_shoots_in_arena_units() {
        let l = layout();
        assert_eq!(
            translate(Screen::Playing, &click(3, 2), &l),
            Some(Command::Act(Action::Shoot { x: 35.0, y: 50.0 }))
        );
    }

    #[test]
    fn test_other_mouse_events_ignored() {
        let l = layout();
        let moved = GameEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 3,
            row: 2,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate(Screen::Playing, &moved, &l), None);
        assert_eq!(translate(Screen::Countdown, &click(3, 2), &l), None);
    }
}
