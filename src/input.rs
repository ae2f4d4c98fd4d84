use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    TogglePause,
    Restart,
    Quit,
    None,
}

pub fn map_key(key: &KeyEvent) -> KeyAction {
    // Release and repeat events show up on some platforms; only presses count
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }

    if is_ctrl_c(key) {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => KeyAction::Turn(Direction::Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => KeyAction::Turn(Direction::Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => KeyAction::Turn(Direction::Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => KeyAction::Turn(Direction::Right),
        KeyCode::Esc | KeyCode::Char('p') => KeyAction::TogglePause,
        KeyCode::Char('r') => KeyAction::Restart,
        KeyCode::Char('q') => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
