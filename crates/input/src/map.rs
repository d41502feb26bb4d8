//! Key mapping from terminal events to viewer commands.

use crate::types::ViewerCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Screen units moved by one pan key press.
pub const PAN_STEP: i32 = 4;

/// Map keyboard input to viewer commands.
pub fn handle_key_event(key: KeyEvent) -> Option<ViewerCommand> {
    match key.code {
        // Playback
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(ViewerCommand::TogglePlay)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(ViewerCommand::StepBack),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(ViewerCommand::StepForward)
        }
        KeyCode::Home | KeyCode::Char('g') => Some(ViewerCommand::SeekFirst),
        KeyCode::End | KeyCode::Char('G') => Some(ViewerCommand::SeekLast),
        KeyCode::Char(c @ '0'..='9') => {
            let tenth = c as u8 - b'0';
            Some(ViewerCommand::SeekPercent(tenth * 10))
        }

        // Speed
        KeyCode::Char('[') => Some(ViewerCommand::Slower),
        KeyCode::Char(']') => Some(ViewerCommand::Faster),

        // Camera
        KeyCode::Char('w') | KeyCode::Char('W') => Some(ViewerCommand::Pan {
            dx: 0,
            dy: PAN_STEP,
        }),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(ViewerCommand::Pan {
            dx: 0,
            dy: -PAN_STEP,
        }),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(ViewerCommand::Pan {
            dx: PAN_STEP,
            dy: 0,
        }),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(ViewerCommand::Pan {
            dx: -PAN_STEP,
            dy: 0,
        }),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(ViewerCommand::ZoomIn),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(ViewerCommand::ZoomOut),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(ViewerCommand::Refit),

        _ => None,
    }
}

/// Check if key should quit the viewer.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
