//! Input adapter
//!
//! Maps raw host events to engine commands. The host does not need to
//! track the game mode itself; the mode decides what a tap means.

use crate::sim::{Command, GameMode};

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowUp,
    Other,
}

impl Key {
    /// From a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => Key::Space,
            "ArrowUp" => Key::ArrowUp,
            _ => Key::Other,
        }
    }
}

/// Raw events forwarded by the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown,
    KeyDown(Key),
    /// The host's "play" control
    PlayButton,
    /// The host's "reset" control
    ResetButton,
}

/// Command for `event` in `mode`, if any
pub fn map_event(event: InputEvent, mode: GameMode) -> Option<Command> {
    match event {
        InputEvent::PointerDown | InputEvent::KeyDown(Key::Space | Key::ArrowUp) => match mode {
            GameMode::Playing => Some(Command::Jump),
            GameMode::GameOver => Some(Command::Restart),
            // The demo only starts from the explicit play control
            GameMode::IdleDemo => None,
        },
        InputEvent::KeyDown(Key::Other) => None,
        InputEvent::PlayButton => Some(Command::Start),
        InputEvent::ResetButton => Some(Command::StopToDemo),
    }
}
