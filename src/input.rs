//! This module contains the translation of key presses into game commands.

use anyhow::Result;
use console::{Key, Term};

use crate::motion::JumpStep;

/// This enum holds what a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// This variant is used when the player asks for a jump.
    Jump(JumpStep),
    /// This variant is used when the key has no binding.
    Pass,
    /// This variant is used when the player wants out of the game.
    Quit,
    /// This variant is used when the player wants a new road.
    Restart,
}

impl From<Key> for Command {
    fn from(key: Key) -> Self {
        match key {
            Key::Char('1' | 'j') | Key::ArrowRight => Self::Jump(JumpStep::One),
            Key::Char('2' | 'k') | Key::ArrowUp => Self::Jump(JumpStep::Two),
            Key::Char('r') => Self::Restart,
            Key::Char('q') | Key::Escape => Self::Quit,
            _ => Self::Pass,
        }
    }
}

/// This function blocks until a key is pressed and returns the command bound to it.
pub(crate) fn read_command(term: &Term) -> Result<Command> {
    Ok(Command::from(term.read_key()?))
}

#[cfg(test)]
mod tests {
    use console::Key;

    use super::Command;
    use crate::motion::JumpStep;

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(Command::from(Key::Char('1')), Command::Jump(JumpStep::One));
        assert_eq!(Command::from(Key::ArrowRight), Command::Jump(JumpStep::One));
        assert_eq!(Command::from(Key::Char('k')), Command::Jump(JumpStep::Two));
        assert_eq!(Command::from(Key::Char('r')), Command::Restart);
        assert_eq!(Command::from(Key::Escape), Command::Quit);
        assert_eq!(Command::from(Key::Char('x')), Command::Pass);
        assert_eq!(Command::from(Key::Enter), Command::Pass);
    }
}
