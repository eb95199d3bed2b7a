//! This module contains the entries of the start and end menus.

use crate::frame::Selected;

/// This enum holds the entries of the menu shown before a run.
#[expect(
    clippy::arbitrary_source_item_ordering,
    reason = "It's best if the items reflect the actual order they are displayed in the menu."
)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum StartMenu {
    /// This variant is used when the run should start.
    Play,
    /// This variant is used when the player wants out of the game.
    Quit,
}

impl StartMenu {
    /// This function returns the question the start menu asks. Right after the player made it past
    /// the end of the road it congratulates them instead.
    pub(crate) const fn prompt(completed: bool) -> &'static str {
        if completed {
            "Course completed! Go again?"
        } else {
            "Ready?"
        }
    }
}

impl Selected for StartMenu {
    fn list() -> Vec<Self> {
        vec![Self::Play, Self::Quit]
    }

    fn repr(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Quit => "Quit",
        }
    }
}

/// This enum holds the entries of the menu shown after falling into a gap.
#[expect(
    clippy::arbitrary_source_item_ordering,
    reason = "It's best if the items reflect the actual order they are displayed in the menu."
)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum EndMenu {
    /// This variant is used when the player wants another go on a new road.
    Restart,
    /// This variant is used when the player wants out of the game.
    Quit,
}

impl Selected for EndMenu {
    fn list() -> Vec<Self> {
        vec![Self::Restart, Self::Quit]
    }

    fn repr(self) -> &'static str {
        match self {
            Self::Restart => "Restart",
            Self::Quit => "Quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EndMenu, StartMenu};
    use crate::frame::Selected;

    #[test]
    fn first_entry_moves_the_game_along() {
        assert_eq!(StartMenu::list().first().copied(), Some(StartMenu::Play));
        assert_eq!(EndMenu::list().first().copied(), Some(EndMenu::Restart));
        assert_eq!(EndMenu::Quit.repr(), StartMenu::Quit.repr());
    }

    #[test]
    fn start_menu_announces_a_completed_course() {
        assert_eq!(StartMenu::prompt(false), "Ready?");
        assert_eq!(StartMenu::prompt(true), "Course completed! Go again?");
    }
}
