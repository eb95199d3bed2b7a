//! This module holds the terminal rendering of the game: the host the game draws through, and the
//! menus shown between runs.

use anyhow::Result;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

mod lane;
mod menu;

pub(crate) use lane::TerminalHost;
pub(crate) use menu::{EndMenu, StartMenu};

/// This trait is implemented by the enums listing the entries of a menu.
pub(crate) trait Selected: Copy {
    /// This function returns all the entries, in the order they are displayed.
    fn list() -> Vec<Self>;

    /// This function returns the text shown for the entry.
    fn repr(self) -> &'static str;
}

/// This function shows a menu and waits for an entry to be picked. Escaping out of the menu gives
/// back `None`.
pub(crate) fn choose<M: Selected>(term: &Term, prompt: &str) -> Result<Option<M>> {
    let entries = M::list();
    let items: Vec<&str> = entries.iter().map(|&entry| entry.repr()).collect();

    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_on_opt(term)?;

    Ok(picked.and_then(|index| entries.get(index).copied()))
}
