//! This module contains the `init()` function, which sets everything up and runs the terminal game
//! until the player quits.
//!
//! The loop is driven by what the game shows: while a menu is up, the menu is asked for a choice;
//! otherwise a key is read and turned into a command. After a jump is accepted the game is ticked
//! at a fixed frame rate until it lands.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use console::Term;
use env_logger::{Builder, Env, Target};
use fastrand::Rng;
use log::{debug, info};

use crate::config::Cli;
use crate::frame::{choose, EndMenu, StartMenu, TerminalHost};
use crate::game::Game;
use crate::input::{read_command, Command};

/// Initializes the game and handles the whole session. This is a `main()` function of sorts though
/// it is still called from main.rs.
///
/// # Errors
///
/// The function may return any one of the following errors:
///
/// - `log::SetLoggerError`, if a logger was already installed
/// - `lanejump::GameError`, if the configured clips cannot time a jump
/// - `io::Error` and `dialoguer::Error`, if the terminal misbehaves
pub fn init() -> Result<()> {
    let cli = Cli::parse();
    Builder::from_env(Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .target(Target::Stderr)
        .try_init()?;

    let term = Term::stdout();
    let rng = cli.seed().map_or_else(Rng::new, Rng::with_seed);
    let host = TerminalHost::new(term.clone(), cli.clip_table());
    let mut game = Game::new(cli.settings(), host, rng)?;
    let frame = Duration::from_secs_f32(cli.frame_time());

    term.set_title("lanejump");
    term.hide_cursor()?;
    let outcome = run(&term, &mut game, frame);
    term.show_cursor()?;

    outcome
}

/// This function ticks the game once per frame until the jump in flight lands.
fn animate(game: &mut Game<TerminalHost>, frame: Duration) -> Result<()> {
    let mut last = Instant::now();

    loop {
        thread::sleep(frame);
        let now = Instant::now();
        let delta = now.duration_since(last).as_secs_f32();
        last = now;

        let landed = game.tick(delta);
        game.host().draw(game.road().len(), game.state())?;

        if let Some(landing) = landed {
            debug!("landed on tile {}", landing.index);
            break Ok(());
        }
    }
}

/// This function runs the game loop until the player quits.
fn run(term: &Term, game: &mut Game<TerminalHost>, frame: Duration) -> Result<()> {
    let mut acknowledged = game.completed_courses();

    loop {
        game.host().draw(game.road().len(), game.state())?;

        if game.host().end_menu_visible() {
            match choose::<EndMenu>(term, "Fell into a gap")? {
                Some(EndMenu::Restart) => game.restart(),
                Some(EndMenu::Quit) | None => break,
            }
            continue;
        }

        if game.host().start_menu_visible() {
            let completed = game.completed_courses() > acknowledged;
            acknowledged = game.completed_courses();
            match choose::<StartMenu>(term, StartMenu::prompt(completed))? {
                Some(StartMenu::Play) => {
                    if !game.start() {
                        debug!("start refused in {:?}", game.state());
                    }
                }
                Some(StartMenu::Quit) | None => break,
            }
            continue;
        }

        match read_command(term)? {
            Command::Jump(step) => {
                if game.jump(step)? {
                    animate(game, frame)?;
                }
            }
            Command::Restart => game.restart(),
            Command::Quit => break,
            Command::Pass => {}
        }
    }

    info!("leaving after {} steps", game.motion().index());
    term.clear_screen()?;
    Ok(())
}
