//! The library components of lanejump, a game about hopping along a road of stones without falling
//! into the gaps between them.
//!
//! The gameplay lives in [`game::Game`], which drives a [`road::Road`] and a
//! [`motion::PlayerMotion`] and talks to whatever hosts it through the traits in [`host`]. The
//! terminal front end built on top of it is started with [`init()`].

mod config;
pub mod error;
mod frame;
pub mod game;
pub mod host;
mod input;
pub mod motion;
pub mod road;
mod session;

pub use error::GameError;
pub use game::{Game, GameSettings, GameState};
pub use session::init;
