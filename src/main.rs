//! # lanejump
//!
//! This crate is a game about crossing a road made of stones and gaps. Every turn you either hop
//! onto the next tile or leap over it onto the one after. Land on a stone and you carry on; land in
//! a gap and the run is over. Make it past the last tile and a new road is laid out.
//!
//! The road is drawn right in the terminal, and the menus between runs are simple select prompts.

#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use anyhow::Result;
use lanejump::init;

fn main() -> Result<()> {
    init()
}
