//! This module holds the error type shared by the game components.
//!
//! Gameplay mishaps, such as asking for a jump while one is already in flight, are never errors;
//! they are ignored and logged. Only configuration problems that would make the game behave wrongly
//! are surfaced through [`GameError`].

use thiserror::Error;

/// This enum holds every configuration problem the game refuses to run with.
#[expect(
    clippy::arbitrary_source_item_ordering,
    reason = "The variants follow the order in which the game validates its configuration."
)]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// The road was configured with zero tiles, so there is nowhere to stand.
    #[error("the road must be at least one tile long")]
    EmptyRoad,
    /// The road was configured longer than the game is willing to lay out.
    #[error("the road can be at most {max} tiles long, not {length}")]
    RoadTooLong {
        /// This field contains the length that was asked for.
        length: usize,
        /// This field contains the longest length allowed.
        max: usize,
    },
    /// A fixed road layout breaks one of the layout rules.
    #[error("invalid road layout: {reason}")]
    InvalidRoad {
        /// This field describes which rule the layout breaks.
        reason: String,
    },
    /// A jump was requested with a step count other than one or two.
    #[error("a jump covers one or two tiles, not {0}")]
    InvalidStep(u8),
    /// The animation system has no clip with the name the jump needs.
    #[error("no animation clip named `{name}` is configured")]
    MissingClip {
        /// This field contains the name of the clip that was looked up.
        name: &'static str,
    },
    /// The animation system reported a duration that cannot time a jump.
    #[error("animation clip `{name}` has an unusable duration of {duration}s")]
    InvalidClipDuration {
        /// This field contains the name of the clip that was looked up.
        name: &'static str,
        /// This field contains the duration the animation system reported, in seconds.
        duration: f32,
    },
}
