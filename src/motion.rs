//! This module contains the player's movement: how far along the road the player is, and the
//! timed hop from one tile to the next.
//!
//! A jump is driven by the host's frame ticks. Its duration comes from the animation clip that
//! goes with the jump size, so the character lands exactly when its animation ends. Once started a
//! jump always runs to completion, and at most one jump is in flight at a time.

use log::debug;

use crate::error::GameError;
use crate::host::{Animator, Position};
use crate::road::TILE_SIZE;

/// This enum holds the two jump sizes the player is capable of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpStep {
    /// A hop onto the next tile.
    One,
    /// A leap over the next tile onto the one after it.
    Two,
}

impl JumpStep {
    /// Both jump sizes, shortest first.
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    /// This function returns the name of the animation clip that plays during this jump. Its
    /// duration is also the duration of the jump.
    #[must_use]
    pub const fn clip(self) -> &'static str {
        match self {
            Self::One => "one-step",
            Self::Two => "two-step",
        }
    }

    /// This function returns the distance covered by this jump along the lane.
    #[must_use]
    pub fn distance(self) -> f32 {
        f32::from(self.tiles()) * TILE_SIZE
    }

    /// This function returns the number of tiles this jump advances the player by.
    #[must_use]
    pub const fn tiles(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl TryFrom<u8> for JumpStep {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(GameError::InvalidStep(other)),
        }
    }
}

/// This struct holds the notification produced when a jump lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpEnded {
    /// This field contains the cumulative tile index the player landed on.
    pub index: usize,
    /// This field contains the exact landing position.
    pub position: Position,
}

/// This enum holds the two states the player's motion can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    /// Standing still, ready to accept a jump.
    Idle,
    /// In the air; jump requests are ignored until landing.
    Jumping,
}

/// This struct holds everything about the jump currently in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Jump {
    /// This field contains the size of the jump.
    step: JumpStep,
    /// This field contains the time spent in the air so far, in seconds.
    elapsed: f32,
    /// This field contains the total time the jump lasts, in seconds.
    duration: f32,
    /// This field contains the speed along the lane, in units per second.
    speed: f32,
    /// This field contains where the jump took off from.
    start: Position,
    /// This field contains where the jump lands.
    target: Position,
}

/// This struct holds the player's progress along the road and its jump in flight, if any.
#[derive(Debug, Clone, Default)]
pub struct PlayerMotion {
    /// This field contains the total number of tiles advanced since the last reset.
    index: usize,
    /// This field contains the current, possibly mid-air, position of the player.
    position: Position,
    /// This field contains the jump in flight; `None` while idle.
    jump: Option<Jump>,
}

impl PlayerMotion {
    /// This function returns the cumulative tile index. It already includes a jump in flight,
    /// since the index is advanced when a jump starts.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// This function returns whether a jump is currently in flight.
    #[must_use]
    pub const fn is_jumping(&self) -> bool {
        self.jump.is_some()
    }

    /// This function starts a jump of `step` tiles.
    ///
    /// If a jump is already in flight the request is dropped and `Ok(false)` is returned. Otherwise
    /// the jump's duration is read from the clip that goes with `step`, the clip starts playing,
    /// the cumulative index is advanced right away and `Ok(true)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::MissingClip`] when the animator has no clip for the jump, and
    /// [`GameError::InvalidClipDuration`] when that clip's duration is not a positive, finite
    /// number of seconds. Nothing changes in either case.
    pub fn jump_by_step<A: Animator + ?Sized>(
        &mut self,
        step: JumpStep,
        animator: &mut A,
    ) -> Result<bool, GameError> {
        if let Some(jump) = self.jump {
            debug!("jump of {step:?} ignored, {:?} still in flight", jump.step);
            return Ok(false);
        }

        let clip = step.clip();
        let duration = animator
            .clip_duration(clip)
            .ok_or(GameError::MissingClip { name: clip })?;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(GameError::InvalidClipDuration {
                name: clip,
                duration,
            });
        }

        let start = self.position;
        self.jump = Some(Jump {
            step,
            elapsed: 0.0,
            duration,
            speed: step.distance() / duration,
            start,
            target: start.along_lane(step.distance()),
        });
        animator.play_clip(clip);
        self.index += usize::from(step.tiles());
        debug!("jump of {step:?} towards tile {} over {duration}s", self.index);

        Ok(true)
    }

    /// This function puts an idle player at `position`. It does nothing mid-jump.
    pub fn place(&mut self, position: Position) {
        if self.jump.is_none() {
            self.position = position;
        }
    }

    /// This function returns the player's current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// This function sends the player back to the start: index zero, at the origin, with any jump
    /// in flight discarded.
    pub fn reset(&mut self) {
        if let Some(jump) = self.jump.take() {
            debug!("discarding jump from {:?} on reset", jump.start);
        }
        self.index = 0;
        self.position = Position::ORIGIN;
    }

    /// This function returns whether the player is idle or jumping.
    #[must_use]
    pub const fn state(&self) -> MotionState {
        if self.jump.is_some() {
            MotionState::Jumping
        } else {
            MotionState::Idle
        }
    }

    /// This function advances the jump in flight by `delta` seconds.
    ///
    /// While the jump lasts, the player moves along the lane at constant speed. Once the elapsed
    /// time goes past the jump's duration the player is snapped exactly onto the landing spot, the
    /// jump is cleared and a [`JumpEnded`] is returned; that is the only time one is returned for
    /// any given jump. Negative or NaN deltas count as no time at all.
    pub fn update(&mut self, delta: f32) -> Option<JumpEnded> {
        let delta = delta.max(0.0);
        let jump = self.jump.as_mut()?;

        jump.elapsed += delta;
        if jump.elapsed > jump.duration {
            self.position = jump.target;
            self.jump = None;
            return Some(JumpEnded {
                index: self.index,
                position: self.position,
            });
        }

        self.position = self.position.along_lane(jump.speed * delta);
        None
    }
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "Landing positions are snapped, so they must compare exactly."
)]
mod tests {
    use super::{JumpEnded, JumpStep, MotionState, PlayerMotion};
    use crate::error::GameError;
    use crate::host::testing::RecordingHost;
    use crate::host::Position;
    use crate::road::TILE_SIZE;

    /// Ticks until the jump lands, returning the landing and how many ticks produced nothing.
    fn run_to_landing(motion: &mut PlayerMotion, delta: f32) -> (JumpEnded, usize) {
        let mut quiet = 0;
        loop {
            if let Some(ended) = motion.update(delta) {
                return (ended, quiet);
            }
            quiet += 1;
            assert!(quiet < 100_000, "jump never landed");
        }
    }

    #[test]
    fn steps_convert_from_one_and_two_only() {
        assert_eq!(JumpStep::try_from(1_u8), Ok(JumpStep::One));
        assert_eq!(JumpStep::try_from(2_u8), Ok(JumpStep::Two));
        assert_eq!(JumpStep::try_from(0_u8), Err(GameError::InvalidStep(0)));
        assert_eq!(JumpStep::try_from(3_u8), Err(GameError::InvalidStep(3)));
    }

    #[test]
    fn two_step_lands_exactly_whatever_the_tick() {
        for delta in [0.001, 0.007, 1.0 / 60.0, 1.0 / 30.0, 0.05, 0.3, 5.0] {
            let mut host = RecordingHost::new();
            let mut motion = PlayerMotion::default();
            let start = Position::new(3.5, 1.0, -2.0);
            motion.place(start);

            assert_eq!(motion.jump_by_step(JumpStep::Two, &mut host), Ok(true));
            let (ended, _) = run_to_landing(&mut motion, delta);

            assert_eq!(ended.position, start.along_lane(2.0 * TILE_SIZE));
            assert_eq!(motion.position(), ended.position);
            assert_eq!(ended.index, 2);
            assert_eq!(motion.state(), MotionState::Idle);
        }
    }

    #[test]
    fn position_moves_linearly_mid_jump() {
        let mut host = RecordingHost::new();
        let mut motion = PlayerMotion::default();

        assert_eq!(motion.jump_by_step(JumpStep::One, &mut host), Ok(true));
        assert_eq!(motion.update(0.05), None);

        let x = motion.position().x;
        assert!((x - TILE_SIZE / 2.0).abs() < 1e-3, "halfway after half the clip, got {x}");
    }

    #[test]
    fn index_advances_when_the_jump_starts() {
        let mut host = RecordingHost::new();
        let mut motion = PlayerMotion::default();

        assert_eq!(motion.jump_by_step(JumpStep::Two, &mut host), Ok(true));
        assert_eq!(motion.index(), 2);
        assert!(motion.is_jumping());
        assert_eq!(host.played, vec!["two-step".to_owned()]);
    }

    #[test]
    fn busy_jumps_are_ignored() {
        let mut host = RecordingHost::new();
        let mut motion = PlayerMotion::default();

        assert_eq!(motion.jump_by_step(JumpStep::One, &mut host), Ok(true));
        assert_eq!(motion.jump_by_step(JumpStep::Two, &mut host), Ok(false));
        assert_eq!(motion.index(), 1);
        assert_eq!(host.played.len(), 1);

        let (ended, _) = run_to_landing(&mut motion, 0.02);
        assert_eq!(ended.index, 1);
        assert_eq!(ended.position.x, TILE_SIZE);
        for _ in 0..10 {
            assert_eq!(motion.update(0.1), None, "a jump lands only once");
        }
    }

    #[test]
    fn duration_comes_from_the_clip() {
        let mut host = RecordingHost::new();
        let _ = host.clips.insert("two-step".to_owned(), 1.0);
        let mut motion = PlayerMotion::default();

        assert_eq!(motion.jump_by_step(JumpStep::Two, &mut host), Ok(true));
        let (_, quiet) = run_to_landing(&mut motion, 0.25);

        assert_eq!(quiet, 4, "1s clip at 0.25s ticks lands on the fifth tick");
    }

    #[test]
    fn missing_or_broken_clips_are_errors() {
        let mut host = RecordingHost::new();
        let _ = host.clips.remove("one-step");
        let _ = host.clips.insert("two-step".to_owned(), 0.0);
        let mut motion = PlayerMotion::default();

        assert_eq!(
            motion.jump_by_step(JumpStep::One, &mut host),
            Err(GameError::MissingClip { name: "one-step" })
        );
        assert_eq!(
            motion.jump_by_step(JumpStep::Two, &mut host),
            Err(GameError::InvalidClipDuration {
                name: "two-step",
                duration: 0.0
            })
        );
        assert_eq!(motion.index(), 0);
        assert!(!motion.is_jumping());
        assert!(host.played.is_empty());
    }

    #[test]
    fn negative_and_nan_deltas_are_no_time() {
        let mut host = RecordingHost::new();
        let mut motion = PlayerMotion::default();

        assert_eq!(motion.jump_by_step(JumpStep::One, &mut host), Ok(true));
        assert_eq!(motion.update(0.05), None);
        let position = motion.position();
        let elapsed = motion.jump.map(|jump| jump.elapsed);

        assert_eq!(motion.update(-1.0), None);
        assert_eq!(motion.update(f32::NAN), None);
        assert_eq!(motion.update(f32::NEG_INFINITY), None);

        assert_eq!(motion.position(), position);
        assert_eq!(motion.jump.map(|jump| jump.elapsed), elapsed);
        assert!(motion.is_jumping());

        let (ended, _) = run_to_landing(&mut motion, 0.02);
        assert_eq!(ended.position.x, TILE_SIZE);
    }

    #[test]
    fn idle_updates_do_nothing() {
        let mut motion = PlayerMotion::default();

        assert_eq!(motion.update(1.0), None);
        assert_eq!(motion.position(), Position::ORIGIN);
    }

    #[test]
    fn reset_discards_the_jump_in_flight() {
        let mut host = RecordingHost::new();
        let mut motion = PlayerMotion::default();

        assert_eq!(motion.jump_by_step(JumpStep::Two, &mut host), Ok(true));
        assert_eq!(motion.update(0.05), None);
        motion.reset();

        assert_eq!(motion.index(), 0);
        assert_eq!(motion.position(), Position::ORIGIN);
        assert_eq!(motion.update(1.0), None);
    }
}
