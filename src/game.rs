//! The game module contains the state machine tying the road, the player and the host together.
//!
//! The game starts in [`GameState::Init`] with a fresh road and the start menu up. The start button
//! moves it to [`GameState::Playing`], where jumps are accepted. Every landing is checked against
//! the road: a gap ends the run in [`GameState::End`], and running off the far end of the road
//! recycles the game back to [`GameState::Init`].

use fastrand::Rng;
use log::{debug, info};

use crate::error::GameError;
use crate::host::{Host, NodeHandle, Widget};
use crate::motion::{JumpEnded, JumpStep, PlayerMotion};
use crate::road::{Road, Tile, DEFAULT_ROAD_LENGTH, MAX_ROAD_LENGTH};

/// This enum holds the coarse states the game moves through.
#[expect(
    clippy::arbitrary_source_item_ordering,
    reason = "The variants are listed in the order a run goes through them."
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// A fresh road is laid out and the start menu is showing.
    Init,
    /// The run is on and jumps are accepted.
    Playing,
    /// The player fell into a gap; only a restart gets out of here.
    End,
}

/// This struct holds the knobs a game is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    /// This field contains the number of tiles in every generated road.
    pub road_length: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            road_length: DEFAULT_ROAD_LENGTH,
        }
    }
}

/// This struct holds a whole game: its road, its player, its state and the host it runs in.
#[derive(Debug)]
pub struct Game<H> {
    /// This field contains the number of times the player made it past the end of the road.
    completed: usize,
    /// This field contains the collaborator providing visuals, animations and UI.
    host: H,
    /// This field contains the player's progress and jump in flight.
    motion: PlayerMotion,
    /// This field contains the visual standing in for the player, if the host provided one.
    player: Option<NodeHandle>,
    /// This field contains the random source roads are generated from.
    rng: Rng,
    /// This field contains the current road.
    road: Road,
    /// This field contains what the game was built with.
    settings: GameSettings,
    /// This field contains the current state.
    state: GameState,
}

impl<H: Host> Game<H> {
    /// This function returns how many times the player has made it past the end of a road. Each
    /// completion sends the game back to [`GameState::Init`], so this is the only trace one leaves.
    #[must_use]
    pub const fn completed_courses(&self) -> usize {
        self.completed
    }

    /// This function returns the host the game runs in.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// This function attempts a jump of `step` tiles.
    ///
    /// Outside of [`GameState::Playing`], or with a jump already in flight, nothing happens and
    /// `Ok(false)` is returned. Otherwise the jump starts and `Ok(true)` is returned. The player's
    /// position is re-read from its visual before taking off, so a host that moved the player
    /// gets the jump it expects.
    ///
    /// # Errors
    ///
    /// Returns the clip errors of [`PlayerMotion::jump_by_step`].
    pub fn jump(&mut self, step: JumpStep) -> Result<bool, GameError> {
        if self.state != GameState::Playing {
            debug!("jump of {step:?} ignored in {:?}", self.state);
            return Ok(false);
        }

        if let Some(position) = self
            .player
            .and_then(|node| self.host.node_position(node))
        {
            self.motion.place(position);
        }

        self.motion.jump_by_step(step, &mut self.host)
    }

    /// This function returns the player's progress and jump in flight.
    #[must_use]
    pub const fn motion(&self) -> &PlayerMotion {
        &self.motion
    }

    /// This function builds a game and puts it in [`GameState::Init`].
    ///
    /// The settings and the host's jump clips are checked up front so that a misconfigured game
    /// never gets as far as the first jump.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyRoad`] for a zero road length, [`GameError::RoadTooLong`] past
    /// [`MAX_ROAD_LENGTH`], and [`GameError::MissingClip`] or [`GameError::InvalidClipDuration`]
    /// when the host cannot time one of the jumps.
    pub fn new(settings: GameSettings, mut host: H, rng: Rng) -> Result<Self, GameError> {
        match settings.road_length {
            0 => return Err(GameError::EmptyRoad),
            length if length > MAX_ROAD_LENGTH => {
                return Err(GameError::RoadTooLong {
                    length,
                    max: MAX_ROAD_LENGTH,
                })
            }
            _ => {}
        }

        for step in JumpStep::ALL {
            let name = step.clip();
            match host.clip_duration(name) {
                None => return Err(GameError::MissingClip { name }),
                Some(duration) if !duration.is_finite() || duration <= 0.0 => {
                    return Err(GameError::InvalidClipDuration { name, duration })
                }
                Some(_) => {}
            }
        }

        let player = host.spawn_player();
        if player.is_none() {
            debug!("host has no visual for the player");
        }

        let mut game = Self {
            completed: 0,
            host,
            motion: PlayerMotion::default(),
            player,
            rng,
            road: Road::default(),
            settings,
            state: GameState::Init,
        };
        game.set_state(GameState::Init);

        Ok(game)
    }

    /// This function attempts a jump of a raw number of tiles, as a button would ask for one.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidStep`] for anything but one or two tiles, and otherwise the
    /// errors of [`Game::jump`].
    pub fn request_jump(&mut self, tiles: u8) -> Result<bool, GameError> {
        self.jump(JumpStep::try_from(tiles)?)
    }

    /// This function throws the current run away and goes back to [`GameState::Init`] with a new
    /// road, from any state.
    pub fn restart(&mut self) {
        self.host.set_visible(Widget::EndMenu, false);
        self.set_state(GameState::Init);
        self.host.set_visible(Widget::StartMenu, true);
    }

    /// This function returns the current road.
    #[must_use]
    pub const fn road(&self) -> &Road {
        &self.road
    }

    /// This function starts a run. It only has an effect in [`GameState::Init`], and returns
    /// whether it did.
    pub fn start(&mut self) -> bool {
        if self.state != GameState::Init {
            debug!("start ignored in {:?}", self.state);
            return false;
        }
        self.set_state(GameState::Playing);
        true
    }

    /// This function returns the current state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// This function advances the game by one frame of `delta` seconds.
    ///
    /// The jump in flight moves along and the player's visual follows it. When the jump lands, the
    /// landing is checked against the road before the notification is handed back.
    pub fn tick(&mut self, delta: f32) -> Option<JumpEnded> {
        if !self.motion.is_jumping() {
            return None;
        }

        let ended = self.motion.update(delta);
        if let Some(node) = self.player {
            self.host.set_node_position(node, self.motion.position());
        }
        if let Some(landing) = ended {
            self.on_jump_end(landing.index);
        }

        ended
    }

    /// This function checks where a jump landed and moves the game along accordingly.
    fn check_result(&mut self, index: usize) {
        if index >= self.road.len() {
            info!("course of {} tiles completed", self.road.len());
            self.completed += 1;
            self.set_state(GameState::Init);
            return;
        }

        if self.road.tile(index) == Some(Tile::Empty) {
            info!("fell into the gap at tile {index}");
            self.set_state(GameState::End);
        }
    }

    /// This function is run for every jump that lands. The step label never shows more than the
    /// length of the road.
    fn on_jump_end(&mut self, index: usize) {
        let shown = index.min(self.road.len());
        self.host
            .set_label_text(Widget::StepLabel, &shown.to_string());
        self.check_result(index);
    }

    /// This function sets a new state and carries out the side effects of entering it.
    fn set_state(&mut self, state: GameState) {
        debug!("{:?} -> {state:?}", self.state);
        self.state = state;

        match state {
            GameState::Init => {
                self.host.set_visible(Widget::StartMenu, true);
                self.host.set_visible(Widget::EndMenu, false);

                self.host.clear_visuals();
                self.road = Road::generate(self.settings.road_length, &mut self.rng);
                let placed = self.road.place_visuals(&mut self.host);
                info!(
                    "generated a road of {} tiles, {placed} visuals placed",
                    self.road.len()
                );

                self.motion.reset();
                if let Some(node) = self.player {
                    self.host.set_node_position(node, self.motion.position());
                }
            }
            GameState::Playing => {
                self.host.set_visible(Widget::StartMenu, false);
                self.host.set_label_text(Widget::StepLabel, "0");
            }
            GameState::End => {
                self.host.set_visible(Widget::EndMenu, true);
            }
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "Positions are snapped on landing, so they must compare exactly."
)]
mod tests {
    use fastrand::Rng;

    use super::{Game, GameSettings, GameState};
    use crate::error::GameError;
    use crate::host::testing::RecordingHost;
    use crate::host::{NodeHandle, Position, Stage as _, Widget};
    use crate::motion::{JumpEnded, JumpStep};
    use crate::road::{Road, Tile, MAX_ROAD_LENGTH, TILE_SIZE};

    fn game(length: usize) -> Game<RecordingHost> {
        match Game::new(
            GameSettings {
                road_length: length,
            },
            RecordingHost::new(),
            Rng::with_seed(11),
        ) {
            Ok(game) => game,
            Err(err) => panic!("game should build: {err}"),
        }
    }

    fn all_solid(length: usize) -> Road {
        Road::from_tiles(vec![Tile::Solid; length]).unwrap_or_default()
    }

    fn gap_at_five() -> Road {
        Road::from_tiles(vec![
            Tile::Solid,
            Tile::Solid,
            Tile::Solid,
            Tile::Solid,
            Tile::Solid,
            Tile::Empty,
            Tile::Solid,
            Tile::Solid,
            Tile::Solid,
            Tile::Solid,
        ])
        .unwrap_or_default()
    }

    fn land(game: &mut Game<RecordingHost>) -> JumpEnded {
        for _ in 0..1_000 {
            if let Some(ended) = game.tick(1.0 / 60.0) {
                return ended;
            }
        }
        panic!("jump never landed");
    }

    #[test]
    fn new_game_is_initialised() {
        let game = game(10);

        assert_eq!(game.state(), GameState::Init);
        assert_eq!(game.road().len(), 10);
        assert!(game.host().is_visible(Widget::StartMenu));
        assert!(!game.host().is_visible(Widget::EndMenu));
        assert_eq!(game.motion().index(), 0);
        assert_eq!(game.host().clears, 1);
    }

    #[test]
    fn bad_settings_are_refused() {
        let empty = Game::new(
            GameSettings { road_length: 0 },
            RecordingHost::new(),
            Rng::with_seed(1),
        );
        assert!(matches!(empty, Err(GameError::EmptyRoad)));

        let host = RecordingHost::new();
        let huge = Game::new(
            GameSettings {
                road_length: usize::MAX,
            },
            host,
            Rng::with_seed(1),
        );
        assert!(matches!(
            huge,
            Err(GameError::RoadTooLong {
                length: usize::MAX,
                max: MAX_ROAD_LENGTH
            })
        ));
        assert!(Game::new(
            GameSettings {
                road_length: MAX_ROAD_LENGTH + 1,
            },
            RecordingHost::new(),
            Rng::with_seed(1),
        )
        .is_err());
        assert!(Game::new(
            GameSettings {
                road_length: MAX_ROAD_LENGTH,
            },
            RecordingHost::new(),
            Rng::with_seed(1),
        )
        .is_ok());

        let mut host = RecordingHost::new();
        let _ = host.clips.remove("two-step");
        let missing = Game::new(GameSettings::default(), host, Rng::with_seed(1));
        assert!(matches!(
            missing,
            Err(GameError::MissingClip { name: "two-step" })
        ));

        let mut host = RecordingHost::new();
        let _ = host.clips.insert("one-step".to_owned(), f32::NAN);
        let broken = Game::new(GameSettings::default(), host, Rng::with_seed(1));
        assert!(matches!(
            broken,
            Err(GameError::InvalidClipDuration {
                name: "one-step",
                ..
            })
        ));
    }

    #[test]
    fn only_start_leaves_init() {
        let mut game = game(10);

        assert_eq!(game.request_jump(1), Ok(false));
        game.restart();
        assert_eq!(game.state(), GameState::Init);

        assert!(game.start());
        assert_eq!(game.state(), GameState::Playing);
        assert!(!game.host().is_visible(Widget::StartMenu));
        assert_eq!(game.host().label(Widget::StepLabel), Some("0"));
        assert!(!game.start(), "start only works from init");
    }

    #[test]
    fn only_restart_leaves_end() {
        let mut game = game(10);
        assert!(game.start());
        game.road = Road::from_tiles(vec![Tile::Solid, Tile::Empty, Tile::Solid])
            .unwrap_or_default();

        assert_eq!(game.jump(JumpStep::One), Ok(true));
        let _ = land(&mut game);
        assert_eq!(game.state(), GameState::End);
        assert!(game.host().is_visible(Widget::EndMenu));

        assert!(!game.start());
        assert_eq!(game.jump(JumpStep::One), Ok(false));
        assert_eq!(game.tick(1.0), None);
        assert_eq!(game.state(), GameState::End);

        game.restart();
        assert_eq!(game.state(), GameState::Init);
        assert!(!game.host().is_visible(Widget::EndMenu));
        assert!(game.host().is_visible(Widget::StartMenu));
        assert_eq!(game.motion().index(), 0);
        assert_eq!(game.motion().position(), Position::ORIGIN);
    }

    #[test]
    fn landing_in_a_gap_ends_the_run() {
        let mut game = game(10);
        assert!(game.start());
        game.road = gap_at_five();

        game.check_result(4);
        assert_eq!(game.state(), GameState::Playing);
        game.check_result(5);
        assert_eq!(game.state(), GameState::End);
    }

    #[test]
    fn jumping_into_the_gap_at_five_ends_the_run() {
        let mut game = game(10);
        assert!(game.start());
        game.road = gap_at_five();

        assert_eq!(game.jump(JumpStep::Two), Ok(true));
        assert_eq!(land(&mut game).index, 2);
        assert_eq!(game.jump(JumpStep::Two), Ok(true));
        assert_eq!(land(&mut game).index, 4);
        assert_eq!(game.state(), GameState::Playing);

        assert_eq!(game.jump(JumpStep::One), Ok(true));
        let landing = land(&mut game);

        assert_eq!(landing.index, 5);
        assert_eq!(landing.position.x, 5.0 * TILE_SIZE);
        assert_eq!(game.state(), GameState::End);
        assert!(game.host().is_visible(Widget::EndMenu));
        assert_eq!(game.host().label(Widget::StepLabel), Some("5"));
        assert_eq!(game.jump(JumpStep::One), Ok(false));
        assert_eq!(game.completed_courses(), 0);
    }

    #[test]
    fn jumps_take_off_from_where_the_host_put_the_player() {
        let mut game = game(10);
        assert!(game.start());
        game.road = all_solid(10);
        let node = game.player.unwrap_or(NodeHandle::new(0));

        game.host
            .set_node_position(node, Position::new(TILE_SIZE, 5.0, 0.0));
        assert_eq!(game.jump(JumpStep::One), Ok(true));
        let landing = land(&mut game);

        assert_eq!(landing.position, Position::new(2.0 * TILE_SIZE, 5.0, 0.0));
        assert_eq!(game.host().node_position(node), Some(landing.position));
    }

    #[test]
    fn running_off_the_road_recycles_to_init() {
        let mut game = game(10);
        assert!(game.start());
        game.road = all_solid(10);

        game.check_result(10);
        assert_eq!(game.state(), GameState::Init);
        assert!(game.host().is_visible(Widget::StartMenu));
    }

    #[test]
    fn three_single_steps_complete_a_short_course() {
        let mut game = game(3);
        assert!(game.start());
        game.road = all_solid(3);

        let mut indices = Vec::new();
        for _ in 0..3 {
            assert_eq!(game.jump(JumpStep::One), Ok(true));
            indices.push(land(&mut game).index);
        }

        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(game.host().label(Widget::StepLabel), Some("3"));
        assert_eq!(game.state(), GameState::Init);
        assert_eq!(game.motion().index(), 0);
        assert_eq!(game.completed_courses(), 1);
        assert!(game.host().is_visible(Widget::StartMenu));
    }

    #[test]
    fn step_label_is_clamped_to_the_road() {
        let mut game = game(3);
        assert!(game.start());
        game.road = all_solid(3);

        assert_eq!(game.jump(JumpStep::Two), Ok(true));
        assert_eq!(land(&mut game).index, 2);
        assert_eq!(game.jump(JumpStep::Two), Ok(true));
        assert_eq!(land(&mut game).index, 4);

        assert_eq!(game.host().label(Widget::StepLabel), Some("3"));
        assert_eq!(game.state(), GameState::Init);
    }

    #[test]
    fn jumps_in_flight_are_not_doubled() {
        let mut game = game(10);
        assert!(game.start());
        game.road = all_solid(10);

        assert_eq!(game.request_jump(2), Ok(true));
        assert_eq!(game.request_jump(1), Ok(false));
        assert_eq!(game.request_jump(2), Ok(false));
        assert_eq!(game.motion().index(), 2);

        assert_eq!(land(&mut game).index, 2);
        for _ in 0..30 {
            assert_eq!(game.tick(1.0 / 60.0), None);
        }
        assert_eq!(game.host().played.len(), 1);
    }

    #[test]
    fn invalid_step_counts_are_errors() {
        let mut game = game(10);
        assert!(game.start());

        assert_eq!(game.request_jump(0), Err(GameError::InvalidStep(0)));
        assert_eq!(game.request_jump(3), Err(GameError::InvalidStep(3)));
        assert!(!game.motion().is_jumping());
    }

    #[test]
    fn player_visual_follows_the_jump() {
        let mut game = game(10);
        assert!(game.start());
        game.road = all_solid(10);
        let node = game.player.unwrap_or(NodeHandle::new(0));

        assert_eq!(game.jump(JumpStep::Two), Ok(true));
        assert_eq!(game.tick(0.1), None);
        let mid = game.host().node_position(node).unwrap_or_default();
        assert!(mid.x > 0.0 && mid.x < 2.0 * TILE_SIZE);

        let landing = land(&mut game);
        assert_eq!(landing.position.x, 2.0 * TILE_SIZE);
        assert_eq!(game.host().node_position(node), Some(landing.position));
    }

    #[test]
    fn regenerating_discards_the_old_road() {
        let mut game = game(30);
        let first = game.road().clone();
        let visuals = game.host().tiles.len();

        game.restart();
        game.restart();

        assert_eq!(game.host().clears, 3);
        assert_eq!(game.road().len(), 30);
        assert_ne!(game.road(), &first, "seeded rng moves on between roads");
        assert!(game.host().tiles.len() <= 30);
        assert!(visuals <= 30);
        let solid = game
            .road()
            .tiles()
            .iter()
            .filter(|&&tile| tile == Tile::Solid)
            .count();
        assert_eq!(game.host().tiles.len(), solid);
    }

    #[test]
    fn restart_mid_jump_discards_the_jump() {
        let mut game = game(10);
        assert!(game.start());
        game.road = all_solid(10);

        assert_eq!(game.jump(JumpStep::One), Ok(true));
        game.restart();

        assert!(!game.motion().is_jumping());
        assert_eq!(game.tick(1.0), None);
        assert_eq!(game.state(), GameState::Init);
    }
}
