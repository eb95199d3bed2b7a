//! This module contains the terminal host: it keeps track of the visuals the game spawns and draws
//! them as a scrolling view of the lane.

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use console::{style, Term};
use log::debug;

use crate::game::GameState;
use crate::host::{Animator, NodeHandle, Position, Stage, Ui, Widget};
use crate::road::{Tile, TILE_SIZE};

/// The number of terminal columns a single tile takes up.
const CELL_WIDTH: usize = 3;

/// The number of tiles kept in view behind the player.
const LOOK_BEHIND: usize = 2;

/// This struct holds everything the terminal needs to draw a frame of the game.
#[derive(Debug)]
pub(crate) struct TerminalHost {
    /// This field contains the clip durations the jumps are timed with.
    clips: HashMap<String, f32>,
    /// This field contains whether the end menu is up.
    end_menu: bool,
    /// This field contains the last clip that was played.
    last_clip: Option<String>,
    /// This field contains the next visual identifier to hand out.
    next_id: u32,
    /// This field contains the player visual and where it is.
    player: Option<(NodeHandle, Position)>,
    /// This field contains whether the start menu is up.
    start_menu: bool,
    /// This field contains the text of the step counter.
    step_label: String,
    /// This field contains the terminal to draw on.
    term: Term,
    /// This field contains the tile visuals and where they are.
    tiles: BTreeMap<NodeHandle, Position>,
}

impl TerminalHost {
    /// This function draws a whole frame: the lane around the player, the step counter and a line of
    /// help fitting the current state.
    pub(crate) fn draw(&self, road_length: usize, state: GameState) -> Result<()> {
        let (_, cols) = self.term.size();
        let (player_row, lane_row) = self.render_lane(road_length, usize::from(cols));

        self.term.clear_screen()?;
        self.term
            .write_line(&format!("{}", style("lanejump").bold().cyan()))?;
        self.term.write_line("")?;
        self.term
            .write_line(&format!("{}", style(player_row).bold().yellow()))?;
        self.term.write_line(&lane_row)?;
        self.term.write_line("")?;
        self.term.write_line(&format!(
            "Steps: {} / {road_length}",
            style(&self.step_label).bold()
        ))?;

        let help = match state {
            GameState::Init => "Pick Play to start a run.",
            GameState::Playing => "1/j/Right: hop   2/k/Up: leap   r: restart   q: quit",
            GameState::End => "You fell in!",
        };
        self.term.write_line(&format!("{}", style(help).dim()))?;

        if let Some(clip) = &self.last_clip {
            self.term
                .write_line(&format!("{}", style(format!("last jump: {clip}")).dim()))?;
        }

        Ok(())
    }

    /// This function returns whether the end menu should be showing.
    pub(crate) const fn end_menu_visible(&self) -> bool {
        self.end_menu
    }

    /// This function creates a host drawing on `term`, with jumps timed by `clips`.
    pub(crate) fn new(term: Term, clips: HashMap<String, f32>) -> Self {
        Self {
            clips,
            end_menu: false,
            last_clip: None,
            next_id: 0,
            player: None,
            start_menu: false,
            step_label: String::new(),
            term,
            tiles: BTreeMap::new(),
        }
    }

    /// This function hands out a fresh visual identifier.
    fn next_handle(&mut self) -> NodeHandle {
        self.next_id = self.next_id.wrapping_add(1);
        NodeHandle::new(self.next_id)
    }

    /// This function lays out the two rows of the lane view for a terminal `cols` columns wide: the
    /// row with the player on it, and the row with the tiles. Solid tiles are drawn as `===`, the
    /// end of the road as `|`. The view scrolls so the player stays near its left edge.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "Lane coordinates are small, non-negative and rounded before the cast."
    )]
    fn render_lane(&self, road_length: usize, cols: usize) -> (String, String) {
        let visible = (cols / CELL_WIDTH).max(1);
        let player_x = self.player.map_or(0.0, |(_, position)| position.x);
        let first = tile_of(player_x).saturating_sub(LOOK_BEHIND);

        let mut lane = vec![' '; visible * CELL_WIDTH];
        for position in self.tiles.values() {
            let Some(offset) = tile_of(position.x).checked_sub(first) else {
                continue;
            };
            if let Some(cells) = lane.get_mut(offset * CELL_WIDTH..(offset + 1) * CELL_WIDTH) {
                cells.fill('=');
            }
        }
        if let Some(offset) = road_length.checked_sub(first) {
            if let Some(cell) = lane.get_mut(offset * CELL_WIDTH) {
                *cell = '|';
            }
        }

        let mut runner = vec![' '; visible * CELL_WIDTH];
        let column = ((player_x / TILE_SIZE - first as f32) * CELL_WIDTH as f32).round();
        let column = column.max(0.0) as usize + CELL_WIDTH / 2;
        if let Some(cell) = runner.get_mut(column) {
            *cell = '@';
        }

        (
            runner.into_iter().collect::<String>().trim_end().to_owned(),
            lane.into_iter().collect::<String>().trim_end().to_owned(),
        )
    }

    /// This function returns whether the start menu should be showing.
    pub(crate) const fn start_menu_visible(&self) -> bool {
        self.start_menu
    }
}

impl Stage for TerminalHost {
    fn clear_visuals(&mut self) {
        self.tiles.clear();
    }

    fn node_position(&self, node: NodeHandle) -> Option<Position> {
        match self.player {
            Some((handle, position)) if handle == node => Some(position),
            _ => self.tiles.get(&node).copied(),
        }
    }

    fn set_node_position(&mut self, node: NodeHandle, position: Position) {
        if let Some(&mut (handle, ref mut current)) = self.player.as_mut() {
            if handle == node {
                *current = position;
                return;
            }
        }
        match self.tiles.get_mut(&node) {
            Some(current) => *current = position,
            None => debug!("no visual {} to move", node.id()),
        }
    }

    fn spawn_player(&mut self) -> Option<NodeHandle> {
        let handle = self.next_handle();
        self.player = Some((handle, Position::ORIGIN));
        Some(handle)
    }

    fn spawn_visual(&mut self, tile: Tile) -> Option<NodeHandle> {
        if tile == Tile::Empty {
            return None;
        }
        let handle = self.next_handle();
        let _ = self.tiles.insert(handle, Position::ORIGIN);
        Some(handle)
    }
}

impl Animator for TerminalHost {
    fn clip_duration(&self, clip: &str) -> Option<f32> {
        self.clips.get(clip).copied()
    }

    fn play_clip(&mut self, clip: &str) {
        self.last_clip = Some(clip.to_owned());
    }
}

impl Ui for TerminalHost {
    fn set_label_text(&mut self, widget: Widget, text: &str) {
        match widget {
            Widget::StepLabel => text.clone_into(&mut self.step_label),
            Widget::StartMenu | Widget::EndMenu => debug!("{widget:?} has no text"),
        }
    }

    fn set_visible(&mut self, widget: Widget, visible: bool) {
        match widget {
            Widget::StartMenu => self.start_menu = visible,
            Widget::EndMenu => self.end_menu = visible,
            Widget::StepLabel => {}
        }
    }
}

/// This function returns the index of the tile nearest to a lane coordinate.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is rounded and clamped to zero before the cast."
)]
fn tile_of(x: f32) -> usize {
    (x / TILE_SIZE).round().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use console::Term;

    use super::TerminalHost;
    use crate::host::{Position, Stage as _, Ui as _, Widget};
    use crate::road::{Road, Tile, TILE_SIZE};

    fn host() -> TerminalHost {
        TerminalHost::new(Term::stdout(), HashMap::new())
    }

    #[test]
    fn lane_shows_stones_gaps_and_the_player() {
        let mut host = host();
        let player = host.spawn_player();
        let road = Road::from_tiles(vec![Tile::Solid, Tile::Empty, Tile::Solid]).unwrap_or_default();
        assert_eq!(road.place_visuals(&mut host), 2);

        let (runner, lane) = host.render_lane(road.len(), 30);
        assert_eq!(runner, " @");
        assert_eq!(lane, "===   ===|");

        if let Some(node) = player {
            host.set_node_position(node, Position::ORIGIN.along_lane(2.0 * TILE_SIZE));
        }
        let (runner, _) = host.render_lane(road.len(), 30);
        assert_eq!(runner, "       @");
    }

    #[test]
    fn view_scrolls_with_the_player() {
        let mut host = host();
        let player = host.spawn_player();
        let road = Road::from_tiles(vec![Tile::Solid; 20]).unwrap_or_default();
        let _ = road.place_visuals(&mut host);

        if let Some(node) = player {
            host.set_node_position(node, Position::ORIGIN.along_lane(10.0 * TILE_SIZE));
        }
        let (runner, lane) = host.render_lane(road.len(), 12);

        assert_eq!(runner, "       @");
        assert_eq!(lane, "============");
    }

    #[test]
    fn gaps_have_no_visual() {
        let mut host = host();

        assert_eq!(host.spawn_visual(Tile::Empty), None);
        assert!(host.spawn_visual(Tile::Solid).is_some());
    }

    #[test]
    fn menus_follow_the_game() {
        let mut host = host();
        host.set_visible(Widget::StartMenu, true);
        host.set_label_text(Widget::StepLabel, "4");

        assert!(host.start_menu_visible());
        assert!(!host.end_menu_visible());
        assert_eq!(host.step_label, "4");
    }
}
