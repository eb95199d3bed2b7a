//! This module contains the road the player hops along, and the procedure that generates it.
//!
//! A road is a row of tiles where every tile is either a stone to land on or a gap to fall into.
//! Since the player never jumps further than two tiles, a road must never contain two gaps in a
//! row, and its first tile must be a stone for the player to start on.

use fastrand::Rng;
use log::debug;

use crate::error::GameError;
use crate::host::{Position, Stage};

/// The length of a tile along the lane, in scene units.
pub const TILE_SIZE: f32 = 40.0;

/// The number of tiles in a road when nothing else is configured.
pub const DEFAULT_ROAD_LENGTH: usize = 50;

/// The longest road a game can be configured with.
pub const MAX_ROAD_LENGTH: usize = 10_000;

/// This enum holds the two kinds of tile a road is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    /// A gap; landing here ends the run.
    Empty,
    /// A stone the player can stand on.
    Solid,
}

/// This struct holds the tiles of a road in lane order. It only ever changes by being replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Road {
    /// This field contains the tiles, with index 0 being the starting tile.
    tiles: Vec<Tile>,
}

impl Road {
    /// This function builds a road out of a fixed layout, checking that it is one the player can
    /// actually get through.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidRoad`] if the layout is empty, starts with a gap, or contains
    /// two gaps in a row.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, GameError> {
        match tiles.first() {
            None => {
                return Err(GameError::InvalidRoad {
                    reason: "the layout has no tiles".to_owned(),
                })
            }
            Some(&Tile::Empty) => {
                return Err(GameError::InvalidRoad {
                    reason: "the first tile must be solid".to_owned(),
                })
            }
            Some(&Tile::Solid) => {}
        }

        if let Some(index) = tiles
            .windows(2)
            .position(|pair| pair == [Tile::Empty, Tile::Empty])
        {
            return Err(GameError::InvalidRoad {
                reason: format!("tiles {index} and {} are both gaps", index + 1),
            });
        }

        Ok(Self { tiles })
    }

    /// This function generates a fresh road of `length` tiles.
    ///
    /// The first tile is always solid. Every tile after a gap is solid as well, and every other
    /// tile is a coin flip between a stone and a gap. The road is therefore always passable by
    /// construction, without retrying. A `length` of zero produces an empty road.
    #[must_use]
    pub fn generate(length: usize, rng: &mut Rng) -> Self {
        let mut tiles = Vec::with_capacity(length);

        if length > 0 {
            tiles.push(Tile::Solid);
        }

        for _ in 1..length {
            let tile = match tiles.last() {
                Some(&Tile::Empty) => Tile::Solid,
                _ if rng.bool() => Tile::Solid,
                _ => Tile::Empty,
            };
            tiles.push(tile);
        }

        Self { tiles }
    }

    /// This function returns whether the road has no tiles at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// This function returns where the tile at `index` sits along the lane.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Roads are nowhere near long enough for an index to lose precision as a float."
    )]
    #[must_use]
    pub fn lane_position(index: usize) -> Position {
        Position::ORIGIN.along_lane(index as f32 * TILE_SIZE)
    }

    /// This function returns the number of tiles in the road.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// This function asks the stage for a visual for every solid tile and puts each one in place.
    /// Gaps get nothing. If the stage hands back no visual the tile is skipped. The number of
    /// visuals placed is returned.
    pub fn place_visuals<S: Stage + ?Sized>(&self, stage: &mut S) -> usize {
        let mut placed = 0;

        for (index, &tile) in self.tiles.iter().enumerate() {
            if tile != Tile::Solid {
                continue;
            }
            match stage.spawn_visual(tile) {
                Some(node) => {
                    stage.set_node_position(node, Self::lane_position(index));
                    placed += 1;
                }
                None => debug!("no visual for tile {index}"),
            }
        }

        placed
    }

    /// This function returns the tile at `index`, or `None` past the end of the road.
    #[must_use]
    pub fn tile(&self, index: usize) -> Option<Tile> {
        self.tiles.get(index).copied()
    }

    /// This function returns all the tiles in lane order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use fastrand::Rng;

    use super::{Road, Tile, TILE_SIZE};
    use crate::error::GameError;
    use crate::host::testing::RecordingHost;
    use crate::host::Stage as _;

    fn assert_passable(road: &Road) {
        assert_eq!(road.tile(0), Some(Tile::Solid), "first tile must be solid");
        for pair in road.tiles().windows(2) {
            assert_ne!(pair, [Tile::Empty, Tile::Empty], "two gaps in a row");
        }
    }

    #[test]
    fn generated_roads_are_always_passable() {
        for seed in 0..200 {
            let mut rng = Rng::with_seed(seed);
            for length in [1, 2, 3, 10, 50, 257] {
                let road = Road::generate(length, &mut rng);
                assert_eq!(road.len(), length);
                assert_passable(&road);
            }
        }
    }

    #[test]
    fn generation_uses_both_tile_kinds() {
        let road = Road::generate(500, &mut Rng::with_seed(7));
        let gaps = road.tiles().iter().filter(|&&tile| tile == Tile::Empty).count();

        assert!(gaps > 0, "a long road should contain gaps");
        assert!(gaps < 250, "gaps can never be half of the road or more");
    }

    #[test]
    fn same_seed_same_road() {
        let first = Road::generate(64, &mut Rng::with_seed(42));
        let second = Road::generate(64, &mut Rng::with_seed(42));

        assert_eq!(first, second);
    }

    #[test]
    fn zero_length_is_empty() {
        let road = Road::generate(0, &mut Rng::with_seed(1));

        assert!(road.is_empty());
        assert_eq!(road.tile(0), None);
    }

    #[test]
    fn fixed_layouts_are_checked() {
        assert!(Road::from_tiles(vec![Tile::Solid, Tile::Empty, Tile::Solid]).is_ok());
        assert!(matches!(
            Road::from_tiles(vec![]),
            Err(GameError::InvalidRoad { .. })
        ));
        assert!(matches!(
            Road::from_tiles(vec![Tile::Empty, Tile::Solid]),
            Err(GameError::InvalidRoad { .. })
        ));
        assert!(matches!(
            Road::from_tiles(vec![Tile::Solid, Tile::Empty, Tile::Empty, Tile::Solid]),
            Err(GameError::InvalidRoad { .. })
        ));
    }

    #[test]
    fn visuals_only_for_solid_tiles() {
        let road = Road::from_tiles(vec![Tile::Solid, Tile::Empty, Tile::Solid, Tile::Solid])
            .unwrap_or_default();
        let mut host = RecordingHost::new();

        assert_eq!(road.place_visuals(&mut host), 3);

        let mut xs: Vec<f32> = host.tiles.values().map(|position| position.x).collect();
        xs.sort_by(f32::total_cmp);
        assert_eq!(xs, vec![0.0, 2.0 * TILE_SIZE, 3.0 * TILE_SIZE]);
    }

    #[test]
    fn missing_visuals_are_tolerated() {
        let road = Road::generate(20, &mut Rng::with_seed(3));
        let mut host = RecordingHost::new();
        host.no_visuals = true;

        assert_eq!(road.place_visuals(&mut host), 0);
        host.clear_visuals();
        assert!(host.tiles.is_empty());
    }
}
