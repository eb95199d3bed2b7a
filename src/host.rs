//! This module contains the interfaces the game uses to talk to whatever is hosting it.
//!
//! The game logic never draws anything, plays any animation or owns any widget. It asks a host for
//! those things through the [`Stage`], [`Animator`] and [`Ui`] traits, and any type implementing
//! all three is a [`Host`]. The terminal front end is one such host; the tests use a recording one.

use crate::road::Tile;

/// This struct holds a point in the host's scene. The player travels along the `x` axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// This field contains the coordinate along the lane.
    pub x: f32,
    /// This field contains the vertical coordinate.
    pub y: f32,
    /// This field contains the depth coordinate.
    pub z: f32,
}

impl Position {
    /// The starting point of the lane.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// This function creates a position out of its three coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// This function returns the same position moved `distance` units along the lane.
    #[must_use]
    pub fn along_lane(self, distance: f32) -> Self {
        Self {
            x: self.x + distance,
            ..self
        }
    }
}

/// This struct is an opaque reference to a visual owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeHandle(u32);

impl NodeHandle {
    /// This function wraps a host-chosen identifier into a handle.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// This function returns the host-chosen identifier behind the handle.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// This enum names the pieces of UI the game toggles or writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    /// The menu shown before a run starts.
    StartMenu,
    /// The menu shown after the player falls into a gap.
    EndMenu,
    /// The counter showing how many tiles the player has advanced.
    StepLabel,
}

/// This trait holds the scene-graph side of a host: spawning and moving visuals.
pub trait Stage {
    /// This function removes every tile visual spawned so far. The player visual survives.
    fn clear_visuals(&mut self);

    /// This function reads the position of a visual, if the host still knows about it.
    fn node_position(&self, node: NodeHandle) -> Option<Position>;

    /// This function moves a visual. Unknown handles are ignored.
    fn set_node_position(&mut self, node: NodeHandle, position: Position);

    /// This function creates the visual that stands in for the player. `None` means the host has
    /// nothing to show for it, which the game tolerates.
    fn spawn_player(&mut self) -> Option<NodeHandle>;

    /// This function creates a placeholder visual for a tile. `None` means the host has nothing to
    /// show for it, which the game tolerates.
    fn spawn_visual(&mut self, tile: Tile) -> Option<NodeHandle>;
}

/// This trait holds the animation side of a host. Clip durations are the timing source of jumps.
pub trait Animator {
    /// This function returns the playback length of a clip in seconds, or `None` if there is no
    /// clip with that name.
    fn clip_duration(&self, clip: &str) -> Option<f32>;

    /// This function starts playing a clip on the player.
    fn play_clip(&mut self, clip: &str);
}

/// This trait holds the UI side of a host.
pub trait Ui {
    /// This function writes text to a label widget.
    fn set_label_text(&mut self, widget: Widget, text: &str);

    /// This function shows or hides a widget.
    fn set_visible(&mut self, widget: Widget, visible: bool);
}

/// This trait is implemented for anything that can act as all of the collaborators at once.
pub trait Host: Stage + Animator + Ui {}

impl<T: Stage + Animator + Ui + ?Sized> Host for T {}

#[cfg(test)]
pub(crate) mod testing {
    //! A host double that records every call the game makes, for use in tests.

    use std::collections::{BTreeMap, HashMap};

    use super::{Animator, NodeHandle, Position, Stage, Ui, Widget};
    use crate::road::Tile;

    /// This struct records what the game asked of its host.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHost {
        /// Clip durations handed out to jumps.
        pub(crate) clips: HashMap<String, f32>,
        /// Every clip the game asked to play, in order.
        pub(crate) played: Vec<String>,
        /// Live tile visuals and where they sit.
        pub(crate) tiles: BTreeMap<NodeHandle, Position>,
        /// The player visual, once spawned.
        pub(crate) player: Option<(NodeHandle, Position)>,
        /// Set when tile visuals should come back as `None`.
        pub(crate) no_visuals: bool,
        /// How many times the tile visuals were cleared.
        pub(crate) clears: usize,
        /// Current visibility of each widget that has been touched.
        pub(crate) visible: HashMap<Widget, bool>,
        /// Current text of each label that has been written.
        pub(crate) labels: HashMap<Widget, String>,
        /// Next identifier to hand out.
        next_id: u32,
    }

    impl RecordingHost {
        /// A host whose clips last 0.1s for one step and 0.2s for two.
        pub(crate) fn new() -> Self {
            let mut host = Self::default();
            let _ = host.clips.insert("one-step".to_owned(), 0.1);
            let _ = host.clips.insert("two-step".to_owned(), 0.2);
            host
        }

        pub(crate) fn is_visible(&self, widget: Widget) -> bool {
            self.visible.get(&widget).copied().unwrap_or(false)
        }

        pub(crate) fn label(&self, widget: Widget) -> Option<&str> {
            self.labels.get(&widget).map(String::as_str)
        }

        fn next_handle(&mut self) -> NodeHandle {
            self.next_id += 1;
            NodeHandle::new(self.next_id)
        }
    }

    impl Stage for RecordingHost {
        fn clear_visuals(&mut self) {
            self.tiles.clear();
            self.clears += 1;
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
            if let Some(current) = self.tiles.get_mut(&node) {
                *current = position;
            }
        }

        fn spawn_player(&mut self) -> Option<NodeHandle> {
            let handle = self.next_handle();
            self.player = Some((handle, Position::ORIGIN));
            Some(handle)
        }

        fn spawn_visual(&mut self, _tile: Tile) -> Option<NodeHandle> {
            if self.no_visuals {
                return None;
            }
            let handle = self.next_handle();
            let _ = self.tiles.insert(handle, Position::ORIGIN);
            Some(handle)
        }
    }

    impl Animator for RecordingHost {
        fn clip_duration(&self, clip: &str) -> Option<f32> {
            self.clips.get(clip).copied()
        }

        fn play_clip(&mut self, clip: &str) {
            self.played.push(clip.to_owned());
        }
    }

    impl Ui for RecordingHost {
        fn set_label_text(&mut self, widget: Widget, text: &str) {
            let _ = self.labels.insert(widget, text.to_owned());
        }

        fn set_visible(&mut self, widget: Widget, visible: bool) {
            let _ = self.visible.insert(widget, visible);
        }
    }
}
