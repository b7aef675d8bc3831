//! Rooms domain: progression state with an explicit total order.

use std::cmp::Ordering;

use bevy::prelude::*;
use serde::Serialize;

/// Progression of a room as seen by the floor.
///
/// A room's persisted state only moves up this order. `Current` is a display
/// value for the minimap while the player stands in the room; a room never
/// persists it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize)]
pub enum RoomState {
    #[default]
    Unknown,
    Discovered,
    Completed,
    Current,
}

impl RoomState {
    pub const fn rank(self) -> u8 {
        match self {
            RoomState::Unknown => 0,
            RoomState::Discovered => 1,
            RoomState::Completed => 2,
            RoomState::Current => 3,
        }
    }

    /// True when moving from `current` to `self` is a strict upgrade.
    pub fn is_upgrade_from(self, current: RoomState) -> bool {
        self > current
    }
}

impl Ord for RoomState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for RoomState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Whether a successful state change is forwarded to the bound minimap tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSync {
    Push,
    /// Caller is about to overwrite the tile with a different display value
    Skip,
}
