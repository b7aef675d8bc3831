//! Rooms domain: doors, stairs and the player-interaction contract.

use bevy::prelude::*;
use serde::Serialize;

use crate::content::Direction;

/// A gated passage on one side of a room.
///
/// Doors start open and unlocked. A locked door refuses `open`; only the
/// owning room unlocks it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Door {
    direction: Direction,
    #[serde(skip)]
    position: Vec2,
    open: bool,
    locked: bool,
    #[serde(skip)]
    player_inside: bool,
}

impl Door {
    pub fn new(direction: Direction, position: Vec2) -> Self {
        Self {
            direction,
            position,
            open: true,
            locked: false,
            player_inside: false,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_passable(&self) -> bool {
        self.open && !self.locked
    }

    /// Opens the door unless it is locked. Returns whether the door is open.
    pub fn open(&mut self) -> bool {
        if self.locked {
            debug!("[DOOR] Ignoring open on locked {:?} door", self.direction);
            return false;
        }
        self.open = true;
        true
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn set_lock(&mut self, locked: bool) {
        if self.locked == locked {
            debug!(
                "[DOOR] {:?} door already {}",
                self.direction,
                if locked { "locked" } else { "unlocked" }
            );
        }
        self.locked = locked;
    }

    /// Player stepped into the door's interaction volume.
    pub fn player_enter(&mut self) -> PassageInteraction {
        self.player_inside = true;
        if self.is_passable() {
            PassageInteraction::LeaveRoom(self.direction)
        } else {
            PassageInteraction::Blocked
        }
    }

    pub fn player_exit(&mut self) {
        self.player_inside = false;
    }

    pub fn player_inside(&self) -> bool {
        self.player_inside
    }
}

/// Terminal passage leading off the floor. Has no open/lock state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stairs {
    #[serde(skip)]
    position: Vec2,
}

impl Stairs {
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Passage {
    Door(Door),
    Stairs(Stairs),
}

impl Passage {
    pub fn position(&self) -> Vec2 {
        match self {
            Passage::Door(door) => door.position(),
            Passage::Stairs(stairs) => stairs.position,
        }
    }

    pub fn as_door(&self) -> Option<&Door> {
        match self {
            Passage::Door(door) => Some(door),
            Passage::Stairs(_) => None,
        }
    }

    pub fn as_door_mut(&mut self) -> Option<&mut Door> {
        match self {
            Passage::Door(door) => Some(door),
            Passage::Stairs(_) => None,
        }
    }

    pub fn is_stairs(&self) -> bool {
        matches!(self, Passage::Stairs(_))
    }

    pub fn player_enter(&mut self) -> PassageInteraction {
        match self {
            Passage::Door(door) => door.player_enter(),
            Passage::Stairs(_) => PassageInteraction::Descend,
        }
    }

    pub fn player_exit(&mut self) {
        if let Passage::Door(door) = self {
            door.player_exit();
        }
    }
}

/// What a player stepping onto a passage is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassageInteraction {
    LeaveRoom(Direction),
    Descend,
    Blocked,
}
