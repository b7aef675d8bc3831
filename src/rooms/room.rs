//! Rooms domain: the room state machine.
//!
//! A room is entered, optionally seals itself and spawns its one-time
//! encounter, resolves once every spawned enemy is inactive, and hands the
//! player back to the floor when they walk through a door.

use bevy::prelude::*;
use rand::Rng;

use crate::content::Direction;
use crate::enemies::{EnemyHandle, EnemyPool, EnemyTemplate, PoolError};
use crate::floor::{Minimap, TileId};
use crate::rooms::door::{Door, Passage, Stairs};
use crate::rooms::spawn_point::{SpawnOffsets, spawn_point};
use crate::rooms::state::{RoomState, TileSync};

/// Distance between a wall and the door point on that side.
pub const DOOR_INSET: f32 = 28.0;

/// Geometry a room needs at construction: its anchor and where each side's
/// passage would sit.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomLayout {
    pub anchor: Vec2,
    pub size: Vec2,
    door_points: [Option<Vec2>; 4],
}

impl RoomLayout {
    pub fn new(anchor: Vec2, size: Vec2, door_points: [Option<Vec2>; 4]) -> Self {
        Self {
            anchor,
            size,
            door_points,
        }
    }

    /// A box with a door point centred on each wall, inset toward the anchor.
    pub fn rectangular(anchor: Vec2, size: Vec2) -> Self {
        let half = size / 2.0 - Vec2::splat(DOOR_INSET);
        let points = Direction::ALL.map(|direction| Some(anchor + direction.unit() * half));
        Self::new(anchor, size, points)
    }

    pub fn door_point(&self, direction: Direction) -> Option<Vec2> {
        self.door_points[direction.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomSetupError {
    MissingDoorPoint(Direction),
    DuplicatePassage(Direction),
    NoFreeSideForStairs,
    EncounterAlreadySet,
    TileAlreadyBound,
}

impl std::fmt::Display for RoomSetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomSetupError::MissingDoorPoint(direction) => {
                write!(f, "no door point on the {:?} side", direction)
            }
            RoomSetupError::DuplicatePassage(direction) => {
                write!(f, "the {:?} side already has a passage", direction)
            }
            RoomSetupError::NoFreeSideForStairs => write!(f, "no free side left for stairs"),
            RoomSetupError::EncounterAlreadySet => write!(f, "encounter templates set twice"),
            RoomSetupError::TileAlreadyBound => write!(f, "minimap tile bound twice"),
        }
    }
}

impl std::error::Error for RoomSetupError {}

/// Where the player ends up after entering a room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPlacement {
    pub position: Vec2,
    /// Always zero so no momentum carries through the doorway
    pub velocity: Vec2,
}

/// Outcome of re-scanning the live encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterStatus {
    /// Already completed with every door open; nothing changed
    Idle,
    InProgress { remaining: usize },
    /// This scan resolved the encounter
    Resolved,
}

/// Request for the floor to move the player to the neighbour on `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveRoomRequest {
    pub from: IVec2,
    pub direction: Direction,
}

#[derive(Debug, Clone)]
pub struct Room {
    coord: IVec2,
    layout: RoomLayout,
    state: RoomState,
    passages: [Option<Passage>; 4],
    templates: Option<Vec<EnemyTemplate>>,
    live_enemies: Vec<EnemyHandle>,
    tile: Option<TileId>,
    spawn_offsets: SpawnOffsets,
}

impl Room {
    pub fn new(coord: IVec2, layout: RoomLayout, spawn_offsets: SpawnOffsets) -> Self {
        Self {
            coord,
            layout,
            state: RoomState::Unknown,
            passages: [None, None, None, None],
            templates: None,
            live_enemies: Vec::new(),
            tile: None,
            spawn_offsets,
        }
    }

    pub fn coord(&self) -> IVec2 {
        self.coord
    }

    pub fn anchor(&self) -> Vec2 {
        self.layout.anchor
    }

    pub fn size(&self) -> Vec2 {
        self.layout.size
    }

    pub fn state(&self) -> RoomState {
        self.state
    }

    pub fn tile(&self) -> Option<TileId> {
        self.tile
    }

    /// `None` is an expected answer: that side has no passage.
    pub fn passage(&self, direction: Direction) -> Option<&Passage> {
        self.passages[direction.index()].as_ref()
    }

    pub fn passage_mut(&mut self, direction: Direction) -> Option<&mut Passage> {
        self.passages[direction.index()].as_mut()
    }

    pub fn door(&self, direction: Direction) -> Option<&Door> {
        self.passage(direction).and_then(Passage::as_door)
    }

    pub fn passages(&self) -> impl Iterator<Item = (Direction, &Passage)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.passage(direction).map(|p| (direction, p)))
    }

    fn doors_mut(&mut self) -> impl Iterator<Item = &mut Door> {
        self.passages
            .iter_mut()
            .filter_map(|slot| slot.as_mut().and_then(Passage::as_door_mut))
    }

    pub fn templates(&self) -> &[EnemyTemplate] {
        self.templates.as_deref().unwrap_or_default()
    }

    pub fn has_encounter(&self) -> bool {
        !self.templates().is_empty()
    }

    pub fn live_enemies(&self) -> &[EnemyHandle] {
        &self.live_enemies
    }

    // ------------------------------------------------------------------
    // Level construction
    // ------------------------------------------------------------------

    pub fn set_door(&mut self, direction: Direction) -> Result<(), RoomSetupError> {
        let point = self
            .layout
            .door_point(direction)
            .ok_or(RoomSetupError::MissingDoorPoint(direction))?;
        let slot = &mut self.passages[direction.index()];
        if slot.is_some() {
            return Err(RoomSetupError::DuplicatePassage(direction));
        }
        *slot = Some(Passage::Door(Door::new(direction, point)));
        Ok(())
    }

    /// Puts stairs on the first free side, clockwise from Up.
    pub fn set_stairs(&mut self) -> Result<Direction, RoomSetupError> {
        let direction = Direction::ALL
            .into_iter()
            .find(|d| self.passages[d.index()].is_none())
            .ok_or(RoomSetupError::NoFreeSideForStairs)?;
        let point = self
            .layout
            .door_point(direction)
            .ok_or(RoomSetupError::MissingDoorPoint(direction))?;
        self.passages[direction.index()] = Some(Passage::Stairs(Stairs::new(point)));
        Ok(direction)
    }

    pub fn set_enemies(&mut self, templates: Vec<EnemyTemplate>) -> Result<(), RoomSetupError> {
        if self.templates.is_some() {
            return Err(RoomSetupError::EncounterAlreadySet);
        }
        self.templates = Some(templates);
        Ok(())
    }

    /// Binds the tile and shows the room's current state on it.
    pub fn set_minimap_tile(
        &mut self,
        tile: TileId,
        minimap: &mut Minimap,
    ) -> Result<(), RoomSetupError> {
        if self.tile.is_some() {
            return Err(RoomSetupError::TileAlreadyBound);
        }
        self.tile = Some(tile);
        minimap.set_state(tile, self.state);
        Ok(())
    }

    // ------------------------------------------------------------------
    // State machine
    // ------------------------------------------------------------------

    /// Moves to `state` only if it ranks strictly higher than the current
    /// one. Returns whether the state changed.
    pub fn set_state(&mut self, state: RoomState, sync: TileSync, minimap: &mut Minimap) -> bool {
        if !state.is_upgrade_from(self.state) {
            debug!(
                "[ROOM] {} ignoring {:?} (already {:?})",
                self.coord, state, self.state
            );
            return false;
        }

        self.state = state;
        if sync == TileSync::Push {
            self.push_tile(state, minimap);
        }
        true
    }

    /// Shows the transient `Current` marker on the tile without touching
    /// the persisted state.
    pub fn show_current(&self, minimap: &mut Minimap) {
        self.push_tile(RoomState::Current, minimap);
    }

    fn push_tile(&self, state: RoomState, minimap: &mut Minimap) {
        match self.tile {
            Some(tile) => minimap.set_state(tile, state),
            None => warn!("[ROOM] {} has no minimap tile for {:?}", self.coord, state),
        }
    }

    /// Brings the player into this room.
    ///
    /// Sealing and spawning (or completion) finish before the placement is
    /// computed, so the caller never positions the player in a half-sealed
    /// room.
    pub fn move_player_in<R: Rng + ?Sized>(
        &mut self,
        from: Option<Direction>,
        pool: &mut EnemyPool,
        minimap: &mut Minimap,
        rng: &mut R,
    ) -> Result<PlayerPlacement, PoolError> {
        self.set_state(RoomState::Discovered, TileSync::Skip, minimap);

        if self.state != RoomState::Completed && self.live_enemies.is_empty() {
            if self.has_encounter() {
                self.spawn_encounter(pool, rng)?;
            } else {
                self.set_state(RoomState::Completed, TileSync::Skip, minimap);
            }
        }
        self.show_current(minimap);

        let position = from
            .and_then(|direction| self.passage(direction))
            .map_or(self.anchor(), Passage::position);

        info!(
            "[ROOM] Player entered {} from {:?} ({:?})",
            self.coord, from, self.state
        );

        Ok(PlayerPlacement {
            position,
            velocity: Vec2::ZERO,
        })
    }

    /// Restores the tile to the persisted state, drops door occupancy and
    /// asks the floor to move the player on.
    pub fn leave_room(&mut self, direction: Direction, minimap: &mut Minimap) -> LeaveRoomRequest {
        self.push_tile(self.state, minimap);
        for passage in self.passages.iter_mut().flatten() {
            passage.player_exit();
        }
        info!("[ROOM] Player leaving {} via {:?}", self.coord, direction);
        LeaveRoomRequest {
            from: self.coord,
            direction,
        }
    }

    // ------------------------------------------------------------------
    // Encounter
    // ------------------------------------------------------------------

    /// Seals every door and spawns one enemy per template around the anchor.
    /// Every template is checked before any instance is taken from the pool.
    pub fn spawn_encounter<R: Rng + ?Sized>(
        &mut self,
        pool: &mut EnemyPool,
        rng: &mut R,
    ) -> Result<usize, PoolError> {
        pool.check_templates(self.templates())?;

        self.seal_doors();

        let templates = self.templates.clone().unwrap_or_default();
        for template in &templates {
            let handle = pool.get_enemy(template)?;
            self.live_enemies.push(handle);
            pool.spawn(handle, spawn_point(self.anchor(), &self.spawn_offsets, rng));
        }

        info!(
            "[ENCOUNTER] {} sealed, spawned {} enemies",
            self.coord,
            templates.len()
        );
        Ok(templates.len())
    }

    /// Re-scans the live encounter. Resolves it when every spawned enemy is
    /// inactive (vacuously so for an empty list): clears the list, completes
    /// the room and opens the doors. Keys off current activity only, so
    /// repeated calls after completion change nothing.
    pub fn update_enemy_count(&mut self, pool: &EnemyPool, minimap: &mut Minimap) -> EncounterStatus {
        let remaining = self
            .live_enemies
            .iter()
            .filter(|handle| pool.is_active(**handle))
            .count();
        if remaining > 0 {
            debug!("[ENCOUNTER] {} has {} enemies left", self.coord, remaining);
            return EncounterStatus::InProgress { remaining };
        }

        let had_live = !self.live_enemies.is_empty();
        self.live_enemies.clear();
        let completed = self.set_state(RoomState::Completed, TileSync::Skip, minimap);
        let opened = self.open_doors();
        if !(had_live || completed || opened) {
            return EncounterStatus::Idle;
        }

        info!("[ENCOUNTER] {} cleared, doors open", self.coord);
        EncounterStatus::Resolved
    }

    fn seal_doors(&mut self) {
        for door in self.doors_mut() {
            door.close();
            door.set_lock(true);
        }
    }

    /// Unlocks and opens every door. Returns whether any door changed.
    fn open_doors(&mut self) -> bool {
        let mut changed = false;
        for door in self.doors_mut() {
            changed |= door.is_locked() || !door.is_open();
            door.set_lock(false);
            door.open();
        }
        changed
    }
}
