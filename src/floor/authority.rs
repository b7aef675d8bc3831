//! Floor domain: the floor authority owning every room and the single
//! current-room context.

use std::collections::HashMap;

use bevy::prelude::*;
use rand::Rng;

use crate::content::{Direction, FloorDef};
use crate::enemies::{EnemyPool, PoolError};
use crate::floor::minimap::Minimap;
use crate::rooms::{LeaveRoomRequest, PlayerPlacement, Room, RoomLayout, RoomSetupError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FloorError {
    NoCurrentRoom,
    UnknownRoom(IVec2),
    NoRoomInDirection { from: IVec2, direction: Direction },
    DuplicateRoom(IVec2),
    Setup { coord: IVec2, source: RoomSetupError },
    Pool(PoolError),
}

impl std::fmt::Display for FloorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FloorError::NoCurrentRoom => write!(f, "no room is current"),
            FloorError::UnknownRoom(coord) => write!(f, "no room at {}", coord),
            FloorError::NoRoomInDirection { from, direction } => {
                write!(f, "no room {:?} of {}", direction, from)
            }
            FloorError::DuplicateRoom(coord) => write!(f, "room {} defined twice", coord),
            FloorError::Setup { coord, source } => write!(f, "room {}: {}", coord, source),
            FloorError::Pool(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FloorError {}

impl From<PoolError> for FloorError {
    fn from(e: PoolError) -> Self {
        FloorError::Pool(e)
    }
}

/// Every room on the floor plus which one the player is standing in.
/// At most one room is current at a time.
#[derive(Resource, Debug, Default)]
pub struct Floor {
    rooms: HashMap<IVec2, Room>,
    current: Option<IVec2>,
    start: IVec2,
}

impl Floor {
    /// Level construction: lays out every room and wires its doors, stairs,
    /// encounter and minimap tile. Collects every setup error.
    pub fn build(
        def: &FloorDef,
        pool: &EnemyPool,
        minimap: &mut Minimap,
    ) -> Result<Self, Vec<FloorError>> {
        let mut floor = Floor {
            start: def.start_coord(),
            ..default()
        };
        let mut errors = Vec::new();

        for room_def in &def.rooms {
            let coord = room_def.grid_coord();
            if floor.rooms.contains_key(&coord) {
                errors.push(FloorError::DuplicateRoom(coord));
                continue;
            }

            let anchor = coord.as_vec2() * def.room_stride();
            let layout = RoomLayout::rectangular(anchor, def.room_size());
            let mut room = Room::new(coord, layout, def.spawn_offsets);

            let mut setup = Vec::new();
            for direction in &room_def.doors {
                setup.push(room.set_door(*direction));
            }
            if room_def.stairs {
                setup.push(room.set_stairs().map(|_| ()));
            }
            if let Err(e) = pool.check_templates(&room_def.enemies) {
                errors.push(FloorError::Pool(e));
            }
            setup.push(room.set_enemies(room_def.enemies.clone()));
            let tile = minimap.add_tile(coord);
            setup.push(room.set_minimap_tile(tile, minimap));

            errors.extend(
                setup
                    .into_iter()
                    .filter_map(Result::err)
                    .map(|source| FloorError::Setup { coord, source }),
            );

            floor.rooms.insert(coord, room);
        }

        if !floor.rooms.contains_key(&floor.start) {
            errors.push(FloorError::UnknownRoom(floor.start));
        }

        if errors.is_empty() {
            Ok(floor)
        } else {
            Err(errors)
        }
    }

    pub fn room(&self, coord: IVec2) -> Option<&Room> {
        self.rooms.get(&coord)
    }

    pub fn room_mut(&mut self, coord: IVec2) -> Option<&mut Room> {
        self.rooms.get_mut(&coord)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn start_coord(&self) -> IVec2 {
        self.start
    }

    pub fn current_coord(&self) -> Option<IVec2> {
        self.current
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.current.and_then(|coord| self.rooms.get(&coord))
    }

    pub fn current_room_mut(&mut self) -> Option<&mut Room> {
        self.current.and_then(|coord| self.rooms.get_mut(&coord))
    }

    pub fn neighbor(&self, coord: IVec2, direction: Direction) -> Option<IVec2> {
        let target = coord + direction.offset();
        self.rooms.contains_key(&target).then_some(target)
    }

    /// Makes `coord` the current room and brings the player in.
    pub fn enter_room<R: Rng + ?Sized>(
        &mut self,
        coord: IVec2,
        from: Option<Direction>,
        pool: &mut EnemyPool,
        minimap: &mut Minimap,
        rng: &mut R,
    ) -> Result<PlayerPlacement, FloorError> {
        let room = self
            .rooms
            .get_mut(&coord)
            .ok_or(FloorError::UnknownRoom(coord))?;
        let placement = room.move_player_in(from, pool, minimap, rng)?;
        self.current = Some(coord);
        Ok(placement)
    }

    pub fn enter_start_room<R: Rng + ?Sized>(
        &mut self,
        pool: &mut EnemyPool,
        minimap: &mut Minimap,
        rng: &mut R,
    ) -> Result<PlayerPlacement, FloorError> {
        self.enter_room(self.start, None, pool, minimap, rng)
    }

    /// Moves the player through the door named by `request`. The neighbour
    /// is entered from the opposite side. On failure the current room stays
    /// current and its tile shows `Current` again.
    pub fn move_to_room<R: Rng + ?Sized>(
        &mut self,
        request: LeaveRoomRequest,
        pool: &mut EnemyPool,
        minimap: &mut Minimap,
        rng: &mut R,
    ) -> Result<PlayerPlacement, FloorError> {
        let result = self.try_move_to_room(request, pool, minimap, rng);
        if result.is_err() {
            if let Some(room) = self.current_room() {
                room.show_current(minimap);
            }
        }
        result
    }

    fn try_move_to_room<R: Rng + ?Sized>(
        &mut self,
        request: LeaveRoomRequest,
        pool: &mut EnemyPool,
        minimap: &mut Minimap,
        rng: &mut R,
    ) -> Result<PlayerPlacement, FloorError> {
        if self.current != Some(request.from) {
            return Err(FloorError::NoCurrentRoom);
        }
        let target = self.neighbor(request.from, request.direction).ok_or(
            FloorError::NoRoomInDirection {
                from: request.from,
                direction: request.direction,
            },
        )?;

        info!(
            "[FLOOR] Moving player {:?} from {} to {}",
            request.direction, request.from, target
        );
        self.enter_room(
            target,
            Some(request.direction.opposite()),
            pool,
            minimap,
            rng,
        )
    }
}
