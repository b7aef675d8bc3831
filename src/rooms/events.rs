//! Rooms domain: events for room transitions and clears.

use bevy::ecs::message::Message;
use bevy::math::IVec2;

use crate::content::Direction;
use crate::rooms::room::LeaveRoomRequest;

/// The player walked through an open door; the floor should move them on.
#[derive(Debug)]
pub struct ExitRoomEvent {
    pub request: LeaveRoomRequest,
}

impl Message for ExitRoomEvent {}

/// The floor made `coord` the current room.
#[derive(Debug)]
pub struct EnterRoomEvent {
    pub coord: IVec2,
    pub previous: Option<IVec2>,
    pub entry_direction: Option<Direction>,
}

impl Message for EnterRoomEvent {}

#[derive(Debug)]
pub struct RoomClearedEvent {
    pub coord: IVec2,
}

impl Message for RoomClearedEvent {}

#[derive(Debug)]
pub struct StairsReachedEvent {
    pub coord: IVec2,
}

impl Message for StairsReachedEvent {}
