//! Rooms domain: entity components and markers for room flow.

use bevy::prelude::*;

use crate::content::Direction;

/// Floor sprite of a room
#[derive(Component, Debug)]
pub struct RoomInstance {
    pub coord: IVec2,
}

/// Any entity that belongs to a room's visuals and fades with it
#[derive(Component, Debug)]
pub struct RoomMember {
    pub room: IVec2,
}

/// Colour a room member settles on once faded in
#[derive(Component, Debug, Clone, Copy)]
pub struct RestColor(pub Color);

/// Sensor volume over a room's passage on one side
#[derive(Component, Debug)]
pub struct PassageTrigger {
    pub room: IVec2,
    pub direction: Direction,
}

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;
