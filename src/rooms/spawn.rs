//! Rooms domain: world entities for a room's floor, walls and passages.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::Direction;
use crate::movement::GameLayer;
use crate::rooms::components::{PassageTrigger, RestColor, RoomInstance, RoomMember, Wall};
use crate::rooms::door::Passage;
use crate::rooms::room::Room;

const WALL_THICKNESS: f32 = 16.0;
const TRIGGER_SIZE: f32 = 32.0;

const FLOOR_COLOR: Color = Color::srgb(0.18, 0.2, 0.24);
const WALL_COLOR: Color = Color::srgb(0.3, 0.3, 0.4);
const DOOR_OPEN_COLOR: Color = Color::srgb(0.3, 0.7, 0.4);
const DOOR_CLOSED_COLOR: Color = Color::srgb(0.5, 0.5, 0.5);
const DOOR_LOCKED_COLOR: Color = Color::srgb(0.7, 0.3, 0.3);
const STAIRS_COLOR: Color = Color::srgb(0.85, 0.75, 0.3);

/// Colour a passage should rest on given its current state.
pub fn passage_color(passage: &Passage) -> Color {
    match passage {
        Passage::Stairs(_) => STAIRS_COLOR,
        Passage::Door(door) if door.is_locked() => DOOR_LOCKED_COLOR,
        Passage::Door(door) if door.is_open() => DOOR_OPEN_COLOR,
        Passage::Door(_) => DOOR_CLOSED_COLOR,
    }
}

/// Spawns every entity of `room`. All of them start transparent and fade
/// in to their `RestColor` when the player enters.
pub fn spawn_room_entities(commands: &mut Commands, room: &Room) {
    let coord = room.coord();
    let anchor = room.anchor();
    let size = room.size();

    commands.spawn((
        RoomInstance { coord },
        RoomMember { room: coord },
        RestColor(FLOOR_COLOR),
        Sprite {
            color: Color::NONE,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(anchor.extend(0.0)),
    ));

    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Enemy]);
    for direction in Direction::ALL {
        let (center, extent) = wall_geometry(anchor, size, direction);
        commands.spawn((
            Wall,
            RoomMember { room: coord },
            RestColor(WALL_COLOR),
            Sprite {
                color: Color::NONE,
                custom_size: Some(extent),
                ..default()
            },
            Transform::from_translation(center.extend(1.0)),
            RigidBody::Static,
            Collider::rectangle(extent.x, extent.y),
            wall_layers,
        ));
    }

    for (direction, passage) in room.passages() {
        let position = passage.position();
        commands.spawn((
            PassageTrigger {
                room: coord,
                direction,
            },
            RoomMember { room: coord },
            RestColor(passage_color(passage)),
            Sprite {
                color: Color::NONE,
                custom_size: Some(Vec2::splat(TRIGGER_SIZE)),
                ..default()
            },
            Transform::from_translation(position.extend(2.0)),
            Collider::rectangle(TRIGGER_SIZE, TRIGGER_SIZE),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        ));
    }

    debug!(
        "[ROOM] Spawned entities for {} with {} passages",
        coord,
        room.passages().count()
    );
}

/// Centre and extent of the wall on `direction`'s side. Horizontal walls
/// span the corners.
fn wall_geometry(anchor: Vec2, size: Vec2, direction: Direction) -> (Vec2, Vec2) {
    let half = size / 2.0;
    let offset = direction.unit() * (half + Vec2::splat(WALL_THICKNESS / 2.0));
    let extent = match direction {
        Direction::Up | Direction::Down => Vec2::new(size.x + WALL_THICKNESS * 2.0, WALL_THICKNESS),
        Direction::Left | Direction::Right => Vec2::new(WALL_THICKNESS, size.y),
    };
    (anchor + offset, extent)
}
