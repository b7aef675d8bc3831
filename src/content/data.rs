//! Data definitions for all RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The ContentRegistry provides lookup by id.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enemies::EnemyTemplate;
use crate::rooms::SpawnOffsets;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Direction
// ============================================================================

/// One side of a room. A room holds at most one passage per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Reflect, Default)]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Clockwise from Up. Stairs placement and door iteration follow this order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Grid step toward the neighbouring room on this side.
    pub const fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, 1),
            Direction::Right => IVec2::new(1, 0),
            Direction::Down => IVec2::new(0, -1),
            Direction::Left => IVec2::new(-1, 0),
        }
    }

    /// Unit vector in world space.
    pub fn unit(self) -> Vec2 {
        self.offset().as_vec2()
    }
}

// ============================================================================
// Enemies (enemies.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    /// sRGB components
    pub color: (f32, f32, f32),
    pub size: f32,
    pub max_health: u32,
    pub contact_damage: u32,
}

// ============================================================================
// Floor layout (floor.ron)
// ============================================================================

/// Hand-authored floor: which rooms exist, which sides have doors, and
/// what each room's one-time encounter looks like.
#[derive(Debug, Clone, Deserialize, Serialize, Resource)]
pub struct FloorDef {
    pub schema_version: u32,
    pub room_width: f32,
    pub room_height: f32,
    /// Empty space between neighbouring rooms in world units
    pub room_gap: f32,
    #[serde(default)]
    pub spawn_offsets: SpawnOffsets,
    pub start_room: (i32, i32),
    pub rooms: Vec<RoomDef>,
}

impl FloorDef {
    pub fn room_size(&self) -> Vec2 {
        Vec2::new(self.room_width, self.room_height)
    }

    /// World-space distance between the anchors of two adjacent rooms.
    pub fn room_stride(&self) -> Vec2 {
        self.room_size() + Vec2::splat(self.room_gap)
    }

    pub fn start_coord(&self) -> IVec2 {
        IVec2::new(self.start_room.0, self.start_room.1)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoomDef {
    pub coord: (i32, i32),
    #[serde(default)]
    pub doors: Vec<Direction>,
    #[serde(default)]
    pub stairs: bool,
    #[serde(default)]
    pub enemies: Vec<EnemyTemplate>,
}

impl RoomDef {
    pub fn grid_coord(&self) -> IVec2 {
        IVec2::new(self.coord.0, self.coord.1)
    }
}
