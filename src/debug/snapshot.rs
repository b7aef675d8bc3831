//! Debug domain: serialisable view of the floor for the log.

use serde::Serialize;

use crate::content::Direction;
use crate::enemies::EnemyPool;
use crate::floor::{Floor, Minimap};
use crate::rooms::{Door, Passage, RoomState};

#[derive(Debug, Serialize)]
pub struct RoomSnapshot {
    pub coord: (i32, i32),
    pub state: RoomState,
    /// What the bound tile currently shows
    pub minimap: Option<RoomState>,
    pub doors: Vec<Door>,
    pub stairs: Option<Direction>,
    pub live_enemies: usize,
}

#[derive(Debug, Serialize)]
pub struct FloorSnapshot {
    pub current: Option<(i32, i32)>,
    pub pooled_instances: usize,
    pub active_enemies: usize,
    pub rooms: Vec<RoomSnapshot>,
}

impl FloorSnapshot {
    pub fn capture(floor: &Floor, minimap: &Minimap, pool: &EnemyPool) -> Self {
        let mut rooms: Vec<RoomSnapshot> = floor
            .rooms()
            .map(|room| RoomSnapshot {
                coord: (room.coord().x, room.coord().y),
                state: room.state(),
                minimap: room.tile().and_then(|tile| minimap.display(tile)),
                doors: room
                    .passages()
                    .filter_map(|(_, passage)| passage.as_door().cloned())
                    .collect(),
                stairs: room
                    .passages()
                    .find(|(_, passage)| matches!(passage, Passage::Stairs(_)))
                    .map(|(direction, _)| direction),
                live_enemies: room.live_enemies().len(),
            })
            .collect();
        rooms.sort_by_key(|room| room.coord);

        Self {
            current: floor.current_coord().map(|coord| (coord.x, coord.y)),
            pooled_instances: pool.len(),
            active_enemies: pool.active_count(),
            rooms,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
