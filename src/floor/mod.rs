//! Floor domain: the floor authority, minimap and navigation hub.

mod authority;
mod minimap;
mod systems;

pub use authority::{Floor, FloorError};
pub use minimap::{Minimap, MinimapTile, TileId};
pub use systems::{MinimapCell, minimap_color};

use bevy::prelude::*;

use crate::core::GameState;
use crate::floor::systems::{
    focus_camera, handle_stairs_reached, process_room_transitions, setup_floor,
    sync_minimap_tiles,
};

pub struct FloorPlugin;

impl Plugin for FloorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Floor>()
            .init_resource::<Minimap>()
            .add_systems(OnEnter(GameState::Floor), setup_floor)
            .add_systems(
                Update,
                (
                    process_room_transitions,
                    focus_camera,
                    handle_stairs_reached,
                    sync_minimap_tiles,
                )
                    .chain()
                    .run_if(in_state(GameState::Floor)),
            );
    }
}
