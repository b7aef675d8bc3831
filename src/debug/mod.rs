//! Debug domain: developer hotkeys, compiled in with the `dev-tools` feature.
//!
//! - `K` defeats every active enemy
//! - `F3` logs a JSON snapshot of the floor

mod snapshot;
mod systems;

pub use snapshot::{FloorSnapshot, RoomSnapshot};

use bevy::prelude::*;

use crate::core::GameState;
use crate::debug::systems::{defeat_all_enemies, log_floor_snapshot};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (defeat_all_enemies, log_floor_snapshot).run_if(in_state(GameState::Floor)),
        );
    }
}
