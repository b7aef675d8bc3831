//! Movement domain: player body, input and top-down steering.

mod components;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{GameLayer, MovementInput, MovementTuning, Player, approach_velocity};

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::systems::{apply_movement, read_input, spawn_player};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .insert_resource(Gravity(Vec2::ZERO))
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (read_input, apply_movement)
                    .chain()
                    .run_if(in_state(GameState::Floor)),
            );
    }
}
