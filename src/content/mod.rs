//! Content domain: RON data definitions, loading and validation.

mod data;
mod loader;
mod registry;
mod validation;

pub use data::{DataFile, Direction, EnemyDef, FloorDef, RoomDef};
pub use loader::{ContentLoadError, load_all_content};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, validate_floor};

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use std::path::Path;

use crate::core::GameState;

const CONTENT_PATH: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Direction>()
            .add_systems(Startup, load_content);
    }
}

/// Loads and validates every content file. Any failure is fatal: the layout
/// is assumed well-formed once the floor is built.
fn load_content(
    mut commands: Commands,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    let (registry, floor) = match load_all_content(Path::new(CONTENT_PATH)) {
        Ok(loaded) => loaded,
        Err(errors) => {
            for e in &errors {
                error!("[CONTENT] {}", e);
            }
            exit.write(AppExit::error());
            return;
        }
    };

    let validation_errors = validate_floor(&registry, &floor);
    if !validation_errors.is_empty() {
        for e in &validation_errors {
            error!("[CONTENT] {}", e);
        }
        exit.write(AppExit::error());
        return;
    }

    info!("[CONTENT] {}", registry.summary());
    info!(
        "[CONTENT] Floor layout: {} rooms, start at {:?}",
        floor.rooms.len(),
        floor.start_room
    );

    commands.insert_resource(registry);
    commands.insert_resource(floor);
    next_state.set(GameState::Floor);
}
