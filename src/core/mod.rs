//! Core domain: run states, configuration and the camera.

mod resources;
mod state;

pub use resources::{EncounterRng, RunConfig};
pub use state::GameState;

use bevy::prelude::*;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RunConfig>()
            .init_resource::<EncounterRng>()
            .add_systems(Startup, (log_run_seed, setup_camera));
    }
}

fn log_run_seed(config: Res<RunConfig>) {
    info!("Starting run with seed {}", config.seed);
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
