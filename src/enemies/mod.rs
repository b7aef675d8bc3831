//! Enemies domain: the shared enemy pool and its entity mirror.

mod components;
mod events;
mod pool;
mod systems;

pub use components::EnemyController;
pub use events::EnemyDefeatedEvent;
pub use pool::{EnemyArchetype, EnemyHandle, EnemyInstance, EnemyPool, EnemyTemplate, PoolError};

use bevy::prelude::*;

use crate::core::GameState;
use crate::enemies::systems::{chase_player, handle_enemy_defeats, sync_pooled_enemies};

pub struct EnemiesPlugin;

impl Plugin for EnemiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyPool>()
            .add_message::<EnemyDefeatedEvent>()
            .add_systems(
                Update,
                (handle_enemy_defeats, sync_pooled_enemies, chase_player)
                    .chain()
                    .run_if(in_state(GameState::Floor)),
            );
    }
}
