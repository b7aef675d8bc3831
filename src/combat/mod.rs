//! Combat domain: typed damage between the player and encounter enemies.

mod components;
mod events;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{ContactDamage, DamageOutcome, DamageReceiver, Health};
pub use events::{DamageEvent, DefeatedEvent};

use bevy::prelude::*;

use crate::combat::systems::{
    apply_damage, clear_invincibility, detect_contact_damage, handle_player_defeat,
};
use crate::core::GameState;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<DefeatedEvent>()
            .add_systems(
                Update,
                (
                    clear_invincibility,
                    detect_contact_damage,
                    apply_damage,
                    handle_player_defeat,
                )
                    .chain()
                    .run_if(in_state(GameState::Floor)),
            );
    }
}
