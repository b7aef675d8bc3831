//! Rooms domain: room state machine, passages, spawn policy and room flow
//! plugin wiring.

mod components;
mod door;
mod events;
mod room;
mod spawn;
mod spawn_point;
mod state;
mod systems;
mod transition;

#[cfg(test)]
mod tests;

pub use components::{PassageTrigger, RestColor, RoomInstance, RoomMember, Wall};
pub use door::{Door, Passage, PassageInteraction, Stairs};
pub use events::{EnterRoomEvent, ExitRoomEvent, RoomClearedEvent, StairsReachedEvent};
pub use room::{
    DOOR_INSET, EncounterStatus, LeaveRoomRequest, PlayerPlacement, Room, RoomLayout,
    RoomSetupError,
};
pub use spawn::{passage_color, spawn_room_entities};
pub use spawn_point::{DistanceTier, SpawnOffsets, roll_tier, spawn_point};
pub use state::{RoomState, TileSync};
pub use transition::TransitionCooldown;

use bevy::prelude::*;

use crate::core::GameState;
use crate::rooms::systems::{
    drain_stale_collision_events, fade_rooms_on_transition, log_room_cleared,
    reset_transition_cooldown, sync_door_visuals, tick_transition_cooldown,
    track_player_door_zone, update_enemy_count_on_defeat,
};

pub struct RoomsPlugin;

impl Plugin for RoomsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<RoomState>()
            .init_resource::<TransitionCooldown>()
            .add_message::<EnterRoomEvent>()
            .add_message::<ExitRoomEvent>()
            .add_message::<RoomClearedEvent>()
            .add_message::<StairsReachedEvent>()
            .add_systems(OnEnter(GameState::Floor), drain_stale_collision_events)
            .add_systems(
                Update,
                (
                    reset_transition_cooldown,
                    tick_transition_cooldown,
                    track_player_door_zone,
                    update_enemy_count_on_defeat,
                    log_room_cleared,
                    fade_rooms_on_transition,
                    sync_door_visuals,
                )
                    .chain()
                    .run_if(in_state(GameState::Floor)),
            );
    }
}
