//! Rooms domain: door triggers, encounter resolution and room visuals.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::effects::{FlashTuning, VisualTask};
use crate::enemies::{EnemyDefeatedEvent, EnemyPool};
use crate::floor::{Floor, Minimap};
use crate::movement::Player;
use crate::rooms::components::{PassageTrigger, RestColor, RoomMember};
use crate::rooms::door::PassageInteraction;
use crate::rooms::events::{EnterRoomEvent, ExitRoomEvent, RoomClearedEvent, StairsReachedEvent};
use crate::rooms::room::EncounterStatus;
use crate::rooms::spawn::passage_color;
use crate::rooms::transition::TransitionCooldown;

/// Every entry restarts the cooldown so the player cannot bounce straight
/// back through the door they were placed on.
pub(crate) fn reset_transition_cooldown(
    mut enter_events: MessageReader<EnterRoomEvent>,
    mut cooldown: ResMut<TransitionCooldown>,
) {
    if enter_events.read().count() > 0 {
        cooldown.reset();
        debug!("[TRANSITION] Cooldown reset on room entry");
    }
}

pub(crate) fn tick_transition_cooldown(mut cooldown: ResMut<TransitionCooldown>, time: Res<Time>) {
    cooldown.tick(time.delta());
}

pub(crate) fn drain_stale_collision_events(
    mut collision_start_events: MessageReader<CollisionStart>,
) {
    let count = collision_start_events.read().count();
    if count > 0 {
        info!(
            "[TRANSITION] Drained {} stale collision events on state enter",
            count
        );
    }
}

/// Forwards trigger overlaps to the current room's passages and turns an
/// allowed interaction into a leave or descend message.
#[allow(clippy::too_many_arguments)]
pub(crate) fn track_player_door_zone(
    mut collision_start_events: MessageReader<CollisionStart>,
    mut collision_end_events: MessageReader<CollisionEnd>,
    trigger_query: Query<&PassageTrigger>,
    player_query: Query<Entity, With<Player>>,
    cooldown: Res<TransitionCooldown>,
    mut floor: ResMut<Floor>,
    mut minimap: ResMut<Minimap>,
    mut exit_events: MessageWriter<ExitRoomEvent>,
    mut stairs_events: MessageWriter<StairsReachedEvent>,
) {
    let Ok(player_entity) = player_query.single() else {
        for _ in collision_start_events.read() {}
        for _ in collision_end_events.read() {}
        return;
    };
    let current = floor.current_coord();

    for event in collision_start_events.read() {
        let Some(trigger) =
            player_trigger(event.collider1, event.collider2, player_entity, &trigger_query)
        else {
            continue;
        };
        if Some(trigger.room) != current {
            continue;
        }
        let Some(room) = floor.current_room_mut() else {
            continue;
        };
        let Some(passage) = room.passage_mut(trigger.direction) else {
            continue;
        };

        match passage.player_enter() {
            PassageInteraction::LeaveRoom(direction) if cooldown.can_transition() => {
                let request = room.leave_room(direction, &mut minimap);
                exit_events.write(ExitRoomEvent { request });
            }
            PassageInteraction::Descend if cooldown.can_transition() => {
                info!("[ROOM] Player reached the stairs in {}", room.coord());
                stairs_events.write(StairsReachedEvent { coord: room.coord() });
            }
            PassageInteraction::Blocked => {
                debug!(
                    "[DOOR] {:?} door of {} is sealed",
                    trigger.direction,
                    room.coord()
                );
            }
            _ => {
                debug!(
                    "[TRANSITION] Ignoring {:?} passage during cooldown",
                    trigger.direction
                );
            }
        }
    }

    for event in collision_end_events.read() {
        let Some(trigger) =
            player_trigger(event.collider1, event.collider2, player_entity, &trigger_query)
        else {
            continue;
        };
        if Some(trigger.room) != current {
            continue;
        }
        if let Some(passage) = floor
            .current_room_mut()
            .and_then(|room| room.passage_mut(trigger.direction))
        {
            passage.player_exit();
        }
    }
}

fn player_trigger<'a>(
    a: Entity,
    b: Entity,
    player: Entity,
    trigger_query: &'a Query<&PassageTrigger>,
) -> Option<&'a PassageTrigger> {
    if b == player {
        trigger_query.get(a).ok()
    } else if a == player {
        trigger_query.get(b).ok()
    } else {
        None
    }
}

/// Re-scans the current encounter whenever a pooled enemy goes down.
pub(crate) fn update_enemy_count_on_defeat(
    mut defeated_events: MessageReader<EnemyDefeatedEvent>,
    mut cleared_events: MessageWriter<RoomClearedEvent>,
    pool: Res<EnemyPool>,
    mut floor: ResMut<Floor>,
    mut minimap: ResMut<Minimap>,
) {
    if defeated_events.read().count() == 0 {
        return;
    }
    let Some(room) = floor.current_room_mut() else {
        warn!("[ENCOUNTER] Enemy defeated with no current room");
        return;
    };

    if room.update_enemy_count(&pool, &mut minimap) == EncounterStatus::Resolved {
        cleared_events.write(RoomClearedEvent { coord: room.coord() });
    }
}

/// Keeps the current room's passage colours in step with door state. A
/// running fade owns the sprite until it finishes.
pub(crate) fn sync_door_visuals(
    floor: Res<Floor>,
    mut query: Query<(&PassageTrigger, &mut RestColor, &mut Sprite, Has<VisualTask>)>,
) {
    let Some(room) = floor.current_room() else {
        return;
    };

    for (trigger, mut rest, mut sprite, fading) in &mut query {
        if trigger.room != room.coord() {
            continue;
        }
        let Some(passage) = room.passage(trigger.direction) else {
            continue;
        };
        let color = passage_color(passage);
        if rest.0 != color {
            rest.0 = color;
        }
        if !fading && sprite.color != color {
            sprite.color = color;
        }
    }
}

/// The room being entered fades in, the one being left fades out.
pub(crate) fn fade_rooms_on_transition(
    mut commands: Commands,
    mut enter_events: MessageReader<EnterRoomEvent>,
    tuning: Res<FlashTuning>,
    members: Query<(Entity, &RoomMember, &RestColor, &Sprite)>,
) {
    for event in enter_events.read() {
        for (entity, member, rest, sprite) in &members {
            if member.room == event.coord {
                commands.entity(entity).insert(VisualTask::fade(
                    sprite.color,
                    rest.0,
                    tuning.room_fade_secs,
                ));
            } else if Some(member.room) == event.previous {
                commands.entity(entity).insert(VisualTask::fade(
                    sprite.color,
                    Color::NONE,
                    tuning.room_fade_secs,
                ));
            }
        }
    }
}

pub(crate) fn log_room_cleared(mut cleared_events: MessageReader<RoomClearedEvent>) {
    for event in cleared_events.read() {
        info!("[ROOM] {} cleared", event.coord);
    }
}
