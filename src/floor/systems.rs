//! Floor domain: level construction, room-to-room navigation and the
//! minimap overview.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::content::{ContentRegistry, FloorDef};
use crate::core::EncounterRng;
use crate::enemies::{EnemyArchetype, EnemyPool};
use crate::floor::authority::Floor;
use crate::floor::minimap::{Minimap, TileId};
use crate::movement::Player;
use crate::rooms::{
    EnterRoomEvent, ExitRoomEvent, PlayerPlacement, RoomState, StairsReachedEvent,
    spawn_room_entities,
};

const MINIMAP_CELL: f32 = 14.0;
const MINIMAP_SPACING: f32 = 4.0;

/// One cell of the overview map
#[derive(Component, Debug)]
pub struct MinimapCell {
    pub tile: TileId,
}

pub fn minimap_color(state: RoomState) -> Color {
    match state {
        RoomState::Unknown => Color::srgba(0.2, 0.2, 0.25, 0.4),
        RoomState::Discovered => Color::srgb(0.55, 0.55, 0.6),
        RoomState::Completed => Color::srgb(0.3, 0.7, 0.4),
        RoomState::Current => Color::srgb(0.95, 0.85, 0.3),
    }
}

/// Builds the floor from content and puts the player in the start room.
/// Any construction error is fatal.
#[allow(clippy::too_many_arguments)]
pub(crate) fn setup_floor(
    mut commands: Commands,
    registry: Res<ContentRegistry>,
    def: Res<FloorDef>,
    mut floor: ResMut<Floor>,
    mut pool: ResMut<EnemyPool>,
    mut minimap: ResMut<Minimap>,
    mut rng: ResMut<EncounterRng>,
    mut player_query: Query<(&mut Transform, &mut LinearVelocity), With<Player>>,
    mut enter_events: MessageWriter<EnterRoomEvent>,
    mut exit: MessageWriter<AppExit>,
) {
    for enemy in registry.enemies.values() {
        pool.register(EnemyArchetype::from(enemy));
    }

    let mut built = match Floor::build(&def, &pool, &mut minimap) {
        Ok(built) => built,
        Err(errors) => {
            for e in &errors {
                error!("[FLOOR] {}", e);
            }
            exit.write(AppExit::error());
            return;
        }
    };

    for room in built.rooms() {
        spawn_room_entities(&mut commands, room);
    }
    spawn_minimap_ui(&mut commands, &minimap);

    let placement = match built.enter_start_room(&mut pool, &mut minimap, &mut rng.0) {
        Ok(placement) => placement,
        Err(e) => {
            error!("[FLOOR] Could not enter the start room: {}", e);
            exit.write(AppExit::error());
            return;
        }
    };

    for (mut transform, mut velocity) in &mut player_query {
        apply_placement(placement, &mut transform, &mut velocity);
    }

    info!(
        "[FLOOR] Built {} rooms, player starts in {}",
        built.rooms().count(),
        built.start_coord()
    );
    enter_events.write(EnterRoomEvent {
        coord: built.start_coord(),
        previous: None,
        entry_direction: None,
    });
    *floor = built;
}

/// Relays leave requests from the current room to the floor authority.
pub(crate) fn process_room_transitions(
    mut exit_events: MessageReader<ExitRoomEvent>,
    mut enter_events: MessageWriter<EnterRoomEvent>,
    mut floor: ResMut<Floor>,
    mut pool: ResMut<EnemyPool>,
    mut minimap: ResMut<Minimap>,
    mut rng: ResMut<EncounterRng>,
    mut player_query: Query<(&mut Transform, &mut LinearVelocity), With<Player>>,
) {
    for event in exit_events.read() {
        let previous = floor.current_coord();
        let placement =
            match floor.move_to_room(event.request, &mut pool, &mut minimap, &mut rng.0) {
                Ok(placement) => placement,
                Err(e) => {
                    warn!("[TRANSITION] {}", e);
                    continue;
                }
            };

        for (mut transform, mut velocity) in &mut player_query {
            apply_placement(placement, &mut transform, &mut velocity);
        }

        if let Some(coord) = floor.current_coord() {
            info!("[TRANSITION] Entered {} from {:?}", coord, previous);
            enter_events.write(EnterRoomEvent {
                coord,
                previous,
                entry_direction: Some(event.request.direction.opposite()),
            });
        }
    }
}

fn apply_placement(
    placement: PlayerPlacement,
    transform: &mut Transform,
    velocity: &mut LinearVelocity,
) {
    let z = transform.translation.z;
    transform.translation = placement.position.extend(z);
    velocity.0 = placement.velocity;
}

pub(crate) fn focus_camera(
    mut enter_events: MessageReader<EnterRoomEvent>,
    floor: Res<Floor>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Some(event) = enter_events.read().last() else {
        return;
    };
    let Some(room) = floor.room(event.coord) else {
        return;
    };
    for mut transform in &mut camera_query {
        let z = transform.translation.z;
        transform.translation = room.anchor().extend(z);
    }
}

pub(crate) fn handle_stairs_reached(mut stairs_events: MessageReader<StairsReachedEvent>) {
    for event in stairs_events.read() {
        info!("[FLOOR] Player took the stairs in {}", event.coord);
    }
}

fn spawn_minimap_ui(commands: &mut Commands, minimap: &Minimap) {
    let Some((min, max)) = minimap.bounds() else {
        return;
    };
    let span = (max - min + IVec2::ONE).as_vec2() * (MINIMAP_CELL + MINIMAP_SPACING);

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                top: Val::Px(20.0),
                width: Val::Px(span.x),
                height: Val::Px(span.y),
                ..default()
            },
            ZIndex(100),
        ))
        .with_children(|parent| {
            for (tile, entry) in minimap.iter() {
                // Grid y grows upward, UI top grows downward
                let cell = IVec2::new(entry.coord.x - min.x, max.y - entry.coord.y).as_vec2()
                    * (MINIMAP_CELL + MINIMAP_SPACING);
                parent.spawn((
                    MinimapCell { tile },
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(cell.x),
                        top: Val::Px(cell.y),
                        width: Val::Px(MINIMAP_CELL),
                        height: Val::Px(MINIMAP_CELL),
                        ..default()
                    },
                    BackgroundColor(minimap_color(entry.display())),
                ));
            }
        });
}

pub(crate) fn sync_minimap_tiles(
    minimap: Res<Minimap>,
    mut cells: Query<(&MinimapCell, &mut BackgroundColor)>,
) {
    if !minimap.is_changed() {
        return;
    }
    for (cell, mut background) in &mut cells {
        if let Some(state) = minimap.display(cell.tile) {
            background.0 = minimap_color(state);
        }
    }
}
