//! Rooms domain: tests for the room state machine, passages and spawn policy.

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{
    DOOR_INSET, DistanceTier, Door, EncounterStatus, Passage, PassageInteraction, Room,
    RoomLayout, RoomSetupError, RoomState, SpawnOffsets, TileSync, TransitionCooldown,
    passage_color, roll_tier, spawn_point,
};
use crate::content::Direction;
use crate::enemies::{EnemyArchetype, EnemyPool, EnemyTemplate, PoolError};
use crate::floor::Minimap;

const ROOM_SIZE: Vec2 = Vec2::new(320.0, 240.0);

fn pool() -> EnemyPool {
    let mut pool = EnemyPool::default();
    for kind in ["slime", "bat"] {
        pool.register(EnemyArchetype {
            kind: kind.to_string(),
            color: Color::srgb(0.8, 0.2, 0.2),
            size: 16.0,
            max_health: 2,
            contact_damage: 1,
        });
    }
    pool
}

fn room_with(doors: &[Direction], minimap: &mut Minimap) -> Room {
    let layout = RoomLayout::rectangular(Vec2::new(400.0, 0.0), ROOM_SIZE);
    let mut room = Room::new(IVec2::new(1, 0), layout, SpawnOffsets::default());
    for direction in doors {
        room.set_door(*direction).unwrap();
    }
    let tile = minimap.add_tile(room.coord());
    room.set_minimap_tile(tile, minimap).unwrap();
    room
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn door_states(room: &Room) -> Vec<(Direction, bool, bool)> {
    Direction::ALL
        .into_iter()
        .filter_map(|d| room.door(d).map(|door| (d, door.is_open(), door.is_locked())))
        .collect()
}

// -----------------------------------------------------------------------------
// RoomState ordering
// -----------------------------------------------------------------------------

#[test]
fn room_state_total_order() {
    assert!(RoomState::Unknown < RoomState::Discovered);
    assert!(RoomState::Discovered < RoomState::Completed);
    assert!(RoomState::Completed < RoomState::Current);
    assert!(RoomState::Completed.is_upgrade_from(RoomState::Discovered));
    assert!(!RoomState::Discovered.is_upgrade_from(RoomState::Discovered));
    assert!(!RoomState::Unknown.is_upgrade_from(RoomState::Completed));
}

#[test]
fn set_state_never_decreases() {
    let mut minimap = Minimap::default();
    let mut room = room_with(&[], &mut minimap);
    let sequence = [
        RoomState::Discovered,
        RoomState::Unknown,
        RoomState::Completed,
        RoomState::Discovered,
        RoomState::Completed,
        RoomState::Unknown,
    ];

    let mut last = room.state();
    for state in sequence {
        room.set_state(state, TileSync::Push, &mut minimap);
        assert!(room.state() >= last);
        last = room.state();
    }
    assert_eq!(room.state(), RoomState::Completed);
}

#[test]
fn set_state_reports_redundant_calls() {
    let mut minimap = Minimap::default();
    let mut room = room_with(&[], &mut minimap);
    assert!(room.set_state(RoomState::Discovered, TileSync::Push, &mut minimap));
    assert!(!room.set_state(RoomState::Discovered, TileSync::Push, &mut minimap));
    assert!(!room.set_state(RoomState::Unknown, TileSync::Push, &mut minimap));
}

#[test]
fn set_state_push_and_skip_reach_tile_accordingly() {
    let mut minimap = Minimap::default();
    let mut room = room_with(&[], &mut minimap);
    let tile = room.tile().unwrap();

    room.set_state(RoomState::Discovered, TileSync::Skip, &mut minimap);
    assert_eq!(minimap.display(tile), Some(RoomState::Unknown));

    room.set_state(RoomState::Completed, TileSync::Push, &mut minimap);
    assert_eq!(minimap.display(tile), Some(RoomState::Completed));
}

// -----------------------------------------------------------------------------
// Entry and exit
// -----------------------------------------------------------------------------

#[test]
fn encounter_room_seals_spawns_and_resolves() {
    let mut minimap = Minimap::default();
    let mut pool = pool();
    let mut rng = rng();
    let mut room = room_with(&[Direction::Up, Direction::Down], &mut minimap);
    room.set_enemies(vec![EnemyTemplate::new("slime"), EnemyTemplate::new("bat")])
        .unwrap();

    let placement = room
        .move_player_in(Some(Direction::Down), &mut pool, &mut minimap, &mut rng)
        .unwrap();

    assert_eq!(room.state(), RoomState::Discovered);
    assert_eq!(
        door_states(&room),
        vec![(Direction::Up, false, true), (Direction::Down, false, true)]
    );
    assert_eq!(room.live_enemies().len(), 2);
    assert_eq!(pool.active_count(), 2);
    assert_eq!(
        placement.position,
        room.passage(Direction::Down).unwrap().position()
    );
    assert_eq!(placement.velocity, Vec2::ZERO);

    for handle in room.live_enemies().to_vec() {
        pool.deactivate(handle);
    }
    assert_eq!(
        room.update_enemy_count(&pool, &mut minimap),
        EncounterStatus::Resolved
    );
    assert_eq!(room.state(), RoomState::Completed);
    assert!(room.live_enemies().is_empty());
    assert_eq!(
        door_states(&room),
        vec![(Direction::Up, true, false), (Direction::Down, true, false)]
    );
}

#[test]
fn empty_room_completes_and_leaves_doors_alone() {
    let mut minimap = Minimap::default();
    let mut pool = pool();
    let mut rng = rng();
    let mut room = room_with(&[Direction::Up], &mut minimap);
    room.set_enemies(Vec::new()).unwrap();
    let before = door_states(&room);

    let placement = room
        .move_player_in(Some(Direction::Left), &mut pool, &mut minimap, &mut rng)
        .unwrap();

    assert_eq!(room.state(), RoomState::Completed);
    assert_eq!(door_states(&room), before);
    assert_eq!(pool.len(), 0);
    assert_eq!(placement.position, room.anchor());
    assert_eq!(placement.velocity, Vec2::ZERO);

    let placement = room
        .move_player_in(Some(Direction::Up), &mut pool, &mut minimap, &mut rng)
        .unwrap();
    assert_eq!(
        placement.position,
        room.passage(Direction::Up).unwrap().position()
    );
}

#[test]
fn room_without_templates_completes_on_first_entry() {
    let mut minimap = Minimap::default();
    let mut pool = pool();
    let mut room = room_with(&[Direction::Right], &mut minimap);

    room.move_player_in(None, &mut pool, &mut minimap, &mut rng())
        .unwrap();

    assert_eq!(room.state(), RoomState::Completed);
    assert!(room.live_enemies().is_empty());
}

#[test]
fn entry_shows_current_and_leaving_restores_persisted_state() {
    let mut minimap = Minimap::default();
    let mut pool = pool();
    let mut room = room_with(&[Direction::Up], &mut minimap);
    let tile = room.tile().unwrap();

    room.move_player_in(None, &mut pool, &mut minimap, &mut rng())
        .unwrap();
    assert_eq!(minimap.display(tile), Some(RoomState::Current));
    assert_ne!(room.state(), RoomState::Current);

    let interaction = room.passage_mut(Direction::Up).unwrap().player_enter();
    assert_eq!(interaction, PassageInteraction::LeaveRoom(Direction::Up));
    assert!(room.door(Direction::Up).unwrap().player_inside());

    let request = room.leave_room(Direction::Up, &mut minimap);
    assert_eq!(minimap.display(tile), Some(RoomState::Completed));
    assert!(!room.door(Direction::Up).unwrap().player_inside());
    assert_eq!(request.from, room.coord());
    assert_eq!(request.direction, Direction::Up);
}

#[test]
fn reentering_completed_room_spawns_nothing() {
    let mut minimap = Minimap::default();
    let mut pool = pool();
    let mut rng = rng();
    let mut room = room_with(&[Direction::Up], &mut minimap);
    room.set_enemies(vec![EnemyTemplate::new("slime")]).unwrap();

    room.move_player_in(None, &mut pool, &mut minimap, &mut rng)
        .unwrap();
    for handle in room.live_enemies().to_vec() {
        pool.deactivate(handle);
    }
    room.update_enemy_count(&pool, &mut minimap);

    room.move_player_in(Some(Direction::Up), &mut pool, &mut minimap, &mut rng)
        .unwrap();
    assert_eq!(pool.active_count(), 0);
    assert!(room.live_enemies().is_empty());
    assert!(room.door(Direction::Up).unwrap().is_passable());
}

#[test]
fn reentering_during_encounter_does_not_respawn() {
    let mut minimap = Minimap::default();
    let mut pool = pool();
    let mut rng = rng();
    let mut room = room_with(&[Direction::Up], &mut minimap);
    room.set_enemies(vec![EnemyTemplate::new("slime")]).unwrap();

    room.move_player_in(None, &mut pool, &mut minimap, &mut rng)
        .unwrap();
    room.move_player_in(None, &mut pool, &mut minimap, &mut rng)
        .unwrap();
    assert_eq!(room.live_enemies().len(), 1);
    assert_eq!(pool.len(), 1);
}

// -----------------------------------------------------------------------------
// Encounter
// -----------------------------------------------------------------------------

#[test]
fn spawn_encounter_tracks_one_handle_per_template() {
    let mut minimap = Minimap::default();
    let mut pool = pool();
    let mut room = room_with(&Direction::ALL, &mut minimap);
    let templates = vec![
        EnemyTemplate::new("slime"),
        EnemyTemplate::new("slime"),
        EnemyTemplate::new("bat"),
    ];
    room.set_enemies(templates).unwrap();

    let spawned = room.spawn_encounter(&mut pool, &mut rng()).unwrap();

    assert_eq!(spawned, 3);
    assert_eq!(room.live_enemies().len(), 3);
    for (_, open, locked) in door_states(&room) {
        assert!(!open);
        assert!(locked);
    }
    for handle in room.live_enemies() {
        assert!(pool.take_placement(*handle).is_some());
    }
}

#[test]
fn spawn_encounter_with_unknown_kind_takes_nothing() {
    let mut minimap = Minimap::default();
    let mut pool = pool();
    let mut room = room_with(&[Direction::Up], &mut minimap);
    room.set_enemies(vec![EnemyTemplate::new("slime"), EnemyTemplate::new("wraith")])
        .unwrap();

    let err = room.spawn_encounter(&mut pool, &mut rng()).unwrap_err();

    assert_eq!(err, PoolError::UnregisteredKind("wraith".to_string()));
    assert_eq!(pool.len(), 0);
    assert!(room.live_enemies().is_empty());
    assert!(room.door(Direction::Up).unwrap().is_passable());
}

#[test]
fn update_enemy_count_waits_for_every_enemy() {
    let mut minimap = Minimap::default();
    let mut pool = pool();
    let mut room = room_with(&[Direction::Left], &mut minimap);
    room.set_enemies(vec![EnemyTemplate::new("slime"), EnemyTemplate::new("bat")])
        .unwrap();
    room.move_player_in(None, &mut pool, &mut minimap, &mut rng())
        .unwrap();

    let first = room.live_enemies()[0];
    pool.deactivate(first);

    assert_eq!(
        room.update_enemy_count(&pool, &mut minimap),
        EncounterStatus::InProgress { remaining: 1 }
    );
    assert_eq!(room.state(), RoomState::Discovered);
    assert!(room.door(Direction::Left).unwrap().is_locked());
}

#[test]
fn update_enemy_count_is_idempotent() {
    let mut minimap = Minimap::default();
    let mut pool = pool();
    let mut room = room_with(&[Direction::Up, Direction::Right], &mut minimap);
    room.set_enemies(vec![EnemyTemplate::new("bat")]).unwrap();
    room.move_player_in(None, &mut pool, &mut minimap, &mut rng())
        .unwrap();
    for handle in room.live_enemies().to_vec() {
        pool.deactivate(handle);
    }

    assert_eq!(
        room.update_enemy_count(&pool, &mut minimap),
        EncounterStatus::Resolved
    );
    let doors = door_states(&room);

    for _ in 0..3 {
        assert_eq!(
            room.update_enemy_count(&pool, &mut minimap),
            EncounterStatus::Idle
        );
        assert_eq!(room.state(), RoomState::Completed);
        assert_eq!(door_states(&room), doors);
    }
}

#[test]
fn empty_live_list_resolves_an_uncompleted_room() {
    let mut minimap = Minimap::default();
    let pool = pool();
    let mut room = room_with(&[Direction::Up, Direction::Left], &mut minimap);
    room.set_enemies(vec![EnemyTemplate::new("slime")]).unwrap();
    room.set_state(RoomState::Discovered, TileSync::Push, &mut minimap);
    if let Some(door) = room.passage_mut(Direction::Up).and_then(Passage::as_door_mut) {
        door.close();
        door.set_lock(true);
    }

    assert_eq!(
        room.update_enemy_count(&pool, &mut minimap),
        EncounterStatus::Resolved
    );
    assert_eq!(room.state(), RoomState::Completed);
    assert_eq!(
        door_states(&room),
        vec![(Direction::Up, true, false), (Direction::Left, true, false)]
    );
    assert_eq!(
        room.update_enemy_count(&pool, &mut minimap),
        EncounterStatus::Idle
    );
}

#[test]
fn resolving_leaves_tile_on_current_display() {
    let mut minimap = Minimap::default();
    let mut pool = pool();
    let mut room = room_with(&[Direction::Up], &mut minimap);
    let tile = room.tile().unwrap();
    room.set_enemies(vec![EnemyTemplate::new("slime")]).unwrap();
    room.move_player_in(None, &mut pool, &mut minimap, &mut rng())
        .unwrap();
    for handle in room.live_enemies().to_vec() {
        pool.deactivate(handle);
    }

    room.update_enemy_count(&pool, &mut minimap);

    assert_eq!(minimap.display(tile), Some(RoomState::Current));
}

// -----------------------------------------------------------------------------
// Level construction
// -----------------------------------------------------------------------------

#[test]
fn set_door_twice_is_an_error() {
    let mut minimap = Minimap::default();
    let mut room = room_with(&[Direction::Up], &mut minimap);
    assert_eq!(
        room.set_door(Direction::Up),
        Err(RoomSetupError::DuplicatePassage(Direction::Up))
    );
}

#[test]
fn set_door_without_door_point_is_an_error() {
    let layout = RoomLayout::new(Vec2::ZERO, ROOM_SIZE, [Some(Vec2::Y), None, None, None]);
    let mut room = Room::new(IVec2::ZERO, layout, SpawnOffsets::default());
    assert!(room.set_door(Direction::Up).is_ok());
    assert_eq!(
        room.set_door(Direction::Down),
        Err(RoomSetupError::MissingDoorPoint(Direction::Down))
    );
}

#[test]
fn stairs_take_first_free_side() {
    let mut minimap = Minimap::default();
    let mut room = room_with(&[Direction::Up, Direction::Down], &mut minimap);
    assert_eq!(room.set_stairs(), Ok(Direction::Right));
    assert!(room.passage(Direction::Right).unwrap().is_stairs());
    assert_eq!(room.set_stairs(), Ok(Direction::Left));
    assert_eq!(room.set_stairs(), Err(RoomSetupError::NoFreeSideForStairs));
}

#[test]
fn enemies_and_tile_are_set_once() {
    let mut minimap = Minimap::default();
    let mut room = room_with(&[], &mut minimap);
    room.set_enemies(Vec::new()).unwrap();
    assert_eq!(
        room.set_enemies(vec![EnemyTemplate::new("slime")]),
        Err(RoomSetupError::EncounterAlreadySet)
    );
    assert!(!room.has_encounter());

    let other = minimap.add_tile(IVec2::new(9, 9));
    assert_eq!(
        room.set_minimap_tile(other, &mut minimap),
        Err(RoomSetupError::TileAlreadyBound)
    );
}

#[test]
fn rectangular_layout_insets_door_points() {
    let layout = RoomLayout::rectangular(Vec2::new(100.0, 50.0), ROOM_SIZE);
    let up = layout.door_point(Direction::Up).unwrap();
    let left = layout.door_point(Direction::Left).unwrap();
    assert_eq!(up, Vec2::new(100.0, 50.0 + ROOM_SIZE.y / 2.0 - DOOR_INSET));
    assert_eq!(left, Vec2::new(100.0 - ROOM_SIZE.x / 2.0 + DOOR_INSET, 50.0));
}

#[test]
fn query_for_missing_passage_is_none() {
    let mut minimap = Minimap::default();
    let room = room_with(&[Direction::Up], &mut minimap);
    assert!(room.passage(Direction::Down).is_none());
    assert!(room.door(Direction::Left).is_none());
    assert_eq!(room.passages().count(), 1);
}

// -----------------------------------------------------------------------------
// Door contract
// -----------------------------------------------------------------------------

#[test]
fn door_starts_open_and_unlocked() {
    let door = Door::new(Direction::Right, Vec2::ZERO);
    assert!(door.is_open());
    assert!(!door.is_locked());
    assert!(door.is_passable());
}

#[test]
fn locked_door_refuses_open() {
    let mut door = Door::new(Direction::Up, Vec2::ZERO);
    door.close();
    door.set_lock(true);
    assert!(!door.open());
    assert!(!door.is_open());

    door.set_lock(false);
    assert!(door.open());
    assert!(door.is_passable());
}

#[test]
fn relocking_is_a_no_op() {
    let mut door = Door::new(Direction::Up, Vec2::ZERO);
    door.set_lock(true);
    door.set_lock(true);
    assert!(door.is_locked());
}

#[test]
fn player_enter_fires_leave_only_when_passable() {
    let mut door = Door::new(Direction::Left, Vec2::ZERO);
    assert_eq!(
        door.player_enter(),
        PassageInteraction::LeaveRoom(Direction::Left)
    );
    assert!(door.player_inside());
    door.player_exit();
    assert!(!door.player_inside());

    door.close();
    assert_eq!(door.player_enter(), PassageInteraction::Blocked);

    door.set_lock(true);
    assert_eq!(door.player_enter(), PassageInteraction::Blocked);
}

#[test]
fn stairs_always_descend() {
    let mut minimap = Minimap::default();
    let mut room = room_with(&[], &mut minimap);
    let side = room.set_stairs().unwrap();
    let passage = room.passage_mut(side).unwrap();
    assert_eq!(passage.player_enter(), PassageInteraction::Descend);
    assert!(passage.as_door().is_none());
}

#[test]
fn passage_colors_follow_door_state() {
    let mut door = Door::new(Direction::Up, Vec2::ZERO);
    let open = passage_color(&Passage::Door(door.clone()));
    door.close();
    let closed = passage_color(&Passage::Door(door.clone()));
    door.set_lock(true);
    let locked = passage_color(&Passage::Door(door));
    assert_ne!(open, closed);
    assert_ne!(closed, locked);
}

// -----------------------------------------------------------------------------
// Spawn policy
// -----------------------------------------------------------------------------

#[test]
fn spawn_offsets_never_mix_tiers() {
    let offsets = SpawnOffsets::default();
    let anchor = Vec2::new(-200.0, 75.0);
    let mut rng = rng();

    for _ in 0..500 {
        let offset = (spawn_point(anchor, &offsets, &mut rng) - anchor).abs();
        let near = Vec2::new(offsets.near_x, offsets.near_y);
        let far = Vec2::new(offsets.far_x, offsets.far_y);
        assert!(
            offset.abs_diff_eq(near, 1e-3) || offset.abs_diff_eq(far, 1e-3),
            "mixed offset {offset}"
        );
    }
}

#[test]
fn spawn_quadrants_are_uniform() {
    let offsets = SpawnOffsets::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let samples = 4000;
    let mut counts = [0u32; 4];

    for _ in 0..samples {
        let offset = spawn_point(Vec2::ZERO, &offsets, &mut rng);
        let index = match (offset.x > 0.0, offset.y > 0.0) {
            (true, true) => 0,
            (false, true) => 1,
            (false, false) => 2,
            (true, false) => 3,
        };
        counts[index] += 1;
    }

    let expected = samples as f64 / 4.0;
    let chi_square: f64 = counts
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum();
    // df = 3, p = 0.001
    assert!(chi_square < 16.27, "chi-square {chi_square} for {counts:?}");
}

#[test]
fn far_tier_is_favoured() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let samples = 4000;
    let far = (0..samples)
        .filter(|_| roll_tier(&mut rng) == DistanceTier::Far)
        .count();
    let fraction = far as f64 / samples as f64;
    assert!((0.65..=0.75).contains(&fraction), "far fraction {fraction}");
}

#[test]
fn spawn_point_is_reproducible_for_a_seed() {
    let offsets = SpawnOffsets::default();
    let mut a = ChaCha8Rng::seed_from_u64(11);
    let mut b = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..16 {
        assert_eq!(
            spawn_point(Vec2::ZERO, &offsets, &mut a),
            spawn_point(Vec2::ZERO, &offsets, &mut b)
        );
    }
}

// -----------------------------------------------------------------------------
// TransitionCooldown
// -----------------------------------------------------------------------------

#[test]
fn transition_cooldown_blocks_after_reset() {
    let mut cooldown = TransitionCooldown::default();
    cooldown.reset();
    cooldown.tick(Duration::from_secs_f32(0.1));
    assert!(!cooldown.can_transition());
}

#[test]
fn transition_cooldown_expires() {
    let mut cooldown = TransitionCooldown::default();
    cooldown.reset();
    cooldown.tick(Duration::from_secs_f32(0.5));
    assert!(cooldown.can_transition());
}
