//! Debug domain: hotkeys for exercising encounters.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{DamageEvent, Health};
use crate::debug::snapshot::FloorSnapshot;
use crate::enemies::{EnemyController, EnemyPool};
use crate::floor::{Floor, Minimap};

/// K: lethal damage to every active enemy, through the normal damage path.
pub(crate) fn defeat_all_enemies(
    keyboard: Res<ButtonInput<KeyCode>>,
    pool: Res<EnemyPool>,
    mut enemies: Query<(Entity, &EnemyController, &mut Health)>,
    mut damage_events: MessageWriter<DamageEvent>,
) {
    if !keyboard.just_pressed(KeyCode::KeyK) {
        return;
    }

    let mut count = 0;
    for (entity, controller, mut health) in &mut enemies {
        if !pool.is_active(controller.handle) {
            continue;
        }
        health.set_invincible(false);
        damage_events.write(DamageEvent {
            source: None,
            target: entity,
            amount: health.current,
        });
        count += 1;
    }
    info!("[DEBUG] Dealt lethal damage to {} enemies", count);
}

/// F3: dump the floor to the log as JSON.
pub(crate) fn log_floor_snapshot(
    keyboard: Res<ButtonInput<KeyCode>>,
    floor: Res<Floor>,
    minimap: Res<Minimap>,
    pool: Res<EnemyPool>,
) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }

    match FloorSnapshot::capture(&floor, &minimap, &pool).to_json() {
        Ok(json) => info!("[DEBUG] Floor snapshot:\n{}", json),
        Err(e) => warn!("[DEBUG] Could not serialise floor snapshot: {}", e),
    }
}
