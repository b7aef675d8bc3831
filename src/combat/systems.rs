//! Combat domain: contact damage, damage application and defeat handling.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{ContactDamage, DamageOutcome, DamageReceiver, Health};
use crate::combat::events::{DamageEvent, DefeatedEvent};
use crate::core::GameState;
use crate::effects::{CancelVisualTask, FlashTuning, VisualTask};
use crate::movement::Player;

/// Touching an enemy hurts the player.
pub(crate) fn detect_contact_damage(
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    contact_query: Query<&ContactDamage>,
    player_query: Query<Entity, With<Player>>,
) {
    let Ok(player) = player_query.single() else {
        for _ in collision_events.read() {}
        return;
    };

    for event in collision_events.read() {
        let (source, other) = if contact_query.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if contact_query.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        if other != player {
            continue;
        }

        if let Ok(contact) = contact_query.get(source) {
            damage_events.write(DamageEvent {
                source: Some(source),
                target: player,
                amount: contact.0,
            });
        }
    }
}

pub(crate) fn apply_damage(
    mut commands: Commands,
    mut damage_events: MessageReader<DamageEvent>,
    mut defeated_events: MessageWriter<DefeatedEvent>,
    tuning: Res<FlashTuning>,
    mut query: Query<(&mut Health, &Sprite, Option<&VisualTask>)>,
) {
    for event in damage_events.read() {
        let Ok((mut health, sprite, running_task)) = query.get_mut(event.target) else {
            continue;
        };

        match health.add_damage(event.amount) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt { remaining } => {
                debug!(
                    "{:?} took {} damage ({} left)",
                    event.target, event.amount, remaining
                );
                health.set_invincible(true);
                let rest = running_task.map_or(sprite.color, VisualTask::rest_color);
                commands
                    .entity(event.target)
                    .insert(VisualTask::hit_flash(rest, &tuning));
            }
            DamageOutcome::Depleted => {
                defeated_events.write(DefeatedEvent {
                    entity: event.target,
                });
            }
        }
    }
}

/// Invincibility lasts exactly as long as the hit-flash task.
pub(crate) fn clear_invincibility(mut query: Query<&mut Health, Without<VisualTask>>) {
    for mut health in &mut query {
        if health.is_invincible() {
            health.set_invincible(false);
        }
    }
}

pub(crate) fn handle_player_defeat(
    mut defeated_events: MessageReader<DefeatedEvent>,
    mut cancel_events: MessageWriter<CancelVisualTask>,
    player_query: Query<Entity, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in defeated_events.read() {
        if player_query.contains(event.entity) {
            info!("Player defeated");
            cancel_events.write(CancelVisualTask {
                entity: event.entity,
            });
            next_state.set(GameState::Defeated);
        }
    }
}
