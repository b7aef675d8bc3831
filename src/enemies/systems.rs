//! Enemies domain: entity sync, chasing and defeat handling.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{ContactDamage, DefeatedEvent, Health};
use crate::effects::CancelVisualTask;
use crate::enemies::components::EnemyController;
use crate::enemies::events::EnemyDefeatedEvent;
use crate::enemies::pool::{EnemyHandle, EnemyPool};
use crate::movement::{GameLayer, Player};

const ENEMY_Z: f32 = 4.0;

/// Mirrors the pool onto entities: spawns an entity the first time an
/// instance is handed out, teleports it on placement and hides it while
/// inactive. Runs only on frames where the pool changed.
pub(crate) fn sync_pooled_enemies(
    mut commands: Commands,
    mut pool: ResMut<EnemyPool>,
    mut query: Query<(
        &mut Transform,
        &mut Health,
        &mut Visibility,
        &mut LinearVelocity,
        Has<ColliderDisabled>,
    )>,
) {
    if !pool.is_changed() {
        return;
    }
    let handles: Vec<EnemyHandle> = pool.handles().collect();

    for handle in handles {
        let Some((active, bound)) = pool.instance(handle).map(|i| (i.is_active(), i.entity()))
        else {
            continue;
        };

        let Some(entity) = bound else {
            let kind = pool
                .instance(handle)
                .map(|i| i.template.kind.clone())
                .unwrap_or_default();
            let Some(archetype) = pool.archetype(&kind).cloned() else {
                warn!(
                    "[POOL] Instance {} has unregistered kind '{}'",
                    handle.index(),
                    kind
                );
                continue;
            };
            let position = pool.take_placement(handle).unwrap_or_default();
            let entity = commands
                .spawn((
                    EnemyController { handle },
                    Health::new(archetype.max_health),
                    ContactDamage(archetype.contact_damage),
                    Sprite {
                        color: archetype.color,
                        custom_size: Some(Vec2::splat(archetype.size)),
                        ..default()
                    },
                    Transform::from_translation(position.extend(ENEMY_Z)),
                    if active {
                        Visibility::Visible
                    } else {
                        Visibility::Hidden
                    },
                    (
                        RigidBody::Dynamic,
                        Collider::rectangle(archetype.size, archetype.size),
                        LockedAxes::ROTATION_LOCKED,
                        LinearVelocity::default(),
                        CollisionEventsEnabled,
                        CollisionLayers::new(
                            GameLayer::Enemy,
                            [GameLayer::Wall, GameLayer::Player, GameLayer::Enemy],
                        ),
                    ),
                ))
                .id();
            pool.bind_entity(handle, entity);
            debug!(
                "[POOL] Spawned entity {:?} for '{}' instance {}",
                entity,
                archetype.kind,
                handle.index()
            );
            continue;
        };

        let Ok((mut transform, mut health, mut visibility, mut velocity, disabled)) =
            query.get_mut(entity)
        else {
            continue;
        };

        if let Some(position) = pool.take_placement(handle) {
            transform.translation = position.extend(ENEMY_Z);
            health.restore();
        }

        if active {
            if disabled {
                commands.entity(entity).remove::<ColliderDisabled>();
            }
            *visibility = Visibility::Visible;
        } else {
            if !disabled {
                commands.entity(entity).insert(ColliderDisabled);
            }
            *visibility = Visibility::Hidden;
            velocity.0 = Vec2::ZERO;
        }
    }
}

pub(crate) fn chase_player(
    pool: Res<EnemyPool>,
    player_query: Query<&Transform, With<Player>>,
    mut enemies: Query<(&EnemyController, &Transform, &mut LinearVelocity), Without<Player>>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    let target = player.translation.truncate();

    for (controller, transform, mut velocity) in &mut enemies {
        let Some(instance) = pool.instance(controller.handle) else {
            continue;
        };
        if !instance.is_active() {
            continue;
        }
        let to_player = target - transform.translation.truncate();
        velocity.0 = to_player.normalize_or_zero() * instance.template.speed;
    }
}

/// Returns defeated enemies to the pool.
pub(crate) fn handle_enemy_defeats(
    mut defeated_events: MessageReader<DefeatedEvent>,
    mut cancel_events: MessageWriter<CancelVisualTask>,
    mut enemy_defeated: MessageWriter<EnemyDefeatedEvent>,
    mut pool: ResMut<EnemyPool>,
    enemies: Query<&EnemyController>,
) {
    for event in defeated_events.read() {
        let Ok(controller) = enemies.get(event.entity) else {
            continue;
        };

        if !pool.deactivate(controller.handle) {
            continue;
        }

        cancel_events.write(CancelVisualTask {
            entity: event.entity,
        });
        enemy_defeated.write(EnemyDefeatedEvent {
            handle: controller.handle,
        });
        info!(
            "[POOL] Instance {} defeated ({} still active)",
            controller.handle.index(),
            pool.active_count()
        );
    }
}
