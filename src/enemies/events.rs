//! Enemies domain: pool lifecycle messages.

use bevy::ecs::message::Message;

use crate::enemies::pool::EnemyHandle;

/// A pooled instance went inactive after being defeated.
#[derive(Debug)]
pub struct EnemyDefeatedEvent {
    pub handle: EnemyHandle,
}

impl Message for EnemyDefeatedEvent {}
