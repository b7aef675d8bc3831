//! Combat domain: damage and defeat messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug)]
pub struct DamageEvent {
    pub source: Option<Entity>,
    pub target: Entity,
    pub amount: u32,
}

impl Message for DamageEvent {}

/// A receiver's health ran out.
#[derive(Debug)]
pub struct DefeatedEvent {
    pub entity: Entity,
}

impl Message for DefeatedEvent {}
