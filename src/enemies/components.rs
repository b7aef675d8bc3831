//! Enemies domain: components linking entities to pool instances.

use bevy::prelude::*;

use crate::enemies::pool::EnemyHandle;

/// Entity view of one pooled instance. The entity lives as long as the
/// instance does and is hidden while the instance is inactive.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyController {
    pub handle: EnemyHandle,
}
