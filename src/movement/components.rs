//! Movement domain: components and physics layers for top-down locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Room walls
    Wall,
    /// Player character
    Player,
    /// Pooled enemies
    Enemy,
    /// Door and stairs triggers - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    pub max_speed: f32,
    pub accel: f32,
    pub decel: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 220.0,
            accel: 2400.0,
            decel: 2000.0,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
}

/// Steps `current` toward `target`, using `accel` while there is input and `decel` otherwise.
pub fn approach_velocity(current: Vec2, target: Vec2, accel: f32, decel: f32, dt: f32) -> Vec2 {
    let rate = if target.length_squared() > 0.0 {
        accel
    } else {
        decel
    };
    let delta = target - current;
    let step = rate * dt;
    if delta.length() <= step {
        target
    } else {
        current + delta.normalize() * step
    }
}
