use bevy::prelude::*;

use super::approach_velocity;

#[test]
fn approach_reaches_target_when_step_covers_gap() {
    let v = approach_velocity(Vec2::new(190.0, 0.0), Vec2::new(200.0, 0.0), 2400.0, 2000.0, 0.1);
    assert_eq!(v, Vec2::new(200.0, 0.0));
}

#[test]
fn approach_moves_by_accel_step() {
    let v = approach_velocity(Vec2::ZERO, Vec2::new(200.0, 0.0), 1000.0, 500.0, 0.1);
    assert!((v.x - 100.0).abs() < 1e-4);
    assert_eq!(v.y, 0.0);
}

#[test]
fn approach_uses_decel_without_input() {
    let v = approach_velocity(Vec2::new(200.0, 0.0), Vec2::ZERO, 1000.0, 500.0, 0.1);
    assert!((v.x - 150.0).abs() < 1e-4);
}
