//! Movement domain: input sampling and velocity steering.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::components::{
    GameLayer, MovementInput, MovementTuning, Player, approach_velocity,
};
use crate::combat::Health;

const PLAYER_SIZE: Vec2 = Vec2::new(20.0, 20.0);
const PLAYER_MAX_HEALTH: u32 = 5;

pub(crate) fn spawn_player(mut commands: Commands) {
    info!("Spawning player: health={}", PLAYER_MAX_HEALTH);

    commands.spawn((
        Player,
        Health::new(PLAYER_MAX_HEALTH),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 5.0),
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Wall, GameLayer::Enemy, GameLayer::Sensor],
            ),
        ),
    ));
}

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }

    // Diagonals are no faster than straight lines
    input.axis = axis.normalize_or_zero();
}

pub(crate) fn apply_movement(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<&mut LinearVelocity, With<Player>>,
) {
    let dt = time.delta_secs();
    let target = input.axis * tuning.max_speed;

    for mut velocity in &mut query {
        velocity.0 = approach_velocity(velocity.0, target, tuning.accel, tuning.decel, dt);
    }
}
