mod combat;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod effects;
mod enemies;
mod floor;
mod movement;
mod rooms;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Floorkeep".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        effects::EffectsPlugin,
        movement::MovementPlugin,
        combat::CombatPlugin,
        enemies::EnemiesPlugin,
        rooms::RoomsPlugin,
        floor::FloorPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
