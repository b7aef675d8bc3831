//! Effects domain: cancellable visual sequences (fades, hit flashes).

mod systems;
mod task;

pub use task::{FlashTuning, TaskPoll, TaskStep, VisualTask};

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::effects::systems::{cancel_visual_tasks, tick_visual_tasks};

/// Abort the visual task on `entity` and restore its rest colour.
#[derive(Debug)]
pub struct CancelVisualTask {
    pub entity: Entity,
}

impl Message for CancelVisualTask {}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlashTuning>()
            .add_message::<CancelVisualTask>()
            .add_systems(Update, (cancel_visual_tasks, tick_visual_tasks).chain());
    }
}
